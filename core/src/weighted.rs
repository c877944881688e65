//! Weighted random selection.
//!
//! Selection walks the sequence accumulating weight and returns the first
//! entry whose cumulative weight reaches the draw. Zero-weight entries are
//! never matched by the walk, so an all-zero sequence resolves to its last
//! element. The last element is also the fallback when floating-point
//! rounding leaves the draw just above the final cumulative sum.

use crate::{
    error::{LemonError, LemonResult},
    rng::GameRng,
};
use serde::{Deserialize, Serialize};

/// A value paired with a non-negative selection weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueProbabilityPair<T> {
    value: T,
    weight: f64,
}

impl<T> ValueProbabilityPair<T> {
    pub fn new(value: T, weight: f64) -> LemonResult<Self> {
        check_weight(weight)?;
        Ok(Self { value, weight })
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// Pick one value from `pairs` with probability proportional to its weight.
pub fn weighted_random<'a, T>(
    pairs: &'a [ValueProbabilityPair<T>],
    rng: &mut GameRng,
) -> LemonResult<&'a T> {
    if pairs.is_empty() {
        return Err(LemonError::invalid("weighted selection over an empty sequence"));
    }
    // Pairs deserialized from data bypass `new`, so validate again here.
    for pair in pairs {
        check_weight(pair.weight)?;
    }
    let index = select_index(pairs.iter().map(|p| p.weight), pairs.len(), rng)?;
    Ok(&pairs[index].value)
}

/// Parallel-collection form: `weights[i]` is the weight of `values[i]`.
pub fn weighted_random_parallel<'a, T>(
    weights: &[f64],
    values: &'a [T],
    rng: &mut GameRng,
) -> LemonResult<&'a T> {
    if weights.len() != values.len() {
        return Err(LemonError::invalid(format!(
            "weights and values differ in length: {} vs {}",
            weights.len(),
            values.len()
        )));
    }
    if values.is_empty() {
        return Err(LemonError::invalid("weighted selection over an empty sequence"));
    }
    for &weight in weights {
        check_weight(weight)?;
    }
    let index = select_index(weights.iter().copied(), values.len(), rng)?;
    Ok(&values[index])
}

/// An owned, pre-validated table for repeated draws.
/// Cumulative weights are computed once at construction.
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    values: Vec<T>,
    cumulative: Vec<f64>,
}

impl<T> WeightedTable<T> {
    pub fn new(pairs: Vec<ValueProbabilityPair<T>>) -> LemonResult<Self> {
        if pairs.is_empty() {
            return Err(LemonError::invalid("weighted table needs at least one entry"));
        }
        let mut values = Vec::with_capacity(pairs.len());
        let mut cumulative = Vec::with_capacity(pairs.len());
        let mut running = 0.0;
        for pair in pairs {
            check_weight(pair.weight)?;
            running += pair.weight;
            cumulative.push(running);
            values.push(pair.value);
        }
        check_total(running)?;
        Ok(Self { values, cumulative })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    pub fn draw(&self, rng: &mut GameRng) -> &T {
        let last = self.values.len() - 1;
        if last == 0 {
            return &self.values[0];
        }
        let draw = rng.next_f64() * self.total_weight();
        let mut previous = 0.0;
        for (index, &threshold) in self.cumulative.iter().enumerate() {
            if threshold > previous && threshold >= draw {
                return &self.values[index];
            }
            previous = threshold;
        }
        &self.values[last]
    }
}

fn check_weight(weight: f64) -> LemonResult<()> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(LemonError::invalid(format!(
            "weight must be a finite non-negative number, got {weight}"
        )));
    }
    Ok(())
}

/// Finite weights can still sum past `f64::MAX`; an infinite total would
/// push the draw beyond every cumulative weight.
fn check_total(total: f64) -> LemonResult<f64> {
    if !total.is_finite() {
        return Err(LemonError::invalid("total weight overflows f64"));
    }
    Ok(total)
}

/// Callers guarantee `len > 0` and that every weight is valid.
fn select_index(
    weights: impl Iterator<Item = f64> + Clone,
    len: usize,
    rng: &mut GameRng,
) -> LemonResult<usize> {
    if len == 1 {
        return Ok(0);
    }
    let total = check_total(weights.clone().sum())?;
    let draw = rng.next_f64() * total;
    let mut cumulative = 0.0;
    for (index, weight) in weights.enumerate() {
        if weight <= 0.0 {
            continue;
        }
        cumulative += weight;
        if cumulative >= draw {
            return Ok(index);
        }
    }
    Ok(len - 1)
}
