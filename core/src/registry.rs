//! Per-type subsystem cache.
//!
//! Holds at most one instance of each concrete subsystem type for the
//! lifetime of the owning instance. Lookup constructs lazily via Default
//! and never initializes: only registration with the instance does that.

use crate::subsystem::{GameSubsystem, SubsystemEntry, SubsystemState};
use std::any::TypeId;
use std::collections::HashMap;

#[derive(Default)]
pub struct SubsystemRegistry {
    entries: HashMap<TypeId, SubsystemEntry>,
}

impl SubsystemRegistry {
    pub fn new() -> Self {
        Self { entries: HashMap::new() }
    }

    /// Get the cached `T`, constructing it on first lookup.
    pub fn get<T: GameSubsystem + Default>(&mut self) -> &mut T {
        let entry = self.entry::<T>();
        entry
            .subsystem_mut()
            .as_any_mut()
            .downcast_mut::<T>()
            .unwrap_or_else(|| unreachable!("registry entry keyed by TypeId holds a different type"))
    }

    /// Get the cached entry for `T`, constructing it on first lookup.
    pub fn entry<T: GameSubsystem + Default>(&mut self) -> &mut SubsystemEntry {
        self.entries.entry(TypeId::of::<T>()).or_insert_with(|| {
            let subsystem = T::default();
            log::debug!("registry: constructed subsystem '{}'", subsystem.name());
            SubsystemEntry::new(Box::new(subsystem))
        })
    }

    /// Look up `T` without constructing it.
    pub fn find<T: GameSubsystem>(&self) -> Option<&T> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|e| e.subsystem().as_any().downcast_ref::<T>())
    }

    pub fn find_mut<T: GameSubsystem>(&mut self) -> Option<&mut T> {
        self.entries
            .get_mut(&TypeId::of::<T>())
            .and_then(|e| e.subsystem_mut().as_any_mut().downcast_mut::<T>())
    }

    pub(crate) fn entry_by_id(&self, id: TypeId) -> Option<&SubsystemEntry> {
        self.entries.get(&id)
    }

    pub(crate) fn entry_by_id_mut(&mut self, id: TypeId) -> Option<&mut SubsystemEntry> {
        self.entries.get_mut(&id)
    }

    /// None when `T` has never been looked up.
    pub fn state_of<T: GameSubsystem>(&self) -> Option<SubsystemState> {
        self.entries.get(&TypeId::of::<T>()).map(|e| e.state())
    }

    pub fn contains<T: GameSubsystem>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
