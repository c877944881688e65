//! One-shot readiness broadcast.
//!
//! Subscribers queued before `fire` run exactly once, in subscription
//! order, when it fires. The signal fires at most once; later calls to
//! `fire` do nothing. Delivering to subscribers that arrive after the
//! signal has fired is the owner's job (see `GameHost::on_ready`).

type Subscriber<T> = Box<dyn FnOnce(&mut T)>;

pub struct ReadySignal<T> {
    fired:   bool,
    pending: Vec<Subscriber<T>>,
}

impl<T> Default for ReadySignal<T> {
    fn default() -> Self {
        Self { fired: false, pending: Vec::new() }
    }
}

impl<T> ReadySignal<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnOnce(&mut T) + 'static,
    {
        self.pending.push(Box::new(subscriber));
    }

    /// Deliver to every queued subscriber. Returns how many ran.
    pub fn fire(&mut self, target: &mut T) -> usize {
        if self.fired {
            return 0;
        }
        self.fired = true;
        let subscribers = std::mem::take(&mut self.pending);
        let count = subscribers.len();
        for subscriber in subscribers {
            subscriber(target);
        }
        count
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Subscribers still waiting for the signal.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}
