//! Callback coalescing for update passes.
//!
//! Lifecycle side effects raised while the presentation state is mid-update
//! must not run against a half-mutated tree. Passes that mutate state hand
//! a queued [`UpdateCallbacks`] down to every transition; the side effects
//! collect there and flush in order once the pass commits. Standalone
//! transitions outside a pass use the immediate mode instead.

/// When callbacks added to an [`UpdateCallbacks`] run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionType {
    /// Run synchronously as they are added.
    Immediate,
    /// Collect, then run in order when [`UpdateCallbacks::perform`] fires.
    Queue,
}

/// An ordered collection of deferred side effects.
pub struct UpdateCallbacks {
    execution: ExecutionType,
    pending: Vec<Box<dyn FnOnce()>>,
}

impl UpdateCallbacks {
    pub fn new(execution: ExecutionType) -> Self {
        Self {
            execution,
            pending: Vec::new(),
        }
    }

    /// Adds one side effect, running it now in immediate mode.
    pub fn add(&mut self, callback: impl FnOnce() + 'static) {
        match self.execution {
            ExecutionType::Immediate => callback(),
            ExecutionType::Queue => self.pending.push(Box::new(callback)),
        }
    }

    /// Runs and clears all queued side effects, in insertion order.
    pub fn perform(&mut self) {
        for callback in std::mem::take(&mut self.pending) {
            callback();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Drop for UpdateCallbacks {
    fn drop(&mut self) {
        debug_assert!(
            self.pending.is_empty(),
            "UpdateCallbacks dropped with {} unflushed callbacks. `perform()` must run before \
             the pass ends.",
            self.pending.len(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_immediate_runs_inline() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut callbacks = UpdateCallbacks::new(ExecutionType::Immediate);

        let o = order.clone();
        callbacks.add(move || o.borrow_mut().push(1));
        order.borrow_mut().push(2);

        assert_eq!(*order.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_queued_runs_on_perform_in_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut callbacks = UpdateCallbacks::new(ExecutionType::Queue);

        let o = order.clone();
        callbacks.add(move || o.borrow_mut().push(1));
        let o = order.clone();
        callbacks.add(move || o.borrow_mut().push(2));

        order.borrow_mut().push(0);
        callbacks.perform();

        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_perform_clears_pending() {
        let mut callbacks = UpdateCallbacks::new(ExecutionType::Queue);
        callbacks.add(|| {});

        assert!(!callbacks.is_empty());
        callbacks.perform();
        assert!(callbacks.is_empty());
    }
}
