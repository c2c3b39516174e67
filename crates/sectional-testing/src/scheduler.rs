//! Test schedulers with explicit control over deferred work.

use std::cell::RefCell;

use sectional::Scheduler;

/// Runs scheduled work synchronously, on the spot.
#[derive(Default)]
pub struct ImmediateScheduler;

impl Scheduler for ImmediateScheduler {
    fn schedule(&self, work: Box<dyn FnOnce()>) {
        work();
    }
}

/// Holds scheduled work until the test pumps it with [`run_pending`].
///
/// [`run_pending`]: ManualScheduler::run_pending
#[derive(Default)]
pub struct ManualScheduler {
    pending: RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl ManualScheduler {
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Runs everything scheduled so far, in order. Work scheduled while
    /// running is held for the next pump.
    pub fn run_pending(&self) {
        let work = std::mem::take(&mut *self.pending.borrow_mut());
        for item in work {
            item();
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, work: Box<dyn FnOnce()>) {
        self.pending.borrow_mut().push(work);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_manual_scheduler_holds_work_until_pumped() {
        let scheduler = ManualScheduler::default();
        let ran = Rc::new(Cell::new(0));

        let counter = ran.clone();
        scheduler.schedule(Box::new(move || counter.set(counter.get() + 1)));
        assert_eq!(ran.get(), 0);
        assert_eq!(scheduler.pending_count(), 1);

        scheduler.run_pending();
        assert_eq!(ran.get(), 1);
        assert_eq!(scheduler.pending_count(), 0);
    }
}
