//! Readiness signal for asynchronously populated source hierarchies.

use std::time::Duration;

use parking_lot::{Condvar, Mutex};

/// Default wait budget before building against a possibly incomplete hierarchy.
pub const DEFAULT_READY_BUDGET: Duration = Duration::from_millis(500);

/// Outcome of waiting on a [`HierarchyReady`] signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
	Ready,
	TimedOut,
}

/// One-shot signal resolved by the host once its populator thread finishes.
#[derive(Debug, Default)]
pub struct HierarchyReady {
	ready: Mutex<bool>,
	cond: Condvar,
}

impl HierarchyReady {
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a signal that is already resolved.
	pub fn resolved() -> Self {
		Self {
			ready: Mutex::new(true),
			cond: Condvar::new(),
		}
	}

	/// Marks the hierarchy populated and wakes every waiter.
	pub fn mark_ready(&self) {
		*self.ready.lock() = true;
		self.cond.notify_all();
	}

	pub fn is_ready(&self) -> bool {
		*self.ready.lock()
	}

	/// Blocks until the signal resolves or `timeout` elapses. There is no cancellation.
	pub fn wait_for(&self, timeout: Duration) -> ReadyState {
		let mut ready = self.ready.lock();
		if !*ready {
			self.cond.wait_while_for(&mut ready, |ready| !*ready, timeout);
		}
		if *ready { ReadyState::Ready } else { ReadyState::TimedOut }
	}
}
