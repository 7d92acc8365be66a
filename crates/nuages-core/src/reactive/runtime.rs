//! The thread-local reactive runtime.
//!
//! Tracks which effects read which signals and re-runs effects when those
//! signals change. All bookkeeping lives in a `thread_local`; signals and
//! effects created on different threads never observe each other.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use tracing::trace;

/// Unique identifier for a reactive node (signal or effect).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
	/// Allocates a fresh id from the runtime's counter.
	pub fn new() -> Self {
		with_runtime(|rt| {
			let id = rt.next_id.get();
			rt.next_id.set(id + 1);
			NodeId(id)
		})
	}
}

impl Default for NodeId {
	fn default() -> Self {
		Self::new()
	}
}

type EffectFn = Rc<RefCell<dyn FnMut()>>;

/// Per-thread reactive state.
pub struct Runtime {
	/// Next node id to hand out.
	next_id: Cell<u64>,
	/// signal id -> effect ids subscribed to it.
	subscribers: RefCell<HashMap<NodeId, Vec<NodeId>>>,
	/// Registered effect bodies.
	effects: RefCell<HashMap<NodeId, EffectFn>>,
	/// Stack of effects currently executing; the top one is the observer
	/// that signal reads register against.
	observers: RefCell<Vec<NodeId>>,
}

impl Runtime {
	fn new() -> Self {
		Self {
			next_id: Cell::new(1),
			subscribers: RefCell::new(HashMap::new()),
			effects: RefCell::new(HashMap::new()),
			observers: RefCell::new(Vec::new()),
		}
	}

	/// Records that the currently running effect (if any) read `signal`.
	pub fn track_dependency(&self, signal: NodeId) {
		let Some(&observer) = self.observers.borrow().last() else {
			return;
		};
		let mut subs = self.subscribers.borrow_mut();
		let entry = subs.entry(signal).or_default();
		if !entry.contains(&observer) {
			entry.push(observer);
		}
	}

	/// Re-runs every effect subscribed to `signal`, synchronously.
	pub fn notify_signal_change(&self, signal: NodeId) {
		let dependents = self
			.subscribers
			.borrow()
			.get(&signal)
			.cloned()
			.unwrap_or_default();
		if dependents.is_empty() {
			return;
		}
		trace!(signal = signal.0, count = dependents.len(), "signal changed");
		for effect in dependents {
			self.run_effect(effect);
		}
	}

	/// Registers an effect body and runs it once to collect dependencies.
	pub fn register_effect(&self, id: NodeId, f: EffectFn) {
		self.effects.borrow_mut().insert(id, f);
		self.run_effect(id);
	}

	/// Runs a registered effect, re-collecting its dependencies.
	fn run_effect(&self, id: NodeId) {
		// A signal write from inside the effect's own body must not
		// re-enter it.
		if self.observers.borrow().contains(&id) {
			return;
		}
		let Some(f) = self.effects.borrow().get(&id).cloned() else {
			return;
		};
		self.clear_subscriptions(id);
		self.observers.borrow_mut().push(id);
		(f.borrow_mut())();
		self.observers.borrow_mut().pop();
	}

	/// Drops every subscription held by `effect`.
	fn clear_subscriptions(&self, effect: NodeId) {
		for subs in self.subscribers.borrow_mut().values_mut() {
			subs.retain(|&e| e != effect);
		}
	}

	/// Removes a node entirely (signal or effect).
	pub fn remove_node(&self, id: NodeId) {
		self.subscribers.borrow_mut().remove(&id);
		self.effects.borrow_mut().remove(&id);
		self.clear_subscriptions(id);
	}
}

thread_local! {
	static RUNTIME: Runtime = Runtime::new();
}

/// Runs `f` with the thread's runtime.
pub fn with_runtime<R>(f: impl FnOnce(&Runtime) -> R) -> R {
	RUNTIME.with(f)
}

/// Like [`with_runtime`], but survives thread-local teardown during
/// destructor runs. Used from `Drop` impls.
pub fn try_with_runtime<R>(f: impl FnOnce(&Runtime) -> R) -> Option<R> {
	RUNTIME.try_with(f).ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_node_ids_are_unique() {
		let a = NodeId::new();
		let b = NodeId::new();
		assert_ne!(a, b);
	}

	#[test]
	fn test_track_without_observer_is_noop() {
		let signal = NodeId::new();
		with_runtime(|rt| {
			rt.track_dependency(signal);
			assert!(
				rt.subscribers
					.borrow()
					.get(&signal)
					.is_none_or(|subs| subs.is_empty())
			);
		});
	}

	#[test]
	fn test_remove_node_clears_subscriptions() {
		let signal = NodeId::new();
		let effect = NodeId::new();
		with_runtime(|rt| {
			rt.subscribers.borrow_mut().insert(signal, vec![effect]);
			rt.remove_node(effect);
			assert!(rt.subscribers.borrow()[&signal].is_empty());
		});
	}
}
