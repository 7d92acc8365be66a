//! `Effect`: side effects that re-run when their dependencies change.

use std::cell::RefCell;
use std::rc::Rc;

use super::runtime::{NodeId, with_runtime};

/// A side effect with automatic dependency tracking.
///
/// The closure runs once on creation. Every [`Signal`](super::Signal) it
/// reads during a run subscribes it to that signal; any later write to one
/// of those signals re-runs the closure synchronously. Dependencies are
/// re-collected on each run.
///
/// Dropping the handle does not stop the effect; call [`Effect::dispose`]
/// to unregister it.
///
/// # Example
///
/// ```ignore
/// let name = Signal::new(String::from("world"));
/// let effect = Effect::new({
/// 	let name = name.clone();
/// 	move || println!("hello {}", name.get())
/// });
/// name.set(String::from("router")); // prints again
/// effect.dispose();
/// ```
#[derive(Debug, Clone)]
pub struct Effect {
	id: NodeId,
}

impl Effect {
	/// Registers the effect and runs it immediately.
	pub fn new<F>(f: F) -> Self
	where
		F: FnMut() + 'static,
	{
		let id = NodeId::new();
		let body: Rc<RefCell<dyn FnMut()>> = Rc::new(RefCell::new(f));
		with_runtime(|rt| rt.register_effect(id, body));
		Self { id }
	}

	/// Unregisters the effect; it will not run again.
	pub fn dispose(&self) {
		with_runtime(|rt| rt.remove_node(self.id));
	}

	/// The effect's node id.
	pub fn id(&self) -> NodeId {
		self.id
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::reactive::Signal;
	use std::cell::Cell;

	#[test]
	fn test_effect_runs_immediately() {
		let runs = Rc::new(Cell::new(0));
		let _effect = Effect::new({
			let runs = Rc::clone(&runs);
			move || runs.set(runs.get() + 1)
		});
		assert_eq!(runs.get(), 1);
	}

	#[test]
	fn test_effect_reruns_on_signal_write() {
		let signal = Signal::new(0);
		let seen = Rc::new(RefCell::new(Vec::new()));
		let _effect = Effect::new({
			let signal = signal.clone();
			let seen = Rc::clone(&seen);
			move || seen.borrow_mut().push(signal.get())
		});

		signal.set(1);
		signal.set(2);
		assert_eq!(*seen.borrow(), vec![0, 1, 2]);
	}

	#[test]
	fn test_effect_retracks_dependencies() {
		let toggle = Signal::new(true);
		let a = Signal::new(0);
		let b = Signal::new(0);
		let runs = Rc::new(Cell::new(0));
		let _effect = Effect::new({
			let (toggle, a, b) = (toggle.clone(), a.clone(), b.clone());
			let runs = Rc::clone(&runs);
			move || {
				runs.set(runs.get() + 1);
				if toggle.get() {
					let _ = a.get();
				} else {
					let _ = b.get();
				}
			}
		});
		assert_eq!(runs.get(), 1);

		// Tracked: toggle, a.
		a.set(1);
		assert_eq!(runs.get(), 2);

		// Switch the branch; b becomes tracked, a is dropped.
		toggle.set(false);
		assert_eq!(runs.get(), 3);
		a.set(2);
		assert_eq!(runs.get(), 3);
		b.set(1);
		assert_eq!(runs.get(), 4);
	}

	#[test]
	fn test_disposed_effect_stops_running() {
		let signal = Signal::new(0);
		let runs = Rc::new(Cell::new(0));
		let effect = Effect::new({
			let signal = signal.clone();
			let runs = Rc::clone(&runs);
			move || {
				let _ = signal.get();
				runs.set(runs.get() + 1);
			}
		});
		assert_eq!(runs.get(), 1);

		effect.dispose();
		signal.set(1);
		assert_eq!(runs.get(), 1);
	}

	#[test]
	fn test_write_inside_own_body_does_not_recurse() {
		let signal = Signal::new(0);
		let runs = Rc::new(Cell::new(0));
		let _effect = Effect::new({
			let signal = signal.clone();
			let runs = Rc::clone(&runs);
			move || {
				runs.set(runs.get() + 1);
				if signal.get() < 5 {
					signal.update(|n| *n += 1);
				}
			}
		});
		// The effect ran once; its own write was suppressed.
		assert_eq!(runs.get(), 1);
	}
}
