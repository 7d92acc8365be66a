//! The in-memory history stack.
//!
//! Models the host environment's session history: an ordered list of
//! location snapshots with a cursor. `push` appends (discarding any
//! forward entries), `replace` overwrites the cursor entry, and
//! `back`/`forward`/`go` move the cursor and surface as pop events — the
//! only externally triggered navigation source besides direct calls.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::debug;

use crate::location::Location;

/// How a location change entered the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationType {
	/// A new entry was appended.
	Push,
	/// The current entry was overwritten.
	Replace,
	/// The cursor moved across existing entries (back/forward).
	Pop,
}

type Listener = Rc<dyn Fn(&Location, NavigationType)>;

/// Identifier for a registered history listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

struct HistoryInner {
	entries: RefCell<Vec<Location>>,
	cursor: Cell<usize>,
	listeners: RefCell<Vec<(ListenerId, Listener)>>,
	next_listener: Cell<u64>,
}

/// A cloneable handle to an in-memory history stack.
///
/// Clones share the same stack. All operations are synchronous; listeners
/// run before the operation returns.
#[derive(Clone)]
pub struct MemoryHistory {
	inner: Rc<HistoryInner>,
}

impl MemoryHistory {
	/// Creates a history whose single entry is the root location.
	pub fn new() -> Self {
		Self::with_initial(Location::parse("/"))
	}

	/// Creates a history seeded with `initial`.
	pub fn with_initial(initial: Location) -> Self {
		Self {
			inner: Rc::new(HistoryInner {
				entries: RefCell::new(vec![initial]),
				cursor: Cell::new(0),
				listeners: RefCell::new(Vec::new()),
				next_listener: Cell::new(1),
			}),
		}
	}

	/// The location under the cursor.
	pub fn current(&self) -> Location {
		self.inner.entries.borrow()[self.inner.cursor.get()].clone()
	}

	/// Number of entries on the stack.
	pub fn len(&self) -> usize {
		self.inner.entries.borrow().len()
	}

	/// A history always holds at least its initial entry.
	pub fn is_empty(&self) -> bool {
		false
	}

	/// The cursor position.
	pub fn cursor(&self) -> usize {
		self.inner.cursor.get()
	}

	/// Whether a back navigation is possible.
	pub fn can_go_back(&self) -> bool {
		self.inner.cursor.get() > 0
	}

	/// Whether a forward navigation is possible.
	pub fn can_go_forward(&self) -> bool {
		self.inner.cursor.get() + 1 < self.len()
	}

	/// Appends a new entry, discarding anything ahead of the cursor.
	pub fn push(&self, location: Location) {
		{
			let mut entries = self.inner.entries.borrow_mut();
			let cursor = self.inner.cursor.get();
			entries.truncate(cursor + 1);
			entries.push(location.clone());
			self.inner.cursor.set(entries.len() - 1);
		}
		debug!(to = %location, "history push");
		self.notify(&location, NavigationType::Push);
	}

	/// Overwrites the entry under the cursor.
	pub fn replace(&self, location: Location) {
		{
			let mut entries = self.inner.entries.borrow_mut();
			let cursor = self.inner.cursor.get();
			entries[cursor] = location.clone();
		}
		debug!(to = %location, "history replace");
		self.notify(&location, NavigationType::Replace);
	}

	/// Moves the cursor by `delta` entries. Returns `false` (and moves
	/// nothing) when the target is out of range.
	pub fn go(&self, delta: isize) -> bool {
		let cursor = self.inner.cursor.get() as isize;
		let target = cursor + delta;
		if target < 0 || target as usize >= self.len() {
			return false;
		}
		self.inner.cursor.set(target as usize);
		let location = self.current();
		debug!(to = %location, delta, "history pop");
		self.notify(&location, NavigationType::Pop);
		true
	}

	/// Moves one entry back.
	pub fn back(&self) -> bool {
		self.go(-1)
	}

	/// Moves one entry forward.
	pub fn forward(&self) -> bool {
		self.go(1)
	}

	/// Registers a listener for every history change.
	pub fn listen(&self, listener: impl Fn(&Location, NavigationType) + 'static) -> ListenerId {
		let id = ListenerId(self.inner.next_listener.get());
		self.inner.next_listener.set(id.0 + 1);
		self.inner
			.listeners
			.borrow_mut()
			.push((id, Rc::new(listener)));
		id
	}

	/// Removes a listener.
	pub fn unlisten(&self, id: ListenerId) {
		self.inner
			.listeners
			.borrow_mut()
			.retain(|(listener_id, _)| *listener_id != id);
	}

	fn notify(&self, location: &Location, nav_type: NavigationType) {
		// Listeners may navigate again; never hold the borrow across the
		// callbacks.
		let listeners: Vec<Listener> = self
			.inner
			.listeners
			.borrow()
			.iter()
			.map(|(_, l)| Rc::clone(l))
			.collect();
		for listener in listeners {
			listener(location, nav_type);
		}
	}
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for MemoryHistory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MemoryHistory")
			.field("len", &self.len())
			.field("cursor", &self.cursor())
			.field("current", &self.current())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cell::RefCell;

	#[test]
	fn test_starts_at_root() {
		let history = MemoryHistory::new();
		assert_eq!(history.current().path(), "/");
		assert_eq!(history.len(), 1);
		assert!(!history.can_go_back());
		assert!(!history.can_go_forward());
	}

	#[test]
	fn test_push_appends() {
		let history = MemoryHistory::new();
		history.push(Location::parse("/products"));
		assert_eq!(history.len(), 2);
		assert_eq!(history.current().path(), "/products");
		assert!(history.can_go_back());
	}

	#[test]
	fn test_replace_keeps_length() {
		let history = MemoryHistory::new();
		history.push(Location::parse("/dashboard"));
		history.replace(Location::parse("/login"));
		assert_eq!(history.len(), 2);
		assert_eq!(history.current().path(), "/login");
	}

	#[test]
	fn test_back_and_forward() {
		let history = MemoryHistory::new();
		history.push(Location::parse("/a"));
		history.push(Location::parse("/b"));

		assert!(history.back());
		assert_eq!(history.current().path(), "/a");
		assert!(history.forward());
		assert_eq!(history.current().path(), "/b");
		assert!(!history.forward());
	}

	#[test]
	fn test_back_at_start_is_refused() {
		let history = MemoryHistory::new();
		assert!(!history.back());
		assert_eq!(history.current().path(), "/");
	}

	#[test]
	fn test_push_discards_forward_entries() {
		let history = MemoryHistory::new();
		history.push(Location::parse("/a"));
		history.push(Location::parse("/b"));
		history.back();
		history.push(Location::parse("/c"));

		assert_eq!(history.len(), 3);
		assert_eq!(history.current().path(), "/c");
		assert!(!history.can_go_forward());
	}

	#[test]
	fn test_listeners_observe_navigation_types() {
		let history = MemoryHistory::new();
		let events = Rc::new(RefCell::new(Vec::new()));
		history.listen({
			let events = Rc::clone(&events);
			move |location, nav_type| {
				events
					.borrow_mut()
					.push((location.path().to_string(), nav_type));
			}
		});

		history.push(Location::parse("/a"));
		history.replace(Location::parse("/b"));
		history.back();

		assert_eq!(
			*events.borrow(),
			vec![
				("/a".to_string(), NavigationType::Push),
				("/b".to_string(), NavigationType::Replace),
				("/".to_string(), NavigationType::Pop),
			]
		);
	}

	#[test]
	fn test_unlisten_stops_events() {
		let history = MemoryHistory::new();
		let count = Rc::new(RefCell::new(0));
		let id = history.listen({
			let count = Rc::clone(&count);
			move |_, _| *count.borrow_mut() += 1
		});

		history.push(Location::parse("/a"));
		history.unlisten(id);
		history.push(Location::parse("/b"));

		assert_eq!(*count.borrow(), 1);
	}

	#[test]
	fn test_clones_share_the_stack() {
		let history = MemoryHistory::new();
		let other = history.clone();
		history.push(Location::parse("/shared"));
		assert_eq!(other.current().path(), "/shared");
		assert_eq!(other.len(), 2);
	}
}
