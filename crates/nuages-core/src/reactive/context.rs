//! `Context`: values provided to an entire render tree.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::rc::Rc;

use super::runtime::NodeId;

/// A typed handle to a provided value.
///
/// A context's identity is the handle instance, not the value type: two
/// `Context<String>` handles address two independent slots. Handles are
/// `Copy`, so they can be stashed in a `thread_local!` and shared freely.
///
/// Unlike the React equivalent, lookup returns `Option<T>` instead of
/// panicking when nothing was provided.
///
/// # Example
///
/// ```ignore
/// thread_local! {
/// 	static THEME: Context<String> = Context::new();
/// }
///
/// THEME.with(|ctx| provide_context(ctx, String::from("dark")));
/// let theme = THEME.with(use_context); // Some("dark")
/// ```
#[derive(Debug)]
pub struct Context<T: 'static> {
	id: NodeId,
	_marker: PhantomData<fn() -> T>,
}

impl<T: 'static> Clone for Context<T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T: 'static> Copy for Context<T> {}

impl<T: 'static> Context<T> {
	/// Creates a fresh context slot.
	pub fn new() -> Self {
		Self {
			id: NodeId::new(),
			_marker: PhantomData,
		}
	}
}

impl<T: 'static> Default for Context<T> {
	fn default() -> Self {
		Self::new()
	}
}

thread_local! {
	static VALUES: RefCell<HashMap<NodeId, Rc<dyn Any>>> = RefCell::new(HashMap::new());
}

/// Provides `value` for `ctx` on this thread, replacing any previous value.
pub fn provide_context<T: 'static>(ctx: &Context<T>, value: T) {
	VALUES.with(|values| {
		values.borrow_mut().insert(ctx.id, Rc::new(value));
	});
}

/// Reads the value provided for `ctx`, if any.
pub fn use_context<T: Clone + 'static>(ctx: &Context<T>) -> Option<T> {
	VALUES.with(|values| {
		values
			.borrow()
			.get(&ctx.id)
			.and_then(|any| any.downcast_ref::<T>())
			.cloned()
	})
}

/// Removes the value provided for `ctx`, returning whether one existed.
pub fn remove_context<T: 'static>(ctx: &Context<T>) -> bool {
	VALUES.with(|values| values.borrow_mut().remove(&ctx.id).is_some())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_use_context_with_value() {
		let ctx: Context<i32> = Context::new();
		provide_context(&ctx, 42);
		assert_eq!(use_context(&ctx), Some(42));
	}

	#[rstest]
	fn test_use_context_without_value() {
		let ctx: Context<String> = Context::new();
		assert!(use_context(&ctx).is_none());
	}

	#[rstest]
	fn test_provide_replaces_previous_value() {
		let ctx: Context<&'static str> = Context::new();
		provide_context(&ctx, "first");
		provide_context(&ctx, "second");
		assert_eq!(use_context(&ctx), Some("second"));
	}

	#[rstest]
	fn test_contexts_of_same_type_are_independent() {
		let a: Context<i32> = Context::new();
		let b: Context<i32> = Context::new();
		provide_context(&a, 1);
		provide_context(&b, 2);
		assert_eq!(use_context(&a), Some(1));
		assert_eq!(use_context(&b), Some(2));
	}

	#[rstest]
	fn test_remove_context() {
		let ctx: Context<i32> = Context::new();
		provide_context(&ctx, 9);
		assert!(remove_context(&ctx));
		assert!(use_context(&ctx).is_none());
		assert!(!remove_context(&ctx));
	}
}
