//! Render-scope hooks.
//!
//! While the router renders a matched entry it pushes a scope frame onto a
//! thread-local stack; the component being rendered reads its surroundings
//! through these accessors. Outside of a render they return `None` rather
//! than panicking.

use std::cell::RefCell;

use crate::core::Router;
use crate::location::Location;
use crate::params::ParamMap;
use crate::query::Query;

/// One frame of render context.
pub(crate) struct Scope {
	pub(crate) location: Location,
	pub(crate) params: ParamMap,
	pub(crate) router: Router,
}

thread_local! {
	static SCOPES: RefCell<Vec<Scope>> = const { RefCell::new(Vec::new()) };
}

struct ScopeGuard;

impl Drop for ScopeGuard {
	fn drop(&mut self) {
		SCOPES.with(|scopes| {
			scopes.borrow_mut().pop();
		});
	}
}

/// Runs `f` with `scope` as the innermost render frame.
pub(crate) fn with_scope<R>(scope: Scope, f: impl FnOnce() -> R) -> R {
	SCOPES.with(|scopes| scopes.borrow_mut().push(scope));
	let _guard = ScopeGuard;
	f()
}

fn with_current<R>(f: impl FnOnce(&Scope) -> R) -> Option<R> {
	SCOPES.with(|scopes| scopes.borrow().last().map(f))
}

/// The location being rendered.
///
/// This is the snapshot the current render resolved; for a live value that
/// updates across navigations, observe
/// [`Router::location_signal`](crate::core::Router::location_signal) from
/// an effect instead.
pub fn use_location() -> Option<Location> {
	with_current(|scope| scope.location.clone())
}

/// The merged parameters captured by this entry and its ancestors.
///
/// Captures from entries *below* the one being rendered are not visible;
/// a parent's output may be cached across child-only navigation, so it
/// must not depend on child captures.
pub fn use_params() -> Option<ParamMap> {
	with_current(|scope| scope.params.clone())
}

/// The router driving the current render, for imperative navigation.
pub fn use_router() -> Option<Router> {
	with_current(|scope| scope.router.clone())
}

/// Read and write access to the current location's query mapping.
pub fn use_search_params() -> Option<SearchParams> {
	with_current(|scope| SearchParams {
		query: scope.location.query().clone(),
		router: scope.router.clone(),
	})
}

/// The query-state binding: a read snapshot plus whole-map writers.
///
/// Writers replace the entire mapping — there is no merge — and navigate
/// to the same path with the new query, re-resolving and re-rendering.
#[derive(Clone)]
pub struct SearchParams {
	query: Query,
	router: Router,
}

impl SearchParams {
	/// The query mapping as of this render.
	pub fn query(&self) -> &Query {
		&self.query
	}

	/// Looks up a single value.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.query.get(key)
	}

	/// Replaces the whole query and push-navigates to the same path.
	pub fn set(&self, query: Query) {
		self.router.set_query(query);
	}

	/// Replaces the whole query without growing the history stack.
	pub fn replace(&self, query: Query) {
		self.router.replace_query(query);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_hooks_outside_render_return_none() {
		assert!(use_location().is_none());
		assert!(use_params().is_none());
		assert!(use_router().is_none());
		assert!(use_search_params().is_none());
	}
}
