//! The process-wide authorization flag.
//!
//! Deliberately minimal: a single boolean behind a signal, flipped by
//! explicit login/logout calls, with no persistence across restarts.
//! Guarded routes read it through their predicates; components reach it
//! with [`use_auth`].

use std::cell::RefCell;

use nuages_core::reactive::{Context, provide_context, remove_context, use_context};
use nuages_core::Signal;

/// The authorization state: a reactive boolean with two setters.
///
/// # Example
///
/// ```ignore
/// let auth = AuthState::provide(false);
///
/// let router = Router::builder()
/// 	.route(Route::new("dashboard", dashboard).guard(
/// 		{
/// 			let auth = auth.clone();
/// 			move || auth.is_authenticated()
/// 		},
/// 		"/login",
/// 	))
/// 	.route(Route::new("login", login))
/// 	.build()?;
/// ```
#[derive(Debug, Clone)]
pub struct AuthState {
	flag: Signal<bool>,
}

thread_local! {
	static AUTH: RefCell<Option<Context<AuthState>>> = const { RefCell::new(None) };
}

fn auth_context() -> Context<AuthState> {
	AUTH.with(|slot| {
		let mut slot = slot.borrow_mut();
		*slot.get_or_insert_with(Context::new)
	})
}

impl AuthState {
	/// Creates a detached auth state.
	pub fn new(initial: bool) -> Self {
		Self {
			flag: Signal::new(initial),
		}
	}

	/// Creates an auth state and installs it as the process-wide one,
	/// replacing any previous installation.
	pub fn provide(initial: bool) -> Self {
		let state = Self::new(initial);
		provide_context(&auth_context(), state.clone());
		state
	}

	/// The installed auth state, if any.
	pub fn current() -> Option<Self> {
		use_context(&auth_context())
	}

	/// Uninstalls the process-wide auth state.
	pub fn reset() {
		remove_context(&auth_context());
	}

	/// Marks the user as logged in.
	pub fn login(&self) {
		self.flag.set(true);
	}

	/// Marks the user as logged out.
	pub fn logout(&self) {
		self.flag.set(false);
	}

	/// Whether the user is currently authorized.
	pub fn is_authenticated(&self) -> bool {
		self.flag.get()
	}

	/// The underlying signal, for effects that react to auth changes.
	pub fn signal(&self) -> &Signal<bool> {
		&self.flag
	}
}

/// The installed auth state, for use inside components.
pub fn use_auth() -> Option<AuthState> {
	AuthState::current()
}
