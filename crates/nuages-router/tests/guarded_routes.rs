//! Guarded access: predicate-false always redirects with replace mode.

use nuages_core::{Component, IntoView, View};
use nuages_router::{AuthState, Outlet, Route, Router, use_auth};
use serial_test::serial;

fn text(s: &'static str) -> impl Fn() -> View {
	move || View::text(s)
}

fn guarded_router(auth: &AuthState) -> Router {
	let auth = auth.clone();
	Router::builder()
		.route(Route::new("/", text("Home")))
		.route(Route::new("login", text("Login")))
		.route(
			Route::new("dashboard", || {
				View::element("div")
					.child("Dashboard")
					.child(Outlet::new().render())
					.into_view()
			})
			.guard(move || auth.is_authenticated(), "/login")
			.child(Route::index(text("Overview")))
			.child(Route::new("settings", text("Settings"))),
		)
		.build()
		.expect("builds")
}

#[test]
fn predicate_false_redirects_to_the_alternate_location() {
	let auth = AuthState::new(false);
	let router = guarded_router(&auth);

	router.push("/dashboard");
	let html = router.render_current().render_to_string();

	assert_eq!(html, "Login");
	assert_eq!(router.current_location().path(), "/login");
}

#[test]
fn redirect_uses_replace_mode_never_push() {
	let auth = AuthState::new(false);
	let router = guarded_router(&auth);

	router.push("/dashboard");
	let len_before = router.history().len();
	router.render_current();

	// Same stack length; only the top entry differs.
	assert_eq!(router.history().len(), len_before);
	assert_eq!(router.current_location().path(), "/login");

	// The guarded location is not a back-navigable loop target.
	assert!(router.back());
	assert_eq!(router.current_location().path(), "/");
	assert_eq!(router.render_current().render_to_string(), "Home");
	assert!(router.forward());
	assert_eq!(router.current_location().path(), "/login");
}

#[test]
fn predicate_true_renders_the_guarded_subtree() {
	let auth = AuthState::new(true);
	let router = guarded_router(&auth);

	router.push("/dashboard");
	let html = router.render_current().render_to_string();
	assert!(html.contains("Dashboard"));
	assert!(html.contains("Overview"));
}

#[test]
fn guard_covers_descendant_locations() {
	let auth = AuthState::new(false);
	let router = guarded_router(&auth);

	router.push("/dashboard/settings");
	assert_eq!(router.render_current().render_to_string(), "Login");
	assert_eq!(router.current_location().path(), "/login");
}

#[test]
fn login_then_retry_succeeds() {
	let auth = AuthState::new(false);
	let router = guarded_router(&auth);

	router.push("/dashboard");
	assert_eq!(router.render_current().render_to_string(), "Login");

	auth.login();
	router.push("/dashboard");
	assert!(
		router
			.render_current()
			.render_to_string()
			.contains("Dashboard")
	);

	auth.logout();
	router.push("/dashboard/settings");
	assert_eq!(router.render_current().render_to_string(), "Login");
}

#[test]
#[serial]
fn components_reach_the_installed_auth_state() {
	let auth = AuthState::provide(false);

	let router = Router::builder()
		.route(Route::new("profile", || {
			let logged_in = use_auth().map(|a| a.is_authenticated()).unwrap_or(false);
			View::text(if logged_in { "Welcome back" } else { "Guest" })
		}))
		.build()
		.expect("builds");

	router.push("/profile");
	assert_eq!(router.render_current().render_to_string(), "Guest");

	auth.login();
	// The cached level is keyed on route identity, params, and query, so
	// an in-place replace would reuse the "Guest" output. Leave and come
	// back to remount.
	router.push("/");
	router.render_current();
	router.push("/profile");
	assert_eq!(router.render_current().render_to_string(), "Welcome back");

	AuthState::reset();
}
