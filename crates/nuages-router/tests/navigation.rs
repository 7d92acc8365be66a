//! Navigation triggers: imperative calls, link activation, and history
//! pops.

use std::cell::RefCell;
use std::rc::Rc;

use nuages_core::View;
use nuages_router::{Link, NavigationType, Route, Router};

fn text(s: &'static str) -> impl Fn() -> View {
	move || View::text(s)
}

fn sample_router() -> Router {
	Router::builder()
		.route(Route::new("/", text("Home")))
		.route(Route::new("about", text("About")))
		.route(Route::new("products", text("Products")))
		.build()
		.expect("builds")
}

#[test]
fn imperative_push_re_resolves() {
	let router = sample_router();
	assert_eq!(router.render_current().render_to_string(), "Home");

	router.push("/about");
	assert_eq!(router.render_current().render_to_string(), "About");
	assert_eq!(router.history().len(), 2);
}

#[test]
fn imperative_replace_overwrites_top_entry() {
	let router = sample_router();
	router.push("/about");
	router.replace("/products");

	assert_eq!(router.render_current().render_to_string(), "Products");
	assert_eq!(router.history().len(), 2);

	// Back skips the replaced entry entirely.
	assert!(router.back());
	assert_eq!(router.render_current().render_to_string(), "Home");
}

#[test]
fn link_activation_pushes() {
	let router = sample_router();
	let link = Link::new("/about", "About");

	link.activate(&router);

	assert_eq!(router.current_location().path(), "/about");
	assert_eq!(router.history().len(), 2);
	assert_eq!(router.render_current().render_to_string(), "About");
}

#[test]
fn link_with_replace_flag_replaces() {
	let router = sample_router();
	router.push("/about");

	Link::new("/products", "Products")
		.replace(true)
		.activate(&router);

	assert_eq!(router.history().len(), 2);
	assert_eq!(router.current_location().path(), "/products");
}

#[test]
fn external_link_activation_is_ignored() {
	let router = sample_router();
	Link::new("https://example.com", "Example")
		.external(true)
		.activate(&router);

	assert_eq!(router.current_location().path(), "/");
	assert_eq!(router.history().len(), 1);
}

#[test]
fn back_and_forward_re_resolve_as_pops() {
	let router = sample_router();
	router.push("/about");
	router.push("/products");

	let events = Rc::new(RefCell::new(Vec::new()));
	router.history().listen({
		let events = Rc::clone(&events);
		move |location, nav_type| {
			events
				.borrow_mut()
				.push((location.path().to_string(), nav_type));
		}
	});

	assert!(router.back());
	assert_eq!(router.render_current().render_to_string(), "About");
	assert!(router.forward());
	assert_eq!(router.render_current().render_to_string(), "Products");
	assert!(!router.forward());

	assert_eq!(
		*events.borrow(),
		vec![
			("/about".to_string(), NavigationType::Pop),
			("/products".to_string(), NavigationType::Pop),
		]
	);
}

#[test]
fn a_later_navigation_supersedes_an_earlier_one() {
	let router = sample_router();
	router.push("/about");
	router.push("/products");

	// Only the latest location is observable; there is no intermediate
	// state to cancel.
	assert_eq!(router.current_location().path(), "/products");
	assert_eq!(router.render_current().render_to_string(), "Products");
}

#[test]
fn render_loop_driven_by_navigation_effect() {
	let router = sample_router();
	let frames = Rc::new(RefCell::new(Vec::new()));

	let _effect = {
		let router = router.clone();
		let frames = Rc::clone(&frames);
		router.clone().on_navigate(move |_| {
			frames
				.borrow_mut()
				.push(router.render_current().render_to_string());
		})
	};

	router.push("/about");
	router.push("/products");
	router.back();

	assert_eq!(
		*frames.borrow(),
		vec!["Home", "About", "Products", "About"]
	);
}
