//! Nested resolution: matching a location against the route tree.

use std::rc::Rc;

use tracing::debug;

use crate::route::RouteNode;

/// One entry of a resolved chain, with the captures its own pattern
/// produced.
pub(crate) struct MatchedEntry {
	pub(crate) node: Rc<RouteNode>,
	pub(crate) captures: Vec<(String, String)>,
}

/// Resolves `segments` against a forest of entries.
///
/// Returns the matched chain root → leaf, or `None` when nothing matched.
/// Sibling policy per level:
///
/// 1. index entries (childless, zero segments) when the residual is empty,
///    in declaration order;
/// 2. every other entry in declaration order — an entry only matches if
///    the whole residual is consumed by it and its subtree, so a failed
///    subtree backtracks to the next sibling;
/// 3. wildcard entries last.
pub(crate) fn resolve(
	routes: &[Rc<RouteNode>],
	segments: &[String],
) -> Option<Vec<MatchedEntry>> {
	let chain = resolve_level(routes, segments);
	match &chain {
		Some(entries) => debug!(depth = entries.len(), "location resolved"),
		None => debug!("no route matched"),
	}
	chain
}

fn resolve_level(routes: &[Rc<RouteNode>], segments: &[String]) -> Option<Vec<MatchedEntry>> {
	// Index entries first, but only against an empty residual.
	if segments.is_empty() {
		for node in routes {
			if node.pattern.is_index() && node.children.is_empty() {
				return Some(vec![MatchedEntry {
					node: Rc::clone(node),
					captures: Vec::new(),
				}]);
			}
		}
	}

	// Declaration order for everything that is neither an index leaf nor
	// a wildcard. Zero-segment entries with children act as layouts: they
	// consume nothing and delegate the full residual to their children.
	for node in routes {
		if node.pattern.has_wildcard() || (node.pattern.is_index() && node.children.is_empty()) {
			continue;
		}
		let Some((captures, consumed)) = node.pattern.match_prefix(segments) else {
			continue;
		};
		let residual = &segments[consumed..];
		let entry = MatchedEntry {
			node: Rc::clone(node),
			captures,
		};

		if node.children.is_empty() {
			if residual.is_empty() {
				return Some(vec![entry]);
			}
			// Unconsumed residual and nowhere to send it; try the next
			// sibling.
			continue;
		}

		if let Some(mut chain) = resolve_level(&node.children, residual) {
			chain.insert(0, entry);
			return Some(chain);
		}
	}

	// Wildcards only after every other sibling failed.
	for node in routes {
		if !node.pattern.has_wildcard() {
			continue;
		}
		if let Some((captures, _)) = node.pattern.match_prefix(segments) {
			return Some(vec![MatchedEntry {
				node: Rc::clone(node),
				captures,
			}]);
		}
	}

	None
}
