//! `Location`: an immutable snapshot of path and query.

use serde::{Deserialize, Serialize};

use crate::query::Query;

/// A navigation target or the currently active position.
///
/// Locations are immutable snapshots: navigation produces a new `Location`,
/// it never mutates the previous one. The path is normalized on
/// construction (leading slash, collapsed separators); whether the input
/// carried a trailing slash is remembered so strict routers can
/// distinguish `/users` from `/users/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
	/// Normalized path, always starting with `/`, never ending with one
	/// except for the root itself.
	path: String,
	/// Whether the original input ended with `/` (root excluded).
	trailing_slash: bool,
	/// The query mapping.
	query: Query,
}

impl Location {
	/// Parses a location from a `path?query` string.
	///
	/// Parsing never fails: a broken query is treated as empty, and the
	/// path is normalized rather than rejected.
	pub fn parse(input: &str) -> Self {
		let (raw_path, raw_query) = match input.split_once('?') {
			Some((p, q)) => (p, q),
			None => (input, ""),
		};

		let trailing_slash = raw_path.len() > 1 && raw_path.ends_with('/');
		let mut path = String::from("/");
		for segment in raw_path.split('/').filter(|s| !s.is_empty()) {
			if path.len() > 1 {
				path.push('/');
			}
			path.push_str(segment);
		}

		Self {
			path,
			trailing_slash,
			query: Query::parse(raw_query),
		}
	}

	/// Builds a location from a path and an explicit query.
	pub fn with_query(path: &str, query: Query) -> Self {
		let mut location = Self::parse(path);
		location.query = query;
		location
	}

	/// The normalized path.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// The path split into its non-empty segments.
	pub fn segments(&self) -> Vec<String> {
		self.path
			.split('/')
			.filter(|s| !s.is_empty())
			.map(str::to_string)
			.collect()
	}

	/// The query mapping.
	pub fn query(&self) -> &Query {
		&self.query
	}

	/// Whether this is the root path.
	pub fn is_root(&self) -> bool {
		self.path == "/"
	}

	/// Whether the original input had a trailing slash.
	pub fn has_trailing_slash(&self) -> bool {
		self.trailing_slash
	}

	/// Returns a copy pointing at the same path with a different query.
	pub fn replacing_query(&self, query: Query) -> Self {
		Self {
			path: self.path.clone(),
			trailing_slash: self.trailing_slash,
			query,
		}
	}
}

impl std::fmt::Display for Location {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.path)?;
		if self.trailing_slash && !self.is_root() {
			f.write_str("/")?;
		}
		if !self.query.is_empty() {
			write!(f, "?{}", self.query)?;
		}
		Ok(())
	}
}

impl From<&str> for Location {
	fn from(input: &str) -> Self {
		Self::parse(input)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("", "/")]
	#[case("/", "/")]
	#[case("products", "/products")]
	#[case("/products", "/products")]
	#[case("//products///1", "/products/1")]
	fn test_path_normalization(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(Location::parse(input).path(), expected);
	}

	#[test]
	fn test_segments() {
		let location = Location::parse("/products/1");
		assert_eq!(location.segments(), vec!["products", "1"]);
		assert!(Location::parse("/").segments().is_empty());
	}

	#[test]
	fn test_query_is_split_off() {
		let location = Location::parse("/products?sort=asc");
		assert_eq!(location.path(), "/products");
		assert_eq!(location.query().get("sort"), Some("asc"));
	}

	#[test]
	fn test_trailing_slash_is_remembered() {
		assert!(Location::parse("/products/").has_trailing_slash());
		assert!(!Location::parse("/products").has_trailing_slash());
		assert!(!Location::parse("/").has_trailing_slash());
	}

	#[test]
	fn test_display_round_trip() {
		for input in ["/", "/products", "/products/", "/products?sort=asc"] {
			let location = Location::parse(input);
			assert_eq!(Location::parse(&location.to_string()), location);
		}
	}

	#[test]
	fn test_replacing_query() {
		let location = Location::parse("/products?sort=asc");
		let replaced = location.replacing_query(Query::from_pairs([("sort", "desc")]));
		assert_eq!(replaced.path(), "/products");
		assert_eq!(replaced.query().get("sort"), Some("desc"));
		// The original snapshot is untouched.
		assert_eq!(location.query().get("sort"), Some("asc"));
	}

	#[test]
	fn test_serde_snapshot_round_trip() {
		let location = Location::parse("/products/1?sort=asc");
		let json = serde_json::to_string(&location).expect("serialize");
		let back: Location = serde_json::from_str(&json).expect("deserialize");
		assert_eq!(back, location);
	}
}
