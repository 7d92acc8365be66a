//! Query mappings: ordered, unique keys, string values.

use serde::{Deserialize, Serialize};

/// The query half of a location.
///
/// Keys are unique; writing an existing key replaces its value in place
/// (last write wins) without changing its position. Values are plain
/// strings — the router never coerces them.
///
/// # Example
///
/// ```ignore
/// let mut query = Query::new();
/// query.insert("sort", "asc");
/// assert_eq!(query.get("sort"), Some("asc"));
/// assert_eq!(query.to_query_string(), "sort=asc");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query {
	pairs: Vec<(String, String)>,
}

impl Query {
	/// Creates an empty query.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a query from key/value pairs, last write winning on
	/// duplicate keys.
	pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<String>,
		V: Into<String>,
	{
		let mut query = Self::new();
		for (k, v) in pairs {
			query.insert(k, v);
		}
		query
	}

	/// Parses a query string (without the leading `?`).
	///
	/// Unparseable input yields an empty query; a location's query is
	/// never a hard failure.
	pub fn parse(input: &str) -> Self {
		if input.is_empty() {
			return Self::new();
		}
		match serde_urlencoded::from_str::<Vec<(String, String)>>(input) {
			Ok(pairs) => Self::from_pairs(pairs),
			Err(_) => Self::new(),
		}
	}

	/// Inserts a key/value pair; an existing key keeps its position and
	/// takes the new value.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
		let key = key.into();
		let value = value.into();
		match self.pairs.iter_mut().find(|(k, _)| *k == key) {
			Some(pair) => pair.1 = value,
			None => self.pairs.push((key, value)),
		}
	}

	/// Looks up a value by key.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.pairs
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}

	/// Removes a key, returning its value if present.
	pub fn remove(&mut self, key: &str) -> Option<String> {
		let index = self.pairs.iter().position(|(k, _)| k == key)?;
		Some(self.pairs.remove(index).1)
	}

	/// Number of keys.
	pub fn len(&self) -> usize {
		self.pairs.len()
	}

	/// Whether the query is empty.
	pub fn is_empty(&self) -> bool {
		self.pairs.is_empty()
	}

	/// Iterates keys and values in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Serializes to a query string (without the leading `?`).
	pub fn to_query_string(&self) -> String {
		serde_urlencoded::to_string(&self.pairs).unwrap_or_default()
	}
}

impl std::fmt::Display for Query {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.to_query_string())
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Query {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self::from_pairs(iter)
	}
}

// Used by reverse-URL generation; lives here so pattern.rs stays free of
// encoding concerns.
pub(crate) fn encode_segment(value: &str) -> String {
	urlencoding::encode(value).into_owned()
}
