//! Path patterns: literals, `:param` segments, and the terminal `*`
//! wildcard.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::PatternError;
use crate::query::encode_segment;

/// Maximum allowed length for a pattern string in bytes.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed number of segments in a pattern.
const MAX_PATTERN_SEGMENTS: usize = 32;

/// Parameter name the wildcard's capture is stored under.
pub const SPLAT: &str = "*";

static PARAM_NAME: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static pattern"));

/// One segment of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
	/// Matches exactly this text, case-sensitively.
	Literal(String),
	/// Matches any single non-empty segment, binding it by name.
	Param(String),
	/// Matches everything remaining. Always terminal.
	Wildcard,
}

/// A compiled path pattern.
///
/// # Syntax
///
/// - `users` — literal segment, matched exactly and case-sensitively
/// - `:id` — parameter segment, captures one non-empty path segment as a
///   string
/// - `*` — wildcard, captures all remaining segments (joined with `/`)
///   under the [`SPLAT`] name; must be the last segment
///
/// A pattern with no segments (`""` or `"/"`) matches only an empty
/// residual path — this is how index entries are expressed.
///
/// # Example
///
/// ```ignore
/// let pattern = RoutePattern::parse("products/:productId")?;
/// assert_eq!(pattern.param_names(), vec!["productId"]);
/// ```
#[derive(Debug, Clone)]
pub struct RoutePattern {
	/// The pattern as written, for display and error messages.
	raw: String,
	segments: Vec<Segment>,
}

impl RoutePattern {
	/// Compiles a pattern string.
	///
	/// # Errors
	///
	/// Returns a [`PatternError`] if the pattern exceeds the length or
	/// segment budget, names a parameter illegally or twice, places a
	/// wildcard anywhere but last, or embeds marker characters in a
	/// literal segment.
	pub fn parse(raw: &str) -> Result<Self, PatternError> {
		if raw.len() > MAX_PATTERN_LENGTH {
			return Err(PatternError::TooLong {
				len: raw.len(),
				max: MAX_PATTERN_LENGTH,
			});
		}

		let parts: Vec<&str> = raw.split('/').filter(|s| !s.is_empty()).collect();
		if parts.len() > MAX_PATTERN_SEGMENTS {
			return Err(PatternError::TooManySegments {
				count: parts.len(),
				max: MAX_PATTERN_SEGMENTS,
			});
		}

		let mut segments = Vec::with_capacity(parts.len());
		let mut seen_params: Vec<&str> = Vec::new();
		for (index, part) in parts.iter().enumerate() {
			if *part == "*" {
				if index + 1 != parts.len() {
					return Err(PatternError::WildcardNotTerminal);
				}
				segments.push(Segment::Wildcard);
			} else if let Some(name) = part.strip_prefix(':') {
				if !PARAM_NAME.is_match(name) {
					return Err(PatternError::InvalidParamName(name.to_string()));
				}
				if seen_params.contains(&name) {
					return Err(PatternError::RepeatedParam(name.to_string()));
				}
				seen_params.push(name);
				segments.push(Segment::Param(name.to_string()));
			} else if part.contains(':') || part.contains('*') {
				return Err(PatternError::InvalidLiteral((*part).to_string()));
			} else {
				segments.push(Segment::Literal((*part).to_string()));
			}
		}

		Ok(Self {
			raw: raw.to_string(),
			segments,
		})
	}

	/// The pattern as written.
	pub fn raw(&self) -> &str {
		&self.raw
	}

	/// Whether this pattern has no segments (an index entry).
	pub fn is_index(&self) -> bool {
		self.segments.is_empty()
	}

	/// Whether this pattern ends in a wildcard.
	pub fn has_wildcard(&self) -> bool {
		matches!(self.segments.last(), Some(Segment::Wildcard))
	}

	/// Parameter names in declaration order, wildcard capture excluded.
	pub fn param_names(&self) -> Vec<&str> {
		self.segments
			.iter()
			.filter_map(|s| match s {
				Segment::Param(name) => Some(name.as_str()),
				_ => None,
			})
			.collect()
	}

	/// Matches this pattern against the front of `segments`.
	///
	/// On success returns the captured parameters (in pattern order) and
	/// the number of path segments consumed; the caller slices off the
	/// residual for child matching. The wildcard consumes everything and
	/// binds the joined remainder under [`SPLAT`].
	pub(crate) fn match_prefix(
		&self,
		segments: &[String],
	) -> Option<(Vec<(String, String)>, usize)> {
		let mut captures = Vec::new();
		let mut consumed = 0;

		for segment in &self.segments {
			match segment {
				Segment::Literal(expected) => {
					if segments.get(consumed)? != expected {
						return None;
					}
					consumed += 1;
				}
				Segment::Param(name) => {
					let value = segments.get(consumed)?;
					if value.is_empty() {
						return None;
					}
					captures.push((name.clone(), value.clone()));
					consumed += 1;
				}
				Segment::Wildcard => {
					captures.push((SPLAT.to_string(), segments[consumed..].join("/")));
					consumed = segments.len();
				}
			}
		}

		Some((captures, consumed))
	}

	/// Generates a path from this pattern and parameter values.
	///
	/// Parameter values are percent-encoded; a wildcard takes the value
	/// under [`SPLAT`] verbatim (it may span several segments) and may be
	/// omitted.
	///
	/// # Errors
	///
	/// Returns [`PatternError::MissingParam`] if a `:name` segment has no
	/// value in `params`.
	pub fn reverse(&self, params: &HashMap<String, String>) -> Result<String, PatternError> {
		let mut path = String::new();
		for segment in &self.segments {
			let rendered = match segment {
				Segment::Literal(text) => text.clone(),
				Segment::Param(name) => {
					let value = params
						.get(name)
						.ok_or_else(|| PatternError::MissingParam(name.clone()))?;
					encode_segment(value)
				}
				Segment::Wildcard => match params.get(SPLAT) {
					Some(rest) if !rest.is_empty() => rest.clone(),
					_ => continue,
				},
			};
			path.push('/');
			path.push_str(&rendered);
		}
		if path.is_empty() {
			path.push('/');
		}
		Ok(path)
	}

	/// Joins two patterns into one, parent first.
	pub(crate) fn join(&self, child: &Self) -> Self {
		let mut segments = self.segments.clone();
		segments.extend(child.segments.iter().cloned());
		let raw = format!(
			"{}/{}",
			self.raw.trim_end_matches('/'),
			child.raw.trim_start_matches('/')
		);
		Self { raw, segments }
	}
}

impl PartialEq for RoutePattern {
	fn eq(&self, other: &Self) -> bool {
		self.segments == other.segments
	}
}

impl Eq for RoutePattern {}

impl std::fmt::Display for RoutePattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.raw)
	}
}
