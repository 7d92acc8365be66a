//! Error types for route registration, navigation, and parameter
//! extraction.

use thiserror::Error;

/// Errors from parsing or reversing a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
	/// Pattern string exceeds the length budget.
	#[error("pattern length {len} exceeds maximum of {max} bytes")]
	TooLong {
		/// Offending length in bytes.
		len: usize,
		/// Maximum allowed length.
		max: usize,
	},
	/// Pattern has more segments than allowed.
	#[error("pattern has {count} segments, exceeding maximum of {max}")]
	TooManySegments {
		/// Offending segment count.
		count: usize,
		/// Maximum allowed segment count.
		max: usize,
	},
	/// A `:name` segment with an invalid parameter name.
	#[error("invalid parameter name '{0}'")]
	InvalidParamName(String),
	/// The same parameter name appears twice in one pattern.
	#[error("parameter '{0}' declared more than once")]
	RepeatedParam(String),
	/// A `*` segment that is not the last segment.
	#[error("wildcard segment must be terminal")]
	WildcardNotTerminal,
	/// A literal segment containing a reserved marker character.
	#[error("invalid literal segment '{0}'")]
	InvalidLiteral(String),
	/// Reverse URL generation was missing a parameter value.
	#[error("missing value for parameter '{0}'")]
	MissingParam(String),
}

/// Errors from typed parameter extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
	/// A captured value failed to parse as the requested type.
	#[error("failed to parse parameter '{name}' value '{raw}' as {ty}: {message}")]
	Parse {
		/// Parameter name, or the positional index rendered as a name.
		name: String,
		/// Target type name.
		ty: &'static str,
		/// The raw captured string.
		raw: String,
		/// Parser error message.
		message: String,
	},
	/// The number of captured values does not match the extractor.
	#[error("parameter count mismatch: expected {expected}, got {actual}")]
	CountMismatch {
		/// Values the extractor needs.
		expected: usize,
		/// Values the match produced.
		actual: usize,
	},
	/// A named parameter the extractor needs was not captured.
	#[error("missing parameter '{0}'")]
	Missing(String),
}

/// Errors from router construction and navigation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
	/// A route pattern failed to parse.
	#[error("invalid route pattern '{pattern}': {source}")]
	InvalidPattern {
		/// The offending pattern string.
		pattern: String,
		/// The underlying pattern error.
		source: PatternError,
	},
	/// A parameter name is captured by both an entry and one of its
	/// ancestors.
	#[error("duplicate parameter name '{name}' across nested routes (at '{pattern}')")]
	DuplicateParam {
		/// The colliding parameter name.
		name: String,
		/// Pattern of the descendant entry that re-declares it.
		pattern: String,
	},
	/// Two routes registered under the same name.
	#[error("duplicate route name '{0}'")]
	DuplicateRouteName(String),
	/// A wildcard entry was given children.
	#[error("wildcard route '{0}' cannot have children")]
	WildcardWithChildren(String),
	/// Reverse lookup for a name that was never registered.
	#[error("unknown route name: {0}")]
	UnknownRouteName(String),
	/// Reverse URL generation failed.
	#[error("cannot build URL for '{name}': {source}")]
	Reverse {
		/// The route name being reversed.
		name: String,
		/// The underlying pattern error.
		source: PatternError,
	},
	/// Guard redirects cycled without settling on a renderable location.
	#[error("redirect limit exceeded while resolving '{0}'")]
	RedirectLoop(String),
	/// Typed parameter extraction failed while rendering.
	#[error("parameter extraction failed: {0}")]
	Params(#[from] ParamsError),
}
