//! Matched parameters and typed extraction.
//!
//! A match produces string captures only; nothing is coerced implicitly.
//! Typed access is opt-in, either by name ([`ParamMap::parse`]) or
//! positionally through the [`Params`] extractor and the [`FromParams`]
//! trait.

use std::ops::Deref;
use std::str::FromStr;

use crate::error::ParamsError;

/// The flat parameter mapping of a resolved route chain.
///
/// Captures appear in pattern declaration order, root to leaf. Names are
/// unique — registration rejects trees where a child re-declares an
/// ancestor's parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamMap {
	pairs: Vec<(String, String)>,
}

impl ParamMap {
	/// Creates an empty map.
	pub fn new() -> Self {
		Self::default()
	}

	pub(crate) fn from_pairs(pairs: Vec<(String, String)>) -> Self {
		Self { pairs }
	}

	pub(crate) fn extend(&mut self, pairs: &[(String, String)]) {
		self.pairs.extend_from_slice(pairs);
	}

	/// Looks up a captured value by name.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.pairs
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, v)| v.as_str())
	}

	/// Whether a parameter was captured.
	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	/// Captured values in declaration order.
	pub fn values(&self) -> Vec<&str> {
		self.pairs.iter().map(|(_, v)| v.as_str()).collect()
	}

	/// Iterates name/value pairs in declaration order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
	}

	/// Number of captured parameters.
	pub fn len(&self) -> usize {
		self.pairs.len()
	}

	/// Whether nothing was captured.
	pub fn is_empty(&self) -> bool {
		self.pairs.is_empty()
	}

	/// Parses the named capture as `T`.
	///
	/// # Errors
	///
	/// [`ParamsError::Missing`] if the name was not captured,
	/// [`ParamsError::Parse`] if the captured string does not parse.
	pub fn parse<T>(&self, name: &str) -> Result<T, ParamsError>
	where
		T: FromStr,
		T::Err: std::fmt::Display,
	{
		let raw = self
			.get(name)
			.ok_or_else(|| ParamsError::Missing(name.to_string()))?;
		raw.parse::<T>().map_err(|e| ParamsError::Parse {
			name: name.to_string(),
			ty: std::any::type_name::<T>(),
			raw: raw.to_string(),
			message: e.to_string(),
		})
	}
}

/// Positional, typed extraction from a [`ParamMap`].
///
/// Implementations exist for the common primitives, `String`, and tuples
/// of 2 to 4 parseable types. Extraction is strict about arity: a
/// one-value extractor against a two-capture match is a
/// [`ParamsError::CountMismatch`], not a silent truncation.
pub trait FromParams: Sized {
	/// Extracts `Self` from the captured parameters.
	///
	/// # Errors
	///
	/// Returns [`ParamsError`] on arity mismatch or parse failure.
	fn from_params(params: &ParamMap) -> Result<Self, ParamsError>;
}

/// Extractor wrapper for typed route handlers.
///
/// # Example
///
/// ```ignore
/// Route::typed("products/:productId", |Params(id): Params<i64>| {
/// 	product_detail(id)
/// })
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Params<T>(pub T);

impl<T> Params<T> {
	/// Unwraps the inner value.
	pub fn into_inner(self) -> T {
		self.0
	}
}

impl<T> Deref for Params<T> {
	type Target = T;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl<T> AsRef<T> for Params<T> {
	fn as_ref(&self) -> &T {
		&self.0
	}
}

impl<T: FromParams> FromParams for Params<T> {
	fn from_params(params: &ParamMap) -> Result<Self, ParamsError> {
		T::from_params(params).map(Params)
	}
}

fn expect_len(params: &ParamMap, expected: usize) -> Result<(), ParamsError> {
	if params.len() != expected {
		return Err(ParamsError::CountMismatch {
			expected,
			actual: params.len(),
		});
	}
	Ok(())
}

fn parse_at<T>(params: &ParamMap, index: usize) -> Result<T, ParamsError>
where
	T: FromStr,
	T::Err: std::fmt::Display,
{
	let (name, raw) = params
		.iter()
		.nth(index)
		.ok_or(ParamsError::CountMismatch {
			expected: index + 1,
			actual: params.len(),
		})?;
	raw.parse::<T>().map_err(|e| ParamsError::Parse {
		name: name.to_string(),
		ty: std::any::type_name::<T>(),
		raw: raw.to_string(),
		message: e.to_string(),
	})
}

macro_rules! impl_from_params_single {
	($($ty:ty),* $(,)?) => {
		$(
			impl FromParams for $ty {
				fn from_params(params: &ParamMap) -> Result<Self, ParamsError> {
					expect_len(params, 1)?;
					parse_at(params, 0)
				}
			}
		)*
	};
}

impl_from_params_single!(i32, i64, u32, u64, bool);

impl FromParams for String {
	fn from_params(params: &ParamMap) -> Result<Self, ParamsError> {
		expect_len(params, 1)?;
		params
			.values()
			.first()
			.map(|v| (*v).to_string())
			.ok_or(ParamsError::CountMismatch {
				expected: 1,
				actual: 0,
			})
	}
}

macro_rules! impl_from_params_tuple {
	($($idx:tt => $ty:ident),+ $(,)?) => {
		impl<$($ty),+> FromParams for ($($ty,)+)
		where
			$($ty: FromStr,)+
			$(<$ty as FromStr>::Err: std::fmt::Display,)+
		{
			fn from_params(params: &ParamMap) -> Result<Self, ParamsError> {
				expect_len(params, [$($idx),+].len())?;
				Ok(($(parse_at::<$ty>(params, $idx)?,)+))
			}
		}
	};
}

impl_from_params_tuple!(0 => A, 1 => B);
impl_from_params_tuple!(0 => A, 1 => B, 2 => C);
impl_from_params_tuple!(0 => A, 1 => B, 2 => C, 3 => D);
