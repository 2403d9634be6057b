//! Setting values and conversions.

use serde::{Deserialize, Serialize};

use crate::ValueError;

/// The value of a single setting.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
	/// No value.
	#[default]
	Null,
	/// Boolean value.
	Bool(bool),
	/// Integer value.
	Int(i64),
	/// Unsigned integer above `i64::MAX`.
	///
	/// Smaller unsigned values are stored as [`SettingValue::Int`].
	UInt(u64),
	/// Floating point value.
	Float(f64),
	/// String value.
	String(String),
	/// Ordered list of values.
	List(Vec<SettingValue>),
}

impl SettingValue {
	/// Returns the boolean value if this is a `Bool` variant.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			SettingValue::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the integer value if it fits an `i64`.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			SettingValue::Int(v) => Some(*v),
			SettingValue::UInt(v) => i64::try_from(*v).ok(),
			_ => None,
		}
	}

	/// Returns the integer value if it is non-negative.
	pub fn as_uint(&self) -> Option<u64> {
		match self {
			SettingValue::Int(v) => u64::try_from(*v).ok(),
			SettingValue::UInt(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the string value if this is a `String` variant.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			SettingValue::String(v) => Some(v),
			_ => None,
		}
	}

	/// Returns true for [`SettingValue::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, SettingValue::Null)
	}

	/// Returns the type name of this value.
	pub fn type_name(&self) -> &'static str {
		match self {
			SettingValue::Null => "null",
			SettingValue::Bool(_) => "bool",
			SettingValue::Int(_) | SettingValue::UInt(_) => "int",
			SettingValue::Float(_) => "float",
			SettingValue::String(_) => "string",
			SettingValue::List(_) => "list",
		}
	}

	fn mismatch(&self, expected: &'static str) -> ValueError {
		ValueError::TypeMismatch {
			expected,
			got: self.type_name(),
		}
	}
}

impl From<bool> for SettingValue {
	fn from(v: bool) -> Self {
		SettingValue::Bool(v)
	}
}

impl From<f64> for SettingValue {
	fn from(v: f64) -> Self {
		SettingValue::Float(v)
	}
}

impl From<f32> for SettingValue {
	fn from(v: f32) -> Self {
		SettingValue::Float(f64::from(v))
	}
}

impl From<String> for SettingValue {
	fn from(v: String) -> Self {
		SettingValue::String(v)
	}
}

impl From<&str> for SettingValue {
	fn from(v: &str) -> Self {
		SettingValue::String(v.to_string())
	}
}

impl<T: Into<SettingValue>> From<Option<T>> for SettingValue {
	fn from(v: Option<T>) -> Self {
		v.map_or(SettingValue::Null, Into::into)
	}
}

impl<T: Into<SettingValue>> From<Vec<T>> for SettingValue {
	fn from(v: Vec<T>) -> Self {
		SettingValue::List(v.into_iter().map(Into::into).collect())
	}
}

/// Types that can be read back out of a [`SettingValue`].
///
/// `#[derive(Settings)]` uses this to write persisted values onto fields.
pub trait FromSettingValue: Sized {
	/// Converts the value, failing on a type mismatch.
	fn from_setting(value: SettingValue) -> Result<Self, ValueError>;
}

impl FromSettingValue for SettingValue {
	fn from_setting(value: SettingValue) -> Result<Self, ValueError> {
		Ok(value)
	}
}

impl FromSettingValue for bool {
	fn from_setting(value: SettingValue) -> Result<Self, ValueError> {
		value.as_bool().ok_or_else(|| value.mismatch("bool"))
	}
}

impl FromSettingValue for String {
	fn from_setting(value: SettingValue) -> Result<Self, ValueError> {
		match value {
			SettingValue::String(s) => Ok(s),
			other => Err(other.mismatch("string")),
		}
	}
}

impl FromSettingValue for f64 {
	fn from_setting(value: SettingValue) -> Result<Self, ValueError> {
		match value {
			SettingValue::Float(v) => Ok(v),
			SettingValue::Int(v) => Ok(v as f64),
			SettingValue::UInt(v) => Ok(v as f64),
			other => Err(other.mismatch("float")),
		}
	}
}

impl FromSettingValue for f32 {
	fn from_setting(value: SettingValue) -> Result<Self, ValueError> {
		let wide = f64::from_setting(value)?;
		let narrow = wide as f32;
		if wide.is_finite() && narrow.is_infinite() {
			return Err(ValueError::OutOfRange {
				value: wide.to_string(),
				target: "f32",
			});
		}
		Ok(narrow)
	}
}

impl<T: FromSettingValue> FromSettingValue for Option<T> {
	fn from_setting(value: SettingValue) -> Result<Self, ValueError> {
		match value {
			SettingValue::Null => Ok(None),
			other => T::from_setting(other).map(Some),
		}
	}
}

impl<T: FromSettingValue> FromSettingValue for Vec<T> {
	fn from_setting(value: SettingValue) -> Result<Self, ValueError> {
		match value {
			SettingValue::List(items) => items.into_iter().map(T::from_setting).collect(),
			other => Err(other.mismatch("list")),
		}
	}
}

impl From<u64> for SettingValue {
	fn from(v: u64) -> Self {
		match i64::try_from(v) {
			Ok(v) => SettingValue::Int(v),
			Err(_) => SettingValue::UInt(v),
		}
	}
}

impl From<usize> for SettingValue {
	fn from(v: usize) -> Self {
		SettingValue::from(v as u64)
	}
}

/// Integer widths that always fit in an `i64`.
macro_rules! lossless_int {
	($($ty:ty),* $(,)?) => {
		$(
			impl From<$ty> for SettingValue {
				fn from(v: $ty) -> Self {
					SettingValue::Int(i64::from(v))
				}
			}
		)*
	};
}

lossless_int!(i8, i16, i32, i64, u8, u16, u32);

/// Reads either integer variant into `T`, rejecting values `T` cannot hold.
fn integer<T>(value: SettingValue, target: &'static str) -> Result<T, ValueError>
where
	T: TryFrom<i64> + TryFrom<u64>,
{
	let out_of_range = |shown: String| ValueError::OutOfRange {
		value: shown,
		target,
	};
	match value {
		SettingValue::Int(v) => {
			<T as TryFrom<i64>>::try_from(v).map_err(|_| out_of_range(v.to_string()))
		}
		SettingValue::UInt(v) => {
			<T as TryFrom<u64>>::try_from(v).map_err(|_| out_of_range(v.to_string()))
		}
		other => Err(other.mismatch("int")),
	}
}

macro_rules! int_setting {
	($($ty:ty),* $(,)?) => {
		$(
			impl FromSettingValue for $ty {
				fn from_setting(value: SettingValue) -> Result<Self, ValueError> {
					integer(value, stringify!($ty))
				}
			}
		)*
	};
}

int_setting!(i8, i16, i32, i64, u8, u16, u32, u64, usize);
