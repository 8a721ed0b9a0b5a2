//! Sea-ORM entities for the `products` and `warehouses` tables.
//!
//! Every scalar column is nullable. [`NullPolicy`] decides how domain values are
//! written; reads always decode NULL to the zero value of the field type.

pub mod product;
pub mod warehouse;

use serde::{Deserialize, Serialize};

/// How zero values are written to nullable columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullPolicy {
    /// Every value is stored as-is, so empty strings and zeros round-trip.
    #[default]
    Explicit,
    /// Empty strings and numeric zeros are stored as NULL.
    ZeroAsNull,
}

impl NullPolicy {
    pub fn encode<T>(self, value: T) -> Option<T>
    where
        T: Default + PartialEq,
    {
        match self {
            NullPolicy::Explicit => Some(value),
            NullPolicy::ZeroAsNull if value == T::default() => None,
            NullPolicy::ZeroAsNull => Some(value),
        }
    }
}

impl std::str::FromStr for NullPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "explicit" => Ok(NullPolicy::Explicit),
            "zero_as_null" => Ok(NullPolicy::ZeroAsNull),
            other => Err(format!(
                "unknown null policy '{other}', expected 'explicit' or 'zero_as_null'"
            )),
        }
    }
}
