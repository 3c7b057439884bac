//! Expiry dates and the never-expires sentinel.

use chrono::NaiveDate;

/// Calendar format used on the wire.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Sentinel string for items that never expire.
pub const UNBOUNDED_SENTINEL: &str = "N/A";

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Expiry date of an item.
///
/// A date that fails to parse is kept verbatim as [`ExpiryDate::Malformed`] so that
/// classifiers can report it for that one item and carry on with the rest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ExpiryDate {
    /// The item never expires (`"N/A"`).
    #[default]
    Unbounded,
    /// The item expires on this date.
    On(NaiveDate),
    /// The raw value could not be parsed.
    Malformed(String),
}

impl ExpiryDate {
    /// Parses a wire value, mapping the sentinel to [`ExpiryDate::Unbounded`].
    pub fn parse(value: &str) -> Self {
        if value.trim() == UNBOUNDED_SENTINEL {
            return Self::Unbounded;
        }
        match parse_date(value) {
            Some(date) => Self::On(date),
            None => Self::Malformed(value.to_string()),
        }
    }

    /// Returns the bounded date, if any.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::On(date) => Some(*date),
            _ => None,
        }
    }

    /// Returns true if this is the never-expires sentinel.
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Self::Unbounded)
    }

    /// Returns true if the raw value could not be parsed.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }

    /// Returns `Some(true)` if the date is strictly before `cutoff`, `Some(false)` if it is
    /// not or the item never expires, and `None` for a malformed date.
    pub fn is_before(&self, cutoff: NaiveDate) -> Option<bool> {
        match self {
            Self::Unbounded => Some(false),
            Self::On(date) => Some(*date < cutoff),
            Self::Malformed(_) => None,
        }
    }
}

impl std::fmt::Display for ExpiryDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unbounded => f.write_str(UNBOUNDED_SENTINEL),
            Self::On(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            Self::Malformed(raw) => f.write_str(raw),
        }
    }
}

impl From<NaiveDate> for ExpiryDate {
    fn from(date: NaiveDate) -> Self {
        Self::On(date)
    }
}

impl From<&str> for ExpiryDate {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ExpiryDate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ExpiryDate {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}
