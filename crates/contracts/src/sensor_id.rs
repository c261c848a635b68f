//! SensorId - Bounded, cheap-to-clone sensor identifier
//!
//! Uses Arc<str> internally for O(1) clone operations.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;

use crate::ContractError;

/// Maximum identifier length, in characters.
pub const MAX_SENSOR_ID_LEN: usize = 49;

/// Sensor identifier with cheap cloning.
///
/// An identifier is 1 to [`MAX_SENSOR_ID_LEN`] characters long and contains no
/// whitespace, so it always fits in a single protocol token. Longer input is
/// rejected, never truncated.
///
/// Comparison is exact and case-sensitive.
///
/// # Examples
/// ```
/// use contracts::SensorId;
///
/// let id = SensorId::new("TEMP-1").unwrap();
/// let id2 = id.clone();  // O(1) - just increments ref count
/// assert_eq!(id, id2);
/// assert_eq!(id.as_str(), "TEMP-1");
/// assert!(SensorId::new("temp 1").is_err());
/// ```
#[derive(Clone)]
pub struct SensorId(Arc<str>);

impl SensorId {
    /// Validate and create a new SensorId.
    pub fn new(s: &str) -> Result<Self, ContractError> {
        Self::validate(s)?;
        Ok(Self(Arc::from(s)))
    }

    /// Get the underlying string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(s: &str) -> Result<(), ContractError> {
        let invalid = |message: String| ContractError::InvalidIdentifier {
            id: s.to_string(),
            message,
        };

        if s.is_empty() {
            return Err(invalid("identifier cannot be empty".to_string()));
        }

        let len = s.chars().count();
        if len > MAX_SENSOR_ID_LEN {
            return Err(invalid(format!(
                "identifier is {len} characters, maximum is {MAX_SENSOR_ID_LEN}"
            )));
        }

        if s.chars().any(char::is_whitespace) {
            return Err(invalid("identifier cannot contain whitespace".to_string()));
        }

        Ok(())
    }
}

// Deref to &str for easy string operations
impl Deref for SensorId {
    type Target = str;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for SensorId {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SensorId {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Conversions
impl FromStr for SensorId {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for SensorId {
    type Error = ContractError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<String> for SensorId {
    type Error = ContractError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::validate(&s)?;
        Ok(Self(Arc::from(s)))
    }
}

// Display and Debug
impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SensorId({:?})", self.0)
    }
}

// Equality - can compare with &str, String, etc.
impl PartialEq for SensorId {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        // Fast path: same Arc pointer
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Eq for SensorId {}

impl PartialEq<str> for SensorId {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for SensorId {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl PartialEq<String> for SensorId {
    #[inline]
    fn eq(&self, other: &String) -> bool {
        self.0.as_ref() == other
    }
}

// Hash - same as str hash for HashMap compatibility
impl Hash for SensorId {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

// Serde support
impl Serialize for SensorId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SensorId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::try_from(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_clone_is_cheap() {
        let id1 = SensorId::new("test_sensor").unwrap();
        let id2 = id1.clone();

        // Both should point to same underlying data (Arc clone is O(1))
        assert_eq!(id1.as_str().as_ptr(), id2.as_str().as_ptr());
    }

    #[test]
    fn test_equality_is_case_sensitive() {
        let id = SensorId::new("TEMP-1").unwrap();
        assert_eq!(id, "TEMP-1");
        assert_eq!(id, String::from("TEMP-1"));
        assert_ne!(id, "temp-1");
    }

    #[test]
    fn test_length_bound() {
        let max = "A".repeat(MAX_SENSOR_ID_LEN);
        assert!(SensorId::new(&max).is_ok());

        let too_long = "A".repeat(MAX_SENSOR_ID_LEN + 1);
        let err = SensorId::new(&too_long).unwrap_err();
        assert!(matches!(err, ContractError::InvalidIdentifier { .. }));
        assert!(err.to_string().contains("maximum is 49"), "got: {err}");
    }

    #[test]
    fn test_length_counts_characters() {
        // 49 two-byte characters are still 49 characters
        let id = "é".repeat(MAX_SENSOR_ID_LEN);
        assert!(SensorId::new(&id).is_ok());
    }

    #[test]
    fn test_rejects_empty_and_whitespace() {
        assert!(SensorId::new("").is_err());
        assert!(SensorId::new("TEMP 1").is_err());
        assert!(SensorId::new("TEMP\t1").is_err());
    }

    #[test]
    fn test_hashmap_key() {
        let mut map: HashMap<SensorId, i32> = HashMap::new();
        map.insert(SensorId::new("sensor1").unwrap(), 1);
        map.insert(SensorId::new("sensor2").unwrap(), 2);

        // Can lookup with &str
        assert_eq!(map.get("sensor1"), Some(&1));
        assert_eq!(map.get("sensor2"), Some(&2));
    }

    #[test]
    fn test_serde() {
        let id = SensorId::new("PRES-105").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"PRES-105\"");

        let parsed: SensorId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);

        let rejected: Result<SensorId, _> = serde_json::from_str("\"two words\"");
        assert!(rejected.is_err());
    }
}
