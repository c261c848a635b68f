//! Sensor kinds, readings and parsed protocol records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ContractError, SensorId};

/// Sensor variant
///
/// The set is closed: every protocol tag maps to exactly one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    /// Floating-point Celsius measurements, aggregated as a minimum
    Thermal,
    /// Integer Pascal measurements, aggregated as a mean
    Barometric,
}

impl SensorKind {
    /// Map a protocol type tag (`T`/`t`, `P`/`p`) to a kind
    pub fn from_tag(tag: char) -> Option<Self> {
        match tag.to_ascii_uppercase() {
            'T' => Some(Self::Thermal),
            'P' => Some(Self::Barometric),
            _ => None,
        }
    }

    /// Canonical (upper-case) protocol tag
    pub fn tag(&self) -> char {
        match self {
            Self::Thermal => 'T',
            Self::Barometric => 'P',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thermal => "thermal",
            Self::Barometric => "barometric",
        }
    }

    /// Measurement unit symbol
    pub fn unit(&self) -> &'static str {
        match self {
            Self::Thermal => "°C",
            Self::Barometric => "Pa",
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorKind {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "thermal" | "t" => Ok(Self::Thermal),
            "barometric" | "p" => Ok(Self::Barometric),
            _ => Err(ContractError::UnknownKind { tag: s.to_string() }),
        }
    }
}

/// One measurement value, typed by the sensor variant that accepts it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reading {
    /// Temperature in degrees Celsius
    Celsius(f32),
    /// Pressure in Pascal
    Pascal(i32),
}

impl Reading {
    /// Parse a value token for the given sensor kind
    ///
    /// Thermal values must be finite floats; barometric values must be integers.
    pub fn parse(kind: SensorKind, text: &str) -> Result<Self, ContractError> {
        match kind {
            SensorKind::Thermal => {
                let value: f32 = text.parse().map_err(|e| {
                    ContractError::format(text, format!("invalid temperature value: {e}"))
                })?;
                if !value.is_finite() {
                    return Err(ContractError::format(
                        text,
                        "temperature value must be finite",
                    ));
                }
                Ok(Self::Celsius(value))
            }
            SensorKind::Barometric => text
                .parse()
                .map(Self::Pascal)
                .map_err(|e| ContractError::format(text, format!("invalid pressure value: {e}"))),
        }
    }

    pub fn kind(&self) -> SensorKind {
        match self {
            Self::Celsius(_) => SensorKind::Thermal,
            Self::Pascal(_) => SensorKind::Barometric,
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Celsius(v) => write!(f, "{v:.1} °C"),
            Self::Pascal(v) => write!(f, "{v} Pa"),
        }
    }
}

/// One parsed line of the ingestion protocol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Variant selected by the type tag
    pub kind: SensorKind,

    /// Addressed sensor
    pub sensor_id: SensorId,

    /// Measurement value, already typed for `kind`
    pub reading: Reading,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_is_case_insensitive() {
        assert_eq!(SensorKind::from_tag('T'), Some(SensorKind::Thermal));
        assert_eq!(SensorKind::from_tag('t'), Some(SensorKind::Thermal));
        assert_eq!(SensorKind::from_tag('P'), Some(SensorKind::Barometric));
        assert_eq!(SensorKind::from_tag('p'), Some(SensorKind::Barometric));
        assert_eq!(SensorKind::from_tag('H'), None);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("thermal".parse::<SensorKind>().unwrap(), SensorKind::Thermal);
        assert_eq!(
            "Barometric".parse::<SensorKind>().unwrap(),
            SensorKind::Barometric
        );
        assert!("humidity".parse::<SensorKind>().is_err());
    }

    #[test]
    fn test_parse_thermal() {
        assert_eq!(
            Reading::parse(SensorKind::Thermal, "23.5").unwrap(),
            Reading::Celsius(23.5)
        );
        assert_eq!(
            Reading::parse(SensorKind::Thermal, "-4").unwrap(),
            Reading::Celsius(-4.0)
        );
        assert!(Reading::parse(SensorKind::Thermal, "warm").is_err());
        assert!(Reading::parse(SensorKind::Thermal, "NaN").is_err());
        assert!(Reading::parse(SensorKind::Thermal, "inf").is_err());
    }

    #[test]
    fn test_parse_barometric_is_strict() {
        assert_eq!(
            Reading::parse(SensorKind::Barometric, "101325").unwrap(),
            Reading::Pascal(101325)
        );
        let err = Reading::parse(SensorKind::Barometric, "10.5").unwrap_err();
        assert!(matches!(err, ContractError::Format { .. }));
    }

    #[test]
    fn test_reading_display() {
        assert_eq!(Reading::Celsius(2.0).to_string(), "2.0 °C");
        assert_eq!(Reading::Pascal(200).to_string(), "200 Pa");
    }

    #[test]
    fn test_reading_serde() {
        let json = serde_json::to_string(&Reading::Pascal(42)).unwrap();
        assert_eq!(json, r#"{"pascal":42}"#);
    }
}
