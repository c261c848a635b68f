//! Text record grammar: `<T|P|t|p> <identifier> <value> [ignored...]`.

use contracts::{ContractError, Reading, Record, SensorId, SensorKind};

/// Substrings of the transmitter's banner and usage hint
pub const NOISE_MARKERS: [&str; 3] = ["===", "Arduino", "Formato"];

/// Whether a line carries no record and should be skipped silently
pub fn is_noise(line: &str) -> bool {
    line.trim().is_empty() || NOISE_MARKERS.iter().any(|m| line.contains(m))
}

/// Parse a single non-noise line into a typed record
///
/// The tag is checked before the value, so `X ID abc` reports `UnknownKind`.
pub fn parse_record(line: &str) -> Result<Record, ContractError> {
    let mut tokens = line.split_whitespace();

    let (Some(tag), Some(id)) = (tokens.next(), tokens.next()) else {
        return Err(ContractError::format(
            line,
            "expected '<T|P> <identifier> <value>'",
        ));
    };

    let kind = parse_tag(tag)?;
    let sensor_id = SensorId::new(id)?;

    let value = tokens
        .next()
        .ok_or_else(|| ContractError::format(line, "missing value"))?;

    let reading = Reading::parse(kind, value).map_err(|e| match e {
        ContractError::Format { message, .. } => ContractError::format(line, message),
        other => other,
    })?;

    Ok(Record {
        kind,
        sensor_id,
        reading,
    })
}

fn parse_tag(tag: &str) -> Result<SensorKind, ContractError> {
    let mut chars = tag.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => SensorKind::from_tag(c),
        _ => None,
    }
    .ok_or_else(|| ContractError::UnknownKind {
        tag: tag.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_lines() {
        assert!(is_noise(""));
        assert!(is_noise("   "));
        assert!(is_noise("=== Arduino sensor node ==="));
        assert!(is_noise("Formato: <T|P> <id> <valor>"));
        assert!(is_noise("Arduino ready"));
        assert!(!is_noise("T TEMP-001 23.5"));
    }

    #[test]
    fn test_parse_thermal() {
        let record = parse_record("T TEMP-001 23.5").unwrap();
        assert_eq!(record.kind, SensorKind::Thermal);
        assert_eq!(record.sensor_id, "TEMP-001");
        assert_eq!(record.reading, Reading::Celsius(23.5));
    }

    #[test]
    fn test_parse_lowercase_barometric() {
        let record = parse_record("p PRES-105 101325").unwrap();
        assert_eq!(record.kind, SensorKind::Barometric);
        assert_eq!(record.reading, Reading::Pascal(101325));
    }

    #[test]
    fn test_extra_whitespace_and_trailing_tokens() {
        let record = parse_record("  T\tTEMP-1   20.0  extra tokens ").unwrap();
        assert_eq!(record.sensor_id, "TEMP-1");
        assert_eq!(record.reading, Reading::Celsius(20.0));
    }

    #[test]
    fn test_too_few_tokens() {
        assert!(matches!(
            parse_record("T"),
            Err(ContractError::Format { .. })
        ));
    }

    #[test]
    fn test_missing_value() {
        let err = parse_record("T TEMP-1").unwrap_err();
        assert!(matches!(err, ContractError::Format { ref line, .. } if line == "T TEMP-1"));
    }

    #[test]
    fn test_unknown_tag_checked_before_value() {
        let err = parse_record("X ID abc").unwrap_err();
        assert!(matches!(err, ContractError::UnknownKind { ref tag } if tag == "X"));

        let err = parse_record("TP ID 1").unwrap_err();
        assert!(matches!(err, ContractError::UnknownKind { .. }));
    }

    #[test]
    fn test_unparseable_values() {
        for line in ["T A abc", "P A 10.5", "P A 99999999999", "T A NaN", "T A inf"] {
            let err = parse_record(line).unwrap_err();
            assert!(
                matches!(err, ContractError::Format { line: ref l, .. } if l == line),
                "line {line:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_over_long_identifier() {
        let line = format!("T {} 1.0", "A".repeat(50));
        assert!(matches!(
            parse_record(&line),
            Err(ContractError::InvalidIdentifier { .. })
        ));

        let line = format!("T {} 1.0", "A".repeat(49));
        assert!(parse_record(&line).is_ok());
    }
}
