//! 配置校验模块
//!
//! 校验规则：
//! - 传感器 id 合法 (1..=49 个字符，不含空白)
//! - 传感器 id 唯一
//! - poll_interval_ms > 0
//! - address 若给出则非空
//!
//! 不支持的波特率不算错误，由 [`warnings`] 报告。

use std::collections::HashSet;

use contracts::{BaudRate, ContractError, SensorId, StationBlueprint};

/// 校验 StationBlueprint 配置
///
/// 返回第一个遇到的错误，或 Ok(())。
pub fn validate(blueprint: &StationBlueprint) -> Result<(), ContractError> {
    validate_sensor_ids(blueprint)?;
    validate_unique_ids(blueprint)?;
    validate_channel(blueprint)?;
    Ok(())
}

/// 校验传感器 id 格式
fn validate_sensor_ids(blueprint: &StationBlueprint) -> Result<(), ContractError> {
    for (index, sensor) in blueprint.sensors.iter().enumerate() {
        if let Err(e) = SensorId::new(&sensor.id) {
            return Err(ContractError::config_validation(
                format!("sensors[{index}].id"),
                e.to_string(),
            ));
        }
    }
    Ok(())
}

/// 校验传感器 id 唯一性
fn validate_unique_ids(blueprint: &StationBlueprint) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    for sensor in &blueprint.sensors {
        if !seen.insert(sensor.id.as_str()) {
            return Err(ContractError::config_validation(
                format!("sensors[id={}]", sensor.id),
                "duplicate sensor id",
            ));
        }
    }
    Ok(())
}

/// 校验通道配置
fn validate_channel(blueprint: &StationBlueprint) -> Result<(), ContractError> {
    let channel = &blueprint.channel;

    if channel.poll_interval_ms == 0 {
        return Err(ContractError::config_validation(
            "channel.poll_interval_ms",
            "poll_interval_ms must be > 0",
        ));
    }

    if let Some(address) = &channel.address {
        if address.trim().is_empty() {
            return Err(ContractError::config_validation(
                "channel.address",
                "address must not be blank",
            ));
        }
    }

    Ok(())
}

/// 收集非致命问题
///
/// 不修改配置：不支持的波特率仍按 9600 打开。
pub fn warnings(blueprint: &StationBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();
    let channel = &blueprint.channel;

    if !channel.baud_rate_supported() {
        warnings.push(format!(
            "channel.baud_rate {} is not supported - falling back to {}",
            channel.baud_rate,
            BaudRate::default()
        ));
    }

    if channel.address.is_none() {
        warnings.push("channel.address is not set - `ingest` needs --port".to_string());
    }

    if channel.settle_delay_ms == 0 {
        warnings.push(
            "channel.settle_delay_ms is 0 - the first lines after a device reset may be lost"
                .to_string(),
        );
    }

    if blueprint.sensors.is_empty() {
        warnings.push(
            "No sensors configured - sensors are registered on first reading".to_string(),
        );
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{ChannelConfig, SensorConfig, SensorKind};

    fn minimal_blueprint() -> StationBlueprint {
        StationBlueprint {
            channel: ChannelConfig {
                address: Some("/dev/ttyACM0".to_string()),
                ..Default::default()
            },
            sensors: vec![
                SensorConfig {
                    id: "TEMP-001".to_string(),
                    kind: SensorKind::Thermal,
                },
                SensorConfig {
                    id: "PRES-105".to_string(),
                    kind: SensorKind::Barometric,
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_config() {
        let bp = minimal_blueprint();
        assert!(validate(&bp).is_ok());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&StationBlueprint::default()).is_ok());
    }

    #[test]
    fn test_duplicate_sensor_id() {
        let mut bp = minimal_blueprint();
        bp.sensors[1].id = "TEMP-001".to_string();
        let result = validate(&bp);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("duplicate"));
    }

    #[test]
    fn test_invalid_sensor_id() {
        let mut bp = minimal_blueprint();
        bp.sensors[0].id = "has space".to_string();
        let err = validate(&bp).unwrap_err();
        assert!(matches!(
            err,
            ContractError::ConfigValidation { ref field, .. } if field == "sensors[0].id"
        ));

        bp.sensors[0].id = "X".repeat(50);
        assert!(validate(&bp).is_err());
    }

    #[test]
    fn test_zero_poll_interval() {
        let mut bp = minimal_blueprint();
        bp.channel.poll_interval_ms = 0;
        assert!(validate(&bp).is_err());
    }

    #[test]
    fn test_blank_address() {
        let mut bp = minimal_blueprint();
        bp.channel.address = Some("  ".to_string());
        assert!(validate(&bp).is_err());
    }

    #[test]
    fn test_unsupported_baud_rate_is_not_an_error() {
        let mut bp = minimal_blueprint();
        bp.channel.baud_rate = 250_000;
        assert!(validate(&bp).is_ok());

        let warnings = warnings(&bp);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("250000"), "got: {warnings:?}");
        assert!(warnings[0].contains("9600 baud"), "got: {warnings:?}");
    }

    #[test]
    fn test_minimal_blueprint_has_no_warnings() {
        assert!(warnings(&minimal_blueprint()).is_empty());
    }

    #[test]
    fn test_defaults_warn_about_address_and_sensors() {
        let warnings = warnings(&StationBlueprint::default());
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("channel.address"));
        assert!(warnings[1].contains("No sensors configured"));
    }

    #[test]
    fn test_zero_settle_delay_warns() {
        let mut bp = minimal_blueprint();
        bp.channel.settle_delay_ms = 0;
        assert_eq!(warnings(&bp).len(), 1);
    }
}
