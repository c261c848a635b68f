//! Station configuration as seen by the commands.

use std::path::Path;

use config_loader::ConfigLoader;
use contracts::StationBlueprint;
use tracing::info;

use crate::error::{CliError, Result};

/// Load the configuration file, or defaults when no file is given
pub fn load_blueprint(path: Option<&Path>) -> Result<StationBlueprint> {
    let Some(path) = path else {
        info!("No configuration file given, using defaults");
        return Ok(StationBlueprint::default());
    };

    if !path.exists() {
        return Err(CliError::config_not_found(path.display().to_string()));
    }

    let blueprint = ConfigLoader::load_from_path(path)?;
    info!(
        config = %path.display(),
        sensors = blueprint.sensors.len(),
        address = ?blueprint.channel.address,
        "Configuration loaded"
    );
    Ok(blueprint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_no_path_gives_defaults() {
        let bp = load_blueprint(None).unwrap();
        assert!(bp.sensors.is_empty());
        assert_eq!(bp.channel.baud_rate, 9600);
    }

    #[test]
    fn test_missing_file() {
        let err = load_blueprint(Some(Path::new("/nonexistent/station.toml"))).unwrap_err();
        assert!(matches!(err, CliError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_loads_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[[sensors]]\nid = \"TEMP-001\"\nkind = \"thermal\"").unwrap();

        let bp = load_blueprint(Some(file.path())).unwrap();
        assert_eq!(bp.sensors.len(), 1);
    }
}
