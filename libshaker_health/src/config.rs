use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::constants::{
    DEFAULT_EXPECTED_SCREEN_LIFE_HOURS, DEFAULT_UTILIZATION_THRESHOLD_PERCENT,
    MAX_UTILIZATION_THRESHOLD_PERCENT, MIN_UTILIZATION_THRESHOLD_PERCENT,
};
use super::error::ConfigError;
use super::mesh::MeshType;

/// Structure representing the application configuration. Contains the input/output pathing and
/// the operator selections (mesh type, alert threshold, screen life baseline).
/// Configs are seralizable and deserializable to YAML using serde and serde_yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub input_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub mesh_type: MeshType,
    pub expected_screen_life_hours: f64,
    pub utilization_alert_threshold_percent: f64,
}

impl Default for Config {
    /// Generate a new Config object. Paths will be empty/invalid, metric settings take their defaults
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("None"),
            output_path: None,
            mesh_type: MeshType::default(),
            expected_screen_life_hours: DEFAULT_EXPECTED_SCREEN_LIFE_HOURS,
            utilization_alert_threshold_percent: DEFAULT_UTILIZATION_THRESHOLD_PERCENT,
        }
    }
}

impl Config {
    /// Read the configuration in a YAML file
    /// Returns a Config if successful
    pub fn read_config_file(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            return Err(ConfigError::BadFilePath(config_path.to_path_buf()));
        }

        let yaml_str = std::fs::read_to_string(config_path)?;

        Ok(serde_yaml::from_str::<Self>(&yaml_str)?)
    }

    /// Capacity of the selected screen mesh
    pub fn mesh_capacity(&self) -> f64 {
        self.mesh_type.capacity()
    }

    pub fn is_threshold_valid(&self) -> bool {
        (MIN_UTILIZATION_THRESHOLD_PERCENT..=MAX_UTILIZATION_THRESHOLD_PERCENT)
            .contains(&self.utilization_alert_threshold_percent)
    }

    /// Select the mesh by name ("API 140", "140", ...)
    pub fn set_mesh_type(&mut self, name: &str) -> Result<(), ConfigError> {
        self.mesh_type = MeshType::from_str(name)?;
        Ok(())
    }

    /// Get the path to the output directory, if one is configured
    pub fn get_output_directory(&self) -> Result<Option<PathBuf>, ConfigError> {
        match &self.output_path {
            None => Ok(None),
            Some(dir) if dir.is_dir() => Ok(Some(dir.clone())),
            Some(dir) => Err(ConfigError::BadOutputPath(dir.clone())),
        }
    }

    /// Name shared by every report file, taken from the input file stem
    pub fn get_report_stem(&self) -> String {
        match self.input_path.file_stem() {
            Some(stem) => stem.to_string_lossy().to_string(),
            None => String::from("shaker_log"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.mesh_type, MeshType::Api100);
        assert_eq!(config.mesh_capacity(), 250.0);
        assert_eq!(config.expected_screen_life_hours, 120.0);
        assert_eq!(config.utilization_alert_threshold_percent, 80.0);
        assert!(config.is_threshold_valid());
        assert!(matches!(config.get_output_directory(), Ok(None)));
    }

    #[test]
    fn test_yaml_config() {
        let yaml = "input_path: logs/well_7.csv\n\
                    output_path: null\n\
                    mesh_type: API 170\n\
                    expected_screen_life_hours: 96.0\n\
                    utilization_alert_threshold_percent: 50.0\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.mesh_capacity(), 160.0);
        assert_eq!(config.get_report_stem(), "well_7");
        assert!(config.is_threshold_valid());
        assert!(matches!(config.get_output_directory(), Ok(None)));
    }

    #[test]
    fn test_threshold_range() {
        let mut config = Config::default();
        config.utilization_alert_threshold_percent = 100.0;
        assert!(config.is_threshold_valid());
        config.utilization_alert_threshold_percent = 49.9;
        assert!(!config.is_threshold_valid());
        config.utilization_alert_threshold_percent = 100.5;
        assert!(!config.is_threshold_valid());
    }

    #[test]
    fn test_missing_output_directory() {
        let mut config = Config::default();
        let dir = PathBuf::from("./no/such/output/dir");
        config.output_path = Some(dir.clone());
        match config.get_output_directory() {
            Err(ConfigError::BadOutputPath(p)) => assert_eq!(p, dir),
            _ => panic!(),
        }
    }

    #[test]
    fn test_set_mesh_type() {
        let mut config = Config::default();
        config.set_mesh_type("API 200").unwrap();
        assert_eq!(config.mesh_capacity(), 120.0);
        assert!(matches!(
            config.set_mesh_type("API 120"),
            Err(ConfigError::BadMesh(_))
        ));
        assert_eq!(config.mesh_type, MeshType::Api200);
    }

    #[test]
    fn test_missing_config_file() {
        let path = PathBuf::from("./definitely/not/a/config.yml");
        match Config::read_config_file(&path) {
            Err(ConfigError::BadFilePath(p)) => assert_eq!(p, path),
            _ => panic!(),
        }
    }
}
