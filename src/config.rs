use crate::error::{Result, SheetSplitError};
use crate::selector::PatternSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub discovery: DiscoveryConfig,
    pub selection: SelectionConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub input_directory: PathBuf,
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            input_directory: PathBuf::from("."),
            extensions: vec!["xls".to_string(), "xlsx".to_string()],
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            patterns: vec![PatternSet::MATCH_ALL.to_string()],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SheetSplitError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| SheetSplitError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| SheetSplitError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["sheetsplit.toml", ".sheetsplit.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref input_dir) = cli_args.input_dir {
            self.discovery.input_directory = input_dir.clone();
        }

        if let Some(ref output_dir) = cli_args.output_dir {
            self.output.directory = output_dir.clone();
        }

        if let Some(ref patterns) = cli_args.patterns {
            self.selection.patterns = patterns.clone();
        }

        // `--sheets` with no values behaves like the default
        if self.selection.patterns.is_empty() {
            self.selection.patterns = SelectionConfig::default().patterns;
        }

        self.discovery.extensions = self
            .discovery
            .extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| SheetSplitError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| SheetSplitError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.discovery.extensions.is_empty() {
            return Err(SheetSplitError::Config {
                message: "At least one workbook extension must be specified".to_string(),
            });
        }

        if self.selection.patterns.is_empty() {
            return Err(SheetSplitError::Config {
                message: "At least one sheet pattern must be specified".to_string(),
            });
        }

        // Surface bad patterns before any workbook is touched
        self.pattern_set()?;

        Ok(())
    }

    pub fn pattern_set(&self) -> Result<PatternSet> {
        PatternSet::parse(&self.selection.patterns)
    }

}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub patterns: Option<Vec<String>>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input_dir(mut self, input_dir: Option<PathBuf>) -> Self {
        self.input_dir = input_dir;
        self
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn with_patterns(mut self, patterns: Option<Vec<String>>) -> Self {
        self.patterns = patterns;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.discovery.extensions, vec!["xls", "xlsx"]);
        assert_eq!(config.selection.patterns, vec!["*"]);
        assert_eq!(config.output.directory, PathBuf::from("."));
        assert_eq!(config.discovery.input_directory, PathBuf::from("."));
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.discovery.extensions.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_patterns() {
        let mut config = Config::default();
        config.selection.patterns.clear();
        assert!(matches!(
            config.validate(),
            Err(SheetSplitError::Config { .. })
        ));
    }

    #[test]
    fn test_config_file_operations() {
        let mut config = Config::default();
        config.selection.patterns = vec!["Q?".to_string(), "Summary*".to_string()];
        let temp_file = NamedTempFile::new().unwrap();

        config.save_to_file(temp_file.path()).unwrap();

        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded_config.selection.patterns, config.selection.patterns);
        assert_eq!(loaded_config.discovery.extensions, config.discovery.extensions);
    }

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[selection]\npatterns = [\"Jan\", \"Feb\"]").unwrap();

        let config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.selection.patterns, vec!["Jan", "Feb"]);
        assert_eq!(config.discovery.extensions, vec!["xls", "xlsx"]);
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::load_from_file("/definitely/not/here/sheetsplit.toml");
        assert!(matches!(result, Err(SheetSplitError::Config { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();

        let overrides = CliOverrides::new()
            .with_input_dir(Some(PathBuf::from("books")))
            .with_output_dir(Some(PathBuf::from("out/csv")))
            .with_patterns(Some(vec!["J*".to_string()]));

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.discovery.input_directory, PathBuf::from("books"));
        assert_eq!(config.output.directory, PathBuf::from("out/csv"));
        assert_eq!(config.selection.patterns, vec!["J*"]);
    }

    #[test]
    fn test_empty_sheet_override_falls_back_to_match_all() {
        let mut config = Config::default();
        let overrides = CliOverrides::new().with_patterns(Some(Vec::new()));

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.selection.patterns, vec!["*"]);
    }

    #[test]
    fn test_extensions_are_normalized() {
        let mut config = Config::default();
        config.discovery.extensions = vec![".XLSX".to_string(), " xlsm ".to_string(), "".to_string()];

        config.merge_with_cli_args(&CliOverrides::new());

        assert_eq!(config.discovery.extensions, vec!["xlsx", "xlsm"]);
    }

    #[test]
    fn test_default_config_file_lists_every_table() {
        let temp_file = NamedTempFile::new().unwrap();
        Config::default().save_to_file(temp_file.path()).unwrap();

        let sample = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(sample.contains("input_directory"));
        assert!(sample.contains("[discovery]"));
        assert!(sample.contains("[selection]"));
        assert!(sample.contains("[output]"));
    }
}
