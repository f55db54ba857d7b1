use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the lint output shown in the results pane
pub const DEFAULT_LINT_RESULTS_PATH: &str = "/tmp/shellcheck_results.txt";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// Colors used for syntax highlighting
    #[serde(default)]
    pub theme: ThemeConfig,

    /// External tools and lab directory layout
    #[serde(default)]
    pub lab: LabConfig,

    /// Custom keybindings (overrides for the default bindings)
    #[serde(default)]
    pub keybindings: Vec<Keybinding>,
}

/// Color names per token kind. Accepts ratatui color names ("green",
/// "lightblue", "reset") and hex values ("#ff8800").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ThemeConfig {
    #[serde(default = "default_plain_color")]
    pub plain: String,
    #[serde(default = "default_keyword_color")]
    pub keyword: String,
    #[serde(default = "default_string_color")]
    pub string: String,
    #[serde(default = "default_comment_color")]
    pub comment: String,
    #[serde(default = "default_number_color")]
    pub number: String,
    #[serde(default = "default_variable_color")]
    pub variable: String,
    #[serde(default = "default_symbol_color")]
    pub symbol: String,
}

fn default_plain_color() -> String {
    "reset".to_string()
}

fn default_keyword_color() -> String {
    "green".to_string()
}

fn default_string_color() -> String {
    "white".to_string()
}

fn default_comment_color() -> String {
    "cyan".to_string()
}

fn default_number_color() -> String {
    "magenta".to_string()
}

fn default_variable_color() -> String {
    "blue".to_string()
}

fn default_symbol_color() -> String {
    "yellow".to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            plain: default_plain_color(),
            keyword: default_keyword_color(),
            string: default_string_color(),
            comment: default_comment_color(),
            number: default_number_color(),
            variable: default_variable_color(),
            symbol: default_symbol_color(),
        }
    }
}

/// External tools and lab directory layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LabConfig {
    /// Lint command run against the student's script
    #[serde(default = "default_lint_command")]
    pub lint_command: String,

    /// File the lint output is written to before it is shown
    #[serde(default = "default_lint_results_path")]
    pub lint_results_path: PathBuf,

    /// Terminal recorder command wrapped around the editing session
    #[serde(default = "default_recorder_command")]
    pub recorder_command: String,

    /// Directory (inside the work directory) holding the requirement texts
    #[serde(default = "default_requirement_dir")]
    pub requirement_dir: String,

    /// Student metadata file (inside the work directory)
    #[serde(default = "default_student_file")]
    pub student_file: String,
}

fn default_lint_command() -> String {
    "shellcheck".to_string()
}

fn default_lint_results_path() -> PathBuf {
    PathBuf::from(DEFAULT_LINT_RESULTS_PATH)
}

fn default_recorder_command() -> String {
    "asciinema".to_string()
}

fn default_requirement_dir() -> String {
    "Require".to_string()
}

fn default_student_file() -> String {
    "student.json".to_string()
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            lint_command: default_lint_command(),
            lint_results_path: default_lint_results_path(),
            recorder_command: default_recorder_command(),
            requirement_dir: default_requirement_dir(),
            student_file: default_student_file(),
        }
    }
}

/// A user keybinding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Keybinding {
    /// Key name (e.g., "a", "Enter", "PageDown", "F5")
    pub key: String,

    /// Modifiers (e.g., ["ctrl"], ["ctrl", "shift"])
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<String>,

    /// Action to perform (e.g., "run_lint", "scroll_down")
    pub action: String,

    /// Optional context ("panes", "lint_results", "commit_input", "commit_button").
    /// Defaults to "panes".
    #[serde(default)]
    pub when: Option<String>,
}

impl Config {
    /// Get the default config file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("labterm").join("config.json"))
    }

    /// Load configuration from the default location, falling back to defaults if not found
    pub fn load_or_default() -> Self {
        if let Some(config_path) = Self::default_config_path() {
            if config_path.exists() {
                match Self::load_from_file(&config_path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!(
                            "Failed to load config from {}: {}, using defaults",
                            config_path.display(),
                            e
                        );
                    }
                }
            }
        }
        Self::default()
    }

    /// Load configuration from a JSON file. Missing fields take their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: Config =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lab.lint_command.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "lab.lint_command cannot be empty".to_string(),
            ));
        }
        if self.lab.recorder_command.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "lab.recorder_command cannot be empty".to_string(),
            ));
        }

        for binding in &self.keybindings {
            if binding.key.is_empty() {
                return Err(ConfigError::ValidationError(
                    "keybinding key cannot be empty".to_string(),
                ));
            }
            if binding.action.is_empty() {
                return Err(ConfigError::ValidationError(
                    "keybinding action cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme.keyword, "green");
        assert_eq!(config.lab.lint_command, "shellcheck");
        assert_eq!(
            config.lab.lint_results_path,
            PathBuf::from("/tmp/shellcheck_results.txt")
        );
        assert!(config.keybindings.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.lab.lint_command = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.theme.comment = "darkgray".to_string();
        std::fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        std::fs::write(&config_path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = Config::load_from_file(&config_path).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("config.json");
        std::fs::write(
            &config_path,
            r#"{ "theme": { "keyword": "red" }, "keybindings": [{ "key": "F5", "action": "run_lint" }] }"#,
        )
        .unwrap();

        let config = Config::load_from_file(&config_path).unwrap();
        assert_eq!(config.theme.keyword, "red");
        assert_eq!(config.theme.comment, "cyan");
        assert_eq!(config.lab, LabConfig::default());
        assert_eq!(config.keybindings[0].when, None);
    }

    #[test]
    fn test_invalid_json_is_a_parse_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("config.json");
        std::fs::write(&config_path, "{ not json").unwrap();

        let err = Config::load_from_file(&config_path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
