use crate::utils::error::{EtlError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

/// Configuration file. Every value is optional so that command line flags can
/// supply whatever the file leaves out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub menu: MenuConfig,
    pub load: LoadConfig,
    pub names: NamesConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub sequential: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub city: Option<String>,
    pub week: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    pub output_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NamesConfig {
    pub file: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are
    /// left untouched.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[source]
base_url = "http://service.dt.se/lunch/lunch.asp?ort=Falun&vecka={week}"
timeout_seconds = 10
sequential = true

[menu]
city = "Falun"
week = 32

[load]
output_path = "menus/falun.json"

[names]
file = "extra-names.toml"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(
            config.source.base_url.as_deref(),
            Some("http://service.dt.se/lunch/lunch.asp?ort=Falun&vecka={week}")
        );
        assert_eq!(config.source.timeout_seconds, Some(10));
        assert_eq!(config.source.sequential, Some(true));
        assert_eq!(config.menu.city.as_deref(), Some("Falun"));
        assert_eq!(config.menu.week, Some(32));
        assert_eq!(config.load.output_path.as_deref(), Some("menus/falun.json"));
        assert_eq!(config.names.file.as_deref(), Some("extra-names.toml"));
    }

    #[test]
    fn test_sections_are_optional() {
        let config = TomlConfig::from_toml_str("[menu]\ncity = \"Mora\"\n").unwrap();
        assert_eq!(config.menu.city.as_deref(), Some("Mora"));
        assert!(config.source.base_url.is_none());
        assert!(config.load.output_path.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("LUNCHGUIDEN_TEST_CITY", "Ludvika");

        let config = TomlConfig::from_toml_str("[menu]\ncity = \"${LUNCHGUIDEN_TEST_CITY}\"\n").unwrap();
        assert_eq!(config.menu.city.as_deref(), Some("Ludvika"));

        std::env::remove_var("LUNCHGUIDEN_TEST_CITY");
    }

    #[test]
    fn test_unknown_env_var_is_kept() {
        let config =
            TomlConfig::from_toml_str("[menu]\ncity = \"${LUNCHGUIDEN_UNSET_VARIABLE}\"\n").unwrap();
        assert_eq!(config.menu.city.as_deref(), Some("${LUNCHGUIDEN_UNSET_VARIABLE}"));
    }

    #[test]
    fn test_invalid_toml() {
        let result = TomlConfig::from_toml_str("[menu\ncity = 1");
        assert!(matches!(result, Err(EtlError::ConfigValidationError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[load]\noutput_path = \"out/borlange.json\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.load.output_path.as_deref(), Some("out/borlange.json"));
    }
}
