use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::alignment::SuggestionMode;
use crate::error::{CmError, Result};

/// File name of the store inside the root directory when `store.db_path`
/// is unset.
pub const DEFAULT_DB_FILE: &str = "currmap.db";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub market: MarketConfig,
    #[serde(default)]
    pub robot: RobotConfig,
}

impl Config {
    /// Defaults, then either the explicit file (`--config` / `CURRMAP_CONFIG`)
    /// or the global and project files, then environment overrides.
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("CURRMAP_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            let patch = Self::load_patch(&path)?.ok_or_else(|| {
                CmError::MissingConfig(format!("config file not found: {}", path.display()))
            })?;
            config.merge_patch(patch);
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_project(root)? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Resolved store path: `store.db_path`, relative paths taken from `root`.
    pub fn db_path(&self, root: &Path) -> PathBuf {
        match &self.store.db_path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => root.join(path),
            None => root.join(DEFAULT_DB_FILE),
        }
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&dir.join("currmap/config.toml"))
    }

    fn load_project(root: &Path) -> Result<Option<ConfigPatch>> {
        Self::load_patch(&root.join("config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| CmError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| CmError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.store {
            self.store.merge(patch);
        }
        if let Some(patch) = patch.analysis {
            self.analysis.merge(patch);
        }
        if let Some(patch) = patch.market {
            self.market.merge(patch);
        }
        if let Some(patch) = patch.robot {
            self.robot.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let env = EnvSource { lookup };

        if let Some(value) = env.string("CURRMAP_DB_PATH") {
            self.store.db_path = Some(PathBuf::from(value));
        }
        if let Some(value) = env.bool("CURRMAP_STRICT_REFERENCES") {
            self.store.strict_references = value;
        }
        if let Some(value) = env.string("CURRMAP_SUGGESTION_MODE") {
            self.analysis.suggestion_mode = value.parse().map_err(CmError::Config)?;
        }
        if let Some(value) = env.usize("CURRMAP_TRENDS_TOP_N")? {
            self.market.trends_top_n = value;
        }
        if let Some(value) = env.string("CURRMAP_MARKET_CATALOG") {
            self.market.catalog_path = Some(PathBuf::from(value));
        }
        if env.bool("CURRMAP_ROBOT").unwrap_or(false) {
            self.robot.enabled = true;
        }
        if let Some(value) = env.string("CURRMAP_ROBOT_FORMAT") {
            self.robot.format = parse_robot_format(&value)?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store file; relative paths resolve against the root directory.
    #[serde(default)]
    pub db_path: Option<PathBuf>,
    /// Fail reads on skill ids missing from the vocabulary instead of
    /// dropping them.
    #[serde(default)]
    pub strict_references: bool,
}

impl StoreConfig {
    fn merge(&mut self, patch: StorePatch) {
        if let Some(value) = patch.db_path {
            self.db_path = Some(value);
        }
        if let Some(value) = patch.strict_references {
            self.strict_references = value;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub suggestion_mode: SuggestionMode,
}

impl AnalysisConfig {
    fn merge(&mut self, patch: AnalysisPatch) {
        if let Some(value) = patch.suggestion_mode {
            self.suggestion_mode = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// JSON or YAML posting catalog replacing the built-in one.
    pub catalog_path: Option<PathBuf>,
    pub trends_top_n: usize,
    pub default_keyword: String,
    pub default_location: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            trends_top_n: 10,
            default_keyword: "software developer".to_string(),
            default_location: "New York".to_string(),
        }
    }
}

impl MarketConfig {
    fn merge(&mut self, patch: MarketPatch) {
        if let Some(value) = patch.catalog_path {
            self.catalog_path = Some(value);
        }
        if let Some(value) = patch.trends_top_n {
            self.trends_top_n = value;
        }
        if let Some(value) = patch.default_keyword {
            self.default_keyword = value;
        }
        if let Some(value) = patch.default_location {
            self.default_location = value;
        }
    }
}

/// JSON layout used for robot output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RobotFormat {
    /// Pretty-printed.
    #[default]
    Json,
    /// Single line.
    Compact,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RobotConfig {
    /// Emit robot output even without `--robot`.
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub format: RobotFormat,
}

impl RobotConfig {
    fn merge(&mut self, patch: RobotPatch) {
        if let Some(value) = patch.enabled {
            self.enabled = value;
        }
        if let Some(value) = patch.format {
            self.format = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub store: Option<StorePatch>,
    pub analysis: Option<AnalysisPatch>,
    pub market: Option<MarketPatch>,
    pub robot: Option<RobotPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct StorePatch {
    pub db_path: Option<PathBuf>,
    pub strict_references: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct AnalysisPatch {
    pub suggestion_mode: Option<SuggestionMode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct MarketPatch {
    pub catalog_path: Option<PathBuf>,
    pub trends_top_n: Option<usize>,
    pub default_keyword: Option<String>,
    pub default_location: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RobotPatch {
    pub enabled: Option<bool>,
    pub format: Option<RobotFormat>,
}

fn parse_robot_format(value: &str) -> Result<RobotFormat> {
    match value.to_lowercase().as_str() {
        "json" | "pretty" => Ok(RobotFormat::Json),
        "compact" => Ok(RobotFormat::Compact),
        _ => Err(CmError::Config(format!(
            "invalid robot format {value} (expected json|compact)"
        ))),
    }
}

struct EnvSource<F> {
    lookup: F,
}

impl<F: Fn(&str) -> Option<String>> EnvSource<F> {
    fn string(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
    }

    fn bool(&self, key: &str) -> Option<bool> {
        (self.lookup)(key).map(|value| {
            matches!(
                value.to_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        })
    }

    fn usize(&self, key: &str) -> Result<Option<usize>> {
        match (self.lookup)(key) {
            Some(value) => value.parse::<usize>().map(Some).map_err(|err| {
                CmError::Config(format!("invalid {key} value {value}: {err}"))
            }),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use tempfile::TempDir;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert!(config.store.db_path.is_none());
        assert!(!config.store.strict_references);
        assert_eq!(config.analysis.suggestion_mode, SuggestionMode::Global);
        assert_eq!(config.market.trends_top_n, 10);
        assert_eq!(config.market.default_location, "New York");
        assert_eq!(config.robot.format, RobotFormat::Json);
        assert!(!config.robot.enabled);
    }

    #[test]
    fn db_path_resolution() {
        let root = Path::new("/data/currmap");
        let mut config = Config::default();
        assert_eq!(config.db_path(root), root.join(DEFAULT_DB_FILE));

        config.store.db_path = Some(PathBuf::from("alt.db"));
        assert_eq!(config.db_path(root), root.join("alt.db"));

        config.store.db_path = Some(PathBuf::from("/tmp/abs.db"));
        assert_eq!(config.db_path(root), PathBuf::from("/tmp/abs.db"));
    }

    #[test]
    fn explicit_file_is_merged_over_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            r#"
[store]
strict_references = true

[analysis]
suggestion_mode = "per-course"

[market]
trends_top_n = 3
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), dir.path()).unwrap();
        assert!(config.store.strict_references);
        assert_eq!(config.analysis.suggestion_mode, SuggestionMode::PerCourse);
        assert_eq!(config.market.trends_top_n, 3);
        // untouched keys keep their defaults
        assert_eq!(config.market.default_keyword, "software developer");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml")), dir.path()).unwrap_err();
        assert!(matches!(err, CmError::MissingConfig(_)));
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[store\nstrict_references = ").unwrap();
        let err = Config::load(Some(&path), dir.path()).unwrap_err();
        assert!(matches!(err, CmError::Config(_)));
    }

    #[test]
    fn project_patch_is_loaded_from_root() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "[store]\ndb_path = \"project.db\"\n",
        )
        .unwrap();
        let patch = Config::load_project(dir.path()).unwrap().unwrap();
        let mut config = Config::default();
        config.merge_patch(patch);
        assert_eq!(config.db_path(dir.path()), dir.path().join("project.db"));
    }

    #[test]
    fn env_overrides() {
        let env = vars(&[
            ("CURRMAP_DB_PATH", "/tmp/env.db"),
            ("CURRMAP_STRICT_REFERENCES", "yes"),
            ("CURRMAP_SUGGESTION_MODE", "per-course"),
            ("CURRMAP_TRENDS_TOP_N", "5"),
            ("CURRMAP_MARKET_CATALOG", "catalog.yaml"),
            ("CURRMAP_ROBOT", "1"),
            ("CURRMAP_ROBOT_FORMAT", "compact"),
        ]);
        let mut config = Config::default();
        config
            .apply_overrides_from(|key| env.get(key).cloned())
            .unwrap();

        assert_eq!(config.store.db_path, Some(PathBuf::from("/tmp/env.db")));
        assert!(config.store.strict_references);
        assert_eq!(config.analysis.suggestion_mode, SuggestionMode::PerCourse);
        assert_eq!(config.market.trends_top_n, 5);
        assert_eq!(config.market.catalog_path, Some(PathBuf::from("catalog.yaml")));
        assert!(config.robot.enabled);
        assert_eq!(config.robot.format, RobotFormat::Compact);
    }

    #[test]
    fn invalid_env_values_are_rejected() {
        let env = vars(&[("CURRMAP_TRENDS_TOP_N", "many")]);
        let err = Config::default()
            .apply_overrides_from(|key| env.get(key).cloned())
            .unwrap_err();
        assert!(err.to_string().contains("CURRMAP_TRENDS_TOP_N"));

        let env = vars(&[("CURRMAP_SUGGESTION_MODE", "sideways")]);
        assert!(
            Config::default()
                .apply_overrides_from(|key| env.get(key).cloned())
                .is_err()
        );
    }

    #[test]
    fn falsey_env_bool() {
        let env = vars(&[("CURRMAP_STRICT_REFERENCES", "off")]);
        let mut config = Config::default();
        config.store.strict_references = true;
        config
            .apply_overrides_from(|key| env.get(key).cloned())
            .unwrap();
        assert!(!config.store.strict_references);
    }

    #[test]
    fn parse_robot_format_values() {
        assert_eq!(parse_robot_format("JSON").unwrap(), RobotFormat::Json);
        assert_eq!(parse_robot_format("compact").unwrap(), RobotFormat::Compact);
        assert!(parse_robot_format("xml").is_err());
    }
}
