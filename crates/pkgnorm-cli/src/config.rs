//! Configuration layering, fallback logic, and environment overrides

use glob::Pattern;
use pkgnorm_core::{PkgError, PkgResult, Relations};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project configuration file, looked up in the scan root
pub const PROJECT_CONFIG: &str = "pkgnorm.toml";

const ENV_PREFIX: &str = "PKGNORM_";

/// One configuration file; every setting is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub max_depth: Option<usize>,
    pub follow_links: Option<bool>,
    pub include_relations: Option<bool>,
    pub threads: Option<usize>,
    pub ignore: Option<Vec<String>>,
}

/// Settings given as command line flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub max_depth: Option<usize>,
    pub threads: Option<usize>,
    pub no_deps: bool,
}

/// Effective settings after layering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Walk depth below the scan root; `None` is unlimited
    pub max_depth: Option<usize>,
    pub follow_links: bool,
    pub include_relations: bool,
    /// Worker threads; `None` lets rayon decide
    pub threads: Option<usize>,
    /// Glob patterns of paths to skip, relative to the scan root
    pub ignore: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_depth: None,
            follow_links: false,
            include_relations: true,
            threads: None,
            ignore: Vec::new(),
        }
    }
}

impl Settings {
    pub fn relations(&self) -> Relations {
        if self.include_relations {
            Relations::Include
        } else {
            Relations::Omit
        }
    }

    /// Compile the ignore globs
    pub fn ignore_patterns(&self) -> PkgResult<Vec<Pattern>> {
        self.ignore
            .iter()
            .map(|raw| {
                Pattern::new(raw).map_err(|e| PkgError::ConfigValidation {
                    field: "ignore".to_string(),
                    reason: format!("invalid glob '{}': {}", raw, e),
                })
            })
            .collect()
    }
}

/// Main configuration loading interface
pub struct ConfigLoader {
    /// Directory holding the project configuration
    root: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for a scan root; a file root uses its directory
    pub fn new(root: &Path) -> Self {
        let root = if root.is_file() {
            root.parent().map(Path::to_path_buf).unwrap_or_default()
        } else {
            root.to_path_buf()
        };
        Self { root }
    }

    /// Load every layer and merge them
    pub fn load(&self, cli: &CliOverrides) -> PkgResult<Settings> {
        let global = match Self::global_config_path() {
            Some(path) => load_from_file(&path)?,
            None => None,
        };
        let project = load_from_file(&self.project_config_path())?;
        ConfigLayering::merge_configs(global, project, &ConfigLayering::collect_env_overrides(), cli)
    }

    pub fn project_config_path(&self) -> PathBuf {
        self.root.join(PROJECT_CONFIG)
    }

    /// Global configuration under the platform config directory
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pkgnorm").join("config.toml"))
    }
}

/// Read a configuration file; a missing file is not an error
pub fn load_from_file(path: &Path) -> PkgResult<Option<ConfigFile>> {
    if !path.is_file() {
        return Ok(None);
    }
    debug!("Loading configuration from {}", path.display());
    let content = fs::read_to_string(path)
        .map_err(|e| PkgError::io(format!("Failed to read {}", path.display()), e))?;
    toml::from_str(&content)
        .map(Some)
        .map_err(|e| PkgError::ConfigValidation {
            field: path.display().to_string(),
            reason: e.to_string(),
        })
}

/// Configuration layering and merging
pub struct ConfigLayering;

impl ConfigLayering {
    /// Merge the layers; later layers win
    pub fn merge_configs(
        global_config: Option<ConfigFile>,
        project_config: Option<ConfigFile>,
        env_overrides: &HashMap<String, String>,
        cli_overrides: &CliOverrides,
    ) -> PkgResult<Settings> {
        let mut settings = Settings::default();

        for file in [global_config, project_config].into_iter().flatten() {
            Self::apply_file(&mut settings, file);
        }

        Self::apply_env_overrides(&mut settings, env_overrides)?;
        Self::apply_cli_overrides(&mut settings, cli_overrides);

        if settings.threads == Some(0) {
            return Err(PkgError::ConfigValidation {
                field: "threads".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(settings)
    }

    fn apply_file(settings: &mut Settings, file: ConfigFile) {
        if let Some(max_depth) = file.max_depth {
            settings.max_depth = Some(max_depth);
        }
        if let Some(follow_links) = file.follow_links {
            settings.follow_links = follow_links;
        }
        if let Some(include_relations) = file.include_relations {
            settings.include_relations = include_relations;
        }
        if let Some(threads) = file.threads {
            settings.threads = Some(threads);
        }
        if let Some(ignore) = file.ignore {
            settings.ignore.extend(ignore);
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(
        settings: &mut Settings,
        overrides: &HashMap<String, String>,
    ) -> PkgResult<()> {
        for (key, value) in overrides {
            match key.as_str() {
                "PKGNORM_MAX_DEPTH" => settings.max_depth = Some(parse_number(key, value)?),
                "PKGNORM_THREADS" => settings.threads = Some(parse_number(key, value)?),
                "PKGNORM_FOLLOW_LINKS" => settings.follow_links = parse_flag(key, value)?,
                "PKGNORM_NO_DEPS" => settings.include_relations = !parse_flag(key, value)?,
                _ => {
                    // Unknown environment variable, ignore
                },
            }
        }
        Ok(())
    }

    /// Apply CLI flag overrides
    fn apply_cli_overrides(settings: &mut Settings, overrides: &CliOverrides) {
        if let Some(max_depth) = overrides.max_depth {
            settings.max_depth = Some(max_depth);
        }
        if let Some(threads) = overrides.threads {
            settings.threads = Some(threads);
        }
        if overrides.no_deps {
            settings.include_relations = false;
        }
    }

    /// Collect environment variable overrides
    pub fn collect_env_overrides() -> HashMap<String, String> {
        std::env::vars()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX))
            .collect()
    }
}

fn parse_number(field: &str, value: &str) -> PkgResult<usize> {
    value.trim().parse().map_err(|e| PkgError::ConfigValidation {
        field: field.to_string(),
        reason: format!("expected a number, found '{}': {}", value, e),
    })
}

fn parse_flag(field: &str, value: &str) -> PkgResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(PkgError::ConfigValidation {
            field: field.to_string(),
            reason: format!("expected true or false, found '{}'", value),
        }),
    }
}
