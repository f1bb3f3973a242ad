//! Configuration for refork
//!
//! Loads configuration with the following precedence (low to high):
//! 1. Built-in defaults (reproduce the starter-ts migration)
//! 2. Global config (`<config dir>/refork/config.yaml`)
//! 3. Explicit config file (`--config <path>`)
//! 4. Environment and CLI flags (handled by the caller)
//!
//! A file replaces the layer below it; fields it omits take their defaults.

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Complete refork configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReforkConfig {
    /// Default hosting-service organization
    #[serde(default = "default_organization")]
    pub organization: String,

    /// Handle the sponsors URL always points at
    #[serde(default = "default_sponsor")]
    pub sponsor: String,

    /// Copy settings
    #[serde(default)]
    pub copy: CopyConfig,

    /// Symbol replacement settings
    #[serde(default)]
    pub replace: ReplaceConfig,

    /// Git and hosting settings
    #[serde(default)]
    pub git: GitConfig,
}

impl Default for ReforkConfig {
    fn default() -> Self {
        Self {
            organization: default_organization(),
            sponsor: default_sponsor(),
            copy: CopyConfig::default(),
            replace: ReplaceConfig::default(),
            git: GitConfig::default(),
        }
    }
}

impl ReforkConfig {
    /// Check values that would otherwise fail late, halfway through a run
    pub fn validate(&self) -> Result<()> {
        if self.organization.trim().is_empty() {
            return Err(Error::config("organization must not be empty"));
        }
        if self.sponsor.trim().is_empty() {
            return Err(Error::config("sponsor must not be empty"));
        }
        if self.git.default_branch.trim().is_empty() {
            return Err(Error::config("git.default-branch must not be empty"));
        }
        if self.git.remote.trim().is_empty() {
            return Err(Error::config("git.remote must not be empty"));
        }
        if self.replace.rules.iter().any(|r| r.from.is_empty()) {
            return Err(Error::config("replace.rules entries need a non-empty 'from'"));
        }
        Ok(())
    }
}

/// Copy settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CopyConfig {
    /// Glob patterns never copied (relative to the source root)
    #[serde(default = "default_copy_ignore")]
    pub ignore: Vec<String>,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            ignore: default_copy_ignore(),
        }
    }
}

/// Symbol replacement settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReplaceConfig {
    /// Glob patterns selecting files to rewrite
    #[serde(default = "default_replace_include")]
    pub include: Vec<String>,

    /// Glob patterns excluded from rewriting
    #[serde(default = "default_replace_ignore")]
    pub ignore: Vec<String>,

    /// README section removal
    #[serde(default)]
    pub readme: ReadmeConfig,

    /// Ordered substitutions
    #[serde(default = "default_rules")]
    pub rules: Vec<RuleConfig>,
}

impl Default for ReplaceConfig {
    fn default() -> Self {
        Self {
            include: default_replace_include(),
            ignore: default_replace_ignore(),
            readme: ReadmeConfig::default(),
            rules: default_rules(),
        }
    }
}

/// Section removed from the README before substitutions run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReadmeConfig {
    /// Exact file name the rule applies to, at any depth
    #[serde(default = "default_readme_file_name")]
    pub file_name: String,

    /// Marker where removal starts (inclusive)
    #[serde(default = "default_section_start")]
    pub section_start: String,

    /// Marker where removal stops (exclusive)
    #[serde(default = "default_section_end")]
    pub section_end: String,
}

impl Default for ReadmeConfig {
    fn default() -> Self {
        Self {
            file_name: default_readme_file_name(),
            section_start: default_section_start(),
            section_end: default_section_end(),
        }
    }
}

/// One substitution rule
///
/// `from` and `to` may reference `{project_name}`, `{organization}` and
/// `{sponsor}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuleConfig {
    /// Text (or regex when `regex` is set) to find
    pub from: String,

    /// Replacement text; with `regex` it may reference capture groups
    pub to: String,

    /// Treat `from` as a regular expression
    #[serde(default)]
    pub regex: bool,
}

impl RuleConfig {
    /// Create a literal rule
    pub fn literal(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            regex: false,
        }
    }
}

/// Git and hosting settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitConfig {
    /// Hosting service host used for SSH and web URLs
    #[serde(default = "default_host")]
    pub host: String,

    /// Branch force-pushed when the remote repository already exists
    #[serde(default = "default_branch")]
    pub default_branch: String,

    /// Remote name registered for the hosting repository
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Message of the initial commit
    #[serde(default = "default_initial_commit_message")]
    pub initial_commit_message: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            default_branch: default_branch(),
            remote: default_remote(),
            initial_commit_message: default_initial_commit_message(),
        }
    }
}

impl GitConfig {
    /// SSH clone URL for `owner/name`
    pub fn ssh_url(&self, owner: &str, name: &str) -> String {
        format!("git@{}:{}/{}.git", self.host, owner, name)
    }

    /// Web URL for `owner/name`
    pub fn web_url(&self, owner: &str, name: &str) -> String {
        format!("https://{}/{}/{}", self.host, owner, name)
    }
}

fn default_organization() -> String {
    "shortpoet".to_string()
}
fn default_sponsor() -> String {
    "shortpoet".to_string()
}
fn default_copy_ignore() -> Vec<String> {
    [
        "**/.git",
        "**/.git/**",
        "**/node_modules",
        "**/node_modules/**",
        "**/dist",
        "**/dist/**",
        "**/pnpm-lock.yaml",
        "**/package-lock.json",
        "**/yarn.lock",
        "**/*.log",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
fn default_replace_include() -> Vec<String> {
    ["**/*.md", "**/package.json", "**/*.json"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_replace_ignore() -> Vec<String> {
    [
        "**/node_modules",
        "**/node_modules/**",
        "**/dist",
        "**/dist/**",
        "**/pnpm-lock.yaml",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
fn default_readme_file_name() -> String {
    "README.md".to_string()
}
fn default_section_start() -> String {
    "## Sponsors".to_string()
}
fn default_section_end() -> String {
    "## License".to_string()
}
fn default_rules() -> Vec<RuleConfig> {
    vec![
        RuleConfig::literal("pkg-placeholder", "{project_name}"),
        RuleConfig::literal("Anthony Fu", "Carlos Soriano"),
        RuleConfig::literal("anthonyfu117@hotmail.com", "soriano.carlitos@gmail.com"),
        RuleConfig::literal("antfu", "{organization}"),
        // Undo the owner rewrite for the sponsors link; whole handle only
        RuleConfig {
            from: r"github\.com/sponsors/{organization}(?P<tail>[^A-Za-z0-9-]|$)".to_string(),
            to: "github.com/sponsors/{sponsor}${tail}".to_string(),
            regex: true,
        },
    ]
}
fn default_host() -> String {
    "github.com".to_string()
}
fn default_branch() -> String {
    "main".to_string()
}
fn default_remote() -> String {
    "origin".to_string()
}
fn default_initial_commit_message() -> String {
    "Initial commit from starter-ts".to_string()
}

/// Configuration file loader
pub struct ConfigLoader {
    /// Global config file, if a config directory could be determined
    global_path: Option<Utf8PathBuf>,
}

impl ConfigLoader {
    /// Create a loader using the platform config directory
    pub fn new() -> Self {
        let global_path = dirs::config_dir()
            .and_then(|dir| Utf8PathBuf::from_path_buf(dir).ok())
            .map(|dir| dir.join("refork").join("config.yaml"));
        Self { global_path }
    }

    /// Create a loader with a custom global config file
    pub fn with_global_path(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            global_path: Some(path.into()),
        }
    }

    /// Load the effective configuration
    ///
    /// An explicit path must exist; the global file is optional.
    pub fn load(&self, explicit: Option<&Utf8Path>) -> Result<ReforkConfig> {
        let config = if let Some(path) = explicit {
            if !path.is_file() {
                return Err(Error::config(format!("Config file not found: {}", path)));
            }
            Self::load_yaml_file(path)?
        } else {
            match &self.global_path {
                Some(path) if path.is_file() => Self::load_yaml_file(path)?,
                _ => {
                    debug!("No config file found, using defaults");
                    ReforkConfig::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Load a YAML file and parse it
    fn load_yaml_file(path: &Utf8Path) -> Result<ReforkConfig> {
        debug!("Loading config from {}", path);
        let content = std::fs::read_to_string(path).map_err(|e| Error::read_file(path.as_str(), e))?;

        // An empty file means "all defaults"
        if content.trim().is_empty() {
            return Ok(ReforkConfig::default());
        }

        serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {}", path, e)))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
