//! Layered TOML configuration for the TUI.
//!
//! Layers, lowest priority first: built-in defaults, the user file
//! (`$XDG_CONFIG_HOME/viewstack/config.toml`), the project file
//! (`.viewstack/config.toml`) and finally a file named on the command line.
//! A value set in a higher layer wins; unset values fall through.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use viewstack_core::{NotifyScope, StackConfig};

use crate::catalog::HOME;

pub const DEFAULT_TICK_RATE_MS: u64 = 50;
pub const DEFAULT_SLIDE_FRAMES: u16 = 6;

/// Which transition the stack uses by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    Instant,
    #[default]
    Slide,
}

/// Configuration as stored in TOML files (optional fields for merging)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTuiConfig {
    pub start_view: Option<String>,
    pub tick_rate_ms: Option<u64>,
    #[serde(default)]
    pub transition: RawTransitionConfig,
    #[serde(default)]
    pub stack: RawStackConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTransitionConfig {
    pub kind: Option<TransitionKind>,
    pub frames: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStackConfig {
    pub notify_scope: Option<NotifyScope>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuiConfig {
    pub start_view: String,
    pub tick_rate_ms: u64,
    pub transition: TransitionConfig,
    pub stack: StackConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionConfig {
    pub kind: TransitionKind,
    /// Ticks a slide takes to finish.
    pub frames: u16,
}

impl Default for TuiConfig {
    fn default() -> Self {
        ConfigLoader::finalize(RawTuiConfig::default())
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project + explicit file)
    pub fn load(explicit: Option<&Path>) -> Result<TuiConfig> {
        let mut layers: Vec<PathBuf> = Self::user_config_path().into_iter().collect();
        layers.push(Self::project_config_path());

        let mut raw = Self::load_layers(&layers)?;

        if let Some(path) = explicit {
            let overlay = Self::read_file(path)?;
            raw = Self::merge_raw(raw, overlay);
        }

        Ok(Self::finalize(raw))
    }

    /// Merge every existing file in `paths`, later files overriding earlier ones.
    pub fn load_layers(paths: &[PathBuf]) -> Result<RawTuiConfig> {
        let mut raw = RawTuiConfig::default();
        for path in paths.iter().filter(|path| path.exists()) {
            tracing::debug!(path = %path.display(), "Loading config layer");
            raw = Self::merge_raw(raw, Self::read_file(path)?);
        }
        Ok(raw)
    }

    fn read_file(path: &Path) -> Result<RawTuiConfig> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Get user config path
    pub fn user_config_path() -> Option<PathBuf> {
        config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get project config path
    /// Can be overridden with VIEWSTACK_PROJECT_CONFIG_DIR env var
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("VIEWSTACK_PROJECT_CONFIG_DIR") {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".viewstack/config.toml")
        }
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawTuiConfig, overlay: RawTuiConfig) -> RawTuiConfig {
        RawTuiConfig {
            start_view: overlay.start_view.or(base.start_view),
            tick_rate_ms: overlay.tick_rate_ms.or(base.tick_rate_ms),
            transition: RawTransitionConfig {
                kind: overlay.transition.kind.or(base.transition.kind),
                frames: overlay.transition.frames.or(base.transition.frames),
            },
            stack: RawStackConfig {
                notify_scope: overlay.stack.notify_scope.or(base.stack.notify_scope),
            },
        }
    }

    fn finalize(raw: RawTuiConfig) -> TuiConfig {
        TuiConfig {
            start_view: raw.start_view.unwrap_or_else(|| HOME.to_string()),
            tick_rate_ms: raw.tick_rate_ms.unwrap_or(DEFAULT_TICK_RATE_MS).max(1),
            transition: TransitionConfig {
                kind: raw.transition.kind.unwrap_or_default(),
                frames: raw.transition.frames.unwrap_or(DEFAULT_SLIDE_FRAMES),
            },
            stack: StackConfig {
                notify_scope: raw.stack.notify_scope.unwrap_or_default(),
            },
        }
    }
}

/// The viewstack config directory.
///
/// `$XDG_CONFIG_HOME/viewstack` if set, otherwise `~/.config/viewstack`.
pub fn config_dir() -> Option<PathBuf> {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg_config).join("viewstack"))
    } else {
        dirs::home_dir().map(|home| home.join(".config/viewstack"))
    }
}

/// The viewstack data directory, used for the log file.
///
/// `$XDG_DATA_HOME/viewstack` if set, otherwise `~/.local/share/viewstack`.
pub fn data_dir() -> PathBuf {
    if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg_data).join("viewstack")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".local/share/viewstack")
    } else {
        PathBuf::from(".local/share/viewstack")
    }
}
