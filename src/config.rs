// File: ./src/config.rs
use crate::color_utils::{self, Palette};
use crate::error::{Error, Result};
use crate::render::{RenderConfig, Scale};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_LOGIN: &str = "octocat";
pub const DEFAULT_OUTPUT: &str = "assets/contributions.svg";
pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/graphql";
pub const DEFAULT_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Overrides the config file location.
pub const CONFIG_PATH_VAR: &str = "CONTRIB_GRAPH_CONFIG";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub login: String,
    pub output: PathBuf,
    pub endpoint: String,
    pub token_var: String,
    pub theme: Theme,
    /// Explicit colors win over `theme`.
    pub palette: Option<Vec<String>>,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            login: DEFAULT_LOGIN.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token_var: DEFAULT_TOKEN_VAR.to_string(),
            theme: Theme::Light,
            palette: None,
            render: RenderConfig::default(),
        }
    }
}

/// Everything the renderer needs, checked up front.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub palette: Palette,
    pub scale: Scale,
    pub render: RenderConfig,
}

impl Config {
    pub fn get_path() -> Option<PathBuf> {
        if let Ok(path) = env::var(CONFIG_PATH_VAR) {
            return Some(PathBuf::from(path));
        }
        ProjectDirs::from("com", "contrib-graph", "contrib-graph")
            .map(|proj| proj.config_dir().join("config.toml"))
    }

    /// Compiled-in defaults, overlaid by the config file when one exists.
    /// A path named explicitly through the environment must exist.
    pub fn load() -> Result<Self> {
        let explicit = env::var_os(CONFIG_PATH_VAR).is_some();
        match Self::get_path() {
            Some(path) if explicit || path.exists() => Self::load_from(&path),
            _ => {
                debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::InvalidConfig(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    pub fn palette(&self) -> Result<Palette> {
        match &self.palette {
            Some(colors) => Palette::new(colors.clone()),
            None => Ok(match self.theme {
                Theme::Light => Palette::light(),
                Theme::Dark => Palette::dark(),
            }),
        }
    }

    pub fn validate(&self) -> Result<RenderSettings> {
        if self.login.trim().is_empty() {
            return Err(Error::InvalidConfig("login must not be empty".to_string()));
        }
        self.render.check_bounds()?;

        let palette = self.palette()?;
        let scale = Scale::new(self.render.thresholds.clone(), palette.len())?;

        let mut render = self.render.clone();
        if self.theme == Theme::Dark && render.text_color == RenderConfig::default().text_color {
            let base = render.background.as_deref().unwrap_or(palette.color(0));
            render.text_color = color_utils::text_color_for(base).to_string();
        }
        if let Some(bg) = &render.background
            && color_utils::parse_hex(bg).is_none()
        {
            return Err(Error::InvalidConfig(format!("background {:?} is not a hex color", bg)));
        }

        Ok(RenderSettings {
            palette,
            scale,
            render,
        })
    }

    pub fn token(&self) -> Result<String> {
        resolve_token(&self.token_var, env::var(&self.token_var).ok())
    }
}

/// An unset or blank value is a missing token. Surrounding whitespace, such
/// as the trailing newline of a secrets file, is stripped.
pub fn resolve_token(var: &str, value: Option<String>) -> Result<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(Error::MissingToken {
            var: var.to_string(),
        }),
    }
}
