//! Locating and loading the CLI configuration.
//!
//! The first file found wins:
//!
//! 1. the `--config` path, which must exist;
//! 2. `isogrid.toml` in the directory of the scene being processed;
//! 3. `config.toml` in the platform configuration directory.
//!
//! Without any of them the defaults apply. A loaded file is checked before a
//! grid is built, so a zero `depth.step` is reported against the file that
//! set it rather than as a grid failure.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use isogrid::{GridError, IsogridError, config::AppConfig};

/// File name looked up beside a scene.
pub const SCENE_CONFIG_NAME: &str = "isogrid.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file {} does not exist", .0.display())]
    MissingFile(PathBuf),

    #[error("cannot read configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("`depth.step` in {} must be positive", .0.display())]
    ZeroStep(PathBuf),
}

impl From<ConfigError> for IsogridError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ZeroStep(_) => GridError::InvalidConfig(err.to_string()).into(),
            ConfigError::MissingFile(_) => {
                IsogridError::Io(io::Error::new(io::ErrorKind::NotFound, err.to_string()))
            }
            ConfigError::Read { ref source, .. } => {
                IsogridError::Io(io::Error::new(source.kind(), err.to_string()))
            }
            ConfigError::Parse { .. } => {
                IsogridError::Io(io::Error::new(io::ErrorKind::InvalidData, err.to_string()))
            }
        }
    }
}

/// Where the configuration for a run comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Scene(PathBuf),
    Platform(PathBuf),
    Defaults,
}

/// Picks the configuration file for the scene at `scene`.
///
/// # Errors
///
/// Returns [`ConfigError::MissingFile`] if `explicit` names a missing file.
pub fn locate_config(
    explicit: Option<&Path>,
    scene: &Path,
) -> Result<ConfigSource, ConfigError> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }
        return Ok(ConfigSource::Explicit(path.to_path_buf()));
    }

    let beside_scene = scene
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(SCENE_CONFIG_NAME);
    if beside_scene.is_file() {
        return Ok(ConfigSource::Scene(beside_scene));
    }

    match ProjectDirs::from("com", "isogrid", "isogrid") {
        Some(dirs) => {
            let platform = dirs.config_dir().join("config.toml");
            if platform.is_file() {
                return Ok(ConfigSource::Platform(platform));
            }
            debug!(path = platform.display().to_string(); "No platform configuration");
        }
        None => debug!("Platform configuration directory unknown"),
    }

    Ok(ConfigSource::Defaults)
}

/// Loads the configuration for the scene at `scene`.
///
/// # Errors
///
/// Returns the [`ConfigError`] of a missing, unreadable, malformed or
/// rejected file, converted to an [`IsogridError`].
pub fn load_config(explicit: Option<&Path>, scene: &Path) -> Result<AppConfig, IsogridError> {
    let source = locate_config(explicit, scene)?;
    let path = match &source {
        ConfigSource::Explicit(path) | ConfigSource::Scene(path) | ConfigSource::Platform(path) => {
            path
        }
        ConfigSource::Defaults => {
            debug!("No configuration file found, using defaults");
            return Ok(AppConfig::default());
        }
    };

    info!(source:? = source; "Loading configuration");
    Ok(read_config(path)?)
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: AppConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if config.depth().step() == 0 {
        return Err(ConfigError::ZeroStep(path.to_path_buf()));
    }
    debug!(
        step = config.depth().step(),
        rotation = config.rotation().order().as_slice().len();
        "Configuration loaded"
    );
    Ok(config)
}
