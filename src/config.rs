//! Startup configuration: an optional JSON settings file plus command-line
//! overrides.

use crate::shape::{ParseShapeError, RectangleMode, ShapeKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const USAGE: &str = "Usage: video-click-coords [FRAME] [--config FILE] [--shape KIND] [--debug]";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Shape(#[from] ParseShapeError),
    #[error("missing value for {0}\n{usage}", usage = USAGE)]
    MissingValue(&'static str),
    #[error("unknown option {0}\n{usage}", usage = USAGE)]
    UnknownFlag(String),
    #[error("unexpected argument {0}\n{usage}", usage = USAGE)]
    UnexpectedArgument(String),
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Shape selected at startup.
    pub initial_shape: ShapeKind,
    pub rectangle_mode: RectangleMode,
    /// Still frame shown under the overlay.
    pub frame: Option<PathBuf>,
    pub debug: bool,
}

impl Config {
    pub fn from_json(data: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(data).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&data, path)
    }

    /// Settings file (if any) with command-line overrides applied.
    pub fn resolve(args: Args) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(shape) = args.shape {
            config.initial_shape = shape;
        }
        if args.frame.is_some() {
            config.frame = args.frame;
        }
        config.debug |= args.debug;
        Ok(config)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Args {
    pub frame: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub shape: Option<ShapeKind>,
    pub debug: bool,
}

impl Args {
    /// Parse arguments, program name excluded.
    pub fn parse<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut out = Args::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("--config"))?;
                    out.config = Some(PathBuf::from(value));
                }
                "--shape" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("--shape"))?;
                    out.shape = Some(value.parse()?);
                }
                "--debug" => out.debug = true,
                flag if flag.starts_with("--") => {
                    return Err(ConfigError::UnknownFlag(flag.to_string()));
                }
                other if out.frame.is_none() => out.frame = Some(PathBuf::from(other)),
                other => return Err(ConfigError::UnexpectedArgument(other.to_string())),
            }
        }
        Ok(out)
    }
}
