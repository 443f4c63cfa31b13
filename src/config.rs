//! Settings read from the environment (a `.env` file is loaded first by `main`).

use std::path::PathBuf;

use url::Url;

use crate::error::Error;

pub const API_URL_VAR: &str = "MATHPAD_API_URL";
pub const DEFAULT_WIDTH: usize = 1024;
pub const DEFAULT_HEIGHT: usize = 640;
const MAX_DIMENSION: usize = 8192;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Analysis endpoint root, no trailing slash.
    pub api_url: String,
    /// Canvas size in pixels (the window adds the toolbar on top).
    pub width: usize,
    pub height: usize,
    /// Extra typesetting macros (JSON object).
    pub macros: Option<PathBuf>,
    pub debug: bool,
}

impl Config {
    /// Build config from environment variables.
    ///
    /// Required:
    /// - `MATHPAD_API_URL`: http(s) base URL of the analysis endpoint
    ///
    /// Optional:
    /// - `MATHPAD_WIDTH` / `MATHPAD_HEIGHT`: canvas size, default 1024x640
    /// - `MATHPAD_MACROS`: path to a JSON macro table for the typesetter
    /// - `MATHPAD_DEBUG`: `1` or `true` for debug logging
    pub fn from_env() -> Result<Self, Error> {
        let api_url = parse_api_url(std::env::var(API_URL_VAR).ok().as_deref())?;
        let width = env_parse_dimension("MATHPAD_WIDTH", DEFAULT_WIDTH);
        let height = env_parse_dimension("MATHPAD_HEIGHT", DEFAULT_HEIGHT);
        let macros = std::env::var_os("MATHPAD_MACROS")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let debug = matches!(
            std::env::var("MATHPAD_DEBUG").ok().as_deref().map(str::trim),
            Some("1" | "true" | "TRUE" | "yes")
        );

        Ok(Self { api_url, width, height, macros, debug })
    }
}

fn parse_api_url(raw: Option<&str>) -> Result<String, Error> {
    let raw = raw.map(str::trim).filter(|v| !v.is_empty()).ok_or_else(|| {
        Error::Config(format!("{API_URL_VAR} is not set; point it at the analysis server"))
    })?;

    let url = Url::parse(raw).map_err(|e| Error::Config(format!("{API_URL_VAR}={raw:?}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "{API_URL_VAR}={raw:?}: unsupported scheme '{}' (expected http or https)",
            url.scheme()
        )));
    }

    Ok(raw.trim_end_matches('/').to_string())
}

fn env_parse_dimension(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|v| (1..=MAX_DIMENSION).contains(v))
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
