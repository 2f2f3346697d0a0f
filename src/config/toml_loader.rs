//! TOML profile reading and parsing.
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::ConfigError;

/// Read a profile file.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if the file does not exist and
/// [`ConfigError::Io`] if it cannot be read.
pub fn read(path: &Path) -> Result<String, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Deserialize TOML text; `origin` names the source in errors.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] if the text is not valid TOML for `T`.
pub fn parse<T: DeserializeOwned>(content: &str, origin: &Path) -> Result<T, ConfigError> {
    toml::from_str(content).map_err(|e| {
        let message = match e.span() {
            Some(span) => format!("line {}: {}", line_of(content, span.start), e.message()),
            None => e.message().to_string(),
        };
        ConfigError::Parse {
            path: origin.to_path_buf(),
            message,
        }
    })
}

/// 1-based line number of a byte offset.
fn line_of(content: &str, offset: usize) -> usize {
    content
        .get(..offset)
        .map_or(0, |before| before.matches('\n').count())
        + 1
}

/// Read and deserialize a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    parse(&read(path)?, path)
}
