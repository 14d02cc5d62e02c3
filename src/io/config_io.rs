use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::io::data_io::atomic_write;
use crate::model::Config;

/// Name of the config file inside the data directory
pub const CONFIG_FILE: &str = "config.toml";

/// Error type for config file I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not parse config.toml: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("could not edit config.toml: {0}")]
    EditError(#[from] toml_edit::TomlError),
    #[error("io error: {0}")]
    IoError(#[from] io::Error),
}

fn read_text(path: &Path) -> Result<Option<String>, ConfigError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Read `config.toml` from the data directory; a missing file means defaults.
pub fn read_config(data_dir: &Path) -> Result<Config, ConfigError> {
    match read_text(&data_dir.join(CONFIG_FILE))? {
        Some(text) => Ok(toml::from_str(&text)?),
        None => Ok(Config::default()),
    }
}

/// Set `timer.work_minutes`, keeping the rest of the file (comments,
/// ordering, formatting) as the user wrote it.
pub fn set_work_minutes(data_dir: &Path, minutes: u32) -> Result<(), ConfigError> {
    let path = data_dir.join(CONFIG_FILE);
    let text = read_text(&path)?.unwrap_or_default();
    let mut doc: toml_edit::DocumentMut = text.parse()?;
    if !doc.contains_key("timer") {
        doc["timer"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc["timer"]["work_minutes"] = toml_edit::value(i64::from(minutes));
    fs::create_dir_all(data_dir)?;
    atomic_write(&path, doc.to_string().as_bytes())?;
    Ok(())
}
