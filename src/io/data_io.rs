use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::Data;

/// Name of the data file inside the data directory
pub const DATA_FILE: &str = "data.json";

/// Error type for data file I/O
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize data: {0}")]
    SerializeError(#[from] serde_json::Error),
    #[error("io error: {0}")]
    IoError(#[from] io::Error),
}

/// Load the data file. A missing file is an empty store.
pub fn load_data(path: &Path) -> Result<Data, DataError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Data::default()),
        Err(e) => {
            return Err(DataError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    let mut data: Data = serde_json::from_str(&text).map_err(|e| DataError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    repair_next_id(&mut data);
    Ok(data)
}

/// Serialize and write the data file atomically, creating its directory.
pub fn save_data(path: &Path, data: &Data) -> Result<(), DataError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)?;
    atomic_write(path, json.as_bytes())?;
    Ok(())
}

/// Write via a temp file in the same directory, then rename over `path`.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// A hand-edited file may carry ids at or past `next_id`; never hand them out again.
fn repair_next_id(data: &mut Data) {
    let max_id = data
        .tracks
        .keys()
        .chain(data.projects.keys())
        .chain(data.todos.keys())
        .chain(data.box_todos.keys())
        .chain(data.ideas.keys())
        .chain(data.sessions.keys())
        .chain(data.takeaways.keys())
        .copied()
        .max()
        .unwrap_or(0);
    if data.next_id <= max_id {
        tracing::warn!(next_id = data.next_id, max_id, "repairing id counter");
        data.next_id = max_id + 1;
    }
}
