pub mod config_io;
pub mod data_io;
pub mod logging;
pub mod state;

use std::path::PathBuf;

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "STINT_DATA_DIR";

/// Pick the data directory: explicit flag, then `STINT_DATA_DIR`, then the
/// platform data dir, then `./.stint`.
pub fn resolve_data_dir(flag: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = flag {
        return dir;
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    match dirs::data_dir() {
        Some(base) => base.join("stint"),
        None => PathBuf::from(".stint"),
    }
}
