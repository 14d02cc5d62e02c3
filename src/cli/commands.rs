use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "stint",
    about = concat!("stint v", env!("CARGO_PKG_VERSION"), " - focus timer and work tracker"),
    version
)]
pub struct Cli {
    /// Directory holding data.json, config.toml and the log [env: STINT_DATA_DIR]
    #[arg(short = 'd', long = "data-dir")]
    pub data_dir: Option<PathBuf>,

    /// Work length for this run, in minutes (not saved)
    #[arg(long = "work-minutes", value_name = "N")]
    pub work_minutes: Option<u32>,
}
