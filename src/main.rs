use clap::Parser;
use stint::cli::commands::Cli;
use stint::io::resolve_data_dir;

fn main() {
    let cli = Cli::parse();
    let data_dir = resolve_data_dir(cli.data_dir);

    if let Err(e) = stint::tui::run(&data_dir, cli.work_minutes) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
