use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io::read_config;
use crate::io::data_io::DATA_FILE;
use crate::io::logging;
use crate::io::state::{read_ui_state, write_ui_state};
use crate::model::Config;
use crate::ops::Store;
use crate::tui::state::NavigationController;
use crate::tui::state::now::{MAX_WORK_MINUTES, MIN_WORK_MINUTES, SystemClock};

use super::keymap;
use super::render;
use super::theme::Theme;

/// How long the loop waits for a key before ticking the timer
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Everything the event loop needs besides the terminal
struct Session {
    nav: NavigationController,
    theme: Theme,
    show_hints: bool,
}

/// Load config and data from `data_dir` and build the controller
fn open(data_dir: &Path, work_minutes: Option<u32>) -> Result<Session, Box<dyn std::error::Error>> {
    let mut config: Config = read_config(data_dir)?;
    if let Some(minutes) = work_minutes {
        if !(MIN_WORK_MINUTES..=MAX_WORK_MINUTES).contains(&minutes) {
            return Err(format!(
                "work minutes must be between {} and {}",
                MIN_WORK_MINUTES, MAX_WORK_MINUTES
            )
            .into());
        }
        config.timer.work_minutes = minutes;
    }

    let store = Store::open(&data_dir.join(DATA_FILE))?;
    let mut nav = NavigationController::new(Box::new(store), Box::new(SystemClock), &config.timer)
        .with_config_dir(data_dir.to_path_buf());
    if let Some(state) = read_ui_state(data_dir) {
        nav.restore_ui_state(&state);
    }

    Ok(Session {
        nav,
        theme: Theme::from_config(&config.ui),
        show_hints: config.ui.show_key_hints,
    })
}

fn save_ui_state(data_dir: &Path, nav: &NavigationController) {
    if let Err(e) = write_ui_state(data_dir, &nav.ui_state()) {
        tracing::warn!(error = %e, "could not save ui state");
    }
}

/// Run the TUI against the data directory
pub fn run(data_dir: &Path, work_minutes: Option<u32>) -> Result<(), Box<dyn std::error::Error>> {
    logging::init(data_dir);
    let mut session = open(data_dir, work_minutes)?;
    tracing::info!(dir = %data_dir.display(), "starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut session, data_dir);

    save_ui_state(data_dir, &session.nav);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("exiting");
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut Session,
    data_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut key_count = 0u32;
    loop {
        terminal.draw(|frame| {
            render::render(frame, &session.nav, &session.theme, session.show_hints)
        })?;

        if event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            keymap::dispatch(&mut session.nav, &keymap::key_name(key));
            // debounced: every few keys
            key_count += 1;
            if key_count >= 5 {
                save_ui_state(data_dir, &session.nav);
                key_count = 0;
            }
        }
        session.nav.tick();

        if session.nav.should_quit() {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::state::View;
    use tempfile::TempDir;

    #[test]
    fn open_restores_saved_view() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(".state.json"),
            r#"{"view":"now","box_list":"ideas"}"#,
        )
        .unwrap();
        let session = open(dir.path(), None).unwrap();
        assert_eq!(session.nav.view(), View::Now);
        assert!(session.show_hints);
    }

    #[test]
    fn work_minutes_flag_is_range_checked() {
        let dir = TempDir::new().unwrap();
        assert!(open(dir.path(), Some(0)).is_err());
        let session = open(dir.path(), Some(50)).unwrap();
        assert_eq!(session.nav.now().work_minutes(), 50);
    }

    #[test]
    fn bad_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.toml"), "timer = 3").unwrap();
        assert!(open(dir.path(), None).is_err());
    }
}
