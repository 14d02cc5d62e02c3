use super::{NavigationController, UiMode, View};

const HELP: &str = "q quit  tab now/structure  b box  A archive  T timeline  i info  \
                    n add  e edit  m move  a archive  bksp delete  s/c/d toggle  : command";

impl NavigationController {
    /// `:`
    pub fn start_command(&mut self) {
        self.command_line.clear();
        self.mode = UiMode::Command;
    }

    pub fn cancel_command(&mut self) {
        self.command_line.clear();
        self.mode = UiMode::Normal;
    }

    pub fn command_insert(&mut self, c: char) {
        self.command_line.push(c);
    }

    /// Backspace on an empty line leaves command mode
    pub fn command_backspace(&mut self) {
        if self.command_line.pop().is_none() {
            self.cancel_command();
        }
    }

    /// Enter: run the typed command. Mode returns to Normal either way.
    pub fn run_command(&mut self) {
        let line = std::mem::take(&mut self.command_line);
        self.mode = UiMode::Normal;
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return;
        };
        let arg = words.next();
        tracing::debug!(command = name, "run command");
        match (name, arg) {
            ("q" | "quit", None) => self.quit(),
            ("now", None) => self.enter_view(View::Now),
            ("structure", None) => self.enter_view(View::Structure),
            ("box", None) => self.enter_view(View::Box),
            ("archive", None) => self.enter_view(View::Archive),
            ("timeline", None) => self.enter_view(View::Timeline),
            ("work", Some(arg)) => match arg.parse::<u32>() {
                Ok(minutes) => self.set_work_minutes(minutes),
                Err(_) => self
                    .messages
                    .failure(format!("work: expected minutes, got \"{}\"", arg)),
            },
            ("help", None) => self.messages.info(HELP),
            _ => self.messages.failure(format!("Unknown command: {}", line.trim())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::config_io::read_config;
    use crate::tui::state::message::MessageLevel;
    use crate::tui::state::navigation::tests::controller;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn run(nav: &mut NavigationController, line: &str) {
        nav.start_command();
        for c in line.chars() {
            nav.command_insert(c);
        }
        nav.run_command();
    }

    #[test]
    fn view_commands_switch_views() {
        let (mut nav, _, _) = controller();
        run(&mut nav, "timeline");
        assert_eq!(nav.view(), View::Timeline);
        assert_eq!(nav.mode(), UiMode::Normal);
        run(&mut nav, "now");
        assert_eq!(nav.view(), View::Now);
    }

    #[test]
    fn help_names_the_bound_view_keys() {
        let (mut nav, _, _) = controller();
        run(&mut nav, "help");
        let text = nav.messages().text().unwrap_or_default().to_string();
        assert!(text.contains("T timeline"));
        assert!(text.contains("A archive"));
        crate::tui::keymap::dispatch(&mut nav, "T");
        assert_eq!(nav.view(), View::Timeline);
        nav.escape();
        crate::tui::keymap::dispatch(&mut nav, "A");
        assert_eq!(nav.view(), View::Archive);
    }

    #[test]
    fn unknown_command_fails() {
        let (mut nav, _, _) = controller();
        run(&mut nav, "frobnicate");
        assert_eq!(nav.mode(), UiMode::Normal);
        assert_eq!(nav.messages().text(), Some("Unknown command: frobnicate"));
        assert_eq!(nav.messages().level(), Some(MessageLevel::Failure));
    }

    #[test]
    fn work_sets_and_persists_the_length() {
        let dir = TempDir::new().unwrap();
        let (nav, _, _) = controller();
        let mut nav = nav.with_config_dir(dir.path().to_path_buf());
        run(&mut nav, "work 50");
        assert_eq!(nav.now().work_minutes(), 50);
        assert_eq!(nav.now().remaining_seconds(), 3000);
        assert_eq!(read_config(dir.path()).unwrap().timer.work_minutes, 50);

        run(&mut nav, "work 500");
        assert_eq!(nav.now().work_minutes(), 50);
        assert_eq!(nav.messages().level(), Some(MessageLevel::Failure));
    }

    #[test]
    fn quit_and_empty_backspace() {
        let (mut nav, _, _) = controller();
        nav.start_command();
        nav.command_backspace();
        assert_eq!(nav.mode(), UiMode::Normal);
        run(&mut nav, "q");
        assert!(nav.should_quit());
    }
}
