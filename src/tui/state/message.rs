use crate::ops::ActionResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Success,
    Failure,
    Info,
}

/// The last outcome shown in the status row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub level: MessageLevel,
    pub text: String,
}

/// Single-slot mailbox: every write replaces the previous message.
#[derive(Debug, Default)]
pub struct MessageHolder {
    current: Option<Message>,
}

impl MessageHolder {
    pub fn set(&mut self, level: MessageLevel, text: impl Into<String>) {
        self.current = Some(Message {
            level,
            text: text.into(),
        });
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.set(MessageLevel::Success, text);
    }

    pub fn failure(&mut self, text: impl Into<String>) {
        self.set(MessageLevel::Failure, text);
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.set(MessageLevel::Info, text);
    }

    /// Show a collaborator result; neutral no-ops read as info.
    pub fn from_result(&mut self, result: &ActionResult) {
        let level = match result.success {
            Some(true) => MessageLevel::Success,
            Some(false) => MessageLevel::Failure,
            None => MessageLevel::Info,
        };
        self.set(level, result.message.clone());
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn get(&self) -> Option<&Message> {
        self.current.as_ref()
    }

    pub fn text(&self) -> Option<&str> {
        self.current.as_ref().map(|m| m.text.as_str())
    }

    pub fn level(&self) -> Option<MessageLevel> {
        self.current.as_ref().map(|m| m.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_write_replaces_earlier() {
        let mut messages = MessageHolder::default();
        messages.success("saved");
        messages.failure("boom");
        assert_eq!(messages.text(), Some("boom"));
        assert_eq!(messages.level(), Some(MessageLevel::Failure));
    }

    #[test]
    fn noop_result_is_info() {
        let mut messages = MessageHolder::default();
        messages.from_result(&ActionResult::noop("Already active"));
        assert_eq!(messages.level(), Some(MessageLevel::Info));
        messages.clear();
        assert!(messages.get().is_none());
    }
}
