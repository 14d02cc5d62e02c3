use chrono::NaiveDate;

use super::status::{EntityKind, Id, Status};

/// Common mutable surface of the named work items (tracks, projects, todos,
/// box todos and ideas). The store uses it to apply the generic commands
/// without matching on every entity type.
pub trait Record {
    fn kind(&self) -> EntityKind;
    fn id(&self) -> Id;
    fn name(&self) -> &str;
    fn set_name(&mut self, name: String);
    fn set_description(&mut self, description: String);
    fn status(&self) -> Status;
    fn set_status(&mut self, status: Status);
    fn is_archived(&self) -> bool;
    fn set_archived(&mut self, archived: bool);

    /// Returns false when the kind carries no deadline.
    fn set_deadline(&mut self, _deadline: Option<NaiveDate>) -> bool {
        false
    }

    /// Returns false when the kind carries no hints. Kinds with only an
    /// importance hint ignore `urgency`.
    fn set_hints(&mut self, _importance: u8, _urgency: u8) -> bool {
        false
    }
}

/// Implements the parts of [`Record`] every item struct shares field-for-field.
macro_rules! record_basics {
    ($kind:expr) => {
        fn kind(&self) -> $crate::model::status::EntityKind {
            $kind
        }
        fn id(&self) -> $crate::model::status::Id {
            self.id
        }
        fn name(&self) -> &str {
            &self.name
        }
        fn set_name(&mut self, name: String) {
            self.name = name;
        }
        fn set_description(&mut self, description: String) {
            self.description = description;
        }
        fn status(&self) -> $crate::model::status::Status {
            self.status
        }
        fn set_status(&mut self, status: $crate::model::status::Status) {
            self.status = status;
        }
        fn is_archived(&self) -> bool {
            self.archived
        }
        fn set_archived(&mut self, archived: bool) {
            self.archived = archived;
        }
    };
}

pub(crate) use record_basics;
