use crate::model::{EntityRef, InfoRow};
use crate::ops::Actions;

/// Read-only field inspector for one entity
#[derive(Debug, Default)]
pub struct InfoState {
    pub target: Option<EntityRef>,
    pub rows: Vec<InfoRow>,
    pub scroll: usize,
}

impl InfoState {
    /// Load rows for `target`; false if the entity no longer exists.
    pub fn open(&mut self, actions: &dyn Actions, target: EntityRef) -> bool {
        match actions.info(target) {
            Some(rows) => {
                self.target = Some(target);
                self.rows = rows;
                self.scroll = 0;
                true
            }
            None => false,
        }
    }

    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll = self
            .scroll
            .saturating_add_signed(delta)
            .min(self.rows.len().saturating_sub(1));
    }

    pub fn clear(&mut self) {
        self.target = None;
        self.rows.clear();
        self.scroll = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntityKind;
    use crate::tui::state::test_fixtures::sample_store;

    #[test]
    fn open_and_clear() {
        let (store, ids) = sample_store();
        let mut info = InfoState::default();
        assert!(info.open(&store, EntityRef::new(EntityKind::Todo, ids.header)));
        assert!(info.rows.contains(&InfoRow::new("Stages", "0/3")));
        info.scroll_by(100);
        assert_eq!(info.scroll, info.rows.len() - 1);
        info.clear();
        assert!(info.target.is_none());
        assert!(!info.open(&store, EntityRef::new(EntityKind::Todo, 999)));
    }
}
