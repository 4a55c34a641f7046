//! The subtask checklist panel.
//!
//! Adds, toggles, inline-edits and removes checklist items. At most one
//! item is in inline edit at a time; committing an empty edit keeps the
//! old text, matching the commit-on-blur rule for the other panels.

use crate::Result;
use crate::models::Subtask;
use crate::store::EntityStore;
use crate::view::ViewSync;

pub struct SubtaskPanel {
    card_id: String,
    editing: Option<String>,
}

impl SubtaskPanel {
    pub fn open(card_id: impl Into<String>) -> Self {
        Self {
            card_id: card_id.into(),
            editing: None,
        }
    }

    /// Subtask id currently in inline edit, if any.
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Add an item from the input field and update the tile's progress
    /// counter.
    pub fn add(
        &self,
        store: &mut EntityStore,
        view: &mut ViewSync,
        text: &str,
    ) -> Result<Option<Subtask>> {
        let subtask = store.add_subtask(&self.card_id, text)?;
        if subtask.is_some() {
            if let Some(card) = store.card(&self.card_id) {
                let card = card.clone();
                view.sync_subtasks(&card);
            }
        }
        Ok(subtask)
    }

    /// Toggle an item's checkbox.
    pub fn toggle(
        &self,
        store: &mut EntityStore,
        view: &mut ViewSync,
        subtask_id: &str,
    ) -> Result<()> {
        if let Some(card) = store.toggle_subtask(&self.card_id, subtask_id)? {
            view.sync_subtasks(&card);
        }
        Ok(())
    }

    /// Enter inline edit on an item; replaces any edit in progress.
    pub fn begin_edit(&mut self, subtask_id: impl Into<String>) {
        self.editing = Some(subtask_id.into());
    }

    /// Commit the inline edit on blur. Empty text keeps the old value.
    /// Either way the edit state ends.
    pub fn commit_edit(&mut self, store: &mut EntityStore, text: &str) -> Result<()> {
        let Some(subtask_id) = self.editing.take() else {
            return Ok(());
        };
        if text.trim().is_empty() {
            return Ok(());
        }
        store.edit_subtask_text(&self.card_id, &subtask_id, text)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Remove an item and update the tile's progress counter.
    pub fn remove(
        &mut self,
        store: &mut EntityStore,
        view: &mut ViewSync,
        subtask_id: &str,
    ) -> Result<()> {
        if self.editing.as_deref() == Some(subtask_id) {
            self.editing = None;
        }
        if let Some(card) = store.remove_subtask(&self.card_id, subtask_id)? {
            view.sync_subtasks(&card);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CardDraft;
    use crate::test_utils::memory_store;
    use chrono::NaiveDate;

    fn noon() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn panel_fixture() -> (EntityStore, ViewSync, SubtaskPanel, String) {
        let mut store = memory_store();
        let board = store.create_board(None).unwrap();
        let column = store.create_column("To Do", "#ccc", &board.id).unwrap();
        let card = store
            .create_card(&column.id, CardDraft::titled("Parent"))
            .unwrap();
        let mut view = ViewSync::new();
        view.render_column(&column.id, &store.cards_of(&column.id), store.labels(), noon());
        let panel = SubtaskPanel::open(&card.id);
        (store, view, panel, card.id)
    }

    #[test]
    fn test_add_and_toggle_update_progress_counter() {
        let (mut store, mut view, panel, card_id) = panel_fixture();
        let subtask = panel
            .add(&mut store, &mut view, "step one")
            .unwrap()
            .unwrap();
        panel.add(&mut store, &mut view, "step two").unwrap();
        assert_eq!(
            view.widget(&card_id).unwrap().face.subtask_progress,
            Some((0, 2))
        );

        panel
            .toggle(&mut store, &mut view, &subtask.id)
            .unwrap();
        assert_eq!(
            view.widget(&card_id).unwrap().face.subtask_progress,
            Some((1, 2))
        );
    }

    #[test]
    fn test_inline_edit_commit_and_empty_keep() {
        let (mut store, mut view, mut panel, card_id) = panel_fixture();
        let subtask = panel
            .add(&mut store, &mut view, "tpyo")
            .unwrap()
            .unwrap();

        panel.begin_edit(&subtask.id);
        assert_eq!(panel.editing(), Some(subtask.id.as_str()));
        panel.commit_edit(&mut store, "typo").unwrap();
        assert!(panel.editing().is_none());
        assert_eq!(store.card(&card_id).unwrap().subtasks[0].text, "typo");

        // An empty commit ends the edit but keeps the text
        panel.begin_edit(&subtask.id);
        panel.commit_edit(&mut store, "   ").unwrap();
        assert!(panel.editing().is_none());
        assert_eq!(store.card(&card_id).unwrap().subtasks[0].text, "typo");
    }

    #[test]
    fn test_remove_clears_edit_state() {
        let (mut store, mut view, mut panel, card_id) = panel_fixture();
        let subtask = panel
            .add(&mut store, &mut view, "doomed")
            .unwrap()
            .unwrap();

        panel.begin_edit(&subtask.id);
        panel
            .remove(&mut store, &mut view, &subtask.id)
            .unwrap();
        assert!(panel.editing().is_none());
        assert!(store.card(&card_id).unwrap().subtasks.is_empty());
        assert_eq!(view.widget(&card_id).unwrap().face.subtask_progress, None);
    }

    #[test]
    fn test_add_to_deleted_card_is_silent() {
        let (mut store, mut view, panel, card_id) = panel_fixture();
        store.delete_card(&card_id).unwrap();
        let added = panel.add(&mut store, &mut view, "orphan").unwrap();
        assert!(added.is_none());
    }
}
