//! The card detail modal.
//!
//! Opens on a card id and commits each text field when it loses focus.
//! Closing commits nothing extra: by the time the close button is
//! reachable every field has already blurred.

use chrono::NaiveDateTime;

use crate::Result;
use crate::shell::{ConfirmDialog, FocusRepair};
use crate::store::EntityStore;
use crate::view::ViewSync;

pub struct CardModal {
    card_id: String,
}

impl CardModal {
    /// Open the modal for a card. The card is looked up per commit, not
    /// captured here, so edits racing a delete degrade to no-ops.
    pub fn open(card_id: impl Into<String>) -> Self {
        Self {
            card_id: card_id.into(),
        }
    }

    pub fn card_id(&self) -> &str {
        &self.card_id
    }

    /// Commit the title field on blur.
    ///
    /// Returns the title now stored, so the caller can restore the input
    /// after a rejected (empty) edit; None when the card is gone.
    pub fn blur_title(
        &self,
        store: &mut EntityStore,
        view: &mut ViewSync,
        text: &str,
    ) -> Result<Option<String>> {
        let Some(card) = store.card(&self.card_id).cloned() else {
            return Ok(None);
        };
        let text = text.trim();
        if text.is_empty() {
            // Keep the stored title, tell the caller to restore it
            return Ok(Some(card.name));
        }
        let mut card = card;
        card.name = text.to_string();
        store.update_card(card.clone())?;
        view.sync_title(&card);
        Ok(Some(card.name))
    }

    /// Commit the description field on blur. Empty is a valid value here:
    /// clearing a description is an ordinary edit.
    pub fn blur_description(
        &self,
        store: &mut EntityStore,
        view: &mut ViewSync,
        text: &str,
        now: NaiveDateTime,
    ) -> Result<()> {
        self.commit(store, view, now, |card| card.description = text.to_string())
    }

    /// Commit the note field on blur; an empty note clears the note
    /// indicator on the card tile.
    pub fn blur_note(
        &self,
        store: &mut EntityStore,
        view: &mut ViewSync,
        text: &str,
        now: NaiveDateTime,
    ) -> Result<()> {
        self.commit(store, view, now, |card| card.note = text.to_string())
    }

    /// Toggle the card's completion checkbox.
    pub fn toggle_completed(
        &self,
        store: &mut EntityStore,
        view: &mut ViewSync,
        now: NaiveDateTime,
    ) -> Result<()> {
        if let Some(card) = store.toggle_card_completed(&self.card_id)? {
            view.sync_completion(&card, now);
        }
        Ok(())
    }

    /// The modal's delete button. Confirms, deletes, unmounts the widget
    /// and asks the shell to repair focus after the dialog closes.
    ///
    /// Returns whether the card was deleted (false on decline or when it
    /// was already gone).
    pub fn delete(
        &self,
        store: &mut EntityStore,
        view: &mut ViewSync,
        confirm: &mut dyn ConfirmDialog,
        focus: &mut dyn FocusRepair,
    ) -> Result<bool> {
        let Some(card) = store.card(&self.card_id) else {
            return Ok(false);
        };
        let prompt = format!("Delete card \"{}\"?", card.name);
        let confirmed = confirm.confirm(&prompt);
        focus.repair_focus();
        if !confirmed {
            return Ok(false);
        }
        store.delete_card(&self.card_id)?;
        view.unmount(&self.card_id);
        Ok(true)
    }

    /// Close the modal: commit a still-pending title, then replace the
    /// card's widget wholesale so any handle taken while the modal was
    /// open stops resolving.
    pub fn close(
        &self,
        store: &mut EntityStore,
        view: &mut ViewSync,
        pending_title: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<()> {
        if let Some(title) = pending_title {
            self.blur_title(store, view, title)?;
        }
        if let Some(card) = store.card(&self.card_id).cloned() {
            view.remount(&card, store.labels(), now);
        }
        Ok(())
    }

    fn commit(
        &self,
        store: &mut EntityStore,
        view: &mut ViewSync,
        now: NaiveDateTime,
        edit: impl FnOnce(&mut crate::models::Card),
    ) -> Result<()> {
        let Some(mut card) = store.card(&self.card_id).cloned() else {
            return Ok(());
        };
        edit(&mut card);
        store.update_card(card.clone())?;
        view.sync_card(&card, store.labels(), now);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CardDraft;
    use crate::test_utils::memory_store;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn modal_fixture() -> (EntityStore, ViewSync, CardModal, String) {
        let mut store = memory_store();
        let board = store.create_board(None).unwrap();
        let column = store.create_column("To Do", "#ccc", &board.id).unwrap();
        let card = store
            .create_card(&column.id, CardDraft::titled("Original"))
            .unwrap();
        let mut view = ViewSync::new();
        view.render_column(&column.id, &store.cards_of(&column.id), store.labels(), noon());
        let modal = CardModal::open(&card.id);
        (store, view, modal, card.id)
    }

    #[test]
    fn test_blur_title_commits_and_syncs() {
        let (mut store, mut view, modal, card_id) = modal_fixture();
        let stored = modal
            .blur_title(&mut store, &mut view, "Renamed")
            .unwrap();
        assert_eq!(stored.as_deref(), Some("Renamed"));
        assert_eq!(store.card(&card_id).unwrap().name, "Renamed");
        assert_eq!(view.widget(&card_id).unwrap().face.title, "Renamed");
    }

    #[test]
    fn test_blur_title_empty_keeps_stored_value() {
        let (mut store, mut view, modal, card_id) = modal_fixture();
        let stored = modal
            .blur_title(&mut store, &mut view, "   ")
            .unwrap();
        assert_eq!(stored.as_deref(), Some("Original"));
        assert_eq!(store.card(&card_id).unwrap().name, "Original");
    }

    #[test]
    fn test_commits_after_delete_are_silent() {
        let (mut store, mut view, modal, card_id) = modal_fixture();
        store.delete_card(&card_id).unwrap();
        view.unmount(&card_id);

        assert!(modal
            .blur_title(&mut store, &mut view, "Ghost edit")
            .unwrap()
            .is_none());
        modal
            .blur_note(&mut store, &mut view, "ghost note", noon())
            .unwrap();
        modal.toggle_completed(&mut store, &mut view, noon()).unwrap();
        assert!(store.card(&card_id).is_none());
    }

    #[test]
    fn test_blur_note_drives_indicator() {
        let (mut store, mut view, modal, card_id) = modal_fixture();
        modal
            .blur_note(&mut store, &mut view, "call vendor", noon())
            .unwrap();
        assert!(view.widget(&card_id).unwrap().face.has_note);

        modal.blur_note(&mut store, &mut view, "", noon()).unwrap();
        assert!(!view.widget(&card_id).unwrap().face.has_note);
    }

    #[test]
    fn test_delete_confirmed_unmounts_and_repairs_focus() {
        let (mut store, mut view, modal, card_id) = modal_fixture();
        let mut confirm = crate::shell::ScriptedConfirm::answering([true]);
        let mut focus = crate::shell::FocusRepairSpy::default();

        let deleted = modal
            .delete(&mut store, &mut view, &mut confirm, &mut focus)
            .unwrap();
        assert!(deleted);
        assert!(store.card(&card_id).is_none());
        assert!(view.widget(&card_id).is_none());
        assert_eq!(focus.calls, 1);
    }

    #[test]
    fn test_delete_declined_keeps_card() {
        let (mut store, mut view, modal, card_id) = modal_fixture();
        let mut confirm = crate::shell::ScriptedConfirm::answering([false]);
        let mut focus = crate::shell::FocusRepairSpy::default();

        let deleted = modal
            .delete(&mut store, &mut view, &mut confirm, &mut focus)
            .unwrap();
        assert!(!deleted);
        assert!(store.card(&card_id).is_some());
        // Focus is repaired even after a declined dialog
        assert_eq!(focus.calls, 1);
    }

    #[test]
    fn test_close_commits_pending_title_and_remounts() {
        let (mut store, mut view, modal, card_id) = modal_fixture();
        let old_handle = view.widget(&card_id).unwrap().handle;

        modal
            .close(&mut store, &mut view, Some("Final title"), noon())
            .unwrap();
        assert_eq!(store.card(&card_id).unwrap().name, "Final title");
        let widget = view.widget(&card_id).unwrap();
        assert_eq!(widget.face.title, "Final title");
        assert_ne!(widget.handle, old_handle);
    }

    #[test]
    fn test_toggle_completed_syncs_tile() {
        let (mut store, mut view, modal, card_id) = modal_fixture();
        modal.toggle_completed(&mut store, &mut view, noon()).unwrap();
        assert!(view.widget(&card_id).unwrap().face.completed);
    }
}
