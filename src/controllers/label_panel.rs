//! The label panel.
//!
//! One panel, three views: the default checkbox list of the global pool,
//! a create form, and an edit form for one label. Checkbox toggles write
//! through immediately; create and edit return to the default view on
//! submit. Pool edits fan out to every mounted card tile, since labels
//! are shared across boards.

use crate::Result;
use crate::models::{Card, Label};
use crate::shell::{ConfirmDialog, FocusRepair};
use crate::store::EntityStore;
use crate::view::ViewSync;

/// Which of the panel's three views is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelView {
    Default,
    Create,
    Edit { label_id: String },
}

pub struct LabelPanel {
    card_id: String,
    view: PanelView,
    filter: String,
}

impl LabelPanel {
    pub fn open(card_id: impl Into<String>) -> Self {
        Self {
            card_id: card_id.into(),
            view: PanelView::Default,
            filter: String::new(),
        }
    }

    pub fn view(&self) -> &PanelView {
        &self.view
    }

    /// Filter text for the default view's checkbox list.
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    /// Pool labels matching the filter, case-insensitive, in pool order.
    pub fn visible_labels<'a>(&self, store: &'a EntityStore) -> Vec<&'a Label> {
        let needle = self.filter.to_lowercase();
        store
            .labels()
            .iter()
            .filter(|l| l.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn show_create(&mut self) {
        self.view = PanelView::Create;
    }

    /// Switch to the edit form for a pool label; stays on the current
    /// view if the label has meanwhile been deleted.
    pub fn show_edit(&mut self, store: &EntityStore, label_id: &str) {
        if store.label(label_id).is_some() {
            self.view = PanelView::Edit {
                label_id: label_id.to_string(),
            };
        }
    }

    pub fn back(&mut self) {
        self.view = PanelView::Default;
    }

    /// Checkbox toggle: attach if unattached, detach if attached.
    pub fn toggle(
        &self,
        store: &mut EntityStore,
        view: &mut ViewSync,
        label_id: &str,
    ) -> Result<()> {
        let attached = store
            .card(&self.card_id)
            .is_some_and(|card| card.has_label(label_id));
        if attached {
            store.detach_label(&self.card_id, label_id)?;
        } else {
            store.attach_label(&self.card_id, label_id)?;
        }
        if let Some(card) = store.card(&self.card_id).cloned() {
            view.sync_label_bar(&card, store.labels());
        }
        Ok(())
    }

    /// Submit the create form: add the label to the pool and return to
    /// the default view, where it appears unchecked.
    pub fn submit_create(
        &mut self,
        store: &mut EntityStore,
        name: &str,
        color: &str,
    ) -> Result<Label> {
        let label = store.create_label(name, color)?;
        self.view = PanelView::Default;
        Ok(label)
    }

    /// Submit the edit form: rename/recolour the label and repaint every
    /// mounted tile referencing it.
    pub fn submit_edit(
        &mut self,
        store: &mut EntityStore,
        view: &mut ViewSync,
        name: &str,
        color: &str,
    ) -> Result<()> {
        let PanelView::Edit { label_id } = self.view.clone() else {
            return Ok(());
        };
        store.update_label(&label_id, name, color)?;
        let cards: Vec<Card> = store.snapshot().cards;
        view.refresh_label_bars(&cards, store.labels());
        self.view = PanelView::Default;
        Ok(())
    }

    /// The edit form's delete button. Runs the confirmation first; a
    /// decline leaves the pool and the view untouched. Focus is repaired
    /// either way, since the dialog stole it.
    pub fn delete(
        &mut self,
        store: &mut EntityStore,
        view: &mut ViewSync,
        confirm: &mut dyn ConfirmDialog,
        focus: &mut dyn FocusRepair,
    ) -> Result<bool> {
        let PanelView::Edit { label_id } = self.view.clone() else {
            return Ok(false);
        };
        let name = store.label(&label_id).map(|l| l.name.clone());
        let Some(name) = name else {
            self.view = PanelView::Default;
            return Ok(false);
        };
        let confirmed = confirm.confirm(&format!(
            "Delete label \"{name}\"? It will be removed from all cards."
        ));
        focus.repair_focus();
        if !confirmed {
            return Ok(false);
        }
        store.delete_label(&label_id)?;
        let cards: Vec<Card> = store.snapshot().cards;
        view.refresh_label_bars(&cards, store.labels());
        self.view = PanelView::Default;
        Ok(true)
    }
}
