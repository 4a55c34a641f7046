//! View synchronizer.
//!
//! The UI keeps one widget per visible card. Rather than re-rendering a
//! whole column after every edit, store mutations are mirrored into the
//! mounted widgets through targeted patches: the widget for the touched
//! card is updated in place and everything else is left alone.
//!
//! Widgets are addressed by card id; each mount allocates an opaque
//! [`ViewHandle`] that is never reused, so a stale handle held across a
//! remount can be detected rather than silently patching the wrong
//! widget. Patching a card that is not mounted (its column is collapsed,
//! or another board is showing) is a silent no-op.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::models::{Card, DueStatus, Label};

/// Opaque identity of one mounted widget. Handles are unique for the
/// lifetime of the [`ViewSync`]; a remount of the same card yields a new
/// handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewHandle(u64);

/// Badge text for a card's due state, if it has one.
fn due_badge(card: &Card, now: NaiveDateTime) -> Option<String> {
    match card.due_status(now)? {
        DueStatus::Overdue { days } if days == 0 => Some("Overdue today".to_string()),
        DueStatus::Overdue { days } => Some(format!("Overdue by {days}d")),
        DueStatus::DueToday => Some("Due today".to_string()),
        DueStatus::Upcoming { days } => Some(format!("Due in {days}d")),
        DueStatus::Completed => Some("Done".to_string()),
    }
}

/// The rendered face of one card: everything the card tile displays.
#[derive(Debug, Clone, PartialEq)]
pub struct CardFace {
    pub title: String,
    pub completed: bool,
    /// `(done, total)`; hidden when the card has no subtasks.
    pub subtask_progress: Option<(usize, usize)>,
    pub due_badge: Option<String>,
    /// Colours of the attached labels, in attachment order.
    pub label_colours: Vec<String>,
    /// Ribbon colour class, present for ribboned priorities only.
    pub priority_ribbon: Option<String>,
    pub has_description: bool,
    pub has_note: bool,
}

impl CardFace {
    /// Project a card into its rendered face, resolving label colours
    /// against the global pool. Dangling label references (the pool entry
    /// was deleted between save and render) are skipped.
    pub fn project(card: &Card, labels: &[Label], now: NaiveDateTime) -> Self {
        let label_colours = card
            .labels
            .iter()
            .filter_map(|l| labels.iter().find(|pool| pool.id == l.id))
            .map(|l| l.color.clone())
            .collect();
        let (done, total) = card.subtask_progress();
        Self {
            title: card.name.clone(),
            completed: card.completed,
            subtask_progress: (total > 0).then_some((done, total)),
            due_badge: due_badge(card, now),
            label_colours,
            priority_ribbon: card
                .priority
                .is_ribboned()
                .then(|| card.priority.to_string().to_lowercase()),
            has_description: !card.description.trim().is_empty(),
            has_note: !card.note.trim().is_empty(),
        }
    }
}

/// A mounted card widget: its identity plus its rendered face.
#[derive(Debug, Clone)]
pub struct CardWidget {
    pub handle: ViewHandle,
    pub card_id: String,
    pub face: CardFace,
}

/// Mirror of the visible board: mounted widgets and their per-column
/// render order.
#[derive(Default)]
pub struct ViewSync {
    next_handle: u64,
    widgets: HashMap<String, CardWidget>,
    /// column id -> card ids in current visual order
    columns: HashMap<String, Vec<String>>,
}

impl ViewSync {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate(&mut self) -> ViewHandle {
        self.next_handle += 1;
        ViewHandle(self.next_handle)
    }

    /// The widget currently mounted for a card, if any.
    pub fn widget(&self, card_id: &str) -> Option<&CardWidget> {
        self.widgets.get(card_id)
    }

    /// Card ids of a column as currently drawn, top to bottom.
    pub fn rendered_order(&self, column_id: &str) -> &[String] {
        self.columns.get(column_id).map_or(&[], Vec::as_slice)
    }

    /// Render a column from scratch: every card gets a fresh widget (and
    /// a fresh handle), replacing whatever was mounted before.
    pub fn render_column(
        &mut self,
        column_id: &str,
        cards: &[&Card],
        labels: &[Label],
        now: NaiveDateTime,
    ) {
        for card_id in self.columns.remove(column_id).unwrap_or_default() {
            self.widgets.remove(&card_id);
        }
        let mut order = Vec::with_capacity(cards.len());
        for card in cards {
            let handle = self.allocate();
            self.widgets.insert(
                card.id.clone(),
                CardWidget {
                    handle,
                    card_id: card.id.clone(),
                    face: CardFace::project(card, labels, now),
                },
            );
            order.push(card.id.clone());
        }
        self.columns.insert(column_id.to_string(), order);
    }

    /// Mount one new widget at a position in a column, as after a create.
    pub fn mount_card(
        &mut self,
        column_id: &str,
        card: &Card,
        labels: &[Label],
        now: NaiveDateTime,
    ) -> ViewHandle {
        let handle = self.allocate();
        self.widgets.insert(
            card.id.clone(),
            CardWidget {
                handle,
                card_id: card.id.clone(),
                face: CardFace::project(card, labels, now),
            },
        );
        self.columns
            .entry(column_id.to_string())
            .or_default()
            .push(card.id.clone());
        handle
    }

    /// Remove a card's widget, as after a delete. Unknown ids are a
    /// silent no-op.
    pub fn unmount(&mut self, card_id: &str) {
        self.widgets.remove(card_id);
        for order in self.columns.values_mut() {
            order.retain(|id| id != card_id);
        }
    }

    /// Drop a whole column's widgets, as after a column delete.
    pub fn unmount_column(&mut self, column_id: &str) {
        for card_id in self.columns.remove(column_id).unwrap_or_default() {
            self.widgets.remove(&card_id);
        }
    }

    /// Patch the mounted widget for a card in place, keeping its handle.
    /// A card that is not mounted is a silent no-op.
    pub fn sync_card(&mut self, card: &Card, labels: &[Label], now: NaiveDateTime) {
        if let Some(widget) = self.widgets.get_mut(&card.id) {
            widget.face = CardFace::project(card, labels, now);
        }
    }

    /// Replace a card's widget wholesale, keeping its position but
    /// allocating a new handle, so stale handles held by closed modals
    /// stop resolving. Not-mounted cards are a silent no-op.
    pub fn remount(
        &mut self,
        card: &Card,
        labels: &[Label],
        now: NaiveDateTime,
    ) -> Option<ViewHandle> {
        if !self.widgets.contains_key(&card.id) {
            return None;
        }
        let handle = self.allocate();
        self.widgets.insert(
            card.id.clone(),
            CardWidget {
                handle,
                card_id: card.id.clone(),
                face: CardFace::project(card, labels, now),
            },
        );
        Some(handle)
    }

    // Targeted patches, one rendered fragment each. All are silent
    // no-ops on unmounted cards.

    pub fn sync_title(&mut self, card: &Card) {
        if let Some(widget) = self.widgets.get_mut(&card.id) {
            widget.face.title = card.name.clone();
        }
    }

    pub fn sync_completion(&mut self, card: &Card, now: NaiveDateTime) {
        if let Some(widget) = self.widgets.get_mut(&card.id) {
            widget.face.completed = card.completed;
            widget.face.due_badge = due_badge(card, now);
        }
    }

    pub fn sync_due(&mut self, card: &Card, now: NaiveDateTime) {
        if let Some(widget) = self.widgets.get_mut(&card.id) {
            widget.face.due_badge = due_badge(card, now);
        }
    }

    pub fn sync_priority(&mut self, card: &Card) {
        if let Some(widget) = self.widgets.get_mut(&card.id) {
            widget.face.priority_ribbon = card
                .priority
                .is_ribboned()
                .then(|| card.priority.to_string().to_lowercase());
        }
    }

    pub fn sync_subtasks(&mut self, card: &Card) {
        if let Some(widget) = self.widgets.get_mut(&card.id) {
            let (done, total) = card.subtask_progress();
            widget.face.subtask_progress = (total > 0).then_some((done, total));
        }
    }

    pub fn sync_label_bar(&mut self, card: &Card, labels: &[Label]) {
        if let Some(widget) = self.widgets.get_mut(&card.id) {
            widget.face.label_colours = card
                .labels
                .iter()
                .filter_map(|l| labels.iter().find(|pool| pool.id == l.id))
                .map(|l| l.color.clone())
                .collect();
        }
    }

    /// Drop every mounted widget, as when switching boards.
    pub fn clear(&mut self) {
        self.widgets.clear();
        self.columns.clear();
    }

    /// Move a mounted widget to a position in a (possibly different)
    /// column without re-projecting its face, mirroring a drop. The
    /// widget keeps its handle: the drag moved a live element, it did not
    /// recreate one.
    pub fn move_widget(&mut self, card_id: &str, target_column_id: &str, index: usize) {
        if !self.widgets.contains_key(card_id) {
            return;
        }
        for order in self.columns.values_mut() {
            order.retain(|id| id != card_id);
        }
        let order = self.columns.entry(target_column_id.to_string()).or_default();
        let index = index.min(order.len());
        order.insert(index, card_id.to_string());
    }

    /// Re-project every mounted widget's label bar against the current
    /// pool, after a label is renamed, recoloured or deleted.
    pub fn refresh_label_bars(&mut self, cards: &[Card], labels: &[Label]) {
        for card in cards {
            if let Some(widget) = self.widgets.get_mut(&card.id) {
                widget.face.label_colours = card
                    .labels
                    .iter()
                    .filter_map(|l| labels.iter().find(|pool| pool.id == l.id))
                    .map(|l| l.color.clone())
                    .collect();
            }
        }
    }
}
