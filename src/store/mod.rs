//! The entity store: the single owner of all board state.
//!
//! All boards, columns, cards and labels live here, and every mutation
//! goes through a store operation; no component edits the collections
//! directly. Each operation:
//!
//! - enforces the referential-integrity rules (a column's `card_ids`
//!   always resolve to exactly one card, cascades never leave orphans),
//! - ends with exactly one batched snapshot write through the
//!   [`SnapshotGateway`], regardless of how many collections it touched,
//! - rolls the in-memory state back if that write fails, so memory is
//!   never left inconsistent with the on-disk snapshot.
//!
//! Operations addressing an id that no longer exists (deleted by a prior
//! action racing an in-flight UI callback) are silent no-ops, never
//! errors.

use crate::models::{
    Board, Card, CardDraft, Column, Label, LabelRef, Snapshot, Subtask, Theme, generate_id,
};
use crate::storage::SnapshotGateway;
use crate::{Error, Result};
use chrono::Utc;

/// Owner of the mutable entity collections and their persistence.
pub struct EntityStore {
    boards: Vec<Board>,
    columns: Vec<Column>,
    cards: Vec<Card>,
    labels: Vec<Label>,
    /// Vestigial top-level arrays carried through load/save verbatim.
    subtasks_passthrough: Vec<serde_json::Value>,
    comments_passthrough: Vec<serde_json::Value>,
    theme: Option<Theme>,
    gateway: Box<dyn SnapshotGateway>,
}

impl EntityStore {
    /// Hydrate a store from the gateway's persisted snapshot.
    ///
    /// A read or parse failure inside the gateway degrades to the empty
    /// default snapshot, so loading never fails.
    pub fn load(gateway: Box<dyn SnapshotGateway>) -> Self {
        let snapshot = gateway.load();
        Self {
            boards: snapshot.boards,
            columns: snapshot.columns,
            cards: snapshot.cards,
            labels: snapshot.labels,
            subtasks_passthrough: snapshot.subtasks,
            comments_passthrough: snapshot.comments,
            theme: snapshot.theme,
            gateway,
        }
    }

    /// Build the full snapshot of the current in-memory state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            boards: self.boards.clone(),
            columns: self.columns.clone(),
            cards: self.cards.clone(),
            labels: self.labels.clone(),
            subtasks: self.subtasks_passthrough.clone(),
            comments: self.comments_passthrough.clone(),
            theme: self.theme,
        }
    }

    /// Where the gateway persists the snapshot (for display purposes).
    pub fn location(&self) -> String {
        self.gateway.location()
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.boards = snapshot.boards;
        self.columns = snapshot.columns;
        self.cards = snapshot.cards;
        self.labels = snapshot.labels;
        self.subtasks_passthrough = snapshot.subtasks;
        self.comments_passthrough = snapshot.comments;
        self.theme = snapshot.theme;
    }

    /// Run a mutation, then write the whole snapshot exactly once.
    ///
    /// If the write fails, the in-memory state is restored to match the
    /// last successful write before the error propagates.
    fn mutate<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let backup = self.snapshot();
        let out = op(self)?;
        let next = self.snapshot();
        if let Err(e) = self.gateway.save(&next) {
            self.restore(backup);
            return Err(e);
        }
        Ok(out)
    }

    // === Read access ===

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn board(&self, id: &str) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == id)
    }

    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn label(&self, id: &str) -> Option<&Label> {
        self.labels.iter().find(|l| l.id == id)
    }

    pub fn theme(&self) -> Option<Theme> {
        self.theme
    }

    /// Columns of a board, in the board's declared order.
    pub fn columns_of(&self, board_id: &str) -> Vec<&Column> {
        let Some(board) = self.board(board_id) else {
            return Vec::new();
        };
        board
            .column_ids
            .iter()
            .filter_map(|id| self.column(id))
            .collect()
    }

    /// Cards of a column, in the column's declared order.
    pub fn cards_of(&self, column_id: &str) -> Vec<&Card> {
        let Some(column) = self.column(column_id) else {
            return Vec::new();
        };
        column
            .card_ids
            .iter()
            .filter_map(|id| self.card(id))
            .collect()
    }

    /// The column whose `card_ids` contain the given card, if any.
    pub fn column_of_card(&self, card_id: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|c| c.card_ids.iter().any(|id| id == card_id))
    }

    // === Board operations ===

    /// Create a board with an empty column list.
    ///
    /// Without an explicit name the board is named `Board {n+1}`.
    pub fn create_board(&mut self, name: Option<&str>) -> Result<Board> {
        let name = match name {
            Some(n) if !n.trim().is_empty() => n.trim().to_string(),
            Some(_) => return Err(Error::InvalidInput("board name is empty".to_string())),
            None => format!("Board {}", self.boards.len() + 1),
        };
        self.mutate(|store| {
            let id = generate_id("board");
            if store.board(&id).is_some() {
                tracing::warn!(id, "duplicate board id detected, aborting insert");
                return Err(Error::DuplicateId(id));
            }
            let board = Board::new(id, name);
            store.boards.push(board.clone());
            Ok(board)
        })
    }

    /// Rename a board. An empty name is rejected so the caller can revert
    /// the input field; a missing id is a silent no-op.
    pub fn rename_board(&mut self, id: &str, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("board name is empty".to_string()));
        }
        if !self.boards.iter().any(|b| b.id == id) {
            return Ok(());
        }
        self.mutate(|store| {
            if let Some(board) = store.boards.iter_mut().find(|b| b.id == id) {
                board.name = name.to_string();
            }
            Ok(())
        })
    }

    /// Set or clear a board's background image path.
    ///
    /// Setting a new background resets the blur; clearing it also clears
    /// the derived title colour.
    pub fn set_board_background(&mut self, id: &str, path: Option<String>) -> Result<()> {
        if !self.boards.iter().any(|b| b.id == id) {
            return Ok(());
        }
        self.mutate(|store| {
            if let Some(board) = store.boards.iter_mut().find(|b| b.id == id) {
                board.blur_amount = 0;
                if path.is_none() {
                    board.title_color = None;
                }
                board.background = path;
            }
            Ok(())
        })
    }

    /// Set a board's background blur amount.
    pub fn set_board_blur(&mut self, id: &str, amount: u32) -> Result<()> {
        if !self.boards.iter().any(|b| b.id == id) {
            return Ok(());
        }
        self.mutate(|store| {
            if let Some(board) = store.boards.iter_mut().find(|b| b.id == id) {
                board.blur_amount = amount;
            }
            Ok(())
        })
    }

    /// Record the title colour derived from the background image.
    pub fn set_board_title_color(&mut self, id: &str, color: Option<String>) -> Result<()> {
        if !self.boards.iter().any(|b| b.id == id) {
            return Ok(());
        }
        self.mutate(|store| {
            if let Some(board) = store.boards.iter_mut().find(|b| b.id == id) {
                board.title_color = color;
            }
            Ok(())
        })
    }

    /// Delete a board and cascade to its columns, their cards and those
    /// cards' subtasks. The label pool is left untouched: labels are a
    /// global pool shared across boards.
    ///
    /// Returns false (no-op) when the board does not exist.
    pub fn delete_board(&mut self, id: &str) -> Result<bool> {
        if !self.boards.iter().any(|b| b.id == id) {
            return Ok(false);
        }
        let id = id.to_string();
        self.mutate(move |store| {
            store.boards.retain(|b| b.id != id);
            store.columns.retain(|c| c.board_id != id);
            store.cards.retain(|c| c.board_id != id);
            // Any column on another board never referenced these cards, so
            // card_ids need no sweep here; the columns went with the board.
            Ok(true)
        })
    }

    /// Delete every entity. Labels are included: this is the explicit
    /// "delete all data" action, not a cascade.
    pub fn delete_all(&mut self) -> Result<()> {
        self.mutate(|store| {
            store.boards.clear();
            store.columns.clear();
            store.cards.clear();
            store.labels.clear();
            store.subtasks_passthrough.clear();
            store.comments_passthrough.clear();
            Ok(())
        })
    }

    // === Column operations ===

    /// Create a column at the end of a board's column list.
    pub fn create_column(&mut self, name: &str, colour: &str, board_id: &str) -> Result<Column> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("column name is empty".to_string()));
        }
        if self.board(board_id).is_none() {
            return Err(Error::NotFound(board_id.to_string()));
        }
        let (name, colour, board_id) = (name.to_string(), colour.to_string(), board_id.to_string());
        self.mutate(move |store| {
            let column = Column::new(generate_id("column"), name, colour, board_id.clone());
            store.columns.push(column.clone());
            if let Some(board) = store.boards.iter_mut().find(|b| b.id == board_id) {
                board.column_ids.push(column.id.clone());
            }
            Ok(column)
        })
    }

    /// Rename a column. Empty names are rejected; a missing id is a
    /// silent no-op.
    pub fn rename_column(&mut self, id: &str, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("column name is empty".to_string()));
        }
        if !self.columns.iter().any(|c| c.id == id) {
            return Ok(());
        }
        self.mutate(|store| {
            if let Some(column) = store.columns.iter_mut().find(|c| c.id == id) {
                column.name = name.to_string();
            }
            Ok(())
        })
    }

    /// Replace a stored column matching by id; silent no-op if absent.
    pub fn update_column(&mut self, column: Column) -> Result<()> {
        if !self.columns.iter().any(|c| c.id == column.id) {
            return Ok(());
        }
        self.mutate(move |store| {
            if let Some(slot) = store.columns.iter_mut().find(|c| c.id == column.id) {
                *slot = column;
            }
            Ok(())
        })
    }

    /// Delete a column, cascading to its cards and their subtasks, and
    /// remove it from the owning board's column order. The owner is read
    /// off the column itself; `board_id` is only a cross-check and a
    /// mismatch is recorded as a warning.
    ///
    /// Returns false (no-op) when the column does not exist.
    pub fn delete_column(&mut self, board_id: &str, column_id: &str) -> Result<bool> {
        let Some(column) = self.columns.iter().find(|c| c.id == column_id) else {
            return Ok(false);
        };
        let owner_id = column.board_id.clone();
        if owner_id != board_id {
            tracing::warn!(board_id, column_id, "column is owned by a different board");
        }
        let column_id = column_id.to_string();
        self.mutate(move |store| {
            if let Some(board) = store.boards.iter_mut().find(|b| b.id == owner_id) {
                board.column_ids.retain(|id| *id != column_id);
            }
            let doomed: Vec<String> = store
                .columns
                .iter()
                .find(|c| c.id == column_id)
                .map(|c| c.card_ids.clone())
                .unwrap_or_default();
            store.cards.retain(|card| !doomed.contains(&card.id));
            store.columns.retain(|c| c.id != column_id);
            Ok(true)
        })
    }

    // === Card operations ===

    /// Create a card in a column, applying the draft over the documented
    /// defaults (not completed, empty subtasks/labels/note, null dates).
    ///
    /// A generated id colliding with an existing card aborts the insert.
    pub fn create_card(&mut self, column_id: &str, draft: CardDraft) -> Result<Card> {
        if draft.name.trim().is_empty() {
            return Err(Error::InvalidInput("card name is empty".to_string()));
        }
        let Some(column) = self.column(column_id) else {
            return Err(Error::NotFound(column_id.to_string()));
        };
        let board_id = column.board_id.clone();
        let column_id = column_id.to_string();
        self.mutate(move |store| {
            let id = generate_id("card");
            store.insert_card(id, board_id, column_id, draft)
        })
    }

    /// Insert a card with an explicit id; used by `create_card` and by
    /// tests exercising the duplicate-id guard.
    fn insert_card(
        &mut self,
        id: String,
        board_id: String,
        column_id: String,
        draft: CardDraft,
    ) -> Result<Card> {
        if self.cards.iter().any(|c| c.id == id) {
            tracing::warn!(id, "duplicate card id detected, aborting insert");
            return Err(Error::DuplicateId(id));
        }
        let mut card = Card::new(id, board_id);
        card.name = draft.name.trim().to_string();
        card.description = draft.description;
        card.note = draft.note;
        card.priority = draft.priority;
        card.difficulty = draft.difficulty;
        card.due_date = draft.due_date;
        card.due_time = draft.due_time;

        if let Some(column) = self.columns.iter_mut().find(|c| c.id == column_id) {
            column.card_ids.push(card.id.clone());
        }
        self.cards.push(card.clone());
        Ok(card)
    }

    /// Replace a stored card matching by id and stamp `updated_at`;
    /// silent no-op if the card was already deleted.
    pub fn update_card(&mut self, card: Card) -> Result<()> {
        if !self.cards.iter().any(|c| c.id == card.id) {
            return Ok(());
        }
        self.mutate(move |store| {
            if let Some(slot) = store.cards.iter_mut().find(|c| c.id == card.id) {
                let mut card = card;
                card.touch();
                *slot = card;
            }
            Ok(())
        })
    }

    /// Flip a card's completion state, stamping or clearing
    /// `completed_at`. Returns the updated card, or None if absent.
    pub fn toggle_card_completed(&mut self, card_id: &str) -> Result<Option<Card>> {
        if !self.cards.iter().any(|c| c.id == card_id) {
            return Ok(None);
        }
        let card_id = card_id.to_string();
        self.mutate(move |store| {
            let card = store.cards.iter_mut().find(|c| c.id == card_id);
            Ok(card.map(|card| {
                card.completed = !card.completed;
                card.completed_at = card.completed.then(Utc::now);
                card.touch();
                card.clone()
            }))
        })
    }

    /// Delete a card (and its embedded subtasks), removing it from its
    /// column's order. Returns false (no-op) when the card is absent.
    pub fn delete_card(&mut self, card_id: &str) -> Result<bool> {
        if !self.cards.iter().any(|c| c.id == card_id) {
            return Ok(false);
        }
        let card_id = card_id.to_string();
        self.mutate(move |store| {
            for column in &mut store.columns {
                column.card_ids.retain(|id| *id != card_id);
            }
            store.cards.retain(|c| c.id != card_id);
            Ok(true)
        })
    }

    // === Reorder completion ===

    /// Complete a drop gesture: remove the dragged card id from every
    /// column's order (same-column and cross-column moves are identical),
    /// then rebuild the target column's order to mirror the rendered
    /// visual order. The card's `board_id` follows the target column, so
    /// a cross-board move re-homes it for later board cascades.
    ///
    /// A dragged id found in no column is a recorded warning and a no-op,
    /// as is a missing target column. Returns whether the store changed.
    pub fn apply_drop(
        &mut self,
        dragged_id: &str,
        target_column_id: &str,
        rendered_order: &[String],
    ) -> Result<bool> {
        if self.column_of_card(dragged_id).is_none() {
            tracing::warn!(dragged_id, "dropped card belongs to no column, ignoring");
            return Ok(false);
        }
        if self.column(target_column_id).is_none() {
            tracing::warn!(target_column_id, "drop target column missing, ignoring");
            return Ok(false);
        }
        let dragged_id = dragged_id.to_string();
        let target_column_id = target_column_id.to_string();
        let rendered_order = rendered_order.to_vec();
        self.mutate(move |store| {
            for column in &mut store.columns {
                column.card_ids.retain(|id| *id != dragged_id);
            }
            let mut target_board_id = None;
            if let Some(target) = store.columns.iter_mut().find(|c| c.id == target_column_id) {
                target.card_ids = rendered_order;
                target_board_id = Some(target.board_id.clone());
            }
            if let Some(board_id) = target_board_id {
                if let Some(card) = store.cards.iter_mut().find(|c| c.id == dragged_id) {
                    card.board_id = board_id;
                }
            }
            Ok(true)
        })
    }

    // === Label operations ===

    /// Create a label in the global pool.
    pub fn create_label(&mut self, name: &str, color: &str) -> Result<Label> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("label name is empty".to_string()));
        }
        let (name, color) = (name.to_string(), color.to_string());
        self.mutate(move |store| {
            let label = Label::new(generate_id("label"), name, color);
            store.labels.push(label.clone());
            Ok(label)
        })
    }

    /// Update a label's name and colour; silent no-op if absent.
    pub fn update_label(&mut self, id: &str, name: &str, color: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("label name is empty".to_string()));
        }
        if !self.labels.iter().any(|l| l.id == id) {
            return Ok(());
        }
        let (name, color) = (name.to_string(), color.to_string());
        self.mutate(move |store| {
            if let Some(label) = store.labels.iter_mut().find(|l| l.id == id) {
                label.name = name;
                label.color = color;
            }
            Ok(())
        })
    }

    /// Delete a label from the pool and remove its reference from every
    /// card; the cards themselves are left intact.
    ///
    /// Returns false (no-op) when the label does not exist.
    pub fn delete_label(&mut self, id: &str) -> Result<bool> {
        if !self.labels.iter().any(|l| l.id == id) {
            return Ok(false);
        }
        let id = id.to_string();
        self.mutate(move |store| {
            store.labels.retain(|l| l.id != id);
            for card in &mut store.cards {
                card.labels.retain(|l| l.id != id);
            }
            Ok(true)
        })
    }

    /// Attach a label to a card. Attaching an already-attached label, or
    /// addressing a missing card/label, is a silent no-op.
    pub fn attach_label(&mut self, card_id: &str, label_id: &str) -> Result<()> {
        let resolvable = self.labels.iter().any(|l| l.id == label_id)
            && self.cards.iter().any(|c| c.id == card_id);
        if !resolvable {
            return Ok(());
        }
        let (card_id, label_id) = (card_id.to_string(), label_id.to_string());
        self.mutate(move |store| {
            if let Some(card) = store.cards.iter_mut().find(|c| c.id == card_id) {
                if !card.labels.iter().any(|l| l.id == label_id) {
                    card.labels.push(LabelRef { id: label_id });
                    card.touch();
                }
            }
            Ok(())
        })
    }

    /// Detach a label reference from a card; silent no-op if absent.
    pub fn detach_label(&mut self, card_id: &str, label_id: &str) -> Result<()> {
        let attached = self
            .card(card_id)
            .is_some_and(|card| card.has_label(label_id));
        if !attached {
            return Ok(());
        }
        let (card_id, label_id) = (card_id.to_string(), label_id.to_string());
        self.mutate(move |store| {
            if let Some(card) = store.cards.iter_mut().find(|c| c.id == card_id) {
                card.labels.retain(|l| l.id != label_id);
                card.touch();
            }
            Ok(())
        })
    }

    // === Subtask operations ===

    /// Append a subtask to a card's checklist. Empty text is rejected;
    /// a missing card is a silent no-op returning None.
    pub fn add_subtask(&mut self, card_id: &str, text: &str) -> Result<Option<Subtask>> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::InvalidInput("subtask text is empty".to_string()));
        }
        if !self.cards.iter().any(|c| c.id == card_id) {
            return Ok(None);
        }
        let (card_id, text) = (card_id.to_string(), text.to_string());
        self.mutate(move |store| {
            let card = store.cards.iter_mut().find(|c| c.id == card_id);
            Ok(card.map(|card| {
                let subtask = Subtask::new(generate_id("subtask"), text);
                card.subtasks.push(subtask.clone());
                card.touch();
                subtask
            }))
        })
    }

    /// Flip a subtask's checked state. Returns the updated card, or None
    /// when the card or subtask is absent.
    pub fn toggle_subtask(&mut self, card_id: &str, subtask_id: &str) -> Result<Option<Card>> {
        if !self.subtask_exists(card_id, subtask_id) {
            return Ok(None);
        }
        let (card_id, subtask_id) = (card_id.to_string(), subtask_id.to_string());
        self.mutate(move |store| {
            let card = store.cards.iter_mut().find(|c| c.id == card_id);
            Ok(card.map(|card| {
                if let Some(subtask) = card.subtasks.iter_mut().find(|s| s.id == subtask_id) {
                    subtask.completed = !subtask.completed;
                }
                card.touch();
                card.clone()
            }))
        })
    }

    /// Replace a subtask's text. Empty text is rejected so the editor
    /// keeps the old value.
    pub fn edit_subtask_text(&mut self, card_id: &str, subtask_id: &str, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::InvalidInput("subtask text is empty".to_string()));
        }
        if !self.subtask_exists(card_id, subtask_id) {
            return Ok(());
        }
        let (card_id, subtask_id, text) =
            (card_id.to_string(), subtask_id.to_string(), text.to_string());
        self.mutate(move |store| {
            if let Some(card) = store.cards.iter_mut().find(|c| c.id == card_id) {
                if let Some(subtask) = card.subtasks.iter_mut().find(|s| s.id == subtask_id) {
                    subtask.text = text;
                }
                card.touch();
            }
            Ok(())
        })
    }

    /// Remove a subtask from a card's checklist. Returns the updated
    /// card, or None when the card or subtask is absent.
    pub fn remove_subtask(&mut self, card_id: &str, subtask_id: &str) -> Result<Option<Card>> {
        if !self.subtask_exists(card_id, subtask_id) {
            return Ok(None);
        }
        let (card_id, subtask_id) = (card_id.to_string(), subtask_id.to_string());
        self.mutate(move |store| {
            let card = store.cards.iter_mut().find(|c| c.id == card_id);
            Ok(card.map(|card| {
                card.subtasks.retain(|s| s.id != subtask_id);
                card.touch();
                card.clone()
            }))
        })
    }

    fn subtask_exists(&self, card_id: &str, subtask_id: &str) -> bool {
        self.card(card_id)
            .is_some_and(|card| card.subtasks.iter().any(|s| s.id == subtask_id))
    }

    // === Theme ===

    /// Set the UI theme, persisted inside the snapshot.
    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.mutate(move |store| {
            store.theme = Some(theme);
            Ok(())
        })
    }
}
