//! The priority dropdown.
//!
//! Selecting an entry writes immediately; there is no pending state to
//! commit on close.

use crate::Result;
use crate::models::Priority;
use crate::store::EntityStore;
use crate::view::ViewSync;

pub struct PriorityMenu {
    card_id: String,
}

impl PriorityMenu {
    pub fn open(card_id: impl Into<String>) -> Self {
        Self {
            card_id: card_id.into(),
        }
    }

    /// Apply the selected priority and update the card's ribbon.
    pub fn select(
        &self,
        store: &mut EntityStore,
        view: &mut ViewSync,
        priority: Priority,
    ) -> Result<()> {
        let Some(mut card) = store.card(&self.card_id).cloned() else {
            return Ok(());
        };
        card.priority = priority;
        store.update_card(card.clone())?;
        view.sync_priority(&card);
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

    #[test]
    fn test_select_updates_ribbon() {
        let mut store = memory_store();
        let board = store.create_board(None).unwrap();
        let column = store.create_column("To Do", "#ccc", &board.id).unwrap();
        let card = store
            .create_card(&column.id, CardDraft::titled("Ranked"))
            .unwrap();
        let mut view = ViewSync::new();
        view.render_column(&column.id, &store.cards_of(&column.id), store.labels(), noon());

        let menu = PriorityMenu::open(&card.id);
        menu.select(&mut store, &mut view, Priority::High).unwrap();
        assert_eq!(store.card(&card.id).unwrap().priority, Priority::High);
        assert_eq!(
            view.widget(&card.id).unwrap().face.priority_ribbon.as_deref(),
            Some("high")
        );

        // Explicit None drops the ribbon
        menu.select(&mut store, &mut view, Priority::None).unwrap();
        assert!(view.widget(&card.id).unwrap().face.priority_ribbon.is_none());
    }
}
