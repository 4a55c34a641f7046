//! The due-date panel.
//!
//! Edits a card's due date (`YYYY-MM-DD`) and optional time (`HH:MM`).
//! Clearing writes empty strings rather than removing the fields, which
//! is how cleared dates appear in the persisted document.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::store::EntityStore;
use crate::view::ViewSync;
use crate::{Error, Result};

pub struct DatePanel {
    card_id: String,
}

impl DatePanel {
    pub fn open(card_id: impl Into<String>) -> Self {
        Self {
            card_id: card_id.into(),
        }
    }

    /// Commit the panel's inputs. Empty strings clear; anything else must
    /// parse, so a malformed input never reaches the snapshot.
    pub fn commit(
        &self,
        store: &mut EntityStore,
        view: &mut ViewSync,
        date: &str,
        time: &str,
        now: NaiveDateTime,
    ) -> Result<()> {
        if !date.is_empty() && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
            return Err(Error::InvalidInput(format!(
                "invalid due date {date:?}, expected YYYY-MM-DD"
            )));
        }
        if !time.is_empty() && NaiveTime::parse_from_str(time, "%H:%M").is_err() {
            return Err(Error::InvalidInput(format!(
                "invalid due time {time:?}, expected HH:MM"
            )));
        }
        // The time input is only enabled once a date is chosen
        if date.is_empty() && !time.is_empty() {
            return Err(Error::InvalidInput(
                "a due time requires a due date".to_string(),
            ));
        }
        let Some(mut card) = store.card(&self.card_id).cloned() else {
            return Ok(());
        };
        card.due_date = Some(date.to_string());
        card.due_time = Some(time.to_string());
        store.update_card(card.clone())?;
        view.sync_due(&card, now);
        Ok(())
    }

    /// The clear button: drop both date and time.
    pub fn clear(
        &self,
        store: &mut EntityStore,
        view: &mut ViewSync,
        now: NaiveDateTime,
    ) -> Result<()> {
        self.commit(store, view, "", "", now)
    }
}
