//! Data models for corkboard entities.
//!
//! This module defines the core data structures:
//! - `Board` - Top-level container of an ordered list of columns
//! - `Column` - Ordered list of cards within a board
//! - `Card` - The atomic task unit; carries metadata, labels, subtasks
//! - `Label` - A named, coloured tag referenced by zero or more cards
//! - `Subtask` - An embedded checklist item owned by exactly one card
//! - `Snapshot` - The complete serialized state, persisted as one unit
//!
//! Field names serialize in camelCase to stay compatible with the on-disk
//! `data.json` layout.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Generate a unique entity id with the given prefix (e.g., "card-<uuid>").
///
/// Ids are globally unique, generated at creation, and never reused.
pub fn generate_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

/// Card priority level.
///
/// `Unset` is the creation default and serializes as the empty string;
/// `None` is the explicit "no priority" choice from the priority dropdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
    None,
    #[default]
    #[serde(rename = "")]
    Unset,
}

impl Priority {
    /// Whether the priority ribbon is shown on the card tile.
    pub fn is_ribboned(&self) -> bool {
        matches!(self, Priority::High | Priority::Medium | Priority::Low)
    }

    /// Parse a priority from user input (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            "none" => Some(Self::None),
            "" => Some(Self::Unset),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::None => "None",
            Self::Unset => "",
        };
        write!(f, "{}", s)
    }
}

/// UI theme, persisted inside the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    #[serde(rename = "theme-light")]
    Light,
    #[serde(rename = "theme-dark")]
    Dark,
}

/// Top-level container of an ordered list of columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Unique identifier (e.g., "board-<uuid>")
    pub id: String,

    /// Board name
    pub name: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Ordered list of column ids owned by this board
    #[serde(default)]
    pub column_ids: Vec<String>,

    /// Absolute path to the background image, if one is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    /// Background blur in pixels
    #[serde(default)]
    pub blur_amount: u32,

    /// Title colour derived from the background image brightness
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_color: Option<String>,
}

impl Board {
    /// Create a new board with the given id and name.
    pub fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            created_at: Utc::now(),
            column_ids: Vec::new(),
            background: None,
            blur_amount: 0,
            title_color: None,
        }
    }
}

/// Ordered list of cards within a board.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Unique identifier (e.g., "column-<uuid>")
    pub id: String,

    /// Column name
    pub name: String,

    /// Header accent colour
    pub colour: String,

    /// Ordered list of card ids owned by this column
    #[serde(default)]
    pub card_ids: Vec<String>,

    /// Back-reference to the owning board
    pub board_id: String,
}

impl Column {
    /// Create a new column with the given id, name, colour and board.
    pub fn new(id: String, name: String, colour: String, board_id: String) -> Self {
        Self {
            id,
            name,
            colour,
            card_ids: Vec::new(),
            board_id,
        }
    }
}

/// A reference from a card to a label in the global pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRef {
    /// Id of the referenced label
    pub id: String,
}

/// An embedded checklist item owned by exactly one card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subtask {
    /// Unique identifier (e.g., "subtask-<uuid>")
    pub id: String,

    /// Subtask text
    pub text: String,

    /// Whether the subtask is checked off
    #[serde(default)]
    pub completed: bool,
}

impl Subtask {
    /// Create a new, unchecked subtask.
    pub fn new(id: String, text: String) -> Self {
        Self {
            id,
            text,
            completed: false,
        }
    }
}

/// Due-date classification used for the card's due badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    /// Past the effective due moment
    Overdue { days: i64 },
    /// Due on the current calendar day
    DueToday,
    /// Due in the future
    Upcoming { days: i64 },
    /// The card is marked complete; the deadline no longer applies
    Completed,
}

/// The atomic task unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Unique identifier (e.g., "card-<uuid>")
    pub id: String,

    /// Card title
    #[serde(default)]
    pub name: String,

    /// Longer description, committed on blur
    #[serde(default)]
    pub description: String,

    /// Free-text note, committed on blur
    #[serde(default)]
    pub note: String,

    /// Whether the card is marked complete
    #[serde(default)]
    pub completed: bool,

    /// When the card was marked complete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    /// Priority level
    #[serde(default)]
    pub priority: Priority,

    /// Free-form difficulty marker
    #[serde(default)]
    pub difficulty: String,

    /// Due date as "YYYY-MM-DD", if set
    #[serde(default)]
    pub due_date: Option<String>,

    /// Due time as "HH:MM"; a date without a time is due at 23:59
    #[serde(default)]
    pub due_time: Option<String>,

    /// Embedded ordered checklist
    #[serde(default)]
    pub subtasks: Vec<Subtask>,

    /// References into the global label pool, in attach order
    #[serde(default)]
    pub labels: Vec<LabelRef>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// Back-reference to the owning board
    pub board_id: String,
}

impl Card {
    /// Create a new card with default fields.
    ///
    /// Defaults: not completed, empty subtasks/labels/note, null dates,
    /// unset priority.
    pub fn new(id: String, board_id: String) -> Self {
        Self {
            id,
            name: String::new(),
            description: String::new(),
            note: String::new(),
            completed: false,
            completed_at: None,
            priority: Priority::default(),
            difficulty: String::new(),
            due_date: None,
            due_time: None,
            subtasks: Vec::new(),
            labels: Vec::new(),
            created_at: Utc::now(),
            updated_at: None,
            board_id,
        }
    }

    /// Stamp the last-update timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }

    /// Whether this card references the given label.
    pub fn has_label(&self, label_id: &str) -> bool {
        self.labels.iter().any(|l| l.id == label_id)
    }

    /// Subtask progress as (done, total).
    pub fn subtask_progress(&self) -> (usize, usize) {
        let done = self.subtasks.iter().filter(|s| s.completed).count();
        (done, self.subtasks.len())
    }

    /// The moment this card is effectively due, if a due date is set.
    ///
    /// A card with a date but no time is treated as due at 23:59.
    pub fn effective_due(&self) -> Option<NaiveDateTime> {
        let date = self.due_date.as_deref().filter(|d| !d.is_empty())?;
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
        let time = self
            .due_time
            .as_deref()
            .filter(|t| !t.is_empty())
            .and_then(|t| NaiveTime::parse_from_str(t, "%H:%M").ok())
            .unwrap_or_else(|| NaiveTime::from_hms_opt(23, 59, 0).unwrap());
        Some(date.and_time(time))
    }

    /// Classify the due date relative to `now` for the due badge.
    ///
    /// Returns `None` when no (parseable) due date is set.
    pub fn due_status(&self, now: NaiveDateTime) -> Option<DueStatus> {
        let due = self.effective_due()?;
        if self.completed {
            Some(DueStatus::Completed)
        } else if now > due {
            let days = (now - due).num_days();
            Some(DueStatus::Overdue { days })
        } else if due.date() == now.date() {
            Some(DueStatus::DueToday)
        } else {
            // Round partial days up, matching "in N days" on the badge
            let delta = due - now;
            let days = if delta.num_seconds() % 86_400 == 0 {
                delta.num_days()
            } else {
                delta.num_days() + 1
            };
            Some(DueStatus::Upcoming { days })
        }
    }
}

/// A named, coloured tag referenced by zero or more cards.
///
/// Labels live in a single global pool shared across boards; deleting a
/// board never deletes labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    /// Unique identifier (e.g., "label-<uuid>")
    pub id: String,

    /// Label name
    pub name: String,

    /// Swatch colour
    pub color: String,
}

impl Label {
    /// Create a new label.
    pub fn new(id: String, name: String, color: String) -> Self {
        Self { id, name, color }
    }
}

/// Field overrides applied on top of `Card::new` defaults at creation.
#[derive(Debug, Clone, Default)]
pub struct CardDraft {
    pub name: String,
    pub description: String,
    pub note: String,
    pub priority: Priority,
    pub difficulty: String,
    pub due_date: Option<String>,
    pub due_time: Option<String>,
}

impl CardDraft {
    /// A draft carrying only a title, the common creation path.
    pub fn titled(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// The complete serialized state of all entities, persisted as one unit.
///
/// All top-level arrays are order-preserving. `subtasks` and `comments`
/// are vestigial arrays from the original on-disk layout, carried through
/// load/save verbatim; live subtasks are embedded in their cards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub boards: Vec<Board>,

    #[serde(default)]
    pub columns: Vec<Column>,

    #[serde(default)]
    pub cards: Vec<Card>,

    #[serde(default)]
    pub labels: Vec<Label>,

    #[serde(default)]
    pub subtasks: Vec<serde_json::Value>,

    #[serde(default)]
    pub comments: Vec<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}
