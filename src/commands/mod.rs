//! Command implementations for the corkboard CLI.
//!
//! This module contains the business logic for each CLI command. The
//! argument definitions live in [`crate::cli`]; functions here take an
//! open [`EntityStore`] plus plain arguments, and return an [`Output`]
//! that renders as either human-readable text or JSON.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, NaiveTime};

use crate::models::{Card, CardDraft, DueStatus, Priority, Theme};
use crate::shell::{ConfirmDialog, FocusRepair, ImagePicker};
use crate::storage::{FileGateway, Prefs, resolve_data_dir};
use crate::store::EntityStore;
use crate::{Error, Result};

/// A command result renderable as human text or JSON.
pub struct Output {
    human: String,
    json: serde_json::Value,
}

impl Output {
    /// A plain status message.
    fn message(human: impl Into<String>) -> Self {
        let human = human.into();
        let json = serde_json::json!({ "message": human });
        Self { human, json }
    }

    /// A message with a structured payload for `--json` consumers.
    fn with_json(human: impl Into<String>, json: serde_json::Value) -> Self {
        Self {
            human: human.into(),
            json,
        }
    }

    /// Print to stdout in the selected format.
    pub fn print(&self, json_mode: bool) {
        if json_mode {
            println!("{}", self.json);
        } else {
            println!("{}", self.human);
        }
    }

    #[cfg(test)]
    pub fn human(&self) -> &str {
        &self.human
    }

    #[cfg(test)]
    pub fn json(&self) -> &serde_json::Value {
        &self.json
    }
}

/// Resolve the data directory (flag > env > platform dir) and open the
/// store over it.
pub fn open_store(data_dir: Option<&Path>) -> Result<(EntityStore, PathBuf)> {
    let dir = match data_dir {
        Some(dir) => dir.to_path_buf(),
        None => resolve_data_dir()?,
    };
    let store = EntityStore::load(Box::new(FileGateway::with_data_dir(&dir)));
    Ok((store, dir))
}

// === Boards ===

pub fn board_create(store: &mut EntityStore, name: Option<&str>) -> Result<Output> {
    let board = store.create_board(name)?;
    Ok(Output::with_json(
        format!("Created board \"{}\" ({})", board.name, board.id),
        serde_json::to_value(&board)?,
    ))
}

pub fn board_list(store: &EntityStore) -> Result<Output> {
    let boards = store.boards();
    let mut lines = Vec::with_capacity(boards.len());
    for board in boards {
        lines.push(format!(
            "{}  {} ({} columns)",
            board.id,
            board.name,
            board.column_ids.len()
        ));
    }
    let human = if lines.is_empty() {
        "No boards. Create one with `cork board create`.".to_string()
    } else {
        lines.join("\n")
    };
    Ok(Output::with_json(human, serde_json::to_value(boards)?))
}

pub fn board_show(store: &EntityStore, id: &str) -> Result<Output> {
    let board = store.board(id).ok_or_else(|| Error::NotFound(id.to_string()))?;
    let mut lines = vec![format!("{} ({})", board.name, board.id)];
    if let Some(background) = &board.background {
        lines.push(format!("  background: {background} (blur {}px)", board.blur_amount));
    }
    for column in store.columns_of(id) {
        lines.push(format!("  {}  {}", column.id, column.name));
        for card in store.cards_of(&column.id) {
            lines.push(format!("    {}", card_line(card)));
        }
    }
    let json = serde_json::json!({
        "board": board,
        "columns": store.columns_of(id),
    });
    Ok(Output::with_json(lines.join("\n"), json))
}

pub fn board_rename(store: &mut EntityStore, id: &str, name: &str) -> Result<Output> {
    require_board(store, id)?;
    store.rename_board(id, name)?;
    Ok(Output::message(format!("Renamed board {id} to \"{name}\"")))
}

/// Set, clear, or interactively pick a board background.
///
/// With no path and no `--clear`, the image picker runs and focus is
/// repaired afterwards; a cancelled pick changes nothing.
pub fn board_background(
    store: &mut EntityStore,
    id: &str,
    path: Option<PathBuf>,
    clear: bool,
    picker: &mut dyn ImagePicker,
    focus: &mut dyn FocusRepair,
) -> Result<Output> {
    require_board(store, id)?;
    if clear {
        store.set_board_background(id, None)?;
        return Ok(Output::message(format!("Cleared background of {id}")));
    }
    let path = match path {
        Some(path) => path,
        None => {
            let picked = picker.pick_image();
            focus.repair_focus();
            match picked {
                Some(path) => path,
                None => return Ok(Output::message("Cancelled.")),
            }
        }
    };
    let display = path.display().to_string();
    store.set_board_background(id, Some(display.clone()))?;
    Ok(Output::message(format!("Set background of {id} to {display}")))
}

pub fn board_blur(store: &mut EntityStore, id: &str, amount: u32) -> Result<Output> {
    require_board(store, id)?;
    store.set_board_blur(id, amount)?;
    Ok(Output::message(format!("Set blur of {id} to {amount}px")))
}

pub fn board_delete(
    store: &mut EntityStore,
    id: &str,
    confirm: &mut dyn ConfirmDialog,
) -> Result<Output> {
    let board = store.board(id).ok_or_else(|| Error::NotFound(id.to_string()))?;
    let prompt = format!(
        "Delete board \"{}\" and all of its columns and cards?",
        board.name
    );
    if !confirm.confirm(&prompt) {
        return Ok(Output::message("Cancelled."));
    }
    store.delete_board(id)?;
    Ok(Output::message(format!("Deleted board {id}")))
}

// === Columns ===

pub fn column_create(
    store: &mut EntityStore,
    board_id: &str,
    name: &str,
    colour: &str,
) -> Result<Output> {
    let column = store.create_column(name, colour, board_id)?;
    Ok(Output::with_json(
        format!("Created column \"{}\" ({})", column.name, column.id),
        serde_json::to_value(&column)?,
    ))
}

pub fn column_rename(store: &mut EntityStore, id: &str, name: &str) -> Result<Output> {
    if store.column(id).is_none() {
        return Err(Error::NotFound(id.to_string()));
    }
    store.rename_column(id, name)?;
    Ok(Output::message(format!("Renamed column {id} to \"{name}\"")))
}

pub fn column_delete(
    store: &mut EntityStore,
    id: &str,
    confirm: &mut dyn ConfirmDialog,
) -> Result<Output> {
    let column = store.column(id).ok_or_else(|| Error::NotFound(id.to_string()))?;
    let (board_id, name, count) = (
        column.board_id.clone(),
        column.name.clone(),
        column.card_ids.len(),
    );
    if !confirm.confirm(&format!("Delete column \"{name}\" and its {count} card(s)?")) {
        return Ok(Output::message("Cancelled."));
    }
    store.delete_column(&board_id, id)?;
    Ok(Output::message(format!("Deleted column {id}")))
}

// === Cards ===

#[allow(clippy::too_many_arguments)]
pub fn card_create(
    store: &mut EntityStore,
    column_id: &str,
    name: &str,
    description: &str,
    note: &str,
    priority: Option<&str>,
    difficulty: &str,
    due_date: Option<&str>,
    due_time: Option<&str>,
) -> Result<Output> {
    let priority = match priority {
        Some(p) => parse_priority(p)?,
        None => Priority::Unset,
    };
    if let Some(date) = due_date {
        validate_due_date(date)?;
    }
    if let Some(time) = due_time {
        validate_due_time(time)?;
    }
    let draft = CardDraft {
        name: name.to_string(),
        description: description.to_string(),
        note: note.to_string(),
        priority,
        difficulty: difficulty.to_string(),
        due_date: due_date.map(str::to_string),
        due_time: due_time.map(str::to_string),
    };
    let card = store.create_card(column_id, draft)?;
    Ok(Output::with_json(
        format!("Created card \"{}\" ({})", card.name, card.id),
        serde_json::to_value(&card)?,
    ))
}

pub fn card_show(store: &EntityStore, id: &str) -> Result<Output> {
    let card = store.card(id).ok_or_else(|| Error::NotFound(id.to_string()))?;
    let mut lines = vec![card_line(card), format!("  id: {}", card.id)];
    if let Some(column) = store.column_of_card(id) {
        lines.push(format!("  column: {} ({})", column.name, column.id));
    }
    if !card.description.is_empty() {
        lines.push(format!("  description: {}", card.description));
    }
    if !card.note.is_empty() {
        lines.push(format!("  note: {}", card.note));
    }
    if card.priority != Priority::Unset {
        lines.push(format!("  priority: {}", card.priority));
    }
    if let Some(due) = card.effective_due() {
        lines.push(format!("  due: {}", due.format("%Y-%m-%d %H:%M")));
    }
    for label_ref in &card.labels {
        if let Some(label) = store.label(&label_ref.id) {
            lines.push(format!("  label: {} ({})", label.name, label.id));
        }
    }
    for subtask in &card.subtasks {
        let mark = if subtask.completed { "x" } else { " " };
        lines.push(format!("  [{mark}] {}  {}", subtask.id, subtask.text));
    }
    Ok(Output::with_json(lines.join("\n"), serde_json::to_value(card)?))
}

pub fn card_rename(store: &mut EntityStore, id: &str, name: &str) -> Result<Output> {
    if name.trim().is_empty() {
        return Err(Error::InvalidInput("card name is empty".to_string()));
    }
    let mut card = require_card(store, id)?;
    card.name = name.trim().to_string();
    store.update_card(card)?;
    Ok(Output::message(format!("Renamed card {id} to \"{name}\"")))
}

pub fn card_describe(store: &mut EntityStore, id: &str, text: &str) -> Result<Output> {
    let mut card = require_card(store, id)?;
    card.description = text.to_string();
    store.update_card(card)?;
    Ok(Output::message(format!("Updated description of {id}")))
}

pub fn card_note(store: &mut EntityStore, id: &str, text: &str) -> Result<Output> {
    let mut card = require_card(store, id)?;
    card.note = text.to_string();
    store.update_card(card)?;
    Ok(Output::message(format!("Updated note of {id}")))
}

pub fn card_toggle(store: &mut EntityStore, id: &str) -> Result<Output> {
    match store.toggle_card_completed(id)? {
        Some(card) if card.completed => {
            Ok(Output::message(format!("Marked {id} completed")))
        }
        Some(_) => Ok(Output::message(format!("Marked {id} not completed"))),
        None => Err(Error::NotFound(id.to_string())),
    }
}

pub fn card_priority(store: &mut EntityStore, id: &str, priority: &str) -> Result<Output> {
    let priority = parse_priority(priority)?;
    let mut card = require_card(store, id)?;
    card.priority = priority;
    store.update_card(card)?;
    Ok(Output::message(format!("Set priority of {id} to {priority}")))
}

pub fn card_due(
    store: &mut EntityStore,
    id: &str,
    date: Option<&str>,
    time: Option<&str>,
    clear: bool,
) -> Result<Output> {
    let mut card = require_card(store, id)?;
    if clear {
        card.due_date = Some(String::new());
        card.due_time = Some(String::new());
        store.update_card(card)?;
        return Ok(Output::message(format!("Cleared due date of {id}")));
    }
    let date = date.ok_or_else(|| {
        Error::InvalidInput("a due date (or --clear) is required".to_string())
    })?;
    validate_due_date(date)?;
    if let Some(time) = time {
        validate_due_time(time)?;
    }
    card.due_date = Some(date.to_string());
    card.due_time = Some(time.unwrap_or("").to_string());
    store.update_card(card)?;
    Ok(Output::message(format!("Set due date of {id} to {date}")))
}

/// Move a card into a column at a position, rebuilding the target order
/// the same way a drop gesture would.
pub fn card_move(
    store: &mut EntityStore,
    id: &str,
    column_id: &str,
    position: Option<usize>,
) -> Result<Output> {
    require_card(store, id)?;
    let target = store
        .column(column_id)
        .ok_or_else(|| Error::NotFound(column_id.to_string()))?;

    let mut order: Vec<String> = target
        .card_ids
        .iter()
        .filter(|card_id| *card_id != id)
        .cloned()
        .collect();
    let position = position.unwrap_or(order.len()).min(order.len());
    order.insert(position, id.to_string());

    if !store.apply_drop(id, column_id, &order)? {
        return Ok(Output::message(format!(
            "Card {id} is not in any column; nothing moved"
        )));
    }
    Ok(Output::message(format!(
        "Moved {id} to {column_id} at position {position}"
    )))
}

pub fn card_delete(
    store: &mut EntityStore,
    id: &str,
    confirm: &mut dyn ConfirmDialog,
) -> Result<Output> {
    let card = require_card(store, id)?;
    if !confirm.confirm(&format!("Delete card \"{}\"?", card.name)) {
        return Ok(Output::message("Cancelled."));
    }
    store.delete_card(id)?;
    Ok(Output::message(format!("Deleted card {id}")))
}

// === Labels ===

pub fn label_create(store: &mut EntityStore, name: &str, colour: &str) -> Result<Output> {
    let label = store.create_label(name, colour)?;
    Ok(Output::with_json(
        format!("Created label \"{}\" ({})", label.name, label.id),
        serde_json::to_value(&label)?,
    ))
}

pub fn label_list(store: &EntityStore) -> Result<Output> {
    let labels = store.labels();
    let human = if labels.is_empty() {
        "No labels.".to_string()
    } else {
        labels
            .iter()
            .map(|l| format!("{}  {} {}", l.id, l.name, l.color))
            .collect::<Vec<_>>()
            .join("\n")
    };
    Ok(Output::with_json(human, serde_json::to_value(labels)?))
}

pub fn label_edit(
    store: &mut EntityStore,
    id: &str,
    name: Option<&str>,
    colour: Option<&str>,
) -> Result<Output> {
    let label = store.label(id).ok_or_else(|| Error::NotFound(id.to_string()))?;
    let name = name.unwrap_or(&label.name).to_string();
    let colour = colour.unwrap_or(&label.color).to_string();
    store.update_label(id, &name, &colour)?;
    Ok(Output::message(format!("Updated label {id}")))
}

pub fn label_delete(
    store: &mut EntityStore,
    id: &str,
    confirm: &mut dyn ConfirmDialog,
) -> Result<Output> {
    let label = store.label(id).ok_or_else(|| Error::NotFound(id.to_string()))?;
    let prompt = format!(
        "Delete label \"{}\"? It will be removed from all cards.",
        label.name
    );
    if !confirm.confirm(&prompt) {
        return Ok(Output::message("Cancelled."));
    }
    store.delete_label(id)?;
    Ok(Output::message(format!("Deleted label {id}")))
}

pub fn label_attach(store: &mut EntityStore, card_id: &str, label_id: &str) -> Result<Output> {
    require_card(store, card_id)?;
    if store.label(label_id).is_none() {
        return Err(Error::NotFound(label_id.to_string()));
    }
    store.attach_label(card_id, label_id)?;
    Ok(Output::message(format!("Attached {label_id} to {card_id}")))
}

pub fn label_detach(store: &mut EntityStore, card_id: &str, label_id: &str) -> Result<Output> {
    require_card(store, card_id)?;
    store.detach_label(card_id, label_id)?;
    Ok(Output::message(format!("Detached {label_id} from {card_id}")))
}

// === Subtasks ===

pub fn subtask_add(store: &mut EntityStore, card_id: &str, text: &str) -> Result<Output> {
    require_card(store, card_id)?;
    let subtask = store
        .add_subtask(card_id, text)?
        .ok_or_else(|| Error::NotFound(card_id.to_string()))?;
    Ok(Output::with_json(
        format!("Added subtask {} to {card_id}", subtask.id),
        serde_json::to_value(&subtask)?,
    ))
}

pub fn subtask_toggle(store: &mut EntityStore, card_id: &str, subtask_id: &str) -> Result<Output> {
    match store.toggle_subtask(card_id, subtask_id)? {
        Some(card) => {
            let (done, total) = card.subtask_progress();
            Ok(Output::message(format!(
                "Toggled {subtask_id} ({done}/{total} done)"
            )))
        }
        None => Err(Error::NotFound(subtask_id.to_string())),
    }
}

pub fn subtask_edit(
    store: &mut EntityStore,
    card_id: &str,
    subtask_id: &str,
    text: &str,
) -> Result<Output> {
    require_card(store, card_id)?;
    store.edit_subtask_text(card_id, subtask_id, text)?;
    Ok(Output::message(format!("Updated subtask {subtask_id}")))
}

pub fn subtask_remove(
    store: &mut EntityStore,
    card_id: &str,
    subtask_id: &str,
) -> Result<Output> {
    match store.remove_subtask(card_id, subtask_id)? {
        Some(_) => Ok(Output::message(format!("Removed subtask {subtask_id}"))),
        None => Err(Error::NotFound(subtask_id.to_string())),
    }
}

// === Theme, prefs, maintenance ===

pub fn theme_set(store: &mut EntityStore, theme: &str) -> Result<Output> {
    let theme = match theme.to_lowercase().as_str() {
        "light" => Theme::Light,
        "dark" => Theme::Dark,
        other => {
            return Err(Error::InvalidInput(format!(
                "unknown theme {other:?}, expected \"light\" or \"dark\""
            )));
        }
    };
    store.set_theme(theme)?;
    let name = match theme {
        Theme::Light => "light",
        Theme::Dark => "dark",
    };
    Ok(Output::message(format!("Theme set to {name}")))
}

pub fn accent(data_dir: &Path, colour: Option<&str>) -> Result<Output> {
    let mut prefs = Prefs::load(data_dir);
    match colour {
        Some(colour) => {
            prefs.accent_colour = Some(colour.to_string());
            prefs.save(data_dir)?;
            Ok(Output::message(format!("Accent colour set to {colour}")))
        }
        None => match prefs.accent_colour {
            Some(colour) => Ok(Output::with_json(
                colour.clone(),
                serde_json::json!({ "accentColour": colour }),
            )),
            None => Ok(Output::message("No accent colour set.")),
        },
    }
}

pub fn wipe(store: &mut EntityStore, confirm: &mut dyn ConfirmDialog) -> Result<Output> {
    if !confirm.confirm("Delete ALL boards, columns, cards and labels?") {
        return Ok(Output::message("Cancelled."));
    }
    store.delete_all()?;
    Ok(Output::message("All data deleted."))
}

pub fn data_path(store: &EntityStore) -> Result<Output> {
    let location = store.location();
    Ok(Output::with_json(
        location.clone(),
        serde_json::json!({ "path": location }),
    ))
}

// === Helpers ===

fn card_line(card: &Card) -> String {
    let mark = if card.completed { "x" } else { " " };
    let mut line = format!("[{mark}] {}", card.name);
    let (done, total) = card.subtask_progress();
    if total > 0 {
        line.push_str(&format!(" ({done}/{total})"));
    }
    if card.priority.is_ribboned() {
        line.push_str(&format!(" [{}]", card.priority));
    }
    if let Some(status) = card.due_status(Local::now().naive_local()) {
        let text = match status {
            DueStatus::Overdue { days: 0 } => "overdue".to_string(),
            DueStatus::Overdue { days } => format!("overdue {days}d"),
            DueStatus::DueToday => "due today".to_string(),
            DueStatus::Upcoming { days } => format!("due in {days}d"),
            DueStatus::Completed => "done".to_string(),
        };
        line.push_str(&format!(" ({text})"));
    }
    line
}

fn require_board(store: &EntityStore, id: &str) -> Result<()> {
    store
        .board(id)
        .map(|_| ())
        .ok_or_else(|| Error::NotFound(id.to_string()))
}

fn require_card(store: &EntityStore, id: &str) -> Result<Card> {
    store
        .card(id)
        .cloned()
        .ok_or_else(|| Error::NotFound(id.to_string()))
}

fn parse_priority(s: &str) -> Result<Priority> {
    Priority::parse(s)
        .ok_or_else(|| Error::InvalidInput(format!("unknown priority {s:?}")))
}

fn validate_due_date(date: &str) -> Result<()> {
    if date.is_empty() || NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok() {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "invalid due date {date:?}, expected YYYY-MM-DD"
        )))
    }
}

fn validate_due_time(time: &str) -> Result<()> {
    if time.is_empty() || NaiveTime::parse_from_str(time, "%H:%M").is_ok() {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "invalid due time {time:?}, expected HH:MM"
        )))
    }
}
