//! Seams to the desktop shell.
//!
//! The core never talks to the windowing system directly; destructive
//! confirmations, native file pickers and focus repair all go through
//! these traits so the CLI, a future GUI shell, and tests can each plug
//! in their own implementation.

use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Confirmation step guarding destructive actions (board, column, card
/// and label deletes, and delete-all).
pub trait ConfirmDialog {
    /// Present `message` and return whether the user confirmed.
    fn confirm(&mut self, message: &str) -> bool;
}

/// Native image picker for board backgrounds.
///
/// Returns the chosen path, or None when the user cancels. A second
/// request while one is open is the shell's problem, not the core's.
pub trait ImagePicker {
    fn pick_image(&mut self) -> Option<PathBuf>;
}

/// Signal asking the shell to restore keyboard focus to the window.
///
/// Native dialogs can leave the window unfocused on some platforms, so
/// callers fire this after a picker or confirm closes.
pub trait FocusRepair {
    fn repair_focus(&mut self);
}

/// Answers every confirmation the same way; backs the CLI's `--yes` flag.
pub struct AutoConfirm {
    pub answer: bool,
}

impl ConfirmDialog for AutoConfirm {
    fn confirm(&mut self, _message: &str) -> bool {
        self.answer
    }
}

/// Interactive confirmation on the terminal: prints the message and
/// accepts `y`/`yes` (case-insensitive).
pub struct TermConfirm;

impl ConfirmDialog for TermConfirm {
    fn confirm(&mut self, message: &str) -> bool {
        print!("{message} [y/N] ");
        if std::io::stdout().flush().is_err() {
            return false;
        }
        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

/// Terminal "picker": prompts for a path on stdin. An empty line cancels.
pub struct TermPicker;

impl ImagePicker for TermPicker {
    fn pick_image(&mut self) -> Option<PathBuf> {
        print!("Image path (empty line to cancel): ");
        std::io::stdout().flush().ok()?;
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line).ok()?;
        let line = line.trim();
        (!line.is_empty()).then(|| PathBuf::from(line))
    }
}

/// Focus repair for shells with nothing to repair.
pub struct NoopFocusRepair;

impl FocusRepair for NoopFocusRepair {
    fn repair_focus(&mut self) {}
}

/// Scripted confirmation for tests: pops answers front to back, then
/// declines.
#[derive(Default)]
pub struct ScriptedConfirm {
    answers: VecDeque<bool>,
    pub asked: Vec<String>,
}

impl ScriptedConfirm {
    pub fn answering(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }
}

impl ConfirmDialog for ScriptedConfirm {
    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        self.answers.pop_front().unwrap_or(false)
    }
}

/// Scripted picker for tests: yields each path once, then cancels.
#[derive(Default)]
pub struct ScriptedPicker {
    picks: VecDeque<PathBuf>,
}

impl ScriptedPicker {
    pub fn yielding(picks: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
        }
    }
}

impl ImagePicker for ScriptedPicker {
    fn pick_image(&mut self) -> Option<PathBuf> {
        self.picks.pop_front()
    }
}

/// Focus-repair spy for tests.
#[derive(Default)]
pub struct FocusRepairSpy {
    pub calls: usize,
}

impl FocusRepair for FocusRepairSpy {
    fn repair_focus(&mut self) {
        self.calls += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_confirm_answers_uniformly() {
        let mut yes = AutoConfirm { answer: true };
        let mut no = AutoConfirm { answer: false };
        assert!(yes.confirm("Delete this board?"));
        assert!(!no.confirm("Delete this board?"));
    }

    #[test]
    fn test_scripted_confirm_declines_when_exhausted() {
        let mut confirm = ScriptedConfirm::answering([true]);
        assert!(confirm.confirm("first?"));
        assert!(!confirm.confirm("second?"));
        assert_eq!(confirm.asked, vec!["first?", "second?"]);
    }

    #[test]
    fn test_scripted_picker_cancels_when_exhausted() {
        let mut picker = ScriptedPicker::yielding([PathBuf::from("/tmp/bg.png")]);
        assert_eq!(picker.pick_image(), Some(PathBuf::from("/tmp/bg.png")));
        assert_eq!(picker.pick_image(), None);
    }
}
