//! CLI argument definitions for corkboard.

use clap::{Parser, Subcommand};

/// Corkboard - a kanban board in your terminal.
///
/// Boards hold columns, columns hold cards, cards hold subtasks and
/// labels. Start with `cork board create`.
#[derive(Parser, Debug)]
#[command(name = "cork")]
#[command(author, version, about = "A kanban board core with a CLI front end", long_about = None)]
pub struct Cli {
    /// Output in JSON instead of human-readable text
    #[arg(short = 'j', long = "json", global = true)]
    pub json: bool,

    /// Data directory holding data.json and prefs.json.
    /// Defaults to the platform data dir (e.g. ~/.local/share/corkboard).
    #[arg(short = 'd', long = "data-dir", global = true, env = "CORK_DATA_DIR")]
    pub data_dir: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Board management commands
    Board {
        #[command(subcommand)]
        command: BoardCommands,
    },

    /// Column management commands
    Column {
        #[command(subcommand)]
        command: ColumnCommands,
    },

    /// Card management commands
    Card {
        #[command(subcommand)]
        command: CardCommands,
    },

    /// Label pool commands (labels are shared across boards)
    Label {
        #[command(subcommand)]
        command: LabelCommands,
    },

    /// Subtask checklist commands
    Subtask {
        #[command(subcommand)]
        command: SubtaskCommands,
    },

    /// Set the UI theme (light or dark)
    Theme {
        /// "light" or "dark"
        theme: String,
    },

    /// Show or set the accent colour preference
    Accent {
        /// Hex colour to set (omit to show the current value)
        colour: Option<String>,
    },

    /// Delete all boards, columns, cards and labels
    Wipe {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Print the location of the data file
    Path,
}

/// Board subcommands
#[derive(Subcommand, Debug)]
pub enum BoardCommands {
    /// Create a board (named "Board N" if no name is given)
    Create {
        /// Board name
        name: Option<String>,
    },

    /// List all boards
    List,

    /// Show a board with its columns and cards
    Show {
        /// Board ID (e.g., board-<uuid>)
        id: String,
    },

    /// Rename a board
    Rename {
        id: String,
        name: String,
    },

    /// Set, clear or interactively pick a board background image
    Background {
        id: String,
        /// Path to the image (omit with --clear to remove it)
        path: Option<std::path::PathBuf>,
        /// Remove the background
        #[arg(long, conflicts_with = "path")]
        clear: bool,
    },

    /// Set the background blur amount in pixels
    Blur {
        id: String,
        amount: u32,
    },

    /// Delete a board and everything on it
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Column subcommands
#[derive(Subcommand, Debug)]
pub enum ColumnCommands {
    /// Create a column at the end of a board
    Create {
        /// Owning board ID
        board_id: String,
        name: String,
        /// Header accent colour
        #[arg(long, default_value = "#e0e0e0")]
        colour: String,
    },

    /// Rename a column
    Rename {
        id: String,
        name: String,
    },

    /// Delete a column and its cards
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Card subcommands
#[derive(Subcommand, Debug)]
pub enum CardCommands {
    /// Create a card at the bottom of a column
    Create {
        /// Owning column ID
        column_id: String,
        name: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "")]
        note: String,

        /// high, medium, low or none
        #[arg(long)]
        priority: Option<String>,

        #[arg(long, default_value = "")]
        difficulty: String,

        /// Due date as YYYY-MM-DD
        #[arg(long)]
        due_date: Option<String>,

        /// Due time as HH:MM (a date without a time is due at 23:59)
        #[arg(long)]
        due_time: Option<String>,
    },

    /// Show a card in full
    Show {
        id: String,
    },

    /// Rename a card
    Rename {
        id: String,
        name: String,
    },

    /// Set the card's description
    Describe {
        id: String,
        text: String,
    },

    /// Set the card's note
    Note {
        id: String,
        text: String,
    },

    /// Toggle the card's completed state
    Toggle {
        id: String,
    },

    /// Set the card's priority (high, medium, low or none)
    Priority {
        id: String,
        priority: String,
    },

    /// Set or clear the card's due date
    Due {
        id: String,
        /// Due date as YYYY-MM-DD (omit with --clear to remove it)
        date: Option<String>,
        /// Due time as HH:MM
        #[arg(long)]
        time: Option<String>,
        /// Remove the due date and time
        #[arg(long, conflicts_with = "date")]
        clear: bool,
    },

    /// Move a card to a column, at an optional position
    Move {
        id: String,
        /// Target column ID
        column_id: String,
        /// Zero-based position in the target column (default: bottom)
        #[arg(long)]
        position: Option<usize>,
    },

    /// Delete a card
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Label subcommands
#[derive(Subcommand, Debug)]
pub enum LabelCommands {
    /// Create a label in the global pool
    Create {
        name: String,
        /// Swatch colour
        #[arg(long, default_value = "#e0e0e0")]
        colour: String,
    },

    /// List the label pool
    List,

    /// Rename or recolour a label
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        colour: Option<String>,
    },

    /// Delete a label and detach it from every card
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Attach a label to a card
    Attach {
        card_id: String,
        label_id: String,
    },

    /// Detach a label from a card
    Detach {
        card_id: String,
        label_id: String,
    },
}

/// Subtask subcommands
#[derive(Subcommand, Debug)]
pub enum SubtaskCommands {
    /// Add a subtask to a card's checklist
    Add {
        card_id: String,
        text: String,
    },

    /// Toggle a subtask's checked state
    Toggle {
        card_id: String,
        subtask_id: String,
    },

    /// Replace a subtask's text
    Edit {
        card_id: String,
        subtask_id: String,
        text: String,
    },

    /// Remove a subtask from the checklist
    Remove {
        card_id: String,
        subtask_id: String,
    },
}
