//! Corkboard CLI - a kanban board in your terminal.

use clap::Parser;
use corkboard::cli::{
    BoardCommands, CardCommands, Cli, ColumnCommands, Commands, LabelCommands, SubtaskCommands,
};
use corkboard::commands::{self, Output};
use corkboard::shell::{AutoConfirm, ConfirmDialog, NoopFocusRepair, TermConfirm, TermPicker};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // Diagnostics go to stderr, controlled by CORK_LOG (off by default)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("CORK_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.json;

    match run_command(cli) {
        Ok(output) => output.print(json),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Confirmation step for a destructive command: `--yes` answers for the
/// user, otherwise prompt on the terminal.
fn confirmer(yes: bool) -> Box<dyn ConfirmDialog> {
    if yes {
        Box::new(AutoConfirm { answer: true })
    } else {
        Box::new(TermConfirm)
    }
}

fn run_command(cli: Cli) -> Result<Output, corkboard::Error> {
    let (mut store, data_dir) = commands::open_store(cli.data_dir.as_deref())?;

    match cli.command {
        Commands::Board { command } => match command {
            BoardCommands::Create { name } => commands::board_create(&mut store, name.as_deref()),
            BoardCommands::List => commands::board_list(&store),
            BoardCommands::Show { id } => commands::board_show(&store, &id),
            BoardCommands::Rename { id, name } => commands::board_rename(&mut store, &id, &name),
            BoardCommands::Background { id, path, clear } => commands::board_background(
                &mut store,
                &id,
                path,
                clear,
                &mut TermPicker,
                &mut NoopFocusRepair,
            ),
            BoardCommands::Blur { id, amount } => commands::board_blur(&mut store, &id, amount),
            BoardCommands::Delete { id, yes } => {
                commands::board_delete(&mut store, &id, confirmer(yes).as_mut())
            }
        },

        Commands::Column { command } => match command {
            ColumnCommands::Create {
                board_id,
                name,
                colour,
            } => commands::column_create(&mut store, &board_id, &name, &colour),
            ColumnCommands::Rename { id, name } => commands::column_rename(&mut store, &id, &name),
            ColumnCommands::Delete { id, yes } => {
                commands::column_delete(&mut store, &id, confirmer(yes).as_mut())
            }
        },

        Commands::Card { command } => match command {
            CardCommands::Create {
                column_id,
                name,
                description,
                note,
                priority,
                difficulty,
                due_date,
                due_time,
            } => commands::card_create(
                &mut store,
                &column_id,
                &name,
                &description,
                &note,
                priority.as_deref(),
                &difficulty,
                due_date.as_deref(),
                due_time.as_deref(),
            ),
            CardCommands::Show { id } => commands::card_show(&store, &id),
            CardCommands::Rename { id, name } => commands::card_rename(&mut store, &id, &name),
            CardCommands::Describe { id, text } => commands::card_describe(&mut store, &id, &text),
            CardCommands::Note { id, text } => commands::card_note(&mut store, &id, &text),
            CardCommands::Toggle { id } => commands::card_toggle(&mut store, &id),
            CardCommands::Priority { id, priority } => {
                commands::card_priority(&mut store, &id, &priority)
            }
            CardCommands::Due {
                id,
                date,
                time,
                clear,
            } => commands::card_due(&mut store, &id, date.as_deref(), time.as_deref(), clear),
            CardCommands::Move {
                id,
                column_id,
                position,
            } => commands::card_move(&mut store, &id, &column_id, position),
            CardCommands::Delete { id, yes } => {
                commands::card_delete(&mut store, &id, confirmer(yes).as_mut())
            }
        },

        Commands::Label { command } => match command {
            LabelCommands::Create { name, colour } => {
                commands::label_create(&mut store, &name, &colour)
            }
            LabelCommands::List => commands::label_list(&store),
            LabelCommands::Edit { id, name, colour } => {
                commands::label_edit(&mut store, &id, name.as_deref(), colour.as_deref())
            }
            LabelCommands::Delete { id, yes } => {
                commands::label_delete(&mut store, &id, confirmer(yes).as_mut())
            }
            LabelCommands::Attach { card_id, label_id } => {
                commands::label_attach(&mut store, &card_id, &label_id)
            }
            LabelCommands::Detach { card_id, label_id } => {
                commands::label_detach(&mut store, &card_id, &label_id)
            }
        },

        Commands::Subtask { command } => match command {
            SubtaskCommands::Add { card_id, text } => {
                commands::subtask_add(&mut store, &card_id, &text)
            }
            SubtaskCommands::Toggle {
                card_id,
                subtask_id,
            } => commands::subtask_toggle(&mut store, &card_id, &subtask_id),
            SubtaskCommands::Edit {
                card_id,
                subtask_id,
                text,
            } => commands::subtask_edit(&mut store, &card_id, &subtask_id, &text),
            SubtaskCommands::Remove {
                card_id,
                subtask_id,
            } => commands::subtask_remove(&mut store, &card_id, &subtask_id),
        },

        Commands::Theme { theme } => commands::theme_set(&mut store, &theme),
        Commands::Accent { colour } => commands::accent(&data_dir, colour.as_deref()),
        Commands::Wipe { yes } => commands::wipe(&mut store, confirmer(yes).as_mut()),
        Commands::Path => commands::data_path(&store),
    }
}
