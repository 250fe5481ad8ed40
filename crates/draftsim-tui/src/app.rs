// Application orchestrator: owns the draft engine and serializes commands.
//
// The TUI sends `UserCommand`s over an mpsc channel. Each command runs to
// completion against the engine before the next one is read, and a fresh
// `BoardSnapshot` is pushed back to the TUI after every command.

use tokio::sync::mpsc;
use tracing::{debug, info};

use draftsim_core::draft::{BoardSnapshot, DraftEngine, Ignored, Outcome};

use crate::protocol::{UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Everything the orchestrator owns.
pub struct AppState {
    pub engine: DraftEngine,
}

impl AppState {
    pub fn new(engine: DraftEngine) -> Self {
        AppState { engine }
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.engine.snapshot()
    }

    /// Apply one command to the engine. `Quit` is handled by the event loop
    /// and never reaches here with any effect.
    pub fn apply(&mut self, cmd: &UserCommand) -> Option<Outcome> {
        let engine = &mut self.engine;
        let outcome = match cmd {
            UserCommand::ToggleEntry(id) => engine.toggle_entry(id),
            UserCommand::SelectEntry(id) => engine.select_entry(id),
            UserCommand::Deselect => engine.deselect(),
            UserCommand::ActivateSlot(key) => engine.activate_slot(*key),
            UserCommand::ClearSlot(key) => engine.clear_slot(*key),
            UserCommand::ResetDraft => engine.reset(),
            UserCommand::Quit => return None,
        };
        Some(outcome)
    }

    /// Status-bar feedback for outcomes the user should hear about.
    pub fn notice_for(&self, cmd: &UserCommand, outcome: &Outcome) -> Option<String> {
        let catalogue = self.engine.catalogue();
        match outcome {
            Outcome::Ignored(Ignored::EntryInUse { entry, slot }) => Some(format!(
                "{} is already in {}",
                catalogue.name_of(entry),
                slot.label()
            )),
            Outcome::Ignored(Ignored::NoSelection)
                if matches!(cmd, UserCommand::ActivateSlot(_)) =>
            {
                Some("Select an entry from the catalogue first".to_string())
            }
            Outcome::Ignored(Ignored::UnknownEntry(id)) => Some(format!("Unknown entry '{id}'")),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the application event loop until `Quit` arrives or the command
/// channel closes.
///
/// Sends an initial board snapshot before reading the first command.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    send_board(&state, &ui_tx).await;

    loop {
        match cmd_rx.recv().await {
            Some(UserCommand::Quit) => {
                info!("Quit command received, shutting down");
                break;
            }
            Some(cmd) => {
                handle_user_command(&mut state, cmd, &ui_tx).await;
            }
            None => {
                info!("Command channel closed, shutting down");
                break;
            }
        }
    }

    info!("Application event loop exiting");
    Ok(())
}

async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    let Some(outcome) = state.apply(&cmd) else {
        return;
    };
    log_outcome(&cmd, &outcome);

    send_board(state, ui_tx).await;
    if let Some(notice) = state.notice_for(&cmd, &outcome) {
        let _ = ui_tx.send(UiUpdate::Notice(notice)).await;
    }
}

fn log_outcome(cmd: &UserCommand, outcome: &Outcome) {
    match outcome {
        Outcome::Assigned {
            slot,
            entry,
            evicted,
            vacated,
        } => {
            info!(
                "Assigned {} to {} (evicted: {:?}, moved from: {:?})",
                entry, slot, evicted, vacated
            );
        }
        Outcome::Removed { slot, entry } => info!("Removed {} from {}", entry, slot),
        Outcome::Reset => info!("Draft reset"),
        Outcome::Ignored(reason) => debug!("{:?} ignored: {}", cmd, reason),
        Outcome::Armed(_) | Outcome::Disarmed(_) => debug!("{:?} -> {:?}", cmd, outcome),
    }
}

async fn send_board(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let _ = ui_tx
        .send(UiUpdate::Board(Box::new(state.snapshot())))
        .await;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
