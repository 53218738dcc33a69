//! Keyboard playback control on the daemon's terminal

use std::{
    io::{self, BufRead},
    sync::Arc,
    thread,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::state::{AppState, ControlError};

/// Commands recognised on stdin, one per line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Enter or space: Play/Pause
    Toggle,
    /// `q`: close the countdown view
    Close,
}

impl KeyCommand {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "" => Some(Self::Toggle),
            "q" | "Q" => Some(Self::Close),
            _ => None,
        }
    }
}

// Blocking reads live on their own thread so runtime shutdown never waits on stdin.
fn spawn_stdin_reader(tx: mpsc::UnboundedSender<String>) -> io::Result<()> {
    thread::Builder::new()
        .name("stdin-keys".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        })?;
    Ok(())
}

/// Background task translating key lines into playback commands
pub async fn keyboard_control_task(state: Arc<AppState>) {
    info!("Starting keyboard control: Enter toggles playback, q closes the view");

    let (tx, mut rx) = mpsc::unbounded_channel();
    if let Err(e) = spawn_stdin_reader(tx) {
        error!("Failed to start stdin reader: {}", e);
        return;
    }

    while let Some(line) = rx.recv().await {
        let Some(command) = KeyCommand::parse(&line) else {
            warn!("Unknown key input: {:?}", line.trim());
            continue;
        };

        let result = match command {
            KeyCommand::Toggle => state.toggle().map(|_| ()),
            KeyCommand::Close => state.close_view(),
        };

        match result {
            Ok(()) => debug!("Handled key command {:?}", command),
            Err(ControlError::NoView) => info!("No countdown view is open"),
            Err(e) => error!("Failed to handle key command {:?}: {}", command, e),
        }
    }

    debug!("stdin closed, keyboard control stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_key_lines() {
        assert_eq!(KeyCommand::parse(""), Some(KeyCommand::Toggle));
        assert_eq!(KeyCommand::parse(" "), Some(KeyCommand::Toggle));
        assert_eq!(KeyCommand::parse("\n"), Some(KeyCommand::Toggle));
        assert_eq!(KeyCommand::parse("q"), Some(KeyCommand::Close));
        assert_eq!(KeyCommand::parse("Q\n"), Some(KeyCommand::Close));
        assert_eq!(KeyCommand::parse("x"), None);
    }
}
