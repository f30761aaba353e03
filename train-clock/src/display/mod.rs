//! Output to the 4-digit display.
//!
//! The physical LED driver is not part of this crate. Anything that can show
//! four digits with an optional colon, or go blank, implements [`Display`].

use std::sync::{Arc, Mutex};

use tracing::info;

use crate::domain::DisplayCode;

/// A 4-digit display.
pub trait Display: Send + 'static {
    /// Show four single-digit values, with or without the separator colon.
    fn show(&mut self, digits: [u8; 4], separator: bool);

    /// Turn every segment off.
    fn clear(&mut self);

    /// Show a code with the separator on.
    fn show_code(&mut self, code: DisplayCode) {
        self.show(code.digits(), true);
    }
}

/// Display that writes what it would show to the log.
#[derive(Debug, Default)]
pub struct TracingDisplay {
    blank: bool,
}

impl TracingDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Display for TracingDisplay {
    fn show(&mut self, digits: [u8; 4], separator: bool) {
        self.blank = false;
        let [a, b, c, d] = digits;
        let sep = if separator { ":" } else { " " };
        info!(target: "train_clock::display", "{a}{b}{sep}{c}{d}");
    }

    fn clear(&mut self) {
        // Only log the transition to blank, not every idle cycle.
        if !self.blank {
            info!(target: "train_clock::display", "display cleared");
            self.blank = true;
        }
    }
}

/// One command sent to a [`RecordingDisplay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayCommand {
    Show { digits: [u8; 4], separator: bool },
    Clear,
}

/// Display that remembers every command (for tests).
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    commands: Arc<Mutex<Vec<DisplayCommand>>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands received so far, oldest first.
    pub fn commands(&self) -> Vec<DisplayCommand> {
        self.commands
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    /// Digits of every `Show` command, oldest first.
    pub fn shown(&self) -> Vec<[u8; 4]> {
        self.commands()
            .into_iter()
            .filter_map(|c| match c {
                DisplayCommand::Show { digits, .. } => Some(digits),
                DisplayCommand::Clear => None,
            })
            .collect()
    }

    fn push(&self, command: DisplayCommand) {
        if let Ok(mut commands) = self.commands.lock() {
            commands.push(command);
        }
    }
}

impl Display for RecordingDisplay {
    fn show(&mut self, digits: [u8; 4], separator: bool) {
        self.push(DisplayCommand::Show { digits, separator });
    }

    fn clear(&mut self) {
        self.push(DisplayCommand::Clear);
    }
}
