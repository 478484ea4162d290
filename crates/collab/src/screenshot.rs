//! Screenshot collaborator channel
//!
//! Captures flow through an explicit command/outcome pair instead of a
//! callback into the capture backend. At most one capture is outstanding;
//! requests while one is pending are refused, and captures never run while
//! a gesture is active (the controller only emits its request when idle).

use log::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenshotCommand {
    Capture,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenshotOutcome {
    Ready { data_uri: String },
    Failed { message: String },
}

#[derive(Debug, Default)]
pub struct ScreenshotChannel {
    outstanding: bool,
}

impl ScreenshotChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_outstanding(&self) -> bool {
        self.outstanding
    }

    /// Issue a capture command, or `None` while one is already pending.
    pub fn request(&mut self) -> Option<ScreenshotCommand> {
        if self.outstanding {
            return None;
        }
        self.outstanding = true;
        Some(ScreenshotCommand::Capture)
    }

    /// Resolve the pending capture. Failures are logged and surfaced to the
    /// caller; an unsolicited outcome is dropped.
    pub fn resolve(&mut self, outcome: ScreenshotOutcome) -> Option<ScreenshotOutcome> {
        if !self.outstanding {
            return None;
        }
        self.outstanding = false;
        if let ScreenshotOutcome::Failed { message } = &outcome {
            warn!("screenshot capture failed: {message}");
        }
        Some(outcome)
    }
}
