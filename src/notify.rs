//! Desktop notifications after a build.
//!
//! Delivery is delegated to `notify-send` on the user's `PATH`. A failed
//! notification never fails the build; the caller reports it and moves on.

use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Cannot run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}")]
    Failed { program: String, status: String },
}

/// Something that can show a short message to the user.
pub trait Notifier {
    fn notify(&self, summary: &str, body: &str) -> Result<(), NotifyError>;
}

/// Sends notifications through an external command
/// (`<program> <summary> <body>`).
#[derive(Debug, Clone)]
pub struct CommandNotifier {
    program: String,
}

impl CommandNotifier {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for CommandNotifier {
    fn default() -> Self {
        Self::new("notify-send")
    }
}

impl Notifier for CommandNotifier {
    fn notify(&self, summary: &str, body: &str) -> Result<(), NotifyError> {
        let status = Command::new(&self.program)
            .args([summary, body])
            .status()
            .map_err(|source| NotifyError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(NotifyError::Failed {
                program: self.program.clone(),
                status: status.to_string(),
            })
        }
    }
}
