use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use derive_getters::Getters;

use crate::batch::error::FailureReason;
use crate::recipient::Recipient;

pub mod error;
pub mod orchestrator;

#[derive(Debug)]
pub enum Outcome {
    Delivered { path: PathBuf, degraded: bool },
    Failed(FailureReason),
}

/// Counters of a run. Only ever incremented.
#[derive(Debug, Default, PartialEq, Getters)]
pub struct BatchResult {
    attempted: usize,
    succeeded: usize,
    failed: usize,
    /// Delivered, but drawn with the built-in font.
    degraded: usize,
    /// Recipient email & failure description, in processing order.
    failures: Vec<(String, String)>,
}

impl BatchResult {
    pub fn record(&mut self, recipient: &Recipient, outcome: &Outcome) {
        self.attempted += 1;
        match outcome {
            Outcome::Delivered { degraded, .. } => {
                self.succeeded += 1;
                if *degraded {
                    self.degraded += 1;
                }
            }
            Outcome::Failed(reason) => {
                self.failed += 1;
                self.failures
                    .push((recipient.email().clone(), reason.describe()));
            }
        }
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed == 0
    }
}

impl Display for BatchResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total attempted: {}", self.attempted)?;
        writeln!(f, "Successful: {}", self.succeeded)?;
        write!(f, "Failed: {}", self.failed)?;
        if self.degraded > 0 {
            write!(f, "\nDrawn with the built-in font: {}", self.degraded)?;
        }
        for (email, reason) in &self.failures {
            write!(f, "\n  - {email}: {reason}")?;
        }
        Ok(())
    }
}
