//! Progress reporting and cooperative cancellation
//!
//! Long operations report a stage label and a percentage (`-1` when
//! indeterminate). The callback returns `false` to stop; the operation then
//! fails with [`HydroError::UserCancelled`] at its next checkpoint.

use crate::error::{HydroError, Result};

/// Status callback signature
pub type StatusFn<'a> = dyn FnMut(&str, i32) -> bool + 'a;

/// Optional status callback threaded through long operations
pub struct Progress<'a> {
    callback: Option<&'a mut StatusFn<'a>>,
    operation: &'static str,
}

impl<'a> Progress<'a> {
    /// No reporting, never cancels
    pub fn none() -> Self {
        Self {
            callback: None,
            operation: "",
        }
    }

    /// Report through `callback`
    pub fn new(callback: &'a mut StatusFn<'a>) -> Self {
        Self {
            callback: Some(callback),
            operation: "",
        }
    }

    /// Name the operation reported on cancellation
    pub(crate) fn for_operation(&mut self, operation: &'static str) -> &mut Self {
        self.operation = operation;
        self
    }

    /// Checkpoint: report and honor a stop request
    pub fn step(&mut self, stage: &str, percent: i32) -> Result<()> {
        log::debug!("{} {}: {}%", self.operation, stage, percent);
        if let Some(cb) = self.callback.as_mut() {
            if !cb(stage, percent) {
                return Err(HydroError::UserCancelled {
                    operation: self.operation,
                    stage: stage.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for Progress<'_> {
    fn default() -> Self {
        Self::none()
    }
}
