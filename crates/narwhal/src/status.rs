//! Per-iteration progress reporting.

/// Error type a status callback may return to abort a layout run.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Snapshot delivered once per iteration, after the iteration's positions are committed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutStatus {
    /// Sum of per-node movement during the iteration that just finished.
    pub total_displacement: f64,
    /// Below-threshold iterations counted so far.
    pub stop_count: usize,
    pub iterations: usize,
    pub max_iterations: usize,
}

impl LayoutStatus {
    /// Fraction of the iteration budget used so far, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.max_iterations == 0 {
            return 1.0;
        }
        (self.iterations as f64 / self.max_iterations as f64).min(1.0)
    }
}

/// Receives a [`LayoutStatus`] after every iteration.
///
/// Returning an error stops the run; [`crate::LayoutEngine::arrange_with`] propagates it as
/// [`crate::Error::Callback`].
pub trait StatusCallback {
    fn on_status(&mut self, status: LayoutStatus) -> Result<(), CallbackError>;
}

impl<F> StatusCallback for F
where
    F: FnMut(LayoutStatus) -> Result<(), CallbackError>,
{
    fn on_status(&mut self, status: LayoutStatus) -> Result<(), CallbackError> {
        self(status)
    }
}

/// A callback that ignores every status.
#[derive(Debug, Clone, Copy, Default)]
pub struct Quiet;

impl StatusCallback for Quiet {
    fn on_status(&mut self, _status: LayoutStatus) -> Result<(), CallbackError> {
        Ok(())
    }
}
