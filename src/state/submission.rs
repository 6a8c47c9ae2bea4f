/// Submission controller
///
/// Drives `SubmissionState` through Idle -> InFlight -> Succeeded | Failed.
/// Every request carries a `Ticket`; a response whose ticket is no longer
/// current (new selection or newer request) is dropped.
use crate::client::AnalyzeError;

use super::data::{Analysis, AnalysisResult, SubmissionState};
use super::selection::SelectedImage;

/// Generic message shown for every transport or response failure
pub const CONNECTION_FAILED: &str = "Connection failed. Please ensure the Backend Server is running.";

/// Correlates a response with the request that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct SubmissionController {
    state: SubmissionState,
    generation: u64,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Forget the current flow: back to Idle, outstanding tickets go stale
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = SubmissionState::Idle;
    }

    /// Start a submission for the active selection.
    ///
    /// Returns None when nothing is selected or a request is already in flight.
    pub fn begin(&mut self, selection: Option<&SelectedImage>) -> Option<Ticket> {
        let selected = selection?;

        if self.state.is_in_flight() {
            tracing::debug!("analyze ignored, a request is already in flight");
            return None;
        }

        self.generation += 1;
        self.state = SubmissionState::InFlight;
        tracing::debug!("⏳ Submission {} started for {}", self.generation, selected.file_name);

        Some(Ticket(self.generation))
    }

    /// Apply a response. Returns false if the ticket was stale.
    pub fn complete(&mut self, ticket: Ticket, outcome: Result<AnalysisResult, AnalyzeError>) -> bool {
        if ticket.0 != self.generation || !self.state.is_in_flight() {
            tracing::debug!("Discarding stale response for submission {}", ticket.0);
            return false;
        }

        self.state = match outcome {
            Ok(result) => SubmissionState::Succeeded(Box::new(Analysis::new(result))),
            Err(e) => {
                tracing::warn!("❌ Analysis failed: {}", e);
                SubmissionState::Failed(CONNECTION_FAILED.to_string())
            }
        };

        true
    }

    /// Close the error banner, keeping the selection
    pub fn dismiss_error(&mut self) {
        if matches!(self.state, SubmissionState::Failed(_)) {
            self.state = SubmissionState::Idle;
        }
    }
}
