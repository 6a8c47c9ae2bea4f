/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the analysis client and the UI layer.
use chrono::{DateTime, Local};
use iced::widget::image::Handle;
use serde::Deserialize;

use crate::preview;

/// Interpretation returned by the analysis service for one image
///
/// Extra fields in the response (such as `"status": "success"`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnalysisResult {
    /// Annotated image as a data URI (`data:image/jpeg;base64,...`)
    pub image_data: String,
    /// Scene label (e.g. "kitchen")
    pub scene_type: String,
    /// Number of detected objects
    pub object_count: u32,
    /// Free-text description of the scene
    pub narrative: String,
    /// Spatial relationships between objects, in service order
    pub spatial_data: Vec<String>,
}

/// A successful analysis, ready for display
#[derive(Debug, Clone)]
pub struct Analysis {
    pub result: AnalysisResult,
    /// Decoded annotated image, None if `image_data` could not be decoded
    pub annotated: Option<Handle>,
    pub received_at: DateTime<Local>,
}

impl Analysis {
    pub fn new(result: AnalysisResult) -> Self {
        let annotated = preview::decode_data_uri(&result.image_data).map(Handle::from_bytes);
        if annotated.is_none() {
            tracing::warn!("annotated image in response could not be decoded");
        }

        Self {
            result,
            annotated,
            received_at: Local::now(),
        }
    }
}

/// Where the current submission stands
#[derive(Debug, Clone, Default)]
pub enum SubmissionState {
    /// Nothing submitted for the current selection
    #[default]
    Idle,
    /// One request outstanding
    InFlight,
    Succeeded(Box<Analysis>),
    /// User-facing message only, never partial results
    Failed(String),
}

impl SubmissionState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionState::InFlight)
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        match self {
            SubmissionState::Succeeded(analysis) => Some(analysis),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SubmissionState::Failed(message) => Some(message),
            _ => None,
        }
    }
}
