/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The active image selection and its preview (selection.rs)
/// - The analyze request lifecycle (submission.rs)
/// - Persisted UI preferences (settings.rs)

pub mod data;
pub mod selection;
pub mod settings;
pub mod submission;
