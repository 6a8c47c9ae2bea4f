/// Pure projection of application state into display structures
///
/// Nothing here owns state. The widget layer (panels.rs) turns a `Screen`
/// into iced elements.
use iced::widget::image::Handle;

use crate::state::data::{Analysis, SubmissionState};
use crate::state::selection::SelectedImage;

pub const SPATIAL_PLACEHOLDER: &str = "No significant spatial relationships detected.";

/// Upload card contents
#[derive(Debug, Clone)]
pub enum UploadCard<'a> {
    /// Nothing selected yet
    Prompt,
    Preview {
        preview: &'a Handle,
        file_name: &'a str,
        trigger: AnalyzeTrigger,
    },
}

/// The analyze button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzeTrigger {
    pub label: &'static str,
    pub enabled: bool,
    pub busy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relation<'a> {
    Item(&'a str),
    Placeholder,
}

/// The two result panels
#[derive(Debug, Clone)]
pub struct ResultPanels<'a> {
    /// None when the returned image could not be decoded
    pub annotated: Option<&'a Handle>,
    pub badges: Vec<String>,
    pub narrative: &'a str,
    pub relations: Vec<Relation<'a>>,
}

#[derive(Debug, Clone)]
pub struct Screen<'a> {
    pub upload: UploadCard<'a>,
    /// Dismissible error banner
    pub banner: Option<&'a str>,
    pub results: Option<ResultPanels<'a>>,
}

pub fn project<'a>(selection: Option<&'a SelectedImage>, state: &'a SubmissionState) -> Screen<'a> {
    let upload = match selection {
        None => UploadCard::Prompt,
        Some(selected) => UploadCard::Preview {
            preview: selected.preview.handle(),
            file_name: &selected.file_name,
            trigger: trigger_for(state),
        },
    };

    Screen {
        upload,
        banner: state.error(),
        results: state.analysis().map(panels_for),
    }
}

fn trigger_for(state: &SubmissionState) -> AnalyzeTrigger {
    if state.is_in_flight() {
        AnalyzeTrigger {
            label: "Processing Scene...",
            enabled: false,
            busy: true,
        }
    } else {
        AnalyzeTrigger {
            label: "Analyze Scene",
            enabled: true,
            busy: false,
        }
    }
}

fn panels_for(analysis: &Analysis) -> ResultPanels<'_> {
    let result = &analysis.result;

    let relations = if result.spatial_data.is_empty() {
        vec![Relation::Placeholder]
    } else {
        result.spatial_data.iter().map(|r| Relation::Item(r)).collect()
    };

    ResultPanels {
        annotated: analysis.annotated.as_ref(),
        badges: vec![
            format!("Scene: {}", result.scene_type),
            format!("Objects: {}", result.object_count),
        ],
        narrative: &result.narrative,
        relations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::PreviewCache;
    use crate::state::data::AnalysisResult;
    use crate::state::selection::SelectionManager;
    use crate::state::submission::CONNECTION_FAILED;
    use image::{ImageFormat, Rgb, RgbImage};

    fn kitchen(spatial: Vec<&str>) -> SubmissionState {
        let result = AnalysisResult {
            image_data: "data:image/jpeg;base64,aGVsbG8=".to_string(),
            scene_type: "kitchen".to_string(),
            object_count: 3,
            narrative: "A kitchen scene.".to_string(),
            spatial_data: spatial.into_iter().map(String::from).collect(),
        };
        SubmissionState::Succeeded(Box::new(Analysis::new(result)))
    }

    fn selected(dir: &std::path::Path) -> SelectionManager {
        let path = dir.join("photo.png");
        RgbImage::from_pixel(8, 8, Rgb([1, 2, 3]))
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();
        let mut selection = SelectionManager::new(PreviewCache::new(dir.join("previews")));
        selection.select_file(&path).unwrap();
        selection
    }

    #[test]
    fn test_nothing_selected_shows_prompt() {
        let screen = project(None, &SubmissionState::Idle);
        assert!(matches!(screen.upload, UploadCard::Prompt));
        assert!(screen.banner.is_none());
        assert!(screen.results.is_none());
    }

    #[test]
    fn test_idle_selection_enables_trigger() {
        let dir = tempfile::tempdir().unwrap();
        let selection = selected(dir.path());

        let screen = project(selection.current(), &SubmissionState::Idle);
        match screen.upload {
            UploadCard::Preview { file_name, trigger, .. } => {
                assert_eq!(file_name, "photo.png");
                assert!(trigger.enabled);
                assert_eq!(trigger.label, "Analyze Scene");
            }
            UploadCard::Prompt => panic!("expected preview"),
        }
    }

    #[test]
    fn test_in_flight_disables_trigger() {
        let dir = tempfile::tempdir().unwrap();
        let selection = selected(dir.path());

        let screen = project(selection.current(), &SubmissionState::InFlight);
        match screen.upload {
            UploadCard::Preview { trigger, .. } => {
                assert!(!trigger.enabled);
                assert!(trigger.busy);
                assert_eq!(trigger.label, "Processing Scene...");
            }
            UploadCard::Prompt => panic!("expected preview"),
        }
        assert!(screen.results.is_none());
    }

    #[test]
    fn test_success_panels() {
        let state = kitchen(vec!["cup is on table"]);
        let panels = project(None, &state).results.unwrap();

        assert_eq!(panels.badges, vec!["Scene: kitchen", "Objects: 3"]);
        assert_eq!(panels.narrative, "A kitchen scene.");
        assert_eq!(panels.relations, vec![Relation::Item("cup is on table")]);
        assert!(panels.annotated.is_some());
    }

    #[test]
    fn test_empty_relations_render_one_placeholder() {
        let state = kitchen(vec![]);
        let panels = project(None, &state).results.unwrap();

        assert_eq!(panels.relations, vec![Relation::Placeholder]);
    }

    #[test]
    fn test_relations_keep_order() {
        let state = kitchen(vec!["a left of b", "b above c", "c near d"]);
        let panels = project(None, &state).results.unwrap();

        assert_eq!(
            panels.relations,
            vec![
                Relation::Item("a left of b"),
                Relation::Item("b above c"),
                Relation::Item("c near d"),
            ]
        );
    }

    #[test]
    fn test_failure_keeps_preview_and_shows_banner() {
        let dir = tempfile::tempdir().unwrap();
        let selection = selected(dir.path());
        let state = SubmissionState::Failed(CONNECTION_FAILED.to_string());

        let screen = project(selection.current(), &state);
        assert!(matches!(screen.upload, UploadCard::Preview { .. }));
        assert_eq!(screen.banner, Some(CONNECTION_FAILED));
        assert!(screen.results.is_none());
    }
}
