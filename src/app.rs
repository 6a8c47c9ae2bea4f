use iced::widget::{container, scrollable, Column};
use iced::{window, Element, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::Path;

use crate::client::{AnalysisClient, AnalyzeError, Upload};
use crate::config::{AnalyzerConfig, AppPaths};
use crate::preview::{PreviewCache, IMAGE_EXTENSIONS};
use crate::state::data::{AnalysisResult, SubmissionState};
use crate::state::selection::SelectionManager;
use crate::state::settings::ThemeStore;
use crate::state::submission::{SubmissionController, Ticket};
use crate::ui::{panels, screen};

/// Main application state
pub struct SceneBreakdown {
    selection: SelectionManager,
    submission: SubmissionController,
    theme: ThemeStore,
    client: AnalysisClient,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User asked to pick an image
    PickFile,
    /// User clicked "Analyze Scene"
    AnalyzePressed,
    /// Background analyze call resolved
    AnalysisFinished(Ticket, Result<AnalysisResult, AnalyzeError>),
    /// User closed the error banner
    DismissError,
    ToggleTheme,
    /// Main window is closing, release resources first
    CloseRequested(window::Id),
}

impl SceneBreakdown {
    /// Create a new instance of the application
    pub fn new() -> (Self, Task<Message>) {
        let app = Self::with_config(&AppPaths::resolve(), &AnalyzerConfig::default());
        (app, Task::none())
    }

    pub fn with_config(paths: &AppPaths, config: &AnalyzerConfig) -> Self {
        let theme = ThemeStore::load(&paths.settings_file);
        let client = AnalysisClient::new(config);

        tracing::info!(
            "🎨 Scene Breakdown initialized (endpoint {}, previews in {})",
            client.endpoint(),
            paths.preview_dir.display()
        );

        Self {
            selection: SelectionManager::new(PreviewCache::new(&paths.preview_dir)),
            submission: SubmissionController::new(),
            theme,
            client,
            status: "Ready. Choose an image to analyze.".to_string(),
        }
    }

    /// Handle application messages and update state
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickFile => {
                let file = FileDialog::new()
                    .set_title("Select an Image")
                    .add_filter("Images", &IMAGE_EXTENSIONS)
                    .pick_file();

                if let Some(path) = file {
                    self.select(&path);
                }

                Task::none()
            }
            Message::AnalyzePressed => {
                let Some((ticket, upload)) = self.start_analysis() else {
                    return Task::none();
                };

                let client = self.client.clone();
                Task::perform(async move { client.analyze(upload).await }, move |outcome| {
                    Message::AnalysisFinished(ticket, outcome)
                })
            }
            Message::AnalysisFinished(ticket, outcome) => {
                if self.submission.complete(ticket, outcome) {
                    self.status = match self.submission.state() {
                        SubmissionState::Succeeded(analysis) => format!(
                            "✅ Analysis finished at {}",
                            analysis.received_at.format("%H:%M:%S")
                        ),
                        _ => "Analysis failed.".to_string(),
                    };
                }

                Task::none()
            }
            Message::DismissError => {
                self.submission.dismiss_error();
                Task::none()
            }
            Message::ToggleTheme => {
                let dark = self.theme.toggle();
                tracing::debug!("Theme toggled, dark={}", dark);
                Task::none()
            }
            Message::CloseRequested(id) => {
                self.selection.clear();
                window::close(id)
            }
        }
    }

    /// Make `path` the active selection, discarding any result or error
    fn select(&mut self, path: &Path) {
        match self.selection.select_file(path) {
            Ok(selected) => {
                self.status = format!("Selected {}.", selected.file_name);
                self.submission.reset();
            }
            Err(e) => {
                tracing::warn!("⚠️  Could not select {}: {}", path.display(), e);
                self.status = format!("⚠️ {e}");
            }
        }
    }

    /// Move to InFlight and detach what the request needs
    fn start_analysis(&mut self) -> Option<(Ticket, Upload)> {
        let selected = self.selection.current()?;
        let ticket = self.submission.begin(Some(selected))?;
        let upload = Upload::from(selected);

        self.status = format!("Analyzing {}...", upload.file_name);
        Some((ticket, upload))
    }

    /// Build the user interface
    pub fn view(&self) -> Element<Message> {
        let screen = screen::project(self.selection.current(), self.submission.state());

        let mut content = Column::new()
            .spacing(20)
            .padding(40)
            .max_width(1100)
            .push(panels::header(self.theme.is_dark()))
            .push(panels::upload_card(&screen.upload));

        if let Some(message) = screen.banner {
            content = content.push(panels::error_banner(message));
        }

        if let Some(results) = screen.results {
            content = content.push(panels::result_panels(results));
        }

        content = content.push(panels::status_line(&self.status));

        scrollable(container(content).center_x(Length::Fill)).into()
    }

    /// Theme follows the persisted preference
    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    pub fn subscription(&self) -> Subscription<Message> {
        window::close_requests().map(Message::CloseRequested)
    }
}
