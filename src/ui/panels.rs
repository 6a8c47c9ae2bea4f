/// Widgets for the main window
///
/// Each function turns one part of a `Screen` into iced elements.
/// No state lives here.
use iced::widget::{button, column, container, image, row, text, Column, Space};
use iced::{font, Alignment, ContentFit, Element, Font, Length, Pixels};
use iced_aw::Wrap;

use super::screen::{AnalyzeTrigger, Relation, ResultPanels, UploadCard, SPATIAL_PLACEHOLDER};
use crate::app::Message;

const PREVIEW_HEIGHT: f32 = 320.0;

fn italic() -> Font {
    Font {
        style: font::Style::Italic,
        ..Font::default()
    }
}

/// Title, subtitle and the theme toggle
pub fn header<'a>(dark: bool) -> Element<'a, Message> {
    let toggle_label = if dark { "Light mode" } else { "Dark mode" };

    row![
        column![
            text("Intelligent Scene Breakdown").size(36),
            text("Visual Perception • Spatial Logic • Generative Reasoning")
                .size(16)
                .style(text::secondary),
        ]
        .spacing(6)
        .width(Length::Fill),
        button(toggle_label)
            .on_press(Message::ToggleTheme)
            .style(button::secondary)
            .padding(8),
    ]
    .align_y(Alignment::Center)
    .into()
}

pub fn upload_card<'a>(card: &UploadCard<'a>) -> Element<'a, Message> {
    let content: Element<'a, Message> = match card {
        UploadCard::Prompt => button(
            column![
                text("Click to Upload Image").size(22),
                text("Supports JPG, PNG, JPEG").size(14).style(text::secondary),
            ]
            .spacing(8)
            .align_x(Alignment::Center)
            .width(Length::Fill),
        )
        .on_press(Message::PickFile)
        .padding(40)
        .width(Length::Fill)
        .style(button::text)
        .into(),

        UploadCard::Preview {
            preview,
            file_name,
            trigger,
        } => column![
            image((*preview).clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fixed(PREVIEW_HEIGHT)),
            text(*file_name).size(14).style(text::secondary),
            button(text("Choose a different image").size(14))
                .on_press(Message::PickFile)
                .style(button::text),
            analyze_button(*trigger),
        ]
        .spacing(12)
        .align_x(Alignment::Center)
        .into(),
    };

    container(content)
        .padding(20)
        .width(Length::Fill)
        .style(container::rounded_box)
        .into()
}

fn analyze_button<'a>(trigger: AnalyzeTrigger) -> Element<'a, Message> {
    button(text(trigger.label).size(18))
        .on_press_maybe(trigger.enabled.then_some(Message::AnalyzePressed))
        .padding([12, 28])
        .style(if trigger.busy { button::secondary } else { button::primary })
        .into()
}

/// Dismissible connectivity banner
pub fn error_banner<'a>(message: &'a str) -> Element<'a, Message> {
    container(
        row![
            text(message).style(text::danger).width(Length::Fill),
            button("Dismiss")
                .on_press(Message::DismissError)
                .style(button::danger)
                .padding([4, 12]),
        ]
        .spacing(12)
        .align_y(Alignment::Center),
    )
    .padding(15)
    .width(Length::Fill)
    .style(container::bordered_box)
    .into()
}

/// "Computer Vision" and "Scene Interpretation" side by side
pub fn result_panels<'a>(panels: ResultPanels<'a>) -> Element<'a, Message> {
    let vision: Element<'a, Message> = match panels.annotated {
        Some(handle) => image(handle.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .into(),
        None => text("The processed image could not be displayed.")
            .font(italic())
            .style(text::secondary)
            .into(),
    };

    let vision_card = card("Computer Vision", vision);

    let badges = Wrap::with_elements(
        panels
            .badges
            .into_iter()
            .map(|label| -> Element<'a, Message> {
                container(text(label).size(14))
                    .padding([4, 10])
                    .style(container::rounded_box)
                    .into()
            })
            .collect(),
    )
    .spacing(Pixels(8.0))
    .line_spacing(Pixels(8.0));

    let relations = Column::with_children(panels.relations.into_iter().map(relation_item)).spacing(6);

    let interpretation = column![
        badges,
        text(panels.narrative).size(16),
        Space::with_height(Length::Fixed(10.0)),
        text("Spatial Logic Engine").size(16).style(text::secondary),
        relations,
    ]
    .spacing(14);

    let interpretation_card = card("Scene Interpretation", interpretation.into());

    row![vision_card, interpretation_card].spacing(20).into()
}

fn relation_item<'a>(relation: Relation<'a>) -> Element<'a, Message> {
    match relation {
        Relation::Item(item) => row![text("›").style(text::primary), text(item)].spacing(8).into(),
        Relation::Placeholder => text(SPATIAL_PLACEHOLDER).font(italic()).into(),
    }
}

fn card<'a>(title: &'a str, body: Element<'a, Message>) -> Element<'a, Message> {
    container(column![text(title).size(20), body].spacing(16))
        .padding(20)
        .width(Length::FillPortion(1))
        .style(container::rounded_box)
        .into()
}

/// Footer status line
pub fn status_line<'a>(status: &'a str) -> Element<'a, Message> {
    text(status).size(14).style(text::secondary).into()
}
