use iced::widget::{button, container, row, text, Space};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::show::{
    ImageSlot, Message, Route, ACCENT_BLUE, ACCENT_BLUE_LIGHT, BORDER_SLATE, ERROR_RED,
    SKELETON_SLATE, SURFACE_SLATE, TEXT_MUTED, TEXT_SOFT, TEXT_WHITE,
};
use crate::MovieExplorer;

pub const ICON_FILM: char = '\u{F3A9}';
pub const ICON_ARROW_LEFT: char = '\u{F12F}';
pub const ICON_STAR_FILL: char = '\u{F586}';

pub const NO_IMAGE_TEXT: &str = "No Image Available";

pub fn icon(icon_char: char) -> iced::widget::Text<'static> {
    text(icon_char.to_string()).font(iced::Font {
        family: iced::font::Family::Name("bootstrap-icons"),
        ..Default::default()
    })
}

pub fn bold_text(s: impl ToString, size: u32, color: Color) -> iced::widget::Text<'static> {
    text(s.to_string()).size(size).color(color).font(iced::Font {
        weight: iced::font::Weight::Bold,
        ..Default::default()
    })
}

pub fn skeleton_style(radius: f32) -> impl Fn(&iced::Theme) -> container::Style {
    move |_theme| container::Style {
        background: Some(iced::Background::Color(SKELETON_SLATE)),
        border: Border {
            radius: radius.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn skeleton_block<'a>(width: Length, height: f32, radius: f32) -> Element<'a, Message> {
    container(Space::new().width(width).height(height))
        .width(width)
        .height(Length::Fixed(height))
        .style(skeleton_style(radius))
        .into()
}

pub fn surface_style(_theme: &iced::Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(Color {
            a: 0.6,
            ..SURFACE_SLATE
        })),
        border: Border {
            color: BORDER_SLATE,
            width: 1.0,
            radius: 8.0.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.3),
            offset: iced::Vector::new(0.0, 4.0),
            blur_radius: 8.0,
        },
        ..Default::default()
    }
}

pub fn primary_button_style(_theme: &iced::Theme, status: button::Status) -> button::Style {
    let bg = match status {
        button::Status::Hovered => Color::from_rgb(0.114, 0.306, 0.847),
        _ => ACCENT_BLUE,
    };
    button::Style {
        background: Some(iced::Background::Color(bg)),
        text_color: TEXT_WHITE,
        border: Border::default().rounded(6),
        shadow: Shadow::default(),
        snap: false,
    }
}

pub fn outline_button_style(_theme: &iced::Theme, status: button::Status) -> button::Style {
    let bg = match status {
        button::Status::Hovered => SURFACE_SLATE,
        _ => Color::TRANSPARENT,
    };
    button::Style {
        background: Some(iced::Background::Color(bg)),
        text_color: TEXT_SOFT,
        border: Border {
            color: BORDER_SLATE,
            width: 1.0,
            radius: 6.0.into(),
        },
        shadow: Shadow::default(),
        snap: false,
    }
}

/// Small rounded label. `accent` selects the blue genre styling over the
/// neutral outline.
pub fn badge<'a>(label: impl ToString, accent: bool) -> Element<'a, Message> {
    let (fg, bg, border) = if accent {
        (
            ACCENT_BLUE_LIGHT,
            Color { a: 0.2, ..ACCENT_BLUE },
            Color { a: 0.3, ..ACCENT_BLUE },
        )
    } else {
        (TEXT_SOFT, Color::TRANSPARENT, BORDER_SLATE)
    };
    container(text(label.to_string()).size(12).color(fg))
        .padding(Padding::new(4.0).left(10.0).right(10.0))
        .style(move |_theme| container::Style {
            background: Some(iced::Background::Color(bg)),
            border: Border {
                color: border,
                width: 1.0,
                radius: 12.0.into(),
            },
            ..Default::default()
        })
        .into()
}

pub fn back_button<'a>() -> iced::widget::Button<'a, Message> {
    button(
        row![
            icon(ICON_ARROW_LEFT).size(14).color(TEXT_SOFT),
            text("Back to Movies").size(14)
        ]
        .spacing(8)
        .align_y(iced::Alignment::Center),
    )
    .padding(Padding::new(10.0).left(16.0).right(16.0))
    .on_press(Message::Navigate(Route::List))
}

impl MovieExplorer {
    pub fn view_header(&self) -> Element<'_, Message> {
        let title = row![
            icon(ICON_FILM).size(28).color(ACCENT_BLUE_LIGHT),
            bold_text("Movie Explorer", 24, TEXT_WHITE)
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center);

        container(title)
            .width(Length::Fill)
            .padding(Padding::new(16.0).left(32.0).right(32.0))
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(Color::from_rgba(
                    0.059, 0.090, 0.165, 0.95,
                ))),
                border: Border {
                    color: SURFACE_SLATE,
                    width: 1.0,
                    radius: 0.0.into(),
                },
                ..Default::default()
            })
            .into()
    }

    /// Image for `url` once downloaded, a blank tile while it is in flight and
    /// the textual fallback when there is nothing to show.
    pub fn view_image_or_fallback<'a>(
        &'a self,
        url: Option<&str>,
        width: Length,
        height: f32,
    ) -> Element<'a, Message> {
        match self.image_cache.slot(url) {
            ImageSlot::Ready(handle) => container(
                iced::widget::image(handle.clone())
                    .width(width)
                    .height(Length::Fixed(height))
                    .content_fit(iced::ContentFit::Cover),
            )
            .width(width)
            .clip(true)
            .into(),
            ImageSlot::Pending => skeleton_block(width, height, 8.0),
            ImageSlot::Unavailable => container(text(NO_IMAGE_TEXT).size(13).color(TEXT_MUTED))
                .width(width)
                .height(Length::Fixed(height))
                .center_x(width)
                .center_y(Length::Fixed(height))
                .style(skeleton_style(8.0))
                .into(),
        }
    }

    pub fn view_centered_error<'a>(
        &'a self,
        heading: &'a str,
        message: &'a str,
        action: Option<Element<'a, Message>>,
    ) -> Element<'a, Message> {
        let mut content = iced::widget::column![
            bold_text(heading, 24, ERROR_RED),
            text(message).size(16).color(ERROR_RED)
        ]
        .spacing(16)
        .align_x(iced::Alignment::Center);

        if let Some(action) = action {
            content = content.push(action);
        }

        container(content)
            .width(Length::Fill)
            .padding(Padding::new(48.0))
            .center_x(Length::Fill)
            .into()
    }
}
