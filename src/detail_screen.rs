use chrono::NaiveDate;
use iced::widget::{column, container, row, text, Column, Row, Space};
use iced::{Border, Color, Element, Length, Padding};

use crate::components::{
    back_button, badge, bold_text, icon, outline_button_style, primary_button_style,
    skeleton_block, ICON_STAR_FILL,
};
use crate::fetch::FetchState;
use crate::markup::plain_summary;
use crate::show::{
    format_rating, Message, Show, STAR_YELLOW, TEXT_MUTED, TEXT_SOFT, TEXT_WHITE,
};
use crate::MovieExplorer;

pub const NOT_FOUND_MESSAGE: &str = "The requested movie could not be found.";
const POSTER_HEIGHT: f32 = 384.0;
const STACKED_LAYOUT_WIDTH: f32 = 1024.0;

/// Renders `YYYY-MM-DD` as `M/D/YYYY`; anything else is shown verbatim.
pub fn format_premiere_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map(|date| date.format("%-m/%-d/%Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Display fields for the detail screen. Absent fields stay `None` (or empty)
/// so their rows can be hidden.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowDetail {
    pub poster_url: Option<String>,
    pub name: String,
    pub rating: Option<String>,
    pub facts: Vec<String>,
    pub genres: Vec<String>,
    pub summary: Option<String>,
    pub premiered: Option<String>,
    pub network: Option<String>,
}

impl ShowDetail {
    pub fn from_show(show: &Show) -> Self {
        let facts = [
            non_empty(show.language.as_ref()),
            show.runtime
                .filter(|minutes| *minutes > 0)
                .map(|minutes| format!("{} min", minutes)),
            non_empty(show.status.as_ref()),
        ]
        .into_iter()
        .flatten()
        .collect();

        let network = show.network.as_ref().map(|network| match &network.country {
            Some(country) => format!("{} ({})", network.name, country.name),
            None => network.name.clone(),
        });

        Self {
            poster_url: show.original_image().map(String::from),
            name: show.name.clone(),
            rating: show.rating_average().map(format_rating),
            facts,
            genres: show.genres.clone(),
            summary: plain_summary(show.summary.as_deref()),
            premiered: non_empty(show.premiered.as_ref()).map(|d| format_premiere_date(&d)),
            network,
        }
    }
}

fn section<'a>(title: &'a str, body: Element<'a, Message>) -> Element<'a, Message> {
    column![bold_text(title, 18, TEXT_WHITE), body]
        .spacing(8)
        .into()
}

fn labelled<'a>(label: &'a str, value: String) -> Element<'a, Message> {
    row![
        text(label).size(14).color(TEXT_MUTED),
        text(value).size(14).color(TEXT_WHITE)
    ]
    .spacing(8)
    .into()
}

impl MovieExplorer {
    fn is_stacked_layout(&self) -> bool {
        self.window_width < STACKED_LAYOUT_WIDTH
    }

    fn two_columns<'a>(
        &self,
        left: Element<'a, Message>,
        right: Element<'a, Message>,
    ) -> Element<'a, Message> {
        if self.is_stacked_layout() {
            column![left, right].spacing(32).width(Length::Fill).into()
        } else {
            row![
                container(left).width(Length::FillPortion(1)),
                container(right).width(Length::FillPortion(2))
            ]
            .spacing(32)
            .width(Length::Fill)
            .into()
        }
    }

    pub fn view_detail_screen(&self) -> Element<'_, Message> {
        let body = match self.show_detail.state() {
            FetchState::Loading => self.view_detail_skeleton(),
            FetchState::Failed(message) => self.view_detail_not_found(message),
            FetchState::Loaded(show) => self.view_detail_content(ShowDetail::from_show(show)),
        };

        container(body)
            .width(Length::Fill)
            .padding(Padding::new(32.0))
            .into()
    }

    fn view_detail_skeleton(&self) -> Element<'_, Message> {
        let poster = skeleton_block(Length::Fill, POSTER_HEIGHT, 8.0);

        let lines = column![
            row![
                skeleton_block(Length::FillPortion(3), 32.0, 4.0),
                Space::new().width(Length::FillPortion(1))
            ],
            row![
                skeleton_block(Length::FillPortion(1), 16.0, 4.0),
                Space::new().width(Length::FillPortion(1))
            ],
            skeleton_block(Length::Fill, 80.0, 4.0),
            row![
                skeleton_block(Length::Fixed(64.0), 24.0, 12.0),
                skeleton_block(Length::Fixed(80.0), 24.0, 12.0)
            ]
            .spacing(8),
        ]
        .spacing(16)
        .width(Length::Fill);

        self.two_columns(poster, lines.into())
    }

    fn view_detail_not_found<'a>(&'a self, message: &'a str) -> Element<'a, Message> {
        let back = back_button().style(primary_button_style).into();
        self.view_centered_error("Movie Not Found", message, Some(back))
    }

    fn view_detail_content(&self, detail: ShowDetail) -> Element<'_, Message> {
        let poster = self.view_image_or_fallback(
            detail.poster_url.as_deref(),
            Length::Fill,
            POSTER_HEIGHT,
        );

        let mut info = Column::new()
            .spacing(24)
            .width(Length::Fill)
            .push(bold_text(detail.name, 36, TEXT_WHITE));

        let mut meta: Vec<Element<Message>> = Vec::new();
        if let Some(rating) = detail.rating {
            meta.push(
                container(
                    row![
                        icon(ICON_STAR_FILL).size(16).color(STAR_YELLOW),
                        text(rating).size(15).color(STAR_YELLOW)
                    ]
                    .spacing(8)
                    .align_y(iced::Alignment::Center),
                )
                .padding(Padding::new(4.0).left(12.0).right(12.0))
                .style(|_theme| container::Style {
                    background: Some(iced::Background::Color(Color {
                        a: 0.2,
                        ..STAR_YELLOW
                    })),
                    border: Border {
                        color: Color {
                            a: 0.3,
                            ..STAR_YELLOW
                        },
                        width: 1.0,
                        radius: 14.0.into(),
                    },
                    ..Default::default()
                })
                .into(),
            );
        }
        meta.extend(detail.facts.into_iter().map(|fact| badge(fact, false)));
        if !meta.is_empty() {
            info = info.push(
                Row::with_children(meta)
                    .spacing(16)
                    .align_y(iced::Alignment::Center),
            );
        }

        if !detail.genres.is_empty() {
            let badges: Vec<Element<Message>> = detail
                .genres
                .into_iter()
                .map(|genre| badge(genre, true))
                .collect();
            info = info.push(section("Genres", Row::with_children(badges).spacing(8).into()));
        }

        if let Some(summary) = detail.summary {
            info = info.push(section(
                "Summary",
                text(summary).size(18).color(TEXT_SOFT).into(),
            ));
        }

        let mut facts = Column::new().spacing(8);
        if let Some(premiered) = detail.premiered {
            facts = facts.push(labelled("Premiered:", premiered));
        }
        if let Some(network) = detail.network {
            facts = facts.push(labelled("Network:", network));
        }
        info = info.push(facts);

        let back = back_button().style(outline_button_style);

        column![back, self.two_columns(poster, info.into())]
            .spacing(24)
            .width(Length::Fill)
            .into()
    }
}
