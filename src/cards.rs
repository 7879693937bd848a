use iced::widget::{button, column, container, row, text, Row};
use iced::{Element, Length, Padding};

use crate::components::{
    badge, bold_text, icon, primary_button_style, surface_style, ICON_STAR_FILL,
};
use crate::markup::plain_summary;
use crate::settings::CardLimits;
use crate::show::{
    format_rating, truncate_text, Message, Route, Show, STAR_YELLOW, TEXT_MUTED,
    TEXT_SOFT, TEXT_WHITE,
};
use crate::MovieExplorer;

const CARD_IMAGE_HEIGHT: f32 = 256.0;

/// Everything a summary tile shows, derived from one show without touching
/// application state.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowCard {
    pub image_url: Option<String>,
    pub title: String,
    pub genres: Vec<String>,
    pub rating: Option<String>,
    pub summary: Option<String>,
    pub route: Route,
}

impl ShowCard {
    pub fn from_show(show: &Show, limits: &CardLimits) -> Self {
        Self {
            image_url: show.medium_image().map(String::from),
            title: truncate_text(&show.name, limits.title_chars),
            genres: show
                .genres
                .iter()
                .take(limits.genre_badges)
                .cloned()
                .collect(),
            rating: show.rating_average().map(format_rating),
            summary: plain_summary(show.summary.as_deref())
                .map(|s| truncate_text(&s, limits.summary_chars)),
            route: Route::Detail(show.id.to_string()),
        }
    }
}

impl MovieExplorer {
    pub fn view_show_card(&self, card: ShowCard) -> Element<'_, Message> {
        let poster =
            self.view_image_or_fallback(card.image_url.as_deref(), Length::Fill, CARD_IMAGE_HEIGHT);

        let mut details = column![bold_text(card.title, 18, TEXT_WHITE)
            .wrapping(text::Wrapping::None)]
        .spacing(12);

        if !card.genres.is_empty() {
            let badges: Vec<Element<Message>> =
                card.genres.into_iter().map(|g| badge(g, true)).collect();
            details = details.push(Row::with_children(badges).spacing(4));
        }

        if let Some(rating) = card.rating {
            details = details.push(
                row![
                    icon(ICON_STAR_FILL).size(14).color(STAR_YELLOW),
                    text(rating).size(14).color(TEXT_SOFT)
                ]
                .spacing(8)
                .align_y(iced::Alignment::Center),
            );
        }

        if let Some(summary) = card.summary {
            details = details.push(text(summary).size(14).color(TEXT_MUTED));
        }

        let view_button = button(
            container(bold_text("View Movie", 14, TEXT_WHITE))
                .width(Length::Fill)
                .center_x(Length::Fill),
        )
        .width(Length::Fill)
        .padding(Padding::new(10.0))
        .style(primary_button_style)
        .on_press(Message::Navigate(card.route));

        details = details.push(view_button);

        container(column![poster, details.padding(Padding::new(16.0))])
            .width(Length::Fill)
            .clip(true)
            .style(surface_style)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::show::{Rating, ShowImage};
    use crate::tvmaze::tests::sample_show;

    #[test]
    fn test_card_limits_genres_and_strips_summary() {
        let mut show = sample_show(5, "Person of Interest");
        show.genres = vec![
            String::from("Action"),
            String::from("Crime"),
            String::from("Science-Fiction"),
        ];
        show.summary = Some(String::from("<p>A <b>bold</b> show.</p>"));

        let card = ShowCard::from_show(&show, &CardLimits::default());
        assert_eq!(card.genres, vec!["Action", "Crime"]);
        assert_eq!(card.summary.as_deref(), Some("A bold show."));
        assert_eq!(card.route, Route::Detail(String::from("5")));
    }

    #[test]
    fn test_card_without_image_uses_fallback() {
        let show = sample_show(1, "No Poster");
        let card = ShowCard::from_show(&show, &CardLimits::default());
        assert!(card.image_url.is_none());

        let mut show = sample_show(2, "Empty Poster");
        show.image = Some(ShowImage {
            medium: None,
            original: Some(String::from("https://example.com/original.jpg")),
        });
        let card = ShowCard::from_show(&show, &CardLimits::default());
        assert!(card.image_url.is_none());
    }

    #[test]
    fn test_card_rating_only_when_present() {
        let mut show = sample_show(3, "Rated");
        assert!(ShowCard::from_show(&show, &CardLimits::default())
            .rating
            .is_none());

        show.rating = Some(Rating { average: Some(8.2) });
        assert_eq!(
            ShowCard::from_show(&show, &CardLimits::default()).rating,
            Some(String::from("8.2/10"))
        );
    }

    #[test]
    fn test_card_truncates_long_text() {
        let mut show = sample_show(4, "A Remarkably Long Show Title That Keeps Going On");
        show.summary = Some(String::from(
            "<p>This summary is long enough that it must be shortened for the card tile.</p>",
        ));
        let limits = CardLimits {
            genre_badges: 2,
            summary_chars: 30,
            title_chars: 20,
        };
        let card = ShowCard::from_show(&show, &limits);
        assert_eq!(card.title, "A Remarkably Long...");
        assert_eq!(card.summary.as_deref(), Some("This summary is long enough..."));
    }

    #[test]
    fn test_card_empty_summary_hidden() {
        let mut show = sample_show(6, "Quiet");
        show.summary = Some(String::from("<p> </p>"));
        assert!(ShowCard::from_show(&show, &CardLimits::default())
            .summary
            .is_none());
    }
}
