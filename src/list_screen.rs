use iced::widget::{column, container, row, text, Column, Row, Space};
use iced::{Element, Length, Padding};

use crate::cards::ShowCard;
use crate::components::{bold_text, skeleton_block};
use crate::fetch::FetchState;
use crate::show::{Message, Show, TEXT_MUTED, TEXT_WHITE};
use crate::MovieExplorer;

pub const SKELETON_CARD_COUNT: usize = 12;
const GRID_SPACING: f32 = 24.0;

/// Grid columns for a window width, mirroring the 1/2/3/4 responsive layout.
pub fn grid_columns(window_width: f32) -> usize {
    match window_width {
        w if w < 768.0 => 1,
        w if w < 1024.0 => 2,
        w if w < 1280.0 => 3,
        _ => 4,
    }
}

/// Splits `items` into rows of `columns`; the last row is left short.
pub fn grid_rows<T>(items: Vec<T>, columns: usize) -> Vec<Vec<T>> {
    let columns = columns.max(1);
    let mut rows = Vec::with_capacity(items.len().div_ceil(columns));
    let mut current = Vec::with_capacity(columns);
    for item in items {
        current.push(item);
        if current.len() == columns {
            rows.push(std::mem::replace(&mut current, Vec::with_capacity(columns)));
        }
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

fn grid<'a>(cells: Vec<Element<'a, Message>>, columns: usize) -> Element<'a, Message> {
    let rows: Vec<Element<Message>> = grid_rows(cells, columns)
        .into_iter()
        .map(|mut row_cells| {
            while row_cells.len() < columns {
                row_cells.push(Space::new().width(Length::Fill).into());
            }
            Row::with_children(row_cells)
                .spacing(GRID_SPACING)
                .width(Length::Fill)
                .into()
        })
        .collect();

    Column::with_children(rows)
        .spacing(GRID_SPACING)
        .width(Length::Fill)
        .into()
}

impl MovieExplorer {
    pub fn grid_columns(&self) -> usize {
        grid_columns(self.window_width)
    }

    pub fn view_list_screen(&self) -> Element<'_, Message> {
        let body = match self.show_list.state() {
            FetchState::Loading => self.view_list_skeleton(),
            FetchState::Failed(message) => {
                self.view_centered_error("Oops! Something went wrong", message, None)
            }
            FetchState::Loaded(shows) => self.view_show_grid(shows),
        };

        container(body)
            .width(Length::Fill)
            .padding(Padding::new(32.0))
            .into()
    }

    fn view_list_skeleton(&self) -> Element<'_, Message> {
        let cells: Vec<Element<Message>> = (0..SKELETON_CARD_COUNT)
            .map(|_| {
                column![
                    skeleton_block(Length::Fill, 256.0, 6.0),
                    row![
                        skeleton_block(Length::FillPortion(3), 16.0, 4.0),
                        Space::new().width(Length::FillPortion(1))
                    ],
                    row![
                        skeleton_block(Length::FillPortion(1), 16.0, 4.0),
                        Space::new().width(Length::FillPortion(1))
                    ],
                    skeleton_block(Length::Fill, 40.0, 6.0),
                ]
                .spacing(16)
                .width(Length::Fill)
                .into()
            })
            .collect();

        grid(cells, self.grid_columns())
    }

    fn view_show_grid<'a>(&'a self, shows: &'a [Show]) -> Element<'a, Message> {
        let cards: Vec<Element<Message>> = shows
            .iter()
            .map(|show| self.view_show_card(ShowCard::from_show(show, &self.settings.card)))
            .collect();

        let heading = column![
            bold_text("Discover Movies & Shows", 30, TEXT_WHITE),
            text("Explore our collection of amazing movies and TV shows")
                .size(16)
                .color(TEXT_MUTED)
        ]
        .spacing(8);

        column![heading, grid(cards, self.grid_columns())]
            .spacing(32)
            .width(Length::Fill)
            .into()
    }
}
