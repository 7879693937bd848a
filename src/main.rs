mod cards;
mod components;
mod detail_screen;
mod fetch;
mod handlers;
mod list_screen;
mod markup;
mod settings;
mod show;
mod tvmaze;

use std::sync::Arc;

use iced::widget::{column, container, scrollable};
use iced::{Element, Font, Length, Size, Subscription, Task, Theme};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fetch::FetchSlot;
use settings::AppSettings;
use show::{ImageCache, Message, Route, Show, BACKGROUND_SLATE};
use tvmaze::{ShowCatalog, TvMazeClient};

const INITIAL_WINDOW_SIZE: Size = Size::new(1280.0, 800.0);

pub struct MovieExplorer {
    pub settings: AppSettings,
    pub catalog: Arc<dyn ShowCatalog>,
    pub route: Route,
    pub show_list: FetchSlot<Vec<Show>>,
    pub show_detail: FetchSlot<Show>,
    pub image_cache: ImageCache,
    pub window_width: f32,
}

impl MovieExplorer {
    pub fn with_catalog(settings: AppSettings, catalog: Arc<dyn ShowCatalog>) -> Self {
        Self {
            settings,
            catalog,
            route: Route::List,
            show_list: FetchSlot::new(),
            show_detail: FetchSlot::new(),
            image_cache: ImageCache::new(),
            window_width: INITIAL_WINDOW_SIZE.width,
        }
    }

    fn new(settings: AppSettings, route: Route) -> (Self, Task<Message>) {
        let client = TvMazeClient::from_settings(&settings);
        let mut app = Self::with_catalog(settings, Arc::new(client));
        app.route = route;
        info!("Opening {}", app.route.path());
        let task = handlers::mount_current_route(&mut app);
        (app, task)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        handlers::handle_message(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        let screen = match &self.route {
            Route::List => self.view_list_screen(),
            Route::Detail(_) => self.view_detail_screen(),
        };

        let page = column![
            self.view_header(),
            scrollable(screen).width(Length::Fill).height(Length::Fill)
        ]
        .width(Length::Fill)
        .height(Length::Fill);

        container(page)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(BACKGROUND_SLATE)),
                ..Default::default()
            })
            .into()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        iced::window::resize_events().map(|(_id, size)| Message::WindowResized(size))
    }
}

fn init_tracing(default_level: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> iced::Result {
    let (settings, settings_error) = match AppSettings::load() {
        Ok(loaded) => (loaded.unwrap_or_default(), None),
        Err(error) => (AppSettings::default(), Some(error)),
    };

    init_tracing(&settings.log_level);
    if let Some(error) = settings_error {
        warn!("{}; using default settings", error);
    }

    let route = std::env::args()
        .nth(1)
        .map(|path| Route::parse(&path))
        .unwrap_or_default();

    iced::application(
        move || MovieExplorer::new(settings.clone(), route.clone()),
        MovieExplorer::update,
        MovieExplorer::view,
    )
    .title("Movie Explorer")
    .theme(MovieExplorer::theme)
    .window_size(INITIAL_WINDOW_SIZE)
    .font(iced_fonts::BOOTSTRAP_FONT_BYTES)
    .default_font(Font::DEFAULT)
    .subscription(MovieExplorer::subscription)
    .run()
}
