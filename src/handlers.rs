use iced::{Size, Task};
use tracing::{debug, warn};

use crate::detail_screen::NOT_FOUND_MESSAGE;
use crate::fetch::{Settled, Ticket};
use crate::show::{ApiError, Message, Route, Show};
use crate::tvmaze::{fetch_image_bytes, load_show, load_show_list};
use crate::MovieExplorer;

pub const LIST_FAILURE_MESSAGE: &str = "Failed to fetch movies. Please try again later.";
pub const DETAIL_FAILURE_MESSAGE: &str = "Failed to fetch movie details. Please try again later.";

pub fn handle_message(app: &mut MovieExplorer, message: Message) -> Task<Message> {
    match message {
        Message::Navigate(route) => handle_navigate(app, route),
        Message::ListLoaded(ticket, result) => handle_list_loaded(app, ticket, result),
        Message::DetailLoaded(ticket, result) => handle_detail_loaded(app, ticket, *result),
        Message::LoadImage(url) => handle_load_image(app, url),
        Message::ImageLoaded(url, result) => handle_image_loaded(app, url, result),
        Message::WindowResized(size) => handle_window_resized(app, size),
    }
}

fn handle_navigate(app: &mut MovieExplorer, route: Route) -> Task<Message> {
    if app.route == route {
        return Task::none();
    }
    app.route = route;
    mount_current_route(app)
}

/// Activates the screen for `app.route`, closing the other one so its late
/// responses are dropped.
pub fn mount_current_route(app: &mut MovieExplorer) -> Task<Message> {
    match app.route.clone() {
        Route::List => {
            app.show_detail.close();
            let ticket = app.show_list.begin();
            let catalog = app.catalog.clone();
            let limit = app.settings.list_limit;
            Task::perform(load_show_list(catalog, limit), move |result| {
                Message::ListLoaded(ticket, result)
            })
        }
        Route::Detail(id) => {
            app.show_list.close();
            if id.trim().is_empty() {
                warn!("Detail route without an identifier, not fetching");
                app.show_detail.reject(NOT_FOUND_MESSAGE);
                return Task::none();
            }
            let ticket = app.show_detail.begin();
            let catalog = app.catalog.clone();
            Task::perform(load_show(catalog, id), move |result| {
                Message::DetailLoaded(ticket, Box::new(result))
            })
        }
    }
}

fn handle_list_loaded(
    app: &mut MovieExplorer,
    ticket: Ticket,
    result: Result<Vec<Show>, ApiError>,
) -> Task<Message> {
    if let Err(error) = &result {
        warn!("Error fetching shows: {}", error);
    }
    let image_urls: Vec<String> = result
        .as_ref()
        .map(|shows| {
            shows
                .iter()
                .filter_map(|s| s.medium_image().map(String::from))
                .collect()
        })
        .unwrap_or_default();

    match app.show_list.settle(ticket, result, LIST_FAILURE_MESSAGE) {
        Settled::Applied => request_images(app, image_urls),
        Settled::Stale => {
            debug!(
                ?ticket,
                awaiting = ?app.show_list.awaiting(),
                "Discarding stale show list response"
            );
            Task::none()
        }
    }
}

fn handle_detail_loaded(
    app: &mut MovieExplorer,
    ticket: Ticket,
    result: Result<Show, ApiError>,
) -> Task<Message> {
    if let Err(error) = &result {
        warn!("Error fetching show details: {}", error);
    }
    let poster_url = result
        .as_ref()
        .ok()
        .and_then(|show| show.original_image().map(String::from));

    match app.show_detail.settle(ticket, result, DETAIL_FAILURE_MESSAGE) {
        Settled::Applied => request_images(app, poster_url.into_iter().collect()),
        Settled::Stale => {
            debug!(
                ?ticket,
                awaiting = ?app.show_detail.awaiting(),
                "Discarding stale show detail response"
            );
            Task::none()
        }
    }
}

fn request_images(app: &MovieExplorer, urls: Vec<String>) -> Task<Message> {
    let tasks: Vec<Task<Message>> = urls
        .into_iter()
        .filter(|url| app.image_cache.should_request(url))
        .map(|url| Task::done(Message::LoadImage(url)))
        .collect();
    Task::batch(tasks)
}

fn handle_load_image(app: &mut MovieExplorer, url: String) -> Task<Message> {
    if !app.image_cache.should_request(&url) {
        return Task::none();
    }
    app.image_cache.mark_pending(url.clone());

    Task::perform(fetch_image_bytes(url.clone()), move |result| {
        let result = result.map(|bytes| iced::widget::image::Handle::from_bytes(bytes));
        Message::ImageLoaded(url, result)
    })
}

fn handle_image_loaded(
    app: &mut MovieExplorer,
    url: String,
    result: Result<iced::widget::image::Handle, String>,
) -> Task<Message> {
    match result {
        Ok(handle) => app.image_cache.insert(url, handle),
        Err(error) => {
            debug!("Image {} unavailable: {}", url, error);
            app.image_cache.mark_failed(url);
        }
    }
    Task::none()
}

fn handle_window_resized(app: &mut MovieExplorer, size: Size) -> Task<Message> {
    debug!(width = size.width, height = size.height, "Window resized");
    app.window_width = size.width;
    Task::none()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::fetch::FetchState;
    use crate::settings::AppSettings;
    use crate::tvmaze::tests::{sample_show, FakeCatalog};

    fn app() -> MovieExplorer {
        MovieExplorer::with_catalog(AppSettings::default(), Arc::new(FakeCatalog::with_count(3)))
    }

    fn shows(count: u64) -> Vec<Show> {
        (1..=count)
            .map(|id| sample_show(id, &format!("Show {}", id)))
            .collect()
    }

    fn open_detail(app: &mut MovieExplorer, id: &str) -> Ticket {
        let _ = handle_message(app, Message::Navigate(Route::Detail(id.to_string())));
        app.show_detail.awaiting().expect("detail request issued")
    }

    #[test]
    fn test_mount_list_starts_loading() {
        let mut app = app();
        let _ = mount_current_route(&mut app);
        assert!(app.show_list.is_loading());
        assert!(app.show_list.awaiting().is_some());
    }

    #[test]
    fn test_list_loaded_keeps_response_order() {
        let mut app = app();
        let _ = mount_current_route(&mut app);
        let ticket = app.show_list.awaiting().unwrap();
        let _ = handle_message(&mut app, Message::ListLoaded(ticket, Ok(shows(24))));

        let loaded = app.show_list.loaded().unwrap();
        assert_eq!(loaded.len(), 24);
        assert_eq!(loaded[0].name, "Show 1");
        assert!(!app.show_list.is_loading());
    }

    #[test]
    fn test_list_empty_response_is_not_an_error() {
        let mut app = app();
        let _ = mount_current_route(&mut app);
        let ticket = app.show_list.awaiting().unwrap();
        let _ = handle_message(&mut app, Message::ListLoaded(ticket, Ok(Vec::new())));
        assert_eq!(app.show_list.state(), &FetchState::Loaded(Vec::new()));
    }

    #[test]
    fn test_list_network_failure_shows_generic_message() {
        let mut app = app();
        let _ = mount_current_route(&mut app);
        let ticket = app.show_list.awaiting().unwrap();
        let error = ApiError::Network(String::from("dns error: failed to lookup address"));
        let _ = handle_message(&mut app, Message::ListLoaded(ticket, Err(error)));

        match app.show_list.state() {
            FetchState::Failed(message) => {
                assert_eq!(message, LIST_FAILURE_MESSAGE);
                assert!(!message.contains("dns"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_detail_success_resolves_record() {
        let mut app = app();
        let ticket = open_detail(&mut app, "0");
        let mut show = sample_show(0, "Under the Dome");
        show.genres = vec![
            String::from("Drama"),
            String::from("Science-Fiction"),
            String::from("Thriller"),
        ];
        let _ = handle_message(&mut app, Message::DetailLoaded(ticket, Box::new(Ok(show))));

        assert!(!app.show_detail.is_loading());
        let loaded = app.show_detail.loaded().unwrap();
        assert_eq!(loaded.name, "Under the Dome");
        assert_eq!(loaded.genres.len(), 3);
    }

    #[test]
    fn test_detail_failure_is_not_found_state() {
        let mut app = app();
        let ticket = open_detail(&mut app, "999999");
        let error = ApiError::NotFound(String::from("https://api.tvmaze.com/shows/999999"));
        let _ = handle_message(&mut app, Message::DetailLoaded(ticket, Box::new(Err(error))));
        assert_eq!(
            app.show_detail.state(),
            &FetchState::Failed(DETAIL_FAILURE_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_empty_identifier_issues_no_request() {
        let mut app = app();
        let _ = handle_message(&mut app, Message::Navigate(Route::Detail(String::new())));
        assert!(app.show_detail.awaiting().is_none());
        assert!(!app.show_detail.is_loading());
        assert_eq!(
            app.show_detail.state(),
            &FetchState::Failed(NOT_FOUND_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_identifier_change_discards_stale_response() {
        let mut app = app();
        let first = open_detail(&mut app, "1");
        let second = open_detail(&mut app, "2");

        let _ = handle_message(
            &mut app,
            Message::DetailLoaded(second, Box::new(Ok(sample_show(2, "Second")))),
        );
        let _ = handle_message(
            &mut app,
            Message::DetailLoaded(first, Box::new(Ok(sample_show(1, "First")))),
        );

        assert_eq!(app.show_detail.loaded().unwrap().name, "Second");
    }

    #[test]
    fn test_leaving_screen_drops_late_response() {
        let mut app = app();
        let ticket = open_detail(&mut app, "1");
        let _ = handle_message(&mut app, Message::Navigate(Route::List));
        let _ = handle_message(
            &mut app,
            Message::DetailLoaded(ticket, Box::new(Ok(sample_show(1, "Late")))),
        );
        assert!(app.show_detail.loaded().is_none());
    }

    #[test]
    fn test_back_from_missing_show_reloads_list() {
        let mut app = app();
        let _ = handle_message(&mut app, Message::Navigate(Route::parse("/movie/999999")));
        let ticket = app.show_detail.awaiting().expect("detail request issued");
        let error = ApiError::NotFound(String::from("https://api.tvmaze.com/shows/999999"));
        let _ = handle_message(&mut app, Message::DetailLoaded(ticket, Box::new(Err(error))));
        assert!(matches!(app.show_detail.state(), FetchState::Failed(_)));
        assert!(app.show_list.awaiting().is_none());

        let _ = handle_message(&mut app, Message::Navigate(Route::List));
        assert_eq!(app.route, Route::List);
        assert!(app.show_list.is_loading());
        assert!(app.show_list.awaiting().is_some());
    }

    #[test]
    fn test_returning_to_list_fetches_again() {
        let mut app = app();
        let _ = mount_current_route(&mut app);
        let first = app.show_list.awaiting().unwrap();
        let _ = handle_message(&mut app, Message::ListLoaded(first, Ok(shows(2))));

        open_detail(&mut app, "1");
        let _ = handle_message(&mut app, Message::Navigate(Route::List));

        assert!(app.show_list.is_loading());
        let second = app.show_list.awaiting().unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_same_route_does_not_refetch() {
        let mut app = app();
        let ticket = open_detail(&mut app, "1");
        let _ = handle_message(&mut app, Message::Navigate(Route::Detail(String::from("1"))));
        assert_eq!(app.show_detail.awaiting(), Some(ticket));
    }

    #[test]
    fn test_failed_image_marks_unavailable() {
        let mut app = app();
        let url = String::from("https://example.com/poster.jpg");
        let _ = handle_message(&mut app, Message::LoadImage(url.clone()));
        assert!(!app.image_cache.should_request(&url));

        let _ = handle_message(
            &mut app,
            Message::ImageLoaded(url.clone(), Err(String::from("404"))),
        );
        assert!(matches!(
            app.image_cache.slot(Some(&url)),
            crate::show::ImageSlot::Unavailable
        ));
    }

    #[test]
    fn test_window_resize_changes_columns() {
        let mut app = app();
        let _ = handle_message(&mut app, Message::WindowResized(Size::new(700.0, 600.0)));
        assert_eq!(app.grid_columns(), 1);
        let _ = handle_message(&mut app, Message::WindowResized(Size::new(1400.0, 900.0)));
        assert_eq!(app.grid_columns(), 4);
    }
}
