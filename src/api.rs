use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing::debug;

use crate::pipeline::select_day;
use crate::profile;
use crate::store::MenuStore;
use crate::weekday::DayFilter;

pub fn router(store: Arc<MenuStore>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/pdf-links", get(get_pdf_links))
        .route("/{restaurant}/{weekday}", get(get_menu))
        .with_state(store)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any))
}

async fn health() -> &'static str {
    "ok"
}

/// `GET /{restaurant}/{weekday}`: `weekday` is `0..=6`; anything else returns
/// the whole week.
pub async fn get_menu(
    State(store): State<Arc<MenuStore>>,
    Path((restaurant, weekday)): Path<(String, String)>,
) -> Response {
    debug!(%restaurant, %weekday, "menu requested");

    let Ok(profile) = profile::lookup(&restaurant) else {
        return (StatusCode::BAD_REQUEST, "Invalid restaurant").into_response();
    };
    let Some(entry) = store.get(profile.id) else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            format!("Menu for {} not loaded yet", profile.name),
        )
            .into_response();
    };

    match DayFilter::from_path_segment(&weekday) {
        DayFilter::All => Json(&entry.menus).into_response(),
        DayFilter::Day(day) => match select_day(&entry.menus, day) {
            Some(menu) => Json(menu).into_response(),
            None => (StatusCode::NOT_FOUND, "Menu not found").into_response(),
        },
    }
}

pub async fn get_pdf_links(State(store): State<Arc<MenuStore>>) -> Response {
    let links = store.links();
    if links.is_empty() {
        return (StatusCode::NOT_FOUND, "No pdf links found").into_response();
    }
    Json(links).into_response()
}
