use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod admin;
pub mod error;
pub mod inventory;
pub mod promotions;
pub mod quotes;
pub mod reservations;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    Router::new()
        .route("/v1/quotes", post(quotes::create_quote))
        .route(
            "/v1/hotels/{hotel_id}/room-types/{room_type_id}/promotions",
            get(promotions::list_eligible),
        )
        .route("/v1/inventory/reserve", post(inventory::reserve))
        .route("/v1/inventory/release", post(inventory::release))
        .route("/v1/inventory", get(inventory::get_record))
        .route(
            "/v1/reservations/{reservation_id}/rooms",
            post(reservations::create_room_line).get(reservations::list_room_lines),
        )
        .merge(admin::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
