use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use skyscout_core::view::{FilterPanel, FlightListView, StopSelection};
use skyscout_core::{CoreError, FilterCriteria, SearchController};
use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct MaxPriceRequest {
    pub max_price: Option<f64>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/filters",
            get(get_filters).put(replace_filters).delete(clear_filters),
        )
        .route("/v1/filters/airlines/{airline}/toggle", post(toggle_airline))
        .route("/v1/filters/stops", put(set_stops))
        .route("/v1/filters/max-price", put(set_max_price))
}

fn apply(controller: &mut SearchController, criteria: FilterCriteria) -> Result<Json<FlightListView>, AppError> {
    controller.set_criteria(criteria).map_err(CoreError::from)?;
    Ok(Json(FlightListView::from_state(controller.state())))
}

/// GET /v1/filters
async fn get_filters(State(state): State<AppState>) -> Json<FilterPanel> {
    let controller = state.controller.lock().await;
    Json(FilterPanel::from_state(controller.state()))
}

/// PUT /v1/filters
/// Wholesale replacement; omitted fields mean "no constraint".
async fn replace_filters(
    State(state): State<AppState>,
    Json(criteria): Json<FilterCriteria>,
) -> Result<Json<FlightListView>, AppError> {
    let mut controller = state.controller.lock().await;
    apply(&mut controller, criteria)
}

/// DELETE /v1/filters
async fn clear_filters(State(state): State<AppState>) -> Json<FlightListView> {
    let mut controller = state.controller.lock().await;
    controller.clear_criteria();
    Json(FlightListView::from_state(controller.state()))
}

/// POST /v1/filters/airlines/{airline}/toggle
async fn toggle_airline(
    State(state): State<AppState>,
    Path(airline): Path<String>,
) -> Result<Json<FlightListView>, AppError> {
    let mut controller = state.controller.lock().await;

    let known = controller.raw_flights().iter().any(|f| f.airline == airline)
        || controller.criteria().is_airline_selected(&airline);
    if !known {
        return Err(AppError::NotFoundError(format!("Unknown airline: {}", airline)));
    }

    let criteria = controller.criteria().clone().with_airline_toggled(&airline);
    apply(&mut controller, criteria)
}

/// PUT /v1/filters/stops
async fn set_stops(
    State(state): State<AppState>,
    Json(selection): Json<StopSelection>,
) -> Result<Json<FlightListView>, AppError> {
    let mut controller = state.controller.lock().await;
    let criteria = controller.criteria().clone().with_max_stops(selection.max_stops());
    apply(&mut controller, criteria)
}

/// PUT /v1/filters/max-price
async fn set_max_price(
    State(state): State<AppState>,
    Json(req): Json<MaxPriceRequest>,
) -> Result<Json<FlightListView>, AppError> {
    let mut controller = state.controller.lock().await;
    let criteria = controller.criteria().clone().with_max_price(req.max_price);
    apply(&mut controller, criteria)
}
