use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use skyscout_core::view::{FlightListView, PriceChart, QueryForm};
use skyscout_core::{CoreError, Settlement};
use tracing::info;
use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/flights/search", post(search_flights))
        .route("/v1/flights", get(list_flights))
        .route("/v1/flights/chart", get(price_chart))
}

/// POST /v1/flights/search
/// Validates the form, runs the query and returns the refreshed list.
/// A failing source is reported in the view's `error`, not as an HTTP error.
async fn search_flights(
    State(state): State<AppState>,
    Json(form): Json<QueryForm>,
) -> Result<Json<FlightListView>, AppError> {
    let query = form.validate().map_err(CoreError::from)?;

    let (token, source) = {
        let mut controller = state.controller.lock().await;
        (controller.begin_query(query.clone()), controller.source())
    };

    // Settles even if this request is dropped mid-search.
    let task_state = state.clone();
    let settle = tokio::spawn(async move {
        let result = source
            .search(&query.origin, &query.destination, &query.date)
            .await;

        let mut controller = task_state.controller.lock().await;
        match controller.complete_query(token, result) {
            Settlement::Stale => info!("Search {:?} was superseded by a newer one", token),
            settlement => info!("Search {:?} settled: {:?}", token, settlement),
        }
        FlightListView::from_state(controller.state())
    });

    let view = settle.await.map_err(|e| AppError::Internal(e.into()))?;
    Ok(Json(view))
}

/// GET /v1/flights
async fn list_flights(State(state): State<AppState>) -> Json<FlightListView> {
    let controller = state.controller.lock().await;
    Json(FlightListView::from_state(controller.state()))
}

/// GET /v1/flights/chart
async fn price_chart(State(state): State<AppState>) -> Response {
    let controller = state.controller.lock().await;
    match PriceChart::from_flights(controller.derived_flights()) {
        Some(chart) => Json(chart).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
