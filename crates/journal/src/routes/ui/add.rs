use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use log::warn;

use super::index::{render_index, IndexQuery};
use crate::{
    add_weather_record, templates::choose_location_page, templates::Notice, AddOutcome,
    AddRequest, AppState, RecordSort,
};

/// Handler for the add form (POST /add)
pub async fn add_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IndexQuery>,
    Form(form): Form<AddRequest>,
) -> Response {
    let sort = RecordSort::from_params(query.sort.as_deref(), query.dir.as_deref());
    match add_weather_record(&state.db, state.weather.as_ref(), form.clone()).await {
        Ok(AddOutcome::Created(_)) => Redirect::to("/?notice=added").into_response(),
        Ok(AddOutcome::Ambiguous(candidates)) => Html(
            choose_location_page(
                form.requested_date.trim(),
                form.city.trim(),
                form.country.trim(),
                &candidates,
            )
            .into_string(),
        )
        .into_response(),
        Err(e) => {
            warn!("add failed: {}", e);
            render_index(
                &state,
                sort,
                Some(Notice::Error(e.to_string())),
                e.status_code(),
                Some(&form),
            )
            .await
            .into_response()
        }
    }
}
