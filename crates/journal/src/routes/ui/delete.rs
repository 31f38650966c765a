use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header::REFERER, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use log::error;

use super::index::{render_index, IndexQuery};
use crate::{templates::Notice, AppState, RecordSort};

/// Handler for the delete button (POST /delete/{id})
pub async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Query(query): Query<IndexQuery>,
    headers: HeaderMap,
) -> Response {
    let sort = RecordSort::from_params(query.sort.as_deref(), query.dir.as_deref());
    match state.db.delete_record(id).await {
        Ok(true) => {
            let target = headers
                .get(REFERER)
                .and_then(|value| value.to_str().ok())
                .filter(|value| !value.is_empty())
                .unwrap_or("/?notice=deleted");
            Redirect::to(target).into_response()
        }
        Ok(false) => render_index(
            &state,
            sort,
            Some(Notice::Error(format!("Record {} not found.", id))),
            StatusCode::NOT_FOUND,
            None,
        )
        .await
        .into_response(),
        Err(e) => {
            error!("error deleting record {}: {:#}", id, e);
            render_index(
                &state,
                sort,
                Some(Notice::Error(format!("Failed to delete record: {}", e))),
                StatusCode::INTERNAL_SERVER_ERROR,
                None,
            )
            .await
            .into_response()
        }
    }
}
