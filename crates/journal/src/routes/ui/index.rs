use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
};
use log::error;
use serde::Deserialize;

use crate::{
    templates::{index_page, IndexView, Notice},
    AddRequest, AppState, RecordSort,
};

#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub sort: Option<String>,
    pub dir: Option<String>,
    pub notice: Option<String>,
}

/// Handler for the home page (GET /)
pub async fn index_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IndexQuery>,
) -> (StatusCode, Html<String>) {
    let sort = RecordSort::from_params(query.sort.as_deref(), query.dir.as_deref());
    let notice = query.notice.as_deref().and_then(Notice::from_query);
    render_index(&state, sort, notice, StatusCode::OK, None).await
}

/// Render the home page, downgrading to an error banner if the records can't be read
pub(crate) async fn render_index(
    state: &AppState,
    sort: RecordSort,
    notice: Option<Notice>,
    status: StatusCode,
    submitted: Option<&AddRequest>,
) -> (StatusCode, Html<String>) {
    let (records, notice, status) = match state.db.list_records(sort).await {
        Ok(records) => (records, notice, status),
        Err(e) => {
            error!("error listing records: {:#}", e);
            (
                Vec::new(),
                Some(Notice::Error(format!("Failed to load records: {}", e))),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
        }
    };

    let view = IndexView {
        records: &records,
        sort,
        notice,
        submitted,
    };
    (status, Html(index_page(&view).into_string()))
}
