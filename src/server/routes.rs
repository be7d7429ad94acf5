use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;
use crate::bookmark::{Bookmark, BookmarkUpdate, NewBookmark};
use crate::server::error::{ApiError, BOOKMARK_NOT_FOUND};
use crate::server::AppState;
use std::sync::Arc;

type ApiResult<T> = Result<T, ApiError>;

pub async fn create_bookmark(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewBookmark>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Bookmark>)> {
    let Json(input) = payload?;
    input.validate()?;

    let bookmark = input.into_bookmark();
    state.store.lock().await.create(&bookmark)?;
    tracing::debug!(id = %bookmark.id, url = %bookmark.url, "created bookmark");

    Ok((StatusCode::CREATED, Json(bookmark)))
}

pub async fn list_bookmarks(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Bookmark>>> {
    let bookmarks = state.store.lock().await.get_all()?;
    Ok(Json(bookmarks))
}

pub async fn get_bookmark(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Bookmark>> {
    state
        .store
        .lock()
        .await
        .get_by_id(&id)?
        .map(Json)
        .ok_or(ApiError::NotFound(BOOKMARK_NOT_FOUND))
}

/// Partial update: only the fields present in the body are changed.
pub async fn update_bookmark(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<BookmarkUpdate>, JsonRejection>,
) -> ApiResult<Json<Bookmark>> {
    let Json(update) = payload?;
    update.validate()?;

    let bookmark = state.store.lock().await.update(&id, &update)?;
    tracing::debug!(%id, "updated bookmark");

    Ok(Json(bookmark))
}

pub async fn delete_bookmark(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.store.lock().await.delete(&id)?;
    tracing::debug!(%id, "deleted bookmark");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not found")
}
