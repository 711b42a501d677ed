/// Notes CRUD endpoints
///
/// Every handler reads the authenticated subject out of the [`AuthContext`]
/// extension the bearer middleware inserted, and passes it to the model
/// layer as the owner filter. Authorization is exactly that filter: a note
/// belonging to someone else is reported as absent, never as forbidden.
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use notevault_shared::{
    auth::middleware::AuthContext,
    models::note::{CreateNote, Note, UpdateNote},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Default page size for listing
const DEFAULT_LIMIT: i64 = 100;

/// Create note request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateNoteRequest {
    /// Title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Note body
    pub content: String,
}

/// Update note request; omitted fields stay unchanged
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateNoteRequest {
    /// New title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    /// New body
    pub content: Option<String>,
}

/// Pagination query parameters
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Rows to skip
    pub skip: Option<i64>,

    /// Maximum rows to return
    pub limit: Option<i64>,
}

/// Delete response
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Always true on success
    pub ok: bool,
}

/// Creates a note owned by the caller
pub async fn create_note(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateNoteRequest>,
) -> ApiResult<Json<Note>> {
    req.validate()?;

    let note = Note::create(
        &state.db,
        &auth.subject,
        CreateNote {
            title: req.title,
            content: req.content,
        },
    )
    .await?;

    Ok(Json(note))
}

/// Lists the caller's notes
pub async fn list_notes(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<Note>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, DEFAULT_LIMIT);
    let skip = params.skip.unwrap_or(0).max(0);

    let notes = Note::list_for_owner(&state.db, &auth.subject, limit, skip).await?;

    Ok(Json(notes))
}

/// Fetches one of the caller's notes
pub async fn get_note(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Note>> {
    let note = Note::find_for_owner(&state.db, id, &auth.subject)
        .await?
        .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    Ok(Json(note))
}

/// Updates one of the caller's notes
pub async fn update_note(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateNoteRequest>,
) -> ApiResult<Json<Note>> {
    req.validate()?;

    let note = Note::update_for_owner(
        &state.db,
        id,
        &auth.subject,
        UpdateNote {
            title: req.title,
            content: req.content,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Note not found".to_string()))?;

    Ok(Json(note))
}

/// Deletes one of the caller's notes
pub async fn delete_note(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DeleteResponse>> {
    let deleted = Note::delete_for_owner(&state.db, id, &auth.subject).await?;

    if !deleted {
        return Err(ApiError::NotFound("Note not found".to_string()));
    }

    Ok(Json(DeleteResponse { ok: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_validation() {
        let ok = CreateNoteRequest {
            title: "groceries".to_string(),
            content: "milk, eggs".to_string(),
        };
        assert!(ok.validate().is_ok());

        let empty_title = CreateNoteRequest {
            title: "".to_string(),
            content: "milk".to_string(),
        };
        assert!(empty_title.validate().is_err());
    }

    #[test]
    fn test_update_request_allows_partial_bodies() {
        let title_only = UpdateNoteRequest {
            title: Some("new title".to_string()),
            content: None,
        };
        assert!(title_only.validate().is_ok());

        let nothing = UpdateNoteRequest {
            title: None,
            content: None,
        };
        assert!(nothing.validate().is_ok());
    }
}
