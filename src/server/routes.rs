use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use crate::model::{Note, VersionedNote};
use crate::pagination::{self, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, Page, PageMeta};
use crate::server::AppState;
use crate::server::error::{ApiError, ApiResult, parse_id};
use crate::storage::{Repository, VersionedNoteStore};

/// Raw listing parameters. Kept as strings so that a non-numeric value
/// falls back to the default instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
}

impl ListParams {
    pub fn page(&self) -> i64 {
        parse_or(self.page.as_deref(), DEFAULT_PAGE)
    }

    pub fn page_size(&self) -> i64 {
        parse_or(self.page_size.as_deref(), DEFAULT_PAGE_SIZE)
    }
}

fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(default)
}

#[derive(Debug, Serialize)]
pub struct NotesPage {
    pub notes: Vec<Note>,
    #[serde(flatten)]
    pub meta: PageMeta,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

fn body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

// ========== Notes ==========

/// `GET /notes?page=&pageSize=`
///
/// A query string that does not deserialize at all (e.g. a repeated key) is
/// treated like absent parameters.
pub async fn list_notes(
    State(state): State<AppState>,
    query: std::result::Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Json<NotesPage>> {
    let params = match query {
        Ok(Query(params)) => params,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Unreadable listing query, using defaults");
            ListParams::default()
        }
    };
    let Page { items, meta } = pagination::list_page(&state.notes, params.page(), params.page_size())?;
    Ok(Json(NotesPage { notes: items, meta }))
}

/// `GET /notes/{id}/versions`
pub async fn note_versions(
    State(store): State<VersionedNoteStore>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<VersionedNote>>> {
    let id = parse_id(&id)?;
    Ok(Json(store.for_note(id)?))
}

// ========== Uniform CRUD ==========

pub async fn list_all<R>(State(repo): State<R>) -> ApiResult<Json<Vec<R::Entity>>>
where
    R: Repository,
    R::Entity: Serialize,
{
    Ok(Json(repo.get_all()?))
}

/// Insert, then read the row back so the response carries the assigned id
/// and timestamps
pub async fn create<R>(
    State(repo): State<R>,
    payload: std::result::Result<Json<R::Entity>, JsonRejection>,
) -> ApiResult<Json<R::Entity>>
where
    R: Repository,
    R::Entity: Serialize + DeserializeOwned,
{
    let entity = body(payload)?;
    let id = repo.create(&entity)?;
    tracing::info!(entity = R::LABEL, id, "Created");
    Ok(Json(repo.get_by_id(id)?))
}

pub async fn get_one<R>(State(repo): State<R>, Path(id): Path<String>) -> ApiResult<Json<R::Entity>>
where
    R: Repository,
    R::Entity: Serialize,
{
    let id = parse_id(&id)?;
    Ok(Json(repo.get_by_id(id)?))
}

pub async fn update<R>(
    State(repo): State<R>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<R::Entity>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>>
where
    R: Repository,
    R::Entity: DeserializeOwned,
{
    let id = parse_id(&id)?;
    let entity = body(payload)?;
    repo.update(id, &entity)?;
    Ok(MessageResponse::new(format!("{} updated successfully", R::LABEL)))
}

pub async fn remove<R>(State(repo): State<R>, Path(id): Path<String>) -> ApiResult<Json<MessageResponse>>
where
    R: Repository,
{
    let id = parse_id(&id)?;
    repo.delete(id)?;
    tracing::info!(entity = R::LABEL, id, "Deleted");
    Ok(MessageResponse::new(format!("{} deleted successfully", R::LABEL)))
}
