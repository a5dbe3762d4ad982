use axum::{
    Router,
    extract::{FromRef, Request},
    http::{HeaderValue, Method, header},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use serde::{Serialize, de::DeserializeOwned};
use std::net::SocketAddr;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use crate::storage::{
    AttachmentStore, Database, NoteStore, NoteTypeStore, NotesAttachmentStore, NotesTagStore,
    Repository, TagStore, UserNotesStore, UserStore, VersionedNoteStore,
};

pub mod error;
pub mod links;
pub mod routes;

pub use error::{ApiError, ErrorResponse};

/// Server state: one repository per table, all sharing a single [`Database`]
#[derive(Clone)]
pub struct AppState {
    pub notes: NoteStore,
    pub tags: TagStore,
    pub attachments: AttachmentStore,
    pub users: UserStore,
    pub note_types: NoteTypeStore,
    pub versioned_notes: VersionedNoteStore,
    pub notes_tags: NotesTagStore,
    pub notes_attachments: NotesAttachmentStore,
    pub user_notes: UserNotesStore,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            notes: NoteStore::new(db.clone()),
            tags: TagStore::new(db.clone()),
            attachments: AttachmentStore::new(db.clone()),
            users: UserStore::new(db.clone()),
            note_types: NoteTypeStore::new(db.clone()),
            versioned_notes: VersionedNoteStore::new(db.clone()),
            notes_tags: NotesTagStore::new(db.clone()),
            notes_attachments: NotesAttachmentStore::new(db.clone()),
            user_notes: UserNotesStore::new(db),
        }
    }
}

macro_rules! state_from_ref {
    ($($store:ty => $field:ident),* $(,)?) => {
        $(
            impl FromRef<AppState> for $store {
                fn from_ref(state: &AppState) -> Self {
                    state.$field.clone()
                }
            }
        )*
    };
}

state_from_ref! {
    NoteStore => notes,
    TagStore => tags,
    AttachmentStore => attachments,
    UserStore => users,
    NoteTypeStore => note_types,
    VersionedNoteStore => versioned_notes,
    NotesTagStore => notes_tags,
    NotesAttachmentStore => notes_attachments,
    UserNotesStore => user_notes,
}

/// Mount `GET|POST {base}` and `GET|PUT|DELETE {base}/{id}` for one repository
fn crud<R>(router: Router<AppState>, base: &str) -> Router<AppState>
where
    R: Repository + FromRef<AppState>,
    R::Entity: Serialize + DeserializeOwned,
{
    router
        .route(base, get(routes::list_all::<R>).post(routes::create::<R>))
        .route(
            &format!("{}/{{id}}", base),
            get(routes::get_one::<R>)
                .put(routes::update::<R>)
                .delete(routes::remove::<R>),
        )
}

/// All routes, without CORS or tracing layers
pub fn router(db: Database) -> Router {
    let router = Router::new()
        .route("/notes", get(routes::list_notes).post(routes::create::<NoteStore>))
        .route(
            "/notes/{id}",
            get(routes::get_one::<NoteStore>)
                .put(routes::update::<NoteStore>)
                .delete(routes::remove::<NoteStore>),
        )
        .route("/notes/{id}/versions", get(routes::note_versions))
        // Note <-> tag links
        .route("/notes/{id}/tags", get(links::note_tags))
        .route("/notes/{id}/tags/{tag_id}", post(links::link_tag).delete(links::unlink_tag))
        .route("/tags/{id}/notes", get(links::tag_notes))
        // Note <-> attachment links
        .route("/notes/{id}/attachments", get(links::note_attachments))
        .route(
            "/notes/{id}/attachments/{attachment_id}",
            post(links::link_attachment).delete(links::unlink_attachment),
        )
        .route("/attachments/{id}/notes", get(links::attachment_notes))
        // User <-> note links
        .route("/notes/{id}/users", get(links::note_users))
        .route("/users/{id}/notes", get(links::user_notes))
        .route(
            "/users/{id}/notes/{note_id}",
            post(links::link_user_note).delete(links::unlink_user_note),
        );

    let router = crud::<TagStore>(router, "/tags");
    let router = crud::<AttachmentStore>(router, "/attachments");
    let router = crud::<UserStore>(router, "/users");
    let router = crud::<NoteTypeStore>(router, "/note-types");
    let router = crud::<VersionedNoteStore>(router, "/versioned-notes");

    router.with_state(AppState::new(db))
}

/// Log every failed request with its path and error message
async fn log_request_errors(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let response = next.run(req).await;

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        let message = response
            .extensions()
            .get::<error::ErrorMessage>()
            .map(|m| m.0.as_str())
            .unwrap_or("");
        tracing::error!(%method, %path, status = status.as_u16(), error = message, "Request error");
    }
    response
}

/// CORS policy for the given origins; `*` allows any origin
pub fn cors_layer(allowed_origins: &[String]) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE]);

    if allowed_origins.iter().any(|o| o == "*") {
        return Ok(layer.allow_origin(Any));
    }

    let origins = allowed_origins
        .iter()
        .map(|o| o.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}

/// The full application: routes plus error logging, request tracing and CORS
pub fn app(db: Database, allowed_origins: &[String]) -> anyhow::Result<Router> {
    Ok(router(db)
        .layer(middleware::from_fn(log_request_errors))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins)?))
}

/// Where and how to serve
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

pub async fn start_server(settings: ServerSettings, db: Database) -> anyhow::Result<()> {
    let app = app(db, &settings.allowed_origins)?;

    let addr: SocketAddr = format!("{}:{}", settings.host, settings.port).parse()?;
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

#[cfg(test)]
mod tests;
