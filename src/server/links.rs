//! Handlers for the note/tag, note/attachment and user/note links

use axum::{
    Json,
    extract::{Path, State},
};
use crate::model::{Attachment, Note, NotesAttachment, NotesTag, Tag, User, UserNote};
use crate::server::error::{ApiResult, parse_id};
use crate::server::routes::MessageResponse;
use crate::storage::{NotesAttachmentStore, NotesTagStore, UserNotesStore};

fn parse_pair((left, right): (String, String)) -> ApiResult<(i64, i64)> {
    Ok((parse_id(&left)?, parse_id(&right)?))
}

// ========== Notes <-> Tags ==========

pub async fn note_tags(
    State(store): State<NotesTagStore>,
    Path(note_id): Path<String>,
) -> ApiResult<Json<Vec<Tag>>> {
    Ok(Json(store.tags_for_note(parse_id(&note_id)?)?))
}

pub async fn tag_notes(
    State(store): State<NotesTagStore>,
    Path(tag_id): Path<String>,
) -> ApiResult<Json<Vec<Note>>> {
    Ok(Json(store.notes_for_tag(parse_id(&tag_id)?)?))
}

pub async fn link_tag(
    State(store): State<NotesTagStore>,
    Path(ids): Path<(String, String)>,
) -> ApiResult<Json<NotesTag>> {
    let (note_id, tag_id) = parse_pair(ids)?;
    Ok(Json(store.link(note_id, tag_id)?))
}

pub async fn unlink_tag(
    State(store): State<NotesTagStore>,
    Path(ids): Path<(String, String)>,
) -> ApiResult<Json<MessageResponse>> {
    let (note_id, tag_id) = parse_pair(ids)?;
    store.unlink(note_id, tag_id)?;
    Ok(MessageResponse::new("Tag removed from note"))
}

// ========== Notes <-> Attachments ==========

pub async fn note_attachments(
    State(store): State<NotesAttachmentStore>,
    Path(note_id): Path<String>,
) -> ApiResult<Json<Vec<Attachment>>> {
    Ok(Json(store.attachments_for_note(parse_id(&note_id)?)?))
}

pub async fn attachment_notes(
    State(store): State<NotesAttachmentStore>,
    Path(attachment_id): Path<String>,
) -> ApiResult<Json<Vec<Note>>> {
    Ok(Json(store.notes_for_attachment(parse_id(&attachment_id)?)?))
}

pub async fn link_attachment(
    State(store): State<NotesAttachmentStore>,
    Path(ids): Path<(String, String)>,
) -> ApiResult<Json<NotesAttachment>> {
    let (note_id, attachment_id) = parse_pair(ids)?;
    Ok(Json(store.link(note_id, attachment_id)?))
}

pub async fn unlink_attachment(
    State(store): State<NotesAttachmentStore>,
    Path(ids): Path<(String, String)>,
) -> ApiResult<Json<MessageResponse>> {
    let (note_id, attachment_id) = parse_pair(ids)?;
    store.unlink(note_id, attachment_id)?;
    Ok(MessageResponse::new("Attachment removed from note"))
}

// ========== Users <-> Notes ==========

pub async fn user_notes(
    State(store): State<UserNotesStore>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<Vec<Note>>> {
    Ok(Json(store.notes_for_user(parse_id(&user_id)?)?))
}

pub async fn note_users(
    State(store): State<UserNotesStore>,
    Path(note_id): Path<String>,
) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(store.users_for_note(parse_id(&note_id)?)?))
}

pub async fn link_user_note(
    State(store): State<UserNotesStore>,
    Path(ids): Path<(String, String)>,
) -> ApiResult<Json<UserNote>> {
    let (user_id, note_id) = parse_pair(ids)?;
    Ok(Json(store.link(user_id, note_id)?))
}

pub async fn unlink_user_note(
    State(store): State<UserNotesStore>,
    Path(ids): Path<(String, String)>,
) -> ApiResult<Json<MessageResponse>> {
    let (user_id, note_id) = parse_pair(ids)?;
    store.unlink(user_id, note_id)?;
    Ok(MessageResponse::new("Note removed from user"))
}
