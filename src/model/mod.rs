//! Entity types persisted by the storage layer
//!
//! Every entity has a store-assigned integer `id`. Status-bearing entities
//! carry a [`Status`] soft-delete flag.

pub mod association;
pub mod attachment;
pub mod note;
pub mod note_type;
pub mod status;
pub mod tag;
pub mod user;
pub mod versioned_note;

pub use association::{NotesAttachment, NotesTag, UserNote};
pub use attachment::Attachment;
pub use note::Note;
pub use note_type::NoteType;
pub use status::Status;
pub use tag::Tag;
pub use user::User;
pub use versioned_note::VersionedNote;
