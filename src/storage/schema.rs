//! Database schema definitions
//!
//! Foreign-key enforcement stays at the SQLite default (off): deleting a note,
//! tag, attachment or user leaves its join rows in place.

/// SQL to create the note_types lookup table
pub const CREATE_NOTE_TYPES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS note_types (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    type_name TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    status TEXT NOT NULL DEFAULT 'active' CHECK (status IN ('active', 'deleted'))
)
"#;

/// SQL to create the notes table
pub const CREATE_NOTES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL DEFAULT '',
    content TEXT NOT NULL DEFAULT '',
    note_type_id INTEGER NOT NULL DEFAULT 1 REFERENCES note_types(id),
    created DATETIME NOT NULL,
    updated DATETIME NOT NULL,
    status TEXT NOT NULL DEFAULT 'active' CHECK (status IN ('active', 'deleted'))
)
"#;

/// SQL to create the users table
pub const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    email TEXT NOT NULL,
    password TEXT NOT NULL,
    created DATETIME NOT NULL,
    updated DATETIME NOT NULL,
    status TEXT NOT NULL DEFAULT 'active' CHECK (status IN ('active', 'deleted'))
)
"#;

/// SQL to create the attachments table
pub const CREATE_ATTACHMENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS attachments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL DEFAULT '',
    file_link TEXT NOT NULL,
    created DATETIME NOT NULL,
    updated DATETIME NOT NULL,
    status TEXT NOT NULL DEFAULT 'active' CHECK (status IN ('active', 'deleted'))
)
"#;

/// SQL to create the tags table
pub const CREATE_TAGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS tags (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    tag_name TEXT NOT NULL,
    created DATETIME NOT NULL,
    updated DATETIME NOT NULL,
    status TEXT NOT NULL DEFAULT 'active' CHECK (status IN ('active', 'deleted'))
)
"#;

/// SQL to create the versioned_notes table
pub const CREATE_VERSIONED_NOTES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS versioned_notes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL DEFAULT '',
    content TEXT NOT NULL DEFAULT '',
    note_type_id INTEGER NOT NULL REFERENCES note_types(id),
    note_id INTEGER NOT NULL REFERENCES notes(id),
    created DATETIME NOT NULL,
    updated DATETIME NOT NULL,
    status TEXT NOT NULL DEFAULT 'active' CHECK (status IN ('active', 'deleted'))
)
"#;

pub const CREATE_NOTES_ATTACHMENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS notes_attachments (
    note_id INTEGER NOT NULL REFERENCES notes(id),
    attachment_id INTEGER NOT NULL REFERENCES attachments(id),
    PRIMARY KEY (note_id, attachment_id)
)
"#;

pub const CREATE_NOTES_TAGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS notes_tags (
    note_id INTEGER NOT NULL REFERENCES notes(id),
    tag_id INTEGER NOT NULL REFERENCES tags(id),
    PRIMARY KEY (note_id, tag_id)
)
"#;

pub const CREATE_USER_NOTES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS user_notes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    note_id INTEGER NOT NULL REFERENCES notes(id),
    created_at DATETIME NOT NULL,
    UNIQUE (user_id, note_id)
)
"#;

/// Reverse-lookup indexes for the join tables
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_notes_tags_tag ON notes_tags(tag_id)",
    "CREATE INDEX IF NOT EXISTS idx_notes_attachments_attachment ON notes_attachments(attachment_id)",
    "CREATE INDEX IF NOT EXISTS idx_user_notes_note ON user_notes(note_id)",
    "CREATE INDEX IF NOT EXISTS idx_versioned_notes_note ON versioned_notes(note_id)",
];

/// The default note type every note points at unless told otherwise
pub const SEED_DEFAULT_NOTE_TYPE: &str = r#"
INSERT OR IGNORE INTO note_types (id, type_name, description, status)
VALUES (1, 'default', 'Default note type', 'active')
"#;

/// Every table, in creation order. Used for row-count statistics.
pub const TABLES: &[&str] = &[
    "note_types",
    "notes",
    "users",
    "attachments",
    "tags",
    "versioned_notes",
    "notes_attachments",
    "notes_tags",
    "user_notes",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_NOTE_TYPES_TABLE,
        CREATE_NOTES_TABLE,
        CREATE_USERS_TABLE,
        CREATE_ATTACHMENTS_TABLE,
        CREATE_TAGS_TABLE,
        CREATE_VERSIONED_NOTES_TABLE,
        CREATE_NOTES_ATTACHMENTS_TABLE,
        CREATE_NOTES_TAGS_TABLE,
        CREATE_USER_NOTES_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
