//! Public record types for wiki entries and users.
//!
//! These are the shapes the JSON API and the bot hand out. The `id` field is
//! the 32-character lowercase hex form of the database's binary UUID key; the
//! repositories translate between the two with [`crate::db::codec`].

use serde::{Deserialize, Serialize};

/// A wiki article.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Entry {
    /// Public string identifier (lowercase hex, no hyphens).
    pub id: String,
    pub title: String,
    /// URL-safe lowercase-hyphenated derivative of the title.
    pub slug: String,
    /// Free-form article body.
    pub content: String,
    /// Unlisted entries are hidden from listings and random selection.
    #[serde(default)]
    pub unlisted: bool,
}

/// A site user, read-only in the covered scope.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub username: String,
}
