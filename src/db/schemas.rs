//! Document schemas persisted to the store.
//!
//! Each type knows its own collection name; handlers serialize these to BSON
//! with [`bson::to_document`] before handing them to the store.

use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub name: String,

    pub email: String,

    /// Argon2id PHC string, never the plaintext password.
    pub password_hash: String,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl User {
    pub const COLLECTION: &'static str = "user";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub title: String,

    /// No uniqueness enforcement; two posts may share a slug.
    pub slug: String,

    pub content: String,

    pub excerpt: Option<String>,

    pub author: String,

    pub tags: Vec<String>,

    pub published: bool,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl BlogPost {
    pub const COLLECTION: &'static str = "blogpost";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,

    pub email: String,

    pub message: String,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl ContactMessage {
    pub const COLLECTION: &'static str = "contactmessage";
}
