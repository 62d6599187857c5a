//! Wire DTOs for the blog REST API.
//!
//! DESIGN
//! ======
//! Field names mirror the server's JSON (`_id`, `totalPages`, camelCase
//! request bodies) so serde does the mapping and nothing else has to.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Display name used when a post has no author or the author has no name.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// A blog post as returned by the API.
///
/// Decoding is lenient: the id may arrive as `_id`, `id` or both (`_id`
/// wins), and `author` may be a populated object, a bare id string, or
/// anything else (treated as absent).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPost")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,
}

impl Post {
    pub fn author_id(&self) -> Option<&str> {
        self.author.as_ref().map(|a| a.id.as_str()).filter(|id| !id.is_empty())
    }

    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .map(|a| a.name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_AUTHOR)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawAuthor")]
pub struct Author {
    /// Empty when the server sent an author without an id.
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

#[derive(Deserialize)]
struct RawPost {
    #[serde(rename = "_id", default)]
    underscore_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    author: Option<AuthorField>,
}

impl TryFrom<RawPost> for Post {
    type Error = String;

    fn try_from(raw: RawPost) -> Result<Self, Self::Error> {
        let id = raw.underscore_id.or(raw.id).ok_or("post has no id")?;
        Ok(Self {
            id,
            title: raw.title.unwrap_or_default(),
            content: raw.content.unwrap_or_default(),
            author: raw.author.and_then(AuthorField::into_author),
        })
    }
}

/// Shapes the server uses for `post.author`.
#[derive(Deserialize)]
#[serde(untagged)]
enum AuthorField {
    Populated(Author),
    Id(String),
    Unknown(serde::de::IgnoredAny),
}

impl AuthorField {
    fn into_author(self) -> Option<Author> {
        match self {
            Self::Populated(author) => Some(author),
            Self::Id(id) => Some(Author { id, name: String::new() }),
            Self::Unknown(_) => None,
        }
    }
}

#[derive(Deserialize)]
struct RawAuthor {
    #[serde(rename = "_id", default)]
    underscore_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

impl From<RawAuthor> for Author {
    fn from(raw: RawAuthor) -> Self {
        Self { id: raw.underscore_id.or(raw.id).unwrap_or_default(), name: raw.name.unwrap_or_default() }
    }
}

/// One page of posts from `GET /posts`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PostsPage {
    pub posts: Vec<Post>,
    pub total_pages: u32,
}

impl PostsPage {
    /// Interpret a `GET /posts` body leniently.
    ///
    /// A `posts` field that is absent or not an array yields an empty list;
    /// entries that fail to parse are skipped. `totalPages` is clamped to at
    /// least 1.
    pub fn from_body(body: &Value) -> Self {
        let posts = body
            .get("posts")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| serde_json::from_value::<Post>(item.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();
        let total_pages = body
            .get("totalPages")
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(1)
            .max(1);
        Self { posts, total_pages }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
    pub address: String,
}

/// Body of `POST /posts` and `PUT /posts/:id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PostBody {
    pub title: String,
    pub content: String,
}
