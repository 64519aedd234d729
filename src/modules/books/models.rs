use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::modules::authors::models::{AuthorDto, AuthorEntity};

/// Persisted book keyed by its isbn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookEntity {
    pub isbn: String,
    pub title: String,
    pub author: Option<AuthorEntity>,
}

/// Wire representation of a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookDto {
    /// Primary key; the isbn in the request path always wins
    #[serde(default)]
    pub isbn: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorDto>,
}

/// Partial book update; the isbn cannot be changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct BookPatch {
    #[serde(default)]
    pub title: Option<String>,
    /// Absent leaves the author as is; `null` detaches it.
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<AuthorDto>)]
    pub author: Option<Option<AuthorDto>>,
}

// Any value that is present, `null` included, deserializes to `Some`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
