use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Persisted author. `id` is `None` until the store assigns one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorEntity {
    pub id: Option<i64>,
    pub name: String,
    pub age: i32,
}

/// Wire representation of an author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthorDto {
    /// Server-assigned identifier; ignored on create
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub age: i32,
}

/// Partial author update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AuthorPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
}

impl AuthorPatch {
    pub fn apply(self, author: &mut AuthorEntity) {
        if let Some(name) = self.name {
            author.name = name;
        }
        if let Some(age) = self.age {
            author.age = age;
        }
    }
}
