use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use bookshelf_db::DbResult;
use tokio::sync::RwLock;

use super::AuthorRepository;
use crate::modules::authors::models::AuthorEntity;

#[derive(Debug)]
struct AuthorTable {
    rows: BTreeMap<i64, AuthorEntity>,
    next_id: i64,
}

/// In-memory implementation of the author repository.
#[derive(Debug, Clone)]
pub struct MemoryAuthorRepository {
    table: Arc<RwLock<AuthorTable>>,
}

impl Default for MemoryAuthorRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAuthorRepository {
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(AuthorTable {
                rows: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }
}

#[async_trait]
impl AuthorRepository for MemoryAuthorRepository {
    async fn save(&self, mut author: AuthorEntity) -> DbResult<AuthorEntity> {
        let mut table = self.table.write().await;
        let id = match author.id {
            Some(id) => {
                table.next_id = table.next_id.max(id + 1);
                id
            }
            None => {
                let id = table.next_id;
                table.next_id += 1;
                id
            }
        };
        author.id = Some(id);
        table.rows.insert(id, author.clone());
        Ok(author)
    }

    async fn find_by_id(&self, id: i64) -> DbResult<Option<AuthorEntity>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> DbResult<Vec<AuthorEntity>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn exists(&self, id: i64) -> DbResult<bool> {
        Ok(self.table.read().await.rows.contains_key(&id))
    }

    async fn delete_by_id(&self, id: i64) -> DbResult<()> {
        self.table.write().await.rows.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, age: i32) -> AuthorEntity {
        AuthorEntity {
            id: None,
            name: name.to_string(),
            age,
        }
    }

    #[tokio::test]
    async fn save_assigns_increasing_ids() {
        let repo = MemoryAuthorRepository::new();
        let a = repo.save(draft("Abigail Rose", 80)).await.unwrap();
        let b = repo.save(draft("Thomas Cronin", 44)).await.unwrap();

        assert_eq!(a.id, Some(1));
        assert_eq!(b.id, Some(2));
        assert_eq!(repo.find_all().await.unwrap(), vec![a, b]);
    }

    #[tokio::test]
    async fn save_with_id_overwrites() {
        let repo = MemoryAuthorRepository::new();
        let saved = repo.save(draft("Abigail Rose", 80)).await.unwrap();

        let replaced = repo
            .save(AuthorEntity {
                age: 81,
                ..saved.clone()
            })
            .await
            .unwrap();

        assert_eq!(replaced.id, saved.id);
        assert_eq!(repo.find_by_id(1).await.unwrap().unwrap().age, 81);
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn explicit_id_advances_sequence() {
        let repo = MemoryAuthorRepository::new();
        repo.save(AuthorEntity {
            id: Some(10),
            ..draft("Jesse A. Casey", 24)
        })
        .await
        .unwrap();

        let next = repo.save(draft("Abigail Rose", 80)).await.unwrap();
        assert_eq!(next.id, Some(11));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let repo = MemoryAuthorRepository::new();
        let saved = repo.save(draft("Abigail Rose", 80)).await.unwrap();
        let id = saved.id.unwrap();

        repo.delete_by_id(id).await.unwrap();
        repo.delete_by_id(id).await.unwrap();
        repo.delete_by_id(99).await.unwrap();

        assert!(!repo.exists(id).await.unwrap());
        assert!(repo.find_by_id(id).await.unwrap().is_none());
    }
}
