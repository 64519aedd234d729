use crate::error::{ServiceError, ServiceResult};
use crate::mapper::Mapper;

use super::mapper::AuthorMapper;
use super::models::{AuthorDto, AuthorPatch};
use super::repository::AuthorRepositoryArc;

const RESOURCE: &str = "author";

/// Author use cases on top of an [`AuthorRepositoryArc`].
#[derive(Debug, Clone)]
pub struct AuthorService {
    repository: AuthorRepositoryArc,
    mapper: AuthorMapper,
}

impl AuthorService {
    pub fn new(repository: AuthorRepositoryArc) -> Self {
        Self {
            repository,
            mapper: AuthorMapper,
        }
    }

    /// Store a new author; any client-supplied id is discarded.
    pub async fn create(&self, author: AuthorDto) -> ServiceResult<AuthorDto> {
        let mut entity = self.mapper.map_from(author);
        entity.id = None;

        let saved = self.repository.save(entity).await?;
        tracing::info!(id = ?saved.id, "author created");
        Ok(self.mapper.map_to(saved))
    }

    pub async fn list(&self) -> ServiceResult<Vec<AuthorDto>> {
        let authors = self.repository.find_all().await?;
        Ok(authors
            .into_iter()
            .map(|author| self.mapper.map_to(author))
            .collect())
    }

    pub async fn get(&self, id: i64) -> ServiceResult<AuthorDto> {
        self.repository
            .find_by_id(id)
            .await?
            .map(|author| self.mapper.map_to(author))
            .ok_or_else(|| ServiceError::not_found(RESOURCE, id))
    }

    /// Overwrite every field of an existing author.
    pub async fn full_update(&self, id: i64, author: AuthorDto) -> ServiceResult<AuthorDto> {
        if !self.repository.exists(id).await? {
            return Err(ServiceError::not_found(RESOURCE, id));
        }

        let mut entity = self.mapper.map_from(author);
        entity.id = Some(id);

        let saved = self.repository.save(entity).await?;
        tracing::info!(id, "author replaced");
        Ok(self.mapper.map_to(saved))
    }

    /// Merge the supplied fields into an existing author.
    pub async fn partial_update(&self, id: i64, patch: AuthorPatch) -> ServiceResult<AuthorDto> {
        let mut entity = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(RESOURCE, id))?;

        patch.apply(&mut entity);

        let saved = self.repository.save(entity).await?;
        tracing::info!(id, "author patched");
        Ok(self.mapper.map_to(saved))
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        self.repository.delete_by_id(id).await?;
        tracing::info!(id, "author deleted");
        Ok(())
    }
}
