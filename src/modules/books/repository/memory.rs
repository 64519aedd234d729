use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use bookshelf_db::{DbError, DbResult};
use tokio::sync::RwLock;

use super::BookRepository;
use crate::modules::authors::repository::{AuthorRepository, MemoryAuthorRepository};
use crate::modules::books::models::BookEntity;

#[derive(Debug, Clone)]
struct BookRecord {
    title: String,
    author_id: Option<i64>,
}

/// In-memory implementation of the book repository.
///
/// Author references resolve against the shared author store; a reference
/// to a deleted author reads back as no author.
#[derive(Debug, Clone)]
pub struct MemoryBookRepository {
    books: Arc<RwLock<BTreeMap<String, BookRecord>>>,
    authors: MemoryAuthorRepository,
}

impl MemoryBookRepository {
    pub fn new(authors: MemoryAuthorRepository) -> Self {
        Self {
            books: Arc::new(RwLock::new(BTreeMap::new())),
            authors,
        }
    }

    async fn resolve(&self, isbn: String, record: BookRecord) -> DbResult<BookEntity> {
        let author = match record.author_id {
            Some(id) => self.authors.find_by_id(id).await?,
            None => None,
        };
        Ok(BookEntity {
            isbn,
            title: record.title,
            author,
        })
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn save(&self, book: BookEntity) -> DbResult<BookEntity> {
        let author_id = match &book.author {
            Some(author) => Some(author.id.ok_or_else(|| DbError::Inconsistent {
                message: format!("book {} references an unsaved author", book.isbn),
            })?),
            None => None,
        };
        let record = BookRecord {
            title: book.title,
            author_id,
        };

        self.books
            .write()
            .await
            .insert(book.isbn.clone(), record.clone());

        self.resolve(book.isbn, record).await
    }

    async fn find_by_isbn(&self, isbn: &str) -> DbResult<Option<BookEntity>> {
        let record = self.books.read().await.get(isbn).cloned();
        match record {
            Some(record) => Ok(Some(self.resolve(isbn.to_string(), record).await?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> DbResult<Vec<BookEntity>> {
        let records: Vec<(String, BookRecord)> = self
            .books
            .read()
            .await
            .iter()
            .map(|(isbn, record)| (isbn.clone(), record.clone()))
            .collect();

        let mut books = Vec::with_capacity(records.len());
        for (isbn, record) in records {
            books.push(self.resolve(isbn, record).await?);
        }
        Ok(books)
    }

    async fn delete_by_isbn(&self, isbn: &str) -> DbResult<()> {
        self.books.write().await.remove(isbn);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::authors::models::AuthorEntity;

    fn book(isbn: &str, title: &str) -> BookEntity {
        BookEntity {
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: None,
        }
    }

    #[tokio::test]
    async fn save_is_an_upsert() {
        let repo = MemoryBookRepository::new(MemoryAuthorRepository::new());
        repo.save(book("978-1-2345-6789-0", "The Shadow in the Attic"))
            .await
            .unwrap();
        repo.save(book("978-1-2345-6789-0", "Beyond the Horizon"))
            .await
            .unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title, "Beyond the Horizon");
    }

    #[tokio::test]
    async fn books_list_in_isbn_order() {
        let repo = MemoryBookRepository::new(MemoryAuthorRepository::new());
        repo.save(book("978-1-2345-6789-2", "C")).await.unwrap();
        repo.save(book("978-1-2345-6789-0", "A")).await.unwrap();

        let isbns: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.isbn)
            .collect();
        assert_eq!(isbns, vec!["978-1-2345-6789-0", "978-1-2345-6789-2"]);
    }

    #[tokio::test]
    async fn deleted_author_reads_back_as_none() {
        let authors = MemoryAuthorRepository::new();
        let author = authors
            .save(AuthorEntity {
                id: None,
                name: "Abigail Rose".to_string(),
                age: 80,
            })
            .await
            .unwrap();
        let repo = MemoryBookRepository::new(authors.clone());

        let saved = repo
            .save(BookEntity {
                author: Some(author.clone()),
                ..book("978-1-2345-6789-0", "The Shadow in the Attic")
            })
            .await
            .unwrap();
        assert_eq!(saved.author, Some(author.clone()));

        authors.delete_by_id(author.id.unwrap()).await.unwrap();
        let reread = repo.find_by_isbn("978-1-2345-6789-0").await.unwrap().unwrap();
        assert!(reread.author.is_none());
    }

    #[tokio::test]
    async fn unsaved_author_is_rejected() {
        let repo = MemoryBookRepository::new(MemoryAuthorRepository::new());
        let result = repo
            .save(BookEntity {
                author: Some(AuthorEntity {
                    id: None,
                    name: "Abigail Rose".to_string(),
                    age: 80,
                }),
                ..book("978-1-2345-6789-0", "The Shadow in the Attic")
            })
            .await;
        assert!(matches!(result, Err(DbError::Inconsistent { .. })));
    }
}
