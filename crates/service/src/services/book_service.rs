use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::storage::StateStore;

const CURRENT_BOOK_KEY: &str = "current_book";
const FINISHED_BOOKS_KEY: &str = "finished_books";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurrentBook {
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinishedBook {
    #[serde(default)]
    pub id: String,
    pub title: String,
    /// Free-form date text, stored as sent.
    pub date: String,
}

/// Reading tracker: the single "currently reading" slot plus the finished
/// list, both kept as documents in the state store. The finished list is one
/// JSON array under one key, newest entry first.
///
/// `add_finished`/`remove_finished` are read-modify-write over the whole
/// document; concurrent writers race last-writer-wins at document granularity.
#[derive(Clone)]
pub struct BookService {
    store: StateStore,
}

impl BookService {
    pub fn new(store: StateStore) -> Self {
        Self { store }
    }

    /// Current book document, `{}` when none was ever set.
    pub async fn current(&self) -> Result<Value, ServiceError> {
        self.store.get(CURRENT_BOOK_KEY, json!({})).await
    }

    /// Replace the slot unconditionally and echo back what was written.
    pub async fn set_current(&self, book: CurrentBook) -> Result<CurrentBook, ServiceError> {
        let doc = serde_json::to_value(&book)
            .map_err(|e| ServiceError::Serialization(e.to_string()))?;
        self.store.set(CURRENT_BOOK_KEY, doc).await?;
        Ok(book)
    }

    /// Finished books, newest first.
    pub async fn finished(&self) -> Result<Vec<FinishedBook>, ServiceError> {
        let doc = self.store.get(FINISHED_BOOKS_KEY, json!([])).await?;
        serde_json::from_value(doc).map_err(|e| ServiceError::Serialization(e.to_string()))
    }

    /// Prepend a finished book, generating an id when the caller sent none,
    /// and return the full updated list. Clients rely on the full echo, not
    /// just the created item.
    pub async fn add_finished(&self, mut book: FinishedBook) -> Result<Vec<FinishedBook>, ServiceError> {
        if book.title.trim().is_empty() {
            return Err(ServiceError::Validation("title required".into()));
        }
        if book.id.trim().is_empty() {
            book.id = Uuid::new_v4().to_string();
        }
        let mut books = self.finished().await?;
        books.insert(0, book);
        self.write_finished(&books).await?;
        Ok(books)
    }

    /// Remove by id; nothing is written when no item matches.
    pub async fn remove_finished(&self, id: &str) -> Result<(), ServiceError> {
        let mut books = self.finished().await?;
        let before = books.len();
        books.retain(|b| b.id != id);
        if books.len() == before {
            return Err(ServiceError::not_found("finished book"));
        }
        self.write_finished(&books).await
    }

    async fn write_finished(&self, books: &[FinishedBook]) -> Result<(), ServiceError> {
        let doc = serde_json::to_value(books)
            .map_err(|e| ServiceError::Serialization(e.to_string()))?;
        self.store.set(FINISHED_BOOKS_KEY, doc).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_db;

    async fn service() -> Result<BookService, anyhow::Error> {
        let db = test_db().await?;
        Ok(BookService::new(StateStore::new(db)))
    }

    fn book(title: &str, date: &str) -> FinishedBook {
        FinishedBook { id: String::new(), title: title.into(), date: date.into() }
    }

    #[tokio::test]
    async fn current_book_defaults_to_empty_object() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        assert_eq!(svc.current().await?, json!({}));
        Ok(())
    }

    #[tokio::test]
    async fn set_current_replaces_the_slot() -> Result<(), anyhow::Error> {
        let svc = service().await?;

        let echoed = svc.set_current(CurrentBook { title: "Dune".into() }).await?;
        assert_eq!(echoed.title, "Dune");
        assert_eq!(svc.current().await?, json!({"title": "Dune"}));

        svc.set_current(CurrentBook { title: "Foo".into() }).await?;
        assert_eq!(svc.current().await?, json!({"title": "Foo"}));
        Ok(())
    }

    #[tokio::test]
    async fn add_prepends_and_generates_unique_ids() -> Result<(), anyhow::Error> {
        let svc = service().await?;

        let list = svc.add_finished(book("Dune", "2024-01-01")).await?;
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].title, "Dune");
        assert!(!list[0].id.is_empty());

        let list = svc.add_finished(book("Foo", "2024-02-01")).await?;
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].title, "Foo");
        assert_eq!(list[1].title, "Dune");
        assert_ne!(list[0].id, list[1].id);
        Ok(())
    }

    #[tokio::test]
    async fn add_keeps_a_caller_supplied_id() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let mut b = book("Dune", "2024-01-01");
        b.id = "my-own-id".into();
        let list = svc.add_finished(b).await?;
        assert_eq!(list[0].id, "my-own-id");
        Ok(())
    }

    #[tokio::test]
    async fn add_rejects_empty_titles() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let err = svc.add_finished(book("  ", "2024-01-01")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(svc.finished().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn remove_unknown_id_is_not_found_and_leaves_list_alone() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let list = svc.add_finished(book("Dune", "2024-01-01")).await?;

        let err = svc.remove_finished("nonexistent-id").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(svc.finished().await?, list);
        Ok(())
    }

    #[tokio::test]
    async fn remove_keeps_relative_order_of_the_rest() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        svc.add_finished(book("A", "2024-01-01")).await?;
        let two = svc.add_finished(book("B", "2024-02-01")).await?;
        svc.add_finished(book("C", "2024-03-01")).await?;

        // drop the middle one (B)
        svc.remove_finished(&two[0].id).await?;

        let titles: Vec<_> = svc.finished().await?.into_iter().map(|b| b.title).collect();
        assert_eq!(titles, vec!["C", "A"]);
        Ok(())
    }
}
