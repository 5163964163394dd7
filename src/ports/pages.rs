/// Page store port trait
///
/// Interface to the remote document store holding meeting pages and the
/// people/projects reference databases. The store is read-mostly: the single
/// write per run replaces a page's rich-text body with an appended version.
use crate::domain::models::{EntityKind, ReferenceEntity};
use crate::error::Result;
use async_trait::async_trait;

/// The writable body of a page: which property holds it and its current text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBody {
    /// Name of the rich-text property the body lives in
    pub property: String,
    /// Concatenated text content; empty when the page has no body yet
    pub content: String,
}

/// Port trait for the remote document store
#[async_trait]
pub trait PageStorePort: Send + Sync {
    /// Fetch a page's writable body. Fails when the page has no rich-text
    /// property to append to.
    async fn fetch_page_body(&self, page_id: &str) -> Result<PageBody>;

    /// List all reference entities in a database
    async fn list_entities(
        &self,
        database_id: &str,
        kind: EntityKind,
    ) -> Result<Vec<ReferenceEntity>>;

    /// Replace a page's body property with the full merged text.
    /// All-or-nothing: implementations must not write partial content.
    async fn update_page_body(&self, page_id: &str, property: &str, body: &str) -> Result<()>;

    /// Maximum number of characters the body property accepts
    fn body_limit(&self) -> usize;
}
