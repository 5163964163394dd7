//! Notion adapter
//!
//! REST client for the document store plus page-URL parsing.

pub mod client;
pub mod url;

pub use client::NotionClient;
pub use url::extract_page_id;
