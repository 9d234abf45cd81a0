//! External Adapters for the Registration Domain
//!
//! Implementations of [`RecordStorePort`](crate::ports::RecordStorePort)
//! backed by a remote system of record.
//!
//! # Available Adapters
//!
//! - **NotionRecordStore**: writes participants as pages of a Notion database
//! - **MockRecordStore**: in-memory store for tests (in `ports::mock`)
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_registration::adapters::{NotionConfig, NotionRecordStore};
//! use domain_registration::RecordStorePort;
//! use std::sync::Arc;
//!
//! let config = NotionConfig::new("secret_xxx", "0123456789abcdef");
//! let store: Arc<dyn RecordStorePort> = Arc::new(NotionRecordStore::new(config)?);
//! ```

pub mod notion;

pub use notion::{NotionConfig, NotionRecordStore};
