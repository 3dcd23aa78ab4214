//! Dataset storage.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  HTTP handlers                              │
//! └───────────────────┬─────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────┐
//! │  services.rs - name validation, sentinel    │
//! │  filtering                                  │
//! └───────────────────┬─────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────┐
//! │  repository/ - DatasetRepository trait      │
//! └───────────────────┬─────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────┐
//! │  repositories::local - in-memory store      │
//! └─────────────────────────────────────────────┘
//! ```

pub mod checksum;
pub mod repositories;
pub mod repository;
pub mod services;

pub use repositories::LocalRepository;
pub use repository::{DatasetRepository, ErrorContext, RepositoryError, RepositoryResult};
