//! Repository implementations.
//!
//! - `local`: in-memory implementation used by the server and in tests
pub mod local;

pub use local::LocalRepository;
