pub mod cyclical;
pub mod landing;
pub mod ranking;
pub mod snapshot;
pub mod trend;
