pub mod catalog;
pub mod store;

pub use catalog::{MovieCatalog, MovieSummary};
pub use store::{load_all, save_all, RecordStore, StoreError};
