use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Collection names understood by every record store.
pub mod collections {
    pub const CINEMAS: &str = "cinemas";
    pub const SHOWTIMES: &str = "showtimes";
    pub const BOOKINGS: &str = "bookings";
    pub const PRICE_SCHEME: &str = "price_scheme";
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record (de)serialization failed: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("store backend failure: {0}")]
    Backend(String),
}

/// Whole-collection persistence boundary. Implementations load and save
/// full collections keyed by name; the on-disk layout is their business.
pub trait RecordStore: Send + Sync {
    /// Load every record of a collection. Unknown collections are empty,
    /// not an error.
    fn load(&self, collection: &str) -> Result<Vec<Value>, StoreError>;

    /// Replace a collection with the given records.
    fn save(&self, collection: &str, records: Vec<Value>) -> Result<(), StoreError>;
}

/// Load a collection and deserialize each record into `T`.
pub fn load_all<T: DeserializeOwned>(
    store: &dyn RecordStore,
    collection: &str,
) -> Result<Vec<T>, StoreError> {
    store
        .load(collection)?
        .into_iter()
        .map(|record| serde_json::from_value(record).map_err(StoreError::from))
        .collect()
}

/// Serialize the records and replace the collection with them.
pub fn save_all<T: Serialize>(
    store: &dyn RecordStore,
    collection: &str,
    records: &[T],
) -> Result<(), StoreError> {
    let values = records
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;
    store.save(collection, values)
}
