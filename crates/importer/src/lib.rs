//! CSV ingestion of cities and hotels from an authenticated HTTP source.
//!
//! A run fetches the whole resource first. Any transport failure or non
//! success status ends the run before a single row is written. Rows are then
//! upserted one by one through the [`engine::Engine`]; bad rows are reported
//! and skipped.

pub use error::ImportError;
pub use event::{ImportEvent, ImportSink, ImportSummary};
pub use source::{DEFAULT_TIMEOUT, Kind, Source};

mod cities;
mod error;
mod event;
mod hotels;
mod rows;
mod source;

pub use cities::{import_cities, import_city_rows};
pub use hotels::{import_hotel_rows, import_hotels};

type ResultImport<T> = Result<T, ImportError>;
