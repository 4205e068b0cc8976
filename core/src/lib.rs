pub mod aggregate;
pub mod codec;
pub mod db;
pub mod error;
pub mod models;
pub mod presets;
pub mod tracker;

pub use error::{Result, TrackerError};
pub use tracker::{ImportSummary, Tracker};
