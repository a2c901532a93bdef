pub mod error;
pub mod timestamp;

pub use self::error::Error;
pub use self::timestamp::{parse_iso_timestamp, to_epoch_seconds};
