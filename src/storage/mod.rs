pub mod error;
pub mod memory;
pub mod sqlite;

pub use self::error::Error;
pub use self::memory::MemoryStorage;
pub use self::sqlite::SqliteStorage;

use crate::configuration::settings::{StorageBackend, StorageSettings};
use crate::model::{Report, ReportKey, Test};
use std::sync::Arc;

pub type Result<T> = std::result::Result<T, Error>;

/// Key-ordered record store holding reports and their tests.
///
/// Every call blocks the calling thread. Scans return records in insertion
/// order, which is also key order.
pub trait Storage: Send + Sync {
    /// Persists `report` together with all of `tests` as one atomic write and
    /// returns the key given to the report. Either everything becomes visible
    /// to readers or nothing does.
    fn insert_report(&self, report: &Report, tests: &[Test]) -> Result<ReportKey>;

    /// Reports in insertion order, at most `limit` of them when given.
    fn reports(&self, limit: Option<usize>) -> Result<Vec<Report>>;

    /// Tests whose owning reference is `report`, in insertion order.
    fn tests_of(&self, report: ReportKey) -> Result<Vec<Test>>;

    /// Number of stored reports and tests.
    fn counts(&self) -> Result<(usize, usize)>;
}

pub fn open(settings: &StorageSettings) -> Result<Arc<dyn Storage>> {
    match settings.backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage, data will not survive a restart");
            Ok(Arc::new(MemoryStorage::new()))
        }
        StorageBackend::Sqlite => {
            info!("Using SQLite storage at {}", settings.path.display());
            Ok(Arc::new(SqliteStorage::open(&settings.path)?))
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::model::{Report, Test};
    use crate::time::parse_iso_timestamp;

    pub fn report(time: &str, revision: &str) -> Report {
        Report::new(parse_iso_timestamp(time).unwrap(), revision.to_owned())
    }

    pub fn test(id: &str, duration: f64) -> Test {
        Test::new(duration, format!("doc of {}", id), id.to_owned())
    }
}
