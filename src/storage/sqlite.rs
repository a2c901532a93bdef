use crate::model::{Report, ReportKey, Test, TestKey};
use crate::storage::{Error, Result, Storage};
use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

const BUSY_TIMEOUT: Duration = Duration::from_millis(5_000);
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const SCHEMA: &str = "
    PRAGMA foreign_keys = ON;
    CREATE TABLE IF NOT EXISTS report (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        time TEXT NOT NULL,
        revision TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS test (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        report_id INTEGER NOT NULL REFERENCES report(id),
        duration REAL NOT NULL,
        doc TEXT NOT NULL,
        test_id TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS test_report_id ON test(report_id);
";

/// Durable storage in a single SQLite file.
pub struct SqliteStorage {
    connection: Mutex<Connection>,
}

impl SqliteStorage {
    pub fn open(path: &Path) -> Result<Self> {
        let connection = Connection::open(path)?;
        connection.busy_timeout(BUSY_TIMEOUT)?;
        connection.execute_batch(SCHEMA)?;
        debug!("SQLite schema ready at {}", path.display());
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }
}

fn report_from_row(row: &Row) -> rusqlite::Result<Report> {
    let time: String = row.get(1)?;
    let time = NaiveDateTime::parse_from_str(&time, TIME_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;
    Ok(Report {
        key: Some(ReportKey(row.get(0)?)),
        time,
        revision: row.get(2)?,
    })
}

fn test_from_row(row: &Row) -> rusqlite::Result<Test> {
    Ok(Test {
        key: Some(TestKey(row.get(0)?)),
        report: Some(ReportKey(row.get(1)?)),
        duration: row.get(2)?,
        doc: row.get(3)?,
        id: row.get(4)?,
    })
}

impl Storage for SqliteStorage {
    fn insert_report(&self, report: &Report, tests: &[Test]) -> Result<ReportKey> {
        let mut connection = self.connection.lock().map_err(|_| Error::Poisoned)?;
        let tx = connection.transaction()?;
        tx.execute(
            "INSERT INTO report (time, revision) VALUES (?1, ?2)",
            params![report.time.format(TIME_FORMAT).to_string(), report.revision],
        )?;
        let key = ReportKey(tx.last_insert_rowid());
        {
            let mut insert = tx.prepare_cached(
                "INSERT INTO test (report_id, duration, doc, test_id) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for test in tests {
                insert.execute(params![key.0, test.duration, test.doc, test.id])?;
            }
        }
        tx.commit()?;
        Ok(key)
    }

    fn reports(&self, limit: Option<usize>) -> Result<Vec<Report>> {
        let connection = self.connection.lock().map_err(|_| Error::Poisoned)?;
        // negative LIMIT means no limit in SQLite
        let limit = limit.map(|l| l as i64).unwrap_or(-1);
        let mut select =
            connection.prepare_cached("SELECT id, time, revision FROM report ORDER BY id LIMIT ?1")?;
        let rows = select.query_map(params![limit], report_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn tests_of(&self, report: ReportKey) -> Result<Vec<Test>> {
        let connection = self.connection.lock().map_err(|_| Error::Poisoned)?;
        let mut select = connection.prepare_cached(
            "SELECT id, report_id, duration, doc, test_id FROM test WHERE report_id = ?1 ORDER BY id",
        )?;
        let rows = select.query_map(params![report.0], test_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn counts(&self) -> Result<(usize, usize)> {
        let connection = self.connection.lock().map_err(|_| Error::Poisoned)?;
        let reports: i64 = connection.query_row("SELECT COUNT(*) FROM report", [], |r| r.get(0))?;
        let tests: i64 = connection.query_row("SELECT COUNT(*) FROM test", [], |r| r.get(0))?;
        Ok((reports as usize, tests as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteStorage;
    use crate::storage::fixtures::{report, test};
    use crate::storage::{conformance, Storage};
    use tempfile::TempDir;

    fn storage() -> (TempDir, SqliteStorage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = SqliteStorage::open(&dir.path().join("perfboard.sqlite3")).unwrap();
        (dir, storage)
    }

    #[test]
    fn test_insert_assigns_keys_and_references() {
        let (_dir, storage) = storage();
        conformance::insert_assigns_keys_and_references(&storage);
    }

    #[test]
    fn test_scans_follow_insertion_order() {
        let (_dir, storage) = storage();
        conformance::scans_follow_insertion_order(&storage);
    }

    #[test]
    fn test_tests_are_scoped_to_their_report() {
        let (_dir, storage) = storage();
        conformance::tests_are_scoped_to_their_report(&storage);
    }

    #[test]
    fn test_records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("perfboard.sqlite3");
        let key = {
            let storage = SqliteStorage::open(&path).unwrap();
            storage
                .insert_report(&report("2013-05-02T20:30:42.5", "abc123"), &[test("a", 0.25)])
                .unwrap()
        };

        let storage = SqliteStorage::open(&path).unwrap();
        let reports = storage.reports(None).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].time.to_string(), "2013-05-02 20:30:42");
        let tests = storage.tests_of(key).unwrap();
        assert_eq!(tests[0].duration, 0.25);
        assert_eq!(tests[0].report, Some(key));
    }

    #[test]
    fn test_open_in_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = SqliteStorage::open(&dir.path().join("missing").join("db.sqlite3"));
        assert!(result.is_err());
    }
}
