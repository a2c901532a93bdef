use crate::model::{Report, ReportKey, Test, TestKey};
use crate::storage::{Error, Result, Storage};
use std::collections::HashMap;
use std::sync::RwLock;

/// Parallel arenas, each test remembering the arena slot of its report.
#[derive(Debug, Default)]
struct Arenas {
    reports: Vec<Report>,
    tests: Vec<Test>,
    by_report: HashMap<ReportKey, Vec<usize>>,
}

/// Process-local storage. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    arenas: RwLock<Arenas>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn insert_report(&self, report: &Report, tests: &[Test]) -> Result<ReportKey> {
        let mut arenas = self.arenas.write().map_err(|_| Error::Poisoned)?;
        let key = ReportKey(arenas.reports.len() as i64 + 1);
        arenas.reports.push(Report {
            key: Some(key),
            ..report.clone()
        });

        let mut slots = Vec::with_capacity(tests.len());
        for test in tests {
            let slot = arenas.tests.len();
            arenas.tests.push(Test {
                key: Some(TestKey(slot as i64 + 1)),
                report: Some(key),
                ..test.clone()
            });
            slots.push(slot);
        }
        arenas.by_report.insert(key, slots);
        Ok(key)
    }

    fn reports(&self, limit: Option<usize>) -> Result<Vec<Report>> {
        let arenas = self.arenas.read().map_err(|_| Error::Poisoned)?;
        let limit = limit.unwrap_or_else(|| arenas.reports.len());
        Ok(arenas.reports.iter().take(limit).cloned().collect())
    }

    fn tests_of(&self, report: ReportKey) -> Result<Vec<Test>> {
        let arenas = self.arenas.read().map_err(|_| Error::Poisoned)?;
        Ok(arenas
            .by_report
            .get(&report)
            .map(|slots| slots.iter().map(|&i| arenas.tests[i].clone()).collect())
            .unwrap_or_default())
    }

    fn counts(&self) -> Result<(usize, usize)> {
        let arenas = self.arenas.read().map_err(|_| Error::Poisoned)?;
        Ok((arenas.reports.len(), arenas.tests.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStorage;
    use crate::model::ReportKey;
    use crate::storage::{conformance, Storage};

    #[test]
    fn test_insert_assigns_keys_and_references() {
        conformance::insert_assigns_keys_and_references(&MemoryStorage::new());
    }

    #[test]
    fn test_scans_follow_insertion_order() {
        conformance::scans_follow_insertion_order(&MemoryStorage::new());
    }

    #[test]
    fn test_tests_are_scoped_to_their_report() {
        conformance::tests_are_scoped_to_their_report(&MemoryStorage::new());
    }

    #[test]
    fn test_unknown_report_has_no_tests() {
        let storage = MemoryStorage::new();
        assert!(storage.tests_of(ReportKey(42)).unwrap().is_empty());
        assert_eq!(storage.counts().unwrap(), (0, 0));
    }
}
