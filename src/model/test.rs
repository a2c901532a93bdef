use crate::model::{ReportKey, TestPayload};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TestKey(pub i64);

/// One named timing inside a report. `report` stays empty until the owning
/// report has been persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Test {
    pub key: Option<TestKey>,
    pub report: Option<ReportKey>,
    pub duration: f64,
    pub doc: String,
    pub id: String,
}

impl Test {
    pub fn new(duration: f64, doc: String, id: String) -> Self {
        Self {
            key: None,
            report: None,
            duration,
            doc,
            id,
        }
    }

    pub fn from_payload(payload: &TestPayload) -> Self {
        Self::new(payload.duration, payload.doc.clone(), payload.id.clone())
    }
}
