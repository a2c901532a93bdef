use crate::model::Error;
use serde_derive::Deserialize;

/// Upload document as sent by benchmark runners.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportPayload {
    pub time: String,
    pub revision: String,
    pub tests: Vec<TestPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TestPayload {
    pub duration: f64,
    pub doc: String,
    pub id: String,
}

impl ReportPayload {
    pub fn parse(document: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(document)?)
    }
}
