use crate::model::{Error, ReportPayload};
use crate::time::parse_iso_timestamp;
use chrono::NaiveDateTime;
use std::fmt;

/// Surrogate key assigned by the storage gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReportKey(pub i64);

impl fmt::Display for ReportKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One benchmark run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub key: Option<ReportKey>,
    pub time: NaiveDateTime,
    pub revision: String,
}

impl Report {
    pub fn new(time: NaiveDateTime, revision: String) -> Self {
        Self {
            key: None,
            time,
            revision,
        }
    }

    pub fn from_payload(payload: &ReportPayload) -> Result<Self, Error> {
        let time = parse_iso_timestamp(&payload.time)?;
        Ok(Self::new(time, payload.revision.clone()))
    }
}
