pub mod error;
pub mod payload;
pub mod report;
pub mod test;

pub use self::error::Error;
pub use self::payload::{ReportPayload, TestPayload};
pub use self::report::{Report, ReportKey};
pub use self::test::{Test, TestKey};

/// Parses an uploaded document into an unsaved report and its unsaved tests.
pub fn from_upload(document: &str) -> Result<(Report, Vec<Test>), Error> {
    let payload = ReportPayload::parse(document)?;
    let report = Report::from_payload(&payload)?;
    let tests = payload.tests.iter().map(Test::from_payload).collect();
    Ok((report, tests))
}
