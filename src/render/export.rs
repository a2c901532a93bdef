use crate::model::{Report, Test};
use crate::render::Error;
use csv::{Terminator, WriterBuilder};
use serde_derive::Serialize;

pub const CSV_HEADER: [&str; 5] = ["Time", "Git Revision", "Duration", "Docstring", "Test ID"];
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    time: String,
    revision: &'a str,
    duration: f64,
    doc: &'a str,
    id: &'a str,
}

/// One line per (report, test) pair, report columns repeated on every line.
/// Reports without tests produce no lines.
pub fn export_csv(runs: &[(Report, Vec<Test>)]) -> Result<String, Error> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_writer(vec![]);
    writer.write_record(&CSV_HEADER)?;
    for (report, tests) in runs {
        let time = report.time.format(TIME_FORMAT).to_string();
        for test in tests {
            writer.serialize(ExportRow {
                time: time.clone(),
                revision: &report.revision,
                duration: test.duration,
                doc: &test.doc,
                id: &test.id,
            })?;
        }
    }
    let buffer = writer
        .into_inner()
        .map_err(|e| Error::Buffer(e.error().to_string()))?;
    String::from_utf8(buffer).map_err(|e| Error::Buffer(e.to_string()))
}
