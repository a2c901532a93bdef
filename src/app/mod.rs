use crate::configuration::settings::Settings;
use crate::model::{self, Report, ReportKey, Test};
use crate::render::{self, ChartPage};
use crate::server;
use crate::storage::{self, Storage};
use derivative::*;
use futures::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Payload(#[from] model::Error),
    #[error(transparent)]
    Storage(#[from] storage::Error),
    #[error(transparent)]
    Render(#[from] render::Error),
    #[error("server error: {0}")]
    Server(#[from] hyper::Error),
}

/// Reports with their tests, in storage scan order.
pub type Runs = Vec<(Report, Vec<Test>)>;

#[derive(Derivative)]
#[derivative(Debug)]
pub struct App {
    #[derivative(Debug = "ignore")]
    storage: Arc<dyn Storage>,
    chart: ChartPage,
    report_limit: usize,
    upload_field: String,
    bind: SocketAddr,
}

impl App {
    pub fn new(settings: &Settings) -> Result<Self, Error> {
        let storage = storage::open(&settings.storage)?;
        Self::with_storage(settings, storage)
    }

    pub fn with_storage(settings: &Settings, storage: Arc<dyn Storage>) -> Result<Self, Error> {
        Ok(App {
            storage,
            chart: ChartPage::new(&settings.chart)?,
            report_limit: settings.chart.report_limit,
            upload_field: settings.upload.field.clone(),
            bind: settings.server.bind,
        })
    }

    pub async fn run<F>(self, shutdown: F) -> Result<(), Error>
    where
        F: Future<Output = ()>,
    {
        let (reports, tests) = self.storage.counts()?;
        info!("Serving {} reports with {} tests", reports, tests);
        let bind = self.bind;
        server::serve(bind, Arc::new(self), shutdown).await?;
        info!("Server stopped");
        Ok(())
    }

    pub fn upload_field(&self) -> &str {
        &self.upload_field
    }

    /// Stores one uploaded report with all of its tests.
    pub fn ingest(&self, document: &str) -> Result<ReportKey, Error> {
        let (report, tests) = model::from_upload(document)?;
        let key = self.storage.insert_report(&report, &tests)?;
        info!(
            "Stored report {} (revision '{}') with {} tests",
            key,
            report.revision,
            tests.len()
        );
        Ok(key)
    }

    /// Chart page over the first `report_limit` reports.
    pub fn chart(&self) -> Result<String, Error> {
        let now = Instant::now();
        let runs = self.runs(Some(self.report_limit))?;
        let html = self.chart.render(&runs)?;
        debug!("Rendered chart of {} reports in {} ms", runs.len(), now.elapsed().as_millis());
        Ok(html)
    }

    /// CSV of every stored (report, test) pair.
    pub fn dump(&self) -> Result<String, Error> {
        let runs = self.runs(None)?;
        Ok(render::export_csv(&runs)?)
    }

    fn runs(&self, limit: Option<usize>) -> Result<Runs, Error> {
        let mut runs = vec![];
        for report in self.storage.reports(limit)? {
            let key = report.key.ok_or_else(|| {
                storage::Error::Backend(format!("report '{}' was scanned without a key", report.revision))
            })?;
            let tests = self.storage.tests_of(key)?;
            runs.push((report, tests));
        }
        Ok(runs)
    }
}
