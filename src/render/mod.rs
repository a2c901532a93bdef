pub mod chart;
pub mod error;
pub mod export;
pub mod gviz;
pub mod pivot;

pub use self::chart::ChartPage;
pub use self::error::Error;
pub use self::export::export_csv;
pub use self::pivot::PivotTable;
