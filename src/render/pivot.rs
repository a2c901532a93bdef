use crate::model::{Report, Test};
use crate::time::to_epoch_seconds;
use std::collections::HashMap;

/// A pivot column. The time column is its own variant so a test that
/// happens to be named `time` can never shadow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column<'a> {
    Time,
    Test(&'a str),
}

/// Wide table with one row per report: the report time as epoch seconds,
/// then one sparse cell per test identifier.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PivotTable {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<PivotRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PivotRow {
    pub time: f64,
    /// Indexed like the test columns of `PivotTable::column_order`.
    pub cells: Vec<Option<f64>>,
}

impl PivotTable {
    /// Builds the table in two passes. The first pass discovers identifiers in
    /// order of first appearance, the second fills the rows. A repeated
    /// identifier within one report keeps the last duration.
    pub fn build(runs: &[(Report, Vec<Test>)]) -> Self {
        let mut columns: Vec<String> = vec![];
        let mut index: HashMap<String, usize> = HashMap::new();
        for (_, tests) in runs {
            for test in tests {
                if !index.contains_key(&test.id) {
                    index.insert(test.id.clone(), columns.len());
                    columns.push(test.id.clone());
                }
            }
        }

        let rows = runs
            .iter()
            .map(|(report, tests)| {
                let mut cells = vec![None; columns.len()];
                for test in tests {
                    cells[index[&test.id]] = Some(test.duration);
                }
                PivotRow {
                    time: to_epoch_seconds(&report.time),
                    cells,
                }
            })
            .collect();

        Self {
            columns,
            index,
            rows,
        }
    }

    /// Time first, then test identifiers in discovery order.
    pub fn column_order(&self) -> Vec<Column<'_>> {
        let mut order = Vec::with_capacity(self.columns.len() + 1);
        order.push(Column::Time);
        order.extend(self.columns.iter().map(|c| Column::Test(c.as_str())));
        order
    }

    pub fn rows(&self) -> &[PivotRow] {
        &self.rows
    }

    /// `None` when the row does not exist or the report has no such test.
    pub fn cell(&self, row: usize, column: Column<'_>) -> Option<f64> {
        let row = self.rows.get(row)?;
        match column {
            Column::Time => Some(row.time),
            Column::Test(id) => row.cells[*self.index.get(id)?],
        }
    }
}
