//! Google Visualization `DataTable` JavaScript for a [`PivotTable`].

use crate::render::pivot::{Column, PivotTable};
use serde_json::Value;

const TIME_ID: &str = "time";
const TIME_LABEL: &str = "Time";
const NUMBER_TYPE: &str = "number";

/// String literal safe to place inside an inline `<script>`.
pub(crate) fn js_string(value: &str) -> String {
    Value::from(value).to_string().replace("</", "<\\/")
}

fn js_number(value: f64) -> String {
    Value::from(value).to_string()
}

/// Label and id of a `DataTable` column. Column ids must be unique, so a
/// test named like the time column keeps its label and goes without an id.
fn label_and_id<'a>(column: Column<'a>) -> (&'a str, &'a str) {
    match column {
        Column::Time => (TIME_LABEL, TIME_ID),
        Column::Test(id) if id == TIME_ID => (id, ""),
        Column::Test(id) => (id, id),
    }
}

/// Emits code that builds a `DataTable` in a variable called `name`. Empty
/// cells are left unset so the chart shows them as gaps.
pub fn to_js_code(name: &str, table: &PivotTable) -> String {
    let order = table.column_order();
    let mut code = format!("var {} = new google.visualization.DataTable();\n", name);
    for column in &order {
        let (label, id) = label_and_id(*column);
        code.push_str(&format!(
            "{}.addColumn({}, {}, {});\n",
            name,
            js_string(NUMBER_TYPE),
            js_string(label),
            js_string(id)
        ));
    }
    code.push_str(&format!("{}.addRows({});\n", name, table.rows().len()));
    for r in 0..table.rows().len() {
        for (c, column) in order.iter().enumerate() {
            if let Some(value) = table.cell(r, *column) {
                code.push_str(&format!("{}.setCell({}, {}, {});\n", name, r, c, js_number(value)));
            }
        }
    }
    code
}
