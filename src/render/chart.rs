use crate::configuration::settings::ChartSettings;
use crate::model::{Report, Test};
use crate::render::gviz::{js_string, to_js_code};
use crate::render::{Error, PivotTable};
use derivative::*;
use liquid::model::Value;
use liquid::{Object, ParserBuilder, Template};

const DATA_VARIABLE: &str = "data";

const PAGE_TEMPLATE: &str = r#"<html>
  <head>
    <title>{{ title | escape }}</title>
  </head>
  <script src="https://www.google.com/jsapi" type="text/javascript"></script>
  <script>
    google.load('visualization', '1', {packages:['corechart', 'table']});

    google.setOnLoadCallback(drawTable);
    function drawTable() {
      {{ jscode }}
      var chart = new google.visualization.ScatterChart(document.getElementById('chart_div'));
      chart.draw(data, {
          title: {{ title_js }},
          pointSize: {{ point_size }},
      });

      var table = new google.visualization.Table(document.getElementById('table_div'));
      table.draw(data, {showRowNumber: true});
    }
  </script>

  <body>
    <div id="chart_div"></div>
    <div id="table_div"></div>
  </body>
</html>
"#;

/// Scatter chart and table page over the pivot of recent reports.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct ChartPage {
    #[derivative(Debug = "ignore")]
    template: Template,
    title: String,
    point_size: u32,
}

impl ChartPage {
    pub fn new(settings: &ChartSettings) -> Result<Self, Error> {
        let template = ParserBuilder::with_stdlib().build()?.parse(PAGE_TEMPLATE)?;
        Ok(Self {
            template,
            title: settings.title.clone(),
            point_size: settings.point_size,
        })
    }

    pub fn render(&self, runs: &[(Report, Vec<Test>)]) -> Result<String, Error> {
        let table = PivotTable::build(runs);
        let mut globals = Object::new();
        globals.insert("title".into(), Value::scalar(self.title.clone()));
        globals.insert("title_js".into(), Value::scalar(js_string(&self.title)));
        globals.insert("point_size".into(), Value::scalar(i64::from(self.point_size)));
        globals.insert("jscode".into(), Value::scalar(to_js_code(DATA_VARIABLE, &table)));
        Ok(self.template.render(&globals)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::fixtures::{report, test};

    fn page() -> ChartPage {
        ChartPage::new(&ChartSettings {
            title: "Nightly <perf>".to_owned(),
            report_limit: 100,
            point_size: 7,
        })
        .unwrap()
    }

    #[test]
    fn test_render_embeds_data_table_and_widgets() {
        let html = page()
            .render(&[(report("2013-05-02T20:30:42", "abc123"), vec![test("test_a", 1.5)])])
            .unwrap();

        assert!(html.contains("var data = new google.visualization.DataTable();"));
        assert!(html.contains("data.setCell(0, 0, 1367526642.0);"));
        assert!(html.contains("data.setCell(0, 1, 1.5);"));
        assert!(html.contains("new google.visualization.ScatterChart"));
        assert!(html.contains("table.draw(data, {showRowNumber: true});"));
        assert!(html.contains("pointSize: 7,"));
        assert!(html.contains("<title>Nightly &lt;perf&gt;</title>"));
        assert!(html.contains(r#"title: "Nightly <perf>","#));
    }

    #[test]
    fn test_render_without_reports() {
        let html = page().render(&[]).unwrap();
        assert!(html.contains("data.addRows(0);"));
        assert!(html.contains("<div id=\"chart_div\"></div>"));
    }
}
