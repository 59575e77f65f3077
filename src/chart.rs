//! Chart descriptions and the JavaScript interop that draws them.
//!
//! A [`ChartSpec`] is plain data built in Rust; `chart_helpers.js` turns it
//! into a Chart.js chart on a canvas.

use crate::dataset::Table;
use crate::pickups::Pickup;
use log::warn;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/chart_helpers.js")]
extern "C" {
    #[wasm_bindgen(js_name = renderChart)]
    fn render_chart_js(canvas_id: &str, spec: JsValue);

    #[wasm_bindgen(js_name = destroyChart)]
    pub fn destroy_chart(canvas_id: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Scatter,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub kind: ChartKind,
    /// Category labels for the x axis, one per point index.
    pub labels: Option<Vec<String>>,
    pub series: Vec<Series>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
}

impl ChartSpec {
    /// One series per column, plotted against the row index.
    pub fn from_table(table: &Table, kind: ChartKind) -> Self {
        let series = table
            .columns
            .iter()
            .enumerate()
            .map(|(c, name)| Series {
                name: name.clone(),
                points: table
                    .rows
                    .iter()
                    .enumerate()
                    .map(|(r, row)| Point {
                        x: r as f64,
                        y: row[c],
                    })
                    .collect(),
            })
            .collect();
        Self {
            kind,
            labels: Some((0..table.rows.len()).map(|r| table.row_label(r)).collect()),
            series,
            x_label: None,
            y_label: None,
        }
    }

    /// Plot the named `y` columns against column `x`. `None` if any column is
    /// missing.
    pub fn from_columns(table: &Table, kind: ChartKind, x: &str, ys: &[&str]) -> Option<Self> {
        let xs = table.column(x)?;
        let series = ys
            .iter()
            .map(|name| {
                let values = table.column(name)?;
                Some(Series {
                    name: name.to_string(),
                    points: xs
                        .iter()
                        .zip(values)
                        .map(|(&x, y)| Point { x, y })
                        .collect(),
                })
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Self {
            kind,
            labels: None,
            series,
            x_label: Some(x.to_string()),
            y_label: None,
        })
    }

    /// Bar chart of hourly counts.
    pub fn histogram(bins: &[u32], name: &str) -> Self {
        Self {
            kind: ChartKind::Bar,
            labels: Some((0..bins.len()).map(|h| h.to_string()).collect()),
            series: vec![Series {
                name: name.to_string(),
                points: bins
                    .iter()
                    .enumerate()
                    .map(|(h, &count)| Point {
                        x: h as f64,
                        y: f64::from(count),
                    })
                    .collect(),
            }],
            x_label: Some("Hour".to_string()),
            y_label: Some(name.to_string()),
        }
    }

    /// Scatter of pickup locations, longitude on x and latitude on y.
    pub fn map(pickups: &[Pickup]) -> Self {
        Self {
            kind: ChartKind::Scatter,
            labels: None,
            series: vec![Series {
                name: "pickups".to_string(),
                points: pickups
                    .iter()
                    .map(|p| Point { x: p.lon, y: p.lat })
                    .collect(),
            }],
            x_label: Some("lon".to_string()),
            y_label: Some("lat".to_string()),
        }
    }

    pub fn with_axis_labels(mut self, x: &str, y: &str) -> Self {
        self.x_label = Some(x.to_string());
        self.y_label = Some(y.to_string());
        self
    }
}

/// Draw `spec` on the canvas with id `canvas_id`, replacing any chart
/// already there.
pub fn render_chart(canvas_id: &str, spec: &ChartSpec) {
    match serde_wasm_bindgen::to_value(spec) {
        Ok(value) => render_chart_js(canvas_id, value),
        Err(e) => warn!("Could not serialise chart '{}': {}", canvas_id, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{linear, quadratic};

    #[test]
    fn table_chart_has_series_per_column() {
        let spec = ChartSpec::from_table(&linear(), ChartKind::Line);
        assert_eq!(spec.series.len(), 3);
        assert_eq!(spec.series[1].name, "second column");
        assert_eq!(spec.series[1].points[3], Point { x: 3.0, y: 40.0 });
        assert_eq!(spec.labels.as_ref().map(Vec::len), Some(4));
    }

    #[test]
    fn column_chart_uses_x_column() {
        let spec =
            ChartSpec::from_columns(&quadratic(), ChartKind::Line, "x", &["y"]).unwrap();
        assert_eq!(spec.series[0].points[0], Point { x: -10.0, y: 100.0 });
        assert_eq!(spec.x_label.as_deref(), Some("x"));
        assert!(ChartSpec::from_columns(&quadratic(), ChartKind::Line, "x", &["z"]).is_none());
    }

    #[test]
    fn histogram_has_one_bar_per_bin() {
        let spec = ChartSpec::histogram(&[1, 0, 4], "pickups");
        assert_eq!(spec.kind, ChartKind::Bar);
        assert_eq!(spec.series[0].points.len(), 3);
        assert_eq!(spec.series[0].points[2].y, 4.0);
    }

    #[test]
    fn spec_serialises_in_camel_case() {
        let spec = ChartSpec::histogram(&[2], "n").with_axis_labels("Hour", "Meows");
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["kind"], "bar");
        assert_eq!(json["xLabel"], "Hour");
        assert_eq!(json["yLabel"], "Meows");
    }
}
