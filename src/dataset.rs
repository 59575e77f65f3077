//! Small numeric tables used throughout the walkthrough.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::Serialize;

/// Weekdays of the meow table, in column order.
pub const MEOW_DAYS: [&str; 3] = ["Monday", "Tuesday", "Wednesday"];
/// Dinner-time hours with the biggest bump.
const MEOW_PEAK_HOURS: [usize; 2] = [7, 16];
/// Hours either side of dinner that taper up and down.
const MEOW_SHOULDER_HOURS: [usize; 4] = [6, 8, 15, 17];

/// Rows × columns of numbers with column labels and optional row labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub row_labels: Option<Vec<String>>,
    pub rows: Vec<Vec<f64>>,
}

impl Table {
    /// Build a table from column-major data. All columns must be the same
    /// length; shorter columns are padded with `NaN`.
    pub fn from_columns(columns: Vec<(String, Vec<f64>)>) -> Self {
        let height = columns.iter().map(|(_, v)| v.len()).max().unwrap_or(0);
        let rows = (0..height)
            .map(|r| {
                columns
                    .iter()
                    .map(|(_, v)| v.get(r).copied().unwrap_or(f64::NAN))
                    .collect()
            })
            .collect();
        Self {
            columns: columns.into_iter().map(|(name, _)| name).collect(),
            row_labels: None,
            rows,
        }
    }

    pub fn with_row_labels(mut self, labels: Vec<String>) -> Self {
        self.row_labels = Some(labels);
        self
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Values of one column. Rows too short to reach it read as `NaN`.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).copied().unwrap_or(f64::NAN))
                .collect(),
        )
    }

    /// Label for row `idx`: the row label when present, otherwise the index.
    pub fn row_label(&self, idx: usize) -> String {
        self.row_labels
            .as_ref()
            .and_then(|labels| labels.get(idx).cloned())
            .unwrap_or_else(|| idx.to_string())
    }

    /// Row index of the largest value in each column, first one on ties.
    /// `None` for an empty or all-NaN column.
    pub fn column_max_rows(&self) -> Vec<Option<usize>> {
        (0..self.columns.len())
            .map(|c| {
                let mut best: Option<(usize, f64)> = None;
                for (r, row) in self.rows.iter().enumerate() {
                    let v = match row.get(c) {
                        Some(&v) if !v.is_nan() => v,
                        _ => continue,
                    };
                    match best {
                        Some((_, b)) if v <= b => {}
                        _ => best = Some((r, v)),
                    }
                }
                best.map(|(r, _)| r)
            })
            .collect()
    }
}

/// `rows` × `cols` standard-normal samples labelled `col 0`, `col 1`, ...
pub fn random_normal<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Table {
    let rows: Vec<Vec<f64>> = (0..rows)
        .map(|_| (0..cols).map(|_| StandardNormal.sample(rng)).collect())
        .collect();
    Table {
        columns: (0..cols).map(|i| format!("col {}", i)).collect(),
        row_labels: None,
        rows,
    }
}

/// `x` from -10 to 10 inclusive and `y = x²`.
pub fn quadratic() -> Table {
    let x: Vec<f64> = (-10..=10).map(f64::from).collect();
    let y = x.iter().map(|v| v * v).collect();
    Table::from_columns(vec![("x".to_string(), x), ("y".to_string(), y)])
}

/// Two straight lines plus an `index` column to plot them against.
pub fn linear() -> Table {
    Table::from_columns(vec![
        ("first column".to_string(), vec![1.0, 2.0, 3.0, 4.0]),
        ("second column".to_string(), vec![10.0, 20.0, 30.0, 40.0]),
        ("index".to_string(), vec![0.0, 1.0, 2.0, 3.0]),
    ])
}

/// Hourly meow counts for three days, peaking around dinner time.
pub fn meow_data<R: Rng + ?Sized>(rng: &mut R) -> Table {
    let columns = MEOW_DAYS
        .iter()
        .map(|day| {
            let hourly = (0..24)
                .map(|hour| {
                    let mut meows: u32 = rng.random_range(1..=5);
                    if MEOW_PEAK_HOURS.contains(&hour) {
                        meows += rng.random_range(10..=20);
                    } else if MEOW_SHOULDER_HOURS.contains(&hour) {
                        meows += rng.random_range(5..=10);
                    }
                    f64::from(meows)
                })
                .collect();
            (day.to_string(), hourly)
        })
        .collect();

    Table::from_columns(columns).with_row_labels((0..24).map(|h| h.to_string()).collect())
}
