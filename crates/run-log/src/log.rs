//! CSV run logs written by population-based optimizers.
//!
//! The first line is a header; columns are matched by name, case-insensitive:
//!
//! | role  | accepted names   | required |
//! |-------|------------------|----------|
//! | step  | `step`, `time`   | yes      |
//! | group | `group`, `tribe` | no       |
//! | value | `best`, `value`  | yes      |
//!
//! Other columns are ignored. Blank lines are skipped.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use tracing::debug;

use crate::error::{LogError, LogResult};

const STEP_COLUMNS: [&str; 2] = ["step", "time"];
const GROUP_COLUMNS: [&str; 2] = ["group", "tribe"];
const VALUE_COLUMNS: [&str; 2] = ["best", "value"];

/// One row of a run log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub step: u64,
    pub group: Option<String>,
    pub value: f64,
}

/// Values reported by one group over time.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSeries {
    pub group: String,
    /// `(step, value)` in file order
    pub points: Vec<(u64, f64)>,
}

/// A parsed run log.
#[derive(Debug, Clone, PartialEq)]
pub struct RunLog {
    records: Vec<LogRecord>,
    grouped: bool,
}

struct Columns {
    step: usize,
    group: Option<usize>,
    value: usize,
    count: usize,
}

impl Columns {
    fn from_header(header: &str) -> LogResult<Self> {
        let names: Vec<String> = header.split(',').map(|n| n.trim().to_ascii_lowercase()).collect();
        let find = |candidates: &[&str]| names.iter().position(|n| candidates.contains(&n.as_str()));

        Ok(Self {
            step: find(&STEP_COLUMNS).ok_or(LogError::MissingColumn {
                expected: "step/time",
            })?,
            group: find(&GROUP_COLUMNS),
            value: find(&VALUE_COLUMNS).ok_or(LogError::MissingColumn {
                expected: "best/value",
            })?,
            count: names.len(),
        })
    }
}

impl RunLog {
    /// Parse CSV text.
    pub fn parse(text: &str) -> LogResult<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty());

        let (_, header) = lines.next().ok_or(LogError::Empty)?;
        let columns = Columns::from_header(header)?;

        let mut records = Vec::new();
        for (line, row) in lines {
            let fields: Vec<&str> = row.split(',').map(str::trim).collect();
            if fields.len() != columns.count {
                return Err(LogError::FieldCount {
                    line,
                    expected: columns.count,
                    found: fields.len(),
                });
            }

            let step = parse_step(fields[columns.step]).ok_or_else(|| LogError::InvalidField {
                line,
                column: "step",
                value: fields[columns.step].to_string(),
            })?;
            let value = fields[columns.value]
                .parse::<f64>()
                .map_err(|_| LogError::InvalidField {
                    line,
                    column: "value",
                    value: fields[columns.value].to_string(),
                })?;
            let group = columns.group.map(|i| fields[i].to_string());

            records.push(LogRecord { step, group, value });
        }

        debug!(
            records = records.len(),
            grouped = columns.group.is_some(),
            "Parsed run log"
        );

        Ok(Self {
            records,
            grouped: columns.group.is_some(),
        })
    }

    /// Read and parse a CSV file.
    pub fn read(path: impl AsRef<Path>) -> LogResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the log has a group column.
    pub fn is_grouped(&self) -> bool {
        self.grouped
    }

    /// Minimum value reported at each step, ordered by step.
    pub fn global_best(&self) -> Vec<(u64, f64)> {
        let mut best: BTreeMap<u64, f64> = BTreeMap::new();
        for record in &self.records {
            best.entry(record.step)
                .and_modify(|v| *v = v.min(record.value))
                .or_insert(record.value);
        }
        best.into_iter().collect()
    }

    /// Per-group series, groups ordered by first appearance.
    ///
    /// Empty for logs without a group column.
    pub fn group_series(&self) -> Vec<GroupSeries> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut series: Vec<GroupSeries> = Vec::new();

        for record in &self.records {
            let Some(group) = record.group.as_deref() else {
                continue;
            };
            let slot = *index.entry(group).or_insert_with(|| {
                series.push(GroupSeries {
                    group: group.to_string(),
                    points: Vec::new(),
                });
                series.len() - 1
            });
            series[slot].points.push((record.step, record.value));
        }

        series
    }
}

/// Steps are iteration counters; integral floats like `3.0` are accepted.
fn parse_step(field: &str) -> Option<u64> {
    if let Ok(step) = field.parse::<u64>() {
        return Some(step);
    }
    let step = field.parse::<f64>().ok()?;
    (step.is_finite() && step >= 0.0 && step.fract() == 0.0).then_some(step as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_step_forms() {
        assert_eq!(parse_step("12"), Some(12));
        assert_eq!(parse_step("3.0"), Some(3));
        assert_eq!(parse_step("2.5"), None);
        assert_eq!(parse_step("-1"), None);
        assert_eq!(parse_step("abc"), None);
    }

    #[test]
    fn test_header_names_are_case_insensitive() {
        let columns = Columns::from_header(" Time , Tribe , Value ").unwrap();
        assert_eq!((columns.step, columns.group, columns.value), (0, Some(1), 2));
    }

    #[test]
    fn test_header_without_value_column() {
        assert!(matches!(
            Columns::from_header("step,group"),
            Err(LogError::MissingColumn { .. })
        ));
    }
}
