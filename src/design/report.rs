use serde::Serialize;
use std::fmt;

use crate::design::types::Output;
use crate::methods::types::{ArmClusters, SampleSize};

/// One cell of the comparison table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ReportValue {
    /// Umbrella rows that only group their variants
    NotApplicable,
    Power(f64),
    Clusters(ArmClusters),
    ClusterSize(SampleSize),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub label: &'static str,
    pub value: ReportValue,
}

/// The solved quantity under every method, in fixed row order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignReport {
    pub output: Output,
    pub rows: Vec<ReportRow>,
}

impl DesignReport {
    pub fn value(&self, label: &str) -> Option<&ReportValue> {
        self.rows.iter().find(|row| row.label == label).map(|row| &row.value)
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.rows.iter().map(|row| row.label).collect()
    }
}

const LABEL_WIDTH: usize = 32;
const COLUMN_WIDTH: usize = 8;

impl fmt::Display for DesignReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns: &[&str] = match self.output {
            Output::Power => &["Power"],
            Output::Clusters => &["K1", "K2"],
            Output::ClusterSize => &["m"],
        };
        write!(f, "{:<LABEL_WIDTH$}", "Design Method")?;
        for column in columns {
            write!(f, "{column:>COLUMN_WIDTH$}")?;
        }
        writeln!(f)?;

        for row in &self.rows {
            write!(f, "{:<LABEL_WIDTH$}", row.label)?;
            match row.value {
                ReportValue::NotApplicable => {
                    for _ in columns {
                        write!(f, "{:>COLUMN_WIDTH$}", "NA")?;
                    }
                }
                ReportValue::Power(power) => write!(f, "{power:>COLUMN_WIDTH$.4}")?,
                ReportValue::Clusters(arms) => write!(
                    f,
                    "{:>COLUMN_WIDTH$}{:>COLUMN_WIDTH$}",
                    arms.treatment.to_string(),
                    arms.control.to_string()
                )?,
                ReportValue::ClusterSize(m) => write!(f, "{:>COLUMN_WIDTH$}", m.to_string())?,
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
