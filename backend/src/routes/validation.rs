use serde::{Deserialize, Serialize};

use crate::parsing::Table;

/// A single validation finding.
///
/// `row` is the 1-based line number in the source file, header included, so
/// the first data row is line 2. `None` for table-level findings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub row: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    pub message: String,
}

impl ValidationIssue {
    pub fn table(message: impl Into<String>) -> Self {
        Self {
            row: None,
            column: None,
            message: message.into(),
        }
    }

    pub fn at_row(row: usize, message: impl Into<String>) -> Self {
        Self {
            row: Some(row),
            column: None,
            message: message.into(),
        }
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }
}

/// Validation report for one input table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub rows_in: usize,
    pub rows_out: usize,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    /// Accepted rows with normalized values.
    pub cleaned: Table,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Geo validation endpoint path.
pub const GET_GEO_VALIDATION: &str = "/validation/geo";
/// KPI validation endpoint path.
pub const GET_KPI_VALIDATION: &str = "/validation/kpi";
