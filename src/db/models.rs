use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use crate::db::sql::SqlColumn;

/// Database representation of a job posting.
///
/// `equity` is NUMERIC in the store and serializes as a decimal string at
/// the API boundary.
#[derive(Debug, FromRow, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobRow {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Mutable / filterable columns of the jobs table. `id` and
/// `company_handle` are deliberately absent: they are immutable after
/// creation and must never appear in an update fragment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JobColumn {
    Title,
    Salary,
    Equity,
}

impl SqlColumn for JobColumn {
    fn column_name(self) -> &'static str {
        match self {
            JobColumn::Title => "title",
            JobColumn::Salary => "salary",
            JobColumn::Equity => "equity",
        }
    }
}
