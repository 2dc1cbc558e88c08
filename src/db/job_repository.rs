use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};
use tracing::debug;

use crate::api::job::models::{JobFilterQuery, NewJobRequest, UpdateJobRequest};
use crate::db::models::{JobColumn, JobRow};
use crate::db::sql::{
    build_filter_fragment, build_update_fragment, FilterOp, FilterSpec, SqlParam,
};
use crate::error::ApiError;

const JOB_COLUMNS: &str = "id, title, salary, equity, company_handle";

/// Repository for job database operations.
///
/// Every method is a single request/response against the store: no
/// transactions, no retries. Store failures propagate to the caller.
pub struct JobRepository;

impl JobRepository {
    /// Insert a new job and return the stored record including the
    /// generated id. Schema constraints govern conflicts; there is no
    /// duplicate check here.
    pub async fn create(pool: &Pool<Postgres>, job: &NewJobRequest) -> Result<JobRow, ApiError> {
        debug!(
            "Creating job: title={}, company_handle={}",
            job.title, job.company_handle
        );

        let row = sqlx::query_as::<_, JobRow>(
            "INSERT INTO jobs (title, salary, equity, company_handle) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, title, salary, equity, company_handle",
        )
        .bind(&job.title)
        .bind(job.salary)
        .bind(job.equity)
        .bind(&job.company_handle)
        .fetch_one(pool)
        .await?;

        debug!("Job created with id={}", row.id);
        Ok(row)
    }

    /// Find all jobs matching the given filters, ordered by title.
    /// No matches is an empty vec, not an error.
    pub async fn find_all(
        pool: &Pool<Postgres>,
        filter: &JobFilterQuery,
    ) -> Result<Vec<JobRow>, ApiError> {
        let fragment = build_filter_fragment(Self::filter_specs(filter));
        let sql = format!(
            "SELECT {} FROM jobs WHERE {} ORDER BY title",
            JOB_COLUMNS, fragment.sql
        );
        debug!("Listing jobs: {}", sql);

        let mut query = sqlx::query_as::<_, JobRow>(&sql);
        for param in fragment.params {
            query = match param {
                SqlParam::Int(v) => query.bind(v),
                SqlParam::Text(v) => query.bind(v),
                SqlParam::Decimal(v) => query.bind(v),
            };
        }

        Ok(query.fetch_all(pool).await?)
    }

    /// Fetch a single job by id.
    pub async fn get(pool: &Pool<Postgres>, id: i32) -> Result<JobRow, ApiError> {
        let sql = format!("SELECT {} FROM jobs WHERE id = $1", JOB_COLUMNS);

        sqlx::query_as::<_, JobRow>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("no job with id: {}", id)))
    }

    /// Apply a partial update and return the updated record.
    ///
    /// Only title, salary and equity can change; the input type cannot
    /// carry id or company_handle. An update with no fields set is a
    /// caller error.
    pub async fn update(
        pool: &Pool<Postgres>,
        id: i32,
        changes: &UpdateJobRequest,
    ) -> Result<JobRow, ApiError> {
        let fragment = build_update_fragment(Self::assignments(changes))?;
        let id_position = fragment.params.len() + 1;
        let sql = format!(
            "UPDATE jobs SET {} WHERE id = ${} RETURNING {}",
            fragment.sql, id_position, JOB_COLUMNS
        );
        debug!("Updating job {}: {}", id, sql);

        let mut query = sqlx::query_as::<_, JobRow>(&sql);
        for param in fragment.params {
            query = match param {
                SqlParam::Int(v) => query.bind(v),
                SqlParam::Text(v) => query.bind(v),
                SqlParam::Decimal(v) => query.bind(v),
            };
        }

        query
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("no job with id: {}", id)))
    }

    /// Delete a job by id.
    pub async fn remove(pool: &Pool<Postgres>, id: i32) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound(format!("no job with id: {}", id)));
        }

        debug!("Deleted job {}", id);
        Ok(())
    }

    /// Fixed operator mapping for job search: title matches as a
    /// case-insensitive substring, minSalary as a lower bound, and
    /// hasEquity=true selects jobs with non-zero equity. hasEquity=false
    /// adds no filter at all rather than filtering for zero equity.
    fn filter_specs(filter: &JobFilterQuery) -> Vec<FilterSpec<JobColumn>> {
        let mut specs = Vec::new();

        if let Some(title) = &filter.title {
            specs.push(FilterSpec {
                column: JobColumn::Title,
                op: FilterOp::Pattern,
                value: SqlParam::Text(title.clone()),
            });
        }
        if let Some(min_salary) = filter.min_salary {
            specs.push(FilterSpec {
                column: JobColumn::Salary,
                op: FilterOp::GreaterOrEqual,
                value: SqlParam::Int(min_salary),
            });
        }
        if filter.has_equity == Some(true) {
            specs.push(FilterSpec {
                column: JobColumn::Equity,
                op: FilterOp::GreaterThan,
                value: SqlParam::Decimal(Decimal::ZERO),
            });
        }

        specs
    }

    /// Assignment list for a partial update, in declaration order.
    fn assignments(changes: &UpdateJobRequest) -> Vec<(JobColumn, SqlParam)> {
        let mut assignments = Vec::new();

        if let Some(title) = &changes.title {
            assignments.push((JobColumn::Title, SqlParam::Text(title.clone())));
        }
        if let Some(salary) = changes.salary {
            assignments.push((JobColumn::Salary, SqlParam::Int(salary)));
        }
        if let Some(equity) = changes.equity {
            assignments.push((JobColumn::Equity, SqlParam::Decimal(equity)));
        }

        assignments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_filter() -> JobFilterQuery {
        JobFilterQuery {
            title: None,
            min_salary: None,
            has_equity: None,
        }
    }

    #[test]
    fn no_filters_produce_no_specs() {
        assert!(JobRepository::filter_specs(&empty_filter()).is_empty());
    }

    #[test]
    fn min_salary_becomes_lower_bound_on_salary() {
        let filter = JobFilterQuery {
            min_salary: Some(300),
            ..empty_filter()
        };

        let specs = JobRepository::filter_specs(&filter);
        assert_eq!(
            specs,
            vec![FilterSpec {
                column: JobColumn::Salary,
                op: FilterOp::GreaterOrEqual,
                value: SqlParam::Int(300),
            }]
        );
    }

    #[test]
    fn has_equity_true_selects_non_zero_equity() {
        let filter = JobFilterQuery {
            has_equity: Some(true),
            ..empty_filter()
        };

        let specs = JobRepository::filter_specs(&filter);
        assert_eq!(
            specs,
            vec![FilterSpec {
                column: JobColumn::Equity,
                op: FilterOp::GreaterThan,
                value: SqlParam::Decimal(Decimal::ZERO),
            }]
        );
    }

    #[test]
    fn has_equity_false_is_dropped() {
        let filter = JobFilterQuery {
            has_equity: Some(false),
            ..empty_filter()
        };

        assert!(JobRepository::filter_specs(&filter).is_empty());
    }

    #[test]
    fn title_filter_is_a_pattern_match() {
        let filter = JobFilterQuery {
            title: Some("eng".to_string()),
            ..empty_filter()
        };

        let specs = JobRepository::filter_specs(&filter);
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].op, FilterOp::Pattern);
        assert_eq!(specs[0].value, SqlParam::Text("eng".to_string()));
    }

    #[test]
    fn assignments_follow_field_declaration_order() {
        let changes = UpdateJobRequest {
            title: Some("Engineer".to_string()),
            salary: Some(100),
            equity: Some(Decimal::new(2, 1)),
        };

        let assignments = JobRepository::assignments(&changes);
        assert_eq!(
            assignments
                .iter()
                .map(|(column, _)| *column)
                .collect::<Vec<_>>(),
            vec![JobColumn::Title, JobColumn::Salary, JobColumn::Equity]
        );
    }

    #[test]
    fn empty_changes_produce_no_assignments() {
        let changes = UpdateJobRequest {
            title: None,
            salary: None,
            equity: None,
        };

        assert!(JobRepository::assignments(&changes).is_empty());
    }
}
