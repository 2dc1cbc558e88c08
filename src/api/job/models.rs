use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationError};

/// Body of POST /jobs. `companyHandle` is set once here and can never be
/// changed afterwards.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJobRequest {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,

    #[validate(range(min = 0, message = "Salary must not be negative"))]
    pub salary: Option<i32>,

    #[validate(custom(function = "validate_equity"))]
    pub equity: Option<Decimal>,

    #[validate(length(min = 1, message = "Company handle must not be empty"))]
    pub company_handle: String,
}

/// Body of PATCH /jobs/{id}. Only the fields present are changed.
///
/// `deny_unknown_fields` makes an attempt to patch `id` or
/// `companyHandle` a 400 instead of a silent no-op.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateJobRequest {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,

    #[validate(range(min = 0, message = "Salary must not be negative"))]
    pub salary: Option<i32>,

    #[validate(custom(function = "validate_equity"))]
    pub equity: Option<Decimal>,
}

/// Query string of GET /jobs. Unknown filter keys are rejected rather
/// than producing malformed SQL downstream.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobFilterQuery {
    pub title: Option<String>,

    #[validate(range(min = 0, message = "minSalary must not be negative"))]
    pub min_salary: Option<i32>,

    pub has_equity: Option<bool>,
}

fn validate_equity(equity: &Decimal) -> Result<(), ValidationError> {
    if *equity < Decimal::ZERO || *equity > Decimal::ONE {
        let mut err = ValidationError::new("range");
        err.message = Some("Equity must be between 0 and 1".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_job_accepts_valid_payload() {
        let job: NewJobRequest = serde_json::from_str(
            r#"{"title": "Engineer", "salary": 100000, "equity": "0.1", "companyHandle": "c1"}"#,
        )
        .unwrap();

        assert!(job.validate().is_ok());
        assert_eq!(job.equity, Some(Decimal::new(1, 1)));
    }

    #[test]
    fn new_job_requires_title_and_company_handle() {
        let result: Result<NewJobRequest, _> =
            serde_json::from_str(r#"{"title": "Engineer"}"#);
        assert!(result.is_err());

        let job: NewJobRequest =
            serde_json::from_str(r#"{"title": "", "companyHandle": "c1"}"#).unwrap();
        assert!(job.validate().is_err());
    }

    #[test]
    fn new_job_rejects_equity_above_one() {
        let job: NewJobRequest = serde_json::from_str(
            r#"{"title": "Engineer", "equity": "1.5", "companyHandle": "c1"}"#,
        )
        .unwrap();

        assert!(job.validate().is_err());
    }

    #[test]
    fn new_job_rejects_negative_salary() {
        let job: NewJobRequest = serde_json::from_str(
            r#"{"title": "Engineer", "salary": -1, "companyHandle": "c1"}"#,
        )
        .unwrap();

        assert!(job.validate().is_err());
    }

    #[test]
    fn update_rejects_company_handle_change() {
        let result: Result<UpdateJobRequest, _> =
            serde_json::from_str(r#"{"companyHandle": "c2"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_rejects_id_change() {
        let result: Result<UpdateJobRequest, _> = serde_json::from_str(r#"{"id": 99}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_accepts_any_subset_of_mutable_fields() {
        let changes: UpdateJobRequest = serde_json::from_str(r#"{"salary": 1}"#).unwrap();
        assert!(changes.validate().is_ok());
        assert_eq!(changes.salary, Some(1));
        assert!(changes.title.is_none());
    }

    #[test]
    fn filter_query_rejects_unknown_keys() {
        let result: Result<JobFilterQuery, _> =
            serde_json::from_str(r#"{"maxSalary": 10}"#);
        assert!(result.is_err());
    }

    #[test]
    fn equity_boundaries_are_inclusive() {
        assert!(validate_equity(&Decimal::ZERO).is_ok());
        assert!(validate_equity(&Decimal::ONE).is_ok());
        assert!(validate_equity(&Decimal::new(-1, 1)).is_err());
    }
}
