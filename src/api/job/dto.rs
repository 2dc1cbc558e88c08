use serde::Serialize;

use crate::db::models::JobRow;

/// Response for a single job (create, get, update).
#[derive(Serialize)]
pub struct JobResponse {
    pub job: JobRow,
}

/// Response for a filtered listing.
#[derive(Serialize)]
pub struct JobsResponse {
    pub jobs: Vec<JobRow>,
}

/// Response for a deletion.
#[derive(Serialize)]
pub struct DeletedResponse {
    pub deleted: i32,
}
