use actix_web::{
    delete, get, patch, post,
    web::{self, Data, Path, ServiceConfig},
    HttpResponse,
};
use actix_web_validator::{Json, Query};
use sqlx::{Pool, Postgres};
use tracing::info;

use crate::api::auth::AdminUser;
use crate::api::job::dto::{DeletedResponse, JobResponse, JobsResponse};
use crate::api::job::models::{JobFilterQuery, NewJobRequest, UpdateJobRequest};
use crate::db::job_repository::JobRepository;
use crate::error::ApiError;

/// POST /jobs => 201 {job}. Admin only.
#[post("")]
async fn create_job(
    pool: Data<Pool<Postgres>>,
    admin: AdminUser,
    body: Json<NewJobRequest>,
) -> Result<HttpResponse, ApiError> {
    info!("{} creating job: {}", admin.0.username, body.title);

    let job = JobRepository::create(&pool, &body).await?;
    Ok(HttpResponse::Created().json(JobResponse { job }))
}

/// GET /jobs => 200 {jobs: [...]}. Public; accepts title, minSalary and
/// hasEquity filters.
#[get("")]
async fn list_jobs(
    pool: Data<Pool<Postgres>>,
    filter: Query<JobFilterQuery>,
) -> Result<HttpResponse, ApiError> {
    let jobs = JobRepository::find_all(&pool, &filter).await?;
    Ok(HttpResponse::Ok().json(JobsResponse { jobs }))
}

/// GET /jobs/{id} => 200 {job}. Public.
#[get("/{id}")]
async fn get_job(
    pool: Data<Pool<Postgres>>,
    path: Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let job = JobRepository::get(&pool, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(JobResponse { job }))
}

/// PATCH /jobs/{id} => 200 {job}. Admin only; accepts any subset of
/// title, salary, equity.
#[patch("/{id}")]
async fn update_job(
    pool: Data<Pool<Postgres>>,
    admin: AdminUser,
    path: Path<i32>,
    body: Json<UpdateJobRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    info!("{} updating job {}", admin.0.username, id);

    let job = JobRepository::update(&pool, id, &body).await?;
    Ok(HttpResponse::Ok().json(JobResponse { job }))
}

/// DELETE /jobs/{id} => 200 {deleted: id}. Admin only.
#[delete("/{id}")]
async fn delete_job(
    pool: Data<Pool<Postgres>>,
    admin: AdminUser,
    path: Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    info!("{} deleting job {}", admin.0.username, id);

    JobRepository::remove(&pool, id).await?;
    Ok(HttpResponse::Ok().json(DeletedResponse { deleted: id }))
}

pub fn job_config(config: &mut ServiceConfig) {
    config.service(
        web::scope("/jobs")
            .service(create_job)
            .service(list_jobs)
            .service(get_job)
            .service(update_job)
            .service(delete_job),
    );
}
