// src/handlers/result.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{error::AppError, models::result::ResultRecord};

const RESULT_SELECT: &str = r#"
    SELECT
        r.id, r.taker_id, r.quiz_id, q.title AS quiz_title,
        r.score, r.total, r.percentage, r.correct_count, r.wrong_count, r.time_taken,
        r.easy_correct, r.easy_total, r.medium_correct, r.medium_total,
        r.hard_correct, r.hard_total, r.completed_at
    FROM results r
    JOIN quizzes q ON r.quiz_id = q.id
"#;

/// Retrieves one stored result.
#[utoipa::path(
    get,
    path = "/api/results/{id}",
    params(("id" = i64, Path, description = "Result id")),
    responses(
        (status = 200, description = "Stored result", body = ResultRecord),
        (status = 404, description = "Result not found"),
    ),
    tag = "result"
)]
pub async fn get_result(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query_as::<_, ResultRecord>(&format!("{RESULT_SELECT} WHERE r.id = ?"))
        .bind(id)
        .fetch_optional(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch result {}: {:?}", id, e);
            AppError::InternalServerError(e.to_string())
        })?
        .ok_or(AppError::NotFound("Result not found".to_string()))?;

    Ok(Json(result))
}

/// Lists a test-taker's results, newest first.
#[utoipa::path(
    get,
    path = "/api/takers/{taker_id}/results",
    params(("taker_id" = i64, Path, description = "Test-taker id")),
    responses((status = 200, description = "Results of the taker", body = [ResultRecord])),
    tag = "result"
)]
pub async fn list_taker_results(
    State(pool): State<SqlitePool>,
    Path(taker_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let results = sqlx::query_as::<_, ResultRecord>(&format!(
        "{RESULT_SELECT} WHERE r.taker_id = ? ORDER BY r.completed_at DESC, r.id DESC"
    ))
    .bind(taker_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list results of taker {}: {:?}", taker_id, e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(results))
}
