//! Readiness endpoint

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use axum_helpers::{run_health_checks, HealthCheckFuture};
use database::postgres::{check_health, DatabaseConnection};
use serde_json::Value;

async fn ready(State(db): State<DatabaseConnection>) -> (StatusCode, Json<Value>) {
    let database: HealthCheckFuture = Box::pin(async {
        check_health(&db).await.map_err(|e| e.to_string())
    });

    run_health_checks(vec![("database", database)]).await
}

/// `/ready`: 200 once PostgreSQL answers, 503 otherwise.
pub fn router(db: DatabaseConnection) -> Router {
    Router::new()
        .route("/ready", get(ready))
        .with_state(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_ready_reports_unreachable_database() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection refused".into())])
            .into_connection();

        let response = router(db)
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "not ready");
        assert_eq!(body["database"], "disconnected");
    }
}
