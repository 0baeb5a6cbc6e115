//! Request handlers for the API endpoints.

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::types::HealthResponse;
use crate::config::RequestDocument;
use crate::solver;

/// Returns a static liveness payload.
///
/// `GET /health` → 200 + `HealthResponse` JSON
pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Solves a request document and returns the response document.
///
/// `POST /solve` → 200 + `SolveReport` JSON always — the output-document
/// contract (spec §6/§7) has a status for every outcome, including a
/// request document that fails validation or has an invalid time grid
/// (`MODEL_INVALID`), so there is no case that falls back to a bare HTTP
/// error body. Builds and solves its own model per request — no state is
/// shared or retained between calls.
pub async fn post_solve(Json(doc): Json<RequestDocument>) -> impl IntoResponse {
    Json(solver::solve_report(&doc))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;

    #[tokio::test]
    async fn health_returns_200_ok_status() {
        let app = router();
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn solve_reports_model_invalid_for_request_with_no_days_or_range() {
        let app = router();
        let body = serde_json::json!({
            "initial_state": {"FT": 0, "ET": 0, "Tf": 0, "Te": 0}
        });
        let req = Request::builder()
            .uri("/solve")
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "MODEL_INVALID");
        assert!(json["days"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn solve_accepts_empty_day_range() {
        let app = router();
        let body = serde_json::json!({
            "days": [],
            "initial_state": {"FT": 0, "ET": 0, "Tf": 0, "Te": 0}
        });
        let req = Request::builder()
            .uri("/solve")
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "OPTIMAL");
        assert_eq!(json["objective_deliveries"], 0);
        assert_eq!(json["objective_liters"], 0);
    }
}
