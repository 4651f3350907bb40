pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::session::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Jobs
        .route(
            "/api/v1/jobs",
            get(handlers::handle_list_jobs).post(handlers::handle_load_jobs),
        )
        .route("/api/v1/jobs/import", post(handlers::handle_import_jobs))
        .route("/api/v1/jobs/insert", post(handlers::handle_insert_job))
        .route("/api/v1/jobs/sort", post(handlers::handle_sort_jobs))
        .route(
            "/api/v1/jobs/:id",
            get(handlers::handle_get_job)
                .patch(handlers::handle_update_job)
                .delete(handlers::handle_delete_job),
        )
        .route("/api/v1/jobs/:id/matches", get(handlers::handle_job_matches))
        // Resumes
        .route(
            "/api/v1/resumes",
            get(handlers::handle_list_resumes).post(handlers::handle_load_resumes),
        )
        .route("/api/v1/resumes/import", post(handlers::handle_import_resumes))
        .route("/api/v1/resumes/insert", post(handlers::handle_insert_resume))
        .route("/api/v1/resumes/sort", post(handlers::handle_sort_resumes))
        .route(
            "/api/v1/resumes/:id",
            get(handlers::handle_get_resume)
                .patch(handlers::handle_update_resume)
                .delete(handlers::handle_delete_resume),
        )
        .route(
            "/api/v1/resumes/:id/matches",
            get(handlers::handle_resume_matches),
        )
        // Matching
        .route("/api/v1/matches/run", post(handlers::handle_run_matches))
        .route("/api/v1/matches/best", get(handlers::handle_best_matches))
        .route("/api/v1/matches/top", get(handlers::handle_top_matches))
        .route(
            "/api/v1/matches/breakdown",
            get(handlers::handle_match_breakdown),
        )
        .route("/api/v1/matches/export", get(handlers::handle_export_matches))
        .route("/api/v1/metrics", get(handlers::handle_metrics))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::collection::BackendKind;
    use crate::config::Config;

    fn app_with(config: Config) -> Router {
        build_router(AppState::new(config))
    }

    fn app() -> Router {
        app_with(Config::default())
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn send_text(app: &Router, uri: &str, text: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "text/csv")
            .body(Body::from(text.to_string()))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn seed(app: &Router) {
        let (status, _) = send(
            app,
            Method::POST,
            "/api/v1/jobs",
            Some(json!({ "records": [
                { "description": "Data Analyst needed with python and sql", "experience_required": 3 },
                { "description": "Platform Engineer needed for kubernetes" }
            ]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(
            app,
            Method::POST,
            "/api/v1/resumes",
            Some(json!({ "records": [
                { "summary": "Analyst who writes python daily", "years_experience": 2 },
                { "summary": "Ops engineer running kubernetes and docker", "name": "Grace" }
            ]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_load_and_get_job() {
        let app = app();
        seed(&app).await;

        let (status, body) = send(&app, Method::GET, "/api/v1/jobs/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Data Analyst");
        assert_eq!(body["skills"], json!(["python", "sql"]));

        let (status, body) = send(&app, Method::GET, "/api/v1/resumes/102", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Grace");
        assert_eq!(body["email"], "candidate102@email.com");
    }

    #[tokio::test]
    async fn test_missing_record_is_404() {
        let (status, body) = send(&app(), Method::GET, "/api/v1/jobs/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_run_best_then_top_and_export() {
        let app = app();
        seed(&app).await;

        let (status, run) = send(&app, Method::POST, "/api/v1/matches/run", Some(json!({ "mode": "best" }))).await;
        assert_eq!(status, StatusCode::OK);
        let rows = run["matches"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["resume_id"], 101);
        assert_eq!(rows[0]["job_id"], 1);

        let (_, top) = send(&app, Method::GET, "/api/v1/matches/top?k=1", None).await;
        assert_eq!(top.as_array().unwrap().len(), 1);
        assert_eq!(top[0]["resume_id"], 102);

        let request = Request::builder()
            .uri("/api/v1/matches/export")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let csv = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(csv.starts_with("ResumeID,BestJobID,Score,MatchedSkills\n101,1,56.67,1\n"));
    }

    #[tokio::test]
    async fn test_export_before_run_is_404() {
        let (status, _) = send(&app(), Method::GET, "/api/v1/matches/export", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_top_before_run_is_empty() {
        let (status, body) = send(&app(), Method::GET, "/api/v1/matches/top?k=5", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_capacity_exceeded_is_409() {
        let config = Config {
            backend: BackendKind::Bounded,
            job_capacity: 1,
            ..Config::default()
        };
        let app = app_with(config);
        let payload = json!({ "description": "Rust developer needed for systems work" });
        let (status, _) = send(&app, Method::POST, "/api/v1/jobs/insert", Some(payload.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, body) = send(&app, Method::POST, "/api/v1/jobs/insert", Some(payload)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "CAPACITY_EXCEEDED");
    }

    #[tokio::test]
    async fn test_insert_at_invalid_position_is_400() {
        let app = app();
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/resumes/insert",
            Some(json!({ "summary": "Backend developer with java", "placement": { "at": 3 } })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_explicit_skills_are_capped_and_not_extracted() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/jobs/insert",
            Some(json!({
                "description": "Data Engineer needed with react",
                "experience_required": 2,
                "skills": ["Python", "sql", "SQL", "git", "aws", "docker", "kubernetes",
                           "java", "go", "rust", "scala", "excel", "tableau"]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            body["skills"],
            json!(["python", "sql", "git", "aws", "docker", "kubernetes", "java", "go", "rust", "scala"])
        );

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/resumes",
            Some(json!({ "records": [
                { "summary": "Writes react apps", "years_experience": 3, "skills": ["python", "git", "aws"] }
            ]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let (status, resume) = send(&app, Method::GET, "/api/v1/resumes/101", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resume["skills"], json!(["python", "git", "aws"]));
    }

    #[tokio::test]
    async fn test_insert_front_then_list_order() {
        let app = app();
        seed(&app).await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/jobs/insert",
            Some(json!({ "description": "QA Engineer needed with git", "placement": "front" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 3);

        let (_, list) = send(&app, Method::GET, "/api/v1/jobs", None).await;
        let ids: Vec<u64> = list
            .as_array()
            .unwrap()
            .iter()
            .map(|j| j["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn test_sort_with_wrong_key_is_400() {
        let app = app();
        let (status, _) = send(&app, Method::POST, "/api/v1/jobs/sort", Some(json!({ "key": "name" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        seed(&app).await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/resumes/sort",
            Some(json!({ "key": "id", "ascending": false })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], 102);
    }

    #[tokio::test]
    async fn test_patch_and_delete() {
        let app = app();
        seed(&app).await;
        let (status, body) = send(
            &app,
            Method::PATCH,
            "/api/v1/jobs/2",
            Some(json!({ "title": "SRE", "experience_required": 7 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "SRE");
        assert_eq!(body["experience_required"], 7);

        let (status, _) = send(&app, Method::DELETE, "/api/v1/jobs/2", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, Method::DELETE, "/api/v1/jobs/2", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_import_csv_and_empty_body() {
        let app = app();
        let csv = "job_description\n\"Data Scientist needed with pandas and numpy\"\n\"tiny\"\n";
        let (status, body) = send_text(&app, "/api/v1/jobs/import", csv).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["loaded"], 1);
        assert_eq!(body["total"], 1);

        let (status, body) = send_text(&app, "/api/v1/resumes/import", "  ").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "SOURCE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_rankings_and_breakdown() {
        let app = app();
        seed(&app).await;

        let (status, body) = send(&app, Method::GET, "/api/v1/jobs/2/matches?k=1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["resume_id"], 102);

        let (status, body) = send(&app, Method::GET, "/api/v1/resumes/101/matches", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/v1/matches/breakdown?job_id=1&resume_id=101",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matched_skills"], json!(["python"]));
        assert_eq!(body["recommendation"], "moderate");

        let (status, _) = send(
            &app,
            Method::GET,
            "/api/v1/matches/breakdown?job_id=1&resume_id=999",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_metrics_report_counts() {
        let app = app();
        seed(&app).await;
        send(&app, Method::POST, "/api/v1/matches/run", Some(json!({ "mode": "all" }))).await;
        let (status, body) = send(&app, Method::GET, "/api/v1/metrics", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["job_count"], 2);
        assert_eq!(body["resume_count"], 2);
        assert_eq!(body["comparisons"], 4);
        assert_eq!(body["backend"], "linked");
    }

    #[tokio::test]
    async fn test_run_writes_export_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let app = app_with(Config {
            export_path: Some(path.clone()),
            ..Config::default()
        });
        seed(&app).await;
        send(&app, Method::POST, "/api/v1/matches/run", Some(json!({ "mode": "all" }))).await;
        let csv = std::fs::read_to_string(&path).unwrap();
        assert!(csv.starts_with("JobID,ResumeID,Score,MatchedSkills\n"));
        assert_eq!(csv.lines().count(), 5);
    }
}
