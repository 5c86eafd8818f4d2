pub mod health;

use axum::{routing::get, Router};

use crate::briefs::handlers;
use crate::generation::handlers as generation;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Brief Store
        .route(
            "/api/briefs",
            get(handlers::handle_list_briefs).post(handlers::handle_create_brief),
        )
        .route(
            "/api/briefs/",
            get(handlers::handle_list_briefs).post(handlers::handle_create_brief),
        )
        .route(
            "/api/briefs/:id",
            get(handlers::handle_get_brief)
                .put(handlers::handle_update_brief)
                .delete(handlers::handle_delete_brief),
        )
        // Generation
        .route("/generate", get(generation::handle_generate))
        .route("/prompt", get(generation::handle_preview_prompt))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::briefs::store::BriefStore;
    use crate::config::Config;
    use crate::context::loader::ContextLoader;
    use crate::llm_client::{CompletionClient, LlmError};
    use crate::models::prompt::PromptMessage;

    /// Records the prompt it receives and answers with a canned reply.
    struct StubLlm {
        reply: Option<String>,
        seen: Mutex<Vec<Vec<PromptMessage>>>,
    }

    #[async_trait]
    impl CompletionClient for StubLlm {
        async fn complete(&self, messages: &[PromptMessage]) -> Result<String, LlmError> {
            self.seen.lock().unwrap().push(messages.to_vec());
            self.reply.clone().ok_or(LlmError::Api {
                status: 401,
                message: "Incorrect API key provided".to_string(),
            })
        }
    }

    struct TestApp {
        tmp: TempDir,
        llm: Arc<StubLlm>,
        router: Router,
    }

    fn test_app(reply: Option<&str>) -> TestApp {
        let tmp = TempDir::new().unwrap();
        let config = Config {
            openai_api_key: "sk-test".to_string(),
            contexts_dir: tmp.path().to_path_buf(),
            cors_allowed_origin: "http://localhost:5173".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
        };
        let briefs_dir: PathBuf = config.briefs_dir();
        std::fs::create_dir_all(&briefs_dir).unwrap();

        for (subdir, name, body) in [
            (
                "instructions",
                "user_stories",
                r#"{"system": "product_manager", "content": "Write user stories."}"#,
            ),
            (
                "system_roles",
                "product_manager",
                r#"{"content": "You are a senior product manager."}"#,
            ),
        ] {
            let dir = tmp.path().join(subdir);
            std::fs::create_dir_all(&dir).unwrap();
            std::fs::write(dir.join(format!("{name}.json")), body).unwrap();
        }

        let llm = Arc::new(StubLlm {
            reply: reply.map(str::to_string),
            seen: Mutex::new(Vec::new()),
        });
        let state = AppState {
            store: BriefStore::new(briefs_dir),
            context: ContextLoader::new(tmp.path()),
            llm: llm.clone(),
        };
        TestApp {
            tmp,
            llm,
            router: build_router(state),
        }
    }

    async fn send(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn brief_body(title: &str) -> Value {
        json!({
            "id": "caller-supplied",
            "title": title,
            "problem": "Support tickets pile up",
            "goals": ["Cut response time"],
            "target_users": ["Support agents"],
            "key_features": ["Auto triage"],
            "constraints": ["No new headcount"]
        })
    }

    #[tokio::test]
    async fn test_brief_crud_over_http() {
        let app = test_app(Some("unused"));

        let (status, created) = send(
            &app.router,
            Method::POST,
            "/api/briefs/",
            Some(brief_body("Triage")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap().to_string();
        assert_ne!(id, "caller-supplied");
        assert_eq!(created["title"], "Triage");

        let uri = format!("/api/briefs/{id}");
        let (status, fetched) = send(&app.router, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        let (status, updated) = send(
            &app.router,
            Method::PUT,
            &uri,
            Some(brief_body("Triage v2")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["id"], id.as_str());
        assert_eq!(updated["title"], "Triage v2");

        let (status, listed) = send(&app.router, Method::GET, "/api/briefs", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().unwrap().len(), 1);

        let (status, body) = send(&app.router, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, body) = send(&app.router, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_unknown_brief_is_404_for_put_and_delete() {
        let app = test_app(Some("unused"));

        let (status, _) = send(
            &app.router,
            Method::PUT,
            "/api/briefs/does-not-exist",
            Some(brief_body("X")),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) =
            send(&app.router, Method::DELETE, "/api/briefs/does-not-exist", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_omits_corrupt_files() {
        let app = test_app(Some("unused"));
        send(
            &app.router,
            Method::POST,
            "/api/briefs",
            Some(brief_body("Good")),
        )
        .await;
        std::fs::write(
            app.tmp.path().join("product_briefs").join("corrupt.json"),
            "{ nope",
        )
        .unwrap();

        let (status, listed) = send(&app.router, Method::GET, "/api/briefs/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_generate_returns_output() {
        let app = test_app(Some("As a support agent, I want..."));
        let (_, created) = send(
            &app.router,
            Method::POST,
            "/api/briefs",
            Some(brief_body("Triage")),
        )
        .await;
        let id = created["id"].as_str().unwrap();

        let (status, body) = send(
            &app.router,
            Method::GET,
            &format!("/generate?brief_id={id}&task=user_stories"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"output": "As a support agent, I want..."}));

        let seen = app.llm.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0][0].content, "You are a senior product manager.");
        assert!(seen[0][1]
            .content
            .starts_with("Write user stories.\n\nProduct Brief:\n{"));
    }

    #[tokio::test]
    async fn test_generate_unknown_brief_is_404_without_llm_call() {
        let app = test_app(Some("unused"));

        let (status, body) = send(
            &app.router,
            Method::GET,
            "/generate?brief_id=missing&task=user_stories",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.get("output").is_none());
        assert!(app.llm.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generate_upstream_failure_is_502() {
        let app = test_app(None);
        let (_, created) = send(
            &app.router,
            Method::POST,
            "/api/briefs",
            Some(brief_body("Triage")),
        )
        .await;
        let id = created["id"].as_str().unwrap();

        let (status, body) = send(
            &app.router,
            Method::GET,
            &format!("/generate?brief_id={id}&task=user_stories"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
    }

    #[tokio::test]
    async fn test_generate_empty_task_is_400() {
        let app = test_app(Some("unused"));
        let (status, body) =
            send(&app.router, Method::GET, "/generate?brief_id=abc&task=", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_generate_missing_params_use_error_body() {
        let app = test_app(Some("unused"));

        for uri in ["/generate?brief_id=abc", "/generate?task=user_stories", "/prompt"] {
            let (status, body) = send(&app.router, Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["error"]["code"], "VALIDATION_ERROR", "{uri}");
        }
        assert!(app.llm.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_storage_failure_is_500() {
        let app = test_app(Some("unused"));
        let briefs_dir = app.tmp.path().join("product_briefs");
        std::fs::remove_dir(&briefs_dir).unwrap();
        std::fs::write(&briefs_dir, "").unwrap();

        let (status, body) = send(
            &app.router,
            Method::DELETE,
            "/api/briefs/0b7d1f0e-4a57-4c39-9d55-0a0b0c0d0e0f",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "STORAGE_ERROR");
    }

    #[tokio::test]
    async fn test_prompt_preview_skips_llm() {
        let app = test_app(Some("unused"));
        let (_, created) = send(
            &app.router,
            Method::POST,
            "/api/briefs",
            Some(brief_body("Triage")),
        )
        .await;
        let id = created["id"].as_str().unwrap();

        let (status, body) = send(
            &app.router,
            Method::GET,
            &format!("/prompt?brief_id={id}&task=user_stories"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["role"], "system");
        assert_eq!(body[1]["role"], "user");
        assert!(app.llm.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app(Some("unused"));
        let (status, body) = send(&app.router, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}
