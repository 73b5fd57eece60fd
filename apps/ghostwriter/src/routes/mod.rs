pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::drafting::handlers as drafting;
use crate::learning::handlers as learning;
use crate::library::handlers as library;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Learning & review
        .route("/api/v1/learning/status", get(learning::handle_status))
        .route(
            "/api/v1/learning/documents",
            get(learning::handle_list_documents).post(learning::handle_upload_document),
        )
        .route(
            "/api/v1/learning/documents/:id",
            get(learning::handle_get_document),
        )
        .route(
            "/api/v1/learning/documents/upload",
            post(learning::handle_upload_file),
        )
        .route(
            "/api/v1/learning/terms",
            get(learning::handle_list_preferred_terms).put(learning::handle_mark_preferred_term),
        )
        .route("/api/v1/review", post(learning::handle_review))
        .route("/api/v1/review/upload", post(learning::handle_review_file))
        // Drafting
        .route("/api/v1/drafts", post(drafting::handle_generate_draft))
        .route(
            "/api/v1/drafts/upload",
            post(drafting::handle_generate_draft_from_file),
        )
        .route(
            "/api/v1/style-guide",
            get(drafting::handle_get_style_guide).put(drafting::handle_put_style_guide),
        )
        .route(
            "/api/v1/style-guide/upload",
            post(drafting::handle_upload_style_guide),
        )
        // Document library
        .route(
            "/api/v1/library",
            get(library::handle_list).post(library::handle_save),
        )
        .route(
            "/api/v1/library/:id",
            get(library::handle_get).delete(library::handle_delete),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::{Arc, RwLock};

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::drafting::generator::DraftWriter;
    use crate::drafting::style_guide::StyleGuideStore;
    use crate::errors::AppError;
    use crate::learning::{ReviewSettings, TriggerPolicy, Workspace};
    use crate::library::LibraryStore;

    struct CannedWriter;

    #[async_trait]
    impl DraftWriter for CannedWriter {
        async fn write(&self, _system: &str, _user: &str) -> Result<String, AppError> {
            Ok("The unit was installed. Plug it in.".to_string())
        }

        fn backend(&self) -> String {
            "canned".to_string()
        }
    }

    async fn test_app(dir: &Path, drafter: Option<Arc<dyn DraftWriter>>) -> Router {
        let trigger = TriggerPolicy {
            min_final_documents: 2,
            ..TriggerPolicy::default()
        };
        let config = Config {
            openai_api_key: None,
            openai_model: "test-model".to_string(),
            docs_dir: dir.join("docs"),
            style_guide_path: dir.join("style_guide.txt"),
            trigger,
            review: ReviewSettings::default(),
            port: 0,
            rust_log: "info".to_string(),
        };
        let style_guide = StyleGuideStore::open(&config.style_guide_path)
            .await
            .unwrap();
        let state = AppState {
            workspace: Arc::new(RwLock::new(Workspace::new(config.trigger, config.review))),
            style_guide: Arc::new(tokio::sync::RwLock::new(style_guide)),
            library: LibraryStore::new(&config.docs_dir),
            drafter,
            config,
        };
        build_router(state)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn multipart_request(uri: &str, filename: &str, contents: &str, fields: &[(&str, &str)]) -> Request<Body> {
        let boundary = "ghostwriter-test-boundary";
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n{contents}\r\n--{boundary}--\r\n"
        ));
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn upload_final(app: &Router, content: &str, filename: &str) -> Value {
        let (status, body) = send(
            app,
            json_request(
                "POST",
                "/api/v1/learning/documents",
                json!({"content": content, "filename": filename, "status": "final"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body
    }

    #[tokio::test]
    async fn test_health_reports_capabilities() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path(), None).await;
        let (status, body) = send(&app, get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["drafting_enabled"], false);
        assert_eq!(body["model_ready"], false);
    }

    #[tokio::test]
    async fn test_review_before_model_returns_three_empty_lists() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path(), None).await;
        let (status, body) = send(
            &app,
            json_request("POST", "/api/v1/review", json!({"content": "The lid was opened."})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"tone": [], "structure": [], "terminology": []}));
    }

    #[tokio::test]
    async fn test_learning_then_review_flow() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path(), None).await;

        let first = upload_final(&app, "Press the power button.\nWait for the light.", "a.md").await;
        assert_eq!(first["model_ready"], false);
        assert_eq!(first["chunk_count"], 2);
        let second = upload_final(&app, "Press the power button again.", "b.md").await;
        assert_eq!(second["model_rebuilt"], true);
        assert_eq!(second["model_ready"], true);

        let (status, _) = send(
            &app,
            json_request(
                "PUT",
                "/api/v1/learning/terms",
                json!({"variant": "Colour", "preferred": "Color"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, terms) = send(&app, get_request("/api/v1/learning/terms")).await;
        assert_eq!(terms, json!({"colour": "color"}));

        let (status, feedback) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/review",
                json!({"content": "The button was pressed. Check the colour."}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(feedback["tone"], json!(["Passive voice: The button was pressed."]));
        assert_eq!(
            feedback["terminology"],
            json!(["Use 'color' instead of 'colour'"])
        );

        let (_, status_body) = send(&app, get_request("/api/v1/learning/status")).await;
        assert_eq!(status_body["total_documents"], 2);
        assert_eq!(status_body["final_documents"], 2);
        assert_eq!(status_body["model"]["source_documents"], 2);

        let (_, docs) = send(&app, get_request("/api/v1/learning/documents")).await;
        let names: Vec<_> = docs
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["filename"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.md", "b.md"]);

        let id = docs[0]["id"].as_str().unwrap();
        let (status, doc) = send(&app, get_request(&format!("/api/v1/learning/documents/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(doc["content"], "Press the power button.\nWait for the light.");
        assert_eq!(doc["chunks"], json!(["Press the power button.", "Wait for the light."]));
    }

    #[tokio::test]
    async fn test_upload_validation_errors() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path(), None).await;

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/learning/documents",
                json!({"content": "text", "filename": "  "}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/learning/documents",
                json!({"content": "text", "filename": "a.txt", "status": "published"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_multipart_upload_and_review() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path(), None).await;

        let (status, body) = send(
            &app,
            multipart_request(
                "/api/v1/learning/documents/upload",
                "guide.txt",
                "Open the lid.\nPour water in.",
                &[("status", "final")],
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["word_count"], 6);

        let (_, status_body) = send(&app, get_request("/api/v1/learning/status")).await;
        assert_eq!(status_body["final_documents"], 1);

        let (status, body) = send(
            &app,
            multipart_request("/api/v1/review/upload", "draft.md", "Anything.", &[]),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["structure"], json!([]));
    }

    #[tokio::test]
    async fn test_multipart_rejects_unsupported_file() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path(), None).await;
        let (status, body) = send(
            &app,
            multipart_request("/api/v1/learning/documents/upload", "manual.rtf", "binary", &[]),
        )
        .await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["error"]["code"], "UNSUPPORTED_FILE");
    }

    #[tokio::test]
    async fn test_drafts_require_configured_writer() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path(), None).await;
        let (status, body) = send(
            &app,
            json_request("POST", "/api/v1/drafts", json!({"product_info": "Kettle"})),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "NOT_CONFIGURED");
    }

    #[tokio::test]
    async fn test_draft_with_review_uses_style_model() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path(), Some(Arc::new(CannedWriter))).await;

        // No model yet: feedback is omitted.
        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/drafts",
                json!({"product_info": "Kettle", "doc_type": "faq", "review": true}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["doc_type"], "faq");
        assert_eq!(body["backend"], "canned");
        assert!(body["feedback"].is_null());

        upload_final(&app, "Plug it in. Turn it on.", "a.txt").await;
        upload_final(&app, "Plug it in.", "b.txt").await;

        let (_, body) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/drafts",
                json!({"product_info": "Kettle", "review": true}),
            ),
        )
        .await;
        assert_eq!(
            body["feedback"]["tone"],
            json!(["Passive voice: The unit was installed."])
        );
    }

    #[tokio::test]
    async fn test_style_guide_replace_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path(), None).await;

        let (_, body) = send(&app, get_request("/api/v1/style-guide")).await;
        assert!(body["style_guide"].is_null());

        let (status, body) = send(
            &app,
            json_request("PUT", "/api/v1/style-guide", json!({"text": "Use active voice."})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["persisted"], true);

        let (_, body) = send(&app, get_request("/api/v1/style-guide")).await;
        assert_eq!(body["style_guide"]["text"], "Use active voice.");

        let (status, _) = send(
            &app,
            json_request("PUT", "/api/v1/style-guide", json!({"text": "  "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_library_save_list_get_delete() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path(), None).await;
        let content = "# Safety Sheet\n\n- Keep away from water.\n- Unplug before cleaning.\n";

        let (status, saved) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/library",
                json!({"name": "Kettle safety", "doc_type": "safety_sheet", "content": content}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(saved["type"], "Safety Sheet");
        let id = saved["id"].as_str().unwrap().to_string();

        let (_, listed) = send(&app, get_request("/api/v1/library")).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);

        let (status, fetched) = send(&app, get_request(&format!("/api/v1/library/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["name"], "Kettle safety");

        let delete = Request::builder()
            .method("DELETE")
            .uri(format!("/api/v1/library/{id}"))
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, delete).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, get_request(&format!("/api/v1/library/{id}"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_library_rejects_empty_content() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path(), None).await;
        let (status, _) = send(
            &app,
            json_request("POST", "/api/v1/library", json!({"content": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
