//! Route configuration for user registration endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{create_user, list_users, RegistrationAppState};

/// Creates the registration router.
///
/// Routes (each also served without the trailing slash):
/// - `GET /api/users/` - List users with their preferences
/// - `POST /api/users/` - Register a user
pub fn registration_router() -> Router<RegistrationAppState> {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/", get(list_users).post(create_user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryRegistrationStore;
    use crate::ports::{
        RegistrationStore, VerificationClient, VerificationError, VerificationRequest,
        VerificationResult,
    };
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    // ───────────────────────────────────────────────────────────────
    // Mock implementations (minimal for route testing)
    // ───────────────────────────────────────────────────────────────

    struct MockVerificationClient {
        outcome: Result<Value, VerificationError>,
        calls: Mutex<usize>,
    }

    impl MockVerificationClient {
        fn accepting(body: Value) -> Self {
            Self {
                outcome: Ok(body),
                calls: Mutex::new(0),
            }
        }

        fn failing(err: VerificationError) -> Self {
            Self {
                outcome: Err(err),
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl VerificationClient for MockVerificationClient {
        async fn verify(
            &self,
            _request: &VerificationRequest,
        ) -> Result<VerificationResult, VerificationError> {
            *self.calls.lock().unwrap() += 1;
            match &self.outcome {
                Ok(body) => VerificationResult::from_body(body.clone()),
                Err(e) => Err(e.clone()),
            }
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Helpers
    // ───────────────────────────────────────────────────────────────

    fn app(store: Arc<InMemoryRegistrationStore>, verifier: Arc<MockVerificationClient>) -> Router {
        registration_router().with_state(RegistrationAppState::new(store, verifier))
    }

    fn post_users(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/users/")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn registration(preferences: Value) -> String {
        json!({
            "name": "ada",
            "email": "ada@example.com",
            "preferences": preferences,
            "affiliate": "true"
        })
        .to_string()
    }

    // ───────────────────────────────────────────────────────────────
    // Tests
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn post_returns_created_with_verification_body() {
        let store = Arc::new(InMemoryRegistrationStore::new());
        let verifier = Arc::new(MockVerificationClient::accepting(
            json!({ "preferences": ["water", "coffee"], "id": 9 }),
        ));

        let response = app(store.clone(), verifier)
            .oneshot(post_users(&registration(json!([2, 3]))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            body_json(response).await,
            json!({ "preferences": ["water", "coffee"], "id": 9 })
        );
        assert_eq!(store.user_count().await, 1);
    }

    #[tokio::test]
    async fn post_without_trailing_slash_is_routed() {
        let store = Arc::new(InMemoryRegistrationStore::new());
        let verifier = Arc::new(MockVerificationClient::accepting(json!({ "preferences": [] })));

        let request = Request::builder()
            .method("POST")
            .uri("/api/users")
            .header("content-type", "application/json")
            .body(Body::from(registration(json!([1, 2]))))
            .unwrap();
        let response = app(store, verifier).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn post_same_parity_returns_invalid_preferences_without_remote_call() {
        let store = Arc::new(InMemoryRegistrationStore::new());
        let verifier = Arc::new(MockVerificationClient::accepting(json!({ "preferences": [] })));

        let response = app(store.clone(), verifier.clone())
            .oneshot(post_users(&registration(json!([2, 4]))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": "Invalid preferences" }));
        assert_eq!(verifier.calls(), 0);
        assert_eq!(store.user_count().await, 0);
    }

    #[tokio::test]
    async fn post_duplicates_returns_duplicated_preferences() {
        let store = Arc::new(InMemoryRegistrationStore::new());
        let verifier = Arc::new(MockVerificationClient::accepting(json!({ "preferences": [] })));

        let response = app(store, verifier)
            .oneshot(post_users(&registration(json!([1, 1, 2]))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": "Duplicated preferences" }));
    }

    #[tokio::test]
    async fn post_remote_failure_returns_bad_gateway() {
        let store = Arc::new(InMemoryRegistrationStore::new());
        let verifier = Arc::new(MockVerificationClient::failing(VerificationError::Status(503)));

        let response = app(store.clone(), verifier)
            .oneshot(post_users(&registration(json!([2, 3]))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_json(response).await, json!({ "error": "Test server error" }));
        assert_eq!(store.user_count().await, 0);
    }

    #[tokio::test]
    async fn post_malformed_json_returns_bad_request_with_error_body() {
        let store = Arc::new(InMemoryRegistrationStore::new());
        let verifier = Arc::new(MockVerificationClient::accepting(json!({ "preferences": [] })));

        let response = app(store, verifier)
            .oneshot(post_users("{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn post_missing_email_returns_bad_request() {
        let store = Arc::new(InMemoryRegistrationStore::new());
        let verifier = Arc::new(MockVerificationClient::accepting(json!({ "preferences": [] })));

        let response = app(store, verifier.clone())
            .oneshot(post_users(r#"{"name":"ada","preferences":[1,2]}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "error": "Missing field: email" }));
        assert_eq!(verifier.calls(), 0);
    }

    #[tokio::test]
    async fn get_lists_stored_users() {
        let store = Arc::new(InMemoryRegistrationStore::new());
        let verifier = Arc::new(MockVerificationClient::accepting(
            json!({ "preferences": ["tea"] }),
        ));
        let router = app(store.clone(), verifier);

        router
            .clone()
            .oneshot(post_users(&registration(json!([2, 3]))))
            .await
            .unwrap();

        let response = router
            .oneshot(Request::builder().uri("/api/users/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!([{
                "name": "ada",
                "email": "ada@example.com",
                "preferences": [{"key": "tea"}],
                "affiliate": true
            }])
        );
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }
}
