use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{Method, Request, StatusCode, Uri, header, request::Parts},
};
use comments_api::{
    AppState,
    auth::{AuthUser, Claims},
    config::Env,
    models::{Comment, User},
    repository::{Repository, RepositoryError},
};
use jsonwebtoken::{EncodingKey, Header, encode};
use std::{sync::Arc, time::SystemTime};
use uuid::Uuid;

// --- Mock Repository for Auth Logic ---

#[derive(Default)]
struct MockAuthRepo {
    user_to_return: Option<User>,
}

#[async_trait]
impl Repository for MockAuthRepo {
    async fn get_user(&self, _id: Uuid) -> Option<User> {
        self.user_to_return.clone()
    }
    // Placeholder implementations for the comment operations; the extractor never calls them.
    async fn list_comments(&self) -> Result<Vec<Comment>, RepositoryError> {
        Ok(vec![])
    }
    async fn get_comment(&self, _id: i64) -> Result<Option<Comment>, RepositoryError> {
        Ok(None)
    }
    async fn create_comment(&self, _text: String) -> Result<Comment, RepositoryError> {
        Ok(Comment::default())
    }
    async fn update_comment(&self, _id: i64, _text: String) -> Result<bool, RepositoryError> {
        Ok(false)
    }
    async fn delete_comment(&self, _id: i64) -> Result<bool, RepositoryError> {
        Ok(false)
    }
}

// --- Helper Functions ---

const TEST_JWT_SECRET: &str = "test-secret-value-1234567890";
const TEST_USER_ID: Uuid = Uuid::from_u128(1);

fn create_token(user_id: Uuid, secret: &str, exp_offset: i64) -> String {
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;

    let claims = Claims {
        sub: user_id,
        iat: now as usize,
        // Token expires exp_offset seconds from now (negative offset = already expired).
        exp: (now + exp_offset) as usize,
    };

    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), &claims, &key).unwrap()
}

fn create_app_state(env: Env, repo: MockAuthRepo, jwt_secret: String) -> AppState {
    let mut config = comments_api::config::AppConfig::default();
    config.env = env;
    config.jwt_secret = jwt_secret;

    AppState {
        repo: Arc::new(repo),
        config,
    }
}

/// Helper to get the mutable Parts struct from a generated Request
fn get_request_parts(method: Method, uri: Uri) -> Parts {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let (parts, _) = request.into_parts();
    parts
}

fn known_user() -> User {
    User {
        id: TEST_USER_ID,
        email: "test@example.com".to_string(),
    }
}

// --- Tests ---

#[tokio::test]
async fn test_auth_success_with_valid_jwt() {
    let token = create_token(TEST_USER_ID, TEST_JWT_SECRET, 3600);

    let mock_repo = MockAuthRepo {
        user_to_return: Some(known_user()),
    };
    let app_state = create_app_state(Env::Production, mock_repo, TEST_JWT_SECRET.to_string());

    let mut parts = get_request_parts(Method::POST, "/comments".parse().unwrap());
    parts.headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );

    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert!(auth_user.is_ok());
    let user = auth_user.unwrap();
    assert_eq!(user.id, TEST_USER_ID);
    assert_eq!(user.email, "test@example.com");
}

#[tokio::test]
async fn test_auth_failure_with_missing_header() {
    let app_state = create_app_state(
        Env::Production,
        MockAuthRepo::default(),
        TEST_JWT_SECRET.to_string(),
    );

    let mut parts = get_request_parts(Method::POST, "/comments".parse().unwrap());

    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert!(auth_user.is_err());
    assert_eq!(auth_user.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_failure_without_bearer_prefix() {
    let token = create_token(TEST_USER_ID, TEST_JWT_SECRET, 3600);
    let app_state = create_app_state(
        Env::Production,
        MockAuthRepo {
            user_to_return: Some(known_user()),
        },
        TEST_JWT_SECRET.to_string(),
    );

    let mut parts = get_request_parts(Method::POST, "/comments".parse().unwrap());
    // Raw token, no "Bearer " prefix.
    parts.headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&token).unwrap(),
    );

    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert!(auth_user.is_err());
    assert_eq!(auth_user.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_failure_with_expired_jwt() {
    // Token that expired an hour ago.
    let token = create_token(TEST_USER_ID, TEST_JWT_SECRET, -3600);

    let app_state = create_app_state(
        Env::Production,
        MockAuthRepo {
            user_to_return: Some(known_user()),
        },
        TEST_JWT_SECRET.to_string(),
    );

    let mut parts = get_request_parts(Method::POST, "/comments".parse().unwrap());
    parts.headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );

    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert!(auth_user.is_err());
    assert_eq!(auth_user.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_failure_with_wrong_signature() {
    // Token signed with a different secret than the one the server validates against.
    let token = create_token(TEST_USER_ID, "some-other-secret-entirely", 3600);

    let app_state = create_app_state(
        Env::Production,
        MockAuthRepo {
            user_to_return: Some(known_user()),
        },
        TEST_JWT_SECRET.to_string(),
    );

    let mut parts = get_request_parts(Method::POST, "/comments".parse().unwrap());
    parts.headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );

    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert!(auth_user.is_err());
    assert_eq!(auth_user.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_failure_when_user_deleted() {
    // A structurally valid token whose subject no longer exists in the users table.
    let token = create_token(TEST_USER_ID, TEST_JWT_SECRET, 3600);

    let app_state = create_app_state(
        Env::Production,
        MockAuthRepo {
            user_to_return: None,
        },
        TEST_JWT_SECRET.to_string(),
    );

    let mut parts = get_request_parts(Method::POST, "/comments".parse().unwrap());
    parts.headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );

    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert!(auth_user.is_err());
    assert_eq!(auth_user.unwrap_err(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_local_bypass_success() {
    let mock_user_id = Uuid::new_v4();
    let mock_repo = MockAuthRepo {
        user_to_return: Some(User {
            id: mock_user_id,
            email: "local@dev.com".to_string(),
        }),
    };
    let app_state = create_app_state(Env::Local, mock_repo, TEST_JWT_SECRET.to_string());

    let mut parts = get_request_parts(Method::POST, "/comments".parse().unwrap());
    parts.headers.insert(
        header::HeaderName::from_static("x-user-id"),
        header::HeaderValue::from_str(&mock_user_id.to_string()).unwrap(),
    );

    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert!(auth_user.is_ok());
    let user = auth_user.unwrap();
    assert_eq!(user.id, mock_user_id);
    assert_eq!(user.email, "local@dev.com");
}

#[tokio::test]
async fn test_local_bypass_disabled_in_prod() {
    let mock_user_id = Uuid::new_v4();
    let app_state = create_app_state(
        Env::Production,
        MockAuthRepo {
            user_to_return: Some(known_user()),
        },
        TEST_JWT_SECRET.to_string(),
    );

    let mut parts = get_request_parts(Method::POST, "/comments".parse().unwrap());
    // Provide ONLY the local bypass header
    parts.headers.insert(
        header::HeaderName::from_static("x-user-id"),
        header::HeaderValue::from_str(&mock_user_id.to_string()).unwrap(),
    );

    let auth_user = AuthUser::from_request_parts(&mut parts, &app_state).await;

    assert!(auth_user.is_err());
    assert_eq!(auth_user.unwrap_err(), StatusCode::UNAUTHORIZED);
}
