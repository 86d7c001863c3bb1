//! Authentication gate and extractors for axum.
//!
//! This module provides:
//! - `auth_middleware` - Layer that rejects unauthenticated requests and injects the user into extensions
//! - `RequireAuth` - Extractor that hands the authenticated user to a handler
//!
//! # Architecture
//!
//! The middleware uses the `SessionValidator` port, so it does not care how
//! tokens are signed or where users are stored.
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedUser into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```
//!
//! Every route except [`PUBLIC_PATHS`] requires a valid token. Missing,
//! malformed, expired, and orphaned tokens all get the same 401 body.
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, routing::get, middleware};
//! use std::sync::Arc;
//!
//! let validator: Arc<dyn SessionValidator> = Arc::new(MockSessionValidator::new());
//!
//! let app = Router::new()
//!     .route("/api/protected", get(protected_handler))
//!     .layer(middleware::from_fn_with_state(validator.clone(), auth_middleware));
//!
//! async fn protected_handler(RequireAuth(user): RequireAuth) -> String {
//!     format!("Hello, {}!", user.email)
//! }
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error_response::ErrorResponse;
use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// Routes reachable without a token.
pub const PUBLIC_PATHS: [&str; 3] = ["/ping", "/api/auth/login", "/api/auth/register"];

fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Authentication gate.
///
/// 1. Lets [`PUBLIC_PATHS`] through untouched
/// 2. Extracts the Bearer token from the Authorization header
/// 3. Validates it with the `SessionValidator` port
/// 4. On success, injects `AuthenticatedUser` into request extensions
/// 5. Otherwise answers 401 (or 503 when the user store is down) without
///    running the handler
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    if is_public(request.uri().path()) {
        return next.run(request).await;
    }

    let Some(token) = bearer_token(&request) else {
        tracing::debug!(path = %request.uri().path(), "Rejected request without bearer token");
        return AuthRejection::Unauthenticated.into_response();
    };

    match validator.validate(token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(AuthError::ServiceUnavailable(msg)) => {
            tracing::error!("Auth service unavailable: {}", msg);
            AuthRejection::ServiceUnavailable.into_response()
        }
        Err(e) => {
            tracing::debug!(reason = %e, "Rejected request with unusable token");
            AuthRejection::Unauthenticated.into_response()
        }
    }
}

/// Extractor that requires authentication.
///
/// Behind `auth_middleware` the user is always present; without it the
/// extractor rejects with the generic 401.
///
/// # Example
///
/// ```ignore
/// async fn my_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AuthenticatedUser>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRejection {
    /// No usable token, whatever the reason.
    Unauthenticated,
    /// The token could not be checked against the user store.
    ServiceUnavailable,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AuthRejection::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new("Authentication required").with_message("User not authenticated"),
            ),
            AuthRejection::ServiceUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse::new("Authentication service unavailable"),
            ),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use crate::domain::foundation::UserId;
    use axum::{body::Body, middleware, routing::get, Router};
    use tower::ServiceExt;

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), "test@example.com", "Test User")
    }

    async fn whoami(RequireAuth(user): RequireAuth) -> String {
        user.email
    }

    fn app(validator: MockSessionValidator) -> Router {
        let state: AuthState = Arc::new(validator);
        Router::new()
            .route("/ping", get(|| async { "pong" }))
            .route("/api/me", get(whoami))
            .layer(middleware::from_fn_with_state(state, auth_middleware))
    }

    fn get_request(uri: &str, auth: Option<&str>) -> axum::http::Request<Body> {
        let mut builder = axum::http::Request::builder().uri(uri);
        if let Some(value) = auth {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Gate
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn valid_token_reaches_handler_with_user() {
        let app = app(MockSessionValidator::new().with_user("good", test_user()));

        let response = app
            .oneshot(get_request("/api/me", Some("Bearer good")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"test@example.com");
    }

    #[tokio::test]
    async fn missing_invalid_and_orphaned_tokens_share_one_body() {
        let expected = serde_json::json!({
            "error": "Authentication required",
            "message": "User not authenticated"
        });

        let cases = [
            (MockSessionValidator::new(), None),
            (MockSessionValidator::new(), Some("Bearer nope")),
            (MockSessionValidator::new(), Some("Basic dXNlcjpwYXNz")),
            (MockSessionValidator::new(), Some("Bearer ")),
            (
                MockSessionValidator::new().with_error(AuthError::UserNotFound),
                Some("Bearer deleted-user"),
            ),
        ];

        for (validator, header) in cases {
            let response = app(validator)
                .oneshot(get_request("/api/me", header))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{:?}", header);
            assert_eq!(body_json(response).await, expected);
        }
    }

    #[tokio::test]
    async fn backend_outage_is_503() {
        let app = app(
            MockSessionValidator::new().with_error(AuthError::service_unavailable("db down")),
        );

        let response = app
            .oneshot(get_request("/api/me", Some("Bearer anything")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn public_paths_skip_the_gate() {
        let app = app(MockSessionValidator::new());

        let response = app.oneshot(get_request("/ping", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn public_path_matching_is_exact() {
        assert!(is_public("/api/auth/login"));
        assert!(is_public("/api/auth/register"));
        assert!(!is_public("/api/auth/login/extra"));
        assert!(!is_public("/api/chat/history"));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // RequireAuth Extractor Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn require_auth_extracts_user_from_extensions() {
        use axum::extract::FromRequestParts;

        let mut request: axum::http::Request<()> =
            axum::http::Request::builder().uri("/test").body(()).unwrap();
        request.extensions_mut().insert(test_user());
        let (mut parts, _body) = request.into_parts();

        let RequireAuth(user) = RequireAuth::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(user.email, "test@example.com");
    }

    #[tokio::test]
    async fn require_auth_fails_without_user() {
        use axum::extract::FromRequestParts;

        let request: axum::http::Request<()> =
            axum::http::Request::builder().uri("/test").body(()).unwrap();
        let (mut parts, _body) = request.into_parts();

        let result = RequireAuth::from_request_parts(&mut parts, &()).await;

        assert!(matches!(result, Err(AuthRejection::Unauthenticated)));
    }

    #[test]
    fn auth_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthState>();
    }
}
