//! Top-level router: every endpoint plus the cross-cutting tower layers.
//!
//! Layer order, outermost first: CORS, request id, tracing, request-id
//! propagation, compression, timeout, authentication gate.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::{middleware, routing::get, Router};
use http::{HeaderValue, Method, Request};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::handlers::conversation::{HandleQueryHandler, DEFAULT_ANSWER_TIMEOUT};
use crate::config::ServerConfig;
use crate::ports::{
    AnswerProvider, ConversationRepository, PasswordHasher, SessionValidator, TokenService,
    UserRepository,
};

use super::auth::{auth_routes, AuthAppState};
use super::chat::{chat_routes, ChatAppState};
use super::health::ping;
use super::middleware::{auth_middleware, AuthState};

const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(3600);

/// Everything the HTTP layer needs, already wired to concrete adapters.
#[derive(Clone)]
pub struct ApiState {
    pub auth: AuthAppState,
    pub chat: ChatAppState,
    pub validator: AuthState,
}

/// Builder for [`ApiState`] from port implementations.
pub struct ApiDependencies {
    pub users: Arc<dyn UserRepository>,
    pub conversations: Arc<dyn ConversationRepository>,
    pub answers: Arc<dyn AnswerProvider>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenService>,
    pub validator: Arc<dyn SessionValidator>,
}

impl ApiDependencies {
    pub fn into_state(self) -> ApiState {
        self.into_state_with_answer_timeout(DEFAULT_ANSWER_TIMEOUT)
    }

    pub fn into_state_with_answer_timeout(self, answer_timeout: Duration) -> ApiState {
        let query_handler = HandleQueryHandler::new(
            self.users.clone(),
            self.conversations.clone(),
            self.answers,
        )
        .with_answer_timeout(answer_timeout);

        ApiState {
            auth: AuthAppState {
                users: self.users,
                hasher: self.hasher,
                tokens: self.tokens,
            },
            chat: ChatAppState {
                conversations: self.conversations,
                query_handler: Arc::new(query_handler),
            },
            validator: self.validator,
        }
    }
}

/// Routes only, with the authentication gate but without the outer layers.
pub fn api_routes(state: ApiState) -> Router {
    Router::new()
        .route("/ping", get(ping))
        .nest("/api/auth", auth_routes().with_state(state.auth))
        .nest("/api/chat", chat_routes().with_state(state.chat))
        .layer(middleware::from_fn_with_state(state.validator, auth_middleware))
}

/// Full application router.
pub fn create_router(state: ApiState, server: &ServerConfig) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            let request_id = request
                .headers()
                .get("x-request-id")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "request",
                request_id = %request_id,
                method = %request.method(),
                uri = %request.uri().path()
            )
        })
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    api_routes(state)
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(CompressionLayer::new())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(trace_layer)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors_layer(server))
}

/// CORS for the configured browser origins, with credentials.
pub fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .allowed_origins()
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring unparsable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        // Wildcard headers are not allowed together with credentials
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .max_age(PREFLIGHT_MAX_AGE)
}
