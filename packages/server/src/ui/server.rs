//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::ServerConfig,
    usecase::{ExecuteCodeUseCase, GetRoomDetailUseCase, GetRoomsUseCase, RelayHandle},
};

use super::{
    handler::{execute_code, get_room_detail, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Tandem relay server
///
/// # Example
///
/// ```ignore
/// let (relay, _hub) = RelayHub::spawn(directory.clone(), membership.clone());
/// let server = Server::new(
///     config,
///     relay,
///     get_rooms_usecase,
///     get_room_detail_usecase,
///     execute_code_usecase,
/// );
/// server.run().await?;
/// ```
pub struct Server {
    config: ServerConfig,
    /// RelayHandle（リレーハブへのイベント送信口）
    relay: RelayHandle,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// ExecuteCodeUseCase（コード実行プロキシのユースケース）
    execute_code_usecase: Arc<ExecuteCodeUseCase>,
}

impl Server {
    pub fn new(
        config: ServerConfig,
        relay: RelayHandle,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
        get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
        execute_code_usecase: Arc<ExecuteCodeUseCase>,
    ) -> Self {
        Self {
            config,
            relay,
            get_rooms_usecase,
            get_room_detail_usecase,
            execute_code_usecase,
        }
    }

    /// Build the router with every endpoint and middleware attached
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            relay: self.relay.clone(),
            get_rooms_usecase: self.get_rooms_usecase.clone(),
            get_room_detail_usecase: self.get_room_detail_usecase.clone(),
            execute_code_usecase: self.execute_code_usecase.clone(),
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{room_id}", get(get_room_detail))
            .route("/api/execute", post(execute_code))
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&self.config.allowed_origins))
            .with_state(app_state)
    }

    /// Run the relay server until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address or
    /// if there's an error during server execution.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        // Bind the server to the host and port
        let bind_addr = self.config.bind_addr();
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Tandem relay listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// CORS policy: any origin when none is configured, otherwise the listed ones
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid allowed origin '{}'", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}
