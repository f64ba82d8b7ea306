//! Tandem relay server.
//!
//! Routes presence and buffer-synchronization messages between the participants of
//! each room, and proxies code execution to a Wandbox-compatible service.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tandem-server
//! cargo run --bin tandem-server -- --host 0.0.0.0 --port 5000 --allowed-origin http://localhost:3000
//! ```

use std::sync::Arc;

use clap::Parser;
use tandem_server::{
    config::{DEFAULT_COMPILER, DEFAULT_EXECUTOR_URL, ServerConfig},
    infrastructure::{
        executor::WandboxExecutor, membership::WebSocketRoomMembership,
        repository::InMemoryConnectionDirectory,
    },
    ui::Server,
    usecase::{ExecuteCodeUseCase, GetRoomDetailUseCase, GetRoomsUseCase, RelayHub},
};
use tandem_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "tandem-server")]
#[command(about = "Presence and synchronization relay for collaborative editing", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "5000")]
    port: u16,

    /// Origin allowed to call the server (repeatable; any origin when omitted)
    #[arg(long = "allowed-origin", env = "ALLOWED_ORIGIN", value_delimiter = ',')]
    allowed_origins: Vec<String>,

    /// Wandbox-compatible compile endpoint
    #[arg(long, env = "EXECUTOR_URL", default_value = DEFAULT_EXECUTOR_URL)]
    executor_url: String,

    /// Compiler used when an execute request names none
    #[arg(long, default_value = DEFAULT_COMPILER)]
    default_compiler: String,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, default_value = "debug")]
    log_level: String,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            allowed_origins: args.allowed_origins,
            executor_url: args.executor_url,
            default_compiler: args.default_compiler,
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let config = ServerConfig::from(args);

    // Initialize dependencies in order:
    // 1. Directory
    // 2. Membership
    // 3. Relay hub
    // 4. Query / execution UseCases
    // 5. Server

    // 1. Create Directory (in-memory)
    let directory = Arc::new(InMemoryConnectionDirectory::new());

    // 2. Create Membership (WebSocket implementation)
    let membership = Arc::new(WebSocketRoomMembership::new());

    // 3. Start the relay hub
    let (relay, _hub) = RelayHub::spawn(directory.clone(), membership.clone());

    // 4. Create UseCases
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(
        directory.clone(),
        membership.clone(),
    ));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(directory, membership));
    let executor = Arc::new(WandboxExecutor::new(config.executor_url.clone()));
    let execute_code_usecase = Arc::new(ExecuteCodeUseCase::new(
        executor,
        config.default_compiler.clone(),
    ));

    // 5. Create and run the server
    let server = Server::new(
        config,
        relay,
        get_rooms_usecase,
        get_room_detail_usecase,
        execute_code_usecase,
    );
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
