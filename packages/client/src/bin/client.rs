//! Terminal participant for the Tandem relay.
//!
//! Joins a room, keeps a local copy of the shared buffer and relays edits.
//! Automatically reconnects on disconnection (a reconnect is a fresh JOIN).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tandem-client -- --room r1 --name alice
//! cargo run --bin tandem-client -- -r r1 -n bob --url ws://127.0.0.1:5000/ws
//! ```

use std::time::Duration;

use clap::Parser;
use tandem_client::{ClientConfig, run_client};
use tandem_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "tandem-client")]
#[command(about = "Terminal participant for the Tandem collaborative editing relay", long_about = None)]
struct Args {
    /// Room to join
    #[arg(short = 'r', long, value_parser = clap::builder::NonEmptyStringValueParser::new())]
    room: String,

    /// Display name shown to the other participants
    #[arg(short = 'n', long, default_value = "")]
    name: String,

    /// WebSocket endpoint of the relay
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:5000/ws")]
    url: String,

    /// HTTP base URL of the relay (used by :run)
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    api_url: String,

    /// Maximum number of consecutive reconnection attempts
    #[arg(long, default_value = "5")]
    max_reconnect_attempts: u32,

    /// Seconds to wait between reconnection attempts
    #[arg(long, default_value = "5")]
    reconnect_interval: u64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    let config = ClientConfig {
        url: args.url,
        api_url: args.api_url,
        room_id: args.room,
        display_name: args.name,
        max_reconnect_attempts: args.max_reconnect_attempts,
        reconnect_interval: Duration::from_secs(args.reconnect_interval),
    };

    if let Err(e) = run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_room_is_rejected() {
        // テスト項目: 空のルーム名は起動時に拒否される
        // given (前提条件):
        let argv = ["tandem-client", "--room", ""];

        // when (操作):
        let result = Args::try_parse_from(argv);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_room_and_defaults_are_parsed() {
        // テスト項目: ルーム名だけ指定すれば残りは既定値で起動できる
        // given (前提条件):
        let argv = ["tandem-client", "-r", "r1"];

        // when (操作):
        let args = Args::try_parse_from(argv).unwrap();

        // then (期待する結果):
        assert_eq!(args.room, "r1");
        assert_eq!(args.name, "");
        assert_eq!(args.max_reconnect_attempts, 5);
    }
}
