//! Client execution logic with reconnection support.

use std::{sync::Arc, time::Duration};

use rustyline::{DefaultEditor, error::ReadlineError};
use tandem_shared::time::{Clock, SystemClock, timestamp_to_rfc3339};
use tokio::sync::mpsc;

use super::{
    connection::{SessionContext, run_session},
    domain::ReconnectPolicy,
    error::ClientError,
    execute::ExecuteClient,
    session::ParticipantState,
};

/// Client settings collected from the command line
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// WebSocket endpoint, e.g. `ws://127.0.0.1:5000/ws`
    pub url: String,
    /// HTTP base of the relay, e.g. `http://127.0.0.1:5000`
    pub api_url: String,
    pub room_id: String,
    pub display_name: String,
    pub max_reconnect_attempts: u32,
    pub reconnect_interval: Duration,
}

/// Run the client with reconnection logic
///
/// Every reconnect is a fresh connection and a fresh JOIN. The local buffer
/// survives and is replaced by whatever the peers push after the JOIN.
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    let prompt = format!("{}@{}> ", config.display_name, config.room_id);
    let mut input = spawn_readline(prompt.clone());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let context = SessionContext {
        url: config.url.clone(),
        prompt,
        executor: ExecuteClient::new(&config.api_url),
        clock: clock.clone(),
    };
    let mut state = ParticipantState::new(config.room_id.clone(), config.display_name.clone());

    println!(
        "\nYou are '{}' in room '{}'. Type lines to append, :help for commands, :quit to exit.\n",
        config.display_name, config.room_id
    );

    let mut policy = ReconnectPolicy::new(config.max_reconnect_attempts);
    loop {
        tracing::info!(
            "Attempting to connect to {} at {} (attempt {}/{})",
            config.url,
            timestamp_to_rfc3339(clock.now_millis()),
            policy.consecutive_failures() + 1,
            policy.max_attempts()
        );

        let error = match run_session(&context, &mut state, &mut input).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) => e,
        };

        tracing::warn!("Session failed: {}", error);
        if !policy.record_failure(&error) {
            tracing::error!(
                "Giving up after {} consecutive failure(s). Exiting.",
                policy.consecutive_failures()
            );
            return Err(error);
        }

        tracing::info!(
            "Reconnecting in {} seconds... (attempt {}/{})",
            config.reconnect_interval.as_secs(),
            policy.consecutive_failures() + 1,
            policy.max_attempts()
        );
        tokio::time::sleep(config.reconnect_interval).await;
    }
}

/// Read lines on a blocking thread and forward them to the async side
///
/// The thread lives for the whole client, so reconnects keep the same prompt.
fn spawn_readline(prompt: String) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim_end();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}
