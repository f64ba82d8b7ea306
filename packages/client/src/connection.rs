//! One WebSocket session with the relay.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use tandem_server::infrastructure::dto::websocket::{ClientMessage, ServerMessage};
use tandem_shared::time::Clock;
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{self, protocol::Message},
};

use crate::{
    command::Command, error::ClientError, execute::ExecuteClient, formatter::MessageFormatter,
    session::ParticipantState, ui::redisplay_prompt,
};

type Writer = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Everything a session needs besides the protocol state
pub struct SessionContext {
    pub url: String,
    pub prompt: String,
    pub executor: ExecuteClient,
    pub clock: Arc<dyn Clock>,
}

/// Run one session until the user quits or the connection drops
///
/// Sends JOIN right after connecting; the relay always greets with CONNECTED first,
/// so the own connection id is known before the JOINED acknowledgement arrives.
///
/// # Returns
///
/// * `Ok(())` - the user quit or closed the input
/// * `Err(ClientError)` - connecting failed or the connection was lost
pub async fn run_session(
    context: &SessionContext,
    state: &mut ParticipantState,
    input: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(context.url.as_str())
        .await
        .map_err(|e| match e {
            tungstenite::Error::Url(e) => ClientError::InvalidUrl(e.to_string()),
            other => ClientError::ConnectionError(other.to_string()),
        })?;
    tracing::info!("Connected to relay at {}", context.url);

    let (mut write, mut read) = ws_stream.split();
    state.reset_connection();
    send(&mut write, &state.join_message()).await?;

    loop {
        tokio::select! {
            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    let message = match serde_json::from_str::<ServerMessage>(text.as_str()) {
                        Ok(message) => message,
                        Err(e) => {
                            tracing::warn!("Ignoring unexpected frame: {}", e);
                            continue;
                        }
                    };
                    let reaction = state.handle(message);
                    for reply in &reaction.replies {
                        send(&mut write, reply).await?;
                    }
                    if let Some(event) = reaction.event {
                        print!(
                            "{}",
                            MessageFormatter::format_event(
                                &event,
                                state.connection_id(),
                                context.clock.as_ref()
                            )
                        );
                        redisplay_prompt(&context.prompt);
                    }
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("Relay closed the connection");
                    return Err(ClientError::ConnectionLost);
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return Err(ClientError::ConnectionLost);
                }
            },
            line = input.recv() => {
                let Some(line) = line else {
                    // readline スレッドが終了した（Ctrl+C / Ctrl+D）
                    write.close().await.ok();
                    return Ok(());
                };
                match Command::parse(&line) {
                    Ok(Command::Quit) => {
                        write.close().await.ok();
                        return Ok(());
                    }
                    Ok(command) => apply(context, state, &mut write, command).await?,
                    Err(e) => println!("{}", e),
                }
            }
        }
    }
}

async fn apply(
    context: &SessionContext,
    state: &mut ParticipantState,
    write: &mut Writer,
    command: Command,
) -> Result<(), ClientError> {
    match command {
        Command::Append(line) => send(write, &state.append_line(&line)).await?,
        Command::Set(text) => send(write, &state.replace(text)).await?,
        Command::Cursor(position) => send(write, &state.cursor(position)).await?,
        Command::Highlight { from, to } => send(write, &state.highlight(from, to)).await?,
        Command::Show => print!("{}", MessageFormatter::format_buffer(state.buffer().as_str())),
        Command::Who => print!(
            "{}",
            MessageFormatter::format_roster(state.roster(), state.connection_id())
        ),
        Command::Help => print!("{}", MessageFormatter::format_help()),
        Command::Run(compiler) => {
            // 実行結果を待つ間も中継は止めない
            let executor = context.executor.clone();
            let prompt = context.prompt.clone();
            let code = state.buffer().as_str().to_string();
            tokio::spawn(async move {
                match executor.run(code, compiler).await {
                    Ok(outcome) => print!("{}", MessageFormatter::format_outcome(&outcome)),
                    Err(e) => println!("\n{}", e),
                }
                redisplay_prompt(&prompt);
            });
        }
        Command::Quit => {}
    }
    Ok(())
}

async fn send(write: &mut Writer, message: &ClientMessage) -> Result<(), ClientError> {
    let json = serde_json::to_string(message)
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    write.send(Message::Text(json.into())).await.map_err(|e| {
        tracing::warn!("Failed to send message: {}", e);
        ClientError::ConnectionLost
    })
}
