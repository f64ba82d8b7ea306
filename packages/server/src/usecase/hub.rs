//! リレーハブ
//!
//! すべての接続のイベント（接続、受信メッセージ、切断）を 1 本の FIFO キューに積み、
//! 単一のタスクが 1 件ずつ順番にユースケースを実行する。
//!
//! - ハンドラ同士が並行に走らないため、JOIN と DISCONNECT が入れ違いになっても
//!   ロスターは常にどちらかの前後の状態として一貫する
//! - 同じ接続から届いたメッセージは届いた順に処理される
//! - 各接続への送信は接続ごとの `UnboundedSender` に積むだけなので、
//!   遅い受信者がハブを止めることはない

use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinHandle};

use crate::domain::{ConnectionDirectory, ConnectionId, InboundMessage, PusherChannel, RoomMembership};

use super::{
    CloseConnectionUseCase, JoinRoomUseCase, OpenConnectionUseCase, RelayLiveEditUseCase,
    SyncCodeUseCase,
};

/// ハブが処理するイベント
#[derive(Debug)]
pub enum RelayCommand {
    /// トランスポートのセッションが開いた
    Open {
        connection_id: ConnectionId,
        channel: PusherChannel,
    },
    /// 検証済みのメッセージが届いた
    Inbound {
        connection_id: ConnectionId,
        message: InboundMessage,
    },
    /// セッションが終わった（正常終了・異常終了を問わない）
    Close { connection_id: ConnectionId },
}

/// ハブへイベントを送るハンドル
///
/// 送信は同期的で、キューに積むだけ。ハブがすでに止まっていればログに残して捨てる。
#[derive(Debug, Clone)]
pub struct RelayHandle {
    tx: mpsc::UnboundedSender<RelayCommand>,
}

impl RelayHandle {
    pub fn open(&self, connection_id: ConnectionId, channel: PusherChannel) {
        self.submit(RelayCommand::Open {
            connection_id,
            channel,
        });
    }

    pub fn dispatch(&self, connection_id: ConnectionId, message: InboundMessage) {
        self.submit(RelayCommand::Inbound {
            connection_id,
            message,
        });
    }

    pub fn close(&self, connection_id: ConnectionId) {
        self.submit(RelayCommand::Close { connection_id });
    }

    fn submit(&self, command: RelayCommand) {
        if let Err(e) = self.tx.send(command) {
            tracing::warn!("Relay hub is gone, dropping {:?}", e.0);
        }
    }
}

/// リレーハブ（単一タスクで全イベントを順番に処理する）
pub struct RelayHub {
    open_connection_usecase: OpenConnectionUseCase,
    join_room_usecase: JoinRoomUseCase,
    sync_code_usecase: SyncCodeUseCase,
    relay_live_edit_usecase: RelayLiveEditUseCase,
    close_connection_usecase: CloseConnectionUseCase,
}

impl RelayHub {
    pub fn new(
        directory: Arc<dyn ConnectionDirectory>,
        membership: Arc<dyn RoomMembership>,
    ) -> Self {
        Self {
            open_connection_usecase: OpenConnectionUseCase::new(membership.clone()),
            join_room_usecase: JoinRoomUseCase::new(directory.clone(), membership.clone()),
            sync_code_usecase: SyncCodeUseCase::new(membership.clone()),
            relay_live_edit_usecase: RelayLiveEditUseCase::new(
                directory.clone(),
                membership.clone(),
            ),
            close_connection_usecase: CloseConnectionUseCase::new(directory, membership),
        }
    }

    /// ハブを起動し、イベントを送るためのハンドルを返す
    ///
    /// すべてのハンドルが drop されるとハブのタスクは終了する。
    pub fn spawn(
        directory: Arc<dyn ConnectionDirectory>,
        membership: Arc<dyn RoomMembership>,
    ) -> (RelayHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let hub = Self::new(directory, membership);
        let task = tokio::spawn(hub.run(rx));
        (RelayHandle { tx }, task)
    }

    /// キューが閉じるまでイベントを 1 件ずつ処理する
    pub async fn run(self, mut rx: mpsc::UnboundedReceiver<RelayCommand>) {
        tracing::debug!("Relay hub started");
        while let Some(command) = rx.recv().await {
            self.handle(command).await;
        }
        tracing::debug!("Relay hub stopped");
    }

    async fn handle(&self, command: RelayCommand) {
        match command {
            RelayCommand::Open {
                connection_id,
                channel,
            } => {
                tracing::info!("Connection '{}' opened", connection_id);
                self.open_connection_usecase
                    .execute(connection_id, channel)
                    .await;
            }
            RelayCommand::Inbound {
                connection_id,
                message,
            } => self.handle_inbound(connection_id, message).await,
            RelayCommand::Close { connection_id } => {
                let rooms = self.close_connection_usecase.execute(connection_id).await;
                tracing::info!(
                    "Connection '{}' closed (left {} room(s))",
                    connection_id,
                    rooms.len()
                );
            }
        }
    }

    async fn handle_inbound(&self, connection_id: ConnectionId, message: InboundMessage) {
        match message {
            InboundMessage::Join {
                room_id,
                display_name,
            } => {
                self.join_room_usecase
                    .execute(connection_id, room_id, display_name)
                    .await;
            }
            InboundMessage::SyncCode { target, code } => {
                if let Err(e) = self
                    .sync_code_usecase
                    .execute(connection_id, target, code)
                    .await
                {
                    tracing::debug!("Dropped sync-code from '{}': {}", connection_id, e);
                }
            }
            InboundMessage::LiveEdit { room_id, edit } => {
                self.relay_live_edit_usecase
                    .execute(connection_id, room_id, edit)
                    .await;
            }
        }
    }
}
