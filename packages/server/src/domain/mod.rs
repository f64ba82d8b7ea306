//! ドメイン層
//!
//! リレーが扱う値オブジェクト・エンティティ・メッセージと、
//! Infrastructure 層が実装するポート（trait）を定義します。

pub mod entity;
pub mod error;
pub mod executor;
pub mod membership;
pub mod message;
pub mod repository;
pub mod value_object;

pub use entity::{RoomSnapshot, Roster, RosterEntry};
pub use error::{DeliveryError, ExecutionError, ValueObjectError};
pub use executor::{CodeExecutor, ExecutionOutcome};
pub use membership::{PusherChannel, RoomMembership};
pub use message::{InboundMessage, LiveEdit, OutboundMessage};
pub use repository::ConnectionDirectory;
pub use value_object::{ConnectionId, DisplayName, OpaquePayload, RoomId};

#[cfg(test)]
pub use executor::MockCodeExecutor;
#[cfg(test)]
pub use membership::MockRoomMembership;
#[cfg(test)]
pub use repository::MockConnectionDirectory;
