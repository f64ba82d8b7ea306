//! Infrastructure 層
//!
//! ドメイン層が定義するポートの具体的な実装と、ワイヤ表現（DTO）を提供します。

pub mod dto;
pub mod executor;
pub mod membership;
pub mod repository;
