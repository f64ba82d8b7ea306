//! コード実行プロキシの実装
//!
//! - `wandbox`: Wandbox 互換の compile API へ転送する実装

pub mod wandbox;

pub use wandbox::WandboxExecutor;
