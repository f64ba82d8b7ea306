//! インメモリ実装

mod directory;

pub use directory::InMemoryConnectionDirectory;
