pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod filesystem;
pub mod navigate;
pub mod protocol;
pub mod storage;

pub use filesystem::FileSystem;
