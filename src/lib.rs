pub mod cli;
pub mod config;
pub mod error;
pub mod prompt;
pub mod render;
pub mod storage;
