//! 市民通報マップ CLI ライブラリ

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
