//! Core functionality: document state, find, preview, persistence and configuration

pub mod blocks;
pub mod builtin;
pub mod config;
pub mod document;
pub mod error;
pub mod find;
pub mod pdf;
pub mod persistence;
pub mod preview;
pub mod workspace;
