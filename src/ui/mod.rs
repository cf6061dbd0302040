//! UI components for Littera

pub mod blocks;
pub mod editor;
pub mod find;
pub mod preview;
pub mod status_bar;
