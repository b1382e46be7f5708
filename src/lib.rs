pub mod cli;
pub mod commands;
pub mod pgs;
pub mod ring;
pub mod srt;
pub mod timing;
pub mod ui;
