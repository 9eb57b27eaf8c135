//! trading-protocol
//!
//! Text encoding/decoding for the trading desk.
//!
//! This crate turns logical desk messages
//! (`trading_core::Request` / `Response`) into lines of text and back,
//! so scripted sessions can be replayed and diffed.
//!
//! - [`command_codec`] : comma-separated command lines in, event lines out

pub mod command_codec;

pub use command_codec::{format_response, parse_command_line};
