//! Newline-delimited JSON messages exchanged between peers and the relay.

use crate::board::Color;
use crate::error::WireError;
use crate::moves::types::Move;
use serde::{Deserialize, Serialize};

/// One protocol message. Serialized externally tagged, e.g. `{"colour":8}`,
/// `{"begin":true}`, `{"move":{...}}`, `{"error":"Invalid move"}`,
/// `{"disconnect":true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    /// Sent once on connect: the side this player controls.
    Colour(Color),
    /// Both seats are filled.
    Begin(bool),
    /// A validated move, relayed to both players.
    Move(Move),
    Error(String),
    /// The peer dropped.
    Disconnect(bool),
}

pub fn encode_move(mv: &Move) -> Result<String, WireError> {
    Ok(serde_json::to_string(mv)?)
}

pub fn decode_move(data: &str) -> Result<Move, WireError> {
    Ok(serde_json::from_str(data)?)
}

/// Serialize `msg` as one line, trailing newline included.
pub fn encode_line(msg: &Message) -> Result<String, WireError> {
    let mut line = serde_json::to_string(msg)?;
    line.push('\n');
    Ok(line)
}

pub fn decode_line(line: &str) -> Result<Message, WireError> {
    Ok(serde_json::from_str(line.trim())?)
}

/// Splits a byte stream into complete lines, keeping any partial tail buffered.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: String,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append received text and drain every complete, non-blank line.
    pub fn feed(&mut self, chunk: &str) -> Vec<String> {
        self.pending.push_str(chunk);
        let mut lines = Vec::new();
        while let Some(pos) = self.pending.find('\n') {
            let line: String = self.pending.drain(..=pos).collect();
            let line = line.trim();
            if !line.is_empty() {
                lines.push(line.to_string());
            }
        }
        lines
    }

    pub fn pending(&self) -> &str {
        &self.pending
    }
}
