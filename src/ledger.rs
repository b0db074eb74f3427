//! Best-effort mirror of committed human moves to an external ledger.
//!
//! The engine never waits on a sink and never rolls a move back because a sink
//! failed; failures only show up as [`GameEvent::LedgerSyncFailed`].
//!
//! [`GameEvent::LedgerSyncFailed`]: crate::events::GameEvent::LedgerSyncFailed

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::card::Shape;
use crate::error::LedgerError;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum LedgerAction {
    Play,
    Draw,
}

/// Notification sent for every committed human play or draw.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LedgerMove {
    pub action: LedgerAction,
    /// Position of the played card in the hand before the play.
    pub card_index: Option<usize>,
    pub chosen_shape: Option<Shape>,
}

impl LedgerMove {
    pub fn play(card_index: usize, chosen_shape: Option<Shape>) -> Self {
        Self {
            action: LedgerAction::Play,
            card_index: Some(card_index),
            chosen_shape,
        }
    }

    pub fn draw() -> Self {
        Self {
            action: LedgerAction::Draw,
            card_index: None,
            chosen_shape: None,
        }
    }
}

/// Destination for mirrored moves.
pub trait LedgerSink {
    fn submit(&mut self, entry: &LedgerMove) -> Result<(), LedgerError>;
}

/// Keeps mirrored moves in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingLedger {
    entries: Vec<LedgerMove>,
}

impl RecordingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[LedgerMove] {
        &self.entries
    }
}

impl LedgerSink for RecordingLedger {
    fn submit(&mut self, entry: &LedgerMove) -> Result<(), LedgerError> {
        self.entries.push(*entry);
        Ok(())
    }
}

/// Writes each move as a length-prefixed bincode frame.
pub struct BincodeLedger<W: Write> {
    writer: W,
    frames: usize,
}

impl<W: Write> BincodeLedger<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, frames: 0 }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LedgerSink for BincodeLedger<W> {
    fn submit(&mut self, entry: &LedgerMove) -> Result<(), LedgerError> {
        let bytes = bincode::serde::encode_to_vec(entry, bincode::config::standard())?;
        let len = u32::try_from(bytes.len())
            .map_err(|_| LedgerError::Rejected(String::from("frame too large")))?;
        self.writer.write_all(&len.to_le_bytes())?;
        self.writer.write_all(&bytes)?;
        self.writer.flush()?;
        self.frames += 1;
        Ok(())
    }
}

/// Reads back frames written by [`BincodeLedger`].
pub fn decode_frames(mut bytes: &[u8]) -> Result<Vec<LedgerMove>, LedgerError> {
    let mut moves = Vec::new();
    let mut offset = 0;
    while !bytes.is_empty() {
        let Some((prefix, rest)) = bytes.split_first_chunk::<4>() else {
            return Err(LedgerError::Truncated(offset));
        };
        let len = u32::from_le_bytes(*prefix) as usize;
        if rest.len() < len {
            return Err(LedgerError::Truncated(offset));
        }
        let (frame, tail) = rest.split_at(len);
        let (entry, _) = bincode::serde::decode_from_slice(frame, bincode::config::standard())?;
        moves.push(entry);
        offset += 4 + len;
        bytes = tail;
    }
    Ok(moves)
}
