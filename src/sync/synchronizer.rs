//! Owned-cell snapshots for remote peers.
//!
//! A snapshot is a flat list of `{x, y, player, value}` records, one per
//! owned cell, in row-major order. Applying one is an overlay: listed cells
//! are overwritten, every other cell is left as it is.
//!
//! Payloads are validated in full before any cell is written, so a bad
//! record leaves the board untouched.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::Board;
use crate::core::{Cell, Player, PlayerCount, SyncError};

/// One owned cell on the wire. `player` is the 1-based seat number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SyncRecord {
    pub x: u8,
    pub y: u8,
    pub player: u8,
    pub value: u8,
}

impl SyncRecord {
    #[must_use]
    pub fn from_cell(cell: &Cell) -> Option<Self> {
        cell.owner().map(|owner| Self {
            x: cell.x() as u8,
            y: cell.y() as u8,
            player: owner.number(),
            value: cell.value(),
        })
    }
}

pub struct StateSynchronizer;

impl StateSynchronizer {
    /// Records for every owned cell, row-major.
    #[must_use]
    pub fn serialize(board: &Board) -> Vec<SyncRecord> {
        board.cells().filter_map(SyncRecord::from_cell).collect()
    }

    /// Overlay `records` onto `board`. Returns the number of cells written.
    pub fn deserialize(board: &mut Board, records: &[SyncRecord]) -> Result<usize, SyncError> {
        Self::validate(board, records)?;

        for record in records {
            let (x, y) = (usize::from(record.x), usize::from(record.y));
            // Validated above.
            if let Some(player) = Player::from_number(record.player) {
                board.set_cell(x, y, Cell::owned(x, y, player, record.value));
            }
        }

        debug!(cells = records.len(), "applied board snapshot");
        Ok(records.len())
    }

    /// JSON text payload.
    pub fn encode_text(board: &Board) -> Result<String, SyncError> {
        Ok(serde_json::to_string(&Self::serialize(board))?)
    }

    /// Compact bincode payload.
    pub fn encode_binary(board: &Board) -> Result<Vec<u8>, SyncError> {
        Ok(bincode::serialize(&Self::serialize(board))?)
    }

    pub fn decode_text(data: &str) -> Result<Vec<SyncRecord>, SyncError> {
        serde_json::from_str(data).map_err(|err| {
            warn!(%err, "rejected text snapshot");
            SyncError::from(err)
        })
    }

    pub fn decode_binary(data: &[u8]) -> Result<Vec<SyncRecord>, SyncError> {
        bincode::deserialize(data).map_err(|err| {
            warn!(%err, "rejected binary snapshot");
            SyncError::from(err)
        })
    }

    /// Decode and overlay a JSON text payload.
    pub fn apply_text(board: &mut Board, data: &str) -> Result<usize, SyncError> {
        let records = Self::decode_text(data)?;
        Self::deserialize(board, &records)
    }

    /// Decode and overlay a bincode payload.
    pub fn apply_binary(board: &mut Board, data: &[u8]) -> Result<usize, SyncError> {
        let records = Self::decode_binary(data)?;
        Self::deserialize(board, &records)
    }

    /// Check every record against the board without writing anything.
    pub fn validate(board: &Board, records: &[SyncRecord]) -> Result<(), SyncError> {
        let mut seen = FxHashSet::default();

        for &SyncRecord { x, y, player, value } in records {
            let result = if !board.in_bounds(usize::from(x), usize::from(y)) {
                Err(SyncError::OutOfBounds { x, y })
            } else if !board.can_play(usize::from(x), usize::from(y)) {
                Err(SyncError::Unplayable { x, y })
            } else if Player::from_number(player).is_none() {
                Err(SyncError::UnknownPlayer { x, y, player })
            } else if value == 0 {
                Err(SyncError::ZeroValue { x, y })
            } else if !seen.insert((x, y)) {
                Err(SyncError::DuplicateCell { x, y })
            } else {
                Ok(())
            };

            if let Err(err) = result {
                warn!(%err, "rejected snapshot record");
                return Err(err);
            }
        }
        Ok(())
    }

    /// Check that every record names a seat active in a `count`-player game.
    pub fn check_seats(records: &[SyncRecord], count: PlayerCount) -> Result<(), SyncError> {
        for &SyncRecord { x, y, player, .. } in records {
            match Player::from_number(player) {
                None => return Err(SyncError::UnknownPlayer { x, y, player }),
                Some(p) if !p.is_active(count) => return Err(SyncError::InactivePlayer { x, y, player: p }),
                Some(_) => {}
            }
        }
        Ok(())
    }
}
