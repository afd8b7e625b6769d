//! Occurrence - one (room, cabinet) demand for a part.

use serde::Serialize;
use std::fmt;

/// One unit of demand for a part: a cabinet in a room, repeated `multiplier` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Occurrence {
    /// Room number from the cabinet design.
    pub room: u32,
    /// Cabinet number within the room.
    pub cabinet: u32,
    /// Repeat count for this (room, cabinet) pair.
    pub multiplier: u32,
}

impl Occurrence {
    /// Create an occurrence with a multiplier of 1.
    pub fn new(room: u32, cabinet: u32) -> Self {
        Self {
            room,
            cabinet,
            multiplier: 1,
        }
    }

    /// Create an occurrence with an explicit multiplier.
    pub fn with_multiplier(room: u32, cabinet: u32, multiplier: u32) -> Self {
        Self {
            room,
            cabinet,
            multiplier,
        }
    }

    /// Identity of this occurrence, ignoring the multiplier.
    pub fn location(&self) -> (u32, u32) {
        (self.room, self.cabinet)
    }

    /// Check that room, cabinet and multiplier are all positive.
    pub fn is_valid(&self) -> bool {
        self.room >= 1 && self.cabinet >= 1 && self.multiplier >= 1
    }
}

/// Sum of multipliers. Widened to `u64` so no list of `u32` multipliers can overflow it.
pub fn counted_quantity(occurrences: &[Occurrence]) -> u64 {
    occurrences.iter().map(|o| u64::from(o.multiplier)).sum()
}

/// Renders an occurrence list back into expression form, e.g. `R5:1&2 R7:1(2)`.
///
/// Consecutive occurrences in the same room share one room group.
pub struct Occurrences<'a>(pub &'a [Occurrence]);

impl fmt::Display for Occurrences<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut current_room = None;
        for occurrence in self.0 {
            if current_room == Some(occurrence.room) {
                write!(f, "&")?;
            } else {
                if current_room.is_some() {
                    write!(f, " ")?;
                }
                write!(f, "R{}:", occurrence.room)?;
                current_room = Some(occurrence.room);
            }
            write!(f, "{}", occurrence.cabinet)?;
            if occurrence.multiplier != 1 {
                write!(f, "({})", occurrence.multiplier)?;
            }
        }
        Ok(())
    }
}
