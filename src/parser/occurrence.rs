//! Occurrence expression parser.
//!
//! An expression is one or more whitespace-separated room groups:
//!
//! ```text
//! expression := group (WS group)*
//! group      := 'R' number ':' cabinet ('&' cabinet)*
//! cabinet    := number ('(' number ')')?
//! ```
//!
//! `R5:1&2&3 R7:1(2)` means cabinets 1, 2 and 3 in room 5, and two of
//! cabinet 1 in room 7. Every number must be a positive decimal integer.

use crate::error::GrammarError;
use crate::model::Occurrence;

/// Parse an occurrence expression into one occurrence per cabinet token.
///
/// Duplicate (room, cabinet) pairs are kept as separate entries.
pub fn parse_occurrences(expr: &str) -> Result<Vec<Occurrence>, GrammarError> {
    let mut occurrences = Vec::new();
    let mut groups = expr.split_whitespace().peekable();
    if groups.peek().is_none() {
        return Err(GrammarError::Empty);
    }

    for group in groups {
        GroupParser::new(group).parse_into(&mut occurrences)?;
    }

    Ok(occurrences)
}

/// Cursor over a single room group.
struct GroupParser<'a> {
    group: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> GroupParser<'a> {
    fn new(group: &'a str) -> Self {
        Self {
            group,
            bytes: group.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// Consume a run of ASCII digits and return it.
    fn take_digits(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        &self.group[start..self.pos]
    }

    /// Text of the cabinet token starting at `start`, up to the next `&`.
    fn token_from(&self, start: usize) -> &'a str {
        let end = self.bytes[start..]
            .iter()
            .position(|&b| b == b'&')
            .map_or(self.bytes.len(), |offset| start + offset);
        &self.group[start..end]
    }

    fn parse_into(mut self, occurrences: &mut Vec<Occurrence>) -> Result<(), GrammarError> {
        let room = self.room_prefix()?;

        loop {
            let (cabinet, multiplier) = self.cabinet_token()?;
            occurrences.push(Occurrence::with_multiplier(room, cabinet, multiplier));

            // A token ends at '&' or at the end of the group.
            if self.peek().is_none() {
                return Ok(());
            }
            self.pos += 1;
        }
    }

    /// Parse `R<room>:` and return the room number.
    fn room_prefix(&mut self) -> Result<u32, GrammarError> {
        let group = self.group;
        let missing = move || GrammarError::MissingRoomPrefix {
            group: group.to_string(),
        };

        if self.peek() != Some(b'R') {
            return Err(missing());
        }
        self.pos += 1;

        let digits = self.take_digits();
        if digits.is_empty() || self.peek() != Some(b':') {
            return Err(missing());
        }
        self.pos += 1;

        match digits.parse::<u32>() {
            Ok(room) if room > 0 => Ok(room),
            _ => Err(GrammarError::InvalidRoom {
                group: group.to_string(),
            }),
        }
    }

    fn invalid_cabinet(&self, start: usize) -> GrammarError {
        GrammarError::InvalidCabinet {
            group: self.group.to_string(),
            token: self.token_from(start).to_string(),
        }
    }

    fn unbalanced(&self) -> GrammarError {
        GrammarError::UnbalancedParens {
            group: self.group.to_string(),
        }
    }

    /// Parse `<cabinet>` or `<cabinet>(<multiplier>)`.
    fn cabinet_token(&mut self) -> Result<(u32, u32), GrammarError> {
        let start = self.pos;

        let digits = self.take_digits();
        let cabinet = match digits.parse::<u32>() {
            Ok(cabinet) if cabinet > 0 => cabinet,
            _ => return Err(self.invalid_cabinet(start)),
        };

        let multiplier = match self.peek() {
            None | Some(b'&') => 1,
            Some(b'(') => {
                self.pos += 1;
                let value_start = self.pos;
                let digits = self.take_digits();
                while !matches!(self.peek(), None | Some(b')' | b'(' | b'&')) {
                    self.pos += 1;
                }
                if self.peek() != Some(b')') {
                    return Err(self.unbalanced());
                }
                let value = &self.group[value_start..self.pos];
                self.pos += 1;
                // Digits only: `parse` also accepts a leading '+'.
                match digits.parse::<u32>() {
                    Ok(multiplier) if multiplier > 0 && digits == value => multiplier,
                    _ => {
                        return Err(GrammarError::InvalidMultiplier {
                            group: self.group.to_string(),
                            value: value.to_string(),
                        })
                    }
                }
            }
            Some(b')') => return Err(self.unbalanced()),
            Some(_) => return Err(self.invalid_cabinet(start)),
        };

        match self.peek() {
            None | Some(b'&') => Ok((cabinet, multiplier)),
            Some(b'(' | b')') => Err(self.unbalanced()),
            Some(_) => Err(self.invalid_cabinet(start)),
        }
    }
}
