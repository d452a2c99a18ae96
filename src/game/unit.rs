//! Units and their kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geo::{CoastId, NationId, TerritoryId};

/// The kind of a military unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    Army,
    Fleet,
}

impl UnitKind {
    /// The single-letter abbreviation used in order notation.
    pub const fn letter(self) -> char {
        match self {
            UnitKind::Army => 'A',
            UnitKind::Fleet => 'F',
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnitKind::Army => "army",
            UnitKind::Fleet => "fleet",
        })
    }
}

/// A unit on the board.
///
/// Invariants, maintained by the constructors in this crate: armies never
/// occupy sea territory, fleets never occupy inland territory, and `coast`
/// is present exactly when the unit is a fleet on a multi-coast territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub territory: TerritoryId,
    pub coast: Option<CoastId>,
    pub kind: UnitKind,
    pub nation: NationId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_kind_letters() {
        assert_eq!(UnitKind::Army.letter(), 'A');
        assert_eq!(UnitKind::Fleet.letter(), 'F');
    }
}
