//! Territories, terrain, and travel legality.
//!
//! A territory is an arena entry owned by a [`Map`](crate::geo::Map); code
//! refers to it through its [`TerritoryId`] handle. Terrain is a closed
//! union: inland territories know their land neighbours, sea territories
//! their shores and adjacent seas, and coastal territories carry named
//! coasts with coast-qualified edges for fleet travel.
//!
//! All adjacency is directional. A well-formed map declares both directions
//! of every border; nothing here mirrors an edge implicitly.

use serde::{Deserialize, Serialize};

use crate::game::UnitKind;
use crate::geo::map::NationId;

/// Handle to a territory in a map's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TerritoryId(pub(crate) u16);

impl TerritoryId {
    /// Returns the arena index of this territory.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle to a named coast, meaningful only for the territory it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoastId(pub(crate) u8);

impl CoastId {
    /// Returns the index of this coast in its territory's coast list.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A coast-to-coast fleet edge between two coastal territories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoastalEdge {
    pub from_coast: CoastId,
    pub to: TerritoryId,
    pub to_coast: CoastId,
}

/// A coast-to-sea fleet edge from a coastal territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeaEdge {
    pub from_coast: CoastId,
    pub to: TerritoryId,
}

/// A sea-to-coast fleet edge from a sea territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShoreEdge {
    pub to: TerritoryId,
    pub to_coast: CoastId,
}

/// Terrain classification with its terrain-specific adjacency data.
#[derive(Debug, Clone)]
pub enum Terrain {
    /// Landlocked; armies only.
    Inland { land: Vec<TerritoryId> },
    /// Bordered by at least one sea; carries named coasts for fleet travel.
    Coastal {
        /// Coast names; a territory with exactly one coast names it `"main"`.
        coasts: Vec<Box<str>>,
        /// Army edges to inland and coastal neighbours, coast-agnostic.
        land: Vec<TerritoryId>,
        /// Fleet edges to coastal neighbours.
        coastal: Vec<CoastalEdge>,
        /// Fleet edges to sea neighbours.
        sea: Vec<SeaEdge>,
    },
    /// Open water; fleets only.
    Sea {
        /// Fleet edges onto coastal territories.
        shores: Vec<ShoreEdge>,
        /// Fleet edges to adjacent seas.
        seas: Vec<TerritoryId>,
    },
}

/// Whether a unit may travel directly between two territories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Travel {
    /// The move is legal as stated.
    CanTravel,
    /// The move is legal but more than one destination coast fits;
    /// the order must name one.
    CoastNeeded,
    /// No edge permits the move.
    CannotTravel,
}

/// Home-center data: who builds here and what stands here at game start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Home {
    pub nation: NationId,
    pub start_unit: UnitKind,
    pub start_coast: Option<CoastId>,
}

/// Supply-center data attached to a territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Center {
    /// Present when this center is some nation's home center.
    pub home: Option<Home>,
}

/// A territory on the map: identity, terrain, and supply-center status.
#[derive(Debug, Clone)]
pub struct Territory {
    pub(crate) name: Box<str>,
    pub(crate) abbreviations: Vec<Box<str>>,
    pub(crate) terrain: Terrain,
    pub(crate) center: Option<Center>,
}

impl Territory {
    /// The canonical display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The designated primary abbreviation.
    pub fn primary_abbreviation(&self) -> &str {
        &self.abbreviations[0]
    }

    /// Every abbreviation, primary first.
    pub fn abbreviations(&self) -> impl Iterator<Item = &str> {
        self.abbreviations.iter().map(|a| a.as_ref())
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn is_inland(&self) -> bool {
        matches!(self.terrain, Terrain::Inland { .. })
    }

    pub fn is_coastal(&self) -> bool {
        matches!(self.terrain, Terrain::Coastal { .. })
    }

    pub fn is_sea(&self) -> bool {
        matches!(self.terrain, Terrain::Sea { .. })
    }

    pub fn is_supply_center(&self) -> bool {
        self.center.is_some()
    }

    /// Home-center data, if this is some nation's home center.
    pub fn home(&self) -> Option<Home> {
        self.center.and_then(|c| c.home)
    }

    /// The territory's coast names; empty for non-coastal terrain.
    pub fn coasts(&self) -> &[Box<str>] {
        match &self.terrain {
            Terrain::Coastal { coasts, .. } => coasts,
            _ => &[],
        }
    }

    /// True when fleets here must be pinned to one of several coasts.
    pub fn has_multiple_coasts(&self) -> bool {
        self.coasts().len() > 1
    }

    /// The display name of a coast of this territory.
    pub fn coast_name(&self, coast: CoastId) -> &str {
        &self.coasts()[coast.index()]
    }

    /// Looks up a coast by its exact name, case-insensitively.
    pub fn coast_named(&self, name: &str) -> Option<CoastId> {
        self.coasts()
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
            .map(|i| CoastId(i as u8))
    }

    /// Resolves user input naming a coast of this territory.
    ///
    /// Tries a case-insensitive prefix match first ("s" finds "south"),
    /// then retries with a trailing "coast" or "c" stripped, so "south
    /// coast" and "sc" both resolve. The implicit `"main"` coast of a
    /// single-coast territory is never resolvable from user input.
    pub fn parse_coast(&self, input: &str) -> Option<CoastId> {
        let coasts = self.coasts();
        if coasts.len() <= 1 {
            return None;
        }

        if let Some(coast) = self.parse_coast_exact(input) {
            return Some(coast);
        }

        let lower = input.to_ascii_lowercase();
        if let Some(stripped) = lower.strip_suffix("coast") {
            return self.parse_coast_exact(stripped.trim_end());
        }
        if let Some(stripped) = lower.strip_suffix('c') {
            return self.parse_coast_exact(stripped.trim_end());
        }
        None
    }

    fn parse_coast_exact(&self, input: &str) -> Option<CoastId> {
        if input.is_empty() {
            return None;
        }
        self.coasts()
            .iter()
            .position(|coast| {
                coast.len() >= input.len()
                    && coast[..input.len()].eq_ignore_ascii_case(input)
            })
            .map(|i| CoastId(i as u8))
    }

    /// Whether a unit of the given kind may travel directly to `dest`.
    ///
    /// `start_coast` is the coast the moving fleet occupies. For a fleet on
    /// a multi-coast territory it must be supplied: the caller (the
    /// adjudicator) always knows the acting unit's coast, so a missing value
    /// is a caller bug and panics rather than reporting a user error. On a
    /// single-coast territory it may be omitted and defaults to `"main"`.
    ///
    /// `dest_coast` is the coast named by the order, if any. When the
    /// destination has several reachable coasts and none was named, the
    /// result is [`Travel::CoastNeeded`] and the order needs disambiguation.
    pub fn can_travel_to(
        &self,
        dest: TerritoryId,
        kind: UnitKind,
        start_coast: Option<CoastId>,
        dest_coast: Option<CoastId>,
    ) -> Travel {
        match (&self.terrain, kind) {
            (Terrain::Inland { land }, UnitKind::Army) => contains(land, dest),
            (Terrain::Inland { .. }, UnitKind::Fleet) => Travel::CannotTravel,

            (Terrain::Coastal { land, .. }, UnitKind::Army) => contains(land, dest),
            (Terrain::Coastal { coastal, sea, .. }, UnitKind::Fleet) => {
                let start = self.required_start_coast(start_coast);
                if sea.iter().any(|e| e.from_coast == start && e.to == dest) {
                    return Travel::CanTravel;
                }
                let candidates = coastal
                    .iter()
                    .filter(|e| e.from_coast == start && e.to == dest);
                match_arrivals(candidates.map(|e| e.to_coast), dest_coast)
            }

            (Terrain::Sea { .. }, UnitKind::Army) => Travel::CannotTravel,
            (Terrain::Sea { shores, seas }, UnitKind::Fleet) => {
                if seas.contains(&dest) {
                    return Travel::CanTravel;
                }
                let candidates = shores.iter().filter(|e| e.to == dest);
                match_arrivals(candidates.map(|e| e.to_coast), dest_coast)
            }
        }
    }

    /// The coast a fleet lands on after a legal move to `dest`.
    ///
    /// Returns `None` for army moves and for destinations reached without a
    /// coast-qualified edge (sea destinations). Callers should discard the
    /// coast when the destination has only its implicit `"main"` coast.
    pub fn arrival_coast(
        &self,
        dest: TerritoryId,
        kind: UnitKind,
        start_coast: Option<CoastId>,
        dest_coast: Option<CoastId>,
    ) -> Option<CoastId> {
        if kind == UnitKind::Army {
            return None;
        }
        match &self.terrain {
            Terrain::Coastal { coastal, .. } => {
                let start = self.required_start_coast(start_coast);
                pick_arrival(
                    coastal
                        .iter()
                        .filter(|e| e.from_coast == start && e.to == dest)
                        .map(|e| e.to_coast),
                    dest_coast,
                )
            }
            Terrain::Sea { shores, .. } => pick_arrival(
                shores.iter().filter(|e| e.to == dest).map(|e| e.to_coast),
                dest_coast,
            ),
            _ => None,
        }
    }

    /// True when any edge of this sea territory touches the given coastal
    /// territory. Used by convoy-path search.
    pub fn shore_touches(&self, coastal: TerritoryId) -> bool {
        match &self.terrain {
            Terrain::Sea { shores, .. } => shores.iter().any(|e| e.to == coastal),
            _ => false,
        }
    }

    /// True when this sea territory declares an edge to the given sea.
    pub fn sea_adjacent(&self, sea: TerritoryId) -> bool {
        match &self.terrain {
            Terrain::Sea { seas, .. } => seas.contains(&sea),
            _ => false,
        }
    }

    fn required_start_coast(&self, start_coast: Option<CoastId>) -> CoastId {
        match start_coast {
            Some(coast) => coast,
            None if self.coasts().len() == 1 => CoastId(0),
            None => panic!(
                "start coast required for fleet travel from {}",
                self.name
            ),
        }
    }
}

fn contains(edges: &[TerritoryId], dest: TerritoryId) -> Travel {
    if edges.contains(&dest) {
        Travel::CanTravel
    } else {
        Travel::CannotTravel
    }
}

/// Resolves a set of candidate arrival coasts against an optionally named
/// destination coast.
fn match_arrivals(
    candidates: impl Iterator<Item = CoastId>,
    dest_coast: Option<CoastId>,
) -> Travel {
    let candidates: Vec<CoastId> = candidates.collect();
    match (candidates.len(), dest_coast) {
        (0, _) => Travel::CannotTravel,
        (1, None) => Travel::CanTravel,
        (_, None) => Travel::CoastNeeded,
        (_, Some(named)) => {
            if candidates.contains(&named) {
                Travel::CanTravel
            } else {
                Travel::CannotTravel
            }
        }
    }
}

fn pick_arrival(
    candidates: impl Iterator<Item = CoastId>,
    dest_coast: Option<CoastId>,
) -> Option<CoastId> {
    let candidates: Vec<CoastId> = candidates.collect();
    match dest_coast {
        Some(named) if candidates.contains(&named) => Some(named),
        Some(_) => None,
        None if candidates.len() == 1 => Some(candidates[0]),
        None => None,
    }
}
