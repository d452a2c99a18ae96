//! Game-state snapshots and supply-center accounting.
//!
//! A [`GameState`] is a frozen snapshot: once constructed it never changes,
//! and a game is the ordered sequence of its snapshots. The only place a new
//! snapshot is assembled from a resolution is [`crate::judge::phase`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::game::unit::{Unit, UnitKind};
use crate::geo::{Map, NationId, TerritoryId};

/// A phase of the game year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// The year's first round of regular orders.
    SpringOrders,
    /// Retreats following spring orders.
    SpringRetreats,
    /// The year's second round of regular orders.
    FallOrders,
    /// Retreats following fall orders.
    FallRetreats,
    /// Builds and disbands at the end of the year.
    WinterBuilds,
}

impl Phase {
    /// Whether this is a regular orders phase.
    pub fn is_orders(self) -> bool {
        matches!(self, Phase::SpringOrders | Phase::FallOrders)
    }

    /// Whether this is a retreats phase.
    pub fn is_retreats(self) -> bool {
        matches!(self, Phase::SpringRetreats | Phase::FallRetreats)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::SpringOrders => "spring orders",
            Phase::SpringRetreats => "spring retreats",
            Phase::FallOrders => "fall orders",
            Phase::FallRetreats => "fall retreats",
            Phase::WinterBuilds => "winter builds",
        })
    }
}

/// A supply center on the board paired with its current owner.
///
/// Unowned at game start unless it is a home center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSupplyCenter {
    pub territory: TerritoryId,
    pub owner: Option<NationId>,
}

/// A successful invasion recorded for the following retreat phase.
///
/// The unit dislodged at `into` may not retreat to `from`, the territory
/// its dislodger attacked from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invasion {
    pub from: TerritoryId,
    pub into: TerritoryId,
}

/// Carry-over state between an orders phase and its retreat phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetreatContext {
    /// Territories that suffered a standoff; no unit may retreat here.
    pub standoffs: Vec<TerritoryId>,
    /// Invasions restricting where each dislodged unit may go.
    pub invasions: Vec<Invasion>,
    /// Units awaiting retreat orders. Their `territory` is where they were
    /// dislodged from; they no longer occupy the board.
    pub dislodged: Vec<Unit>,
}

impl RetreatContext {
    /// A context with nothing to resolve.
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether any unit needs a retreat order from its player.
    pub fn attention_needed(&self) -> bool {
        !self.dislodged.is_empty()
    }

    /// The retreat restriction for a unit dislodged at `territory`:
    /// the origins of the moves that dislodged it.
    pub fn banned_origins(&self, territory: TerritoryId) -> impl Iterator<Item = TerritoryId> + '_ {
        self.invasions
            .iter()
            .filter(move |inv| inv.into == territory)
            .map(|inv| inv.from)
    }
}

/// A frozen snapshot of a game.
#[derive(Debug, Clone)]
pub struct GameState {
    map: Arc<Map>,
    year: i32,
    phase: Phase,
    units: Vec<Unit>,
    supply_centers: Vec<GameSupplyCenter>,
    retreats: RetreatContext,
}

impl GameState {
    /// The classic starting position: year 1901, spring orders, one unit on
    /// each home center, home centers owned and neutral centers open.
    pub fn opening(map: Arc<Map>) -> GameState {
        let units = map
            .home_centers()
            .map(|(territory, home)| Unit {
                territory,
                coast: home
                    .start_coast
                    .filter(|_| map.territory(territory).has_multiple_coasts()),
                kind: home.start_unit,
                nation: home.nation,
            })
            .collect();
        let supply_centers = map
            .supply_centers()
            .map(|territory| GameSupplyCenter {
                territory,
                owner: map.territory(territory).home().map(|h| h.nation),
            })
            .collect();
        GameState {
            map,
            year: 1901,
            phase: Phase::SpringOrders,
            units,
            supply_centers,
            retreats: RetreatContext::none(),
        }
    }

    /// Assembles a snapshot from parts.
    ///
    /// This is the hand-off point for session layers that load or stage a
    /// position themselves. The unit invariants (terrain fit, coasts on
    /// multi-coast territories only) are the caller's responsibility and
    /// checked in debug builds.
    pub fn new(
        map: Arc<Map>,
        year: i32,
        phase: Phase,
        units: Vec<Unit>,
        supply_centers: Vec<GameSupplyCenter>,
        retreats: RetreatContext,
    ) -> GameState {
        #[cfg(debug_assertions)]
        for unit in &units {
            let territory = map.territory(unit.territory);
            match unit.kind {
                UnitKind::Army => debug_assert!(
                    !territory.is_sea(),
                    "army placed at sea in {}",
                    territory.name()
                ),
                UnitKind::Fleet => debug_assert!(
                    !territory.is_inland(),
                    "fleet placed inland in {}",
                    territory.name()
                ),
            }
            debug_assert!(
                unit.coast.is_none() || territory.has_multiple_coasts(),
                "coast recorded on a single-coast territory {}",
                territory.name()
            );
        }
        GameState {
            map,
            year,
            phase,
            units,
            supply_centers,
            retreats,
        }
    }

    /// Internal successor constructor; only [`crate::judge::phase`] applies
    /// resolutions to the board.
    pub(crate) fn derived(
        &self,
        year: i32,
        phase: Phase,
        units: Vec<Unit>,
        supply_centers: Vec<GameSupplyCenter>,
        retreats: RetreatContext,
    ) -> GameState {
        GameState::new(
            Arc::clone(&self.map),
            year,
            phase,
            units,
            supply_centers,
            retreats,
        )
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn map_handle(&self) -> Arc<Map> {
        Arc::clone(&self.map)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn supply_centers(&self) -> &[GameSupplyCenter] {
        &self.supply_centers
    }

    pub fn retreats(&self) -> &RetreatContext {
        &self.retreats
    }

    /// The unit occupying a territory, if any.
    pub fn unit_in(&self, territory: TerritoryId) -> Option<&Unit> {
        self.units.iter().find(|u| u.territory == territory)
    }

    /// The given nation's units.
    pub fn units_of(&self, nation: NationId) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(move |u| u.nation == nation)
    }

    /// The supply centers the given nation currently owns.
    pub fn centers_of(&self, nation: NationId) -> impl Iterator<Item = TerritoryId> + '_ {
        self.supply_centers
            .iter()
            .filter(move |sc| sc.owner == Some(nation))
            .map(|sc| sc.territory)
    }

    /// The given nation's home centers that it owns and has left unoccupied —
    /// the places it may build.
    pub fn open_home_centers(&self, nation: NationId) -> Vec<TerritoryId> {
        self.map
            .home_centers_of(nation)
            .filter(|&t| {
                self.supply_centers
                    .iter()
                    .any(|sc| sc.territory == t && sc.owner == Some(nation))
                    && self.unit_in(t).is_none()
            })
            .collect()
    }

    /// Builds owed (positive) or disbands owed (negative) for a nation.
    ///
    /// Builds are capped by the nation's open home centers; disbands are
    /// not capped by anything.
    pub fn build_delta(&self, nation: NationId) -> i32 {
        let centers = self.centers_of(nation).count() as i32;
        let units = self.units_of(nation).count() as i32;
        let delta = centers - units;
        if delta > 0 {
            delta.min(self.open_home_centers(nation).len() as i32)
        } else {
            delta
        }
    }

    /// Whether any nation has a nonzero build or disband delta.
    pub fn any_builds_needed(&self) -> bool {
        self.map
            .nations()
            .any(|(nation, _)| self.build_delta(nation) != 0)
    }
}
