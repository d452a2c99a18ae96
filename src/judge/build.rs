//! Winter adjustment resolution: builds and disbands.
//!
//! Each nation's quota comes from [`GameState::build_delta`]: builds are
//! capped by open home centers, disbands are owed without a cap. Disband
//! shortfalls are made up by civil disorder, removing the nation's units in
//! a deterministic order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::{GameState, Unit, UnitKind};
use crate::geo::{CoastId, NationId, TerritoryId};
use crate::order::OutcomeStatus;

/// A winter adjustment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Adjustment {
    /// Place a new unit on an owned, open home center.
    Build {
        nation: NationId,
        territory: TerritoryId,
        coast: Option<CoastId>,
        kind: UnitKind,
    },
    /// Remove one of the nation's units.
    Disband {
        nation: NationId,
        territory: TerritoryId,
    },
}

impl Adjustment {
    pub fn nation(&self) -> NationId {
        match self {
            Adjustment::Build { nation, .. } | Adjustment::Disband { nation, .. } => *nation,
        }
    }
}

/// Why an adjustment ended with its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdjustReason {
    Built,
    Disbanded,
    /// Removed by civil disorder: disbands were owed and not ordered.
    CivilDisorder,
    /// The nation is not owed this kind of adjustment, or its quota is spent.
    QuotaExhausted,
    /// Builds must go on an owned, open home center of the building nation.
    NotAnOpenHomeCenter,
    /// A fleet cannot be built on an inland center.
    TerrainMismatch,
    /// A fleet built on a multi-coast center must name a valid coast.
    CoastRequired,
    /// The nation has no unit in the named territory.
    NoSuchUnit,
}

impl AdjustReason {
    pub fn message(self) -> &'static str {
        match self {
            AdjustReason::Built => "the unit was built",
            AdjustReason::Disbanded => "the unit was disbanded",
            AdjustReason::CivilDisorder => "the unit was removed by civil disorder",
            AdjustReason::QuotaExhausted => "no such adjustment is owed",
            AdjustReason::NotAnOpenHomeCenter => {
                "builds must go on an owned, open home center"
            }
            AdjustReason::TerrainMismatch => "a fleet cannot be built inland",
            AdjustReason::CoastRequired => "the build must name a valid coast",
            AdjustReason::NoSuchUnit => "the nation has no unit there",
        }
    }
}

impl fmt::Display for AdjustReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// The outcome of a single adjustment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentOutcome {
    pub adjustment: Adjustment,
    pub status: OutcomeStatus,
    pub reason: AdjustReason,
}

/// The result of resolving a winter phase.
#[derive(Debug, Clone)]
pub struct WinterResolution {
    /// One outcome per request, then one per civil-disorder removal.
    pub outcomes: Vec<AdjustmentOutcome>,
    /// New units entering the board.
    pub builds: Vec<Unit>,
    /// Territories whose units leave the board.
    pub disbands: Vec<TerritoryId>,
}

/// Validates and applies winter adjustment requests against the deltas.
pub fn resolve_adjustments(state: &GameState, requests: &[Adjustment]) -> WinterResolution {
    let map = state.map();
    let mut outcomes = Vec::with_capacity(requests.len());
    let mut builds: Vec<Unit> = Vec::new();
    let mut disbands: Vec<TerritoryId> = Vec::new();

    let mut built = vec![0i32; map.nation_count()];
    let mut disbanded = vec![0i32; map.nation_count()];

    for request in requests {
        let nation = request.nation();
        let delta = state.build_delta(nation);
        let outcome = match *request {
            Adjustment::Build {
                territory,
                coast,
                kind,
                ..
            } => {
                if delta <= 0 || built[nation.index()] >= delta {
                    fail(request, AdjustReason::QuotaExhausted)
                } else if !state.open_home_centers(nation).contains(&territory)
                    || builds.iter().any(|b| b.territory == territory)
                {
                    fail(request, AdjustReason::NotAnOpenHomeCenter)
                } else if kind == UnitKind::Fleet && map.territory(territory).is_inland() {
                    fail(request, AdjustReason::TerrainMismatch)
                } else if kind == UnitKind::Fleet
                    && map.territory(territory).has_multiple_coasts()
                    && coast.map_or(true, |c| {
                        c.index() >= map.territory(territory).coasts().len()
                    })
                {
                    fail(request, AdjustReason::CoastRequired)
                } else {
                    built[nation.index()] += 1;
                    builds.push(Unit {
                        territory,
                        coast: coast
                            .filter(|_| map.territory(territory).has_multiple_coasts()),
                        kind,
                        nation,
                    });
                    succeed(request, AdjustReason::Built)
                }
            }
            Adjustment::Disband { territory, .. } => {
                if delta >= 0 || disbanded[nation.index()] >= -delta {
                    fail(request, AdjustReason::QuotaExhausted)
                } else if !state
                    .units_of(nation)
                    .any(|u| u.territory == territory)
                    || disbands.contains(&territory)
                {
                    fail(request, AdjustReason::NoSuchUnit)
                } else {
                    disbanded[nation.index()] += 1;
                    disbands.push(territory);
                    succeed(request, AdjustReason::Disbanded)
                }
            }
        };
        outcomes.push(outcome);
    }

    // Civil disorder: nations owing disbands lose units anyway, by territory
    // name so the removal is deterministic.
    for (nation, _) in map.nations() {
        let owed = -state.build_delta(nation);
        if owed <= 0 {
            continue;
        }
        let mut remaining: Vec<&Unit> = state
            .units_of(nation)
            .filter(|u| !disbands.contains(&u.territory))
            .collect();
        remaining.sort_by(|a, b| {
            map.territory(a.territory)
                .name()
                .cmp(map.territory(b.territory).name())
        });
        for unit in remaining
            .into_iter()
            .take((owed - disbanded[nation.index()]).max(0) as usize)
        {
            let adjustment = Adjustment::Disband {
                nation,
                territory: unit.territory,
            };
            disbands.push(unit.territory);
            outcomes.push(AdjustmentOutcome {
                adjustment,
                status: OutcomeStatus::Succeeded,
                reason: AdjustReason::CivilDisorder,
            });
        }
    }

    WinterResolution {
        outcomes,
        builds,
        disbands,
    }
}

fn fail(adjustment: &Adjustment, reason: AdjustReason) -> AdjustmentOutcome {
    AdjustmentOutcome {
        adjustment: *adjustment,
        status: OutcomeStatus::Failed,
        reason,
    }
}

fn succeed(adjustment: &Adjustment, reason: AdjustReason) -> AdjustmentOutcome {
    AdjustmentOutcome {
        adjustment: *adjustment,
        status: OutcomeStatus::Succeeded,
        reason,
    }
}
