//! The phase state machine.
//!
//! `SpringOrders -> SpringRetreats -> FallOrders -> FallRetreats ->
//! WinterBuilds -> SpringOrders (year + 1)`, with two shortcuts: a retreat
//! phase with no dislodged units is skipped outright, and a winter with no
//! build or disband owed anywhere rolls straight into the next spring.
//!
//! These constructors are the only place resolutions touch the board. Each
//! consumes one resolution, applies it exactly once, and returns the next
//! immutable snapshot.

use crate::game::{GameState, GameSupplyCenter, Phase, RetreatContext, Unit};
use crate::judge::build::WinterResolution;
use crate::judge::resolve::Resolution;
use crate::judge::retreat::RetreatResolution;
use crate::order::Order;

/// Applies an orders-phase resolution and advances the phase.
///
/// Panics if the state is not in an orders phase: feeding a resolution to
/// the wrong phase is a caller bug, not a game event.
pub fn advance_orders(state: &GameState, resolution: &Resolution) -> GameState {
    assert!(
        state.phase().is_orders(),
        "advance_orders called in {}",
        state.phase()
    );

    let units = apply_moves(state, resolution);
    let retreats = resolution.retreats.clone();

    match state.phase() {
        Phase::SpringOrders => {
            if retreats.attention_needed() {
                state.derived(
                    state.year(),
                    Phase::SpringRetreats,
                    units,
                    state.supply_centers().to_vec(),
                    retreats,
                )
            } else {
                state.derived(
                    state.year(),
                    Phase::FallOrders,
                    units,
                    state.supply_centers().to_vec(),
                    RetreatContext::none(),
                )
            }
        }
        Phase::FallOrders => {
            if retreats.attention_needed() {
                state.derived(
                    state.year(),
                    Phase::FallRetreats,
                    units,
                    state.supply_centers().to_vec(),
                    retreats,
                )
            } else {
                after_fall(state, units)
            }
        }
        _ => unreachable!(),
    }
}

/// Applies a retreat-phase resolution and advances the phase.
pub fn advance_retreats(state: &GameState, resolution: &RetreatResolution) -> GameState {
    assert!(
        state.phase().is_retreats(),
        "advance_retreats called in {}",
        state.phase()
    );

    let mut units = state.units().to_vec();
    units.extend_from_slice(&resolution.placements);

    match state.phase() {
        Phase::SpringRetreats => state.derived(
            state.year(),
            Phase::FallOrders,
            units,
            state.supply_centers().to_vec(),
            RetreatContext::none(),
        ),
        Phase::FallRetreats => after_fall(state, units),
        _ => unreachable!(),
    }
}

/// Applies a winter resolution and opens the next year.
pub fn advance_builds(state: &GameState, resolution: &WinterResolution) -> GameState {
    assert!(
        state.phase() == Phase::WinterBuilds,
        "advance_builds called in {}",
        state.phase()
    );

    let mut units: Vec<Unit> = state
        .units()
        .iter()
        .filter(|u| !resolution.disbands.contains(&u.territory))
        .copied()
        .collect();
    units.extend_from_slice(&resolution.builds);

    state.derived(
        state.year() + 1,
        Phase::SpringOrders,
        units,
        state.supply_centers().to_vec(),
        RetreatContext::none(),
    )
}

/// Moves successful movers, drops dislodged units, leaves everything else.
fn apply_moves(state: &GameState, resolution: &Resolution) -> Vec<Unit> {
    let map = state.map();
    let mut units = Vec::with_capacity(state.units().len());

    for unit in state.units() {
        if resolution
            .retreats
            .dislodged
            .iter()
            .any(|d| d.territory == unit.territory && d.nation == unit.nation)
        {
            continue;
        }

        let moved = resolution.outcomes.iter().find_map(|outcome| {
            if !outcome.is_success() {
                return None;
            }
            match &outcome.order {
                Order::Move {
                    unit: ordered,
                    to,
                    to_coast,
                } if ordered.from == unit.territory && ordered.nation == unit.nation => {
                    Some((*to, *to_coast))
                }
                _ => None,
            }
        });

        match moved {
            Some((to, to_coast)) => {
                let coast = map
                    .territory(unit.territory)
                    .arrival_coast(to, unit.kind, unit.coast, to_coast)
                    .filter(|_| map.territory(to).has_multiple_coasts());
                units.push(Unit {
                    territory: to,
                    coast,
                    ..*unit
                });
            }
            None => units.push(*unit),
        }
    }

    units
}

/// Closes out the fall: units capture the centers they stand on, then the
/// year goes to winter — or straight to next spring when nobody owes an
/// adjustment.
fn after_fall(state: &GameState, units: Vec<Unit>) -> GameState {
    let supply_centers = capture(state, &units);
    let winter = state.derived(
        state.year(),
        Phase::WinterBuilds,
        units,
        supply_centers,
        RetreatContext::none(),
    );
    if winter.any_builds_needed() {
        return winter;
    }
    winter.derived(
        winter.year() + 1,
        Phase::SpringOrders,
        winter.units().to_vec(),
        winter.supply_centers().to_vec(),
        RetreatContext::none(),
    )
}

fn capture(state: &GameState, units: &[Unit]) -> Vec<GameSupplyCenter> {
    state
        .supply_centers()
        .iter()
        .map(|sc| {
            let occupant = units.iter().find(|u| u.territory == sc.territory);
            GameSupplyCenter {
                territory: sc.territory,
                owner: occupant.map(|u| u.nation).or(sc.owner),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::UnitKind;
    use crate::judge::build::resolve_adjustments;
    use crate::judge::resolve::adjudicate;
    use crate::judge::retreat::resolve_retreats;
    use crate::order::OrderedUnit;
    use crate::standard;
    use std::sync::Arc;

    fn mv(state: &GameState, nation: &str, from: &str, to: &str) -> Order {
        let map = state.map();
        let from_id = map.find_territory(from).unwrap();
        Order::Move {
            unit: OrderedUnit {
                nation: map.find_nation(nation).unwrap(),
                kind: state.unit_in(from_id).unwrap().kind,
                from: from_id,
            },
            to: map.find_territory(to).unwrap(),
            to_coast: None,
        }
    }

    #[test]
    fn quiet_spring_skips_the_retreat_phase() {
        let state = GameState::opening(Arc::new(standard::map()));
        let res = adjudicate(&state, &[mv(&state, "Austria", "Vienna", "Galicia")]);
        let next = advance_orders(&state, &res);
        assert_eq!(next.phase(), Phase::FallOrders);
        assert_eq!(next.year(), 1901);
        // The move was applied.
        let galicia = next.map().find_territory("Galicia").unwrap();
        assert!(next.unit_in(galicia).is_some());
        let vienna = next.map().find_territory("Vienna").unwrap();
        assert!(next.unit_in(vienna).is_none());
    }

    #[test]
    fn dislodgement_enters_the_retreat_phase() {
        let map = Arc::new(standard::map());
        let opening = GameState::opening(Arc::clone(&map));
        let t = |name: &str| map.find_territory(name).unwrap();
        let unit = |nation: &str, territory: &str| Unit {
            territory: t(territory),
            coast: None,
            kind: UnitKind::Army,
            nation: map.find_nation(nation).unwrap(),
        };
        let state = opening.derived(
            1901,
            Phase::SpringOrders,
            vec![
                unit("Austria", "Tyrolia"),
                unit("Austria", "Trieste"),
                unit("Italy", "Venice"),
            ],
            opening.supply_centers().to_vec(),
            RetreatContext::none(),
        );
        let res = adjudicate(
            &state,
            &[
                mv(&state, "Austria", "Tyrolia", "Venice"),
                Order::Support {
                    unit: OrderedUnit {
                        nation: map.find_nation("Austria").unwrap(),
                        kind: UnitKind::Army,
                        from: t("Trieste"),
                    },
                    action: crate::order::SupportedAction {
                        unit: t("Tyrolia"),
                        to: Some(t("Venice")),
                    },
                },
            ],
        );
        let next = advance_orders(&state, &res);
        assert_eq!(next.phase(), Phase::SpringRetreats);
        assert!(next.retreats().attention_needed());
        // The dislodged Italian is off the board; Austria sits in Venice.
        assert_eq!(next.units().len(), 2);
        assert_eq!(
            next.unit_in(t("Venice")).unwrap().nation,
            map.find_nation("Austria").unwrap()
        );

        // Resolving the retreat returns the unit to the board.
        let retreat = Order::Move {
            unit: OrderedUnit {
                nation: map.find_nation("Italy").unwrap(),
                kind: UnitKind::Army,
                from: t("Venice"),
            },
            to: t("Apulia"),
            to_coast: None,
        };
        let rres = resolve_retreats(&next, &[retreat]);
        let after = advance_retreats(&next, &rres);
        assert_eq!(after.phase(), Phase::FallOrders);
        assert_eq!(after.units().len(), 3);
        assert!(after.unit_in(t("Apulia")).is_some());
        assert!(!after.retreats().attention_needed());
    }

    #[test]
    fn fall_capture_and_winter_entry() {
        let state = GameState::opening(Arc::new(standard::map()));
        let spring = adjudicate(&state, &[mv(&state, "Austria", "Vienna", "Galicia")]);
        let fall_state = advance_orders(&state, &spring);
        assert_eq!(fall_state.phase(), Phase::FallOrders);

        // Austria walks into neutral Serbia in the fall.
        let fall = adjudicate(
            &fall_state,
            &[mv(&fall_state, "Austria", "Budapest", "Serbia")],
        );
        let winter = advance_orders(&fall_state, &fall);
        assert_eq!(winter.phase(), Phase::WinterBuilds);

        let map = winter.map();
        let austria = map.find_nation("Austria").unwrap();
        let serbia = map.find_territory("Serbia").unwrap();
        let owner = winter
            .supply_centers()
            .iter()
            .find(|sc| sc.territory == serbia)
            .unwrap()
            .owner;
        assert_eq!(owner, Some(austria));
        // Four centers, three units: a build is owed, so winter is played.
        assert_eq!(winter.build_delta(austria), 1);
    }

    #[test]
    fn quiet_fall_skips_winter_entirely() {
        let state = GameState::opening(Arc::new(standard::map()));
        let spring = adjudicate(&state, &[]);
        let fall_state = advance_orders(&state, &spring);
        // Nobody moves all year: no captures, no deltas, winter vanishes.
        let fall = adjudicate(&fall_state, &[]);
        let next = advance_orders(&fall_state, &fall);
        assert_eq!(next.phase(), Phase::SpringOrders);
        assert_eq!(next.year(), 1902);
    }

    #[test]
    fn winter_build_applies_and_opens_next_year() {
        let state = GameState::opening(Arc::new(standard::map()));
        let spring = adjudicate(&state, &[mv(&state, "Austria", "Vienna", "Galicia")]);
        let fall_state = advance_orders(&state, &spring);
        let fall = adjudicate(
            &fall_state,
            &[mv(&fall_state, "Austria", "Budapest", "Serbia")],
        );
        let winter = advance_orders(&fall_state, &fall);
        assert_eq!(winter.phase(), Phase::WinterBuilds);

        let map = winter.map();
        let austria = map.find_nation("Austria").unwrap();
        let vienna = map.find_territory("Vienna").unwrap();
        let wres = resolve_adjustments(
            &winter,
            &[crate::judge::build::Adjustment::Build {
                nation: austria,
                territory: vienna,
                coast: None,
                kind: UnitKind::Army,
            }],
        );
        let next = advance_builds(&winter, &wres);
        assert_eq!(next.phase(), Phase::SpringOrders);
        assert_eq!(next.year(), 1902);
        assert!(next.unit_in(vienna).is_some());
        assert_eq!(next.units_of(austria).count(), 4);
    }

    #[test]
    fn fleet_move_onto_split_coast_records_the_coast() {
        let map = Arc::new(standard::map());
        let opening = GameState::opening(Arc::clone(&map));
        let t = |name: &str| map.find_territory(name).unwrap();
        let france = map.find_nation("France").unwrap();
        let state = opening.derived(
            1901,
            Phase::SpringOrders,
            vec![Unit {
                territory: t("Gascony"),
                coast: None,
                kind: UnitKind::Fleet,
                nation: france,
            }],
            opening.supply_centers().to_vec(),
            RetreatContext::none(),
        );
        // Gascony's only coastal edge into Spain lands on the north coast;
        // the coast is inferred and recorded on the moved fleet.
        let res = adjudicate(&state, &[mv(&state, "France", "Gascony", "Spain")]);
        let next = advance_orders(&state, &res);
        let spain = next.unit_in(t("Spain")).unwrap();
        assert_eq!(
            spain.coast,
            Some(map.territory(t("Spain")).coast_named("north").unwrap())
        );
    }
}
