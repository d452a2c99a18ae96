//! Retreat-phase resolution.
//!
//! Dislodged units receive `Move` orders naming their retreat destination;
//! a `Hold` disbands the unit voluntarily, and a unit with no usable order
//! disbands by civil disorder. Retreats are simpler than regular moves:
//! there is no support and no convoy, and two units retreating to the same
//! territory are both disbanded.

use crate::game::{GameState, Unit, UnitKind};
use crate::geo::{TerritoryId, Travel};
use crate::order::{Order, OrderOutcome, OutcomeStatus, Reason};

/// The result of resolving a retreat phase.
#[derive(Debug, Clone)]
pub struct RetreatResolution {
    pub outcomes: Vec<OrderOutcome>,
    /// Units that retreated successfully, at their new positions.
    pub placements: Vec<Unit>,
    /// Dislodged units leaving the game.
    pub disbands: Vec<Unit>,
}

/// Resolves the retreat orders for the state's dislodged units.
///
/// A retreat fails, disbanding the unit, when the destination is not
/// directly reachable, is occupied, suffered a standoff this turn, is the
/// territory its dislodger attacked from, or is contested by another
/// retreating unit.
pub fn resolve_retreats(state: &GameState, orders: &[Order]) -> RetreatResolution {
    let retreats = state.retreats();
    let mut outcomes = Vec::with_capacity(orders.len());
    let mut placements: Vec<Unit> = Vec::new();

    // Destinations named by more than one retreat order bounce everyone.
    let mut contested: Vec<TerritoryId> = Vec::new();
    {
        let mut seen: Vec<TerritoryId> = Vec::new();
        for order in orders {
            if let Order::Move { to, .. } = order {
                if seen.contains(to) && !contested.contains(to) {
                    contested.push(*to);
                }
                seen.push(*to);
            }
        }
    }

    let mut retreated: Vec<TerritoryId> = Vec::new();
    for (index, order) in orders.iter().enumerate() {
        let outcome = resolve_one(state, order, index, orders, &contested);
        if let (OutcomeStatus::Succeeded, Order::Move { unit, to, to_coast }) =
            (outcome.status, &outcome.order)
        {
            if outcome.reason == Reason::Moved {
                let dislodged = retreats
                    .dislodged
                    .iter()
                    .find(|u| u.territory == unit.from && u.nation == unit.nation)
                    .expect("retreat resolved for a unit that is not dislodged");
                let map = state.map();
                let coast = map
                    .territory(dislodged.territory)
                    .arrival_coast(*to, dislodged.kind, dislodged.coast, *to_coast)
                    .filter(|_| map.territory(*to).has_multiple_coasts());
                placements.push(Unit {
                    territory: *to,
                    coast,
                    kind: dislodged.kind,
                    nation: dislodged.nation,
                });
                retreated.push(dislodged.territory);
            }
        }
        outcomes.push(outcome);
    }

    // Everything dislodged that did not get away is disbanded.
    let disbands = retreats
        .dislodged
        .iter()
        .filter(|u| !retreated.contains(&u.territory))
        .copied()
        .collect();

    RetreatResolution {
        outcomes,
        placements,
        disbands,
    }
}

fn resolve_one(
    state: &GameState,
    order: &Order,
    index: usize,
    orders: &[Order],
    contested: &[TerritoryId],
) -> OrderOutcome {
    let Some(ordered) = order.unit() else {
        return OrderOutcome::illegal(order.clone(), Reason::BadSyntax);
    };

    let duplicated = orders
        .iter()
        .enumerate()
        .any(|(j, other)| j != index && order.same_unit(other));
    if duplicated {
        return OrderOutcome::illegal(order.clone(), Reason::DuplicateOrder);
    }

    let retreats = state.retreats();
    let Some(unit) = retreats
        .dislodged
        .iter()
        .find(|u| u.territory == ordered.from && u.nation == ordered.nation)
    else {
        return OrderOutcome::illegal(order.clone(), Reason::MissingUnit);
    };

    match order {
        // A hold during retreats is a voluntary disband.
        Order::Hold { .. } => OrderOutcome::succeeded(order.clone(), Reason::Disbanded),

        Order::Move { to, to_coast, .. } => {
            let travel = state.map().territory(unit.territory).can_travel_to(
                *to,
                unit.kind,
                unit.coast,
                *to_coast,
            );
            match travel {
                Travel::CannotTravel => {
                    return OrderOutcome::failed(order.clone(), Reason::NoRoute)
                }
                Travel::CoastNeeded => {
                    return OrderOutcome::illegal(order.clone(), Reason::CoastAmbiguous)
                }
                Travel::CanTravel => {}
            }
            if state.unit_in(*to).is_some()
                || retreats.standoffs.contains(to)
                || retreats.banned_origins(unit.territory).any(|t| t == *to)
            {
                return OrderOutcome::failed(order.clone(), Reason::RetreatBlocked);
            }
            if contested.contains(to) {
                return OrderOutcome::failed(order.clone(), Reason::Bounced);
            }
            OrderOutcome::succeeded(order.clone(), Reason::Moved)
        }

        Order::Support { .. } | Order::Convoy { .. } => {
            OrderOutcome::illegal(order.clone(), Reason::WrongPhase)
        }

        Order::Invalid { .. } => unreachable!("handled above"),
    }
}
