//! Simultaneous order resolution.
//!
//! Guess-and-check fixed point. Resolving an order may recursively resolve
//! the orders it depends on; when a dependency cycle is found, the order
//! heading the cycle is evaluated under both guesses. A guess that proves
//! self-inconsistent is simply corrected; when *both* guesses are
//! self-consistent the cycle is a genuine simultaneity — circular movement,
//! which succeeds as a whole, or a convoy paradox, where the convoyed moves
//! fail — and a backup rule settles it. Every order resolves in a bounded
//! number of re-evaluations, and the fixed point depends only on the order
//! set, never on input order.

use std::collections::VecDeque;

use crate::game::{GameState, Invasion, RetreatContext, UnitKind};
use crate::geo::{NationId, TerritoryId, Travel};
use crate::order::{Order, OrderOutcome, OutcomeStatus, Reason};

/// The result of adjudicating one orders phase: an outcome per input order,
/// plus the retreat context the next phase needs.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub outcomes: Vec<OrderOutcome>,
    pub retreats: RetreatContext,
}

impl Resolution {
    /// The outcome of the order issued for the unit in `territory`.
    pub fn outcome_for(&self, territory: TerritoryId) -> Option<&OrderOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.order.unit().is_some_and(|u| u.from == territory))
    }
}

/// Resolves one orders phase.
///
/// Expects at most one order per unit; units without orders hold. Illegal
/// orders (duplicates, orders for units the nation does not have, unparseable
/// text, ambiguous coasts) do not disturb the rest of the batch — their units
/// simply defend in place.
pub fn adjudicate(state: &GameState, orders: &[Order]) -> Resolution {
    let mut resolver = Resolver::new(state, orders);
    resolver.run();
    resolver.finish(orders)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Guess {
    Unresolved,
    Guessing,
    Resolved,
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Hold,
    Move {
        to: TerritoryId,
        needs_convoy: bool,
    },
    Support {
        at: TerritoryId,
        to: Option<TerritoryId>,
    },
    Convoy {
        from: TerritoryId,
        to: TerritoryId,
    },
    /// An order knocked out by the pre-checks; its unit defends in place.
    Inert,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    action: Action,
    nation: NationId,
    from: TerritoryId,
    guess: Guess,
    resolution: bool,
}

const NO_ENTRY: i32 = -1;
const NO_TERRITORY: TerritoryId = TerritoryId(u16::MAX);

struct Resolver<'a> {
    state: &'a GameState,
    entries: Vec<Entry>,
    /// Territory index -> entry index, for live entries only.
    lookup: Vec<i32>,
    /// Outcomes decided by the pre-checks, parallel to the input orders.
    preset: Vec<Option<(OutcomeStatus, Reason)>>,
    /// Entries whose active guess a resolution in progress depended on.
    deps: Vec<usize>,
}

impl<'a> Resolver<'a> {
    fn new(state: &'a GameState, orders: &[Order]) -> Self {
        let mut resolver = Resolver {
            state,
            entries: Vec::with_capacity(orders.len()),
            lookup: vec![NO_ENTRY; state.map().territory_count()],
            preset: vec![None; orders.len()],
            deps: Vec::new(),
        };
        resolver.init(orders);
        resolver
    }

    fn init(&mut self, orders: &[Order]) {
        for (i, order) in orders.iter().enumerate() {
            let (entry, preset) = self.classify(order, i, orders);
            if !matches!(entry.action, Action::Inert) {
                self.lookup[entry.from.index()] = i as i32;
            }
            self.entries.push(entry);
            self.preset[i] = preset;
        }
    }

    /// Applies the shared pre-checks and variant-specific legality, producing
    /// either a live entry or an inert one with a preset outcome.
    fn classify(
        &self,
        order: &Order,
        index: usize,
        orders: &[Order],
    ) -> (Entry, Option<(OutcomeStatus, Reason)>) {
        let inert = |nation: NationId, from: TerritoryId, status, reason| {
            (
                Entry {
                    action: Action::Inert,
                    nation,
                    from,
                    guess: Guess::Resolved,
                    resolution: false,
                },
                Some((status, reason)),
            )
        };

        let Some(ordered) = order.unit() else {
            return inert(
                NationId(0),
                NO_TERRITORY,
                OutcomeStatus::Illegal,
                Reason::BadSyntax,
            );
        };

        // A unit may receive at most one order; every duplicate is illegal.
        let duplicated = orders
            .iter()
            .enumerate()
            .any(|(j, other)| j != index && order.same_unit(other));
        if duplicated {
            return inert(
                ordered.nation,
                ordered.from,
                OutcomeStatus::Illegal,
                Reason::DuplicateOrder,
            );
        }

        // The ordering nation must actually have the unit.
        let unit = match self.state.unit_in(ordered.from) {
            Some(unit) if unit.nation == ordered.nation => *unit,
            _ => {
                return inert(
                    ordered.nation,
                    ordered.from,
                    OutcomeStatus::Illegal,
                    Reason::MissingUnit,
                );
            }
        };

        // The board, not the order text, decides the unit's kind and coast.
        let map = self.state.map();
        let live = |action| {
            (
                Entry {
                    action,
                    nation: ordered.nation,
                    from: ordered.from,
                    guess: Guess::Unresolved,
                    resolution: false,
                },
                None,
            )
        };

        match order {
            Order::Hold { .. } => live(Action::Hold),

            Order::Move { to, to_coast, .. } => {
                if *to == ordered.from {
                    return inert(
                        ordered.nation,
                        ordered.from,
                        OutcomeStatus::Failed,
                        Reason::NoRoute,
                    );
                }
                let travel = map.territory(ordered.from).can_travel_to(
                    *to,
                    unit.kind,
                    unit.coast,
                    *to_coast,
                );
                match travel {
                    Travel::CanTravel => live(Action::Move {
                        to: *to,
                        needs_convoy: false,
                    }),
                    Travel::CoastNeeded => inert(
                        ordered.nation,
                        ordered.from,
                        OutcomeStatus::Illegal,
                        Reason::CoastAmbiguous,
                    ),
                    Travel::CannotTravel => {
                        let convoyable = unit.kind == UnitKind::Army
                            && map.territory(ordered.from).is_coastal()
                            && map.territory(*to).is_coastal();
                        if convoyable {
                            live(Action::Move {
                                to: *to,
                                needs_convoy: true,
                            })
                        } else {
                            inert(
                                ordered.nation,
                                ordered.from,
                                OutcomeStatus::Failed,
                                Reason::NoRoute,
                            )
                        }
                    }
                }
            }

            Order::Support { action, .. } => {
                let target = action.to.unwrap_or(action.unit);
                let reachable = target != ordered.from
                    && map.territory(ordered.from).can_travel_to(
                        target,
                        unit.kind,
                        unit.coast,
                        None,
                    ) != Travel::CannotTravel;
                if reachable {
                    live(Action::Support {
                        at: action.unit,
                        to: action.to,
                    })
                } else {
                    inert(
                        ordered.nation,
                        ordered.from,
                        OutcomeStatus::Failed,
                        Reason::SupportUnreachable,
                    )
                }
            }

            Order::Convoy { from, to, .. } => {
                let can_convoy = unit.kind == UnitKind::Fleet
                    && map.territory(ordered.from).is_sea()
                    && map.territory(*from).is_coastal()
                    && map.territory(*to).is_coastal();
                if can_convoy {
                    live(Action::Convoy {
                        from: *from,
                        to: *to,
                    })
                } else {
                    inert(
                        ordered.nation,
                        ordered.from,
                        OutcomeStatus::Failed,
                        Reason::NoRoute,
                    )
                }
            }

            Order::Invalid { .. } => unreachable!("handled above"),
        }
    }

    fn run(&mut self) {
        for i in 0..self.entries.len() {
            if !matches!(self.entries[i].action, Action::Inert) {
                let from = self.entries[i].from;
                self.resolve(from);
            }
        }
    }

    fn entry_at(&self, territory: TerritoryId) -> Option<Entry> {
        if territory == NO_TERRITORY {
            return None;
        }
        let idx = self.lookup[territory.index()];
        if idx < 0 {
            None
        } else {
            Some(self.entries[idx as usize])
        }
    }

    /// Resolves the order of the unit in `territory` to success or failure.
    ///
    /// An order already under an active guess returns its guessed value and
    /// records itself as a dependency, so the cycle's head can tell a plain
    /// wrong guess from a genuine simultaneity.
    fn resolve(&mut self, territory: TerritoryId) -> bool {
        let idx = self.lookup[territory.index()];
        if idx < 0 {
            return false;
        }
        let idx = idx as usize;

        match self.entries[idx].guess {
            Guess::Resolved => return self.entries[idx].resolution,
            Guess::Guessing => {
                if !self.deps.contains(&idx) {
                    self.deps.push(idx);
                }
                return self.entries[idx].resolution;
            }
            Guess::Unresolved => {}
        }

        let base = self.deps.len();

        // First guess: the order fails.
        self.entries[idx].guess = Guess::Guessing;
        self.entries[idx].resolution = false;
        let first = self.evaluate(territory);

        if self.deps.len() == base {
            // Nothing depended on the guess; the answer stands on its own.
            if self.entries[idx].guess != Guess::Resolved {
                self.entries[idx].guess = Guess::Resolved;
                self.entries[idx].resolution = first;
            }
            return self.entries[idx].resolution;
        }

        if self.deps[base] != idx {
            // Part of a cycle headed by an order deeper in the stack; report
            // the tentative answer and let the head settle the cycle.
            self.deps.push(idx);
            self.entries[idx].resolution = first;
            return first;
        }

        // This order heads the cycle. Retract the whole tail and try the
        // opposite guess.
        for &d in &self.deps[base..] {
            self.entries[d].guess = Guess::Unresolved;
        }
        self.deps.truncate(base);

        self.entries[idx].guess = Guess::Guessing;
        self.entries[idx].resolution = true;
        let second = self.evaluate(territory);

        if first == second {
            // Only one self-consistent outcome; the cycle collapses to it.
            for &d in &self.deps[base..] {
                self.entries[d].guess = Guess::Unresolved;
            }
            self.deps.truncate(base);
            self.entries[idx].guess = Guess::Resolved;
            self.entries[idx].resolution = first;
            return first;
        }

        // Both guesses are self-consistent: a genuine simultaneity.
        let cycle: Vec<usize> = self.deps[base..].to_vec();
        self.deps.truncate(base);
        self.apply_backup_rule(&cycle);
        self.resolve(territory)
    }

    /// Settles a cycle with two self-consistent outcomes. A cycle involving
    /// convoys is a convoy paradox: the armies riding those convoys never
    /// land (the Szykman rule). A pure move cycle is circular movement:
    /// every move succeeds.
    fn apply_backup_rule(&mut self, cycle: &[usize]) {
        let convoys: Vec<(TerritoryId, TerritoryId)> = cycle
            .iter()
            .filter_map(|&i| match self.entries[i].action {
                Action::Convoy { from, to } => Some((from, to)),
                _ => None,
            })
            .collect();

        let mut settled = false;
        if convoys.is_empty() {
            for &i in cycle {
                if matches!(self.entries[i].action, Action::Move { .. }) {
                    self.entries[i].guess = Guess::Resolved;
                    self.entries[i].resolution = true;
                    settled = true;
                } else {
                    self.entries[i].guess = Guess::Unresolved;
                }
            }
        } else {
            // The failing moves may sit outside the recorded cycle: the army
            // whose path search dragged the convoy into it is one of them.
            for i in 0..self.entries.len() {
                if let Action::Move {
                    to,
                    needs_convoy: true,
                } = self.entries[i].action
                {
                    if convoys.contains(&(self.entries[i].from, to)) {
                        self.entries[i].guess = Guess::Resolved;
                        self.entries[i].resolution = false;
                        settled = true;
                    }
                }
            }
            for &i in cycle {
                if self.entries[i].guess != Guess::Resolved {
                    self.entries[i].guess = Guess::Unresolved;
                }
            }
        }

        // A cycle that somehow settled nothing would spin forever; fail its
        // moves to force progress.
        if !settled {
            for &i in cycle {
                if matches!(self.entries[i].action, Action::Move { .. }) {
                    self.entries[i].guess = Guess::Resolved;
                    self.entries[i].resolution = false;
                }
            }
        }
    }

    fn evaluate(&mut self, territory: TerritoryId) -> bool {
        let entry = self.entries[self.lookup[territory.index()] as usize];
        match entry.action {
            Action::Hold => true,
            Action::Move { .. } => self.evaluate_move(territory),
            Action::Support { .. } => self.evaluate_support(territory),
            Action::Convoy { .. } => self.evaluate_convoy(territory),
            Action::Inert => false,
        }
    }

    fn evaluate_move(&mut self, territory: TerritoryId) -> bool {
        let entry = self.entries[self.lookup[territory.index()] as usize];
        let Action::Move { to, needs_convoy } = entry.action else {
            return false;
        };

        if needs_convoy && !self.has_convoy_path(entry.from, to) {
            return false;
        }

        let attack = self.attack_strength(territory);
        if attack <= self.hold_strength(to) {
            return false;
        }

        // Head-to-head battle: the defender is moving straight at us.
        if let Some(defender) = self.entry_at(to) {
            if let Action::Move { to: defender_to, .. } = defender.action {
                if defender_to == territory && attack <= self.attack_strength(to) {
                    return false;
                }
            }
        }

        // Every other unit moving to the same destination must be beaten
        // strictly.
        for i in 0..self.entries.len() {
            let other = self.entries[i];
            if let Action::Move { to: other_to, .. } = other.action {
                if other.from != territory
                    && other_to == to
                    && attack <= self.prevent_strength(other.from)
                {
                    return false;
                }
            }
        }

        true
    }

    /// Whether a support survives: it is cut by any attack on the supporter,
    /// except from the territory the support is directed against, and never
    /// by the supporter's own nation.
    fn evaluate_support(&mut self, territory: TerritoryId) -> bool {
        let entry = self.entries[self.lookup[territory.index()] as usize];
        let Action::Support { to: aided_against, .. } = entry.action else {
            return false;
        };

        for i in 0..self.entries.len() {
            let other = self.entries[i];
            let Action::Move { to, needs_convoy } = other.action else {
                continue;
            };
            if to != territory {
                continue;
            }
            // A unit cannot cut the support of an action directed at itself.
            if aided_against == Some(other.from) {
                continue;
            }
            if other.nation == entry.nation {
                continue;
            }
            // A convoyed attack only cuts while its convoy route holds.
            if needs_convoy && !self.has_convoy_path(other.from, to) {
                continue;
            }
            return false;
        }
        true
    }

    /// A convoying fleet keeps its station unless dislodged.
    fn evaluate_convoy(&mut self, territory: TerritoryId) -> bool {
        for i in 0..self.entries.len() {
            let other = self.entries[i];
            if let Action::Move { to, .. } = other.action {
                if to == territory && self.resolve(other.from) {
                    return false;
                }
            }
        }
        true
    }

    /// 1 + effective supports, or 0 when the attack is voided because the
    /// destination holds a friendly unit that is not successfully leaving.
    fn attack_strength(&mut self, territory: TerritoryId) -> i32 {
        let entry = self.entries[self.lookup[territory.index()] as usize];
        let Action::Move { to, .. } = entry.action else {
            return 0;
        };

        if let Some(occupant) = self.state.unit_in(to) {
            if occupant.nation == entry.nation {
                match self.entry_at(to).map(|e| e.action) {
                    Some(Action::Move { to: occupant_to, .. }) => {
                        if occupant_to == territory || !self.resolve(to) {
                            return 0;
                        }
                    }
                    _ => return 0,
                }
            }
        }

        1 + self.support_strength(territory, Some(to))
    }

    /// The strength a territory is defended with. A unit that successfully
    /// moves away defends with nothing; a unit that fails to move defends
    /// alone.
    fn hold_strength(&mut self, territory: TerritoryId) -> i32 {
        if let Some(entry) = self.entry_at(territory) {
            if matches!(entry.action, Action::Move { .. }) {
                return if self.resolve(territory) { 0 } else { 1 };
            }
        }
        if self.state.unit_in(territory).is_none() {
            return 0;
        }
        1 + self.support_strength(territory, None)
    }

    /// The strength a competing move blocks its destination with.
    fn prevent_strength(&mut self, territory: TerritoryId) -> i32 {
        let entry = self.entries[self.lookup[territory.index()] as usize];
        let Action::Move { to, needs_convoy } = entry.action else {
            return 0;
        };

        // A convoyed move with no surviving route never reached the
        // destination and blocks nothing.
        if needs_convoy && !self.has_convoy_path(entry.from, to) {
            return 0;
        }

        // The loser of a head-to-head stops blocking its opponent's home.
        if let Some(defender) = self.entry_at(to) {
            if let Action::Move { to: defender_to, .. } = defender.action {
                if defender_to == territory && !self.resolve(territory) {
                    return 0;
                }
            }
        }

        1 + self.support_strength(territory, Some(to))
    }

    /// Counts effective supports for the unit in `territory` doing `action`
    /// (`Some(dest)` for a move there, `None` for holding).
    fn support_strength(&mut self, territory: TerritoryId, action: Option<TerritoryId>) -> i32 {
        let mut strength = 0;
        for i in 0..self.entries.len() {
            let other = self.entries[i];
            if let Action::Support { at, to } = other.action {
                if at == territory && to == action && self.resolve(other.from) {
                    strength += 1;
                }
            }
        }
        strength
    }

    /// Whether any unbroken chain of surviving convoys carries the move
    /// `src -> dst`. Breadth-first over the fleets convoying exactly this
    /// move.
    fn has_convoy_path(&mut self, src: TerritoryId, dst: TerritoryId) -> bool {
        let convoys: Vec<TerritoryId> = self
            .entries
            .iter()
            .filter(|e| {
                matches!(e.action, Action::Convoy { from, to } if from == src && to == dst)
            })
            .map(|e| e.from)
            .collect();

        let mut visited = vec![false; self.state.map().territory_count()];
        let mut queue = VecDeque::new();

        for &fleet in &convoys {
            if self.state.map().territory(fleet).shore_touches(src) && self.resolve(fleet) {
                visited[fleet.index()] = true;
                queue.push_back(fleet);
            }
        }

        while let Some(current) = queue.pop_front() {
            if self.state.map().territory(current).shore_touches(dst) {
                return true;
            }
            for &fleet in &convoys {
                if !visited[fleet.index()]
                    && self.state.map().territory(current).sea_adjacent(fleet)
                    && self.resolve(fleet)
                {
                    visited[fleet.index()] = true;
                    queue.push_back(fleet);
                }
            }
        }
        false
    }

    /// Converts the settled entries into outcomes and the retreat context.
    fn finish(&mut self, orders: &[Order]) -> Resolution {
        let territory_count = self.state.map().territory_count();

        // Which convoyed moves ended with every route broken.
        let mut disrupted = vec![false; orders.len()];
        for i in 0..self.entries.len() {
            let entry = self.entries[i];
            if let Action::Move {
                to,
                needs_convoy: true,
            } = entry.action
            {
                disrupted[i] = !self.has_convoy_path(entry.from, to);
            }
        }

        // Successful moves, keyed by destination, and contested destinations.
        let mut taken_from: Vec<Option<TerritoryId>> = vec![None; territory_count];
        let mut attempts = vec![0u32; territory_count];
        let mut entered = vec![false; territory_count];
        for (i, entry) in self.entries.iter().enumerate() {
            if let Action::Move { to, .. } = entry.action {
                if disrupted[i] {
                    continue;
                }
                attempts[to.index()] += 1;
                if entry.resolution {
                    taken_from[to.index()] = Some(entry.from);
                    entered[to.index()] = true;
                }
            }
        }

        // A defender is dislodged when a move lands on it and it did not
        // itself vacate.
        let mut dislodged_at = vec![false; territory_count];
        let mut invasions = Vec::new();
        let mut dislodged_units = Vec::new();
        for unit in self.state.units() {
            let Some(attacker) = taken_from[unit.territory.index()] else {
                continue;
            };
            let vacated = self
                .entry_at(unit.territory)
                .is_some_and(|e| matches!(e.action, Action::Move { .. }) && e.resolution);
            if !vacated {
                dislodged_at[unit.territory.index()] = true;
                invasions.push(Invasion {
                    from: attacker,
                    into: unit.territory,
                });
                dislodged_units.push(*unit);
            }
        }

        let standoffs: Vec<TerritoryId> = (0..territory_count)
            .filter(|&i| attempts[i] >= 2 && !entered[i])
            .map(|i| TerritoryId(i as u16))
            .collect();

        let outcomes = orders
            .iter()
            .enumerate()
            .map(|(i, order)| self.outcome_of(order, i, &disrupted, &dislodged_at))
            .collect();

        Resolution {
            outcomes,
            retreats: RetreatContext {
                standoffs,
                invasions,
                dislodged: dislodged_units,
            },
        }
    }

    fn outcome_of(
        &self,
        order: &Order,
        index: usize,
        disrupted: &[bool],
        dislodged_at: &[bool],
    ) -> OrderOutcome {
        let entry = self.entries[index];
        let was_dislodged =
            entry.from != NO_TERRITORY && dislodged_at[entry.from.index()];

        if let Some((status, reason)) = self.preset[index] {
            // An inert order's unit can still be thrown out from under it.
            if status == OutcomeStatus::Failed && was_dislodged {
                return OrderOutcome::failed(order.clone(), Reason::Dislodged);
            }
            return OrderOutcome {
                order: order.clone(),
                status,
                reason,
            };
        }

        match entry.action {
            Action::Hold => {
                if was_dislodged {
                    OrderOutcome::failed(order.clone(), Reason::Dislodged)
                } else {
                    OrderOutcome::succeeded(order.clone(), Reason::Held)
                }
            }
            Action::Move { .. } => {
                if entry.resolution {
                    OrderOutcome::succeeded(order.clone(), Reason::Moved)
                } else if disrupted[index] {
                    OrderOutcome::failed(order.clone(), Reason::ConvoyDisrupted)
                } else if was_dislodged {
                    OrderOutcome::failed(order.clone(), Reason::Dislodged)
                } else {
                    OrderOutcome::failed(order.clone(), Reason::Bounced)
                }
            }
            Action::Support { .. } => {
                if was_dislodged {
                    OrderOutcome::failed(order.clone(), Reason::Dislodged)
                } else if entry.resolution {
                    OrderOutcome::succeeded(order.clone(), Reason::SupportGiven)
                } else {
                    OrderOutcome::failed(order.clone(), Reason::SupportCut)
                }
            }
            Action::Convoy { .. } => {
                if was_dislodged {
                    OrderOutcome::failed(order.clone(), Reason::Dislodged)
                } else {
                    OrderOutcome::succeeded(order.clone(), Reason::ConvoyCarried)
                }
            }
            Action::Inert => unreachable!("inert orders carry a preset outcome"),
        }
    }
}
