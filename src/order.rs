//! Orders and their outcomes.
//!
//! An [`Order`] is pure data: each variant carries exactly what is needed to
//! state the order unambiguously. Resolution lives in [`crate::judge`]; the
//! outcome of every order is reported as an [`OrderOutcome`] with a typed,
//! human-readable reason.

use serde::{Deserialize, Serialize};

use crate::game::UnitKind;
use crate::geo::{CoastId, Map, NationId, TerritoryId};

/// The unit an order is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedUnit {
    /// The nation making the order; nations can only order their own units.
    pub nation: NationId,
    /// The declared kind of the ordered unit.
    pub kind: UnitKind,
    /// The territory the ordered unit occupies.
    pub from: TerritoryId,
}

/// The action a support order is backing: a unit and, for a supported move,
/// its destination. `to: None` supports the unit holding in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedAction {
    pub unit: TerritoryId,
    pub to: Option<TerritoryId>,
}

/// A Diplomacy order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Order {
    /// `A Vie H`
    Hold { unit: OrderedUnit },
    /// `A Bud - Rum`, `F Mid - Spa/north`
    Move {
        unit: OrderedUnit,
        to: TerritoryId,
        to_coast: Option<CoastId>,
    },
    /// `A Tyr S A Vie` (hold) or `A Gal S A Bud - Rum` (move)
    Support {
        unit: OrderedUnit,
        action: SupportedAction,
    },
    /// `F Mid C A Bre - Spa`
    Convoy {
        unit: OrderedUnit,
        from: TerritoryId,
        to: TerritoryId,
    },
    /// Order text the parser could make nothing of; always illegal.
    Invalid { text: Box<str> },
}

impl Order {
    /// The ordered unit, for unit orders.
    pub fn unit(&self) -> Option<OrderedUnit> {
        match self {
            Order::Hold { unit }
            | Order::Move { unit, .. }
            | Order::Support { unit, .. }
            | Order::Convoy { unit, .. } => Some(*unit),
            Order::Invalid { .. } => None,
        }
    }

    /// Whether two orders address the same unit: same ordering nation and
    /// same source territory, regardless of order kind.
    pub fn same_unit(&self, other: &Order) -> bool {
        match (self.unit(), other.unit()) {
            (Some(a), Some(b)) => a.nation == b.nation && a.from == b.from,
            _ => false,
        }
    }

    /// The canonical display form, rendered against the map the order's
    /// handles refer to.
    pub fn display(&self, map: &Map) -> String {
        let abbr = |t: TerritoryId| map.territory(t).primary_abbreviation().to_string();
        let place = |t: TerritoryId, coast: Option<CoastId>| match coast {
            Some(c) => format!("{}/{}", abbr(t), map.territory(t).coast_name(c)),
            None => abbr(t),
        };
        let head = |unit: &OrderedUnit| format!("{} {}", unit.kind.letter(), abbr(unit.from));

        match self {
            Order::Hold { unit } => format!("{} H", head(unit)),
            Order::Move { unit, to, to_coast } => {
                format!("{} - {}", head(unit), place(*to, *to_coast))
            }
            Order::Support { unit, action } => match action.to {
                Some(to) => format!("{} S {} - {}", head(unit), abbr(action.unit), abbr(to)),
                None => format!("{} S {}", head(unit), abbr(action.unit)),
            },
            Order::Convoy { unit, from, to } => {
                format!("{} C {} - {}", head(unit), abbr(*from), abbr(*to))
            }
            Order::Invalid { text } => text.to_string(),
        }
    }
}

/// The success status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeStatus {
    /// Improperly written or fundamentally against the rules.
    Illegal,
    /// Legal, but the conditions to succeed were not met.
    Failed,
    /// Achieved its effect on the turn.
    Succeeded,
}

/// Why an order ended with its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reason {
    // Illegal.
    /// The order could not be parsed into anything meaningful.
    BadSyntax,
    /// More than one order was given for this unit.
    DuplicateOrder,
    /// The ordering nation has no unit in the source territory.
    MissingUnit,
    /// The destination has several reachable coasts and none was named.
    CoastAmbiguous,
    /// The order kind has no meaning in the current phase.
    WrongPhase,

    // Failed.
    /// No direct edge or convoy chain reaches the destination.
    NoRoute,
    /// Another unit contested the destination with equal or greater power.
    Bounced,
    /// The support was cut by an attack on the supporting unit.
    SupportCut,
    /// The supporting unit could not itself reach the supported territory.
    SupportUnreachable,
    /// Every convoy chain for the move was broken.
    ConvoyDisrupted,
    /// The unit was forced out of its territory.
    Dislodged,
    /// The retreat destination was occupied, contested, or banned.
    RetreatBlocked,

    // Succeeded.
    /// The move went through.
    Moved,
    /// The unit held its territory.
    Held,
    /// The support counted toward the supported action.
    SupportGiven,
    /// The convoying fleet stayed in place and carried the army.
    ConvoyCarried,
    /// The unit was removed from the board.
    Disbanded,
}

impl Reason {
    /// A short human-readable account of the outcome.
    pub fn message(self) -> &'static str {
        match self {
            Reason::BadSyntax => "the order could not be parsed",
            Reason::DuplicateOrder => "more than one order was given for this unit",
            Reason::MissingUnit => "the nation has no unit in the source territory",
            Reason::CoastAmbiguous => "a destination coast must be named",
            Reason::WrongPhase => "the order has no meaning in this phase",
            Reason::NoRoute => "no route reaches the destination",
            Reason::Bounced => "the destination was contested with equal or greater power",
            Reason::SupportCut => "the support was cut by an attack",
            Reason::SupportUnreachable => "the supporting unit cannot reach the territory",
            Reason::ConvoyDisrupted => "every convoy route was broken",
            Reason::Dislodged => "the unit was dislodged",
            Reason::RetreatBlocked => "the retreat destination was unavailable",
            Reason::Moved => "the unit moved",
            Reason::Held => "the unit held",
            Reason::SupportGiven => "the support was given",
            Reason::ConvoyCarried => "the convoy held its station",
            Reason::Disbanded => "the unit was disbanded",
        }
    }
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// The adjudicated outcome of a single order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderOutcome {
    pub order: Order,
    pub status: OutcomeStatus,
    pub reason: Reason,
}

impl OrderOutcome {
    pub fn illegal(order: Order, reason: Reason) -> Self {
        OrderOutcome {
            order,
            status: OutcomeStatus::Illegal,
            reason,
        }
    }

    pub fn failed(order: Order, reason: Reason) -> Self {
        OrderOutcome {
            order,
            status: OutcomeStatus::Failed,
            reason,
        }
    }

    pub fn succeeded(order: Order, reason: Reason) -> Self {
        OrderOutcome {
            order,
            status: OutcomeStatus::Succeeded,
            reason,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Succeeded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::MapBuilder;

    fn unit(nation: u8, from: u16) -> OrderedUnit {
        OrderedUnit {
            nation: NationId(nation),
            kind: UnitKind::Army,
            from: TerritoryId(from),
        }
    }

    #[test]
    fn same_unit_ignores_order_kind() {
        let hold = Order::Hold { unit: unit(0, 3) };
        let mv = Order::Move {
            unit: unit(0, 3),
            to: TerritoryId(4),
            to_coast: None,
        };
        assert!(hold.same_unit(&mv));
    }

    #[test]
    fn same_unit_distinguishes_nation_and_source() {
        let a = Order::Hold { unit: unit(0, 3) };
        assert!(!a.same_unit(&Order::Hold { unit: unit(1, 3) }));
        assert!(!a.same_unit(&Order::Hold { unit: unit(0, 4) }));
    }

    #[test]
    fn invalid_matches_no_unit() {
        let bad = Order::Invalid {
            text: "armies to the sea!".into(),
        };
        assert!(!bad.same_unit(&bad.clone()));
        assert!(bad.unit().is_none());
    }

    #[test]
    fn display_forms() {
        let mut b = MapBuilder::new();
        b.nation(&["Redland"]);
        b.inland("Alpha", &["Alp"], false, &["Beta"]);
        b.inland("Beta", &["Bet"], false, &["Alpha", "Gamma"]);
        b.inland("Gamma", &["Gam"], false, &["Beta"]);
        let map = b.build().unwrap();

        let alpha = map.find_territory("Alpha").unwrap();
        let beta = map.find_territory("Beta").unwrap();
        let gamma = map.find_territory("Gamma").unwrap();
        let red = map.find_nation("Redland").unwrap();
        let u = OrderedUnit {
            nation: red,
            kind: UnitKind::Army,
            from: alpha,
        };

        assert_eq!(Order::Hold { unit: u }.display(&map), "A Alp H");
        assert_eq!(
            Order::Move {
                unit: u,
                to: beta,
                to_coast: None
            }
            .display(&map),
            "A Alp - Bet"
        );
        assert_eq!(
            Order::Support {
                unit: u,
                action: SupportedAction {
                    unit: beta,
                    to: Some(gamma)
                }
            }
            .display(&map),
            "A Alp S Bet - Gam"
        );
        assert_eq!(
            Order::Support {
                unit: u,
                action: SupportedAction {
                    unit: beta,
                    to: None
                }
            }
            .display(&map),
            "A Alp S Bet"
        );
    }
}
