//! Adjudication properties driven through the public API on the standard
//! map: determinism under input permutation, the support/standoff rules,
//! dislodgement bookkeeping, and outcome serialization.

use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use entente::game::{GameState, Phase, RetreatContext, Unit, UnitKind};
use entente::geo::TerritoryId;
use entente::judge::{adjudicate, Resolution};
use entente::order::{Order, OrderOutcome, OrderedUnit, OutcomeStatus, Reason, SupportedAction};
use entente::standard;

fn state_with(units: &[(&str, &str, UnitKind)]) -> GameState {
    let map = Arc::new(standard::map());
    let opening = GameState::opening(Arc::clone(&map));
    let placed = units
        .iter()
        .map(|(nation, territory, kind)| Unit {
            territory: map.find_territory(territory).unwrap(),
            coast: None,
            kind: *kind,
            nation: map.find_nation(nation).unwrap(),
        })
        .collect();
    GameState::new(
        Arc::clone(&map),
        1901,
        Phase::SpringOrders,
        placed,
        opening.supply_centers().to_vec(),
        RetreatContext::none(),
    )
}

fn t(state: &GameState, name: &str) -> TerritoryId {
    state.map().find_territory(name).unwrap()
}

fn ordered(state: &GameState, nation: &str, from: &str) -> OrderedUnit {
    let from = t(state, from);
    OrderedUnit {
        nation: state.map().find_nation(nation).unwrap(),
        kind: state.unit_in(from).unwrap().kind,
        from,
    }
}

fn mv(state: &GameState, nation: &str, from: &str, to: &str) -> Order {
    Order::Move {
        unit: ordered(state, nation, from),
        to: t(state, to),
        to_coast: None,
    }
}

fn support_move(state: &GameState, nation: &str, from: &str, at: &str, to: &str) -> Order {
    Order::Support {
        unit: ordered(state, nation, from),
        action: SupportedAction {
            unit: t(state, at),
            to: Some(t(state, to)),
        },
    }
}

fn support_hold(state: &GameState, nation: &str, from: &str, at: &str) -> Order {
    Order::Support {
        unit: ordered(state, nation, from),
        action: SupportedAction {
            unit: t(state, at),
            to: None,
        },
    }
}

fn convoy(state: &GameState, nation: &str, fleet: &str, from: &str, to: &str) -> Order {
    Order::Convoy {
        unit: ordered(state, nation, fleet),
        from: t(state, from),
        to: t(state, to),
    }
}

fn status_of(state: &GameState, res: &Resolution, territory: &str) -> OutcomeStatus {
    res.outcome_for(t(state, territory)).unwrap().status
}

/// The fingerprint of an outcome, independent of its position in the batch.
fn fingerprint(state: &GameState, outcome: &OrderOutcome) -> (String, OutcomeStatus, Reason) {
    (
        outcome.order.display(state.map()),
        outcome.status,
        outcome.reason,
    )
}

#[test]
fn adjudication_is_input_order_independent() {
    // A busy board: supports, cuts, a convoy under attack, a rotation, and
    // a contested standoff, all at once.
    let state = state_with(&[
        ("Austria", "Vienna", UnitKind::Army),
        ("Austria", "Budapest", UnitKind::Army),
        ("Russia", "Warsaw", UnitKind::Army),
        ("Russia", "Ukraine", UnitKind::Army),
        ("Germany", "Bohemia", UnitKind::Army),
        ("Germany", "Munich", UnitKind::Army),
        ("Germany", "Silesia", UnitKind::Army),
        ("England", "London", UnitKind::Army),
        ("England", "North Sea", UnitKind::Fleet),
        ("France", "English Channel", UnitKind::Fleet),
        ("France", "Belgium", UnitKind::Fleet),
        ("Turkey", "Bulgaria", UnitKind::Army),
        ("Turkey", "Constantinople", UnitKind::Army),
    ]);
    let orders = vec![
        mv(&state, "Austria", "Vienna", "Galicia"),
        support_move(&state, "Austria", "Budapest", "Vienna", "Galicia"),
        mv(&state, "Russia", "Warsaw", "Galicia"),
        support_move(&state, "Russia", "Ukraine", "Warsaw", "Galicia"),
        mv(&state, "Germany", "Bohemia", "Munich"),
        mv(&state, "Germany", "Munich", "Silesia"),
        mv(&state, "Germany", "Silesia", "Bohemia"),
        mv(&state, "England", "London", "Norway"),
        convoy(&state, "England", "North Sea", "London", "Norway"),
        mv(&state, "France", "English Channel", "North Sea"),
        support_move(&state, "France", "Belgium", "English Channel", "North Sea"),
        mv(&state, "Turkey", "Bulgaria", "Serbia"),
        support_hold(&state, "Turkey", "Constantinople", "Bulgaria"),
    ];

    let baseline = adjudicate(&state, &orders);
    let mut expected: Vec<_> = baseline
        .outcomes
        .iter()
        .map(|o| fingerprint(&state, o))
        .collect();
    expected.sort_by(|a, b| a.0.cmp(&b.0));

    let mut standoffs = baseline.retreats.standoffs.clone();
    standoffs.sort();
    let mut dislodged: Vec<_> = baseline
        .retreats
        .dislodged
        .iter()
        .map(|u| u.territory)
        .collect();
    dislodged.sort();

    let mut rng = SmallRng::seed_from_u64(0x1914);
    let mut shuffled = orders.clone();
    for _ in 0..32 {
        shuffled.shuffle(&mut rng);
        let res = adjudicate(&state, &shuffled);

        let mut got: Vec<_> = res.outcomes.iter().map(|o| fingerprint(&state, o)).collect();
        got.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(got, expected, "outcomes changed under permutation");

        let mut got_standoffs = res.retreats.standoffs.clone();
        got_standoffs.sort();
        assert_eq!(got_standoffs, standoffs);

        let mut got_dislodged: Vec<_> =
            res.retreats.dislodged.iter().map(|u| u.territory).collect();
        got_dislodged.sort();
        assert_eq!(got_dislodged, dislodged);
    }
}

#[test]
fn equal_moves_stand_off_until_one_is_supported() {
    let state = state_with(&[
        ("Austria", "Vienna", UnitKind::Army),
        ("Russia", "Warsaw", UnitKind::Army),
        ("Austria", "Budapest", UnitKind::Army),
    ]);

    // Unsupported 1 vs 1 into empty Galicia: both fail, standoff recorded.
    let res = adjudicate(
        &state,
        &[
            mv(&state, "Austria", "Vienna", "Galicia"),
            mv(&state, "Russia", "Warsaw", "Galicia"),
        ],
    );
    assert_eq!(status_of(&state, &res, "Vienna"), OutcomeStatus::Failed);
    assert_eq!(status_of(&state, &res, "Warsaw"), OutcomeStatus::Failed);
    assert_eq!(res.retreats.standoffs, vec![t(&state, "Galicia")]);

    // One supporting order tips it.
    let res = adjudicate(
        &state,
        &[
            mv(&state, "Austria", "Vienna", "Galicia"),
            support_move(&state, "Austria", "Budapest", "Vienna", "Galicia"),
            mv(&state, "Russia", "Warsaw", "Galicia"),
        ],
    );
    assert_eq!(status_of(&state, &res, "Vienna"), OutcomeStatus::Succeeded);
    assert_eq!(status_of(&state, &res, "Warsaw"), OutcomeStatus::Failed);
    assert!(res.retreats.standoffs.is_empty());
}

#[test]
fn cut_support_resolves_the_action_as_unsupported() {
    let state = state_with(&[
        ("Austria", "Budapest", UnitKind::Army),
        ("Austria", "Serbia", UnitKind::Army),
        ("Russia", "Rumania", UnitKind::Army),
        ("Turkey", "Bulgaria", UnitKind::Army),
    ]);
    let res = adjudicate(
        &state,
        &[
            support_move(&state, "Austria", "Serbia", "Budapest", "Rumania"),
            mv(&state, "Austria", "Budapest", "Rumania"),
            mv(&state, "Turkey", "Bulgaria", "Serbia"),
        ],
    );
    // Bulgaria's attack cuts Serbia's support; Budapest bounces 1 vs 1.
    assert_eq!(
        res.outcome_for(t(&state, "Serbia")).unwrap().reason,
        Reason::SupportCut
    );
    assert_eq!(status_of(&state, &res, "Budapest"), OutcomeStatus::Failed);
}

#[test]
fn circular_rotation_resolves_simultaneously() {
    let state = state_with(&[
        ("Austria", "Trieste", UnitKind::Army),
        ("Italy", "Venice", UnitKind::Army),
        ("Austria", "Tyrolia", UnitKind::Army),
    ]);
    let res = adjudicate(
        &state,
        &[
            mv(&state, "Austria", "Trieste", "Venice"),
            mv(&state, "Italy", "Venice", "Tyrolia"),
            mv(&state, "Austria", "Tyrolia", "Trieste"),
        ],
    );
    for territory in ["Trieste", "Venice", "Tyrolia"] {
        assert_eq!(
            status_of(&state, &res, territory),
            OutcomeStatus::Succeeded,
            "{territory} should rotate"
        );
    }
    assert!(res.retreats.dislodged.is_empty());
}

#[test]
fn dislodgement_bans_the_attackers_origin_for_retreats() {
    let state = state_with(&[
        ("Austria", "Tyrolia", UnitKind::Army),
        ("Austria", "Trieste", UnitKind::Army),
        ("Italy", "Venice", UnitKind::Army),
    ]);
    let res = adjudicate(
        &state,
        &[
            mv(&state, "Austria", "Tyrolia", "Venice"),
            support_move(&state, "Austria", "Trieste", "Tyrolia", "Venice"),
        ],
    );
    let venice = t(&state, "Venice");
    let tyrolia = t(&state, "Tyrolia");
    assert_eq!(res.retreats.dislodged.len(), 1);
    assert_eq!(res.retreats.dislodged[0].territory, venice);
    let banned: Vec<_> = res.retreats.banned_origins(venice).collect();
    assert_eq!(banned, vec![tyrolia]);
}

#[test]
fn convoyed_attack_still_cuts_inland_support() {
    // A convoyed army landing in Picardy cuts Picardy's support like any
    // other attack.
    let state = state_with(&[
        ("England", "London", UnitKind::Army),
        ("England", "English Channel", UnitKind::Fleet),
        ("France", "Picardy", UnitKind::Army),
        ("France", "Belgium", UnitKind::Army),
    ]);
    let res = adjudicate(
        &state,
        &[
            mv(&state, "England", "London", "Picardy"),
            convoy(&state, "England", "English Channel", "London", "Picardy"),
            support_hold(&state, "France", "Picardy", "Belgium"),
        ],
    );
    // The landing bounces off the defender but the support is still cut.
    assert_eq!(status_of(&state, &res, "London"), OutcomeStatus::Failed);
    assert_eq!(
        res.outcome_for(t(&state, "Picardy")).unwrap().reason,
        Reason::SupportCut
    );
}

#[test]
fn illegal_orders_leave_the_rest_of_the_batch_intact() {
    let state = state_with(&[
        ("Austria", "Vienna", UnitKind::Army),
        ("Russia", "Warsaw", UnitKind::Army),
    ]);
    let res = adjudicate(
        &state,
        &[
            Order::Invalid {
                text: "armies, assemble".into(),
            },
            mv(&state, "Austria", "Vienna", "Budapest"),
            mv(&state, "Russia", "Warsaw", "Galicia"),
            // Russia orders a unit it does not have.
            Order::Move {
                unit: OrderedUnit {
                    nation: state.map().find_nation("Russia").unwrap(),
                    kind: UnitKind::Army,
                    from: t(&state, "Vienna"),
                },
                to: t(&state, "Galicia"),
                to_coast: None,
            },
        ],
    );
    assert_eq!(res.outcomes[0].status, OutcomeStatus::Illegal);
    assert_eq!(res.outcomes[3].status, OutcomeStatus::Illegal);
    assert_eq!(res.outcomes[1].status, OutcomeStatus::Succeeded);
    assert_eq!(res.outcomes[2].status, OutcomeStatus::Succeeded);
}

#[test]
fn outcomes_serialize_and_round_trip() {
    let state = state_with(&[
        ("Austria", "Vienna", UnitKind::Army),
        ("Russia", "Warsaw", UnitKind::Army),
    ]);
    let res = adjudicate(
        &state,
        &[
            mv(&state, "Austria", "Vienna", "Galicia"),
            mv(&state, "Russia", "Warsaw", "Galicia"),
        ],
    );

    let json = serde_json::to_string(&res.outcomes).unwrap();
    let back: Vec<OrderOutcome> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, res.outcomes);

    let json = serde_json::to_string(&res.retreats).unwrap();
    let back: RetreatContext = serde_json::from_str(&json).unwrap();
    assert_eq!(back, res.retreats);
}

#[test]
fn outcome_reasons_read_as_sentences() {
    let state = state_with(&[
        ("Austria", "Vienna", UnitKind::Army),
        ("Russia", "Budapest", UnitKind::Army),
    ]);
    let res = adjudicate(
        &state,
        &[
            mv(&state, "Austria", "Vienna", "Budapest"),
            // Hold implied for Budapest.
        ],
    );
    let outcome = res.outcome_for(t(&state, "Vienna")).unwrap();
    assert_eq!(outcome.status, OutcomeStatus::Failed);
    assert!(!outcome.reason.to_string().is_empty());
    assert_eq!(outcome.order.display(state.map()), "A Vie - Bud");
}
