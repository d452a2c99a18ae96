//! The standard Diplomacy map and its seven nations.
//!
//! 75 territories: 14 inland, 42 coastal, 19 sea; 34 supply centers of
//! which 22 are home centers. Built through the public [`MapBuilder`]
//! surface, so this module doubles as the construction-validation fixture
//! for the whole test suite.
//!
//! Every border is declared from both sides; the builder mirrors nothing.
//! Bulgaria, Spain, and St Petersburg carry split coasts.

use crate::geo::{Map, MapBuilder};

/// Builds the standard map. The data is static and validated, so failure is
/// impossible and the unwrap is part of the contract.
pub fn map() -> Map {
    let mut b = MapBuilder::new();

    b.nation(&["Austria", "Austria-Hungary", "Hungary"])
        .nation(&["England", "Britain"])
        .nation(&["France"])
        .nation(&["Germany"])
        .nation(&["Italy"])
        .nation(&["Russia"])
        .nation(&["Turkey", "Ottomans", "Ottoman Empire"]);

    b.sea(
        "Adriatic Sea",
        &["ADR"],
        &[
            ("Alb", "main"),
            ("Apu", "main"),
            ("Tri", "main"),
            ("Ven", "main"),
        ],
        &["ION"],
    );

    b.sea(
        "Aegean Sea",
        &["AEG"],
        &[
            ("Bul", "south"),
            ("Con", "main"),
            ("Gre", "main"),
            ("Smy", "main"),
        ],
        &["EAS", "ION"],
    );

    b.coastal(
        "Albania",
        &["Alb"],
        &["main"],
        false,
        &["Gre", "Ser", "Tri"],
        &[("main", "Gre", "main"), ("main", "Tri", "main")],
        &[("main", "ADR"), ("main", "ION")],
    );

    b.coastal_home(
        "Ankara",
        &["Ank"],
        &["main"],
        &["Arm", "Con", "Smy"],
        &[("main", "Arm", "main"), ("main", "Con", "main")],
        &[("main", "BLA")],
        "Turkey",
        Some("main"),
    );

    b.coastal(
        "Apulia",
        &["Apu"],
        &["main"],
        false,
        &["Nap", "Rom", "Ven"],
        &[("main", "Nap", "main"), ("main", "Ven", "main")],
        &[("main", "ADR"), ("main", "ION")],
    );

    b.coastal(
        "Armenia",
        &["Arm"],
        &["main"],
        false,
        &["Ank", "Sev", "Smy", "Syr"],
        &[("main", "Ank", "main"), ("main", "Sev", "main")],
        &[("main", "BLA")],
    );

    b.sea(
        "Baltic Sea",
        &["BAL"],
        &[
            ("Ber", "main"),
            ("Den", "main"),
            ("Kie", "main"),
            ("Lvn", "main"),
            ("Pru", "main"),
            ("Swe", "main"),
        ],
        &["BOT"],
    );

    b.sea(
        "Barents Sea",
        &["BAR"],
        &[("Nwy", "main"), ("StP", "north")],
        &["NWG"],
    );

    b.coastal(
        "Belgium",
        &["Bel"],
        &["main"],
        true,
        &["Bur", "Hol", "Pic", "Ruh"],
        &[("main", "Hol", "main"), ("main", "Pic", "main")],
        &[("main", "ENG"), ("main", "NTH")],
    );

    b.coastal_home(
        "Berlin",
        &["Ber"],
        &["main"],
        &["Kie", "Mun", "Pru", "Sil"],
        &[("main", "Kie", "main"), ("main", "Pru", "main")],
        &[("main", "BAL")],
        "Germany",
        None,
    );

    b.sea(
        "Black Sea",
        &["BLA"],
        &[
            ("Ank", "main"),
            ("Arm", "main"),
            ("Bul", "east"),
            ("Con", "main"),
            ("Rum", "main"),
            ("Sev", "main"),
        ],
        &[],
    );

    b.inland(
        "Bohemia",
        &["Boh"],
        false,
        &["Gal", "Mun", "Sil", "Tyr", "Vie"],
    );

    b.coastal_home(
        "Brest",
        &["Bre"],
        &["main"],
        &["Gas", "Par", "Pic"],
        &[("main", "Gas", "main"), ("main", "Pic", "main")],
        &[("main", "ENG"), ("main", "MAO")],
        "France",
        Some("main"),
    );

    b.inland_home(
        "Budapest",
        &["Bud"],
        &["Gal", "Rum", "Ser", "Tri", "Vie"],
        "Austria",
    );

    b.coastal(
        "Bulgaria",
        &["Bul"],
        &["east", "south"],
        true,
        &["Con", "Gre", "Rum", "Ser"],
        &[
            ("east", "Con", "main"),
            ("south", "Con", "main"),
            ("south", "Gre", "main"),
            ("east", "Rum", "main"),
        ],
        &[("south", "AEG"), ("east", "BLA")],
    );

    b.inland(
        "Burgundy",
        &["Bur"],
        false,
        &["Bel", "Gas", "Mar", "Mun", "Par", "Pic", "Ruh"],
    );

    b.coastal(
        "Clyde",
        &["Cly"],
        &["main"],
        false,
        &["Edi", "Lvp"],
        &[("main", "Edi", "main"), ("main", "Lvp", "main")],
        &[("main", "NAO"), ("main", "NWG")],
    );

    b.coastal_home(
        "Constantinople",
        &["Con"],
        &["main"],
        &["Ank", "Bul", "Smy"],
        &[
            ("main", "Ank", "main"),
            ("main", "Bul", "east"),
            ("main", "Bul", "south"),
            ("main", "Smy", "main"),
        ],
        &[("main", "AEG"), ("main", "BLA")],
        "Turkey",
        None,
    );

    b.coastal(
        "Denmark",
        &["Den"],
        &["main"],
        true,
        &["Kie", "Swe"],
        &[("main", "Kie", "main"), ("main", "Swe", "main")],
        &[
            ("main", "BAL"),
            ("main", "HEL"),
            ("main", "NTH"),
            ("main", "SKA"),
        ],
    );

    b.sea(
        "Eastern Mediterranean",
        &["EAS"],
        &[("Smy", "main"), ("Syr", "main")],
        &["AEG", "ION"],
    );

    b.coastal_home(
        "Edinburgh",
        &["Edi"],
        &["main"],
        &["Cly", "Lvp", "Yor"],
        &[("main", "Cly", "main"), ("main", "Yor", "main")],
        &[("main", "NTH"), ("main", "NWG")],
        "England",
        Some("main"),
    );

    b.sea(
        "English Channel",
        &["ENG"],
        &[
            ("Bel", "main"),
            ("Bre", "main"),
            ("Lon", "main"),
            ("Pic", "main"),
            ("Wal", "main"),
        ],
        &["IRI", "MAO", "NTH"],
    );

    b.coastal(
        "Finland",
        &["Fin"],
        &["main"],
        false,
        &["Nwy", "Swe", "StP"],
        &[("main", "Swe", "main"), ("main", "StP", "south")],
        &[("main", "BOT")],
    );

    b.inland(
        "Galicia",
        &["Gal"],
        false,
        &["Boh", "Bud", "Rum", "Sil", "Ukr", "Vie", "War"],
    );

    b.coastal(
        "Gascony",
        &["Gas"],
        &["main"],
        false,
        &["Bre", "Bur", "Mar", "Par", "Spa"],
        &[("main", "Bre", "main"), ("main", "Spa", "north")],
        &[("main", "MAO")],
    );

    b.coastal(
        "Greece",
        &["Gre"],
        &["main"],
        true,
        &["Alb", "Bul", "Ser"],
        &[("main", "Alb", "main"), ("main", "Bul", "south")],
        &[("main", "AEG"), ("main", "ION")],
    );

    b.sea(
        "Gulf of Bothnia",
        &["BOT"],
        &[
            ("Fin", "main"),
            ("Lvn", "main"),
            ("StP", "south"),
            ("Swe", "main"),
        ],
        &["BAL"],
    );

    b.sea(
        "Gulf of Lyon",
        &["LYO"],
        &[
            ("Mar", "main"),
            ("Pie", "main"),
            ("Spa", "south"),
            ("Tus", "main"),
        ],
        &["TYS", "WES"],
    );

    b.sea(
        "Helgoland Bight",
        &["HEL"],
        &[("Den", "main"), ("Hol", "main"), ("Kie", "main")],
        &["NTH"],
    );

    b.coastal(
        "Holland",
        &["Hol"],
        &["main"],
        true,
        &["Bel", "Kie", "Ruh"],
        &[("main", "Bel", "main"), ("main", "Kie", "main")],
        &[("main", "HEL"), ("main", "NTH")],
    );

    b.sea(
        "Ionian Sea",
        &["ION"],
        &[
            ("Alb", "main"),
            ("Apu", "main"),
            ("Gre", "main"),
            ("Nap", "main"),
            ("Tun", "main"),
        ],
        &["ADR", "AEG", "EAS", "TYS"],
    );

    b.sea(
        "Irish Sea",
        &["IRI"],
        &[("Lvp", "main"), ("Wal", "main")],
        &["ENG", "MAO", "NAO"],
    );

    b.coastal_home(
        "Kiel",
        &["Kie"],
        &["main"],
        &["Ber", "Den", "Hol", "Mun", "Ruh"],
        &[
            ("main", "Ber", "main"),
            ("main", "Den", "main"),
            ("main", "Hol", "main"),
        ],
        &[("main", "BAL"), ("main", "HEL")],
        "Germany",
        Some("main"),
    );

    b.coastal_home(
        "Liverpool",
        &["Lvp"],
        &["main"],
        &["Cly", "Edi", "Wal", "Yor"],
        &[("main", "Cly", "main"), ("main", "Wal", "main")],
        &[("main", "IRI"), ("main", "NAO")],
        "England",
        None,
    );

    b.coastal(
        "Livonia",
        &["Lvn"],
        &["main"],
        false,
        &["Mos", "Pru", "StP", "War"],
        &[("main", "Pru", "main"), ("main", "StP", "south")],
        &[("main", "BAL"), ("main", "BOT")],
    );

    b.coastal_home(
        "London",
        &["Lon"],
        &["main"],
        &["Wal", "Yor"],
        &[("main", "Wal", "main"), ("main", "Yor", "main")],
        &[("main", "ENG"), ("main", "NTH")],
        "England",
        Some("main"),
    );

    b.coastal_home(
        "Marseilles",
        &["Mar"],
        &["main"],
        &["Bur", "Gas", "Pie", "Spa"],
        &[("main", "Pie", "main"), ("main", "Spa", "south")],
        &[("main", "LYO")],
        "France",
        None,
    );

    b.sea(
        "Mid-Atlantic Ocean",
        &["MAO", "MID"],
        &[
            ("Bre", "main"),
            ("Gas", "main"),
            ("NAf", "main"),
            ("Por", "main"),
            ("Spa", "north"),
            ("Spa", "south"),
        ],
        &["ENG", "IRI", "NAO", "WES"],
    );

    b.inland_home(
        "Moscow",
        &["Mos"],
        &["Lvn", "Sev", "StP", "Ukr", "War"],
        "Russia",
    );

    b.inland_home(
        "Munich",
        &["Mun"],
        &["Ber", "Boh", "Bur", "Kie", "Ruh", "Sil", "Tyr"],
        "Germany",
    );

    b.coastal_home(
        "Naples",
        &["Nap"],
        &["main"],
        &["Apu", "Rom"],
        &[("main", "Apu", "main"), ("main", "Rom", "main")],
        &[("main", "ION"), ("main", "TYS")],
        "Italy",
        Some("main"),
    );

    b.coastal(
        "North Africa",
        &["NAf"],
        &["main"],
        false,
        &["Tun"],
        &[("main", "Tun", "main")],
        &[("main", "MAO"), ("main", "WES")],
    );

    b.sea(
        "North Atlantic Ocean",
        &["NAO"],
        &[("Cly", "main"), ("Lvp", "main")],
        &["IRI", "MAO", "NWG"],
    );

    b.sea(
        "North Sea",
        &["NTH"],
        &[
            ("Bel", "main"),
            ("Den", "main"),
            ("Edi", "main"),
            ("Hol", "main"),
            ("Lon", "main"),
            ("Nwy", "main"),
            ("Yor", "main"),
        ],
        &["ENG", "HEL", "NWG", "SKA"],
    );

    b.coastal(
        "Norway",
        &["Nwy", "Nry"],
        &["main"],
        true,
        &["Fin", "StP", "Swe"],
        &[("main", "StP", "north"), ("main", "Swe", "main")],
        &[
            ("main", "BAR"),
            ("main", "NTH"),
            ("main", "NWG"),
            ("main", "SKA"),
        ],
    );

    b.sea(
        "Norwegian Sea",
        &["NWG", "NRG"],
        &[("Cly", "main"), ("Edi", "main"), ("Nwy", "main")],
        &["BAR", "NAO", "NTH"],
    );

    b.inland_home("Paris", &["Par"], &["Bre", "Bur", "Gas", "Pic"], "France");

    b.coastal(
        "Picardy",
        &["Pic"],
        &["main"],
        false,
        &["Bel", "Bre", "Bur", "Par"],
        &[("main", "Bel", "main"), ("main", "Bre", "main")],
        &[("main", "ENG")],
    );

    b.coastal(
        "Piedmont",
        &["Pie"],
        &["main"],
        false,
        &["Mar", "Tus", "Tyr", "Ven"],
        &[("main", "Mar", "main"), ("main", "Tus", "main")],
        &[("main", "LYO")],
    );

    b.coastal(
        "Portugal",
        &["Por"],
        &["main"],
        true,
        &["Spa"],
        &[("main", "Spa", "north"), ("main", "Spa", "south")],
        &[("main", "MAO")],
    );

    b.coastal(
        "Prussia",
        &["Pru"],
        &["main"],
        false,
        &["Ber", "Lvn", "Sil", "War"],
        &[("main", "Ber", "main"), ("main", "Lvn", "main")],
        &[("main", "BAL")],
    );

    b.coastal_home(
        "Rome",
        &["Rom"],
        &["main"],
        &["Apu", "Nap", "Tus", "Ven"],
        &[("main", "Nap", "main"), ("main", "Tus", "main")],
        &[("main", "TYS")],
        "Italy",
        None,
    );

    b.inland("Ruhr", &["Ruh"], false, &["Bel", "Bur", "Hol", "Kie", "Mun"]);

    b.coastal(
        "Rumania",
        &["Rum"],
        &["main"],
        true,
        &["Bud", "Bul", "Gal", "Ser", "Sev", "Ukr"],
        &[("main", "Bul", "east"), ("main", "Sev", "main")],
        &[("main", "BLA")],
    );

    b.inland(
        "Serbia",
        &["Ser"],
        true,
        &["Alb", "Bud", "Bul", "Gre", "Rum", "Tri"],
    );

    b.coastal_home(
        "Sevastopol",
        &["Sev"],
        &["main"],
        &["Arm", "Mos", "Rum", "Ukr"],
        &[("main", "Arm", "main"), ("main", "Rum", "main")],
        &[("main", "BLA")],
        "Russia",
        Some("main"),
    );

    b.inland(
        "Silesia",
        &["Sil"],
        false,
        &["Ber", "Boh", "Gal", "Mun", "Pru", "War"],
    );

    b.sea(
        "Skagerrak",
        &["SKA"],
        &[("Den", "main"), ("Nwy", "main"), ("Swe", "main")],
        &["NTH"],
    );

    b.coastal_home(
        "Smyrna",
        &["Smy"],
        &["main"],
        &["Ank", "Arm", "Con", "Syr"],
        &[("main", "Con", "main"), ("main", "Syr", "main")],
        &[("main", "AEG"), ("main", "EAS")],
        "Turkey",
        None,
    );

    b.coastal(
        "Spain",
        &["Spa"],
        &["north", "south"],
        true,
        &["Gas", "Mar", "Por"],
        &[
            ("north", "Gas", "main"),
            ("south", "Mar", "main"),
            ("north", "Por", "main"),
            ("south", "Por", "main"),
        ],
        &[
            ("south", "LYO"),
            ("north", "MAO"),
            ("south", "MAO"),
            ("south", "WES"),
        ],
    );

    b.coastal_home(
        "St Petersburg",
        &["StP"],
        &["north", "south"],
        &["Fin", "Lvn", "Mos", "Nwy"],
        &[
            ("south", "Fin", "main"),
            ("south", "Lvn", "main"),
            ("north", "Nwy", "main"),
        ],
        &[("north", "BAR"), ("south", "BOT")],
        "Russia",
        Some("south"),
    );

    b.coastal(
        "Sweden",
        &["Swe"],
        &["main"],
        true,
        &["Den", "Fin", "Nwy"],
        &[
            ("main", "Den", "main"),
            ("main", "Fin", "main"),
            ("main", "Nwy", "main"),
        ],
        &[("main", "BAL"), ("main", "BOT"), ("main", "SKA")],
    );

    b.coastal(
        "Syria",
        &["Syr"],
        &["main"],
        false,
        &["Arm", "Smy"],
        &[("main", "Smy", "main")],
        &[("main", "EAS")],
    );

    b.coastal_home(
        "Trieste",
        &["Tri"],
        &["main"],
        &["Alb", "Bud", "Ser", "Tyr", "Ven", "Vie"],
        &[("main", "Alb", "main"), ("main", "Ven", "main")],
        &[("main", "ADR")],
        "Austria",
        Some("main"),
    );

    b.coastal(
        "Tunis",
        &["Tun"],
        &["main"],
        true,
        &["NAf"],
        &[("main", "NAf", "main")],
        &[("main", "ION"), ("main", "TYS"), ("main", "WES")],
    );

    b.coastal(
        "Tuscany",
        &["Tus"],
        &["main"],
        false,
        &["Pie", "Rom", "Ven"],
        &[("main", "Pie", "main"), ("main", "Rom", "main")],
        &[("main", "LYO"), ("main", "TYS")],
    );

    b.inland(
        "Tyrolia",
        &["Tyr"],
        false,
        &["Boh", "Mun", "Pie", "Tri", "Ven", "Vie"],
    );

    b.sea(
        "Tyrrhenian Sea",
        &["TYS"],
        &[
            ("Nap", "main"),
            ("Rom", "main"),
            ("Tun", "main"),
            ("Tus", "main"),
        ],
        &["ION", "LYO", "WES"],
    );

    b.inland(
        "Ukraine",
        &["Ukr"],
        false,
        &["Gal", "Mos", "Rum", "Sev", "War"],
    );

    b.coastal_home(
        "Venice",
        &["Ven"],
        &["main"],
        &["Apu", "Pie", "Rom", "Tri", "Tus", "Tyr"],
        &[("main", "Apu", "main"), ("main", "Tri", "main")],
        &[("main", "ADR")],
        "Italy",
        None,
    );

    b.inland_home(
        "Vienna",
        &["Vie"],
        &["Boh", "Bud", "Gal", "Tri", "Tyr"],
        "Austria",
    );

    b.coastal(
        "Wales",
        &["Wal"],
        &["main"],
        false,
        &["Lon", "Lvp", "Yor"],
        &[("main", "Lon", "main"), ("main", "Lvp", "main")],
        &[("main", "ENG"), ("main", "IRI")],
    );

    b.inland_home(
        "Warsaw",
        &["War"],
        &["Gal", "Lvn", "Mos", "Pru", "Sil", "Ukr"],
        "Russia",
    );

    b.sea(
        "Western Mediterranean",
        &["WES"],
        &[("NAf", "main"), ("Spa", "south"), ("Tun", "main")],
        &["LYO", "MAO", "TYS"],
    );

    b.coastal(
        "Yorkshire",
        &["Yor"],
        &["main"],
        false,
        &["Edi", "Lon", "Lvp", "Wal"],
        &[("main", "Edi", "main"), ("main", "Lon", "main")],
        &[("main", "NTH")],
    );

    b.build().expect("the standard map is valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameState, UnitKind};
    use crate::geo::Travel;
    use std::sync::Arc;

    #[test]
    fn counts_add_up() {
        let map = map();
        assert_eq!(map.territory_count(), 75);
        assert_eq!(map.nation_count(), 7);
        assert_eq!(map.supply_centers().count(), 34);
        assert_eq!(map.home_centers().count(), 22);

        let inland = map.territories().filter(|(_, t)| t.is_inland()).count();
        let coastal = map.territories().filter(|(_, t)| t.is_coastal()).count();
        let sea = map.territories().filter(|(_, t)| t.is_sea()).count();
        assert_eq!(inland, 14);
        assert_eq!(coastal, 42);
        assert_eq!(sea, 19);
    }

    #[test]
    fn home_center_counts_per_nation() {
        let map = map();
        let count = |name: &str| {
            let nation = map.find_nation(name).unwrap();
            map.home_centers_of(nation).count()
        };
        assert_eq!(count("Austria"), 3);
        assert_eq!(count("England"), 3);
        assert_eq!(count("France"), 3);
        assert_eq!(count("Germany"), 3);
        assert_eq!(count("Italy"), 3);
        assert_eq!(count("Russia"), 4);
        assert_eq!(count("Turkey"), 3);
    }

    #[test]
    fn split_coast_territories() {
        let map = map();
        for name in ["Bulgaria", "Spain", "St Petersburg"] {
            let t = map.territory(map.find_territory(name).unwrap());
            assert_eq!(t.coasts().len(), 2, "{name} should have two coasts");
        }
        let split = map
            .territories()
            .filter(|(_, t)| t.has_multiple_coasts())
            .count();
        assert_eq!(split, 3);
    }

    #[test]
    fn opening_position_is_the_classic_one() {
        let map = Arc::new(map());
        let state = GameState::opening(Arc::clone(&map));
        assert_eq!(state.units().len(), 22);

        let fleet_count = state
            .units()
            .iter()
            .filter(|u| u.kind == UnitKind::Fleet)
            .count();
        assert_eq!(fleet_count, 8);

        // Spot checks: the famous fleets and armies.
        let unit = |name: &str| *state.unit_in(map.find_territory(name).unwrap()).unwrap();
        assert_eq!(unit("Trieste").kind, UnitKind::Fleet);
        assert_eq!(unit("Marseilles").kind, UnitKind::Army);
        assert_eq!(unit("Smyrna").kind, UnitKind::Army);
        assert_eq!(unit("Ankara").kind, UnitKind::Fleet);

        // The St Petersburg fleet starts on the south coast.
        let stp = unit("St Petersburg");
        assert_eq!(stp.kind, UnitKind::Fleet);
        let stp_t = map.territory(map.find_territory("St Petersburg").unwrap());
        assert_eq!(stp.coast, stp_t.coast_named("south"));
    }

    #[test]
    fn nation_aliases_resolve() {
        let map = map();
        assert_eq!(map.find_nation("Hungary"), map.find_nation("Austria"));
        assert_eq!(map.find_nation("Britain"), map.find_nation("England"));
        assert_eq!(map.find_nation("ottomans"), map.find_nation("Turkey"));
    }

    #[test]
    fn classic_opening_moves_are_legal() {
        let map = map();
        let t = |name: &str| map.find_territory(name).unwrap();
        let travel = |from: &str, to: &str, kind: UnitKind| {
            map.territory(t(from)).can_travel_to(t(to), kind, None, None)
        };

        assert_eq!(travel("Vienna", "Galicia", UnitKind::Army), Travel::CanTravel);
        assert_eq!(travel("London", "North Sea", UnitKind::Fleet), Travel::CanTravel);
        assert_eq!(travel("Kiel", "Denmark", UnitKind::Fleet), Travel::CanTravel);
        // Armies do not walk on water; fleets do not march inland.
        assert_eq!(travel("London", "North Sea", UnitKind::Army), Travel::CannotTravel);
        assert_eq!(travel("Kiel", "Munich", UnitKind::Fleet), Travel::CannotTravel);
    }

    #[test]
    fn split_coast_travel_is_coast_specific() {
        let map = map();
        let t = |name: &str| map.find_territory(name).unwrap();
        let spa = map.territory(t("Spain"));
        let north = spa.coast_named("north").unwrap();
        let south = spa.coast_named("south").unwrap();

        // Spain/south reaches the Gulf of Lyon; Spain/north does not.
        assert_eq!(
            spa.can_travel_to(t("LYO"), UnitKind::Fleet, Some(south), None),
            Travel::CanTravel
        );
        assert_eq!(
            spa.can_travel_to(t("LYO"), UnitKind::Fleet, Some(north), None),
            Travel::CannotTravel
        );

        // Marseilles touches only the south coast, so the coast is inferred.
        let mar = map.territory(t("Marseilles"));
        assert_eq!(
            mar.can_travel_to(t("Spain"), UnitKind::Fleet, None, None),
            Travel::CanTravel
        );
        assert_eq!(
            mar.arrival_coast(t("Spain"), UnitKind::Fleet, None, None),
            Some(south)
        );

        // From the Mid-Atlantic both Spanish coasts are reachable.
        let mao = map.territory(t("MAO"));
        assert_eq!(
            mao.can_travel_to(t("Spain"), UnitKind::Fleet, None, None),
            Travel::CoastNeeded
        );
    }

    #[test]
    fn black_sea_is_landlocked_from_the_aegean() {
        let map = map();
        let t = |name: &str| map.find_territory(name).unwrap();
        // No sea edge joins AEG and BLA; fleets must pass Constantinople.
        assert_eq!(
            map.territory(t("AEG"))
                .can_travel_to(t("BLA"), UnitKind::Fleet, None, None),
            Travel::CannotTravel
        );
        assert_eq!(
            map.territory(t("Con"))
                .can_travel_to(t("BLA"), UnitKind::Fleet, None, None),
            Travel::CanTravel
        );
    }
}
