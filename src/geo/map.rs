//! The map catalog and its validating builder.
//!
//! A [`Map`] is built exactly once from declarative territory specs and is
//! immutable afterward; games share it by reference. Construction is
//! two-phase: specs name their connections as strings, and [`MapBuilder::build`]
//! resolves every name to an arena handle before validating the whole graph.
//! Any violation aborts the build — a half-built map is unobtainable.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::UnitKind;
use crate::geo::territory::{
    Center, CoastId, CoastalEdge, Home, SeaEdge, ShoreEdge, Terrain, Territory, TerritoryId,
};

/// Handle to a nation in a map's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NationId(pub(crate) u8);

impl NationId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A playable nation: a set of alias names and nothing else.
#[derive(Debug, Clone)]
pub struct Nation {
    names: Vec<Box<str>>,
}

impl Nation {
    /// The canonical display name (the first alias).
    pub fn name(&self) -> &str {
        &self.names[0]
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|n| n.as_ref())
    }
}

/// A validation failure during map construction.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("nation name {0:?} is used more than once")]
    DuplicateNation(String),
    #[error("territory name or abbreviation {0:?} is used more than once")]
    DuplicateTerritory(String),
    #[error("territory {0:?} has no abbreviations")]
    NoAbbreviations(String),
    #[error("unknown nation {nation:?} on home center {territory:?}")]
    UnknownNation { territory: String, nation: String },
    #[error("unknown territory {connection:?} in the connections of {territory:?}")]
    UnknownConnection { territory: String, connection: String },
    #[error("{destination:?} cannot be a {connection} connection of {territory:?}: it is not {expected}")]
    TerrainMismatch {
        territory: String,
        destination: String,
        connection: &'static str,
        expected: &'static str,
    },
    #[error("coast {coast:?} does not exist on {territory:?}")]
    UnknownCoast { territory: String, coast: String },
    #[error("coastal territory {0:?} must declare at least one coast")]
    NoCoasts(String),
    #[error("the single coast of {0:?} must be named \"main\"")]
    SingleCoastNotMain(String),
    #[error("start coast {coast:?} does not exist on home center {territory:?}")]
    BadStartCoast { territory: String, coast: String },
}

/// An immutable catalog of nations and territories.
///
/// Built once by [`MapBuilder`], then shared read-only by every game that
/// plays on it.
#[derive(Debug)]
pub struct Map {
    nations: Vec<Nation>,
    territories: Vec<Territory>,
    index: HashMap<String, TerritoryId>,
}

impl Map {
    pub fn nations(&self) -> impl Iterator<Item = (NationId, &Nation)> {
        self.nations
            .iter()
            .enumerate()
            .map(|(i, n)| (NationId(i as u8), n))
    }

    pub fn nation(&self, id: NationId) -> &Nation {
        &self.nations[id.index()]
    }

    pub fn nation_count(&self) -> usize {
        self.nations.len()
    }

    pub fn territories(&self) -> impl Iterator<Item = (TerritoryId, &Territory)> {
        self.territories
            .iter()
            .enumerate()
            .map(|(i, t)| (TerritoryId(i as u16), t))
    }

    pub fn territory(&self, id: TerritoryId) -> &Territory {
        &self.territories[id.index()]
    }

    pub fn territory_count(&self) -> usize {
        self.territories.len()
    }

    /// Finds a territory by name or abbreviation, case-insensitively.
    ///
    /// This is the hand-off point for the external order parser; fuzzy
    /// matching beyond exact names is that layer's business.
    pub fn find_territory(&self, name: &str) -> Option<TerritoryId> {
        self.index.get(&name.to_ascii_lowercase()).copied()
    }

    /// Finds a nation by any of its alias names, case-insensitively.
    pub fn find_nation(&self, name: &str) -> Option<NationId> {
        self.nations().find_map(|(id, nation)| {
            nation
                .names()
                .any(|n| n.eq_ignore_ascii_case(name))
                .then_some(id)
        })
    }

    /// All supply-center territories.
    pub fn supply_centers(&self) -> impl Iterator<Item = TerritoryId> + '_ {
        self.territories()
            .filter(|(_, t)| t.is_supply_center())
            .map(|(id, _)| id)
    }

    /// All home supply centers, with their home data.
    pub fn home_centers(&self) -> impl Iterator<Item = (TerritoryId, Home)> + '_ {
        self.territories()
            .filter_map(|(id, t)| t.home().map(|h| (id, h)))
    }

    /// The given nation's home supply centers.
    pub fn home_centers_of(&self, nation: NationId) -> impl Iterator<Item = TerritoryId> + '_ {
        self.home_centers()
            .filter(move |(_, home)| home.nation == nation)
            .map(|(id, _)| id)
    }
}

/// Declarative spec for one territory, with connections still as names.
struct TerritorySpec {
    name: Box<str>,
    abbreviations: Vec<Box<str>>,
    terrain: TerrainSpec,
    supply_center: bool,
    home: Option<HomeSpec>,
}

struct HomeSpec {
    nation: Box<str>,
    start_coast: Option<Box<str>>,
}

enum TerrainSpec {
    Inland {
        land: Vec<Box<str>>,
    },
    Coastal {
        coasts: Vec<Box<str>>,
        land: Vec<Box<str>>,
        coastal: Vec<(Box<str>, Box<str>, Box<str>)>,
        sea: Vec<(Box<str>, Box<str>)>,
    },
    Sea {
        shores: Vec<(Box<str>, Box<str>)>,
        seas: Vec<Box<str>>,
    },
}

/// Builder for custom game maps.
///
/// Territories are declared with their connections as names; [`build`]
/// resolves and validates everything at once.
///
/// [`build`]: MapBuilder::build
#[derive(Default)]
pub struct MapBuilder {
    nations: Vec<Vec<Box<str>>>,
    specs: Vec<TerritorySpec>,
}

impl MapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a nation known by the given alias names (first is canonical).
    pub fn nation(&mut self, names: &[&str]) -> &mut Self {
        self.nations.push(names.iter().map(|n| (*n).into()).collect());
        self
    }

    /// Adds an inland territory.
    pub fn inland(
        &mut self,
        name: &str,
        abbreviations: &[&str],
        supply_center: bool,
        land: &[&str],
    ) -> &mut Self {
        self.specs.push(TerritorySpec {
            name: name.into(),
            abbreviations: boxed(abbreviations),
            terrain: TerrainSpec::Inland { land: boxed(land) },
            supply_center,
            home: None,
        });
        self
    }

    /// Adds an inland territory as a nation's home supply center.
    /// Its starting unit is an army.
    pub fn inland_home(
        &mut self,
        name: &str,
        abbreviations: &[&str],
        land: &[&str],
        nation: &str,
    ) -> &mut Self {
        self.specs.push(TerritorySpec {
            name: name.into(),
            abbreviations: boxed(abbreviations),
            terrain: TerrainSpec::Inland { land: boxed(land) },
            supply_center: true,
            home: Some(HomeSpec {
                nation: nation.into(),
                start_coast: None,
            }),
        });
        self
    }

    /// Adds a coastal territory.
    ///
    /// `coastal` entries are `(start coast, destination, destination coast)`;
    /// `sea` entries are `(start coast, destination)`.
    pub fn coastal(
        &mut self,
        name: &str,
        abbreviations: &[&str],
        coasts: &[&str],
        supply_center: bool,
        land: &[&str],
        coastal: &[(&str, &str, &str)],
        sea: &[(&str, &str)],
    ) -> &mut Self {
        self.specs.push(TerritorySpec {
            name: name.into(),
            abbreviations: boxed(abbreviations),
            terrain: coastal_spec(coasts, land, coastal, sea),
            supply_center,
            home: None,
        });
        self
    }

    /// Adds a coastal territory as a nation's home supply center.
    ///
    /// When `start_coast` is given the starting unit is a fleet on that
    /// coast; otherwise it is an army.
    #[allow(clippy::too_many_arguments)]
    pub fn coastal_home(
        &mut self,
        name: &str,
        abbreviations: &[&str],
        coasts: &[&str],
        land: &[&str],
        coastal: &[(&str, &str, &str)],
        sea: &[(&str, &str)],
        nation: &str,
        start_coast: Option<&str>,
    ) -> &mut Self {
        self.specs.push(TerritorySpec {
            name: name.into(),
            abbreviations: boxed(abbreviations),
            terrain: coastal_spec(coasts, land, coastal, sea),
            supply_center: true,
            home: Some(HomeSpec {
                nation: nation.into(),
                start_coast: start_coast.map(Into::into),
            }),
        });
        self
    }

    /// Adds a sea territory. `shores` entries are `(destination, arrival coast)`.
    pub fn sea(
        &mut self,
        name: &str,
        abbreviations: &[&str],
        shores: &[(&str, &str)],
        seas: &[&str],
    ) -> &mut Self {
        self.specs.push(TerritorySpec {
            name: name.into(),
            abbreviations: boxed(abbreviations),
            terrain: TerrainSpec::Sea {
                shores: shores
                    .iter()
                    .map(|(t, c)| ((*t).into(), (*c).into()))
                    .collect(),
                seas: boxed(seas),
            },
            supply_center: false,
            home: None,
        });
        self
    }

    /// Resolves names, validates the graph, and produces the map.
    pub fn build(&self) -> Result<Map, MapError> {
        let nations = self.build_nations()?;
        let index = self.build_index()?;

        let resolve = |territory: &str, connection: &str| -> Result<TerritoryId, MapError> {
            index
                .get(&connection.to_ascii_lowercase())
                .copied()
                .ok_or_else(|| MapError::UnknownConnection {
                    territory: territory.to_string(),
                    connection: connection.to_string(),
                })
        };

        let mut territories = Vec::with_capacity(self.specs.len());
        for spec in &self.specs {
            territories.push(self.resolve_spec(spec, &nations, &resolve)?);
        }

        let map = Map {
            nations,
            territories,
            index,
        };
        map_validate(&map)?;
        Ok(map)
    }

    fn build_nations(&self) -> Result<Vec<Nation>, MapError> {
        let mut seen: Vec<String> = Vec::new();
        for names in &self.nations {
            for name in names {
                let lower = name.to_ascii_lowercase();
                if seen.contains(&lower) {
                    return Err(MapError::DuplicateNation(name.to_string()));
                }
                seen.push(lower);
            }
        }
        Ok(self
            .nations
            .iter()
            .map(|names| Nation {
                names: names.clone(),
            })
            .collect())
    }

    /// Names and abbreviations share one case-insensitive namespace.
    fn build_index(&self) -> Result<HashMap<String, TerritoryId>, MapError> {
        let mut index = HashMap::new();
        for (i, spec) in self.specs.iter().enumerate() {
            if spec.abbreviations.is_empty() {
                return Err(MapError::NoAbbreviations(spec.name.to_string()));
            }
            let id = TerritoryId(i as u16);
            for key in std::iter::once(&spec.name).chain(&spec.abbreviations) {
                if index.insert(key.to_ascii_lowercase(), id).is_some() {
                    return Err(MapError::DuplicateTerritory(key.to_string()));
                }
            }
        }
        Ok(index)
    }

    fn resolve_spec(
        &self,
        spec: &TerritorySpec,
        nations: &[Nation],
        resolve: &impl Fn(&str, &str) -> Result<TerritoryId, MapError>,
    ) -> Result<Territory, MapError> {
        let terrain = match &spec.terrain {
            TerrainSpec::Inland { land } => Terrain::Inland {
                land: land
                    .iter()
                    .map(|t| resolve(&spec.name, t))
                    .collect::<Result<_, _>>()?,
            },
            TerrainSpec::Coastal {
                coasts,
                land,
                coastal,
                sea,
            } => {
                let coasts = self.check_coasts(&spec.name, coasts)?;
                let own_coast = |name: &str| -> Result<CoastId, MapError> {
                    coast_in(&coasts, name).ok_or_else(|| MapError::UnknownCoast {
                        territory: spec.name.to_string(),
                        coast: name.to_string(),
                    })
                };
                let coastal = coastal
                    .iter()
                    .map(|(from, to, to_coast)| {
                        let to_id = resolve(&spec.name, to)?;
                        Ok(CoastalEdge {
                            from_coast: own_coast(from)?,
                            to: to_id,
                            to_coast: self.dest_coast(to, to_id, to_coast)?,
                        })
                    })
                    .collect::<Result<_, MapError>>()?;
                let sea = sea
                    .iter()
                    .map(|(from, to)| {
                        Ok(SeaEdge {
                            from_coast: own_coast(from)?,
                            to: resolve(&spec.name, to)?,
                        })
                    })
                    .collect::<Result<_, MapError>>()?;
                Terrain::Coastal {
                    coasts,
                    land: land
                        .iter()
                        .map(|t| resolve(&spec.name, t))
                        .collect::<Result<_, _>>()?,
                    coastal,
                    sea,
                }
            }
            TerrainSpec::Sea { shores, seas } => Terrain::Sea {
                shores: shores
                    .iter()
                    .map(|(to, to_coast)| {
                        let to_id = resolve(&spec.name, to)?;
                        Ok(ShoreEdge {
                            to: to_id,
                            to_coast: self.dest_coast(to, to_id, to_coast)?,
                        })
                    })
                    .collect::<Result<_, MapError>>()?,
                seas: seas
                    .iter()
                    .map(|t| resolve(&spec.name, t))
                    .collect::<Result<_, _>>()?,
            },
        };

        let home = match &spec.home {
            None => None,
            Some(home_spec) => Some(self.resolve_home(spec, home_spec, nations, &terrain)?),
        };
        let center = if spec.supply_center {
            Some(Center { home })
        } else {
            None
        };

        Ok(Territory {
            name: spec.name.clone(),
            abbreviations: spec.abbreviations.clone(),
            terrain,
            center,
        })
    }

    fn check_coasts(
        &self,
        territory: &str,
        coasts: &[Box<str>],
    ) -> Result<Vec<Box<str>>, MapError> {
        match coasts.len() {
            0 => Err(MapError::NoCoasts(territory.to_string())),
            1 if !coasts[0].eq_ignore_ascii_case("main") => {
                Err(MapError::SingleCoastNotMain(territory.to_string()))
            }
            _ => Ok(coasts.iter().map(|c| c.to_ascii_lowercase().into()).collect()),
        }
    }

    /// Resolves a destination coast name against the destination's own spec.
    fn dest_coast(
        &self,
        dest_name: &str,
        dest: TerritoryId,
        coast: &str,
    ) -> Result<CoastId, MapError> {
        let spec = &self.specs[dest.index()];
        let coasts = match &spec.terrain {
            TerrainSpec::Coastal { coasts, .. } => coasts.as_slice(),
            // Terrain mismatches are reported by the whole-graph validation
            // pass; any coast id will do for the doomed edge.
            _ => return Ok(CoastId(0)),
        };
        coasts
            .iter()
            .position(|c| c.eq_ignore_ascii_case(coast))
            .map(|i| CoastId(i as u8))
            .ok_or_else(|| MapError::UnknownCoast {
                territory: dest_name.to_string(),
                coast: coast.to_string(),
            })
    }

    fn resolve_home(
        &self,
        spec: &TerritorySpec,
        home: &HomeSpec,
        nations: &[Nation],
        terrain: &Terrain,
    ) -> Result<Home, MapError> {
        let nation = nations
            .iter()
            .position(|n| n.names().any(|name| name.eq_ignore_ascii_case(&home.nation)))
            .map(|i| NationId(i as u8))
            .ok_or_else(|| MapError::UnknownNation {
                territory: spec.name.to_string(),
                nation: home.nation.to_string(),
            })?;

        let start_coast = match &home.start_coast {
            None => None,
            Some(coast) => {
                let coasts = match terrain {
                    Terrain::Coastal { coasts, .. } => coasts.as_slice(),
                    _ => &[],
                };
                Some(
                    coast_in(coasts, coast).ok_or_else(|| MapError::BadStartCoast {
                        territory: spec.name.to_string(),
                        coast: coast.to_string(),
                    })?,
                )
            }
        };

        Ok(Home {
            nation,
            start_unit: if start_coast.is_some() {
                UnitKind::Fleet
            } else {
                UnitKind::Army
            },
            start_coast,
        })
    }
}

fn boxed(items: &[&str]) -> Vec<Box<str>> {
    items.iter().map(|s| (*s).into()).collect()
}

fn coastal_spec(
    coasts: &[&str],
    land: &[&str],
    coastal: &[(&str, &str, &str)],
    sea: &[(&str, &str)],
) -> TerrainSpec {
    TerrainSpec::Coastal {
        coasts: boxed(coasts),
        land: boxed(land),
        coastal: coastal
            .iter()
            .map(|(a, b, c)| ((*a).into(), (*b).into(), (*c).into()))
            .collect(),
        sea: sea.iter().map(|(a, b)| ((*a).into(), (*b).into())).collect(),
    }
}

fn coast_in(coasts: &[Box<str>], name: &str) -> Option<CoastId> {
    coasts
        .iter()
        .position(|c| c.eq_ignore_ascii_case(name))
        .map(|i| CoastId(i as u8))
}

/// Whole-graph validation: every connection's destination terrain must match
/// what the connection class expects.
fn map_validate(map: &Map) -> Result<(), MapError> {
    let mismatch = |territory: &Territory,
                    dest: TerritoryId,
                    connection: &'static str,
                    expected: &'static str| {
        MapError::TerrainMismatch {
            territory: territory.name().to_string(),
            destination: map.territory(dest).name().to_string(),
            connection,
            expected,
        }
    };

    for (_, territory) in map.territories() {
        match territory.terrain() {
            Terrain::Inland { land } => {
                for &dest in land {
                    if map.territory(dest).is_sea() {
                        return Err(mismatch(territory, dest, "land", "inland or coastal"));
                    }
                }
            }
            Terrain::Coastal {
                land, coastal, sea, ..
            } => {
                for &dest in land {
                    if map.territory(dest).is_sea() {
                        return Err(mismatch(territory, dest, "land", "inland or coastal"));
                    }
                }
                for edge in coastal {
                    if !map.territory(edge.to).is_coastal() {
                        return Err(mismatch(territory, edge.to, "coastal", "coastal"));
                    }
                }
                for edge in sea {
                    if !map.territory(edge.to).is_sea() {
                        return Err(mismatch(territory, edge.to, "sea", "a sea"));
                    }
                }
            }
            Terrain::Sea { shores, seas } => {
                for edge in shores {
                    if !map.territory(edge.to).is_coastal() {
                        return Err(mismatch(territory, edge.to, "shore", "coastal"));
                    }
                }
                for &dest in seas {
                    if !map.territory(dest).is_sea() {
                        return Err(mismatch(territory, dest, "sea", "a sea"));
                    }
                }
            }
        }
    }
    Ok(())
}
