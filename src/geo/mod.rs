//! Geography: territories, coasts, travel legality, and the map catalog.

pub mod map;
pub mod territory;

pub use map::{Map, MapBuilder, MapError, Nation, NationId};
pub use territory::{
    Center, CoastId, CoastalEdge, Home, SeaEdge, ShoreEdge, Terrain, Territory, TerritoryId,
    Travel,
};
