//! Units, supply centers, and immutable game-state snapshots.

pub mod state;
pub mod unit;

pub use state::{GameState, GameSupplyCenter, Invasion, Phase, RetreatContext};
pub use unit::{Unit, UnitKind};
