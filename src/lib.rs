//! Entente: a Diplomacy adjudication core.
//!
//! Exposes the validated territory graph and map catalog ([`geo`]), the
//! unit and game-state model ([`game`]), the order vocabulary ([`order`]),
//! the turn resolver and phase machine ([`judge`]), and the standard map
//! ([`standard`]). Parsing free-text orders and running game sessions are
//! the callers' business; everything here works on well-typed handles.

pub mod game;
pub mod geo;
pub mod judge;
pub mod order;
pub mod standard;
