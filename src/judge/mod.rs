//! Turn adjudication: order resolution, retreats, winter adjustments, and
//! the phase state machine.

pub mod build;
pub mod phase;
pub mod resolve;
pub mod retreat;

pub use build::{
    AdjustReason, Adjustment, AdjustmentOutcome, WinterResolution, resolve_adjustments,
};
pub use phase::{advance_builds, advance_orders, advance_retreats};
pub use resolve::{Resolution, adjudicate};
pub use retreat::{RetreatResolution, resolve_retreats};
