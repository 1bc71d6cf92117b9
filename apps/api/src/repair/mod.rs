// Defaulting & Repair Engine: guarantees section presence and shape, filters
// corrupt entries and enforces the non-empty name invariant.

pub mod defaults;
pub mod engine;
pub mod predicates;

pub use engine::RepairEngine;
