// Enhancement/Derivation Engine: durations, display date ranges, skill
// categories, total experience and section metadata over repaired documents.

pub mod duration;
pub mod engine;
pub mod formatting;
pub mod sections;
pub mod skills;

pub use engine::EnhancementEngine;
