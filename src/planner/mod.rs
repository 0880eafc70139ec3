//! Meal-plan generation core: filtering, weekly assembly, nutrient and
//! grocery derivation. No I/O happens here; data comes in through the
//! provider traits.

pub mod assemble;
pub mod error;
pub mod filter;
pub mod grocery;
pub mod lenient;
pub mod model;
pub mod normalize;
pub mod nutrients;
pub mod providers;

pub use error::PlanError;
