//! Turning advisories into inferences
//!
//! - [`resolver`]: Splits a version universe by a range
//! - [`nearest`]: Pairs vulnerable versions with their nearest fix
//! - [`emitter`]: Runs both per advisory and emits scored inferences

pub mod emitter;
pub mod nearest;
pub mod resolver;
