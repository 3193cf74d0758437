//! Canonical clip model and the two ways of producing it.
//!
//! - `builder` - maps tape-shaped clip sources to canonical clips
//! - `timeline` - synthesizes dance/karaoke clips from a combined timeline

mod builder;
mod clip;
mod ids;
mod timeline;

pub use builder::{ClipBuilder, effect_type_for, move_type_for};
pub use clip::*;
pub use ids::random_id;
pub use timeline::{to_dance_clips, to_karaoke_clips};
