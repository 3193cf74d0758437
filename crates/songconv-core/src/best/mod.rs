//! Best-format records and their assembly.
//!
//! - `records` - the five serialized records of a converted map
//! - `preview` - audio preview window resolution
//! - `assemble` - builds the records from parsed source files

mod assemble;
mod preview;
mod records;

pub use assemble::{AssembleInput, TimelineInput, assemble, build_music_track, build_song};
pub use preview::resolve_preview;
pub use records::*;
