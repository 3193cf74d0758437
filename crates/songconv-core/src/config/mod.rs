//! Conversion settings and fixed engine constants.
//!
//! This module contains:
//! - `ConvertConfig` - per-run settings (output style, sample rate, RNG seed)
//! - Timing, preview, karaoke and identifier constants used by the converters

mod convert;

pub use convert::*;

/// Timing model constants.
pub mod timing {
    /// Sample rate assumed when neither the config nor the audio file gives one.
    pub const DEFAULT_SAMPLE_RATE: u32 = 48_000;

    /// Canonical tick resolution of every output record.
    pub const DEFAULT_TICKS_PER_BEAT: u16 = 24;

    /// Beat duration (seconds) used when a track has fewer than two markers.
    pub const FALLBACK_BEAT_DURATION: f64 = 0.4;

    /// Pictograms and gold effects last exactly one beat.
    pub const ONE_BEAT_TICKS: i64 = 24;
}

/// Audio preview defaults, in beat indices.
pub mod preview {
    pub const DEFAULT_ENTRY: i64 = 0;
    pub const DEFAULT_LOOP_START: i64 = 30;
    pub const DEFAULT_LOOP_END: i64 = 60;

    /// Preview names searched in the song descriptor, in priority order.
    pub const PREVIEW_NAMES: [&str; 2] = ["coverflow", "prelobby"];
}

/// Karaoke scoring constants applied to clips built from a timeline.
pub mod karaoke {
    /// Placeholder pitch; the timeline carries no pitch data.
    pub const PITCH_PLACEHOLDER: f64 = 8.661958;
    pub const SEMITONE_TOLERANCE: i64 = 5;
    pub const START_TIME_TOLERANCE: i64 = 4;
    pub const END_TIME_TOLERANCE: i64 = 4;
    /// Content type written for timeline lyrics.
    pub const CONTENT_TYPE: i64 = 1;
}

/// Timeline layer and clip identity constants.
pub mod layers {
    /// Layer type marking gold-move blocks.
    pub const GOLD_MOVE_LAYER_TYPE: i64 = 12;

    /// Move layers 0..MOVE_LAYER_COUNT get one stable track id each.
    pub const MOVE_LAYER_COUNT: i64 = 7;

    /// Block model that produces a cascade gold effect.
    pub const GOLD_MOVE_CASCADE_MODEL: &str = "goldmovecascade";

    pub const EFFECT_TYPE_CASCADE: i64 = 2;
    pub const EFFECT_TYPE_DEFAULT: i64 = 0;
}

/// Synthetic identifier range.
pub mod ids {
    pub const MIN_ID: i64 = 1_000_000_000;
    pub const MAX_ID: i64 = 4_294_967_295;

    /// Locale id used when the descriptor has none (largest u32).
    pub const DEFAULT_LOCALE_ID: i64 = 4_294_967_295;
}
