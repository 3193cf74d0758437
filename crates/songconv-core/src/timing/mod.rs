//! Conversions between audio time, beats and ticks driven by per-beat sample markers.

use tracing::debug;

use crate::config::timing::{DEFAULT_SAMPLE_RATE, DEFAULT_TICKS_PER_BEAT, FALLBACK_BEAT_DURATION};

/// Beat/time/tick converter for one music track.
///
/// Beat `i` starts at `markers[i] / sample_rate` seconds. Beats outside the
/// marker range are extrapolated with the first or last beat duration.
#[derive(Debug, Clone)]
pub struct TimeUnitConverter {
    markers: Vec<i64>,
    sample_rate: u32,
    ticks_per_beat: u16,
    beat_durations: Vec<f64>,
}

impl TimeUnitConverter {
    pub fn new(markers: Vec<i64>, sample_rate: u32, ticks_per_beat: u16) -> Self {
        let rate = f64::from(sample_rate);
        let mut beat_durations: Vec<f64> = markers
            .windows(2)
            .map(|pair| (pair[1] - pair[0]) as f64 / rate)
            .collect();
        let trailing = match beat_durations.last() {
            Some(&last) if last != 0.0 => last,
            _ => FALLBACK_BEAT_DURATION,
        };
        beat_durations.push(trailing);

        debug!(
            "Time converter: {} markers at {} Hz, {} ticks per beat",
            markers.len(),
            sample_rate,
            ticks_per_beat
        );

        Self {
            markers,
            sample_rate,
            ticks_per_beat,
            beat_durations,
        }
    }

    /// Converter with the default sample rate and tick resolution.
    pub fn with_defaults(markers: Vec<i64>) -> Self {
        Self::new(markers, DEFAULT_SAMPLE_RATE, DEFAULT_TICKS_PER_BEAT)
    }

    pub fn markers(&self) -> &[i64] {
        &self.markers
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn ticks_per_beat(&self) -> u16 {
        self.ticks_per_beat
    }

    /// Seconds per beat; one entry per marker, the last one repeated.
    pub fn beat_durations(&self) -> &[f64] {
        &self.beat_durations
    }

    fn marker_time(&self, index: usize) -> f64 {
        self.markers
            .get(index)
            .map_or(0.0, |&m| m as f64 / f64::from(self.sample_rate))
    }

    fn first_duration(&self) -> f64 {
        self.beat_durations[0]
    }

    fn last_duration(&self) -> f64 {
        self.beat_durations[self.beat_durations.len() - 1]
    }

    pub fn time_from_beat(&self, beat: f64) -> f64 {
        let floor = beat.floor();
        if floor < 0.0 {
            return beat * self.first_duration();
        }

        let last_index = self.markers.len().saturating_sub(1);
        if floor >= last_index as f64 {
            let over = beat - last_index as f64;
            return self.marker_time(last_index) + over * self.last_duration();
        }

        let index = floor as usize;
        self.marker_time(index) + (beat - floor) * self.beat_durations[index]
    }

    /// Truncating conversion: `floor(beat * ticks_per_beat)`.
    pub fn ticks_from_beat(&self, beat: f64) -> i64 {
        (beat * f64::from(self.ticks_per_beat)).floor() as i64
    }

    pub fn beat_from_ticks(&self, ticks: i64) -> f64 {
        ticks as f64 / f64::from(self.ticks_per_beat)
    }

    pub fn time_from_ticks(&self, ticks: i64) -> f64 {
        self.time_from_beat(self.beat_from_ticks(ticks))
    }

    pub fn beat_from_time(&self, seconds: f64) -> f64 {
        if seconds < 0.0 {
            return seconds / self.first_duration();
        }

        let mut prev_time = 0.0;
        let mut prev_beat = 0.0;
        for index in 0..self.markers.len() {
            let marker_time = self.marker_time(index);
            if marker_time > seconds {
                let duration = match index.checked_sub(1).map(|i| self.beat_durations[i]) {
                    Some(d) if d != 0.0 => d,
                    _ => self.first_duration(),
                };
                return prev_beat + (seconds - prev_time) / duration;
            }
            prev_time = marker_time;
            prev_beat = index as f64;
        }

        prev_beat + (seconds - prev_time) / self.last_duration()
    }

    pub fn ticks_from_time(&self, seconds: f64) -> i64 {
        self.ticks_from_beat(self.beat_from_time(seconds))
    }

    /// Average tempo over the whole track.
    pub fn bpm(&self) -> f64 {
        let mean = self.beat_durations.iter().sum::<f64>() / self.beat_durations.len() as f64;
        60.0 / mean
    }
}
