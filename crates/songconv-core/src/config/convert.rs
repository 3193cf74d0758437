use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Settings for a single conversion run. Ticks per beat is not configurable:
/// picto and gold clip durations assume the canonical 24.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    /// Write compact JSON instead of 4-space indented JSON.
    pub minify_json: bool,
    /// Force a sample rate instead of reading it from the map audio.
    pub sample_rate: Option<u32>,
    /// Fixed seed for clip ids and clip order. `None` uses OS entropy.
    pub seed: Option<u64>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            minify_json: true,
            sample_rate: None,
            seed: None,
        }
    }
}

impl ConvertConfig {
    pub fn builder() -> ConvertConfigBuilder {
        ConvertConfigBuilder::default()
    }

    /// Random source for ids and shuffling.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ConvertConfigBuilder {
    config: ConvertConfig,
}

impl ConvertConfigBuilder {
    pub fn minify_json(mut self, minify: bool) -> Self {
        self.config.minify_json = minify;
        self
    }

    pub fn sample_rate(mut self, sample_rate: Option<u32>) -> Self {
        self.config.sample_rate = sample_rate;
        self
    }

    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn build(self) -> ConvertConfig {
        self.config
    }
}
