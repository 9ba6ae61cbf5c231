use std::sync::Arc;

use crate::generator::{RandomSsrc, SsrcGenerator};
use crate::layers::{LayerPolicy, StepLayerPolicy, DEFAULT_CAPTURE_HEIGHT};
use crate::SimulcastMunger;

/// Customized config for creating a [`SimulcastMunger`].
///
/// ```
/// use simulcast_sdp::{SimulcastConfig, StepLayerPolicy};
///
/// let munger = SimulcastConfig::new()
///     .set_default_height(1080)
///     .set_layer_policy(StepLayerPolicy::new([(720, 3), (360, 2)]))
///     .build();
/// ```
///
/// Configs implement [`Clone`] to help create one munger per peer connection.
#[derive(Debug, Clone)]
pub struct SimulcastConfig {
    pub(crate) default_height: u32,
    pub(crate) layer_policy: Arc<dyn LayerPolicy>,
}

impl SimulcastConfig {
    /// Creates a new default config.
    pub fn new() -> Self {
        SimulcastConfig::default()
    }

    /// Capture height used for m-lines missing in the height map.
    ///
    /// ```
    /// # use simulcast_sdp::SimulcastConfig;
    /// let config = SimulcastConfig::new();
    ///
    /// // Defaults to 720.
    /// assert_eq!(config.default_height(), 720);
    /// ```
    pub fn default_height(&self) -> u32 {
        self.default_height
    }

    /// Set the capture height assumed when the height map has no entry for a mid.
    ///
    /// Defaults to [`DEFAULT_CAPTURE_HEIGHT`].
    pub fn set_default_height(mut self, height: u32) -> Self {
        self.default_height = height;
        self
    }

    /// The policy deciding the number of layers.
    pub fn layer_policy(&self) -> &dyn LayerPolicy {
        &*self.layer_policy
    }

    /// Set the policy deciding the number of layers for a capture height.
    ///
    /// Defaults to [`StepLayerPolicy::default()`].
    pub fn set_layer_policy(mut self, policy: impl LayerPolicy + 'static) -> Self {
        self.layer_policy = Arc::new(policy);
        self
    }

    /// Create a [`SimulcastMunger`] drawing random SSRC.
    pub fn build(self) -> SimulcastMunger {
        self.build_with_generator(RandomSsrc::new())
    }

    /// Create a [`SimulcastMunger`] with a specific SSRC generator.
    pub fn build_with_generator(self, generator: impl SsrcGenerator + 'static) -> SimulcastMunger {
        SimulcastMunger::new_from_config(self, Box::new(generator))
    }
}

impl Default for SimulcastConfig {
    fn default() -> Self {
        Self {
            default_height: DEFAULT_CAPTURE_HEIGHT,
            layer_policy: Arc::new(StepLayerPolicy::default()),
        }
    }
}
