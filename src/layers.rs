//! Mapping from captured video height to simulcast layers.

use std::fmt;

/// Height assumed when nothing is known about the capture resolution.
///
/// This is the richest tier, so an unknown resolution gets every layer.
pub const DEFAULT_CAPTURE_HEIGHT: u32 = 720;

/// One simulcast encoding layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// RTP stream id of the layer, `"1"` being the lowest quality.
    pub rid: String,
    /// How much the capture is scaled down for this layer. 1.0 is full resolution.
    pub scale_resolution_down_by: f32,
}

/// Decides which layers to encode for a given capture height.
///
/// Munging only looks at how many layers are returned. The list is expected
/// to be ordered lowest quality first, and to grow (or stay the same) with
/// the height.
pub trait LayerPolicy: fmt::Debug + Send + Sync {
    /// Layers to use for a capture of `height` pixels.
    fn effective_layers(&self, height: u32) -> Vec<Layer>;

    /// Number of layers for a height, never less than 1.
    fn layer_count(&self, height: u32) -> usize {
        self.effective_layers(height).len().max(1)
    }
}

/// Step function over the capture height.
///
/// * `>= 540` gives three layers
/// * `>= 360` gives two layers
/// * anything below a single layer
#[derive(Debug, Clone)]
pub struct StepLayerPolicy {
    // (min height, layer count), descending by height
    steps: Vec<(u32, usize)>,
}

impl StepLayerPolicy {
    /// Create a policy from `(min height, layer count)` steps.
    ///
    /// Heights below the lowest step get a single layer.
    pub fn new(steps: impl IntoIterator<Item = (u32, usize)>) -> Self {
        let mut steps: Vec<_> = steps.into_iter().collect();
        steps.sort_by(|a, b| b.0.cmp(&a.0));
        StepLayerPolicy { steps }
    }

    fn count_for(&self, height: u32) -> usize {
        self.steps
            .iter()
            .find(|(min, _)| height >= *min)
            .map(|(_, count)| *count)
            .unwrap_or(1)
            .max(1)
    }
}

impl Default for StepLayerPolicy {
    fn default() -> Self {
        StepLayerPolicy::new([(540, 3), (360, 2)])
    }
}

impl LayerPolicy for StepLayerPolicy {
    fn effective_layers(&self, height: u32) -> Vec<Layer> {
        let count = self.count_for(height);

        // Highest layer is full resolution, each layer below halves it.
        (0..count)
            .map(|idx| Layer {
                rid: (idx + 1).to_string(),
                scale_resolution_down_by: 2f32.powi((count - 1 - idx) as i32),
            })
            .collect()
    }
}
