use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::{CacheEntry, RenegotiationCache};
use crate::classify::{classify_all, Classification};
use crate::config::SimulcastConfig;
use crate::desc::SessionDescription;
use crate::generator::SsrcGenerator;
use crate::id::Mid;
use crate::layers::LayerPolicy;
use crate::sdp::{MediaLine, Sdp, SdpError};
use crate::synth::{fill_from_cache, synthesize};

/// Adds simulcast layers to the video m-lines of local session descriptions.
///
/// One instance belongs to one peer connection. It remembers the SSRC handed
/// out per mid, so that every renegotiation announces the same layers.
///
/// ```
/// use simulcast_sdp::SimulcastMunger;
/// # use simulcast_sdp::SessionDescription;
/// # let offer = SessionDescription::offer("v=0\r\n");
///
/// let mut munger = SimulcastMunger::new();
///
/// // offer as created by the browser, before setLocalDescription
/// let offer = munger.munge_local_description(offer, None);
/// ```
#[derive(Debug)]
pub struct SimulcastMunger {
    default_height: u32,
    layer_policy: Arc<dyn LayerPolicy>,
    generator: Box<dyn SsrcGenerator>,
    cache: RenegotiationCache,
}

/// How one m-line of a description would be treated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionReport {
    /// Position of the m-line, 0 being the first.
    pub index: usize,
    /// The `a=mid` of the m-line, if any.
    pub mid: Option<Mid>,
    /// Whether it is munged and why not.
    pub classification: Classification,
}

impl SimulcastMunger {
    /// Creates a munger with the default config.
    ///
    /// Same as `SimulcastConfig::new().build()`.
    pub fn new() -> Self {
        SimulcastConfig::new().build()
    }

    /// Creates a config builder for a munger.
    pub fn builder() -> SimulcastConfig {
        SimulcastConfig::new()
    }

    pub(crate) fn new_from_config(
        config: SimulcastConfig,
        generator: Box<dyn SsrcGenerator>,
    ) -> Self {
        SimulcastMunger {
            default_height: config.default_height,
            layer_policy: config.layer_policy,
            generator,
            cache: RenegotiationCache::default(),
        }
    }

    /// Add simulcast layers to a local description.
    ///
    /// `heights` maps mid to the height of the captured video. Mids missing
    /// in the map (or a `None` map) use the configured default height.
    ///
    /// This never fails. Descriptions that can't be parsed, and m-lines that
    /// don't qualify, are passed through untouched. The returned description
    /// has the same type as the input.
    pub fn munge_local_description(
        &mut self,
        desc: SessionDescription,
        heights: Option<&HashMap<Mid, u32>>,
    ) -> SessionDescription {
        let Some(text) = desc.sdp_text() else {
            return desc;
        };

        let mut sdp = match Sdp::parse(text) {
            Ok(v) => v,
            Err(e) => {
                warn!("Failed to parse local {} SDP: {}", desc.typ, e);
                return desc;
            }
        };

        let classifications = classify_all(&sdp.media_lines);
        let mut munged = 0;

        for (index, (media, classification)) in
            sdp.media_lines.iter_mut().zip(classifications).enumerate()
        {
            if self.munge_media(index, media, classification, heights) {
                munged += 1;
            }
        }

        if munged == 0 {
            return desc;
        }

        debug!("Munged {} m-lines in local {}", munged, desc.typ);

        SessionDescription {
            typ: desc.typ,
            sdp: Some(sdp.to_string()),
        }
    }

    fn munge_media(
        &mut self,
        index: usize,
        media: &mut MediaLine,
        classification: Classification,
        heights: Option<&HashMap<Mid, u32>>,
    ) -> bool {
        let primary = match classification {
            Classification::Munge(v) => v,
            Classification::Skip(reason) => {
                debug!("Skip m-line {} {:?}: {}", index, media.mid(), reason);
                return false;
            }
        };

        // Munge is only given for m-lines with a mid.
        let Some(mid) = media.mid().cloned() else {
            return false;
        };

        if let Some(entry) = self.cache.get(&mid) {
            debug!("Reuse cached SSRC for {:?}", mid);
            fill_from_cache(media, primary, entry);
            return true;
        }

        let height = heights
            .and_then(|h| h.get(&mid))
            .copied()
            .unwrap_or(self.default_height);

        let layer_count = self.layer_policy.layer_count(height);

        debug!(
            "Munge {:?} primary: {} height: {} layers: {}",
            mid, primary, height, layer_count
        );

        let ssrcs = synthesize(media, primary, layer_count, &mut *self.generator);
        let layer_count = ssrcs.len();

        self.cache.insert(mid, CacheEntry::new(ssrcs, layer_count));
        trace!("Cached SSRC for {} mids", self.cache.len());

        true
    }

    /// Tell how each m-line of a description would be treated, without
    /// changing anything.
    ///
    /// A description without SDP has no m-lines.
    pub fn inspect(&self, desc: &SessionDescription) -> Result<Vec<SectionReport>, SdpError> {
        let Some(text) = desc.sdp_text() else {
            return Ok(vec![]);
        };

        let sdp = Sdp::parse(text)?;

        let classifications = classify_all(&sdp.media_lines);

        let reports = sdp
            .media_lines
            .iter()
            .zip(classifications)
            .enumerate()
            .map(|(index, (media, classification))| SectionReport {
                index,
                mid: media.mid().cloned(),
                classification,
            })
            .collect();

        Ok(reports)
    }

    /// The SSRC remembered for a mid, if it has been munged.
    pub fn cached(&self, mid: &Mid) -> Option<&CacheEntry> {
        self.cache.get(mid)
    }
}

impl Default for SimulcastMunger {
    fn default() -> Self {
        Self::new()
    }
}
