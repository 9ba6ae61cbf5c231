use std::fmt;

use crate::id::Ssrc;

/// Source of new SSRC for the synthesized simulcast layers.
///
/// The default [`RandomSsrc`] draws uniformly from the whole `u32` range.
/// Replace it to get deterministic SSRC, for instance in tests.
pub trait SsrcGenerator: fmt::Debug + Send {
    /// Produce the next SSRC.
    fn next_ssrc(&mut self) -> Ssrc;
}

/// SSRC drawn from a [`fastrand::Rng`].
///
/// Not cryptographically secure, which is fine since SSRC are visible on
/// the wire anyway.
#[derive(Debug, Clone)]
pub struct RandomSsrc(fastrand::Rng);

impl RandomSsrc {
    /// Random generator seeded from the thread local generator.
    pub fn new() -> Self {
        RandomSsrc(fastrand::Rng::new())
    }

    /// Seeded generator, reproducible across runs.
    pub fn with_seed(seed: u64) -> Self {
        RandomSsrc(fastrand::Rng::with_seed(seed))
    }
}

impl Default for RandomSsrc {
    fn default() -> Self {
        Self::new()
    }
}

impl SsrcGenerator for RandomSsrc {
    fn next_ssrc(&mut self) -> Ssrc {
        self.0.u32(..).into()
    }
}
