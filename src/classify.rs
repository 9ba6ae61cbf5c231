use std::collections::HashSet;
use std::fmt;

use crate::id::Ssrc;
use crate::sdp::{GroupSemantics, MediaLine, SourceKind};

/// Outcome of looking at one m-line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Leave the m-line as is.
    Skip(SkipReason),
    /// Add simulcast layers on top of this primary SSRC.
    Munge(Ssrc),
}

impl Classification {
    /// Tells if this m-line will be munged.
    pub fn is_munge(&self) -> bool {
        matches!(self, Classification::Munge(_))
    }
}

/// Why an m-line is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Direction is `recvonly` or `inactive`, we are not sending.
    NotLocalSend,
    /// Not a video m-line.
    NotVideo,
    /// No `a=mid`, which we need to remember the SSRC between negotiations.
    NoMid,
    /// No `a=ssrc` lines.
    NoSources,
    /// There is already an `a=ssrc-group:SIM`.
    AlreadySimulcast,
    /// More than two SSRC, simulcast or some shape we don't support.
    AlreadyProvisioned,
    /// Two SSRC without any group, we can't tell which one is primary.
    AmbiguousShape,
    /// Two SSRC without a FID group pairing exactly those two.
    NoRetransmissionPair,
    /// The primary SSRC has no `a=ssrc` cname to give the new layers.
    NoCname,
    /// The mid was already seen in an earlier m-line of the same description.
    DuplicateMid,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use SkipReason::*;
        let s = match self {
            NotLocalSend => "not-local-send",
            NotVideo => "not-video",
            NoMid => "no-mid",
            NoSources => "no-sources",
            AlreadySimulcast => "already-simulcast",
            AlreadyProvisioned => "already-provisioned",
            AmbiguousShape => "ambiguous-shape",
            NoRetransmissionPair => "no-retransmission-pair",
            NoCname => "no-cname",
            DuplicateMid => "duplicate-mid",
        };
        write!(f, "{s}")
    }
}

/// Classify every m-line of a description. An m-line repeating the mid of an
/// earlier one is never munged.
pub(crate) fn classify_all(media_lines: &[MediaLine]) -> Vec<Classification> {
    let mut seen = HashSet::new();

    media_lines
        .iter()
        .map(|media| match media.mid() {
            Some(mid) if !seen.insert(mid) => Classification::Skip(SkipReason::DuplicateMid),
            _ => classify(media),
        })
        .collect()
}

/// Decide whether an m-line can be munged and what the primary SSRC is.
pub(crate) fn classify(media: &MediaLine) -> Classification {
    use Classification::*;
    use SkipReason::*;

    if !media.direction().is_sending() {
        return Skip(NotLocalSend);
    }

    if !media.typ.is_video() {
        return Skip(NotVideo);
    }

    if media.mid().is_none() {
        return Skip(NoMid);
    }

    let ssrcs = media.ssrcs();
    let group_count = media.groups().count();

    if ssrcs.is_empty() {
        return Skip(NoSources);
    }

    if media.find_group(&GroupSemantics::Sim).is_some() {
        return Skip(AlreadySimulcast);
    }

    let primary = match ssrcs.len() {
        1 => ssrcs[0],
        2 if group_count == 0 => return Skip(AmbiguousShape),
        // <primary> <rtx>, both declared with a=ssrc
        2 => match media.find_group(&GroupSemantics::Fid) {
            Some(fid) if fid.ssrcs.len() == 2 && fid.ssrcs.iter().all(|s| ssrcs.contains(s)) => {
                fid.ssrcs[0]
            }
            _ => return Skip(NoRetransmissionPair),
        },
        _ => return Skip(AlreadyProvisioned),
    };

    // New layers must share the primary's cname, or they'd be ungrouped on the wire.
    if media.source_value(primary, &SourceKind::Cname).is_none() {
        return Skip(NoCname);
    }

    Munge(primary)
}
