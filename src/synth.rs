use crate::cache::CacheEntry;
use crate::generator::SsrcGenerator;
use crate::id::Ssrc;
use crate::sdp::{MediaLine, SourceAttribute, SourceGroup, SourceKind};
use crate::util::Pii;

/// Draws per layer before giving up on finding an unused SSRC.
const MAX_DRAWS: usize = 8;

/// The cname and msid every layer of a track shares.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Identity {
    cname: Option<String>,
    msid: Option<String>,
}

impl Identity {
    fn resolve(media: &MediaLine, primary: Ssrc) -> Identity {
        let cname = media
            .source_value(primary, &SourceKind::Cname)
            .map(String::from);

        // Unified plan can leave out the a=ssrc msid lines, in which case the
        // media level a=msid is what we've got.
        let msid = media
            .source_value(primary, &SourceKind::Msid)
            .map(String::from)
            .or_else(|| media.msid().map(|m| m.to_string()));

        Identity { cname, msid }
    }

    fn attributes(&self, ssrc: Ssrc) -> impl Iterator<Item = SourceAttribute> + '_ {
        let cname = self.cname.as_ref().map(|v| SourceAttribute::cname(ssrc, v));
        let msid = self.msid.as_ref().map(|v| SourceAttribute::msid(ssrc, v));
        cname.into_iter().chain(msid)
    }
}

/// Add `layer_count - 1` new SSRC to the m-line and group them with the primary
/// in an `a=ssrc-group:SIM`.
///
/// Returns the SSRC of all layers, primary first.
pub(crate) fn synthesize(
    media: &mut MediaLine,
    primary: Ssrc,
    layer_count: usize,
    generator: &mut dyn SsrcGenerator,
) -> Vec<Ssrc> {
    let identity = Identity::resolve(media, primary);

    if !media.has_source_kind(&SourceKind::Msid) {
        if let Some(msid) = media.msid().map(|m| m.to_string()) {
            let repaired: Vec<_> = media
                .ssrcs()
                .into_iter()
                .map(|ssrc| SourceAttribute::msid(ssrc, &msid))
                .collect();
            trace!("Add a=ssrc msid to {} SSRC from a=msid", repaired.len());
            media.add_sources(repaired);
        }
    }

    let existing = media.ssrcs();
    let mut layers = vec![primary];

    'outer: while layers.len() < layer_count {
        for _ in 0..MAX_DRAWS {
            let ssrc = generator.next_ssrc();
            if !layers.contains(&ssrc) && !existing.contains(&ssrc) {
                layers.push(ssrc);
                continue 'outer;
            }
        }
        warn!(
            "Failed to draw unused SSRC, stopping at {} of {} layers",
            layers.len(),
            layer_count
        );
        break;
    }

    let added: Vec<_> = layers[1..]
        .iter()
        .flat_map(|ssrc| identity.attributes(*ssrc))
        .collect();
    media.add_sources(added);

    if layers.len() > 1 {
        media.add_group(SourceGroup::sim(layers.clone()));
    }

    debug!(
        "Synthesized {} layers {:?} cname: {:?}",
        layers.len(),
        layers,
        identity.cname.as_deref().map(Pii)
    );

    layers
}

/// Replace all SSRC in the m-line with the ones remembered from an earlier
/// negotiation.
pub(crate) fn fill_from_cache(media: &mut MediaLine, primary: Ssrc, entry: &CacheEntry) {
    let identity = Identity::resolve(media, primary);

    let sources: Vec<_> = entry
        .ssrcs()
        .iter()
        .flat_map(|ssrc| identity.attributes(*ssrc))
        .collect();

    let groups = if entry.layer_count() > 1 {
        vec![SourceGroup::sim(entry.ssrcs().to_vec())]
    } else {
        vec![]
    };

    media.replace_sources(groups, sources);

    debug!(
        "Filled {} cached layers {:?} cname: {:?}",
        entry.layer_count(),
        entry.ssrcs(),
        identity.cname.as_deref().map(Pii)
    );
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sdp::{GroupSemantics, MediaAttribute, MediaType, Msid};

    /// Hands out 1000, 1001, 1002...
    #[derive(Debug)]
    struct Seq(u32);

    impl SsrcGenerator for Seq {
        fn next_ssrc(&mut self) -> Ssrc {
            self.0 += 1;
            (999 + self.0).into()
        }
    }

    #[derive(Debug)]
    struct Constant(u32);

    impl SsrcGenerator for Constant {
        fn next_ssrc(&mut self) -> Ssrc {
            self.0.into()
        }
    }

    const MSID: &str = "stream track";

    fn video(ssrc_msid: bool) -> MediaLine {
        let mut m = MediaLine {
            typ: MediaType::Video,
            rest: "9 UDP/TLS/RTP/SAVPF 96".into(),
            attrs: vec![
                MediaAttribute::Mid("1".into()),
                MediaAttribute::SendRecv,
                MediaAttribute::Msid(Msid {
                    stream_id: "stream".into(),
                    track_id: Some("track".into()),
                }),
            ],
        };
        m.add_sources([SourceAttribute::cname(1.into(), "cname")]);
        if ssrc_msid {
            m.add_sources([SourceAttribute::msid(1.into(), MSID)]);
        }
        m
    }

    fn sim(m: &MediaLine) -> Option<Vec<Ssrc>> {
        m.find_group(&GroupSemantics::Sim).map(|g| g.ssrcs.clone())
    }

    #[test]
    fn three_layers() {
        let mut m = video(true);
        let layers = synthesize(&mut m, 1.into(), 3, &mut Seq(0));

        let expected = vec![Ssrc::from(1), Ssrc::from(1000), Ssrc::from(1001)];
        assert_eq!(layers, expected);
        assert_eq!(m.ssrcs(), expected);
        assert_eq!(sim(&m), Some(expected));

        for ssrc in &layers {
            assert_eq!(m.source_value(*ssrc, &SourceKind::Cname), Some("cname"));
            assert_eq!(m.source_value(*ssrc, &SourceKind::Msid), Some(MSID));
        }
    }

    #[test]
    fn one_layer_has_no_group() {
        let mut m = video(true);
        let before = m.clone();
        let layers = synthesize(&mut m, 1.into(), 1, &mut Seq(0));

        assert_eq!(layers, vec![Ssrc::from(1)]);
        assert_eq!(sim(&m), None);
        assert_eq!(m, before);
    }

    #[test]
    fn missing_ssrc_msid_repaired_from_media_msid() {
        let mut m = video(false);
        synthesize(&mut m, 1.into(), 2, &mut Seq(0));

        assert_eq!(m.source_value(1.into(), &SourceKind::Msid), Some(MSID));
        assert_eq!(m.source_value(1000.into(), &SourceKind::Msid), Some(MSID));
    }

    #[test]
    fn no_msid_anywhere() {
        let mut m = video(false);
        m.attrs.retain(|a| !matches!(a, MediaAttribute::Msid(_)));
        synthesize(&mut m, 1.into(), 2, &mut Seq(0));

        assert!(!m.has_source_kind(&SourceKind::Msid));
        assert_eq!(m.source_value(1000.into(), &SourceKind::Cname), Some("cname"));
    }

    #[test]
    fn keeps_fid_group() {
        let mut m = video(true);
        m.add_sources([
            SourceAttribute::cname(2.into(), "cname"),
            SourceAttribute::msid(2.into(), MSID),
        ]);
        m.add_group(SourceGroup {
            semantics: GroupSemantics::Fid,
            ssrcs: vec![1.into(), 2.into()],
        });

        synthesize(&mut m, 1.into(), 3, &mut Seq(0));

        assert!(m.find_group(&GroupSemantics::Fid).is_some());
        assert_eq!(
            sim(&m),
            Some(vec![Ssrc::from(1), Ssrc::from(1000), Ssrc::from(1001)])
        );
        assert_eq!(m.ssrcs().len(), 4);
    }

    #[test]
    fn clashing_generator_gives_up() {
        let mut m = video(true);
        let layers = synthesize(&mut m, 1.into(), 3, &mut Constant(5));

        // first draw of 5 succeeds, the rest clash with it
        assert_eq!(layers, vec![Ssrc::from(1), Ssrc::from(5)]);
        assert_eq!(sim(&m), Some(layers));
    }

    #[test]
    fn generator_clash_with_primary_redraws() {
        #[derive(Debug)]
        struct Twice(Vec<u32>);
        impl SsrcGenerator for Twice {
            fn next_ssrc(&mut self) -> Ssrc {
                self.0.remove(0).into()
            }
        }

        let mut m = video(true);
        let layers = synthesize(&mut m, 1.into(), 2, &mut Twice(vec![1, 7]));
        assert_eq!(layers, vec![Ssrc::from(1), Ssrc::from(7)]);
    }

    #[test]
    fn fill_replaces_everything() {
        let mut m = video(true);
        m.add_sources([SourceAttribute::cname(2.into(), "cname")]);
        m.add_group(SourceGroup {
            semantics: GroupSemantics::Fid,
            ssrcs: vec![1.into(), 2.into()],
        });

        let entry = CacheEntry::new(vec![1.into(), 50.into(), 60.into()], 3);
        fill_from_cache(&mut m, 1.into(), &entry);

        assert_eq!(m.ssrcs(), entry.ssrcs());
        assert_eq!(m.groups().count(), 1);
        assert_eq!(sim(&m), Some(entry.ssrcs().to_vec()));
        for ssrc in entry.ssrcs() {
            assert_eq!(m.source_value(*ssrc, &SourceKind::Cname), Some("cname"));
            assert_eq!(m.source_value(*ssrc, &SourceKind::Msid), Some(MSID));
        }
    }

    #[test]
    fn fill_single_layer_has_no_group() {
        let mut m = video(true);
        let entry = CacheEntry::new(vec![1.into()], 1);
        fill_from_cache(&mut m, 1.into(), &entry);

        assert_eq!(m.ssrcs(), vec![Ssrc::from(1)]);
        assert_eq!(m.groups().count(), 0);
    }

    #[test]
    fn fill_uses_media_msid_when_ssrc_msid_missing() {
        let mut m = video(false);
        let entry = CacheEntry::new(vec![1.into(), 2.into()], 2);
        fill_from_cache(&mut m, 1.into(), &entry);

        assert_eq!(m.source_value(2.into(), &SourceKind::Msid), Some(MSID));
    }
}
