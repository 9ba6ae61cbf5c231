#![allow(unused)]
use std::sync::Once;

use simulcast_sdp::{SimulcastConfig, SimulcastMunger, Ssrc, SsrcGenerator};

pub fn init_log() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    static START: Once = Once::new();

    START.call_once(|| {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(env_filter)
            .init();
    });
}

/// Hands out `start + 1`, `start + 2`...
#[derive(Debug)]
pub struct SequentialSsrc(pub u32);

impl SsrcGenerator for SequentialSsrc {
    fn next_ssrc(&mut self) -> Ssrc {
        self.0 += 1;
        self.0.into()
    }
}

/// Munger with predictable SSRC, starting at 5001.
pub fn munger() -> SimulcastMunger {
    SimulcastConfig::new().build_with_generator(SequentialSsrc(5000))
}

pub const CNAME: &str = "xeXs3aE9AOBn00yJ";

/// Audio (mid 0) and video with an rtx pair (mid 1), as created by Chrome.
pub const CHROME_OFFER: &str = "v=0\r\n\
    o=- 6564425948916445306 2 IN IP4 127.0.0.1\r\n\
    s=-\r\n\
    t=0 0\r\n\
    a=group:BUNDLE 0 1\r\n\
    a=extmap-allow-mixed\r\n\
    a=msid-semantic: WMS 5UUdwiuY7OML2EkQtF38pJtNP5v7In1LhjEK\r\n\
    m=audio 9 UDP/TLS/RTP/SAVPF 111\r\n\
    c=IN IP4 0.0.0.0\r\n\
    a=rtcp:9 IN IP4 0.0.0.0\r\n\
    a=ice-ufrag:S5hk\r\n\
    a=ice-pwd:0zV/Yu3y8aDzbHgqWhnVQhqP\r\n\
    a=fingerprint:sha-256 8C:64:ED:03:76:D0:3D:B4:C1:5A:C6:A4:94:2F:1B:C8:F4:DF:5E:A4:4F:CD:7F:C5:87:AB:C5:4F:BD:5B:90:D9\r\n\
    a=setup:actpass\r\n\
    a=mid:0\r\n\
    a=extmap:1 urn:ietf:params:rtp-hdrext:ssrc-audio-level\r\n\
    a=sendrecv\r\n\
    a=msid:5UUdwiuY7OML2EkQtF38pJtNP5v7In1LhjEK 6d4e54f4-3dd1-4fc7-8d6c-c5fbb4d3a4bd\r\n\
    a=rtcp-mux\r\n\
    a=rtpmap:111 opus/48000/2\r\n\
    a=rtcp-fb:111 transport-cc\r\n\
    a=fmtp:111 minptime=10;useinbandfec=1\r\n\
    a=ssrc:3948621874 cname:xeXs3aE9AOBn00yJ\r\n\
    a=ssrc:3948621874 msid:5UUdwiuY7OML2EkQtF38pJtNP5v7In1LhjEK 6d4e54f4-3dd1-4fc7-8d6c-c5fbb4d3a4bd\r\n\
    m=video 9 UDP/TLS/RTP/SAVPF 96 97\r\n\
    c=IN IP4 0.0.0.0\r\n\
    b=AS:2500\r\n\
    a=rtcp:9 IN IP4 0.0.0.0\r\n\
    a=ice-ufrag:S5hk\r\n\
    a=ice-pwd:0zV/Yu3y8aDzbHgqWhnVQhqP\r\n\
    a=setup:actpass\r\n\
    a=mid:1\r\n\
    a=extmap:14 urn:ietf:params:rtp-hdrext:toffset\r\n\
    a=sendrecv\r\n\
    a=msid:5UUdwiuY7OML2EkQtF38pJtNP5v7In1LhjEK f78dde68-7055-4e20-bb37-433803dd1ed1\r\n\
    a=rtcp-mux\r\n\
    a=rtcp-rsize\r\n\
    a=rtpmap:96 VP8/90000\r\n\
    a=rtcp-fb:96 goog-remb\r\n\
    a=rtcp-fb:96 nack\r\n\
    a=rtcp-fb:96 nack pli\r\n\
    a=rtpmap:97 rtx/90000\r\n\
    a=fmtp:97 apt=96\r\n\
    a=ssrc-group:FID 1111 2222\r\n\
    a=ssrc:1111 cname:xeXs3aE9AOBn00yJ\r\n\
    a=ssrc:1111 msid:5UUdwiuY7OML2EkQtF38pJtNP5v7In1LhjEK f78dde68-7055-4e20-bb37-433803dd1ed1\r\n\
    a=ssrc:2222 cname:xeXs3aE9AOBn00yJ\r\n\
    a=ssrc:2222 msid:5UUdwiuY7OML2EkQtF38pJtNP5v7In1LhjEK f78dde68-7055-4e20-bb37-433803dd1ed1\r\n\
    ";

/// A single video m-line (mid `v`) with the given direction, one SSRC and no
/// a=ssrc msid line.
pub fn single_video(direction: &str, ssrc: u32) -> String {
    format!(
        "v=0\r\n\
        o=- 1 2 IN IP4 127.0.0.1\r\n\
        s=-\r\n\
        t=0 0\r\n\
        m=video 9 UDP/TLS/RTP/SAVPF 96\r\n\
        a=mid:v\r\n\
        a={direction}\r\n\
        a=msid:stream track\r\n\
        a=rtpmap:96 VP8/90000\r\n\
        a=ssrc:{ssrc} cname:{CNAME}\r\n"
    )
}

/// The lines of the m-line with the given mid, the m= line included.
pub fn section<'a>(sdp: &'a str, mid: &str) -> Vec<&'a str> {
    let mid_line = format!("a=mid:{mid}");
    let mut current: Vec<&str> = vec![];

    for line in sdp.lines() {
        if line.starts_with("m=") {
            if current.contains(&mid_line.as_str()) {
                return current;
            }
            current = vec![];
        }
        if !current.is_empty() || line.starts_with("m=") {
            current.push(line);
        }
    }

    if current.contains(&mid_line.as_str()) {
        current
    } else {
        vec![]
    }
}

/// Distinct SSRC of the a=ssrc lines in a mid, in order of appearance.
pub fn ssrcs(sdp: &str, mid: &str) -> Vec<u32> {
    let mut ret = vec![];
    for line in section(sdp, mid) {
        let Some(rest) = line.strip_prefix("a=ssrc:") else {
            continue;
        };
        let Some(ssrc) = rest.split(' ').next().and_then(|s| s.parse().ok()) else {
            continue;
        };
        if !ret.contains(&ssrc) {
            ret.push(ssrc);
        }
    }
    ret
}

/// SSRC of the a=ssrc-group with the given semantics in a mid.
pub fn group(sdp: &str, mid: &str, semantics: &str) -> Option<Vec<u32>> {
    let prefix = format!("a=ssrc-group:{semantics} ");
    section(sdp, mid)
        .into_iter()
        .find_map(|line| line.strip_prefix(prefix.as_str()))
        .map(|rest| rest.split(' ').filter_map(|s| s.parse().ok()).collect())
}

/// Number of a=ssrc-group lines in a mid.
pub fn group_count(sdp: &str, mid: &str) -> usize {
    section(sdp, mid)
        .into_iter()
        .filter(|l| l.starts_with("a=ssrc-group:"))
        .count()
}

/// Value of `a=ssrc:<ssrc> <attr>:` in a mid.
pub fn source_value<'a>(sdp: &'a str, mid: &str, ssrc: u32, attr: &str) -> Option<&'a str> {
    let prefix = format!("a=ssrc:{ssrc} {attr}:");
    section(sdp, mid)
        .into_iter()
        .find_map(|line| line.strip_prefix(prefix.as_str()))
}
