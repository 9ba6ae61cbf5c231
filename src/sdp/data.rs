use combine::EasyParser;
use std::fmt;

use crate::dir::Direction;
use crate::id::{Mid, Ssrc};

use super::parser::sdp_parser;
use super::SdpError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sdp {
    pub session: Session,
    pub media_lines: Vec<MediaLine>,
    /// Line ending used when writing the SDP back.
    pub line_end: LineEnd,
    /// Whether the last line is terminated.
    pub trailing_line_end: bool,
}

impl Sdp {
    pub fn parse(input: &str) -> Result<Sdp, SdpError> {
        let sdp = sdp_parser()
            .easy_parse(input)
            .map(|(sdp, _)| sdp)
            .map_err(|e| SdpError::ParseError(e.to_string()))?;

        Ok(Sdp {
            line_end: LineEnd::detect(input),
            trailing_line_end: input.ends_with('\n'),
            ..sdp
        })
    }

    /// All lines in document order, without line endings.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.session
            .lines
            .iter()
            .cloned()
            .chain(self.media_lines.iter().flat_map(|m| m.lines()))
    }
}

/// Session info, before the first m= line.
///
/// Nothing in the session part is touched by munging, so the lines are
/// kept as is, `v=0` first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub lines: Vec<String>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LineEnd {
    #[default]
    CrLf,
    Lf,
}

impl LineEnd {
    /// Browsers use \r\n, but we have seen bare \n from hand written SDP.
    pub fn detect(input: &str) -> LineEnd {
        if input.contains("\r\n") || !input.contains('\n') {
            LineEnd::CrLf
        } else {
            LineEnd::Lf
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnd::CrLf => "\r\n",
            LineEnd::Lf => "\n",
        }
    }
}

/// An m-line with everything up to the next m-line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MediaLine {
    pub typ: MediaType,
    /// Everything after the media type in the m= line, `9 UDP/TLS/RTP/SAVPF 96 97`.
    pub rest: String,
    pub attrs: Vec<MediaAttribute>,
}

impl MediaLine {
    pub fn mid(&self) -> Option<&Mid> {
        self.attrs.iter().find_map(|a| {
            if let MediaAttribute::Mid(m) = a {
                Some(m)
            } else {
                None
            }
        })
    }

    pub fn direction(&self) -> Direction {
        for a in &self.attrs {
            match a {
                MediaAttribute::SendRecv => return Direction::SendRecv,
                MediaAttribute::SendOnly => return Direction::SendOnly,
                MediaAttribute::RecvOnly => return Direction::RecvOnly,
                MediaAttribute::Inactive => return Direction::Inactive,
                // a=recvonly with trailing whitespace is kept verbatim as Unused.
                MediaAttribute::Unused(v) => match v.trim_end() {
                    "sendrecv" => return Direction::SendRecv,
                    "sendonly" => return Direction::SendOnly,
                    "recvonly" => return Direction::RecvOnly,
                    "inactive" => return Direction::Inactive,
                    _ => {}
                },
                _ => {}
            }
        }
        Direction::default()
    }

    /// The media level `a=msid` line.
    pub fn msid(&self) -> Option<&Msid> {
        self.attrs.iter().find_map(|a| {
            if let MediaAttribute::Msid(m) = a {
                Some(m)
            } else {
                None
            }
        })
    }

    /// All `a=ssrc` lines in order.
    pub fn sources(&self) -> impl Iterator<Item = &SourceAttribute> {
        self.attrs.iter().filter_map(|a| {
            if let MediaAttribute::Ssrc(s) = a {
                Some(s)
            } else {
                None
            }
        })
    }

    /// All `a=ssrc-group` lines in order.
    pub fn groups(&self) -> impl Iterator<Item = &SourceGroup> {
        self.attrs.iter().filter_map(|a| {
            if let MediaAttribute::SsrcGroup(g) = a {
                Some(g)
            } else {
                None
            }
        })
    }

    /// Distinct SSRC in the order they first appear in `a=ssrc` lines.
    pub fn ssrcs(&self) -> Vec<Ssrc> {
        let mut ret: Vec<Ssrc> = vec![];
        for s in self.sources() {
            if !ret.contains(&s.ssrc) {
                ret.push(s.ssrc);
            }
        }
        ret
    }

    pub fn find_group(&self, semantics: &GroupSemantics) -> Option<&SourceGroup> {
        self.groups().find(|g| g.semantics == *semantics)
    }

    /// Value of the first `a=ssrc:<ssrc> <kind>:<value>` line.
    pub fn source_value(&self, ssrc: Ssrc, kind: &SourceKind) -> Option<&str> {
        self.sources()
            .find(|s| s.ssrc == ssrc && s.kind == *kind)
            .map(|s| s.value.as_str())
    }

    pub fn has_source_kind(&self, kind: &SourceKind) -> bool {
        self.sources().any(|s| s.kind == *kind)
    }

    /// Add `a=ssrc` lines after the last existing one.
    pub fn add_sources(&mut self, sources: impl IntoIterator<Item = SourceAttribute>) {
        let pos = self
            .attrs
            .iter()
            .rposition(|a| matches!(a, MediaAttribute::Ssrc(_)))
            .or_else(|| self.attrs.iter().rposition(MediaAttribute::is_group))
            .map(|i| i + 1)
            .unwrap_or(self.attrs.len());

        self.attrs
            .splice(pos..pos, sources.into_iter().map(MediaAttribute::Ssrc));
    }

    /// Add an `a=ssrc-group` line after the last existing group, or before the
    /// first `a=ssrc` if there are no groups.
    pub fn add_group(&mut self, group: SourceGroup) {
        let pos = self
            .attrs
            .iter()
            .rposition(MediaAttribute::is_group)
            .map(|i| i + 1)
            .or_else(|| {
                self.attrs
                    .iter()
                    .position(|a| matches!(a, MediaAttribute::Ssrc(_)))
            })
            .unwrap_or(self.attrs.len());

        self.attrs.insert(pos, MediaAttribute::SsrcGroup(group));
    }

    /// Replace every `a=ssrc` and `a=ssrc-group` line. The new lines take the
    /// place of the first removed one, groups first.
    pub fn replace_sources(&mut self, groups: Vec<SourceGroup>, sources: Vec<SourceAttribute>) {
        let is_source = |a: &MediaAttribute| a.is_group() || matches!(a, MediaAttribute::Ssrc(_));

        let pos = self
            .attrs
            .iter()
            .position(is_source)
            .unwrap_or(self.attrs.len());

        self.attrs.retain(|a| !is_source(a));

        let replacement = groups
            .into_iter()
            .map(MediaAttribute::SsrcGroup)
            .chain(sources.into_iter().map(MediaAttribute::Ssrc));

        self.attrs.splice(pos..pos, replacement);
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        let m_line = format!("m={} {}", self.typ, self.rest);
        std::iter::once(m_line).chain(self.attrs.iter().map(|a| a.to_string()))
    }
}

/// "audio", "video", "application"
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum MediaType {
    #[default]
    Audio,
    Video,
    Application,
    #[doc(hidden)]
    Unknown(String),
}

impl MediaType {
    pub fn is_video(&self) -> bool {
        matches!(self, MediaType::Video)
    }
}

impl From<String> for MediaType {
    fn from(v: String) -> Self {
        match v.as_str() {
            "audio" => MediaType::Audio,
            "video" => MediaType::Video,
            "application" => MediaType::Application,
            _ => MediaType::Unknown(v),
        }
    }
}

/// Attributes after an m= line.
///
/// Lines we don't munge are kept verbatim in `Unused` and `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaAttribute {
    Mid(Mid), // 0, 1, 2
    RecvOnly, // a=recvonly
    SendRecv, // a=sendrecv
    SendOnly, // a=sendonly
    Inactive, // a=inactive
    // a=msid:5UUdwiuY7OML2EkQtF38pJtNP5v7In1LhjEK f78dde68-7055-4e20-bb37-433803dd1ed1
    // a=msid:- 78dde68-7055-4e20-bb37-433803dd1ed1
    Msid(Msid),
    // a=ssrc-group:FID 659652645 98148385
    SsrcGroup(SourceGroup),
    // a=ssrc:3948621874 cname:xeXs3aE9AOBn00yJ
    Ssrc(SourceAttribute),
    /// Any other a= line, value after `a=`.
    Unused(String),
    /// Any non a= line, such as c= or b=.
    Other(char, String),
}

impl MediaAttribute {
    pub fn is_group(&self) -> bool {
        matches!(self, MediaAttribute::SsrcGroup(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Msid {
    pub stream_id: String,
    /// Older SDP sometimes only carries the stream id.
    pub track_id: Option<String>,
}

/// One `a=ssrc:<ssrc> <kind>:<value>` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceAttribute {
    pub ssrc: Ssrc,
    pub kind: SourceKind,
    pub value: String,
}

impl SourceAttribute {
    pub fn cname(ssrc: Ssrc, value: impl Into<String>) -> Self {
        SourceAttribute {
            ssrc,
            kind: SourceKind::Cname,
            value: value.into(),
        }
    }

    pub fn msid(ssrc: Ssrc, value: impl Into<String>) -> Self {
        SourceAttribute {
            ssrc,
            kind: SourceKind::Msid,
            value: value.into(),
        }
    }
}

/// The attribute name of an `a=ssrc` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    Cname,
    Msid,
    /// mslabel, label and other legacy attributes.
    Other(String),
}

impl From<String> for SourceKind {
    fn from(v: String) -> Self {
        match v.as_str() {
            "cname" => SourceKind::Cname,
            "msid" => SourceKind::Msid,
            _ => SourceKind::Other(v),
        }
    }
}

/// One `a=ssrc-group:<semantics> <ssrc> ...` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceGroup {
    pub semantics: GroupSemantics,
    pub ssrcs: Vec<Ssrc>,
}

impl SourceGroup {
    pub fn sim(ssrcs: Vec<Ssrc>) -> Self {
        SourceGroup {
            semantics: GroupSemantics::Sim,
            ssrcs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupSemantics {
    /// Simulcast layers, lowest quality first.
    Sim,
    /// `<normal stream> <repair stream>`
    Fid,
    /// FEC-FR and friends.
    Other(String),
}

impl From<String> for GroupSemantics {
    fn from(v: String) -> Self {
        match v.as_str() {
            "SIM" => GroupSemantics::Sim,
            "FID" => GroupSemantics::Fid,
            _ => GroupSemantics::Other(v),
        }
    }
}

impl fmt::Display for Sdp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let eol = self.line_end.as_str();
        let mut lines = self.lines().peekable();
        while let Some(line) = lines.next() {
            write!(f, "{line}")?;
            if lines.peek().is_some() || self.trailing_line_end {
                write!(f, "{eol}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Audio => write!(f, "audio"),
            MediaType::Video => write!(f, "video"),
            MediaType::Application => write!(f, "application"),
            MediaType::Unknown(v) => write!(f, "{v}"),
        }
    }
}

impl fmt::Display for MediaAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use MediaAttribute::*;
        match self {
            Mid(v) => write!(f, "a=mid:{v}"),
            RecvOnly => write!(f, "a=recvonly"),
            SendRecv => write!(f, "a=sendrecv"),
            SendOnly => write!(f, "a=sendonly"),
            Inactive => write!(f, "a=inactive"),
            Msid(v) => write!(f, "a=msid:{v}"),
            SsrcGroup(v) => write!(f, "a=ssrc-group:{v}"),
            Ssrc(v) => write!(f, "a=ssrc:{v}"),
            Unused(v) => write!(f, "a={v}"),
            Other(typ, v) => write!(f, "{typ}={v}"),
        }
    }
}

impl fmt::Display for Msid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.stream_id)?;
        if let Some(track_id) = &self.track_id {
            write!(f, " {track_id}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SourceAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", *self.ssrc, self.kind, self.value)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Cname => write!(f, "cname"),
            SourceKind::Msid => write!(f, "msid"),
            SourceKind::Other(v) => write!(f, "{v}"),
        }
    }
}

impl fmt::Display for SourceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.semantics)?;
        for ssrc in &self.ssrcs {
            write!(f, " {}", **ssrc)?;
        }
        Ok(())
    }
}

impl fmt::Display for GroupSemantics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupSemantics::Sim => write!(f, "SIM"),
            GroupSemantics::Fid => write!(f, "FID"),
            GroupSemantics::Other(v) => write!(f, "{v}"),
        }
    }
}
