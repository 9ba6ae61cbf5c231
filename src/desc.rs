use std::fmt;

use serde::{Deserialize, Serialize};

/// The `type` of a session description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdpType {
    /// SDP offer.
    Offer,
    /// Provisional answer.
    Pranswer,
    /// SDP answer.
    Answer,
    /// Rollback to the last stable state. Carries no SDP.
    Rollback,
}

impl fmt::Display for SdpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SdpType::Offer => "offer",
            SdpType::Pranswer => "pranswer",
            SdpType::Answer => "answer",
            SdpType::Rollback => "rollback",
        };
        write!(f, "{s}")
    }
}

/// A session description as handed around by the signaling layer.
///
/// Serializes to the same JSON shape as the browser's `RTCSessionDescription`.
///
/// ```
/// use simulcast_sdp::{SdpType, SessionDescription};
///
/// let desc = SessionDescription::offer("v=0\r\n");
/// let json = serde_json::to_string(&desc).unwrap();
///
/// assert_eq!(json, r#"{"type":"offer","sdp":"v=0\r\n"}"#);
///
/// let back: SessionDescription = serde_json::from_str(&json).unwrap();
/// assert_eq!(back.typ, SdpType::Offer);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescription {
    /// Type of the description.
    #[serde(rename = "type")]
    pub typ: SdpType,

    /// The SDP text, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdp: Option<String>,
}

impl SessionDescription {
    /// Creates a new description.
    pub fn new(typ: SdpType, sdp: impl Into<String>) -> Self {
        SessionDescription {
            typ,
            sdp: Some(sdp.into()),
        }
    }

    /// Creates an offer.
    pub fn offer(sdp: impl Into<String>) -> Self {
        Self::new(SdpType::Offer, sdp)
    }

    /// Creates an answer.
    pub fn answer(sdp: impl Into<String>) -> Self {
        Self::new(SdpType::Answer, sdp)
    }

    /// Creates a rollback, which has no SDP.
    pub fn rollback() -> Self {
        SessionDescription {
            typ: SdpType::Rollback,
            sdp: None,
        }
    }

    /// The SDP text, unless absent or empty.
    pub fn sdp_text(&self) -> Option<&str> {
        self.sdp.as_deref().filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn serialize_answer() {
        let desc = SessionDescription::answer("v=0\r\n");
        let json = serde_json::to_string(&desc).unwrap();
        assert_eq!(json, "{\"type\":\"answer\",\"sdp\":\"v=0\\r\\n\"}");
    }

    #[test]
    fn serialize_rollback_without_sdp() {
        let json = serde_json::to_string(&SessionDescription::rollback()).unwrap();
        assert_eq!(json, "{\"type\":\"rollback\"}");
    }

    #[test]
    fn deserialize_pranswer() {
        let desc: SessionDescription =
            serde_json::from_str("{\"sdp\":\"v=0\\n\",\"type\":\"pranswer\"}").unwrap();
        assert_eq!(desc.typ, SdpType::Pranswer);
        assert_eq!(desc.sdp_text(), Some("v=0\n"));
    }

    #[test]
    fn deserialize_unknown_type_fails() {
        let res = serde_json::from_str::<SessionDescription>("{\"type\":\"bogus\",\"sdp\":\"\"}");
        assert!(res.is_err());
    }

    #[test]
    fn empty_sdp_has_no_text() {
        assert_eq!(SessionDescription::offer("").sdp_text(), None);
        assert_eq!(SessionDescription::rollback().sdp_text(), None);
    }

    #[test]
    fn type_display() {
        assert_eq!(SdpType::Pranswer.to_string(), "pranswer");
    }
}
