//! Wrapper for values that identify a user.
//!
//! The `cname` and `msid` of an SDP tie a media section to a user and a
//! stream. With the `pii` feature enabled any value wrapped in `Pii` is
//! formatted as `{REDACTED}`, otherwise the inner value is shown as normal.
//!
//! Use it for debug, info, warn and error logs. Trace logs are expected to be
//! off in production and may show the raw value.

use core::fmt;
use core::ops::Deref;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pii<T>(pub T);

impl<T: fmt::Display> fmt::Display for Pii<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if cfg!(feature = "pii") {
            write!(f, "{{REDACTED}}")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Pii<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if cfg!(feature = "pii") {
            write!(f, "{{REDACTED}}")
        } else {
            write!(f, "{:?}", self.0)
        }
    }
}

impl<T> Deref for Pii<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cname_display() {
        let cname = Pii("xeXs3aE9AOBn00yJ");

        #[cfg(feature = "pii")]
        assert_eq!(cname.to_string(), "{REDACTED}");

        #[cfg(not(feature = "pii"))]
        assert_eq!(cname.to_string(), "xeXs3aE9AOBn00yJ");
    }

    #[test]
    fn optional_debug() {
        let msid = Some("stream track").map(Pii);

        #[cfg(feature = "pii")]
        assert_eq!(format!("{msid:?}"), "Some({REDACTED})");

        #[cfg(not(feature = "pii"))]
        assert_eq!(format!("{msid:?}"), "Some(\"stream track\")");
    }

    #[test]
    fn deref_to_inner() {
        let cname = Pii(String::from("abc"));
        assert_eq!(cname.len(), 3);
    }
}
