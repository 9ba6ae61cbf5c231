/// Media direction of an m-line.
///
/// Defaults to `SendRecv`, which RFC 4566 says to assume when an m-line
/// has no direction attribute.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Send only direction.
    SendOnly,
    /// Receive only direction.
    RecvOnly,
    /// Bi-directional.
    #[default]
    SendRecv,
    /// Disabled direction.
    Inactive,
}

impl Direction {
    /// Whether this direction is a sending direction.
    ///
    /// Only sections we send on are candidates for simulcast.
    pub fn is_sending(&self) -> bool {
        matches!(self, Direction::SendOnly | Direction::SendRecv)
    }
}
