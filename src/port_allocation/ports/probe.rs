//! Bind-test port.

/// Answers whether a TCP port can be bound right now.
///
/// A `true` answer is only a snapshot: the port may be taken again before the
/// caller binds it.
pub trait PortProbe: Send + Sync {
    /// Returns whether a listening socket can be bound at `(host, port)`.
    fn is_bindable(&self, host: &str, port: u16) -> bool;
}
