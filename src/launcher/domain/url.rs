//! Display URL for a launched notebook.

/// Builds the URL shown to the user for a server bound to `host:port`.
///
/// Wildcard and loopback IPv4 hosts are shown as `localhost`; any other host
/// is used verbatim.
#[must_use]
pub fn display_url(host: &str, port: u16) -> String {
    let shown = match host {
        "0.0.0.0" | "127.0.0.1" => "localhost",
        other => other,
    };
    format!("http://{shown}:{port}")
}
