//! Server code table.

/// Three-letter chat codes and the full server names they stand for.
pub const KNOWN_SERVERS: [(&str, &str); 3] =
    [("Har", "Harmony"), ("Mel", "Melody"), ("Cad", "Cadence")];

/// Resolve a server code to its full name.
///
/// Unknown codes are valid data and come back unchanged.
#[must_use]
pub fn resolve_server(code: &str) -> String {
    KNOWN_SERVERS
        .iter()
        .find(|(known, _)| *known == code)
        .map_or(code, |&(_, name)| name)
        .to_string()
}
