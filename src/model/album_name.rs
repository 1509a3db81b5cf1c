//! Album names embedded in selection attributes
//!
//! Whitespace does not survive the round trip through an album tile's
//! selection data, so every whitespace character is swapped for a sentinel
//! token before embedding and mapped back to a single space on selection.
//! A name that already contains the sentinel literally will not round-trip.

pub const SENTINEL: &str = "unique.combo.of.words";

pub fn sanitize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_whitespace() {
            out.push_str(SENTINEL);
        } else {
            out.push(c);
        }
    }
    out
}

pub fn desanitize(name: &str) -> String {
    name.replace(SENTINEL, " ")
}
