//! Inter-wiki Link Rewriting
//!
//! Survey fragments are written for the wiki they came from; pasted into a
//! report page elsewhere, their links would point at the wrong wiki. Every
//! link therefore gets the source wiki's interlanguage prefix.

// TODO: confirm the intended interwiki prefixes for commons.wikimedia.org
// ("c") and meta.wikimedia.org ("m") and extend the table; only Wikidata is
// mapped today.

/// Interlanguage prefix for a wiki hostname: the first dot-delimited label
/// (`de.wiktionary.org` -> `de`), except Wikidata, whose first label (`www`)
/// is useless as a prefix.
pub fn wiki_prefix(host: &str) -> &str {
    if host == "www.wikidata.org" {
        return "d";
    }
    host.split('.').next().unwrap_or(host)
}

/// Prefix every internal link in `fragment` for pasting on another wiki.
///
/// `[[:` links are rewritten before `[[Special` links; in the other order
/// the freshly prefixed `[[:<prefix>:Special` would match `[[:` again and
/// come out double-prefixed.
pub fn rewrite_links(fragment: &str, prefix: &str) -> String {
    fragment
        .replace("[[:", &format!("[[:{}:", prefix))
        .replace("[[Special", &format!("[[:{}:Special", prefix))
}
