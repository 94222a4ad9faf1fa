//! Resolution of the URI references found in documents.

use oxiri::Iri;
use std::ops::Range;

/// Checks if the value is an absolute IRI.
#[inline]
pub fn is_absolute(value: &str) -> bool {
    Iri::parse(value).is_ok()
}

/// Removes the `#fragment` part of a URI.
#[inline]
pub fn strip_fragment(uri: &str) -> &str {
    uri.split_once('#').map_or(uri, |(before, _)| before)
}

/// Turns the value of an `rdf:about` or `rdf:resource` attribute into an absolute URI.
///
/// ```
/// use owlrdfxml::qualify;
///
/// let base = "http://example.org/a/b/c.owl";
/// assert_eq!(qualify("../d#X", base), "http://example.org/a/d#X");
/// assert_eq!(qualify("#X", base), "http://example.org/a/b/c.owl#X");
/// assert_eq!(qualify("", base), base);
/// assert_eq!(qualify("http://example.com/e", base), "http://example.com/e");
/// ```
pub fn qualify(value: &str, base: &str) -> String {
    if value.is_empty() {
        return base.into();
    }
    if is_absolute(value) {
        return value.into();
    }
    if value.starts_with('#') {
        return format!("{base}{value}");
    }
    let Ok(base_iri) = Iri::parse(base) else {
        return format!("{base}{value}");
    };
    if value.starts_with("//") || value.starts_with("\\\\") {
        return format!("{}:{value}", base_iri.scheme());
    }
    let origin = match base_iri.authority() {
        Some(authority) => format!("{}://{authority}", base_iri.scheme()),
        None => format!("{}:", base_iri.scheme()),
    };
    if value.starts_with('/') || value.starts_with('\\') {
        return format!("{origin}{value}");
    }
    let path = base_iri.path();
    let folder = match path.rfind(['/', '\\']) {
        Some(end) => &path[..=end],
        None => "/",
    };
    if value.starts_with("../") || value.starts_with("..\\") {
        return format!("{origin}{}", collapse_parent_segments(&format!("{folder}{value}")));
    }
    format!("{origin}{folder}{value}")
}

/// Turns the value of an `rdf:ID` or a property name into an absolute URI.
///
/// ```
/// use owlrdfxml::prepend_base;
///
/// assert_eq!(prepend_base("Dog", "http://example.com/zoo"), "http://example.com/zoo#Dog");
/// assert_eq!(prepend_base("#Dog", "http://example.com/zoo"), "http://example.com/zoo#Dog");
/// assert_eq!(prepend_base("http://example.com/Cat", "http://example.com/zoo"), "http://example.com/Cat");
/// ```
pub fn prepend_base(id: &str, base: &str) -> String {
    if is_absolute(id) {
        id.into()
    } else if id.starts_with('#') {
        format!("{base}{id}")
    } else {
        format!("{base}#{id}")
    }
}

/// The shortest reference to `uri` from a document with the given base: `#fragment` when the URI
/// is a fragment of the base, the URI itself otherwise.
pub fn relative_reference<'a>(uri: &'a str, base: &str) -> &'a str {
    match uri.strip_prefix(base) {
        Some(rest) if !base.is_empty() && rest.starts_with('#') => rest,
        _ => uri,
    }
}

/// Replaces `/segment/../` by `/` until there is nothing left to collapse.
fn collapse_parent_segments(path: &str) -> String {
    let mut path = path.to_owned();
    while let Some(range) = next_parent_segment(&path) {
        path.replace_range(range, "/");
    }
    path
}

fn next_parent_segment(path: &str) -> Option<Range<usize>> {
    let mut previous_separator = None;
    for (i, c) in path.char_indices() {
        if c != '/' && c != '\\' {
            continue;
        }
        if let Some(start) = previous_separator {
            let segment = &path[start + 1..i];
            let rest = &path[i + 1..];
            if segment != ".."
                && (rest.starts_with("../") || rest.starts_with("..\\"))
            {
                return Some(start..i + 4);
            }
        }
        previous_separator = Some(i);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://example.org/a/b/c.owl";

    #[test]
    fn qualify_relative_references() {
        assert_eq!(qualify("../d#X", BASE), "http://example.org/a/d#X");
        assert_eq!(qualify("../../d", BASE), "http://example.org/d");
        assert_eq!(qualify("..\\d", BASE), "http://example.org/a/d");
        assert_eq!(qualify("#X", BASE), "http://example.org/a/b/c.owl#X");
        assert_eq!(qualify("", BASE), BASE);
        assert_eq!(qualify("d.owl", BASE), "http://example.org/a/b/d.owl");
        assert_eq!(qualify("/d.owl", BASE), "http://example.org/d.owl");
        assert_eq!(qualify("//example.com/d", BASE), "http://example.com/d");
        assert_eq!(qualify("urn:isbn:123", BASE), "urn:isbn:123");
    }

    #[test]
    fn qualify_against_a_base_without_authority() {
        assert_eq!(qualify("d", "urn:example:a/b"), "urn:example:a/d");
    }

    #[test]
    fn collapse_keeps_leading_parent_segments() {
        assert_eq!(collapse_parent_segments("/a/b/../../c"), "/c");
        assert_eq!(collapse_parent_segments("/../c"), "/../c");
    }

    #[test]
    fn references() {
        assert_eq!(
            relative_reference("http://example.com/zoo#Dog", "http://example.com/zoo"),
            "#Dog"
        );
        assert_eq!(
            relative_reference("http://example.com/zoology#Dog", "http://example.com/zoo"),
            "http://example.com/zoology#Dog"
        );
        assert_eq!(strip_fragment("http://example.com/zoo#"), "http://example.com/zoo");
    }
}
