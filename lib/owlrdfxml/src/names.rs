//! XML name checks and URI splitting.

/// Checks the `NCName` production: an XML name without colon, as required for `rdf:ID` and `rdf:nodeID`.
pub fn is_nc_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c != ':' && is_name_start_char(c))
        && chars.all(|c| c != ':' && is_name_char(c))
}

pub fn is_name_start_char(c: char) -> bool {
    // ":" | [A-Z] | "_" | [a-z] | [#xC0-#xD6] | [#xD8-#xF6] | [#xF8-#x2FF] | [#x370-#x37D] | [#x37F-#x1FFF] | [#x200C-#x200D] | [#x2070-#x218F] | [#x2C00-#x2FEF] | [#x3001-#xD7FF] | [#xF900-#xFDCF] | [#xFDF0-#xFFFD] | [#x10000-#xEFFFF]
    matches!(c,
        ':'
        | 'A'..='Z'
        | '_'
        | 'a'..='z'
        | '\u{00C0}'..='\u{00D6}'
        | '\u{00D8}'..='\u{00F6}'
        | '\u{00F8}'..='\u{02FF}'
        | '\u{0370}'..='\u{037D}'
        | '\u{037F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

pub fn is_name_char(c: char) -> bool {
    // NameStartChar | "-" | "." | [0-9] | #xB7 | [#x0300-#x036F] | [#x203F-#x2040]
    is_name_start_char(c)
        || matches!(
            c,
            '-' | '.' | '0'..='9' | '\u{B7}' | '\u{0300}'..='\u{036F}' | '\u{203F}'..='\u{2040}'
        )
}

pub fn is_whitespace(text: &str) -> bool {
    text.bytes().all(|c| matches!(c, b' ' | b'\t' | b'\n' | b'\r'))
}

/// Splits a URI into a namespace and a local name usable as an XML element name.
///
/// The local name is empty if the URI does not end with a name.
pub fn split_uri(uri: &str) -> (&str, &str) {
    let Some(position_base) = uri.rfind(|c| !is_name_char(c) || c == ':') else {
        return (uri, "");
    };
    match uri[position_base..].find(|c| is_name_start_char(c) && c != ':') {
        Some(position_add) => uri.split_at(position_base + position_add),
        None => (uri, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nc_names() {
        assert!(is_nc_name("Dog"));
        assert!(is_nc_name("_a-1.b"));
        assert!(!is_nc_name("1a"));
        assert!(!is_nc_name("a:b"));
        assert!(!is_nc_name(""));
        assert!(!is_nc_name("a b"));
    }

    #[test]
    fn split_uris() {
        assert_eq!(
            split_uri("http://www.w3.org/2002/07/owl#Class"),
            ("http://www.w3.org/2002/07/owl#", "Class")
        );
        assert_eq!(
            split_uri("http://example.com/zoo/hasOwner"),
            ("http://example.com/zoo/", "hasOwner")
        );
        assert_eq!(split_uri("http://example.com/"), ("http://example.com/", ""));
        assert_eq!(split_uri("http://example.com#1a"), ("http://example.com#1", "a"));
    }
}
