//! Reference tokenizer
//!
//! Splits raw token values into literal text and `{category.path}`
//! references. `${...}` placeholders belong to the composite system layer
//! and are recognized only so they can be carried through verbatim. A small
//! hand-rolled scanner, not a regex: the grammar is three tokens wide and
//! the dot-escaping rule for names is easier to state explicitly.

/// One piece of a scanned value
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment<'a> {
    /// Literal text, emitted as-is
    Text(&'a str),
    /// `{category.path}`; `raw` is the full placeholder including braces
    Reference {
        category: &'a str,
        path: &'a str,
        raw: &'a str,
    },
    /// `${...}` placeholder, reserved for the system layer, always verbatim
    System(&'a str),
}

/// Normalize a token name for addressing: literal dots become dashes, so a
/// spacing token named `0.5` is referenced as `{spacing.0.5}` and keyed as
/// `0-5` without colliding with path separators.
pub fn normalize_name(name: &str) -> String {
    name.replace('.', "-")
}

/// Scan a value into segments. Anything that does not parse as a reference
/// stays literal text; the scanner never fails.
pub fn tokenize(text: &str) -> Vec<Segment<'_>> {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        // `${...}` is reserved for the system layer
        if bytes[i] == b'$' && bytes.get(i + 1) == Some(&b'{') {
            if let Some(close) = find_close(bytes, i + 2) {
                if literal_start < i {
                    segments.push(Segment::Text(&text[literal_start..i]));
                }
                segments.push(Segment::System(&text[i..=close]));
                literal_start = close + 1;
                i = close + 1;
                continue;
            }
        }

        if bytes[i] == b'{' {
            if let Some(close) = find_close(bytes, i + 1) {
                let body = &text[i + 1..close];
                if let Some((category, path)) = split_reference(body) {
                    if literal_start < i {
                        segments.push(Segment::Text(&text[literal_start..i]));
                    }
                    segments.push(Segment::Reference {
                        category,
                        path,
                        raw: &text[i..=close],
                    });
                    literal_start = close + 1;
                    i = close + 1;
                    continue;
                }
            }
        }

        i += 1;
    }

    if literal_start < text.len() {
        segments.push(Segment::Text(&text[literal_start..]));
    }

    segments
}

/// Find the `}` closing a placeholder opened just before `from`; gives up
/// on nesting or end of input
fn find_close(bytes: &[u8], from: usize) -> Option<usize> {
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'}' => return Some(i),
            b'{' => return None,
            _ => i += 1,
        }
    }
    None
}

/// Split `category.dotted.path`; the category must be alphabetic, the path
/// non-empty with name-safe characters
fn split_reference(body: &str) -> Option<(&str, &str)> {
    let (category, path) = body.split_once('.')?;
    if category.is_empty() || !category.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    if path.is_empty()
        || !path
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b'-' || b == b'_')
    {
        return None;
    }
    Some((category, path))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_plain_text() {
        assert_eq!(tokenize("1rem"), vec![Segment::Text("1rem")]);
    }

    #[test]
    fn test_single_reference() {
        assert_eq!(
            tokenize("{color.brand.500}"),
            vec![Segment::Reference {
                category: "color",
                path: "brand.500",
                raw: "{color.brand.500}",
            }]
        );
    }

    #[test]
    fn test_reference_inside_text() {
        assert_eq!(
            tokenize("calc({spacing.2} + 1rem)"),
            vec![
                Segment::Text("calc("),
                Segment::Reference {
                    category: "spacing",
                    path: "2",
                    raw: "{spacing.2}",
                },
                Segment::Text(" + 1rem)"),
            ]
        );
    }

    #[test]
    fn test_numeric_dotted_name() {
        assert_eq!(
            tokenize("{spacing.0.5}"),
            vec![Segment::Reference {
                category: "spacing",
                path: "0.5",
                raw: "{spacing.0.5}",
            }]
        );
        assert_eq!(normalize_name("0.5"), "0-5");
    }

    #[test]
    fn test_malformed_stays_text() {
        assert_eq!(tokenize("{nodot}"), vec![Segment::Text("{nodot}")]);
        assert_eq!(tokenize("{unclosed"), vec![Segment::Text("{unclosed")]);
        assert_eq!(
            tokenize("{123.path}"),
            vec![Segment::Text("{123.path}")]
        );
    }

    #[test]
    fn test_system_placeholder_reserved() {
        assert_eq!(
            tokenize("${light.color.brand}"),
            vec![Segment::System("${light.color.brand}")]
        );
    }

    #[test]
    fn test_css_block_is_not_a_reference() {
        assert_eq!(
            tokenize("hsl(0 0% 100% / 0.5)"),
            vec![Segment::Text("hsl(0 0% 100% / 0.5)")]
        );
    }
}
