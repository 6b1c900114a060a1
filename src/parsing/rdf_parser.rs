use std::borrow::Cow;

use crate::config::{LiteralPolicy, ResourceExtraction};
use crate::core::Triple;

/// DBPedia namespaces removed from resource URIs.
pub const DBPEDIA_PREFIXES: [&str; 2] =
    ["http://dbpedia.org/resource/", "http://dbpedia.org/ontology/"];

/// Suffixes of disambiguation pages, collapsed to a single `_` in this order.
const DISAMBIGUATION_VARIANTS: [&str; 8] = [
    "_(disambiguation)",
    "_(disambiguation",
    "_disambiguation_page",
    "_disambiguation_",
    "_disambiguation2",
    ":disambiguation",
    "/disambiguation",
    "_disambiguation",
];

/// Split a raw line into subject, predicate and object.
///
/// The line is trimmed and its last character (the `.` terminator) dropped. Fields
/// are separated by single spaces and everything after the second separator stays
/// in the object, so quoted literals with spaces survive intact.
/// Returns `None` when fewer than three fields are present.
pub fn split_triple(line: &str) -> Option<(&str, &str, &str)> {
    let trimmed = line.trim();
    let body = match trimmed.char_indices().last() {
        Some((idx, _)) => &trimmed[..idx],
        None => trimmed,
    };

    let mut fields = body.trim().splitn(3, ' ');
    let subject = fields.next()?;
    let predicate = fields.next()?;
    let object = fields.next()?;
    Some((subject, predicate, object))
}

/// Clean one field of a triple into a vertex name.
///
/// Bracketed URIs lose their brackets and then either a DBPedia prefix or
/// everything up to the last path segment. Anything else is a literal: it becomes
/// the empty string under [`LiteralPolicy::Ignore`], otherwise the text between the
/// first pair of double quotes. The result always goes through [`clean_text`].
pub fn clean_resource(
    field: &str,
    literals: LiteralPolicy,
    extraction: ResourceExtraction,
) -> String {
    let resolved: Cow<'_, str> = match field.strip_prefix('<').and_then(|f| f.strip_suffix('>')) {
        Some(uri) => resource_name(uri, extraction),
        None => match literals {
            LiteralPolicy::Ignore => Cow::Borrowed(""),
            LiteralPolicy::Keep => Cow::Borrowed(literal_text(field)),
        },
    };

    clean_text(&resolved)
}

/// Normalize text into the uniform vertex-name form.
///
/// Percent escapes and HTML entities are decoded, quotes, backticks, backslashes
/// and asterisks are dropped, spaces become underscores, and the known
/// disambiguation suffixes are collapsed to `_`.
pub fn clean_text(text: &str) -> String {
    let decoded = urlencoding::decode_binary(text.as_bytes());
    let decoded = String::from_utf8_lossy(&decoded);
    let unescaped = html_escape::decode_html_entities(&decoded);

    let mut name: String =
        unescaped.chars().filter(|c| !matches!(c, '"' | '\'' | '`')).collect::<String>();
    name = name.replace(' ', "_");

    for variant in DISAMBIGUATION_VARIANTS {
        if name.contains(variant) {
            name = name.replace(variant, "_");
        }
    }

    name.retain(|c| c != '\\' && c != '*');
    name
}

/// Split and clean a full line. Returns `None` for lines without three fields.
pub fn clean_line(
    line: &str,
    literals: LiteralPolicy,
    extraction: ResourceExtraction,
) -> Option<Triple> {
    let (subject, predicate, object) = split_triple(line)?;
    Some(Triple {
        subject: clean_resource(subject, literals, extraction),
        predicate: clean_resource(predicate, literals, extraction),
        object: clean_resource(object, literals, extraction),
    })
}

fn resource_name(uri: &str, extraction: ResourceExtraction) -> Cow<'_, str> {
    if extraction == ResourceExtraction::StripDbpediaPrefix {
        if let Some(prefix) = DBPEDIA_PREFIXES.iter().find(|p| uri.contains(*p)) {
            return Cow::Owned(uri.replace(prefix, ""));
        }
    }
    Cow::Borrowed(last_path_segment(uri))
}

fn literal_text(field: &str) -> &str {
    field.split('"').nth(1).unwrap_or(field)
}

/// Final component of a `/`-separated path after `.` and `..` are resolved.
fn last_path_segment(path: &str) -> &str {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    match segments.last() {
        Some(last) => *last,
        None if rooted => "",
        None => ".",
    }
}
