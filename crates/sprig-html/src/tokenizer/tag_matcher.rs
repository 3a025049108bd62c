/// Find the end tag balancing an already-consumed `<tag_name ...>`.
///
/// `from` is the offset just past the opening tag; `tag_name` is lowercase.
/// Scanning keeps a depth counter starting at 1: a nested `<tag_name`
/// before the next `</tag_name>` increments it, otherwise the end tag
/// decrements it, and the end tag that brings it to zero is the match.
/// Only same-name tags are counted. Names compare ASCII case-insensitively.
///
/// Returns the offset of the matching `</tag_name>`, or `None` when the
/// element is never closed.
#[must_use]
pub fn find_matching_close(input: &str, tag_name: &str, from: usize) -> Option<usize> {
    let close_tag = format!("</{tag_name}>");
    let mut depth = 1usize;

    // Both positions stay valid until the scan moves past them.
    let mut close = find_ignore_case(input, &close_tag, from)?;
    let mut open = find_nested_open(input, tag_name, from);

    loop {
        match open {
            Some(at) if at < close => {
                depth += 1;
                open = find_nested_open(input, tag_name, at + 1 + tag_name.len());
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some(close);
                }
                close = find_ignore_case(input, &close_tag, close + close_tag.len())?;
            }
        }
    }
}

/// Returns true if `</tag_name>` occurs anywhere at or after `from`.
#[must_use]
pub fn has_close_tag(input: &str, tag_name: &str, from: usize) -> bool {
    find_ignore_case(input, &format!("</{tag_name}>"), from).is_some()
}

/// Next `<tag_name` at or after `from` that really opens that tag, i.e. is
/// followed by whitespace, `>`, `/` or the end of input (`<p` inside
/// `<pre>` does not count).
fn find_nested_open(input: &str, tag_name: &str, from: usize) -> Option<usize> {
    let open_tag = format!("<{tag_name}");
    let mut cursor = from;
    while let Some(at) = find_ignore_case(input, &open_tag, cursor) {
        let end = at + open_tag.len();
        match input.as_bytes().get(end) {
            None | Some(b'>' | b'/') => return Some(at),
            Some(b) if b.is_ascii_whitespace() => return Some(at),
            Some(_) => cursor = end,
        }
    }
    None
}

/// Byte offset of the first ASCII case-insensitive occurrence of `needle`
/// at or after `from`.
fn find_ignore_case(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let needle = needle.as_bytes();
    let window = haystack.as_bytes().get(from..)?;
    if needle.is_empty() || needle.len() > window.len() {
        return None;
    }
    window
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
        .map(|i| i + from)
}
