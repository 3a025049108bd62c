/// An opening tag found at the very start of a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenTag<'a> {
    /// Tag name as written (not yet lowercased).
    pub name: &'a str,
    /// Raw text between the name and the closing `>`, leading whitespace
    /// removed. May end in `/` for `<img ... />`.
    pub attributes: &'a str,
    /// Byte length of the whole tag including `<` and `>`.
    pub len: usize,
}

/// Match `<name attrs>` at the start of `input`.
///
/// The name is a run of ASCII letters and digits. The tag ends at the first
/// `>` outside a quoted attribute value. Returns `None` when `input` does
/// not start with such a tag (end tags, `<!`, a bare `<`, no `>` at all).
#[must_use]
pub fn match_open_tag(input: &str) -> Option<OpenTag<'_>> {
    let rest = input.strip_prefix('<')?;
    let name_len = rest.bytes().take_while(u8::is_ascii_alphanumeric).count();
    if name_len == 0 {
        return None;
    }
    let after_name = 1 + name_len;
    let close = after_name + find_tag_end(&input[after_name..])?;
    Some(OpenTag {
        name: &rest[..name_len],
        attributes: input[after_name..close].trim_start(),
        len: close + 1,
    })
}

/// Offset of the `>` that ends a tag, skipping quoted values. An
/// unbalanced quote falls back to the first `>`.
fn find_tag_end(input: &str) -> Option<usize> {
    let mut quote = None;
    for (i, b) in input.bytes().enumerate() {
        match (quote, b) {
            (Some(q), _) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(b),
            (None, b'>') => return Some(i),
            (None, _) => {}
        }
    }
    input.find('>')
}
