use sprig_dom::{AttributesMap, StylesMap, parse_style_declarations};

/// Attributes of one opening tag, with `style` already split out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedAttributes {
    /// Attributes in source order, never containing `style`.
    pub attrs: AttributesMap,
    /// Declarations of the `style` attribute, camelCase keys.
    pub styles: StylesMap,
}

/// Parse the raw text between a tag name and its `>`.
///
/// Each attribute is `name`, optionally followed by `=` and a double-quoted,
/// single-quoted or bare value (a bare value ends at whitespace or `>`).
/// A name without `=` is a boolean attribute with an empty value. Anything
/// else, including a value whose quote is never closed, is skipped. When a
/// name repeats, the first position and the last value win.
#[must_use]
pub fn parse_attributes(input: &str) -> ParsedAttributes {
    let mut attrs = AttributesMap::new();
    let mut scanner = AttributeScanner::new(input);

    while !scanner.at_end() {
        scanner.skip_whitespace();
        let name = scanner.take_while(is_name_char);
        if name.is_empty() {
            // `/`, a stray quote or `=`: not an attribute start
            let _ = scanner.consume();
            continue;
        }

        scanner.skip_whitespace();
        if scanner.peek() != Some('=') {
            let _ = attrs.insert(name.to_string(), String::new());
            continue;
        }
        let _ = scanner.consume();
        scanner.skip_whitespace();

        if let Some(value) = scanner.value() {
            let _ = attrs.insert(name.to_string(), value.to_string());
        }
    }

    let mut style = None;
    attrs.retain(|name, value| {
        if name.eq_ignore_ascii_case("style") {
            style = Some(std::mem::take(value));
            false
        } else {
            true
        }
    });

    ParsedAttributes {
        styles: style.as_deref().map(parse_style_declarations).unwrap_or_default(),
        attrs,
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.' | '@')
}

/// Cursor over an attribute list.
struct AttributeScanner<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> AttributeScanner<'a> {
    const fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn consume(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> &'a str {
        let input = self.input;
        let start = self.position;
        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }
            self.position += c.len_utf8();
        }
        &input[start..self.position]
    }

    fn skip_whitespace(&mut self) {
        let _ = self.take_while(char::is_whitespace);
    }

    /// Value after `=`. `None` for a missing value or an unclosed quote;
    /// an unclosed quote swallows the rest of the input.
    fn value(&mut self) -> Option<&'a str> {
        match self.peek()? {
            quote @ ('"' | '\'') => {
                let _ = self.consume();
                let value = self.take_while(|c| c != quote);
                self.consume().map(|_| value)
            }
            _ => {
                let value = self.take_while(|c| !c.is_whitespace() && c != '>');
                (!value.is_empty()).then_some(value)
            }
        }
    }
}
