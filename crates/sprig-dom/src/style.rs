use crate::StylesMap;

/// Convert a kebab-case property name to camelCase.
///
/// Only a `-` followed by a lowercase ASCII letter is folded, so
/// `font-size` becomes `fontSize` and an already camelCase name is
/// returned unchanged.
#[must_use]
pub fn kebab_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '-'
            && let Some(&next) = chars.peek()
            && next.is_ascii_lowercase()
        {
            out.push(next.to_ascii_uppercase());
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}

/// Convert a camelCase property name to kebab-case.
#[must_use]
pub fn camel_to_kebab(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Parse the value of a `style` attribute into a camelCase-keyed map.
///
/// Declarations are split on `;`, then on the first `:`. Declarations with
/// an empty name or value are dropped; a repeated property keeps its first
/// position and its last value.
#[must_use]
pub fn parse_style_declarations(value: &str) -> StylesMap {
    let mut styles = StylesMap::new();
    for declaration in value.split(';') {
        let Some((name, value)) = declaration.split_once(':') else {
            continue;
        };
        let (name, value) = (name.trim(), value.trim());
        if name.is_empty() || value.is_empty() {
            continue;
        }
        let _ = styles.insert(kebab_to_camel(name), value.to_string());
    }
    styles
}

/// Render a style map as a `style` attribute value: `prop: value; prop2: value2`.
#[must_use]
pub fn format_style(styles: &StylesMap) -> String {
    styles
        .iter()
        .map(|(name, value)| format!("{}: {value}", camel_to_kebab(name)))
        .collect::<Vec<_>>()
        .join("; ")
}
