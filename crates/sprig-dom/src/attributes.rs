use crate::style::{kebab_to_camel, parse_style_declarations};
use crate::{DomError, DomTree, ElementData, NodeId, NodeType};

/// Characters that would break the `name="value"` form on output.
const FORBIDDEN_IN_ATTRIBUTE_NAME: [char; 6] = ['"', '\'', '<', '>', '/', '='];

/// Characters that would break a `prop: value` declaration on output.
const FORBIDDEN_IN_STYLE_NAME: [char; 4] = [':', ';', '"', '\''];

fn validate_name(name: &str, what: &str, forbidden: &[char]) -> Result<(), DomError> {
    if name.is_empty()
        || name
            .chars()
            .any(|c| c.is_whitespace() || forbidden.contains(&c))
    {
        return Err(DomError::InvalidArgument(format!("invalid {what} name {name:?}")));
    }
    Ok(())
}

impl DomTree {
    /// Element data for a mutation, or the reason it cannot be mutated.
    fn element_for(&mut self, id: NodeId, operation: &'static str) -> Result<&mut ElementData, DomError> {
        let node = self.get_mut(id).ok_or(DomError::UnknownNode(id))?;
        match &mut node.node_type {
            NodeType::Element(data) => Ok(data),
            other => Err(DomError::UnsupportedOperation {
                operation,
                target: other.kind().to_string(),
            }),
        }
    }

    /// Get an attribute value.
    ///
    /// Always `None` for `#text` and `#fragment` nodes. The `style`
    /// attribute lives in the style map and never surfaces here.
    #[must_use]
    pub fn get_attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.as_element(id)?.attrs.get(name).map(String::as_str)
    }

    /// Set (`Some`) or delete (`None`) an attribute.
    ///
    /// Assigning `style` replaces the whole style map with the parsed
    /// declarations; deleting it clears the map.
    ///
    /// # Errors
    ///
    /// [`DomError::UnsupportedOperation`] on `#text`/`#fragment` nodes,
    /// [`DomError::InvalidArgument`] for an unusable name.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: Option<&str>) -> Result<&mut Self, DomError> {
        let element = self.element_for(id, "set attributes")?;
        validate_name(name, "attribute", &FORBIDDEN_IN_ATTRIBUTE_NAME)?;

        if name.eq_ignore_ascii_case("style") {
            element.styles = value.map(parse_style_declarations).unwrap_or_default();
        } else {
            match value {
                Some(value) => {
                    let _ = element.attrs.insert(name.to_string(), value.to_string());
                }
                None => {
                    let _ = element.attrs.shift_remove(name);
                }
            }
        }
        Ok(self)
    }

    /// Apply [`DomTree::set_attr`] for each entry, in order.
    ///
    /// All names are checked first; a rejected batch changes nothing.
    ///
    /// # Errors
    ///
    /// As [`DomTree::set_attr`].
    pub fn set_attrs<'a, I>(&mut self, id: NodeId, attrs: I) -> Result<&mut Self, DomError>
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        let _ = self.element_for(id, "set attributes")?;
        let entries: Vec<_> = attrs.into_iter().collect();
        for (name, _) in &entries {
            validate_name(name, "attribute", &FORBIDDEN_IN_ATTRIBUTE_NAME)?;
        }
        for (name, value) in entries {
            let _ = self.set_attr(id, name, value)?;
        }
        Ok(self)
    }

    /// Get an inline style value.
    ///
    /// `prop` may be written in camelCase or kebab-case; the camelCase key
    /// is tried first, then the name as written. Empty values read as
    /// absent. Always `None` for `#text` and `#fragment` nodes.
    #[must_use]
    pub fn get_style(&self, id: NodeId, prop: &str) -> Option<&str> {
        let element = self.as_element(id)?;
        let camel = kebab_to_camel(prop);
        [camel.as_str(), prop].into_iter().find_map(|key| {
            element
                .styles
                .get(key)
                .map(String::as_str)
                .filter(|value| !value.is_empty())
        })
    }

    /// Set (`Some`) or delete (`None`) an inline style.
    ///
    /// Values are stored under the camelCase key. Deletion removes both the
    /// camelCase key and the name as written.
    ///
    /// # Errors
    ///
    /// [`DomError::UnsupportedOperation`] on `#text`/`#fragment` nodes,
    /// [`DomError::InvalidArgument`] for an unusable property name.
    pub fn set_style(&mut self, id: NodeId, prop: &str, value: Option<&str>) -> Result<&mut Self, DomError> {
        let element = self.element_for(id, "set styles")?;
        validate_name(prop, "style property", &FORBIDDEN_IN_STYLE_NAME)?;

        let camel = kebab_to_camel(prop);
        match value {
            Some(value) => {
                let _ = element.styles.insert(camel, value.to_string());
            }
            None => {
                let _ = element.styles.shift_remove(&camel);
                let _ = element.styles.shift_remove(prop);
            }
        }
        Ok(self)
    }

    /// Apply [`DomTree::set_style`] for each entry, in order.
    ///
    /// All names are checked first; a rejected batch changes nothing.
    ///
    /// # Errors
    ///
    /// As [`DomTree::set_style`].
    pub fn set_styles<'a, I>(&mut self, id: NodeId, styles: I) -> Result<&mut Self, DomError>
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        let _ = self.element_for(id, "set styles")?;
        let entries: Vec<_> = styles.into_iter().collect();
        for (prop, _) in &entries {
            validate_name(prop, "style property", &FORBIDDEN_IN_STYLE_NAME)?;
        }
        for (prop, value) in entries {
            let _ = self.set_style(id, prop, value)?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A `<div>` whose style map holds `font-size` under the literal key.
    fn div_with_kebab_style(value: &str) -> DomTree {
        let mut tree = DomTree::with_root(NodeType::Element(ElementData::new("div")));
        let _ = tree
            .element_for(NodeId::ROOT, "set styles")
            .unwrap()
            .styles
            .insert("font-size".to_string(), value.to_string());
        tree
    }

    #[test]
    fn test_set_style_none_removes_both_spellings() {
        let mut tree = div_with_kebab_style("1px");
        tree.set_style(NodeId::ROOT, "fontSize", Some("2px")).unwrap();

        tree.set_style(NodeId::ROOT, "font-size", None).unwrap();

        assert!(tree.as_element(NodeId::ROOT).unwrap().styles.is_empty());
    }

    #[test]
    fn test_get_style_falls_back_to_literal_key() {
        let tree = div_with_kebab_style("9px");

        assert_eq!(tree.get_style(NodeId::ROOT, "font-size"), Some("9px"));
        assert_eq!(tree.get_style(NodeId::ROOT, "fontSize"), None);
    }
}
