//! Parsing of `values` XML files.
//!
//! A values file declares string-like resources:
//!
//! ```xml
//! <resources>
//!     <string name="app_name">Demo</string>
//!     <string-array name="planets"><item>Earth</item></string-array>
//!     <plurals name="items"><item quantity="one">%d item</item></plurals>
//! </resources>
//! ```
//!
//! Only the declarations are extracted; text content is left to the
//! emitter and runtime.

use std::collections::HashSet;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::core::resource_type::ResourceType;

/// Tags that name resource types which cannot be declared in values files.
const NON_VALUE_TAGS: &[&str] = &["drawable", "font", "files", "values"];

/// Why a values file was rejected. Displayed after "`<file>` is not valid."
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValuesError {
    /// Empty, not XML, or no `<resources>` root
    BadContent,
    UnknownType(String),
    UnknownStringType(String),
    DuplicatedKey(String),
    MissingName,
}

impl std::fmt::Display for ValuesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValuesError::BadContent => write!(f, "Check the file content."),
            ValuesError::UnknownType(t) => write!(f, "Unknown resource type: '{}'.", t),
            ValuesError::UnknownStringType(t) => {
                write!(f, "Unknown string resource type: '{}'.", t)
            }
            ValuesError::DuplicatedKey(k) => write!(f, "Duplicated key '{}'.", k),
            ValuesError::MissingName => write!(f, "Attribute 'name' not found."),
        }
    }
}

/// A resource declared in a values file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueDeclaration {
    pub resource_type: ResourceType,
    pub key: String,
}

/// Extract the declarations of a values file, in document order.
pub fn parse_values(content: &str) -> Result<Vec<ValueDeclaration>, ValuesError> {
    let mut reader = Reader::from_str(content);
    let mut buf = Vec::new();

    let mut depth = 0usize;
    let mut saw_root = false;
    let mut declarations = Vec::new();
    let mut seen: HashSet<(ResourceType, String)> = HashSet::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                visit_element(e, depth, &mut saw_root, &mut declarations, &mut seen)?;
                depth += 1;
            }
            Ok(Event::Empty(ref e)) => {
                visit_element(e, depth, &mut saw_root, &mut declarations, &mut seen)?;
            }
            Ok(Event::End(_)) => {
                depth = depth.saturating_sub(1);
            }
            Ok(Event::Text(ref t)) if depth == 0 => {
                // Stray text outside the root element.
                if t.iter().any(|b| !b.is_ascii_whitespace()) {
                    return Err(ValuesError::BadContent);
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => return Err(ValuesError::BadContent),
            _ => {}
        }
        buf.clear();
    }

    if !saw_root || depth != 0 {
        return Err(ValuesError::BadContent);
    }

    Ok(declarations)
}

fn visit_element(
    e: &BytesStart<'_>,
    depth: usize,
    saw_root: &mut bool,
    declarations: &mut Vec<ValueDeclaration>,
    seen: &mut HashSet<(ResourceType, String)>,
) -> Result<(), ValuesError> {
    let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();

    match depth {
        0 => {
            if tag != "resources" || *saw_root {
                return Err(ValuesError::BadContent);
            }
            *saw_root = true;
            Ok(())
        }
        1 => {
            let resource_type = match ResourceType::from_value_tag(&tag) {
                Some(t) => t,
                None if NON_VALUE_TAGS.contains(&tag.as_str()) => {
                    return Err(ValuesError::UnknownStringType(tag))
                }
                None => return Err(ValuesError::UnknownType(tag)),
            };

            let key = name_attribute(e).ok_or(ValuesError::MissingName)?;
            if !seen.insert((resource_type, key.clone())) {
                return Err(ValuesError::DuplicatedKey(key));
            }
            declarations.push(ValueDeclaration { resource_type, key });
            Ok(())
        }
        // Items inside arrays and plurals.
        _ => Ok(()),
    }
}

fn name_attribute(e: &BytesStart<'_>) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"name")
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_declarations() {
        let decls = parse_values(
            r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <string name="app_name">Demo</string>
    <string-array name="planets">
        <item>Earth</item>
        <item>Mars</item>
    </string-array>
    <plurals name="items">
        <item quantity="one">%d item</item>
        <item quantity="other">%d items</item>
    </plurals>
    <string name="empty"/>
</resources>
"#,
        )
        .unwrap();

        assert_eq!(
            decls,
            vec![
                ValueDeclaration {
                    resource_type: ResourceType::String,
                    key: "app_name".to_string()
                },
                ValueDeclaration {
                    resource_type: ResourceType::StringArray,
                    key: "planets".to_string()
                },
                ValueDeclaration {
                    resource_type: ResourceType::Plurals,
                    key: "items".to_string()
                },
                ValueDeclaration {
                    resource_type: ResourceType::String,
                    key: "empty".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_bad_content() {
        assert_eq!(parse_values(""), Err(ValuesError::BadContent));
        assert_eq!(parse_values("invalid"), Err(ValuesError::BadContent));
        assert_eq!(parse_values("<strings></strings>"), Err(ValuesError::BadContent));
        assert_eq!(
            parse_values("<resources><string name=\"a\">x</string>"),
            Err(ValuesError::BadContent)
        );
    }

    #[test]
    fn test_unknown_types() {
        let err = parse_values("<resources><aaa name=\"v\">aaa</aaa></resources>").unwrap_err();
        assert_eq!(err.to_string(), "Unknown resource type: 'aaa'.");

        let err =
            parse_values("<resources><drawable name=\"v\">aaa</drawable></resources>").unwrap_err();
        assert_eq!(err.to_string(), "Unknown string resource type: 'drawable'.");
    }

    #[test]
    fn test_duplicated_key() {
        let err = parse_values(
            r#"<resources>
    <string name="v1">aaa</string>
    <string name="v2">aaa</string>
    <string name="v3">aaa</string>
    <string name="v1">aaa</string>
</resources>"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Duplicated key 'v1'.");
    }

    #[test]
    fn test_same_key_different_types_allowed() {
        let decls = parse_values(
            r#"<resources>
    <string name="items">x</string>
    <plurals name="items"><item quantity="one">x</item></plurals>
</resources>"#,
        )
        .unwrap();
        assert_eq!(decls.len(), 2);
    }

    #[test]
    fn test_missing_name() {
        let err = parse_values(
            r#"<resources>
    <string name="v1">aaa</string>
    <string foo="v2">aaa</string>
</resources>"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Attribute 'name' not found.");
    }
}
