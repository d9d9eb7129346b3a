//! YAML parsing for key layouts
//!
//! Parses keys.yaml files into [`KeyLayout`]s, validating every template.

use std::path::Path;

use serde::Deserialize;

use super::layout::{Key, KeyAction, KeyLayout, Pad};
use crate::model::scan::is_balanced;
use crate::model::{KeyDescription, TemplateItem, TokenKind};
use crate::theme::Color;

/// Root structure of a key layout YAML file
#[derive(Debug, Deserialize)]
pub struct LayoutConfig {
    pub pads: Vec<PadConfig>,
}

#[derive(Debug, Deserialize)]
pub struct PadConfig {
    pub name: String,
    #[serde(default)]
    pub keys: Vec<KeyConfig>,
}

/// A single key entry from YAML
#[derive(Debug, Deserialize)]
pub struct KeyConfig {
    pub label: String,
    pub symbol: String,
    #[serde(default)]
    pub action: KeyAction,
    #[serde(default)]
    pub kind: Option<TokenKind>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub template: Option<Vec<TemplateItem>>,
    #[serde(default)]
    pub variants: Vec<KeyConfig>,
}

/// Load a key layout from a YAML file
pub fn load_layout_file(path: &Path) -> Result<KeyLayout, KeyError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeyError::Io(e.to_string()))?;

    parse_layout_yaml(&content)
}

/// Parse a key layout from a YAML string
pub fn parse_layout_yaml(yaml: &str) -> Result<KeyLayout, KeyError> {
    let config: LayoutConfig =
        serde_yaml::from_str(yaml).map_err(|e| KeyError::Parse(e.to_string()))?;

    let mut pads = Vec::with_capacity(config.pads.len());
    for pad in config.pads {
        let keys = pad
            .keys
            .into_iter()
            .map(parse_key)
            .collect::<Result<Vec<_>, _>>()?;
        pads.push(Pad {
            name: pad.name,
            keys,
        });
    }

    Ok(KeyLayout::new(pads))
}

fn parse_key(entry: KeyConfig) -> Result<Key, KeyError> {
    let description = match entry.action {
        KeyAction::Insert => Some(parse_insertion(&entry)?),
        _ => None,
    };
    let variants = entry
        .variants
        .into_iter()
        .map(parse_key)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Key {
        label: entry.label,
        symbol: entry.symbol,
        action: entry.action,
        description,
        variants,
    })
}

fn parse_insertion(entry: &KeyConfig) -> Result<KeyDescription, KeyError> {
    if let Some(items) = &entry.template {
        validate_template(&entry.symbol, items)?;
        return Ok(KeyDescription::template(entry.symbol.clone(), items.clone()));
    }

    let kind = entry
        .kind
        .unwrap_or_else(|| TokenKind::classify(&entry.symbol));
    let mut key = KeyDescription::flat(kind, entry.symbol.clone());
    if let Some(hex) = &entry.color {
        let color = Color::from_hex(hex)
            .map_err(|e| KeyError::Parse(format!("key '{}': {}", entry.symbol, e)))?;
        key = key.with_color(color);
    }
    Ok(key)
}

/// A template must be non-empty, balanced, with at most one cursor stop
pub fn validate_template(symbol: &str, items: &[TemplateItem]) -> Result<(), KeyError> {
    let invalid = |reason: &str| KeyError::InvalidTemplate(format!("{}: {}", symbol, reason));

    if items.is_empty() {
        return Err(invalid("empty template"));
    }
    if items.iter().filter(|item| item.cursor_stop).count() > 1 {
        return Err(invalid("more than one cursor stop"));
    }
    let (tokens, _) = KeyDescription::template(symbol, items.to_vec()).materialize();
    if !is_balanced(&tokens) {
        return Err(invalid("unbalanced brackets"));
    }
    Ok(())
}

/// Errors that can occur when loading key layouts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    Io(String),
    Parse(String),
    UnknownKey(String),
    InvalidTemplate(String),
}

impl std::fmt::Display for KeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyError::Io(e) => write!(f, "IO error: {}", e),
            KeyError::Parse(e) => write!(f, "Parse error: {}", e),
            KeyError::UnknownKey(k) => write!(f, "Unknown key: {}", k),
            KeyError::InvalidTemplate(t) => write!(f, "Invalid template: {}", t),
        }
    }
}

impl std::error::Error for KeyError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_key_defaults_to_insert() {
        let layout = parse_layout_yaml(
            r#"
pads:
  - name: test
    keys:
      - { label: "7", symbol: "7" }
"#,
        )
        .unwrap();
        let key = layout.find("7").unwrap();
        assert_eq!(key.action, KeyAction::Insert);
        assert!(key.description.as_ref().unwrap().is_flat("7"));
    }

    #[test]
    fn test_color_override() {
        let layout = parse_layout_yaml(
            r##"
pads:
  - name: test
    keys:
      - { label: "x", symbol: "\\cdot", kind: operator, color: "#5AC8FA" }
"##,
        )
        .unwrap();
        let (tokens, _) = layout.find("\\cdot").unwrap().description.as_ref().unwrap().materialize();
        assert_eq!(tokens[0].kind, TokenKind::Operator);
        assert_eq!(tokens[0].color, Some(Color::rgb(0x5A, 0xC8, 0xFA)));
    }

    #[test]
    fn test_two_cursor_stops_rejected() {
        let result = parse_layout_yaml(
            r#"
pads:
  - name: test
    keys:
      - label: "bad"
        symbol: "bad"
        template:
          - { value: "{", kind: bracket, cursor_stop: true }
          - { value: "}", kind: bracket, cursor_stop: true }
"#,
        );
        assert!(matches!(result, Err(KeyError::InvalidTemplate(_))));
    }

    #[test]
    fn test_unbalanced_template_rejected() {
        let result = parse_layout_yaml(
            r#"
pads:
  - name: test
    keys:
      - label: "bad"
        symbol: "bad"
        template:
          - { value: "\\sqrt", kind: command }
          - { value: "{", kind: bracket }
"#,
        );
        assert!(matches!(result, Err(KeyError::InvalidTemplate(_))));
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            parse_layout_yaml("pads: [unclosed"),
            Err(KeyError::Parse(_))
        ));
    }

    #[test]
    fn test_navigation_keys_have_no_insertion() {
        let layout = parse_layout_yaml(
            r#"
pads:
  - name: test
    keys:
      - { label: "←", symbol: "left", action: left }
"#,
        )
        .unwrap();
        let key = layout.find("left").unwrap();
        assert_eq!(key.action, KeyAction::Left);
        assert!(key.description.is_none());
    }
}
