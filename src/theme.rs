//! Token palettes
//!
//! A palette maps token categories to display colors for the renderer.
//! Palettes are YAML, either embedded at compile time or user-defined.
//!
//! Loading priority:
//! 1. User config: `~/.config/formula-editor/themes/{id}.yaml`
//! 2. Embedded: built-in palettes compiled into the binary

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::model::TokenKind;

pub const DEFAULT_LIGHT_YAML: &str = include_str!("../themes/default-light.yaml");
pub const DEFAULT_DARK_YAML: &str = include_str!("../themes/default-dark.yaml");

/// A built-in palette entry
pub struct BuiltinTheme {
    /// Stable identifier for config (e.g. "default-light")
    pub id: &'static str,
    pub yaml: &'static str,
}

pub const BUILTIN_THEMES: &[BuiltinTheme] = &[
    BuiltinTheme {
        id: "default-light",
        yaml: DEFAULT_LIGHT_YAML,
    },
    BuiltinTheme {
        id: "default-dark",
        yaml: DEFAULT_DARK_YAML,
    },
];

/// Load a palette from a YAML file
pub fn from_file(path: &Path) -> Result<Palette, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
    Palette::from_yaml(&content)
}

/// Load palette by id with priority: user → builtin
pub fn load_palette(id: &str) -> Result<Palette, String> {
    if let Some(user_dir) = crate::config_paths::themes_dir() {
        let user_path = user_dir.join(format!("{}.yaml", id));
        if user_path.exists() {
            tracing::info!("Loading user theme from {}", user_path.display());
            return from_file(&user_path);
        }
    }

    tracing::info!("Loading builtin theme: {}", id);
    Palette::from_builtin(id)
}

/// RGB color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse from "#RRGGBB"
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let hex = s.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("Invalid color format: {}", s));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| e.to_string())
        };
        Ok(Color {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// "#RRGGBB", uppercase
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Raw palette data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    pub tokens: TokenColorsData,
    /// Colors treated as plain text: tokens resolving to one of these are not annotated
    #[serde(default)]
    pub plain: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenColorsData {
    pub command: String,
    pub number: String,
    pub operator: String,
    pub bracket: String,
    pub variable: String,
    pub default: String,
    pub cursor: String,
}

/// Resolved palette
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub name: String,
    pub command: Color,
    pub number: Color,
    pub operator: Color,
    pub bracket: Color,
    pub variable: Color,
    pub default: Color,
    pub cursor: Color,
    pub plain: Vec<Color>,
}

impl Palette {
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        Self::from_data(data)
    }

    pub fn from_builtin(id: &str) -> Result<Self, String> {
        let entry = BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("Unknown theme id: {}", id))?;
        Palette::from_yaml(entry.yaml)
    }

    pub fn from_data(data: ThemeData) -> Result<Self, String> {
        let default = Color::from_hex(&data.tokens.default)?;
        let plain = if data.plain.is_empty() {
            vec![default]
        } else {
            data.plain
                .iter()
                .map(|s| Color::from_hex(s))
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(Palette {
            name: data.name,
            command: Color::from_hex(&data.tokens.command)?,
            number: Color::from_hex(&data.tokens.number)?,
            operator: Color::from_hex(&data.tokens.operator)?,
            bracket: Color::from_hex(&data.tokens.bracket)?,
            variable: Color::from_hex(&data.tokens.variable)?,
            default,
            cursor: Color::from_hex(&data.tokens.cursor)?,
            plain,
        })
    }

    /// Category-derived color
    pub fn color_for(&self, kind: TokenKind) -> Color {
        match kind {
            TokenKind::Command => self.command,
            TokenKind::Number => self.number,
            TokenKind::Operator => self.operator,
            TokenKind::Bracket => self.bracket,
            TokenKind::Variable => self.variable,
            TokenKind::Cursor => self.cursor,
            TokenKind::StructureMarker => self.default,
        }
    }

    /// True when text in this color needs no annotation
    pub fn is_plain(&self, color: Color) -> bool {
        self.plain.contains(&color)
    }

    /// Light palette (YAML-backed with Rust fallback)
    pub fn default_light() -> Self {
        match Palette::from_yaml(DEFAULT_LIGHT_YAML) {
            Ok(palette) => palette,
            Err(_) => Palette {
                name: "Default Light".to_string(),
                command: Color::rgb(0x2D, 0x9C, 0xDB),
                number: Color::rgb(0x1F, 0x1F, 0x1F),
                operator: Color::rgb(0x42, 0x42, 0x42),
                bracket: Color::rgb(0x75, 0x75, 0x75),
                variable: Color::rgb(0x00, 0x00, 0x00),
                default: Color::rgb(0x00, 0x00, 0x00),
                cursor: Color::rgb(0xFF, 0x00, 0x55),
                plain: vec![Color::rgb(0x00, 0x00, 0x00), Color::rgb(0x1F, 0x1F, 0x1F)],
            },
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::default_light()
    }
}
