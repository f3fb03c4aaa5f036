//! Styling for the Graphviz export

use std::collections::BTreeMap;

/// Fill colour and optional label override for one tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagStyle {
    /// Graphviz `fillcolor`
    pub fillcolor: String,
    /// Label to draw instead of the tag itself
    pub label: Option<String>,
}

impl TagStyle {
    pub fn new(fillcolor: impl Into<String>) -> Self {
        Self {
            fillcolor: fillcolor.into(),
            label: None,
        }
    }

    pub fn labelled(fillcolor: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            fillcolor: fillcolor.into(),
            label: Some(label.into()),
        }
    }
}

/// Table from cell tag to style
///
/// Exact tag entries win over the numeric rule, which covers `0`-`9`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: BTreeMap<char, TagStyle>,
    numeric: Option<TagStyle>,
}

impl Palette {
    /// A palette that knows no tags
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
            numeric: None,
        }
    }

    /// Adds or replaces the style for `tag`
    pub fn with(mut self, tag: char, style: TagStyle) -> Self {
        self.entries.insert(tag, style);
        self
    }

    /// Sets the style shared by all decimal digit tags
    pub fn with_numeric(mut self, style: TagStyle) -> Self {
        self.numeric = Some(style);
        self
    }

    pub fn insert(&mut self, tag: char, style: TagStyle) -> Option<TagStyle> {
        self.entries.insert(tag, style)
    }

    pub fn style(&self, tag: char) -> Option<&TagStyle> {
        self.entries.get(&tag).or_else(|| {
            if tag.is_ascii_digit() {
                self.numeric.as_ref()
            } else {
                None
            }
        })
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::empty()
            .with('*', TagStyle::new("black"))
            .with('E', TagStyle::new("green"))
            .with(' ', TagStyle::new("white"))
            .with('C', TagStyle::new("blue"))
            .with('R', TagStyle::new("gray"))
            .with('w', TagStyle::new("yellow"))
            .with_numeric(TagStyle::labelled("red", "U"))
    }
}

/// Configuration for [`GraphRenderer`](crate::render::GraphRenderer)
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Graph title
    pub title: String,

    /// Font for node labels
    pub font_name: String,

    /// Font and size for the title
    pub title_font_name: String,
    pub title_font_size: String,

    /// Graphviz shape for every node
    pub node_shape: String,

    /// Fill used when a node sets none
    pub default_fill: String,

    pub row_header_fill: String,
    pub column_header_fill: String,

    /// Cell colours keyed by tag
    pub palette: Palette,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: "SPARSE MATRIX".to_string(),
            font_name: "Arial".to_string(),
            title_font_name: "Arial Black".to_string(),
            title_font_size: "15pt".to_string(),
            node_shape: "box".to_string(),
            default_fill: "white".to_string(),
            row_header_fill: "plum".to_string(),
            column_header_fill: "powderblue".to_string(),
            palette: Palette::default(),
        }
    }
}

impl RenderConfig {
    /// Default styling with a custom palette
    pub fn with_palette(palette: Palette) -> Self {
        Self {
            palette,
            ..Self::default()
        }
    }
}
