//! Panel data model
//!
//! A panel is one unit of showcased content: a numeral, a title, a
//! description broken into display lines, and a row of tag pills. Panels
//! are static configuration — built in code or deserialized from TOML —
//! and never mutated after construction.

use serde::Deserialize;
use smallvec::SmallVec;

/// Words per description display line
pub const WORDS_PER_LINE: usize = 8;

/// Break a description into display lines of at most [`WORDS_PER_LINE`] words
pub fn split_description_lines(text: &str) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    words
        .chunks(WORDS_PER_LINE)
        .map(|chunk| chunk.join(" "))
        .collect()
}

/// Placement of a floating card, as fractions of the viewport
///
/// Mirrors CSS inset offsets: any subset of the four edges may be given.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CardPosition {
    pub top: Option<f32>,
    pub bottom: Option<f32>,
    pub left: Option<f32>,
    pub right: Option<f32>,
}

/// Raw deserialized panel shape (display lines not yet derived)
#[derive(Clone, Debug, Deserialize)]
pub struct PanelItemConfig {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub position: Option<CardPosition>,
}

/// One unit of showcased content
///
/// Immutable after construction; `desc_lines` is derived from
/// `description` at build time.
#[derive(Clone, Debug)]
pub struct PanelItem {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: String,
    desc_lines: Vec<String>,
    pub tags: SmallVec<[String; 4]>,
    pub category: Option<String>,
    pub position: Option<CardPosition>,
}

impl PanelItem {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let description = description.into();
        let desc_lines = split_description_lines(&description);
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: None,
            description,
            desc_lines,
            tags: SmallVec::new(),
            category: None,
            position: None,
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn position(mut self, position: CardPosition) -> Self {
        self.position = Some(position);
        self
    }

    /// Description broken into display lines
    pub fn desc_lines(&self) -> &[String] {
        &self.desc_lines
    }
}

impl From<PanelItemConfig> for PanelItem {
    fn from(config: PanelItemConfig) -> Self {
        let mut item = PanelItem::new(config.id, config.title, config.description);
        item.subtitle = config.subtitle;
        item.tags = config.tags.into_iter().collect();
        item.category = config.category;
        item.position = config.position;
        item
    }
}

/// An ordered, immutable sequence of panels
#[derive(Clone, Debug, Default)]
pub struct PanelSet {
    items: Vec<PanelItem>,
}

/// TOML shape: `[[panels]]` array of tables
#[derive(Deserialize)]
struct PanelSetConfig {
    #[serde(default)]
    panels: Vec<PanelItemConfig>,
}

impl PanelSet {
    pub fn new(items: Vec<PanelItem>) -> Self {
        Self { items }
    }

    /// Parse a panel set from TOML configuration
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        let config: PanelSetConfig = toml::from_str(source)?;
        Ok(Self {
            items: config.panels.into_iter().map(PanelItem::from).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PanelItem> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PanelItem> {
        self.items.iter()
    }

    /// A new set containing only panels in `category`
    ///
    /// `None` returns the full set (the "all" filter).
    pub fn filtered(&self, category: Option<&str>) -> PanelSet {
        match category {
            None => self.clone(),
            Some(cat) => PanelSet {
                items: self
                    .items
                    .iter()
                    .filter(|p| p.category.as_deref() == Some(cat))
                    .cloned()
                    .collect(),
            },
        }
    }

    /// Distinct categories present, in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for panel in &self.items {
            if let Some(cat) = panel.category.as_deref() {
                if !seen.contains(&cat) {
                    seen.push(cat);
                }
            }
        }
        seen
    }
}
