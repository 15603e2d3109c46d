use serde::{Deserialize, Serialize};

/// Discord caps a single embed field value at this many characters.
pub const FIELD_VALUE_LIMIT: usize = 1024;

/// Accent colours used on outgoing embeds (Discord palette).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedColor {
    Blue,
    Green,
    Red,
    Gold,
    Purple,
}

impl EmbedColor {
    pub fn value(self) -> u32 {
        match self {
            EmbedColor::Blue => 0x3498DB,
            EmbedColor::Green => 0x2ECC71,
            EmbedColor::Red => 0xE74C3C,
            EmbedColor::Gold => 0xF1C40F,
            EmbedColor::Purple => 0x9B59B6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedImage {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
}

/// A rich reply. Serializes to the Discord embed object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    #[serde(default)]
    pub fields: Vec<EmbedField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
}

impl Embed {
    pub fn new(title: impl Into<String>, description: impl Into<String>, color: EmbedColor) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            color: color.value(),
            fields: Vec::new(),
            thumbnail: None,
            footer: None,
        }
    }

    /// Add a block-level field. Values longer than Discord accepts are clipped.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: clip(value.into(), FIELD_VALUE_LIMIT),
            inline: false,
        });
        self
    }

    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(EmbedImage { url: url.into() });
        self
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(EmbedFooter { text: text.into() });
        self
    }
}

fn clip(value: String, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value;
    }
    let mut out: String = value.chars().take(limit - 1).collect();
    out.push('…');
    out
}
