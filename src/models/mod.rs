pub mod embed;

pub use embed::{Embed, EmbedColor, EmbedField};
