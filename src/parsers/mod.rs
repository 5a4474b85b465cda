pub mod html;

pub use html::{PageMetadata, parse_metadata};

/// Social-preview metadata keys read from the document head
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaProperty {
    /// `og:title`
    Title,
    /// `og:image`
    Image,
}

impl MetaProperty {
    /// Value of the `property` attribute
    pub fn key(&self) -> &'static str {
        match self {
            MetaProperty::Title => "og:title",
            MetaProperty::Image => "og:image",
        }
    }
}
