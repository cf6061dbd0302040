//! Help pages shipped inside the binary and shown read-only

use super::document::Document;

pub const DESCRIPTION: &str = include_str!("../../assets/docs/description.txt");
pub const WEBSITE: &str = "https://programmingdesigner.github.io/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinDoc {
    Credits,
    Reference,
    License,
}

impl BuiltinDoc {
    pub fn title(self) -> &'static str {
        match self {
            Self::Credits => "Credits",
            Self::Reference => "Reference",
            Self::License => "License",
        }
    }

    pub fn content(self) -> &'static str {
        match self {
            Self::Credits => include_str!("../../assets/docs/credits.md"),
            Self::Reference => include_str!("../../assets/docs/reference.md"),
            Self::License => include_str!("../../assets/docs/license.md"),
        }
    }

    /// A fresh read-only document holding this page
    pub fn document(self) -> Document {
        Document::read_only(self.content())
    }
}
