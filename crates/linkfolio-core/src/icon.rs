//! Icon classification for link labels
//!
//! Classification is a case-insensitive substring match against an ordered
//! rule table; the first matching rule wins. The `SocialX` rule matches any
//! name containing the letter "x", so "Inbox" or "Mailbox" land there before
//! the mail rule is reached.

use serde::{Deserialize, Serialize};

/// Symbolic icon shown next to a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconCategory {
    Github,
    Linkedin,
    Instagram,
    SocialX,
    Web,
    Phone,
    Mail,
    Generic,
}

impl IconCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Github => "GitHub",
            Self::Linkedin => "LinkedIn",
            Self::Instagram => "Instagram",
            Self::SocialX => "X",
            Self::Web => "Website",
            Self::Phone => "Phone",
            Self::Mail => "Mail",
            Self::Generic => "Link",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Github => "icon-github",
            Self::Linkedin => "icon-linkedin",
            Self::Instagram => "icon-instagram",
            Self::SocialX => "icon-social-x",
            Self::Web => "icon-web",
            Self::Phone => "icon-phone",
            Self::Mail => "icon-mail",
            Self::Generic => "icon-generic",
        }
    }

    /// Text glyph for terminals and plain renderers.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Github => "\u{1f419}",
            Self::Linkedin => "\u{1f4bc}",
            Self::Instagram => "\u{1f4f7}",
            Self::SocialX => "\u{1d54f}",
            Self::Web => "\u{1f310}",
            Self::Phone => "\u{1f4de}",
            Self::Mail => "\u{2709}\u{fe0f}",
            Self::Generic => "\u{1f517}",
        }
    }
}

/// Ordered rule table. Keywords are lowercase.
const RULES: &[(&[&str], IconCategory)] = &[
    (&["github"], IconCategory::Github),
    (&["linkedin"], IconCategory::Linkedin),
    (&["instagram"], IconCategory::Instagram),
    (&["twitter", "x"], IconCategory::SocialX),
    (&["portfolio", "website"], IconCategory::Web),
    (&["phone", "whatsapp"], IconCategory::Phone),
    (&["mail", "email"], IconCategory::Mail),
];

/// Map a link's display name to its icon category
pub fn classify(name: &str) -> IconCategory {
    let name = name.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| name.contains(keyword)))
        .map(|(_, category)| *category)
        .unwrap_or(IconCategory::Generic)
}
