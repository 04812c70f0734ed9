//! Contact card export
//!
//! A page's profile and links are turned into a vCard 3.0 document with a
//! fixed eight-line layout. Each contact role takes the first enabled link, in
//! fetch order, whose name contains one of the role's keywords. A role with
//! no match is written with an empty value rather than left out.

use std::borrow::Cow;

use crate::model::{Link, Profile};

/// MIME type of the exported artifact
pub const VCARD_MIME_TYPE: &str = "text/vcard";

/// File extension of the exported artifact
pub const VCARD_EXTENSION: &str = "vcf";

/// Contact fields filled from links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactRole {
    Phone,
    Email,
    Website,
}

impl ContactRole {
    /// Lowercase keywords matched against link names
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Phone => &["phone", "whatsapp", "mobile"],
            Self::Email => &["mail", "email"],
            Self::Website => &["portfolio", "website", "globe"],
        }
    }

    /// First enabled link whose name matches this role
    pub fn select<'a>(&self, links: &'a [Link]) -> Option<&'a Link> {
        links
            .iter()
            .find(|link| link.is_enabled && link.name_contains_any(self.keywords()))
    }
}

/// Field values of a contact card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactCard {
    pub full_name: String,
    pub title: String,
    pub phone: String,
    pub email: String,
    pub url: String,
}

impl ContactCard {
    /// Resolve the card fields for a profile
    pub fn from_profile(profile: &Profile, links: &[Link]) -> Self {
        let resolve = |role: ContactRole| {
            role.select(links)
                .map(|link| link.target.clone())
                .unwrap_or_default()
        };

        Self {
            full_name: profile.name.clone(),
            title: profile.title_or_empty().to_string(),
            phone: resolve(ContactRole::Phone),
            email: resolve(ContactRole::Email),
            url: resolve(ContactRole::Website),
        }
    }

    /// Serialize as vCard 3.0 with LF separators
    pub fn to_vcard(&self) -> String {
        [
            Cow::Borrowed("BEGIN:VCARD"),
            Cow::Borrowed("VERSION:3.0"),
            Cow::Owned(format!("FN:{}", single_line(&self.full_name))),
            Cow::Owned(format!("TITLE:{}", single_line(&self.title))),
            Cow::Owned(format!("TEL;TYPE=CELL:{}", single_line(&self.phone))),
            Cow::Owned(format!("EMAIL;TYPE=INTERNET:{}", single_line(&self.email))),
            Cow::Owned(format!("URL:{}", single_line(&self.url))),
            Cow::Borrowed("END:VCARD"),
        ]
        .join("\n")
    }
}

/// A downloadable file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactArtifact {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Derive the contact artifact for a loaded profile
///
/// Pure: no store or network access. Identical input gives byte-identical
/// output.
pub fn export_contact(profile: &Profile, links: &[Link]) -> ContactArtifact {
    let card = ContactCard::from_profile(profile, links);
    ContactArtifact {
        filename: contact_filename(&profile.name),
        mime_type: VCARD_MIME_TYPE,
        bytes: card.to_vcard().into_bytes(),
    }
}

/// `<name with whitespace runs replaced by "_">.vcf`
pub fn contact_filename(name: &str) -> String {
    let mut filename = String::with_capacity(name.len() + VCARD_EXTENSION.len() + 1);
    let mut in_whitespace = false;

    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                filename.push('_');
            }
            in_whitespace = true;
        } else {
            filename.push(c);
            in_whitespace = false;
        }
    }

    filename.push('.');
    filename.push_str(VCARD_EXTENSION);
    filename
}

/// Replace each line break (CRLF, CR or LF) with a space
fn single_line(value: &str) -> Cow<'_, str> {
    if !value.contains(['\r', '\n']) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push(' ');
            }
            '\n' => out.push(' '),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}
