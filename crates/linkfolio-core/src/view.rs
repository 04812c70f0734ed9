//! Render-ready rows for a profile page

use serde::{Deserialize, Serialize};

use crate::icon::{IconCategory, classify};
use crate::loader::LoadedProfile;
use crate::model::{Link, Profile};
use crate::vcard::{ContactArtifact, export_contact};

/// Schemes an href may keep as stored; everything else is treated as a host
const ALLOWED_SCHEMES: &[&str] = &["http://", "https://", "mailto:", "tel:", "sms:"];

/// Prefix for bare hosts
const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// One visible link row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewRow {
    pub icon: IconCategory,
    pub label: String,
    pub href: String,
}

/// Whether `target` starts with a scheme that may be linked as is
///
/// Only `http://`, `https://`, `mailto:`, `tel:` and `sms:` qualify,
/// case-insensitively. Any other scheme (`javascript:`, `data:`, `ftp://`)
/// is prefixed like a bare host, as is `localhost:8080`.
pub fn has_scheme(target: &str) -> bool {
    ALLOWED_SCHEMES.iter().any(|prefix| {
        target
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// Turn a stored target into an href
pub fn normalize_href(target: &str) -> String {
    if has_scheme(target) {
        target.to_string()
    } else {
        format!("{DEFAULT_SCHEME_PREFIX}{target}")
    }
}

/// Build the visible rows: enabled links only, in fetch order
pub fn build_rows(links: &[Link]) -> Vec<ViewRow> {
    links
        .iter()
        .filter(|link| link.is_enabled)
        .map(|link| ViewRow {
            icon: classify(&link.name),
            label: link.name.clone(),
            href: normalize_href(&link.target),
        })
        .collect()
}

/// Everything needed to render one page
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilePage {
    pub user_id: String,
    pub profile: Profile,
    /// All links as fetched, disabled ones included, for contact export
    pub links: Vec<Link>,
    pub rows: Vec<ViewRow>,
}

impl ProfilePage {
    /// First character of the name, used as the avatar.
    pub fn initial(&self) -> String {
        self.profile.name.chars().next().map(String::from).unwrap_or_default()
    }

    /// Export this page's contact card
    pub fn contact_card(&self) -> ContactArtifact {
        export_contact(&self.profile, &self.links)
    }
}

impl From<LoadedProfile> for ProfilePage {
    fn from(loaded: LoadedProfile) -> Self {
        let rows = build_rows(&loaded.links);
        Self {
            user_id: loaded.user_id,
            profile: loaded.profile,
            links: loaded.links,
            rows,
        }
    }
}
