//! Server-side rendering of profile pages

use dioxus::prelude::*;
use linkfolio_core::{ProfilePage, ViewRow};

/// Page stylesheet, inlined into every document
pub const STYLES_CSS: &str = include_str!("../assets/styles.css");

const DOCTYPE: &str = "<!DOCTYPE html>";

/// Path of the contact download for a user
pub fn contact_href(user_id: &str) -> String {
    format!("/{}/contact.vcf", urlencoding::encode(user_id))
}

/// Render a full HTML document for a loaded page
pub fn render_profile(page: &ProfilePage) -> String {
    let page = page.clone();
    let title = page.profile.name.clone();
    document(rsx! {
        Shell { title,
            ProfileView { page }
        }
    })
}

/// Render the "User not found" document
pub fn render_not_found() -> String {
    document(rsx! {
        Shell { title: "User not found".to_string(),
            NotFoundView {}
        }
    })
}

fn document(element: Element) -> String {
    format!("{DOCTYPE}{}", dioxus_ssr::render_element(element))
}

#[component]
fn Shell(title: String, children: Element) -> Element {
    rsx! {
        html { lang: "en",
            head {
                meta { charset: "utf-8" }
                meta { name: "viewport", content: "width=device-width, initial-scale=1" }
                title { "{title}" }
                style { dangerous_inner_html: STYLES_CSS }
            }
            body {
                // Background glow
                div { class: "backdrop",
                    div { class: "glow glow-blue" }
                    div { class: "glow glow-purple" }
                }
                {children}
            }
        }
    }
}

#[component]
fn ProfileView(page: ProfilePage) -> Element {
    let initial = page.initial();
    let name = page.profile.name.clone();
    let title = page.profile.title_or_empty().to_string();
    let save_href = contact_href(&page.user_id);

    rsx! {
        main { class: "profile",
            div { class: "avatar",
                div { class: "avatar-inner", "{initial}" }
            }
            h1 { class: "profile-name", "{name}" }
            p { class: "profile-title", "{title}" }

            div { class: "links",
                for row in page.rows.iter() {
                    LinkRow { row: row.clone() }
                }
            }

            a {
                class: "save-contact",
                href: "{save_href}",
                "Save Contact"
            }
        }
    }
}

#[component]
fn LinkRow(row: ViewRow) -> Element {
    let href = row.href.clone();
    let label = row.label.clone();
    let icon_class = format!("icon {}", row.icon.css_class());
    let glyph = row.icon.glyph();
    let icon_label = row.icon.label();

    rsx! {
        a {
            class: "link-row",
            href: "{href}",
            target: "_blank",
            rel: "noopener noreferrer",
            div { class: "link-main",
                span { class: "{icon_class}", title: "{icon_label}", "{glyph}" }
                span { class: "link-label", "{label}" }
            }
            span { class: "external", "\u{2197}" }
        }
    }
}

#[component]
fn NotFoundView() -> Element {
    rsx! {
        main { class: "not-found", "User not found" }
    }
}
