//! End-to-end page scenarios against the in-memory store

use std::sync::Arc;

use linkfolio_core::{
    IconCategory, InMemoryDocumentStore, NavigationResult, ProfileLoader, ProfileSession,
    ViewState,
};

const FIXTURE: &str = r#"{
    "users": {
        "alice": {
            "name": "Alice Smith",
            "title": "Engineer",
            "links": [
                { "id": "gh", "name": "GitHub", "link": "github.com/a", "isEnabled": true },
                { "id": "ph", "name": "Phone", "link": "+15551234", "isEnabled": false }
            ]
        },
        "carol": {
            "name": "Carol  de  Vries",
            "links": [
                { "id": "1", "name": "X (Twitter)", "link": "https://x.com/carol", "isEnabled": true },
                { "id": "2", "name": "Work Email", "link": "carol@corp.io", "isEnabled": true },
                { "id": "3", "name": "Discord", "link": "discord.gg/carol", "isEnabled": true },
                { "id": "4", "name": "WhatsApp", "link": "+3161234", "isEnabled": true },
                { "id": "5", "name": "My Portfolio", "link": "carol.design", "isEnabled": true }
            ]
        },
        "dave": { "name": "Dave" }
    }
}"#;

fn loader() -> ProfileLoader {
    ProfileLoader::new(Arc::new(
        InMemoryDocumentStore::from_fixture_json(FIXTURE).unwrap(),
    ))
}

#[tokio::test]
async fn alice_sees_only_enabled_links_and_exports_without_phone() {
    let page = loader().load_outcome("alice").await.into_page().unwrap();

    assert_eq!(page.rows.len(), 1);
    assert_eq!(page.rows[0].icon, IconCategory::Github);
    assert_eq!(page.rows[0].label, "GitHub");
    assert_eq!(page.rows[0].href, "https://github.com/a");

    let card = page.contact_card();
    let text = String::from_utf8(card.bytes).unwrap();
    assert_eq!(card.filename, "Alice_Smith.vcf");
    assert!(text.contains("\nFN:Alice Smith\n"));
    assert!(text.contains("\nTEL;TYPE=CELL:\n"));
}

#[tokio::test]
async fn carol_gets_icons_and_contact_roles() {
    let page = loader().load_outcome("carol").await.into_page().unwrap();

    let icons: Vec<_> = page.rows.iter().map(|row| row.icon).collect();
    assert_eq!(
        icons,
        [
            IconCategory::SocialX,
            IconCategory::Mail,
            IconCategory::Generic,
            IconCategory::Phone,
            IconCategory::Web,
        ]
    );

    let card = page.contact_card();
    assert_eq!(card.filename, "Carol_de_Vries.vcf");
    assert_eq!(
        String::from_utf8(card.bytes).unwrap(),
        "BEGIN:VCARD\nVERSION:3.0\nFN:Carol  de  Vries\nTITLE:\nTEL;TYPE=CELL:+3161234\n\
         EMAIL;TYPE=INTERNET:carol@corp.io\nURL:carol.design\nEND:VCARD"
    );
}

#[tokio::test]
async fn profile_without_links_renders_header_only() {
    let page = loader().load_outcome("dave").await.into_page().unwrap();
    assert!(page.rows.is_empty());

    let text = String::from_utf8(page.contact_card().bytes).unwrap();
    assert!(text.contains("TEL;TYPE=CELL:\nEMAIL;TYPE=INTERNET:\nURL:\n"));
}

#[tokio::test]
async fn session_switches_between_profiles() {
    let session = ProfileSession::new(loader());

    assert_eq!(session.navigate("alice").await, NavigationResult::Applied);
    assert_eq!(session.navigate("missing").await, NavigationResult::Applied);
    assert!(matches!(session.current(), ViewState::NotFound { .. }));

    assert_eq!(session.navigate("carol").await, NavigationResult::Applied);
    assert_eq!(session.current().page().unwrap().rows.len(), 5);
    assert_eq!(session.generation(), 3);
}
