//! Registry of pages editable from the visual editor.
//!
//! Each page owns a fixed list of content keys. Drafts are partitioned by
//! page key, and public page reads return exactly these keys.

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Page key constants
// ---------------------------------------------------------------------------

pub const PAGE_HOME: &str = "home";
pub const PAGE_STORY: &str = "story";
pub const PAGE_DETAILS: &str = "details";
pub const PAGE_TRAVEL: &str = "travel";
pub const PAGE_FAQ: &str = "faq";
pub const PAGE_REGISTRY: &str = "registry";
pub const PAGE_RSVP: &str = "rsvp";

/// A page whose copy is managed through drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EditablePage {
    pub key: &'static str,
    pub label: &'static str,
    pub content_keys: &'static [&'static str],
}

impl EditablePage {
    /// Whether `content_key` belongs to this page.
    pub fn owns(&self, content_key: &str) -> bool {
        self.content_keys.contains(&content_key)
    }
}

const PAGES: &[EditablePage] = &[
    EditablePage {
        key: PAGE_HOME,
        label: "Home",
        content_keys: &[
            "home_title",
            "home_subtitle",
            "home_hero_image",
            "home_welcome_message",
            "wedding_date",
        ],
    },
    EditablePage {
        key: PAGE_STORY,
        label: "Our Story",
        content_keys: &["story_title", "story_content", "story_timeline", "story_photos"],
    },
    EditablePage {
        key: PAGE_DETAILS,
        label: "Event Details",
        content_keys: &[
            "ceremony_time",
            "ceremony_venue",
            "ceremony_address",
            "reception_time",
            "reception_venue",
            "reception_address",
            "dress_code",
            "schedule_items",
            "wedding_party",
        ],
    },
    EditablePage {
        key: PAGE_TRAVEL,
        label: "Travel",
        content_keys: &["travel_intro", "hotels", "airports", "transportation"],
    },
    EditablePage {
        key: PAGE_FAQ,
        label: "FAQ",
        content_keys: &["faq_intro", "faq_items"],
    },
    EditablePage {
        key: PAGE_REGISTRY,
        label: "Registry",
        content_keys: &["registry_intro", "registry_links"],
    },
    EditablePage {
        key: PAGE_RSVP,
        label: "RSVP",
        content_keys: &["rsvp_intro", "rsvp_deadline", "rsvp_meal_options"],
    },
];

/// All editable pages, in navigation order.
pub fn all_pages() -> &'static [EditablePage] {
    PAGES
}

/// Look up a page by key.
pub fn find_page(page_key: &str) -> Option<&'static EditablePage> {
    PAGES.iter().find(|p| p.key == page_key)
}

/// Look up a page by key, failing with a validation error for unknown keys.
pub fn validate_page_key(page_key: &str) -> Result<&'static EditablePage, CoreError> {
    find_page(page_key).ok_or_else(|| {
        CoreError::Validation(format!(
            "Unknown page '{page_key}'. Valid pages: {}",
            PAGES.iter().map(|p| p.key).collect::<Vec<_>>().join(", ")
        ))
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn known_pages_resolve() {
        assert_eq!(validate_page_key(PAGE_FAQ).unwrap().label, "FAQ");
        assert!(find_page(PAGE_RSVP).unwrap().owns("rsvp_deadline"));
    }

    #[test]
    fn unknown_page_is_rejected() {
        let err = validate_page_key("guestbook").unwrap_err();
        assert!(err.to_string().contains("guestbook"));
    }

    #[test]
    fn content_keys_are_unique_across_pages() {
        let mut seen = HashSet::new();
        for page in all_pages() {
            for key in page.content_keys {
                assert!(seen.insert(*key), "content key '{key}' owned by two pages");
                assert!(crate::content::validate_key(key).is_ok());
            }
        }
    }
}
