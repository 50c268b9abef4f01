use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use utoipa::ToSchema;

static NON_ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new("[^a-zA-Z0-9]").unwrap());

/// The platform's generic annotated-text record.
///
/// `text` is the string that gets embedded; `value` is an open key/value
/// payload carried alongside the item. For stories the payload holds the
/// author, title and slug, and the suggestion pipeline later adds the
/// derived topic/audience/location/explanation strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Tag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub text: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub value: Map<String, Value>,
}

/// A search hit: an indexed tag plus its similarity score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScoredTag {
    pub tag: Tag,
    pub score: f32,
}

/// A validated story row, ready to be turned into an indexable tag
#[derive(Debug, Clone, PartialEq)]
pub struct StoryRecord {
    pub author: String,
    pub title: String,
    pub logline: String,
}

impl StoryRecord {
    pub fn slug(&self) -> String {
        story_slug(&self.author, &self.title)
    }

    /// Build the tag submitted to the embedding index: the logline is the
    /// embedded text, author/title/slug ride along as the payload.
    pub fn into_tag(self) -> Tag {
        let slug = self.slug();
        let mut value = Map::new();
        value.insert("author".to_string(), json!(self.author));
        value.insert("title".to_string(), json!(self.title));
        value.insert("slug".to_string(), json!(slug));

        Tag {
            kind: None,
            name: None,
            text: self.logline,
            value,
        }
    }
}

fn slugify(part: &str) -> String {
    let lowered = part.to_lowercase().replace(' ', "-");
    NON_ALPHANUMERIC.replace_all(&lowered, "-").into_owned()
}

/// Derive the stable identifier for a story from its author and title.
///
/// Both parts are lowercased, spaces become hyphens, and every remaining
/// character outside `[a-zA-Z0-9]` becomes a hyphen. Duplicate
/// (author, title) pairs produce duplicate slugs.
pub fn story_slug(author: &str, title: &str) -> String {
    format!("{}--{}", slugify(author), slugify(title))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_for_punctuated_author() {
        assert_eq!(
            story_slug("Jane Q. Doe", "The Long Walk"),
            "jane-q--doe--the-long-walk"
        );
    }

    #[test]
    fn slug_is_deterministic() {
        let first = story_slug("Ursula K. Le Guin", "The Ones Who Walk Away from Omelas");
        let second = story_slug("Ursula K. Le Guin", "The Ones Who Walk Away from Omelas");
        assert_eq!(first, second);
    }

    #[test]
    fn slug_matches_character_class() {
        let shape = Regex::new("^[a-z0-9-]+--[a-z0-9-]+$").unwrap();
        let inputs = [
            ("Jane Q. Doe", "The Long Walk"),
            ("O'Connor", "A Good Man Is Hard to Find"),
            ("Author #1", "Story (revised)!"),
            ("a_b", "c/d"),
        ];
        for (author, title) in inputs {
            let slug = story_slug(author, title);
            assert!(shape.is_match(&slug), "unexpected slug {slug:?}");
        }
    }

    #[test]
    fn duplicate_pairs_collide() {
        assert_eq!(story_slug("Jane Doe", "Walk"), story_slug("Jane Doe", "Walk"));
        // Punctuation collapses to the same hyphen, so near-identical
        // inputs can collide too; that is accepted behavior.
        assert_eq!(story_slug("Jane.Doe", "Walk"), story_slug("Jane,Doe", "Walk"));
    }

    #[test]
    fn record_becomes_tag_with_payload() {
        let record = StoryRecord {
            author: "Jane Q. Doe".to_string(),
            title: "The Long Walk".to_string(),
            logline: "A woman walks until the road runs out.".to_string(),
        };

        let tag = record.into_tag();
        assert_eq!(tag.text, "A woman walks until the road runs out.");
        assert_eq!(tag.value["author"], "Jane Q. Doe");
        assert_eq!(tag.value["title"], "The Long Walk");
        assert_eq!(tag.value["slug"], "jane-q--doe--the-long-walk");
    }
}
