use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;
use thiserror::Error;

/// Who made the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Human,
    Ai,
}

impl Kind {
    pub fn label(&self) -> &'static str {
        match self {
            Kind::Human => "Human",
            Kind::Ai => "AI",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Kind {
    type Err = ();

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_lowercase().as_str() {
            "h" | "human" => Ok(Kind::Human),
            "a" | "ai" => Ok(Kind::Ai),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    /// URL or filesystem path of the image.
    pub image: String,
    pub kind: Kind,
    #[serde(default)]
    pub description: String,
}

impl Question {
    pub fn is_local_image(&self) -> bool {
        !(self.image.starts_with("http://") || self.image.starts_with("https://"))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Deck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub questions: Vec<Question>,
}

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("cannot read deck file")]
    Io(#[from] std::io::Error),
    #[error("malformed deck: {0}")]
    Json(#[from] serde_json::Error),
    #[error("deck has no questions")]
    Empty,
    #[error("question id {0} appears more than once")]
    DuplicateId(u32),
}

impl Deck {
    pub fn load(path: &Path) -> Result<Deck, DeckError> {
        let now = Instant::now();
        info!("[Deck] Reading deck from {:?}", path);
        let json = std::fs::read_to_string(path)?;
        let deck = Self::from_json(json.as_str())?;
        debug!(
            "[Deck] Loaded {} questions in {} ms.",
            deck.questions.len(),
            now.elapsed().as_millis()
        );
        Ok(deck)
    }

    pub fn from_json(json: &str) -> Result<Deck, DeckError> {
        let deck: Deck = serde_json::from_str(json)?;
        deck.validate()?;
        Ok(deck)
    }

    pub fn validate(&self) -> Result<(), DeckError> {
        if self.questions.is_empty() {
            warn!("[Deck] No questions found.");
            return Err(DeckError::Empty);
        }
        let mut seen = HashSet::with_capacity(self.questions.len());
        for question in &self.questions {
            if !seen.insert(question.id) {
                warn!("[Deck] Duplicate question id {}", question.id);
                return Err(DeckError::DuplicateId(question.id));
            }
        }
        Ok(())
    }

    pub fn count_of(&self, kind: Kind) -> usize {
        self.questions.iter().filter(|q| q.kind == kind).count()
    }

    pub fn template() -> Deck {
        Deck {
            name: Some(String::from("My deck")),
            questions: vec![
                Question {
                    id: 1,
                    image: String::from("images/painting.png"),
                    kind: Kind::Human,
                    description: String::from("Oil on canvas, scanned."),
                },
                Question {
                    id: 2,
                    image: String::from("images/render.png"),
                    kind: Kind::Ai,
                    description: String::from("Generated from a text prompt."),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!("h".parse::<Kind>(), Ok(Kind::Human));
        assert_eq!(" Human ".parse::<Kind>(), Ok(Kind::Human));
        assert_eq!("a".parse::<Kind>(), Ok(Kind::Ai));
        assert_eq!("AI".parse::<Kind>(), Ok(Kind::Ai));
        assert!("robot".parse::<Kind>().is_err());
    }

    #[test]
    fn test_deck_from_json() {
        let json = r#"{
            "name": "Test",
            "questions": [
                {
                    "id": 1,
                    "image": "https://example.com/a.jpg",
                    "kind": "human",
                    "description": "A"
                },
                { "id": 2, "image": "b.png", "kind": "ai" }
            ]
        }"#;
        let deck = Deck::from_json(json).unwrap();
        assert_eq!(deck.name.as_deref(), Some("Test"));
        assert_eq!(deck.questions.len(), 2);
        assert_eq!(deck.questions[1].kind, Kind::Ai);
        assert_eq!(deck.questions[1].description, "");
        assert!(!deck.questions[0].is_local_image());
        assert!(deck.questions[1].is_local_image());
        assert_eq!(deck.count_of(Kind::Human), 1);
    }

    #[test]
    fn test_deck_rejects_empty() {
        let result = Deck::from_json(r#"{ "questions": [] }"#);
        assert!(matches!(result, Err(DeckError::Empty)));
    }

    #[test]
    fn test_deck_rejects_duplicate_ids() {
        let json = r#"{ "questions": [
            { "id": 7, "image": "a.png", "kind": "ai" },
            { "id": 7, "image": "b.png", "kind": "human" }
        ] }"#;
        assert!(matches!(Deck::from_json(json), Err(DeckError::DuplicateId(7))));
    }

    #[test]
    fn test_deck_rejects_unknown_kind() {
        let json = r#"{ "questions": [ { "id": 1, "image": "a.png", "kind": "robot" } ] }"#;
        assert!(matches!(Deck::from_json(json), Err(DeckError::Json(_))));
    }

    #[test]
    fn test_template_is_valid() {
        let deck = Deck::template();
        assert!(deck.validate().is_ok());
        let json = serde_json::to_string(&deck).unwrap();
        assert!(json.contains("\"kind\":\"human\""));
    }
}
