use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub trait WeightCounter: Send + Sync {
    fn weigh(&self, content: &str) -> u64;
}

/// characters(content) := number of Unicode scalar values
#[derive(Debug, Default, Clone, Copy)]
pub struct CharacterCounter;

impl WeightCounter for CharacterCounter {
    fn weigh(&self, content: &str) -> u64 {
        content.chars().count() as u64
    }
}

/// words(content) := split(content, whitespace).len()
#[derive(Debug, Default, Clone, Copy)]
pub struct WordCounter;

impl WeightCounter for WordCounter {
    fn weigh(&self, content: &str) -> u64 {
        content.split_whitespace().count() as u64
    }
}

/// Operator-selected weight function.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightMode {
    #[default]
    #[serde(alias = "caracteres")]
    Characters,
    #[serde(alias = "mots")]
    Words,
}

impl WeightMode {
    pub fn as_str(self) -> &'static str {
        match self {
            WeightMode::Characters => "characters",
            WeightMode::Words => "words",
        }
    }

    pub fn counter(self) -> &'static dyn WeightCounter {
        match self {
            WeightMode::Characters => &CharacterCounter,
            WeightMode::Words => &WordCounter,
        }
    }
}

impl WeightCounter for WeightMode {
    fn weigh(&self, content: &str) -> u64 {
        self.counter().weigh(content)
    }
}

impl fmt::Display for WeightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid mode '{0}': expected 'characters' or 'words'")]
pub struct InvalidMode(pub String);

impl FromStr for WeightMode {
    type Err = InvalidMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "characters" | "chars" | "caracteres" => Ok(WeightMode::Characters),
            "words" | "mots" => Ok(WeightMode::Words),
            _ => Err(InvalidMode(s.to_string())),
        }
    }
}
