//! Turns free-form model output into one of six haptic outcomes.
//!
//! The client plays `vib_count` pulses: one per letter A-E, and six when the
//! photo should be taken again.

use crate::config::UnrecognizedPolicy;
use serde::{Serialize, Serializer};
use std::fmt;

const RETAKE: &str = "RETAKE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    A,
    B,
    C,
    D,
    E,
    Retake,
    /// Uppercased upstream text that matched nothing.
    Unrecognized(String),
}

impl Answer {
    fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            'E' => Some(Self::E),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::Retake => RETAKE,
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn vib_count(&self) -> u8 {
        match self {
            Self::A => 1,
            Self::B => 2,
            Self::C => 3,
            Self::D => 4,
            Self::E => 5,
            Self::Retake | Self::Unrecognized(_) => 6,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Answer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// The relay's reply body. The count is derived from the answer on
/// construction, so the two never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedAnswer {
    answer: Answer,
    #[serde(rename = "vibCount")]
    vib_count: u8,
}

impl NormalizedAnswer {
    pub fn new(answer: Answer) -> Self {
        let vib_count = answer.vib_count();
        Self { answer, vib_count }
    }

    pub fn answer(&self) -> &Answer {
        &self.answer
    }

    pub fn vib_count(&self) -> u8 {
        self.vib_count
    }
}

pub fn normalize(text: &str, policy: UnrecognizedPolicy) -> NormalizedAnswer {
    let raw = text.trim().to_uppercase();

    if raw.is_empty() || raw.contains(RETAKE) {
        return NormalizedAnswer::new(Answer::Retake);
    }

    let answer = match raw.chars().next().and_then(Answer::from_letter) {
        Some(letter) => letter,
        None => match policy {
            UnrecognizedPolicy::Passthrough => Answer::Unrecognized(raw),
            UnrecognizedPolicy::Retake => Answer::Retake,
        },
    };

    NormalizedAnswer::new(answer)
}
