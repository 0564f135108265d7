//! Domain models that get passed between the wizard, the store and the
//! exporter. These types stay light-weight data holders so other layers can
//! focus on presentation and persistence logic.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classifier::classify;
use crate::error::{Error, Result};

/// Lowest accepted preference score.
pub const MIN_SCORE: u8 = 1;
/// Highest accepted preference score; also the number of dots on a badge.
pub const MAX_SCORE: u8 = 5;

/// Where a participant draws energy from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Energy {
    #[serde(rename = "E")]
    Extraversion,
    #[serde(rename = "I")]
    Introversion,
}

/// How a participant takes in information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Perception {
    #[serde(rename = "S")]
    Sensing,
    #[serde(rename = "N")]
    Intuition,
}

/// What a participant bases decisions on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Judgment {
    #[serde(rename = "T")]
    Thinking,
    #[serde(rename = "F")]
    Feeling,
}

/// How a participant organizes their outer life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lifestyle {
    #[serde(rename = "J")]
    Judging,
    #[serde(rename = "P")]
    Perceiving,
}

/// Single-letter code shared by the four axis enums. The letters double as
/// keyboard shortcuts in the wizard and as the building blocks of the
/// four-letter badge code.
pub trait AxisLetter: Sized + Copy {
    /// Both values of the axis, in the order the wizard presents them.
    const CHOICES: [Self; 2];

    fn letter(self) -> char;

    /// Parse a letter (case-insensitive) back into the axis value.
    fn from_letter(ch: char) -> Option<Self> {
        let upper = ch.to_ascii_uppercase();
        Self::CHOICES.into_iter().find(|value| value.letter() == upper)
    }
}

impl AxisLetter for Energy {
    const CHOICES: [Self; 2] = [Energy::Extraversion, Energy::Introversion];

    fn letter(self) -> char {
        match self {
            Energy::Extraversion => 'E',
            Energy::Introversion => 'I',
        }
    }
}

impl AxisLetter for Perception {
    const CHOICES: [Self; 2] = [Perception::Sensing, Perception::Intuition];

    fn letter(self) -> char {
        match self {
            Perception::Sensing => 'S',
            Perception::Intuition => 'N',
        }
    }
}

impl AxisLetter for Judgment {
    const CHOICES: [Self; 2] = [Judgment::Thinking, Judgment::Feeling];

    fn letter(self) -> char {
        match self {
            Judgment::Thinking => 'T',
            Judgment::Feeling => 'F',
        }
    }
}

impl AxisLetter for Lifestyle {
    const CHOICES: [Self; 2] = [Lifestyle::Judging, Lifestyle::Perceiving];

    fn letter(self) -> char {
        match self {
            Lifestyle::Judging => 'J',
            Lifestyle::Perceiving => 'P',
        }
    }
}

/// The four personality axes as collected by the wizard. Every axis starts
/// unset; the wizard fills them one question at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisSelection {
    pub energy: Option<Energy>,
    pub perception: Option<Perception>,
    pub judgment: Option<Judgment>,
    pub lifestyle: Option<Lifestyle>,
}

impl AxisSelection {
    /// Build a fully-set selection.
    pub fn new(
        energy: Energy,
        perception: Perception,
        judgment: Judgment,
        lifestyle: Lifestyle,
    ) -> Self {
        Self {
            energy: Some(energy),
            perception: Some(perception),
            judgment: Some(judgment),
            lifestyle: Some(lifestyle),
        }
    }

    /// Parse a four-letter code such as `INTJ`. Returns `None` unless every
    /// letter belongs to its axis.
    pub fn from_code(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let selection = Self::new(
            Energy::from_letter(chars.next()?)?,
            Perception::from_letter(chars.next()?)?,
            Judgment::from_letter(chars.next()?)?,
            Lifestyle::from_letter(chars.next()?)?,
        );
        if chars.next().is_some() {
            return None;
        }
        Some(selection)
    }

    pub fn is_complete(&self) -> bool {
        self.energy.is_some()
            && self.perception.is_some()
            && self.judgment.is_some()
            && self.lifestyle.is_some()
    }

    /// Concatenate the axis letters in fixed order (energy, perception,
    /// judgment, lifestyle). Unset axes render as `?`.
    pub fn code(&self) -> String {
        fn letter<A: AxisLetter>(value: Option<A>) -> char {
            value.map(A::letter).unwrap_or('?')
        }

        [
            letter(self.energy),
            letter(self.perception),
            letter(self.judgment),
            letter(self.lifestyle),
        ]
        .iter()
        .collect()
    }
}

/// One of the four temperament families a badge is themed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Group {
    #[serde(rename = "NT")]
    Strategist,
    #[serde(rename = "NF")]
    Idealist,
    #[serde(rename = "SJ")]
    Guardian,
    #[serde(rename = "SP")]
    Artisan,
}

impl Group {
    pub const ALL: [Group; 4] = [
        Group::Strategist,
        Group::Idealist,
        Group::Guardian,
        Group::Artisan,
    ];

    /// Two-letter code used in exports and as the badge watermark.
    pub fn code(self) -> &'static str {
        match self {
            Group::Strategist => "NT",
            Group::Idealist => "NF",
            Group::Guardian => "SJ",
            Group::Artisan => "SP",
        }
    }

    /// Title printed above the participant's name.
    pub fn title(self) -> &'static str {
        match self {
            Group::Strategist => "THE STRATEGIST",
            Group::Idealist => "THE IDEALIST",
            Group::Guardian => "THE GUARDIAN",
            Group::Artisan => "THE ARTISAN",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A registered participant. Records are created once at submission time and
/// afterwards only ever gain the `printed` flag or get deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Opaque identity derived from the creation time in epoch milliseconds.
    pub id: String,
    /// Display name, trimmed and upper-cased.
    pub name: String,
    /// Fully-set axis selection.
    pub selection: AxisSelection,
    /// Group derived from `selection` at submission time.
    pub group: Group,
    /// Short free-text interest printed in the middle of the badge.
    pub interest: String,
    /// Preference score between [`MIN_SCORE`] and [`MAX_SCORE`].
    pub score: u8,
    /// Optional link; empty when the participant skipped the step.
    #[serde(default)]
    pub link: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    /// Whether the badge already went through a document export.
    #[serde(default)]
    pub printed: bool,
}

impl Participant {
    /// Four-letter code in axis order.
    pub fn code(&self) -> String {
        self.selection.code()
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code())
    }
}

/// In-progress wizard input. Fields stay raw until [`ParticipantDraft::validate`]
/// turns them into a [`Participant`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantDraft {
    pub name: String,
    pub selection: AxisSelection,
    pub interest: String,
    pub score: Option<u8>,
    pub link: String,
}

impl ParticipantDraft {
    /// Check every required field and build the record. The first failing
    /// field is reported; nothing is created on failure.
    pub fn validate(
        &self,
        id: String,
        created_at: DateTime<Utc>,
        max_interest_chars: usize,
    ) -> Result<Participant> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::validation("Name", "is required"));
        }
        if !self.selection.is_complete() {
            return Err(Error::validation(
                "Personality",
                "answer all four questions",
            ));
        }
        let interest = self.interest.trim();
        if interest.is_empty() {
            return Err(Error::validation("Interest", "is required"));
        }
        if interest.chars().count() > max_interest_chars {
            return Err(Error::validation(
                "Interest",
                format!("keep it within {max_interest_chars} characters"),
            ));
        }
        let score = match self.score {
            Some(score) if (MIN_SCORE..=MAX_SCORE).contains(&score) => score,
            Some(score) => {
                return Err(Error::validation(
                    "Score",
                    format!("{score} is outside {MIN_SCORE}-{MAX_SCORE}"),
                ))
            }
            None => return Err(Error::validation("Score", "pick a level")),
        };

        Ok(Participant {
            id,
            name: name.to_uppercase(),
            selection: self.selection,
            group: classify(&self.selection),
            interest: interest.to_string(),
            score,
            link: self.link.trim().to_string(),
            created_at,
            printed: false,
        })
    }
}
