//! Turns a participant record into a fixed-size visual badge.
//!
//! [`render`] is a pure function: identical records always produce identical
//! badges, and nothing here touches the store or the file system. The SVG
//! serialization lives in [`svg`] so the rasterizer and the terminal preview
//! can share the same [`VisualBadge`].

mod svg;

use std::fmt;

use crate::models::{Energy, Group, Participant, MAX_SCORE};

/// Physical badge width in millimetres.
pub const BADGE_WIDTH_MM: f32 = 104.0;
/// Physical badge height in millimetres.
pub const BADGE_HEIGHT_MM: f32 = 129.0;
/// Footer line printed at the bottom of every badge unless configured.
pub const DEFAULT_EVENT_TITLE: &str = "2026 Q1 VOLTUP TOWNHALL";

/// 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Background gradient of a badge, from the top-left stop to the
/// bottom-right stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub stops: [Rgb; 3],
}

/// One theme per (group, energy) pair.
const THEMES: [(Group, Energy, Theme); 8] = [
    (
        Group::Strategist,
        Energy::Extraversion,
        Theme {
            name: "crimson",
            stops: [Rgb(0x7f, 0x1d, 0x1d), Rgb(0xdc, 0x26, 0x26), Rgb(0xf4, 0x3f, 0x5e)],
        },
    ),
    (
        Group::Strategist,
        Energy::Introversion,
        Theme {
            name: "ember",
            stops: [Rgb(0x9a, 0x34, 0x12), Rgb(0xea, 0x58, 0x0c), Rgb(0xf5, 0x9e, 0x0b)],
        },
    ),
    (
        Group::Idealist,
        Energy::Extraversion,
        Theme {
            name: "blossom",
            stops: [Rgb(0xdb, 0x27, 0x77), Rgb(0xf4, 0x72, 0xb6), Rgb(0xfd, 0xa4, 0xaf)],
        },
    ),
    (
        Group::Idealist,
        Energy::Introversion,
        Theme {
            name: "orchid",
            stops: [Rgb(0xa2, 0x1c, 0xaf), Rgb(0xec, 0x48, 0x99), Rgb(0xfd, 0xa4, 0xaf)],
        },
    ),
    (
        Group::Guardian,
        Energy::Extraversion,
        Theme {
            name: "meadow",
            stops: [Rgb(0x16, 0xa3, 0x4a), Rgb(0x22, 0xc5, 0x5e), Rgb(0xa3, 0xe6, 0x35)],
        },
    ),
    (
        Group::Guardian,
        Energy::Introversion,
        Theme {
            name: "sunlight",
            stops: [Rgb(0xea, 0xb3, 0x08), Rgb(0xfa, 0xcc, 0x15), Rgb(0xfd, 0xe0, 0x47)],
        },
    ),
    (
        Group::Artisan,
        Energy::Extraversion,
        Theme {
            name: "ocean",
            stops: [Rgb(0x1e, 0x3a, 0x8a), Rgb(0x1d, 0x4e, 0xd8), Rgb(0x0e, 0x74, 0x90)],
        },
    ),
    (
        Group::Artisan,
        Energy::Introversion,
        Theme {
            name: "deep-sea",
            stops: [Rgb(0x31, 0x2e, 0x81), Rgb(0x1e, 0x40, 0xaf), Rgb(0x15, 0x5e, 0x75)],
        },
    ),
];

/// Look up the background for a group. An unset energy uses the
/// introversion variant.
pub fn theme_for(group: Group, energy: Option<Energy>) -> Theme {
    let energy = energy.unwrap_or(Energy::Introversion);
    THEMES
        .iter()
        .find(|(g, e, _)| *g == group && *e == energy)
        .map(|(_, _, theme)| *theme)
        .unwrap_or(THEMES[0].2)
}

/// Title shown next to the four-letter code. Unknown codes map to an empty
/// string.
pub fn code_title(code: &str) -> &'static str {
    match code {
        "INTJ" => "Meticulous Strategist",
        "INTP" => "Logical Thinker",
        "ENTJ" => "Bold Commander",
        "ENTP" => "Fiery Debater",
        "INFJ" => "Benevolent Advocate",
        "INFP" => "Passionate Mediator",
        "ENFJ" => "Righteous Activist",
        "ENFP" => "Sparkling Campaigner",
        "ISTJ" => "Upright Realist",
        "ISFJ" => "Brave Defender",
        "ESTJ" => "Strict Manager",
        "ESFJ" => "Sociable Diplomat",
        "ISTP" => "Versatile Virtuoso",
        "ISFP" => "Curious Artist",
        "ESTP" => "Daring Entrepreneur",
        "ESFP" => "Free-spirited Entertainer",
        _ => "",
    }
}

/// Group emblem drawn at the top of the badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Brain,
    Heart,
    Shield,
    Bolt,
}

impl Icon {
    pub fn for_group(group: Group) -> Self {
        match group {
            Group::Strategist => Icon::Brain,
            Group::Idealist => Icon::Heart,
            Group::Guardian => Icon::Shield,
            Group::Artisan => Icon::Bolt,
        }
    }

    /// Single glyph used by the terminal preview.
    pub fn glyph(self) -> char {
        match self {
            Icon::Brain => '✺',
            Icon::Heart => '♥',
            Icon::Shield => '◈',
            Icon::Bolt => '⚡',
        }
    }

    /// Outline path in a 24×24 box.
    pub(crate) fn path(self) -> &'static str {
        match self {
            Icon::Brain => {
                "M9.5 2A2.5 2.5 0 0 0 7 4.5v.5a3 3 0 0 0-3 3v1a3 3 0 0 0 0 6v1a3 3 0 0 0 3 3h.5\
                 A2.5 2.5 0 0 0 10 21.5V4.5A2.5 2.5 0 0 0 9.5 2zM14.5 2A2.5 2.5 0 0 1 17 4.5v.5\
                 a3 3 0 0 1 3 3v1a3 3 0 0 1 0 6v1a3 3 0 0 1-3 3h-.5A2.5 2.5 0 0 1 14 21.5V4.5\
                 A2.5 2.5 0 0 1 14.5 2z"
            }
            Icon::Heart => {
                "M12 21s-7-4.35-9.5-8.5C.5 8.5 3 4 7 4c2 0 3.5 1 5 3 1.5-2 3-3 5-3 4 0 6.5 4.5 \
                 4.5 8.5C19 16.65 12 21 12 21z"
            }
            Icon::Shield => "M12 22s8-4 8-10V5l-8-3-8 3v7c0 6 8 10 8 10z",
            Icon::Bolt => "M13 2 3 14h9l-1 8 10-12h-9l1-8z",
        }
    }
}

/// State of one preference dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dot {
    Filled,
    Empty,
}

/// Everything needed to draw one badge, already resolved from the record.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualBadge {
    pub width_mm: f32,
    pub height_mm: f32,
    pub theme: Theme,
    pub icon: Icon,
    pub group: Group,
    pub group_title: &'static str,
    pub name: String,
    pub code: String,
    pub code_title: &'static str,
    pub interest: String,
    pub dots: [Dot; MAX_SCORE as usize],
    pub footer: String,
}

impl VisualBadge {
    pub fn filled_dots(&self) -> usize {
        self.dots.iter().filter(|dot| **dot == Dot::Filled).count()
    }
}

/// Renders badges with a fixed footer line.
#[derive(Debug, Clone)]
pub struct BadgeRenderer {
    event_title: String,
}

impl Default for BadgeRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_TITLE)
    }
}

impl BadgeRenderer {
    pub fn new(event_title: impl Into<String>) -> Self {
        Self {
            event_title: event_title.into(),
        }
    }

    pub fn render(&self, record: &Participant) -> VisualBadge {
        let code = record.code();
        let mut dots = [Dot::Empty; MAX_SCORE as usize];
        for dot in dots.iter_mut().take(record.score as usize) {
            *dot = Dot::Filled;
        }

        VisualBadge {
            width_mm: BADGE_WIDTH_MM,
            height_mm: BADGE_HEIGHT_MM,
            theme: theme_for(record.group, record.selection.energy),
            icon: Icon::for_group(record.group),
            group: record.group,
            group_title: record.group.title(),
            name: record.name.to_uppercase(),
            code_title: code_title(&code),
            code,
            interest: record.interest.clone(),
            dots,
            footer: self.event_title.clone(),
        }
    }
}

/// Render with the default footer.
pub fn render(record: &Participant) -> VisualBadge {
    BadgeRenderer::default().render(record)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::Utc;

    use super::*;
    use crate::classifier::classify;
    use crate::models::AxisSelection;

    fn participant(code: &str, score: u8) -> Participant {
        let selection = AxisSelection::from_code(code).unwrap();
        Participant {
            id: "1".to_string(),
            name: "chloe".to_string(),
            selection,
            group: classify(&selection),
            interest: "travel".to_string(),
            score,
            link: String::new(),
            created_at: Utc::now(),
            printed: false,
        }
    }

    #[test]
    fn eight_distinct_themes() {
        let names: HashSet<&str> = THEMES.iter().map(|(_, _, t)| t.name).collect();
        assert_eq!(names.len(), 8);
        for group in Group::ALL {
            assert_ne!(
                theme_for(group, Some(Energy::Extraversion)),
                theme_for(group, Some(Energy::Introversion))
            );
        }
    }

    #[test]
    fn render_resolves_every_field() {
        let badge = render(&participant("ENTJ", 3));
        assert_eq!(badge.name, "CHLOE");
        assert_eq!(badge.code, "ENTJ");
        assert_eq!(badge.code_title, "Bold Commander");
        assert_eq!(badge.icon, Icon::Brain);
        assert_eq!(badge.group_title, "THE STRATEGIST");
        assert_eq!(badge.theme.name, "crimson");
        assert_eq!(badge.filled_dots(), 3);
        assert_eq!(badge.dots[2], Dot::Filled);
        assert_eq!(badge.dots[3], Dot::Empty);
        assert_eq!((badge.width_mm, badge.height_mm), (104.0, 129.0));
        assert_eq!(badge.footer, DEFAULT_EVENT_TITLE);
    }

    #[test]
    fn render_is_deterministic() {
        let record = participant("ISFP", 5);
        assert_eq!(render(&record), render(&record));
    }

    #[test]
    fn every_full_code_has_a_title() {
        for e in ['E', 'I'] {
            for n in ['N', 'S'] {
                for t in ['T', 'F'] {
                    for j in ['J', 'P'] {
                        let code: String = [e, n, t, j].iter().collect();
                        assert!(!code_title(&code).is_empty(), "{code}");
                    }
                }
            }
        }
        assert_eq!(code_title("E?TJ"), "");
    }

    #[test]
    fn custom_footer() {
        let badge = BadgeRenderer::new("SPRING PARTY").render(&participant("ISTJ", 1));
        assert_eq!(badge.footer, "SPRING PARTY");
        assert_eq!(badge.filled_dots(), 1);
        assert_eq!(badge.icon, Icon::Shield);
    }
}
