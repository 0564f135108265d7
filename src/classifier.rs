//! Maps an axis selection onto one of the four temperament groups.

use crate::models::{AxisSelection, Group, Judgment, Lifestyle, Perception};

/// Derive the group from perception plus judgment (intuitives) or lifestyle
/// (sensors). First matching rule wins.
///
/// A partial selection never errors: it falls back to `Strategist` for
/// intuitives and `Artisan` for everyone else, including an unset
/// perception. Stored records rely on that fallback, so keep it as is.
pub fn classify(selection: &AxisSelection) -> Group {
    match (
        selection.perception,
        selection.judgment,
        selection.lifestyle,
    ) {
        (Some(Perception::Intuition), Some(Judgment::Thinking), _) => Group::Strategist,
        (Some(Perception::Intuition), Some(Judgment::Feeling), _) => Group::Idealist,
        (Some(Perception::Sensing), _, Some(Lifestyle::Judging)) => Group::Guardian,
        (Some(Perception::Sensing), _, Some(Lifestyle::Perceiving)) => Group::Artisan,
        (Some(Perception::Intuition), None, _) => Group::Strategist,
        (Some(Perception::Sensing), _, None) | (None, _, _) => Group::Artisan,
    }
}
