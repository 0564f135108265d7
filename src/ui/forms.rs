use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::models::{
    AxisLetter, AxisSelection, Energy, Judgment, Lifestyle, ParticipantDraft, Perception,
    MAX_SCORE, MIN_SCORE,
};

/// The eight wizard steps in the order participants see them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum WizardStep {
    Name,
    Energy,
    Perception,
    Judgment,
    Lifestyle,
    Interest,
    Score,
    Link,
}

impl WizardStep {
    pub(crate) const ALL: [WizardStep; 8] = [
        WizardStep::Name,
        WizardStep::Energy,
        WizardStep::Perception,
        WizardStep::Judgment,
        WizardStep::Lifestyle,
        WizardStep::Interest,
        WizardStep::Score,
        WizardStep::Link,
    ];

    /// 1-based position for the progress header.
    pub(crate) fn number(self) -> usize {
        Self::ALL.iter().position(|step| *step == self).unwrap_or(0) + 1
    }

    fn next(self) -> Option<Self> {
        Self::ALL.get(self.number()).copied()
    }

    fn previous(self) -> Option<Self> {
        self.number().checked_sub(2).map(|index| Self::ALL[index])
    }

    pub(crate) fn question(self) -> &'static str {
        match self {
            WizardStep::Name => "What should your badge call you?",
            WizardStep::Energy => "Where does your energy come from?",
            WizardStep::Perception => "How do you take in information?",
            WizardStep::Judgment => "How do you make decisions?",
            WizardStep::Lifestyle => "How do you like to live?",
            WizardStep::Interest => "What is your top interest right now?",
            WizardStep::Score => "How lively do you like a team dinner?",
            WizardStep::Link => "Recommend one office gadget (paste a link)",
        }
    }

    pub(crate) fn is_axis(self) -> bool {
        matches!(
            self,
            WizardStep::Energy | WizardStep::Perception | WizardStep::Judgment | WizardStep::Lifestyle
        )
    }
}

/// Label and blurb for each side of an axis question.
pub(crate) struct AxisOption {
    pub(crate) letter: char,
    pub(crate) label: &'static str,
    pub(crate) blurb: &'static str,
}

pub(crate) fn axis_options(step: WizardStep) -> [AxisOption; 2] {
    let option = |letter, label, blurb| AxisOption {
        letter,
        label,
        blurb,
    };
    match step {
        WizardStep::Perception => [
            option('S', "S (Sensing)", "Facts and hands-on experience first."),
            option('N', "N (Intuition)", "Possibilities and meaning first."),
        ],
        WizardStep::Judgment => [
            option('T', "T (Thinking)", "Logic and objective facts decide."),
            option('F', "F (Feeling)", "People and context decide."),
        ],
        WizardStep::Lifestyle => [
            option('J', "J (Judging)", "Plans and schedules feel right."),
            option('P', "P (Perceiving)", "Stay flexible and decide later."),
        ],
        _ => [
            option('E', "E (Extraversion)", "Recharged by being around people."),
            option('I', "I (Introversion)", "Recharged by quiet time alone."),
        ],
    }
}

pub(crate) fn score_label(level: u8) -> (&'static str, &'static str) {
    match level {
        1 => ("Safe ride home", "No drinks for me; good food and calm talk."),
        2 => ("Just for the mood", "A glass or two, mostly here for the chat."),
        3 => ("Middle of the road", "Go with the flow and join every toast."),
        4 => ("Party enthusiast", "Love the buzz and a high-energy table."),
        _ => ("Runaway train", "Ready to go until the very last round."),
    }
}

/// In-progress registration. Text steps accept typing; axis and score steps
/// accept choices.
#[derive(Clone, Debug)]
pub(crate) struct WizardForm {
    pub(crate) draft: ParticipantDraft,
    pub(crate) step: WizardStep,
    pub(crate) max_interest_chars: usize,
    pub(crate) error: Option<String>,
}

impl WizardForm {
    pub(crate) fn new(max_interest_chars: usize) -> Self {
        Self {
            draft: ParticipantDraft::default(),
            step: WizardStep::Name,
            max_interest_chars,
            error: None,
        }
    }

    /// Type into the current text step. Names are upper-cased as typed and
    /// the interest never grows past its limit.
    pub(crate) fn push_char(&mut self, ch: char) {
        match self.step {
            WizardStep::Name => self.draft.name.extend(ch.to_uppercase()),
            WizardStep::Interest => {
                if self.draft.interest.chars().count() < self.max_interest_chars {
                    self.draft.interest.push(ch);
                } else {
                    self.error = Some(format!(
                        "Keep it within {} characters.",
                        self.max_interest_chars
                    ));
                    return;
                }
            }
            WizardStep::Link => self.draft.link.push(ch),
            WizardStep::Score => {
                if let Some(level) = ch.to_digit(10) {
                    self.set_score(level as u8);
                }
                return;
            }
            _ => {
                self.choose_letter(ch);
                return;
            }
        }
        self.error = None;
    }

    pub(crate) fn backspace(&mut self) {
        match self.step {
            WizardStep::Name => {
                self.draft.name.pop();
            }
            WizardStep::Interest => {
                self.draft.interest.pop();
            }
            WizardStep::Link => {
                self.draft.link.pop();
            }
            _ => {}
        }
        self.error = None;
    }

    /// Pick an axis answer by its letter. Returns whether the letter belonged
    /// to the current question.
    pub(crate) fn choose_letter(&mut self, ch: char) -> bool {
        let ch = ch.to_ascii_uppercase();
        let selection = &mut self.draft.selection;
        let chosen = match self.step {
            WizardStep::Energy => set_axis(&mut selection.energy, ch),
            WizardStep::Perception => set_axis(&mut selection.perception, ch),
            WizardStep::Judgment => set_axis(&mut selection.judgment, ch),
            WizardStep::Lifestyle => set_axis(&mut selection.lifestyle, ch),
            _ => false,
        };
        if chosen {
            self.error = None;
        }
        chosen
    }

    /// Pick the left (0) or right (1) option of the current axis question.
    pub(crate) fn choose_side(&mut self, side: usize) -> bool {
        if !self.step.is_axis() {
            return false;
        }
        let letter = axis_options(self.step)[side.min(1)].letter;
        self.choose_letter(letter)
    }

    /// Letter currently chosen for the active axis question.
    pub(crate) fn current_axis_letter(&self) -> Option<char> {
        let selection = &self.draft.selection;
        match self.step {
            WizardStep::Energy => selection.energy.map(Energy::letter),
            WizardStep::Perception => selection.perception.map(Perception::letter),
            WizardStep::Judgment => selection.judgment.map(Judgment::letter),
            WizardStep::Lifestyle => selection.lifestyle.map(Lifestyle::letter),
            _ => None,
        }
    }

    pub(crate) fn set_score(&mut self, level: u8) {
        if (MIN_SCORE..=MAX_SCORE).contains(&level) {
            self.draft.score = Some(level);
            self.error = None;
        }
    }

    /// Move the score cursor; an unset score starts at the lowest level.
    pub(crate) fn nudge_score(&mut self, delta: i8) {
        let current = self.draft.score.unwrap_or(MIN_SCORE) as i8;
        let next = if self.draft.score.is_none() {
            MIN_SCORE as i8
        } else {
            (current + delta).clamp(MIN_SCORE as i8, MAX_SCORE as i8)
        };
        self.set_score(next as u8);
    }

    pub(crate) fn step_is_valid(&self) -> bool {
        let draft = &self.draft;
        let selection: &AxisSelection = &draft.selection;
        match self.step {
            WizardStep::Name => !draft.name.trim().is_empty(),
            WizardStep::Energy => selection.energy.is_some(),
            WizardStep::Perception => selection.perception.is_some(),
            WizardStep::Judgment => selection.judgment.is_some(),
            WizardStep::Lifestyle => selection.lifestyle.is_some(),
            WizardStep::Interest => !draft.interest.trim().is_empty(),
            WizardStep::Score => draft.score.is_some(),
            WizardStep::Link => true,
        }
    }

    /// Go to the next step when the current one is valid. Returns `true` when
    /// the last step was confirmed and the draft should be submitted.
    pub(crate) fn advance(&mut self) -> bool {
        if !self.step_is_valid() {
            self.error = Some(self.missing_message().to_string());
            return false;
        }
        self.error = None;
        match self.step.next() {
            Some(next) => {
                self.step = next;
                false
            }
            None => true,
        }
    }

    /// Go back one step. Returns `false` on the first step.
    pub(crate) fn back(&mut self) -> bool {
        self.error = None;
        match self.step.previous() {
            Some(previous) => {
                self.step = previous;
                true
            }
            None => false,
        }
    }

    fn missing_message(&self) -> &'static str {
        match self.step {
            WizardStep::Name => "Please enter a name.",
            WizardStep::Interest => "Please enter an interest.",
            WizardStep::Score => "Pick a level from 1 to 5.",
            _ => "Pick one of the two answers.",
        }
    }

    pub(crate) fn text_value(&self) -> Option<&str> {
        match self.step {
            WizardStep::Name => Some(&self.draft.name),
            WizardStep::Interest => Some(&self.draft.interest),
            WizardStep::Link => Some(&self.draft.link),
            _ => None,
        }
    }

    /// Styled input line for the text steps.
    pub(crate) fn build_line(&self) -> Line<'static> {
        let value = self.text_value().unwrap_or_default();
        let placeholder = match self.step {
            WizardStep::Name => "<required>",
            WizardStep::Interest => "<required>",
            _ => "<optional>",
        };
        let mut spans = vec![Span::raw("> ")];
        if value.is_empty() {
            spans.push(Span::styled(
                placeholder,
                Style::default().fg(Color::DarkGray),
            ));
        } else {
            spans.push(Span::styled(
                value.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        if self.step == WizardStep::Interest {
            spans.push(Span::styled(
                format!(
                    "  {}/{}",
                    value.chars().count(),
                    self.max_interest_chars
                ),
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    }
}

fn set_axis<A: AxisLetter>(slot: &mut Option<A>, ch: char) -> bool {
    match A::from_letter(ch) {
        Some(value) => {
            *slot = Some(value);
            true
        }
        None => false,
    }
}

/// Masked input for the operator passcode.
#[derive(Default, Clone, Debug)]
pub(crate) struct PasscodeForm {
    pub(crate) input: String,
    pub(crate) error: Option<String>,
}

impl PasscodeForm {
    pub(crate) fn push_char(&mut self, ch: char) {
        self.input.push(ch);
        self.error = None;
    }

    pub(crate) fn backspace(&mut self) {
        self.input.pop();
        self.error = None;
    }

    pub(crate) fn masked(&self) -> String {
        "*".repeat(self.input.chars().count())
    }
}

/// State for confirming deletion of the selected records.
pub(crate) struct ConfirmDelete {
    pub(crate) names: Vec<String>,
}
