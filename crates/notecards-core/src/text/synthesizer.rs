//! Heuristic line-to-card synthesis.

use tracing::{debug, trace, warn};

use super::{segment, CardSynthesizer};
use crate::models::card::{Flashcard, IdGenerator};
use crate::models::config::{SynthesisConfig, DEFAULT_QUESTION_TEMPLATE};

const LINE_PLACEHOLDER: &str = "{line}";

/// Splits `question<delimiter>answer` lines; other lines become "What is" cards.
#[derive(Debug, Clone)]
pub struct DelimiterSynthesizer {
    /// Separator between question and answer.
    delimiter: char,
    /// Question for undelimited lines, `{line}` is substituted.
    question_template: String,
}

impl DelimiterSynthesizer {
    /// Create a synthesizer splitting on `:`.
    pub fn new() -> Self {
        Self::from_config(&SynthesisConfig::default())
    }

    /// Create a synthesizer from configuration.
    pub fn from_config(config: &SynthesisConfig) -> Self {
        Self {
            delimiter: config.delimiter,
            question_template: question_template_or_default(config.question_template.clone()),
        }
    }

    /// Set the question/answer delimiter.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the question template for undelimited lines.
    ///
    /// A blank template keeps the default, since it would produce empty questions.
    pub fn with_question_template(mut self, template: impl Into<String>) -> Self {
        self.question_template = question_template_or_default(template.into());
        self
    }

    /// Question and answer text for a single trimmed line.
    fn split_line<'a>(&self, line: &'a str) -> (String, &'a str) {
        if let Some((question, answer)) = line.split_once(self.delimiter) {
            let (question, answer) = (question.trim(), answer.trim());
            if !question.is_empty() && !answer.is_empty() {
                return (question.to_string(), answer);
            }
            // Cards never have an empty side, so `":"` and `"Term:"` take the template form.
            trace!("Line {:?} has an empty side, using question template", line);
        }

        (self.question_template.replace(LINE_PLACEHOLDER, line), line)
    }
}

fn question_template_or_default(template: String) -> String {
    if template.trim().is_empty() {
        warn!("Blank question template, using {:?}", DEFAULT_QUESTION_TEMPLATE);
        DEFAULT_QUESTION_TEMPLATE.to_string()
    } else {
        template
    }
}

impl Default for DelimiterSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl CardSynthesizer for DelimiterSynthesizer {
    fn synthesize(&self, text: &str, ids: &IdGenerator) -> Vec<Flashcard> {
        let batch = ids.batch();

        let cards: Vec<Flashcard> = segment(text)
            .filter_map(|line| {
                let (question, answer) = self.split_line(line);
                Flashcard::new(batch.next_id(), &question, answer)
            })
            .collect();

        debug!("Synthesized {} cards", cards.len());
        cards
    }
}
