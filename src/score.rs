//! Count-based scoring of a finished session.
//!
//! Every question weighs the same regardless of its `points` value. The
//! percentage is rounded to the nearest integer with ties away from zero.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::Question;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredAnswer {
    pub question_id: String,
    pub selected: Option<String>,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    pub score: u8,
    pub correct_answers: usize,
    pub details: Vec<ScoredAnswer>,
}

pub fn calculate_score(questions: &[Question], answers: &HashMap<String, String>) -> Result<Score> {
    if questions.is_empty() {
        return Err(Error::EmptyQuiz);
    }

    let mut correct_answers = 0;
    let mut details = Vec::with_capacity(questions.len());

    for q in questions {
        let selected = answers.get(&q.id).cloned();
        let is_correct = selected.as_deref() == Some(q.correct_answer.as_str());
        if is_correct {
            correct_answers += 1;
        }
        details.push(ScoredAnswer {
            question_id: q.id.clone(),
            selected,
            is_correct,
        });
    }

    Ok(Score {
        score: round_percentage(correct_answers, questions.len()),
        correct_answers,
        details,
    })
}

/// `round(100 * part / total)` in integer arithmetic. `part` must not exceed `total`.
pub fn round_percentage(part: usize, total: usize) -> u8 {
    debug_assert!(total > 0 && part <= total);
    ((200 * part + total) / (2 * total)) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Performance {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl Performance {
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => Performance::Excellent,
            75..=89 => Performance::Good,
            60..=74 => Performance::Fair,
            _ => Performance::NeedsImprovement,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Performance::Excellent => "Excellent",
            Performance::Good => "Good",
            Performance::Fair => "Fair",
            Performance::NeedsImprovement => "Need Improvement",
        }
    }
}
