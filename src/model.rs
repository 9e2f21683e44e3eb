use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Displayed in place of a selected answer when the question was skipped.
pub const NO_ANSWER: &str = "No answer";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub course_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub duration_minutes: u32,
    /// Minimum percentage (0-100) needed to pass.
    pub passing_score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub quiz_id: String,
    pub question_text: String,
    pub question_type: QuestionType,
    pub options: Vec<String>,
    pub correct_answer: String,
    /// Carried for display; scoring counts every question equally.
    #[serde(default = "default_points")]
    pub points: u32,
    pub order_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_points() -> u32 {
    1
}

/// Everything a store serves as reference data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub quizzes: Vec<Quiz>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDetail {
    pub question: String,
    /// `None` when the question was left unanswered.
    pub selected_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
}

impl QuestionDetail {
    pub fn display_answer(&self) -> &str {
        self.selected_answer.as_deref().unwrap_or(NO_ANSWER)
    }
}

/// Immediate outcome of a finished session, independent of persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub score: u8,
    pub total_questions: usize,
    pub correct_answers: usize,
    pub time_taken_seconds: u64,
    pub passed: bool,
    pub details: Vec<QuestionDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: String,
    /// Empty when the question was left unanswered.
    pub selected_answer: String,
    pub is_correct: bool,
    #[serde(default)]
    pub time_spent_seconds: u64,
}

/// An attempt before the store has assigned it an identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAttempt {
    pub user_id: Option<String>,
    pub quiz_id: String,
    pub score: u8,
    pub total_questions: usize,
    pub correct_answers: usize,
    pub time_taken_seconds: u64,
    pub answers: Vec<AnswerRecord>,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub quiz_id: String,
    pub score: u8,
    pub total_questions: usize,
    pub correct_answers: usize,
    pub time_taken_seconds: u64,
    pub answers: Vec<AnswerRecord>,
    pub completed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Attempt {
    pub fn from_new(id: String, attempt: NewAttempt, created_at: DateTime<Utc>) -> Self {
        let NewAttempt {
            user_id,
            quiz_id,
            score,
            total_questions,
            correct_answers,
            time_taken_seconds,
            answers,
            completed_at,
        } = attempt;
        Self {
            id,
            user_id,
            quiz_id,
            score,
            total_questions,
            correct_answers,
            time_taken_seconds,
            answers,
            completed_at,
            created_at,
        }
    }
}
