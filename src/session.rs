use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::model::*;
use crate::score::{self, Score};
use crate::submit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Active,
    Terminal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionStatus {
    Current,
    Answered,
    Unanswered,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Tick {
    Running { remaining: u32 },
    /// The clock ran out and forced the submission.
    Expired(QuizResult),
    /// The session already ended; the tick was ignored.
    Inactive,
}

/// One user working through one quiz.
///
/// A session is created `Active` and becomes `Terminal` exactly once, either
/// through [`Session::submit`] or when [`Session::tick`] runs the clock out.
/// It cannot be cloned, so the submit latch has a single owner:
///
/// ```compile_fail
/// fn fork(session: coursequiz::session::Session) {
///     let copy = session.clone();
/// }
/// ```
#[derive(Debug)]
pub struct Session {
    quiz: Quiz,
    questions: Vec<Question>,
    current_question: usize,
    answers: HashMap<String, String>,
    time_spent: HashMap<String, u64>,
    remaining_seconds: u32,
    started_at: DateTime<Utc>,
    submitted: bool,
    outcome: Option<Outcome>,
}

#[derive(Debug, Clone)]
struct Outcome {
    score: Score,
    result: QuizResult,
    completed_at: DateTime<Utc>,
}

impl Session {
    pub fn start(quiz: Quiz, questions: Vec<Question>) -> Result<Self> {
        Self::start_at(quiz, questions, Utc::now())
    }

    pub fn start_at(quiz: Quiz, questions: Vec<Question>, now: DateTime<Utc>) -> Result<Self> {
        if questions.is_empty() {
            return Err(Error::EmptyQuiz);
        }
        if let Some(q) = questions.iter().find(|q| q.quiz_id != quiz.id) {
            return Err(Error::QuestionMismatch {
                question_id: q.id.clone(),
                expected: quiz.id.clone(),
                found: q.quiz_id.clone(),
            });
        }

        let remaining_seconds = quiz.duration_minutes.saturating_mul(60);
        info!(quiz = %quiz.id, questions = questions.len(), remaining_seconds, "session started");

        Ok(Self {
            quiz,
            questions,
            current_question: 0,
            answers: HashMap::new(),
            time_spent: HashMap::new(),
            remaining_seconds,
            started_at: now,
            submitted: false,
            outcome: None,
        })
    }

    pub fn phase(&self) -> Phase {
        if self.submitted {
            Phase::Terminal
        } else {
            Phase::Active
        }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_question
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_question]
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn answers(&self) -> &HashMap<String, String> {
        &self.answers
    }

    pub fn selected_answer(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn all_answered(&self) -> bool {
        self.questions.iter().all(|q| self.answers.contains_key(&q.id))
    }

    /// Seconds the clock ran while the question was on screen.
    pub fn time_spent(&self, question_id: &str) -> u64 {
        self.time_spent.get(question_id).copied().unwrap_or(0)
    }

    /// Position through the quiz as a whole percentage.
    pub fn progress_percent(&self) -> u8 {
        score::round_percentage(self.current_question + 1, self.questions.len())
    }

    pub fn question_status(&self, idx: usize) -> Option<QuestionStatus> {
        let q = self.questions.get(idx)?;
        Some(if idx == self.current_question {
            QuestionStatus::Current
        } else if self.answers.contains_key(&q.id) {
            QuestionStatus::Answered
        } else {
            QuestionStatus::Unanswered
        })
    }

    pub fn result(&self) -> Option<&QuizResult> {
        self.outcome.as_ref().map(|o| &o.result)
    }

    fn ensure_active(&self) -> Result<()> {
        if self.submitted {
            Err(Error::NotActive)
        } else {
            Ok(())
        }
    }

    pub fn select_answer(&mut self, option: &str) -> Result<()> {
        self.ensure_active()?;
        let qid = self.questions[self.current_question].id.clone();
        debug!(question = %qid, answer = option, "answer selected");
        self.answers.insert(qid, option.to_string());
        Ok(())
    }

    pub fn go_to(&mut self, idx: usize) -> Result<()> {
        self.ensure_active()?;
        if idx >= self.questions.len() {
            return Err(Error::OutOfRange {
                index: idx,
                len: self.questions.len(),
            });
        }
        self.current_question = idx;
        Ok(())
    }

    pub fn next(&mut self) -> Result<()> {
        self.ensure_active()?;
        if self.current_question + 1 < self.questions.len() {
            self.current_question += 1;
        }
        Ok(())
    }

    pub fn previous(&mut self) -> Result<()> {
        self.ensure_active()?;
        if self.current_question > 0 {
            self.current_question -= 1;
        }
        Ok(())
    }

    pub fn tick(&mut self) -> Result<Tick> {
        self.tick_at(Utc::now())
    }

    pub fn tick_at(&mut self, now: DateTime<Utc>) -> Result<Tick> {
        if self.submitted {
            return Ok(Tick::Inactive);
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        let qid = self.questions[self.current_question].id.clone();
        *self.time_spent.entry(qid).or_insert(0) += 1;

        if self.remaining_seconds > 0 {
            return Ok(Tick::Running {
                remaining: self.remaining_seconds,
            });
        }

        info!(quiz = %self.quiz.id, "time expired, submitting");
        match self.submit_at(now)? {
            Some(result) => Ok(Tick::Expired(result)),
            None => Ok(Tick::Inactive),
        }
    }

    /// Ends the session regardless of how many questions were answered.
    ///
    /// Returns `None` if the session was already submitted.
    pub fn submit(&mut self) -> Result<Option<QuizResult>> {
        self.submit_at(Utc::now())
    }

    pub fn submit_at(&mut self, now: DateTime<Utc>) -> Result<Option<QuizResult>> {
        if self.submitted {
            debug!(quiz = %self.quiz.id, "duplicate submit ignored");
            return Ok(None);
        }
        self.submitted = true;

        let elapsed = (now - self.started_at).num_seconds().max(0) as u64;
        let score = score::calculate_score(&self.questions, &self.answers)?;
        let result = submit::build_result(&self.quiz, &self.questions, &score, elapsed);

        info!(
            quiz = %self.quiz.id,
            score = result.score,
            correct = result.correct_answers,
            total = result.total_questions,
            passed = result.passed,
            "session submitted"
        );

        self.outcome = Some(Outcome {
            score,
            result: result.clone(),
            completed_at: now,
        });
        Ok(Some(result))
    }

    /// Submission confirmed by the user, which requires every question answered.
    pub fn confirm_submit(&mut self) -> Result<Option<QuizResult>> {
        self.confirm_submit_at(Utc::now())
    }

    pub fn confirm_submit_at(&mut self, now: DateTime<Utc>) -> Result<Option<QuizResult>> {
        if self.submitted {
            return Ok(None);
        }
        let missing = self.questions.len() - self.answered_count();
        if missing > 0 {
            return Err(Error::Unanswered { missing });
        }
        self.submit_at(now)
    }

    /// The record to persist for this session, once it has been submitted.
    pub fn attempt(&self, user_id: Option<String>) -> Option<NewAttempt> {
        let outcome = self.outcome.as_ref()?;
        Some(submit::build_attempt(
            &self.quiz,
            &outcome.score,
            &outcome.result,
            &self.time_spent,
            user_id,
            outcome.completed_at,
        ))
    }
}
