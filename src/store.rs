//! Data access for courses, quizzes, questions and attempts.

use std::future::Future;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::model::*;

/// How many attempts [`QuizStore::recent_attempts`] returns at most.
pub const RECENT_LIMIT: usize = 10;

pub trait QuizStore: Send + Sync {
    fn list_courses(&self) -> impl Future<Output = Result<Vec<Course>>> + Send;

    fn list_quizzes(&self, course_id: &str) -> impl Future<Output = Result<Vec<Quiz>>> + Send;

    fn get_quiz(&self, quiz_id: &str) -> impl Future<Output = Result<Option<Quiz>>> + Send;

    fn list_questions(&self, quiz_id: &str) -> impl Future<Output = Result<Vec<Question>>> + Send;

    fn save_attempt(&self, attempt: NewAttempt) -> impl Future<Output = Result<Attempt>> + Send;

    /// Highest score over every stored attempt of the quiz.
    fn best_score(&self, quiz_id: &str) -> impl Future<Output = Result<Option<u8>>> + Send;

    /// Newest attempts first, optionally limited to one quiz.
    fn recent_attempts(&self, quiz_id: Option<&str>) -> impl Future<Output = Result<Vec<Attempt>>> + Send;
}

/// Keeps the catalog and every saved attempt in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    catalog: Catalog,
    attempts: Mutex<Vec<Attempt>>,
}

impl MemoryStore {
    pub fn new(catalog: Catalog) -> Result<Self> {
        catalog.validate()?;
        Ok(Self {
            catalog,
            attempts: Mutex::new(Vec::new()),
        })
    }

    pub fn attempts(&self) -> Result<Vec<Attempt>> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Attempt>>> {
        self.attempts
            .lock()
            .map_err(|_| Error::Storage("attempt list lock poisoned".to_string()))
    }
}

impl QuizStore for MemoryStore {
    async fn list_courses(&self) -> Result<Vec<Course>> {
        Ok(self.catalog.courses_by_title())
    }

    async fn list_quizzes(&self, course_id: &str) -> Result<Vec<Quiz>> {
        Ok(self.catalog.quizzes_for_course(course_id))
    }

    async fn get_quiz(&self, quiz_id: &str) -> Result<Option<Quiz>> {
        Ok(self.catalog.quiz(quiz_id))
    }

    async fn list_questions(&self, quiz_id: &str) -> Result<Vec<Question>> {
        Ok(self.catalog.questions_for_quiz(quiz_id))
    }

    async fn save_attempt(&self, attempt: NewAttempt) -> Result<Attempt> {
        let mut attempts = self.lock()?;
        let id = attempt_id(&attempt.quiz_id, attempt.completed_at, attempts.len());
        let stored = Attempt::from_new(id, attempt, Utc::now());
        attempts.push(stored.clone());
        Ok(stored)
    }

    async fn best_score(&self, quiz_id: &str) -> Result<Option<u8>> {
        Ok(best_score(&self.lock()?, quiz_id))
    }

    async fn recent_attempts(&self, quiz_id: Option<&str>) -> Result<Vec<Attempt>> {
        Ok(recent_attempts(&self.lock()?, quiz_id))
    }
}

pub fn best_score(attempts: &[Attempt], quiz_id: &str) -> Option<u8> {
    attempts
        .iter()
        .filter(|a| a.quiz_id == quiz_id)
        .map(|a| a.score)
        .max()
}

pub fn recent_attempts(attempts: &[Attempt], quiz_id: Option<&str>) -> Vec<Attempt> {
    let mut matching: Vec<Attempt> = attempts
        .iter()
        .filter(|a| quiz_id.map_or(true, |id| a.quiz_id == id))
        .cloned()
        .collect();
    matching.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
    matching.truncate(RECENT_LIMIT);
    matching
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Stable identity for a stored attempt.
pub fn attempt_id(quiz_id: &str, completed_at: DateTime<Utc>, seq: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(quiz_id.as_bytes());
    hasher.update(completed_at.to_rfc3339().as_bytes());
    hasher.update(seq.to_le_bytes());
    let digest = hasher.finalize();
    hex_encode(&digest[..16])
}
