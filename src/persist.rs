//! File-backed store: a read-only YAML catalog plus a YAML attempt log.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::model::*;
use crate::store::{self, QuizStore};

#[derive(Debug, Default, Serialize, Deserialize)]
struct AttemptLog {
    #[serde(default)]
    attempts: Vec<Attempt>,
}

#[derive(Debug)]
pub struct YamlStore {
    catalog: Catalog,
    attempts_path: PathBuf,
    attempts: Mutex<Vec<Attempt>>,
}

impl YamlStore {
    pub async fn open(catalog_path: &Path, attempts_path: PathBuf) -> Result<Self> {
        let catalog = load_catalog(catalog_path).await?;
        let attempts = load_attempts(&attempts_path).await?;
        info!(
            catalog = %catalog_path.display(),
            courses = catalog.courses.len(),
            quizzes = catalog.quizzes.len(),
            attempts = attempts.len(),
            "store opened"
        );
        Ok(Self {
            catalog,
            attempts_path,
            attempts: Mutex::new(attempts),
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn attempts_path(&self) -> &Path {
        &self.attempts_path
    }
}

impl QuizStore for YamlStore {
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
        let mut attempts = self.attempts.lock().await;
        let id = store::attempt_id(&attempt.quiz_id, attempt.completed_at, attempts.len());
        let stored = Attempt::from_new(id, attempt, Utc::now());

        // Only keep the attempt in memory once it is on disk.
        let mut log = AttemptLog {
            attempts: attempts.clone(),
        };
        log.attempts.push(stored.clone());
        let yaml = serde_yaml::to_string(&log)?;
        atomic_write(&self.attempts_path, &yaml).await?;

        attempts.push(stored.clone());
        debug!(attempt = %stored.id, path = %self.attempts_path.display(), "attempt written");
        Ok(stored)
    }

    async fn best_score(&self, quiz_id: &str) -> Result<Option<u8>> {
        Ok(store::best_score(&self.attempts.lock().await, quiz_id))
    }

    async fn recent_attempts(&self, quiz_id: Option<&str>) -> Result<Vec<Attempt>> {
        Ok(store::recent_attempts(&self.attempts.lock().await, quiz_id))
    }
}

pub async fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path).await.map_err(|e| {
        Error::Storage(format!("cannot read catalog {}: {}", path.display(), e))
    })?;
    let catalog: Catalog = serde_yaml::from_str(&content)?;
    catalog.validate()?;
    Ok(catalog)
}

async fn load_attempts(path: &Path) -> Result<Vec<Attempt>> {
    if !fs::try_exists(path).await? {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path).await?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let log: AttemptLog = serde_yaml::from_str(&content)?;
    Ok(log.attempts)
}

async fn atomic_write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, content).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}
