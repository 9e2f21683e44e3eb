use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};
use crate::model::{Attempt, QuizResult};
use crate::session::{Phase, Session, Tick};
use crate::store::QuizStore;

/// Drives one quiz attempt against a store: load, play, submit, persist.
///
/// Persisting the attempt happens on a background task so a slow or failing
/// store never delays or changes the result handed back to the caller.
/// Outside a tokio runtime the result is still produced but nothing is saved.
pub struct Controller<S> {
    store: Arc<S>,
    quiz_id: String,
    user_id: Option<String>,
    session: Option<Session>,
    pending_saves: Vec<JoinHandle<Option<Attempt>>>,
}

impl<S> Controller<S>
where
    S: QuizStore + 'static,
{
    pub fn new(store: Arc<S>, quiz_id: impl Into<String>) -> Self {
        Self {
            store,
            quiz_id: quiz_id.into(),
            user_id: None,
            session: None,
            pending_saves: Vec::new(),
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn quiz_id(&self) -> &str {
        &self.quiz_id
    }

    pub fn phase(&self) -> Phase {
        self.session.as_ref().map_or(Phase::Loading, Session::phase)
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    /// Fetch the quiz and its questions and start the session.
    ///
    /// On failure the controller stays in `Loading`; nothing is retried.
    pub async fn load(&mut self) -> Result<()> {
        if self.session.is_some() {
            debug!(quiz = %self.quiz_id, "session already loaded");
            return Ok(());
        }

        let fetched = tokio::try_join!(
            self.store.get_quiz(&self.quiz_id),
            self.store.list_questions(&self.quiz_id),
        );
        let (quiz, questions) = match fetched {
            Ok(pair) => pair,
            Err(e) => {
                warn!(quiz = %self.quiz_id, "loading quiz failed: {}", e);
                return Err(e);
            }
        };

        let quiz = quiz.ok_or_else(|| Error::QuizNotFound(self.quiz_id.clone()))?;
        self.session = Some(Session::start(quiz, questions)?);
        Ok(())
    }

    /// Advance the clock by one second; persists the attempt if time ran out.
    pub fn tick(&mut self) -> Result<Tick> {
        let Some(session) = self.session.as_mut() else {
            return Ok(Tick::Inactive);
        };
        let tick = session.tick()?;
        if let Tick::Expired(_) = tick {
            self.persist();
        }
        Ok(tick)
    }

    /// Forced submission; tolerates unanswered questions.
    ///
    /// Returns `None` if the session was already submitted.
    pub fn submit(&mut self) -> Result<Option<QuizResult>> {
        let session = self.session.as_mut().ok_or(Error::NotActive)?;
        let result = session.submit()?;
        if result.is_some() {
            self.persist();
        }
        Ok(result)
    }

    /// Submission confirmed by the user; every question must be answered.
    pub fn confirm_submit(&mut self) -> Result<Option<QuizResult>> {
        let session = self.session.as_mut().ok_or(Error::NotActive)?;
        let result = session.confirm_submit()?;
        if result.is_some() {
            self.persist();
        }
        Ok(result)
    }

    /// Start over on the same quiz after a submission, without reloading.
    pub fn retake(&mut self) -> Result<()> {
        let session = self.session.as_ref().ok_or(Error::NotActive)?;
        if session.phase() != Phase::Terminal {
            return Err(Error::NotActive);
        }
        let fresh = Session::start(session.quiz().clone(), session.questions().to_vec())?;
        self.session = Some(fresh);
        Ok(())
    }

    /// Leave the quiz. An unsubmitted session is discarded without a trace.
    pub fn exit(self) {
        if self.phase() == Phase::Active {
            info!(quiz = %self.quiz_id, "session abandoned");
        }
    }

    /// Wait for every background save started so far.
    pub async fn flush(&mut self) -> Vec<Attempt> {
        let mut saved = Vec::new();
        for handle in self.pending_saves.drain(..) {
            match handle.await {
                Ok(Some(attempt)) => saved.push(attempt),
                Ok(None) => {}
                Err(e) => error!("attempt save task failed: {}", e),
            }
        }
        saved
    }

    fn persist(&mut self) {
        let Some(attempt) = self
            .session
            .as_ref()
            .and_then(|s| s.attempt(self.user_id.clone()))
        else {
            return;
        };

        let Ok(runtime) = Handle::try_current() else {
            error!(quiz = %self.quiz_id, "no async runtime running, attempt not saved");
            return;
        };

        let store = Arc::clone(&self.store);
        let handle = runtime.spawn(async move {
            match store.save_attempt(attempt).await {
                Ok(saved) => {
                    info!(attempt = %saved.id, quiz = %saved.quiz_id, score = saved.score, "attempt saved");
                    Some(saved)
                }
                Err(e) => {
                    error!("Error saving quiz attempt: {}", e);
                    None
                }
            }
        });
        self.pending_saves.push(handle);
    }
}
