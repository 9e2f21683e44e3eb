#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("quiz has no questions")]
    EmptyQuiz,
    #[error("question {question_id} belongs to quiz {found}, expected {expected}")]
    QuestionMismatch {
        question_id: String,
        expected: String,
        found: String,
    },
    #[error("quiz {0} not found")]
    QuizNotFound(String),
    #[error("question index {index} out of range (quiz has {len} questions)")]
    OutOfRange { index: usize, len: usize },
    #[error("session is not active")]
    NotActive,
    #[error("{missing} question(s) still unanswered")]
    Unanswered { missing: usize },
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
    #[error("storage failure: {0}")]
    Storage(String),
    // Froms
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
