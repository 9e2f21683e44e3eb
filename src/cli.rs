use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "coursequiz", version, about = "Timed course quizzes in the terminal")]
pub struct Cli {
    /// Quiz catalog (YAML)
    #[arg(long, env = "COURSEQUIZ_CATALOG", default_value = "catalog.yaml", value_name = "path")]
    pub catalog: PathBuf,

    /// Attempt history file [default: <data dir>/coursequiz/attempts.yaml]
    #[arg(long, env = "COURSEQUIZ_ATTEMPTS", value_name = "path")]
    pub attempts: Option<PathBuf>,

    /// User id recorded on saved attempts
    #[arg(long, env = "COURSEQUIZ_USER", value_name = "id")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List courses
    Courses,
    /// List the quizzes of a course with your best scores
    Quizzes {
        course: String,
    },
    /// Take a quiz
    Take {
        quiz: String,
    },
    /// Show the most recent attempts
    History {
        quiz: Option<String>,
    },
}
