//! Timed course quizzes.
//!
//! - [`session::Session`]: state of one attempt (answers, navigation, countdown)
//! - [`score::calculate_score`]: pure count-based scoring
//! - [`controller::Controller`]: loads a session from a [`store::QuizStore`]
//!   and persists the finished attempt
//! - [`persist::YamlStore`]: catalog and attempt history kept in YAML files
pub mod catalog;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod persist;
pub mod prompt;
pub mod score;
pub mod session;
pub mod store;
pub mod submit;
pub mod timer;
