use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use coursequiz::cli::{Cli, Command};
use coursequiz::config::Config;
use coursequiz::controller::Controller;
use coursequiz::persist::YamlStore;
use coursequiz::store::QuizStore;
use coursequiz::{prompt, submit};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
    dotenvy::dotenv().ok();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_cli(Cli::parse());

    let store = YamlStore::open(&config.catalog_path, config.attempts_path.clone())
        .await
        .with_context(|| format!("cannot open catalog {}", config.catalog_path.display()))?;
    let store = Arc::new(store);

    match config.command {
        Command::Courses => {
            for course in store.list_courses().await? {
                println!("{}  {} [{}]", course.id, course.title, course.category);
                if !course.description.is_empty() {
                    println!("    {}", course.description);
                }
            }
        }
        Command::Quizzes { ref course } => {
            let quizzes = store.list_quizzes(course).await?;
            if quizzes.is_empty() {
                println!("No quizzes for course {}", course);
            }
            for quiz in quizzes {
                let questions = store.list_questions(&quiz.id).await?.len();
                let best = match store.best_score(&quiz.id).await {
                    Ok(Some(score)) => format!(", best score {}%", score),
                    Ok(None) => String::new(),
                    Err(e) => {
                        tracing::warn!("cannot read best score for {}: {}", quiz.id, e);
                        String::new()
                    }
                };
                println!(
                    "{}  {} ({} questions, {} min, pass {}%{})",
                    quiz.id, quiz.title, questions, quiz.duration_minutes, quiz.passing_score, best
                );
            }
        }
        Command::History { ref quiz } => {
            let attempts = store.recent_attempts(quiz.as_deref()).await?;
            if attempts.is_empty() {
                println!("No attempts yet");
            }
            for a in attempts {
                println!(
                    "{}  {}  {}%  {}/{}  {}",
                    a.completed_at.format("%Y-%m-%d %H:%M"),
                    a.quiz_id,
                    a.score,
                    a.correct_answers,
                    a.total_questions,
                    coursequiz::timer::format_elapsed(a.time_taken_seconds),
                );
            }
        }
        Command::Take { ref quiz } => {
            let mut controller = Controller::new(Arc::clone(&store), quiz.clone());
            if let Some(user) = config.user_id.clone() {
                controller = controller.with_user(user);
            }
            controller
                .load()
                .await
                .with_context(|| format!("cannot load quiz {}", quiz))?;

            match prompt::run_session(&mut controller).await? {
                Some(result) => {
                    let session = controller
                        .session()
                        .context("session disappeared after submission")?;
                    tracing::info!("{}", submit::build_summary(session.quiz(), &result));
                    println!("\n{}", submit::build_report(session.quiz(), &result));
                    if controller.flush().await.is_empty() {
                        eprintln!("Warning: your attempt could not be saved.");
                    }
                }
                None => controller.exit(),
            }
        }
    }

    Ok(())
}
