//! Line-oriented terminal loop for taking a quiz.

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::controller::Controller;
use crate::error::{Error, Result};
use crate::model::QuizResult;
use crate::session::{QuestionStatus, Session, Tick};
use crate::store::QuizStore;
use crate::timer::{self, Countdown};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// 1-based option number.
    Select(usize),
    Next,
    Previous,
    /// 1-based question number.
    GoTo(usize),
    Submit,
    Quit,
    Help,
}

pub fn parse_input(line: &str) -> Option<Input> {
    let line = line.trim();
    let mut parts = line.split_whitespace();
    let head = parts.next()?;

    match head {
        "n" | "next" => Some(Input::Next),
        "p" | "prev" | "previous" => Some(Input::Previous),
        "s" | "submit" => Some(Input::Submit),
        "q" | "quit" | "exit" => Some(Input::Quit),
        "?" | "h" | "help" => Some(Input::Help),
        "g" | "go" => {
            let n: usize = parts.next()?.parse().ok()?;
            (n > 0).then_some(Input::GoTo(n))
        }
        other => {
            let n: usize = other.parse().ok()?;
            (n > 0).then_some(Input::Select(n))
        }
    }
}

const HELP: &str = "Commands: <number> select option, n next, p previous, g <k> go to question k, s submit, q quit";

/// Run a loaded session until it is submitted, times out, or the user quits.
///
/// Returns `None` when the user left without submitting.
pub async fn run_session<S>(controller: &mut Controller<S>) -> Result<Option<QuizResult>>
where
    S: QuizStore + 'static,
{
    let mut countdown = Countdown::every_second();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if let Some(session) = controller.session() {
        println!("{}", HELP);
        print_question(session);
    }

    let outcome = loop {
        tokio::select! {
            Some(_) = countdown.recv() => {
                match controller.tick()? {
                    Tick::Running { remaining } => {
                        if remaining == 60 || remaining % 300 == 0 {
                            println!("-- {} remaining --", timer::format_clock(remaining));
                        }
                    }
                    Tick::Expired(result) => {
                        println!("\nTime's up! Your answers have been submitted.");
                        break Some(result);
                    }
                    Tick::Inactive => break None,
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break None;
                };
                match handle_line(controller, &line)? {
                    Step::Continue => {}
                    Step::Finished(result) => break Some(result),
                    Step::Quit => break None,
                }
            }
        }
    };

    countdown.cancel();
    Ok(outcome)
}

enum Step {
    Continue,
    Finished(QuizResult),
    Quit,
}

fn handle_line<S>(controller: &mut Controller<S>, line: &str) -> Result<Step>
where
    S: QuizStore + 'static,
{
    let Some(input) = parse_input(line) else {
        println!("{}", HELP);
        return Ok(Step::Continue);
    };

    if input == Input::Submit {
        return match controller.confirm_submit() {
            Ok(Some(result)) => Ok(Step::Finished(result)),
            Ok(None) => Ok(Step::Quit),
            Err(Error::Unanswered { missing }) => {
                println!("Answer every question before submitting ({} left).", missing);
                Ok(Step::Continue)
            }
            Err(e) => Err(e),
        };
    }

    let session = controller.session_mut().ok_or(Error::NotActive)?;
    match input {
        Input::Select(n) => {
            let option = session.current_question().options.get(n - 1).cloned();
            match option {
                Some(option) => session.select_answer(&option)?,
                None => {
                    println!("No option {}.", n);
                    return Ok(Step::Continue);
                }
            }
        }
        Input::Next => session.next()?,
        Input::Previous => session.previous()?,
        Input::GoTo(k) => {
            if k > session.len() {
                println!("No question {}.", k);
                return Ok(Step::Continue);
            }
            session.go_to(k - 1)?;
        }
        Input::Help => println!("{}", HELP),
        Input::Quit => return Ok(Step::Quit),
        Input::Submit => {}
    }

    print_question(session);
    Ok(Step::Continue)
}

fn print_question(session: &Session) {
    let q = session.current_question();
    let idx = session.current_index();

    println!();
    println!(
        "{}  [{}/{}]  {}% through, {} answered, {} left",
        session.quiz().title,
        idx + 1,
        session.len(),
        session.progress_percent(),
        session.answered_count(),
        timer::format_clock(session.remaining_seconds()),
    );
    println!("{}", q.question_text);

    let selected = session.selected_answer(&q.id);
    for (i, option) in q.options.iter().enumerate() {
        let marker = if selected == Some(option.as_str()) { "*" } else { " " };
        println!("  {} {}) {}", marker, i + 1, option);
    }

    println!("{}", overview(session));
}

/// One cell per question: `>` current, `+` answered, `.` unanswered.
pub fn overview(session: &Session) -> String {
    (0..session.len())
        .filter_map(|i| {
            let mark = match session.question_status(i)? {
                QuestionStatus::Current => '>',
                QuestionStatus::Answered => '+',
                QuestionStatus::Unanswered => '.',
            };
            Some(format!("{}{}", i + 1, mark))
        })
        .collect::<Vec<_>>()
        .join(" ")
}
