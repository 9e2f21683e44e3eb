use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::model::*;
use crate::score::{Performance, Score};
use crate::timer;

pub fn build_result(quiz: &Quiz, questions: &[Question], score: &Score, elapsed: u64) -> QuizResult {
    let details = questions
        .iter()
        .zip(&score.details)
        .map(|(q, scored)| QuestionDetail {
            question: q.question_text.clone(),
            selected_answer: scored.selected.clone(),
            correct_answer: q.correct_answer.clone(),
            is_correct: scored.is_correct,
        })
        .collect();

    QuizResult {
        score: score.score,
        total_questions: questions.len(),
        correct_answers: score.correct_answers,
        time_taken_seconds: elapsed,
        passed: score.score >= quiz.passing_score,
        details,
    }
}

/// Reshape a result for storage: answers keep the question id, not its text.
pub fn build_attempt(
    quiz: &Quiz,
    score: &Score,
    result: &QuizResult,
    time_spent: &HashMap<String, u64>,
    user_id: Option<String>,
    completed_at: DateTime<Utc>,
) -> NewAttempt {
    let answers = score
        .details
        .iter()
        .map(|d| AnswerRecord {
            question_id: d.question_id.clone(),
            selected_answer: d.selected.clone().unwrap_or_default(),
            is_correct: d.is_correct,
            time_spent_seconds: time_spent.get(&d.question_id).copied().unwrap_or(0),
        })
        .collect();

    NewAttempt {
        user_id,
        quiz_id: quiz.id.clone(),
        score: result.score,
        total_questions: result.total_questions,
        correct_answers: result.correct_answers,
        time_taken_seconds: result.time_taken_seconds,
        answers,
        completed_at,
    }
}

pub fn build_summary(quiz: &Quiz, result: &QuizResult) -> String {
    format!(
        "{}: {}% ({}/{} correct, {}) in {}",
        quiz.title,
        result.score,
        result.correct_answers,
        result.total_questions,
        if result.passed { "passed" } else { "not passed" },
        timer::format_elapsed(result.time_taken_seconds),
    )
}

/// Plain-text results page with the per-question review.
pub fn build_report(quiz: &Quiz, result: &QuizResult) -> String {
    let mut out = String::new();

    if result.passed {
        out.push_str("Congratulations! You passed the quiz!\n");
    } else {
        out.push_str("Quiz Complete. Keep practicing to improve your score!\n");
    }
    out.push('\n');
    out.push_str(&format!("Quiz: {}\n", quiz.title));
    out.push_str(&format!(
        "Final score: {}% ({})\n",
        result.score,
        Performance::from_score(result.score).label()
    ));
    out.push_str(&format!(
        "Correct answers: {}/{}\n",
        result.correct_answers, result.total_questions
    ));
    out.push_str(&format!(
        "Time taken: {}\n",
        timer::format_elapsed(result.time_taken_seconds)
    ));
    out.push_str(&format!("Passing score: {}%\n", quiz.passing_score));

    out.push_str("\nQuestion review:\n");
    for (i, d) in result.details.iter().enumerate() {
        let mark = if d.is_correct { "✓" } else { "✗" };
        out.push_str(&format!("  {} {}. {}\n", mark, i + 1, d.question));
        out.push_str(&format!("      Your answer: {}\n", d.display_answer()));
        if !d.is_correct {
            out.push_str(&format!("      Correct answer: {}\n", d.correct_answer));
        }
    }

    out
}
