use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::model::*;

impl Catalog {
    pub fn validate(&self) -> Result<()> {
        let mut course_ids = HashSet::new();
        for c in &self.courses {
            if !course_ids.insert(c.id.as_str()) {
                return Err(invalid(format!("duplicate course id {}", c.id)));
            }
        }

        let mut quiz_ids = HashSet::new();
        for quiz in &self.quizzes {
            if !quiz_ids.insert(quiz.id.as_str()) {
                return Err(invalid(format!("duplicate quiz id {}", quiz.id)));
            }
            if !course_ids.contains(quiz.course_id.as_str()) {
                return Err(invalid(format!(
                    "quiz {} references unknown course {}",
                    quiz.id, quiz.course_id
                )));
            }
            if quiz.passing_score > 100 {
                return Err(invalid(format!(
                    "quiz {} has passing score {} above 100",
                    quiz.id, quiz.passing_score
                )));
            }
        }

        let mut question_ids = HashSet::new();
        for q in &self.questions {
            if !question_ids.insert(q.id.as_str()) {
                return Err(invalid(format!("duplicate question id {}", q.id)));
            }
            if !quiz_ids.contains(q.quiz_id.as_str()) {
                return Err(invalid(format!(
                    "question {} references unknown quiz {}",
                    q.id, q.quiz_id
                )));
            }
            if q.options.is_empty() {
                return Err(invalid(format!("question {} has no options", q.id)));
            }
            if q.question_type == QuestionType::TrueFalse && q.options.len() != 2 {
                return Err(invalid(format!(
                    "true/false question {} must have exactly 2 options",
                    q.id
                )));
            }
            if !q.options.contains(&q.correct_answer) {
                return Err(invalid(format!(
                    "question {}: correct answer {:?} is not one of its options",
                    q.id, q.correct_answer
                )));
            }
        }

        Ok(())
    }

    /// Courses in title order.
    pub fn courses_by_title(&self) -> Vec<Course> {
        let mut courses = self.courses.clone();
        courses.sort_by(|a, b| a.title.cmp(&b.title));
        courses
    }

    /// Quizzes of a course in creation order. Undated quizzes come last, in file order.
    pub fn quizzes_for_course(&self, course_id: &str) -> Vec<Quiz> {
        let mut quizzes: Vec<Quiz> = self
            .quizzes
            .iter()
            .filter(|q| q.course_id == course_id)
            .cloned()
            .collect();
        quizzes.sort_by_key(|q| (q.created_at.is_none(), q.created_at));
        quizzes
    }

    pub fn quiz(&self, quiz_id: &str) -> Option<Quiz> {
        self.quizzes.iter().find(|q| q.id == quiz_id).cloned()
    }

    /// Questions of a quiz in presentation order.
    pub fn questions_for_quiz(&self, quiz_id: &str) -> Vec<Question> {
        let mut questions: Vec<Question> = self
            .questions
            .iter()
            .filter(|q| q.quiz_id == quiz_id)
            .cloned()
            .collect();
        questions.sort_by_key(|q| q.order_number);
        questions
    }
}

fn invalid(msg: String) -> Error {
    Error::InvalidCatalog(msg)
}
