use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Duration, TimeZone, Utc};

use coursequiz::error::Error;
use coursequiz::model::*;
use coursequiz::persist::{self, YamlStore};
use coursequiz::store::{QuizStore, RECENT_LIMIT};

fn catalog() -> Catalog {
    let content = fs::read_to_string("fixtures/catalog.yaml").expect("Cannot read fixture");
    serde_yaml::from_str(&content).unwrap()
}

fn tmp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("coursequiz_test_{}", name));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn new_attempt(quiz_id: &str, score: u8, minutes: i64) -> NewAttempt {
    NewAttempt {
        user_id: None,
        quiz_id: quiz_id.to_string(),
        score,
        total_questions: 4,
        correct_answers: (score as usize * 4) / 100,
        time_taken_seconds: 90,
        answers: vec![AnswerRecord {
            question_id: "p1".to_string(),
            selected_answer: "fork".to_string(),
            is_correct: true,
            time_spent_seconds: 12,
        }],
        completed_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap() + Duration::minutes(minutes),
    }
}

async fn open(dir: &Path) -> YamlStore {
    YamlStore::open(Path::new("fixtures/catalog.yaml"), dir.join("attempts.yaml"))
        .await
        .unwrap()
}

#[test]
fn test_fixture_catalog_is_valid() {
    catalog().validate().unwrap();
}

#[test]
fn test_catalog_validation_errors() {
    let mut bad = catalog();
    bad.questions[0].correct_answer = "SIGSTOP".to_string();
    assert!(matches!(bad.validate(), Err(Error::InvalidCatalog(_))));

    let mut bad = catalog();
    bad.quizzes[0].course_id = "unknown".to_string();
    assert!(matches!(bad.validate(), Err(Error::InvalidCatalog(_))));

    let mut bad = catalog();
    bad.quizzes[1].passing_score = 101;
    assert!(matches!(bad.validate(), Err(Error::InvalidCatalog(_))));

    let mut bad = catalog();
    let dup = bad.questions[0].clone();
    bad.questions.push(dup);
    assert!(matches!(bad.validate(), Err(Error::InvalidCatalog(_))));

    let mut bad = catalog();
    let tf = bad
        .questions
        .iter_mut()
        .find(|q| q.question_type == QuestionType::TrueFalse)
        .unwrap();
    tf.options.push("Maybe".to_string());
    assert!(matches!(bad.validate(), Err(Error::InvalidCatalog(_))));
}

#[tokio::test]
async fn test_listing_order() {
    let dir = tmp_dir("listing");
    let store = open(&dir).await;

    let courses: Vec<String> = store.list_courses().await.unwrap().into_iter().map(|c| c.title).collect();
    assert_eq!(courses, vec!["Computer Networks", "Systems Programming"]);

    // memory was created before processes
    let quizzes: Vec<String> = store.list_quizzes("systems").await.unwrap().into_iter().map(|q| q.id).collect();
    assert_eq!(quizzes, vec!["memory", "processes"]);

    let questions: Vec<u32> = store
        .list_questions("processes")
        .await
        .unwrap()
        .into_iter()
        .map(|q| q.order_number)
        .collect();
    assert_eq!(questions, vec![1, 2, 3, 4]);

    assert!(store.get_quiz("sockets").await.unwrap().is_some());
    assert!(store.get_quiz("nope").await.unwrap().is_none());
    assert!(store.list_quizzes("nope").await.unwrap().is_empty());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_undated_quizzes_list_last_in_file_order() {
    let mut catalog = catalog();
    let undated = |id: &str| Quiz {
        id: id.to_string(),
        course_id: "systems".to_string(),
        title: id.to_string(),
        description: String::new(),
        duration_minutes: 5,
        passing_score: 50,
        created_at: None,
    };
    catalog.quizzes.insert(0, undated("threads"));
    catalog.quizzes.insert(1, undated("signals"));

    let ids: Vec<String> = catalog.quizzes_for_course("systems").into_iter().map(|q| q.id).collect();
    assert_eq!(ids, vec!["memory", "processes", "threads", "signals"]);
}

#[tokio::test]
async fn test_attempts_survive_reopen() {
    let dir = tmp_dir("reopen");
    {
        let store = open(&dir).await;
        assert_eq!(store.best_score("processes").await.unwrap(), None);

        let saved = store.save_attempt(new_attempt("processes", 50, 0)).await.unwrap();
        assert_eq!(saved.id.len(), 32);
        store.save_attempt(new_attempt("processes", 75, 5)).await.unwrap();
        store.save_attempt(new_attempt("sockets", 100, 10)).await.unwrap();
    }

    assert!(dir.join("attempts.yaml").exists());

    let store = open(&dir).await;
    assert_eq!(store.best_score("processes").await.unwrap(), Some(75));
    assert_eq!(store.best_score("sockets").await.unwrap(), Some(100));
    assert_eq!(store.best_score("memory").await.unwrap(), None);

    let recent = store.recent_attempts(Some("processes")).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].score, 75);
    assert_eq!(recent[0].answers[0].time_spent_seconds, 12);

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_recent_attempts_newest_first_and_limited() {
    let dir = tmp_dir("recent");
    let store = open(&dir).await;

    for i in 0..15 {
        store.save_attempt(new_attempt("sockets", i as u8, i)).await.unwrap();
    }

    let recent = store.recent_attempts(None).await.unwrap();
    assert_eq!(recent.len(), RECENT_LIMIT);
    assert_eq!(recent[0].score, 14);
    assert!(recent.windows(2).all(|w| w[0].completed_at >= w[1].completed_at));

    let ids: std::collections::HashSet<String> = recent.iter().map(|a| a.id.clone()).collect();
    assert_eq!(ids.len(), recent.len());

    let _ = fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_missing_catalog_is_a_storage_error() {
    let err = persist::load_catalog(Path::new("fixtures/does_not_exist.yaml"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Storage(_)));
}
