use chrono::{Duration, TimeZone, Utc};

use coursequiz::model::Catalog;
use coursequiz::prompt::{overview, parse_input, Input};
use coursequiz::session::Session;
use coursequiz::submit::{build_report, build_summary};

fn sockets_session() -> Session {
    let content = std::fs::read_to_string("fixtures/catalog.yaml").expect("Cannot read fixture");
    let catalog: Catalog = serde_yaml::from_str(&content).unwrap();
    let t0 = Utc.with_ymd_and_hms(2025, 1, 2, 10, 0, 0).unwrap();
    Session::start_at(
        catalog.quiz("sockets").unwrap(),
        catalog.questions_for_quiz("sockets"),
        t0,
    )
    .unwrap()
}

#[test]
fn test_parse_input() {
    assert_eq!(parse_input("2"), Some(Input::Select(2)));
    assert_eq!(parse_input(" n "), Some(Input::Next));
    assert_eq!(parse_input("prev"), Some(Input::Previous));
    assert_eq!(parse_input("g 3"), Some(Input::GoTo(3)));
    assert_eq!(parse_input("s"), Some(Input::Submit));
    assert_eq!(parse_input("q"), Some(Input::Quit));
    assert_eq!(parse_input("?"), Some(Input::Help));
    assert_eq!(parse_input("0"), None);
    assert_eq!(parse_input("g"), None);
    assert_eq!(parse_input("g 0"), None);
    assert_eq!(parse_input(""), None);
    assert_eq!(parse_input("banana"), None);
}

#[test]
fn test_overview_marks() {
    let mut session = sockets_session();
    session.select_answer("listen").unwrap();
    session.go_to(2).unwrap();
    assert_eq!(overview(&session), "1+ 2. 3>");
}

#[test]
fn test_report_lists_review() {
    let mut session = sockets_session();
    session.select_answer("listen").unwrap();
    session.next().unwrap();
    session.select_answer("True").unwrap();

    let done = session.started_at() + Duration::seconds(125);
    let result = session.submit_at(done).unwrap().unwrap();
    let report = build_report(session.quiz(), &result);

    assert!(report.starts_with("Quiz Complete"));
    assert!(report.contains("Final score: 33% (Need Improvement)"));
    assert!(report.contains("Correct answers: 1/3"));
    assert!(report.contains("Time taken: 2m 5s"));
    assert!(report.contains("✓ 1. Which call marks a socket as passive?"));
    assert!(report.contains("Your answer: True"));
    assert!(report.contains("Correct answer: False"));
    assert!(report.contains("Your answer: No answer"));

    let summary = build_summary(session.quiz(), &result);
    assert_eq!(summary, "Sockets: 33% (1/3 correct, not passed) in 2m 5s");
}
