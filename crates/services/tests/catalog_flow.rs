use std::io::Write;
use std::sync::Arc;

use play_core::rules::{Answer, Quiz};
use play_core::time::fixed_clock;
use play_core::{Session, SessionEvent, SessionStatus};
use services::{
    Announce, ContentSource, ContentSourceError, InMemoryCatalog, JsonCatalog, SessionHost,
    TracingObserver,
};

const QUIZ_JSON: &str = r#"{
    "title": "Physics Fundamentals",
    "subject": "Physics",
    "difficulty": "Medium",
    "duration_minutes": 1,
    "questions": [
        { "prompt": "Unit of force?", "options": ["Joule", "Newton", "Watt"], "correct": 1 },
        { "prompt": "Speed of light (km/s)?", "options": ["300000", "150000"], "correct": 0 },
        { "prompt": "g on Earth (m/s²)?", "options": ["9.8", "3.7"], "correct": 0 },
        { "prompt": "Unit of power?", "options": ["Volt", "Watt"], "correct": 1,
          "explanation": "A watt is one joule per second." }
    ]
}"#;

fn quiz_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn json_quiz_plays_to_seventy_five_percent() {
    let file = quiz_file(QUIZ_JSON);
    let builtin = Arc::new(InMemoryCatalog::builtin().unwrap());
    let catalog = JsonCatalog::new(file.path(), builtin);

    let pack = catalog.quiz().await.unwrap();
    assert_eq!(pack.meta().title(), "Physics Fundamentals");
    let limit = pack.meta().time_limit();
    let session = Session::start(Quiz::default(), pack.into_questions(), limit).unwrap();
    let mut host = SessionHost::new(session, fixed_clock()).with_observer(TracingObserver);

    for _ in 0..20 {
        host.tick();
    }
    host.submit(Answer::new(0, 1)).unwrap();
    host.submit(Answer::new(1, 0)).unwrap();
    host.submit(Answer::new(2, 1)).unwrap();
    let events = host.submit(Answer::new(3, 1)).unwrap();

    let summary = host.summary().unwrap();
    assert_eq!(summary.status(), SessionStatus::Complete);
    assert_eq!(summary.correct_count(), 3);
    assert_eq!(summary.score(), 75);
    assert_eq!(summary.elapsed_seconds(), 20);

    let finished = events
        .iter()
        .find(|e| matches!(e, SessionEvent::Completed(_)))
        .unwrap();
    let notice = Quiz::announce(host.session(), finished).unwrap();
    assert_eq!(notice.description, "You scored 75% (3/4)");
}

#[tokio::test]
async fn json_catalog_falls_back_for_games() {
    let file = quiz_file(QUIZ_JSON);
    let builtin = Arc::new(InMemoryCatalog::builtin().unwrap());
    let catalog = JsonCatalog::new(file.path(), builtin);

    assert_eq!(catalog.card_pairs().await.unwrap().len(), 8);
    let sets = catalog.word_sets().await.unwrap();
    assert_eq!(sets[1].pool().letters(), "LEARNING");
}

#[tokio::test]
async fn broken_quiz_files_are_reported() {
    let builtin: Arc<dyn ContentSource> = Arc::new(InMemoryCatalog::builtin().unwrap());

    let missing = JsonCatalog::new("/definitely/not/here.json", Arc::clone(&builtin));
    assert!(matches!(
        missing.quiz().await,
        Err(ContentSourceError::Io { .. })
    ));

    let garbled = quiz_file("{ not json");
    let catalog = JsonCatalog::new(garbled.path(), Arc::clone(&builtin));
    assert!(matches!(
        catalog.quiz().await,
        Err(ContentSourceError::Json { .. })
    ));

    let one_option = quiz_file(
        r#"{ "title": "Q", "duration_minutes": 1,
             "questions": [{ "prompt": "?", "options": ["only"], "correct": 0 }] }"#,
    );
    let catalog = JsonCatalog::new(one_option.path(), builtin);
    assert!(matches!(
        catalog.quiz().await,
        Err(ContentSourceError::Content(_))
    ));
}

#[tokio::test]
async fn empty_catalog_reports_missing_content() {
    let catalog = InMemoryCatalog::new(None, Vec::new(), Vec::new());
    assert!(matches!(
        catalog.quiz().await,
        Err(ContentSourceError::Empty { kind: "quiz" })
    ));
    assert!(catalog.card_pairs().await.is_err());
    assert!(catalog.word_sets().await.is_err());
}
