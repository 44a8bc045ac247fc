use play_core::rules::{Flip, Guess, MemoryMatch, WordBuilder};
use play_core::time::fixed_clock;
use play_core::{Session, SessionAction, SessionError, SessionStatus, TimeLimit};
use services::{
    Announce, ContentSource, InMemoryCatalog, LevelTrack, Notice, PlayConfig, SessionHost,
};

#[tokio::test]
async fn builtin_memory_board_clears_with_bonus() {
    let catalog = InMemoryCatalog::builtin().unwrap();
    let pairs = catalog.card_pairs().await.unwrap();
    let config = PlayConfig::default();
    let session = Session::start(
        MemoryMatch::new(config.memory.rules),
        pairs,
        config.memory.limit,
    )
    .unwrap();
    let mut host = SessionHost::new(session, fixed_clock());

    // in-order layout: prompt at 2i, answer at 2i + 1
    host.submit(Flip::new(0, 5)).unwrap();
    assert_eq!(
        host.submit(Flip::new(2, 3)).unwrap_err(),
        SessionError::BoardLocked
    );
    host.apply(SessionAction::DismissMismatch).unwrap();

    // "5 + 3" and "12 - 4" share the answer 8
    host.submit(Flip::new(0, 2)).unwrap();
    host.submit(Flip::new(1, 3)).unwrap();
    for _ in 0..30 {
        host.tick();
    }
    let mut last = Vec::new();
    for pair in 2..8 {
        last = host.submit(Flip::new(pair * 2, pair * 2 + 1)).unwrap();
    }

    let summary = host.summary().unwrap();
    assert_eq!(summary.status(), SessionStatus::Complete);
    assert_eq!(summary.attempts(), 9);
    assert_eq!(summary.base_score(), 800);
    assert_eq!(summary.bonus(), 1000 - 90 - 30);

    let notice = last
        .iter()
        .rev()
        .find_map(|e| MemoryMatch::announce(host.session(), e))
        .unwrap();
    assert_eq!(notice.title, "Congratulations!");
    assert!(!host.should_tick());
}

#[tokio::test]
async fn word_levels_advance_until_done() {
    let catalog = InMemoryCatalog::builtin().unwrap();
    let config = PlayConfig::default();
    let mut track = LevelTrack::new(
        catalog.word_sets().await.unwrap(),
        config.words.rules,
        config.words.time_limit(),
    )
    .unwrap()
    .starting_at(2)
    .unwrap();

    let mut host = SessionHost::new(track.session().unwrap(), fixed_clock());
    assert_eq!(host.session().remaining(), Some(180));

    let events = host.submit(Guess::from("learn")).unwrap();
    let notice = WordBuilder::announce(host.session(), &events[0]).unwrap();
    assert_eq!(notice.description, "+50 points");
    assert_eq!(
        WordBuilder::refusal(&host.submit(Guess::from("LEARN")).unwrap_err()).title,
        "Already found!"
    );
    assert_eq!(host.session().score(), 50);

    let next = track.next_session(host.session()).unwrap().unwrap();
    host.replace(next);
    assert_eq!(host.session().ruleset().pool().letters(), "KNOWLEDGE");
    assert_eq!(host.session().score(), 0);

    assert!(track.next_session(host.session()).unwrap().is_none());
    assert_eq!(Notice::all_levels_complete().title, "Congratulations!");
}

#[tokio::test]
async fn word_timer_expires_at_limit() {
    let catalog = InMemoryCatalog::builtin().unwrap();
    let track = LevelTrack::new(
        catalog.word_sets().await.unwrap(),
        PlayConfig::default().words.rules,
        TimeLimit::seconds(5),
    )
    .unwrap();
    let mut host = SessionHost::new(track.session().unwrap(), fixed_clock());
    host.submit(Guess::from("audio")).unwrap();

    let mut ticks = 0;
    while host.should_tick() {
        host.tick();
        ticks += 1;
    }
    assert_eq!(ticks, 5);
    let summary = host.summary().unwrap();
    assert_eq!(summary.status(), SessionStatus::Expired);
    assert_eq!(summary.score(), 50);
    assert_eq!(summary.bonus(), 0);
}
