use std::sync::Arc;
use tracing::{debug, info};

use play_core::rules::{Rejection, Ruleset};
use play_core::{
    Clock, Session, SessionAction, SessionError, SessionEvent, SessionStatus, SessionSummary,
};

/// Callback surface for session outcomes.
///
/// Every method has an empty default, so observers implement only what they
/// care about.
pub trait SessionObserver: Send {
    fn on_resolved(&mut self, _item: usize, _correct: bool) {}
    fn on_rejected(&mut self, _reason: Rejection) {}
    fn on_mismatch_cleared(&mut self) {}
    fn on_complete(&mut self, _summary: &SessionSummary) {}
    fn on_expired(&mut self, _summary: &SessionSummary) {}
}

/// Logs every outcome through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SessionObserver for TracingObserver {
    fn on_resolved(&mut self, item: usize, correct: bool) {
        debug!(item, correct, "item resolved");
    }

    fn on_rejected(&mut self, reason: Rejection) {
        debug!(%reason, "submission rejected");
    }

    fn on_complete(&mut self, summary: &SessionSummary) {
        info!(
            session_id = %summary.session_id(),
            score = summary.score(),
            correct = summary.correct_count(),
            total = summary.total_count(),
            "session complete"
        );
    }

    fn on_expired(&mut self, summary: &SessionSummary) {
        info!(
            session_id = %summary.session_id(),
            score = summary.score(),
            "session expired"
        );
    }
}

/// Owns the live session, applies actions to it and forwards the outcomes.
///
/// Summaries are stamped with the host clock before observers see them; the
/// engine itself only counts ticks.
pub struct SessionHost<R: Ruleset> {
    session: Session<R>,
    clock: Clock,
    observers: Vec<Box<dyn SessionObserver>>,
    summary: Option<SessionSummary>,
}

impl<R: Ruleset> SessionHost<R> {
    #[must_use]
    pub fn new(session: Session<R>, clock: Clock) -> Self {
        Self {
            session,
            clock,
            observers: Vec::new(),
            summary: None,
        }
    }

    #[must_use]
    pub fn with_observer(mut self, observer: impl SessionObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn add_observer(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    #[must_use]
    pub fn session(&self) -> &Session<R> {
        &self.session
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Stamped summary of the finished session, if any.
    #[must_use]
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    /// Whether the timer owner should keep ticking.
    #[must_use]
    pub fn should_tick(&self) -> bool {
        self.session.status() == SessionStatus::Running
    }

    /// Apply `action` and notify observers.
    ///
    /// On error the current session is kept unchanged.
    ///
    /// # Errors
    ///
    /// Returns the `SessionError` of the refused transition.
    pub fn apply(
        &mut self,
        action: SessionAction<R::Submission>,
    ) -> Result<Vec<SessionEvent>, SessionError> {
        let (next, events) = self.session.reduce(action)?.into_parts();
        Ok(self.commit(next, events))
    }

    pub fn tick(&mut self) -> Vec<SessionEvent> {
        let (next, events) = self.session.tick().into_parts();
        self.commit(next, events)
    }

    /// # Errors
    ///
    /// See [`Session::submit`].
    pub fn submit(&mut self, submission: R::Submission) -> Result<Vec<SessionEvent>, SessionError> {
        self.apply(SessionAction::Submit(submission))
    }

    /// Swap in a fresh session, e.g. from `restart` or `next_level`.
    pub fn replace(&mut self, session: Session<R>) {
        debug!(
            previous = %self.session.id(),
            session_id = %session.id(),
            "session replaced"
        );
        self.session = session;
        self.summary = None;
    }

    /// Play the same content again.
    pub fn restart(&mut self) {
        let fresh = self.session.restart();
        self.replace(fresh);
    }

    /// Play the same content again under a different ruleset value.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyContent` if `content` is empty.
    pub fn next_level_with(
        &mut self,
        ruleset: R,
        content: impl Into<Arc<[R::Item]>>,
    ) -> Result<(), SessionError> {
        let fresh = self.session.next_level_with(ruleset, content)?;
        self.replace(fresh);
        Ok(())
    }

    fn commit(&mut self, next: Session<R>, events: Vec<SessionEvent>) -> Vec<SessionEvent> {
        self.session = next;
        let events: Vec<SessionEvent> = events.into_iter().map(|e| self.stamp(e)).collect();
        for event in &events {
            self.dispatch(event);
        }
        events
    }

    fn stamp(&mut self, event: SessionEvent) -> SessionEvent {
        match event {
            SessionEvent::Completed(summary) => {
                let summary = summary.stamped(self.clock.now());
                self.summary = Some(summary.clone());
                SessionEvent::Completed(summary)
            }
            SessionEvent::Expired(summary) => {
                let summary = summary.stamped(self.clock.now());
                self.summary = Some(summary.clone());
                SessionEvent::Expired(summary)
            }
            other => other,
        }
    }

    fn dispatch(&mut self, event: &SessionEvent) {
        for observer in &mut self.observers {
            match event {
                SessionEvent::Resolved { item, correct } => observer.on_resolved(*item, *correct),
                SessionEvent::Rejected { reason } => observer.on_rejected(*reason),
                SessionEvent::MismatchCleared => observer.on_mismatch_cleared(),
                SessionEvent::Completed(summary) => observer.on_complete(summary),
                SessionEvent::Expired(summary) => observer.on_expired(summary),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use play_core::model::Question;
    use play_core::rules::{Answer, Quiz};
    use play_core::time::{fixed_clock, fixed_now};
    use play_core::TimeLimit;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        log: Arc<Mutex<Vec<String>>>,
    }

    impl SessionObserver for Recorder {
        fn on_resolved(&mut self, item: usize, correct: bool) {
            self.log.lock().unwrap().push(format!("resolved {item} {correct}"));
        }

        fn on_complete(&mut self, summary: &SessionSummary) {
            self.log
                .lock()
                .unwrap()
                .push(format!("complete {}", summary.score()));
        }

        fn on_expired(&mut self, summary: &SessionSummary) {
            self.log
                .lock()
                .unwrap()
                .push(format!("expired {}", summary.elapsed_seconds()));
        }
    }

    fn quiz(limit: TimeLimit) -> Session<Quiz> {
        let questions = vec![
            Question::new("1 + 1", ["1", "2"], 1, None).unwrap(),
            Question::new("2 + 2", ["4", "5"], 0, None).unwrap(),
        ];
        Session::start(Quiz::default(), questions, limit).unwrap()
    }

    #[test]
    fn observers_see_stamped_completion() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut host = SessionHost::new(quiz(TimeLimit::Unbounded), fixed_clock()).with_observer(
            Recorder {
                log: Arc::clone(&log),
            },
        );

        host.submit(Answer::new(0, 1)).unwrap();
        let events = host.submit(Answer::new(1, 1)).unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["resolved 0 true", "resolved 1 false", "complete 50"]
        );
        let summary = events.last().and_then(SessionEvent::summary).unwrap();
        assert_eq!(summary.completed_at(), Some(fixed_now()));
        assert_eq!(host.summary(), Some(summary));
        assert!(!host.should_tick());
    }

    #[test]
    fn refused_action_keeps_session() {
        let mut host = SessionHost::new(quiz(TimeLimit::Unbounded), fixed_clock());
        host.submit(Answer::new(0, 0)).unwrap();
        let before = host.session().attempts().len();
        let err = host.submit(Answer::new(0, 1)).unwrap_err();
        assert_eq!(err, SessionError::AlreadyResolved { index: 0 });
        assert_eq!(host.session().attempts().len(), before);
    }

    #[test]
    fn expiry_is_reported_once() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut host = SessionHost::new(quiz(TimeLimit::seconds(3)), fixed_clock()).with_observer(
            Recorder {
                log: Arc::clone(&log),
            },
        );
        while host.should_tick() {
            host.tick();
        }
        host.tick();
        assert_eq!(*log.lock().unwrap(), vec!["expired 3"]);
        assert_eq!(host.session().status(), SessionStatus::Expired);
    }

    #[test]
    fn restart_clears_the_stored_summary() {
        let mut host = SessionHost::new(quiz(TimeLimit::Unbounded), fixed_clock());
        host.apply(SessionAction::Complete).unwrap();
        assert!(host.summary().is_some());
        host.restart();
        assert!(host.summary().is_none());
        assert!(host.should_tick());
    }
}
