use std::sync::Arc;
use tracing::{debug, info};

use crate::model::SessionId;
use crate::rules::{BonusContext, Judgement, Ruleset};
use crate::session::{
    Attempt, Direction, SessionAction, SessionError, SessionEvent, SessionKind, SessionProgress,
    SessionStatus, SessionSummary,
};
use crate::time::TimeLimit;

//
// ─── TRANSITION ────────────────────────────────────────────────────────────────
//

/// A new session value plus the events that produced it.
#[derive(Debug, Clone)]
#[must_use]
pub struct Transition<R: Ruleset> {
    session: Session<R>,
    events: Vec<SessionEvent>,
}

impl<R: Ruleset> Transition<R> {
    fn new(session: Session<R>, events: Vec<SessionEvent>) -> Self {
        Self { session, events }
    }

    fn quiet(session: Session<R>) -> Self {
        Self::new(session, Vec::new())
    }

    pub fn session(&self) -> &Session<R> {
        &self.session
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    pub fn into_session(self) -> Session<R> {
        self.session
    }

    pub fn into_parts(self) -> (Session<R>, Vec<SessionEvent>) {
        (self.session, self.events)
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One timed run over an ordered, immutable content list.
///
/// Transitions never touch `self`; each returns a fresh session inside a
/// [`Transition`]. Content is shared, so the copy is the board, cursor and
/// attempt log.
#[derive(Debug, Clone)]
pub struct Session<R: Ruleset> {
    id: SessionId,
    ruleset: R,
    content: Arc<[R::Item]>,
    limit: TimeLimit,
    status: SessionStatus,
    elapsed: u32,
    cursor: usize,
    board: R::Board,
    attempts: Vec<Attempt<R::Submission>>,
    summary: Option<SessionSummary>,
}

impl<R: Ruleset> Session<R> {
    /// Build an `Idle` session; call [`Session::begin`] to start the clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyContent` if `content` has no items.
    pub fn prepare(
        ruleset: R,
        content: impl Into<Arc<[R::Item]>>,
        limit: TimeLimit,
    ) -> Result<Self, SessionError> {
        let content = content.into();
        if content.is_empty() {
            return Err(SessionError::EmptyContent);
        }
        let board = ruleset.board(&content);
        Ok(Self {
            id: SessionId::new(),
            ruleset,
            content,
            limit,
            status: SessionStatus::Idle,
            elapsed: 0,
            cursor: 0,
            board,
            attempts: Vec::new(),
            summary: None,
        })
    }

    /// Build a session that is already `Running`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyContent` if `content` has no items.
    pub fn start(
        ruleset: R,
        content: impl Into<Arc<[R::Item]>>,
        limit: TimeLimit,
    ) -> Result<Self, SessionError> {
        let mut session = Self::prepare(ruleset, content, limit)?;
        session.status = SessionStatus::Running;
        debug!(
            session_id = %session.id,
            kind = %session.kind(),
            items = session.content.len(),
            "session started"
        );
        Ok(session)
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    /// Idle → Running.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyStarted` for any other status.
    pub fn begin(&self) -> Result<Transition<R>, SessionError> {
        if self.status != SessionStatus::Idle {
            return Err(SessionError::AlreadyStarted {
                status: self.status,
            });
        }
        let mut next = self.clone();
        next.status = SessionStatus::Running;
        debug!(session_id = %next.id, kind = %next.kind(), "session started");
        Ok(Transition::quiet(next))
    }

    /// Count one second. Only a running session moves.
    ///
    /// Clearing the board is handled by `submit`, which finishes the session
    /// on the spot, so a tick only ever has the limit to check.
    pub fn tick(&self) -> Transition<R> {
        let mut next = self.clone();
        if next.status != SessionStatus::Running {
            return Transition::quiet(next);
        }

        let mut events = Vec::new();
        next.elapsed = next.elapsed.saturating_add(1);
        if next.ruleset.on_tick(&mut next.board, next.elapsed) {
            events.push(SessionEvent::MismatchCleared);
        }

        if next.limit.is_reached(next.elapsed) {
            next.finish(SessionStatus::Expired, &mut events);
        }
        Transition::new(next, events)
    }

    /// Hand a submission to the ruleset and log the attempt.
    ///
    /// Misses and word rejections are ordinary outcomes reported as events.
    /// Resolving the last item finishes the session when the ruleset says so.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotRunning` unless the session is running, or
    /// whatever the ruleset refuses (bad index, already resolved, locked board).
    pub fn submit(&self, submission: R::Submission) -> Result<Transition<R>, SessionError> {
        self.ensure_running()?;
        let judgement = self.ruleset.judge(&self.content, &self.board, &submission)?;

        let mut next = self.clone();
        next.ruleset
            .record(&mut next.board, &submission, &judgement, next.elapsed);
        next.attempts.push(Attempt {
            item: judgement.item(),
            submission,
            correct: judgement.is_correct(),
            at: next.elapsed,
        });

        let event = match judgement {
            Judgement::Correct { item } => SessionEvent::Resolved {
                item,
                correct: true,
            },
            Judgement::Incorrect { item, .. } => SessionEvent::Resolved {
                item,
                correct: false,
            },
            Judgement::Rejected(reason) => SessionEvent::Rejected { reason },
        };
        debug!(
            session_id = %next.id,
            attempt = next.attempts.len(),
            correct = judgement.is_correct(),
            "submission recorded"
        );

        let mut events = vec![event];
        if next.ruleset.completes_when_cleared() && next.is_cleared() {
            next.finish(SessionStatus::Complete, &mut events);
        }
        Ok(Transition::new(next, events))
    }

    /// Step the cursor one item, clamped at both ends.
    ///
    /// No-op for rulesets without per-item navigation and for sessions that
    /// are not active. Stepping back is a no-op unless the ruleset backtracks.
    pub fn advance(&self, direction: Direction) -> Transition<R> {
        let mut next = self.clone();
        if !next.can_navigate() {
            return Transition::quiet(next);
        }
        let last = next.content.len().saturating_sub(1);
        next.cursor = match direction {
            Direction::Next => next.cursor.saturating_add(1).min(last),
            Direction::Previous if next.ruleset.backtracks() => {
                next.cursor.saturating_sub(1)
            }
            Direction::Previous => next.cursor,
        };
        Transition::quiet(next)
    }

    /// Jump the cursor to `index`. Jumps backwards only move rulesets that
    /// backtrack.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidIndex` if `index` is out of range.
    pub fn go_to(&self, index: usize) -> Result<Transition<R>, SessionError> {
        if index >= self.content.len() {
            return Err(SessionError::InvalidIndex {
                index,
                len: self.content.len(),
            });
        }
        let mut next = self.clone();
        if next.can_navigate() && (index >= next.cursor || next.ruleset.backtracks()) {
            next.cursor = index;
        }
        Ok(Transition::quiet(next))
    }

    /// Finish now, or return the stored result if the session already finished.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotRunning` for a session that never started.
    pub fn complete(&self) -> Result<Transition<R>, SessionError> {
        if self.summary.is_some() {
            return Ok(Transition::quiet(self.clone()));
        }
        if !self.status.is_active() {
            return Err(SessionError::NotRunning {
                status: self.status,
            });
        }
        let mut next = self.clone();
        let mut events = Vec::new();
        next.finish(SessionStatus::Complete, &mut events);
        Ok(Transition::new(next, events))
    }

    /// Running → Paused.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotRunning` unless the session is running.
    pub fn pause(&self) -> Result<Transition<R>, SessionError> {
        self.ensure_running()?;
        let mut next = self.clone();
        next.status = SessionStatus::Paused;
        debug!(session_id = %next.id, elapsed = next.elapsed, "session paused");
        Ok(Transition::quiet(next))
    }

    /// Paused → Running.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotPaused` unless the session is paused.
    pub fn resume(&self) -> Result<Transition<R>, SessionError> {
        if self.status != SessionStatus::Paused {
            return Err(SessionError::NotPaused {
                status: self.status,
            });
        }
        let mut next = self.clone();
        next.status = SessionStatus::Running;
        debug!(session_id = %next.id, elapsed = next.elapsed, "session resumed");
        Ok(Transition::quiet(next))
    }

    /// Turn a memory mismatch face down before its reveal runs out.
    pub fn dismiss_mismatch(&self) -> Transition<R> {
        let mut next = self.clone();
        if next.status.is_finished() {
            return Transition::quiet(next);
        }
        if next.ruleset.dismiss(&mut next.board) {
            return Transition::new(next, vec![SessionEvent::MismatchCleared]);
        }
        Transition::quiet(next)
    }

    /// Fresh `Idle` session over the same content and limit.
    #[must_use]
    pub fn reset(&self) -> Self {
        let board = self.ruleset.board(&self.content);
        Self {
            id: SessionId::new(),
            ruleset: self.ruleset.clone(),
            content: Arc::clone(&self.content),
            limit: self.limit,
            status: SessionStatus::Idle,
            elapsed: 0,
            cursor: 0,
            board,
            attempts: Vec::new(),
            summary: None,
        }
    }

    /// Fresh `Running` session over the same content, for "try again".
    #[must_use]
    pub fn restart(&self) -> Self {
        let mut session = self.reset();
        session.status = SessionStatus::Running;
        debug!(session_id = %session.id, previous = %self.id, "session restarted");
        session
    }

    /// Fresh `Running` session with the same ruleset over new content.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyContent` if `content` has no items.
    pub fn next_level(&self, content: impl Into<Arc<[R::Item]>>) -> Result<Self, SessionError> {
        self.next_level_with(self.ruleset.clone(), content)
    }

    /// Fresh `Running` session with a new ruleset, e.g. another letter pool.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyContent` if `content` has no items.
    pub fn next_level_with(
        &self,
        ruleset: R,
        content: impl Into<Arc<[R::Item]>>,
    ) -> Result<Self, SessionError> {
        Self::start(ruleset, content, self.limit)
    }

    /// Reducer-style entry point over [`SessionAction`].
    ///
    /// # Errors
    ///
    /// Propagates the error of the transition the action maps to.
    pub fn reduce(&self, action: SessionAction<R::Submission>) -> Result<Transition<R>, SessionError> {
        match action {
            SessionAction::Begin => self.begin(),
            SessionAction::Tick => Ok(self.tick()),
            SessionAction::Submit(submission) => self.submit(submission),
            SessionAction::Advance(direction) => Ok(self.advance(direction)),
            SessionAction::GoTo(index) => self.go_to(index),
            SessionAction::Pause => self.pause(),
            SessionAction::Resume => self.resume(),
            SessionAction::Complete => self.complete(),
            SessionAction::DismissMismatch => Ok(self.dismiss_mismatch()),
        }
    }

    //
    // ─── ACCESSORS ─────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> SessionKind {
        self.ruleset.kind()
    }

    #[must_use]
    pub fn ruleset(&self) -> &R {
        &self.ruleset
    }

    #[must_use]
    pub fn content(&self) -> &[R::Item] {
        &self.content
    }

    #[must_use]
    pub fn item(&self, index: usize) -> Option<&R::Item> {
        self.content.get(index)
    }

    /// Item under the cursor.
    #[must_use]
    pub fn current_item(&self) -> Option<&R::Item> {
        self.content.get(self.cursor)
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn limit(&self) -> TimeLimit {
        self.limit
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Seconds left on the clock, `None` when unbounded.
    #[must_use]
    pub fn remaining(&self) -> Option<u32> {
        self.limit.remaining(self.elapsed)
    }

    #[must_use]
    pub fn board(&self) -> &R::Board {
        &self.board
    }

    #[must_use]
    pub fn attempts(&self) -> &[Attempt<R::Submission>] {
        &self.attempts
    }

    /// Number of submissions so far.
    #[must_use]
    pub fn moves(&self) -> u32 {
        u32::try_from(self.attempts.len()).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    /// Score from the attempt log alone.
    #[must_use]
    pub fn base_score(&self) -> u32 {
        self.ruleset.base_score(&self.content, &self.attempts)
    }

    /// Base score plus the completion bonus once one has been granted.
    #[must_use]
    pub fn score(&self) -> u32 {
        match &self.summary {
            Some(summary) => summary.score(),
            None => self.base_score(),
        }
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.attempts.iter().filter(|a| a.correct).count()
    }

    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.ruleset.resolved_count(&self.board)
    }

    #[must_use]
    pub fn total_count(&self) -> usize {
        self.content.len()
    }

    /// True when no item is left in play.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.resolved_count() >= self.content.len()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let resolved = self.resolved_count().min(self.total_count());
        SessionProgress {
            total: self.total_count(),
            resolved,
            remaining: self.total_count() - resolved,
            is_finished: self.status.is_finished(),
        }
    }

    //
    // ─── INTERNALS ─────────────────────────────────────────────────────────────
    //

    fn ensure_running(&self) -> Result<(), SessionError> {
        if self.status == SessionStatus::Running {
            Ok(())
        } else {
            Err(SessionError::NotRunning {
                status: self.status,
            })
        }
    }

    fn can_navigate(&self) -> bool {
        self.ruleset.navigable() && self.status.is_active()
    }

    /// Freeze the clock, compute the bonus once, and store the summary.
    fn finish(&mut self, status: SessionStatus, events: &mut Vec<SessionEvent>) {
        let ctx = BonusContext {
            elapsed: self.elapsed,
            remaining: self.remaining(),
            moves: self.moves(),
            cleared: self.is_cleared(),
        };
        let bonus = self.ruleset.bonus(&ctx);
        let summary = SessionSummary::new(
            self.id,
            self.kind(),
            status,
            self.base_score(),
            bonus,
            self.correct_count(),
            self.total_count(),
            self.attempts.len(),
            self.elapsed,
        );
        self.status = status;
        self.summary = Some(summary.clone());

        info!(
            session_id = %self.id,
            kind = %summary.kind(),
            status = %status,
            score = summary.score(),
            bonus,
            elapsed = self.elapsed,
            "session finished"
        );
        events.push(match status {
            SessionStatus::Expired => SessionEvent::Expired(summary),
            _ => SessionEvent::Completed(summary),
        });
    }
}
