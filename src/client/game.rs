//! Async controller around [`GameSession`].
//!
//! [`TriviaGame`] performs the network calls, owns the per-question [`Countdown`] and the
//! delayed question load, and reports side effects (correct answers, time-outs, errors) on a
//! notification channel the presentation layer listens to. All mutations go through
//! `&mut self`, so player actions, server replies and scheduled inputs never interleave.

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
    time::sleep,
};
use tracing::{debug, info, warn};

use crate::{
    config::AppConfig,
    dto::{question::QuestionPayload, session::StartSessionRequest},
};

use super::{
    api::SessionApi,
    error::GameError,
    session::{Advance, GameSession, GameSettings, Screen, TickOutcome},
    timer::Countdown,
};

/// Timing knobs of the game flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Whether questions are timed at all.
    pub timer_enabled: bool,
    /// Countdown length, in ticks.
    pub timer_seconds: u32,
    /// Interval between two ticks.
    pub tick_period: Duration,
    /// Pause before the next question is displayed.
    pub transition_delay: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for GameConfig {
    fn from(value: &AppConfig) -> Self {
        Self {
            timer_enabled: value.timer_enabled,
            timer_seconds: value.timer_seconds,
            tick_period: Duration::from_secs(1),
            transition_delay: value.transition_delay,
        }
    }
}

/// Scheduled input delivered back to the game through [`TriviaGame::process_next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    /// One countdown unit elapsed for the countdown `timer`.
    Tick {
        /// Identifier of the countdown that ticked.
        timer: u64,
    },
    /// The transition delay before question `index` of game `round` elapsed.
    ShowQuestion {
        /// Game the delay was scheduled for.
        round: u64,
        /// Question to display.
        index: usize,
    },
}

/// Side effects for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameNotification {
    /// The player picked the right option (celebration time).
    CorrectAnswer {
        /// Question that was answered.
        question_id: i64,
    },
    /// The countdown ran out before the player answered.
    TimeUp {
        /// Question that timed out.
        question_id: i64,
    },
    /// An operation failed; the game state is still consistent.
    Error(GameError),
}

/// Single-player game flow: welcome, questions, final score.
pub struct TriviaGame {
    api: Arc<dyn SessionApi>,
    config: GameConfig,
    session: GameSession,
    /// Server session not closed yet.
    open_session: Option<String>,
    /// Game counter; bumped whenever the current game is replaced or abandoned.
    round: u64,
    timer: Option<Countdown>,
    next_timer_id: u64,
    pending_advance: Option<JoinHandle<()>>,
    inputs_tx: UnboundedSender<GameInput>,
    inputs_rx: UnboundedReceiver<GameInput>,
    notifications: UnboundedSender<GameNotification>,
}

impl TriviaGame {
    /// Create a game on the welcome screen, returning the notification stream alongside it.
    pub fn new(
        api: Arc<dyn SessionApi>,
        config: GameConfig,
        settings: GameSettings,
    ) -> (Self, UnboundedReceiver<GameNotification>) {
        let (inputs_tx, inputs_rx) = mpsc::unbounded_channel();
        let (notifications, notifications_rx) = mpsc::unbounded_channel();
        let game = Self {
            api,
            config,
            session: GameSession::new(settings, config.timer_enabled, config.timer_seconds),
            open_session: None,
            round: 0,
            timer: None,
            next_timer_id: 0,
            pending_advance: None,
            inputs_tx,
            inputs_rx,
            notifications,
        };
        (game, notifications_rx)
    }

    /// Current state, for rendering.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Whether a countdown is live.
    pub fn timer_active(&self) -> bool {
        self.timer.is_some()
    }

    /// Open a server session and enter the question screen.
    ///
    /// On failure the current screen is kept and only the loading flag is cleared.
    pub async fn start_game(&mut self, settings: GameSettings) -> Result<(), GameError> {
        let request = StartSessionRequest {
            difficulty: settings.difficulty,
            category: settings.category,
            question_count: u32::try_from(settings.total_questions).unwrap_or(u32::MAX),
        };

        self.session.is_loading = true;
        let reply = match self.api.start_session(request).await {
            Ok(reply) => reply,
            Err(err) => {
                self.session.is_loading = false;
                return Err(self.report(GameError::SessionStartFailed(err.to_string())));
            }
        };

        if let Some(message) = reply.error {
            self.session.is_loading = false;
            return Err(self.report(GameError::SessionStartFailed(message)));
        }

        let Some(session_id) = reply.session_id.filter(|id| !id.trim().is_empty()) else {
            self.session.is_loading = false;
            return Err(self.report(GameError::InvalidServerResponse(
                "start-session reply carries no session id".into(),
            )));
        };

        self.abandon_round();
        let previous = self
            .open_session
            .replace(session_id.clone())
            .filter(|previous| *previous != session_id);
        info!(
            %session_id,
            difficulty = %settings.difficulty,
            category = %settings.category,
            total = settings.total_questions,
            "game started"
        );
        self.session = GameSession::new(
            settings,
            self.config.timer_enabled,
            self.config.timer_seconds,
        );
        self.session.begin(session_id);

        // The replaced game never reached stop-session.
        if let Some(previous) = previous {
            if let Err(err) = self.api.stop_session(&previous).await {
                warn!(session_id = %previous, error = %err, "failed to close replaced session");
            }
        }
        Ok(())
    }

    /// Fetch the session's questions and display the current one.
    ///
    /// Missing, empty or out-of-range question data leaves the state untouched.
    pub async fn load_questions(&mut self) -> Result<(), GameError> {
        let Some(session_id) = self
            .session
            .session_id
            .clone()
            .filter(|_| self.session.screen == Screen::Question)
        else {
            return Err(self.report(GameError::QuestionLoadError(
                "no game in progress".into(),
            )));
        };

        let reply = match self.api.fetch_questions(&session_id).await {
            Ok(reply) => reply,
            Err(err) => return Err(self.report(GameError::QuestionLoadError(err.to_string()))),
        };

        let questions = reply
            .questions
            .unwrap_or_default()
            .into_iter()
            .map(QuestionPayload::normalize)
            .collect::<Vec<_>>();
        let count = questions.len();

        match self.session.install_questions(questions) {
            Ok(true) => {
                debug!(%session_id, count, "questions loaded");
                // Shown early, during the transition delay.
                self.cancel_pending_advance();
                self.start_timer();
            }
            Ok(false) => debug!(%session_id, count, "questions refreshed, current one kept"),
            Err(err) => return Err(self.report(err)),
        }
        Ok(())
    }

    /// Answer the question on display. Returns whether the answer was right, or `None` when it
    /// was not accepted.
    pub fn select_answer(&mut self, option_index: usize) -> Option<bool> {
        let correct = self.session.answer(option_index)?;
        self.clear_timer();

        if correct {
            if let Some(question) = &self.session.current_question {
                self.notify(GameNotification::CorrectAnswer {
                    question_id: question.id,
                });
            }
        }
        Some(correct)
    }

    /// Move to the next question after the transition delay, or finish after the last one.
    pub fn next_question(&mut self) -> Advance {
        let advance = self.session.advance();
        match advance {
            Advance::Ignored => {}
            Advance::Finished => {
                self.clear_timer();
                self.cancel_pending_advance();
                info!(score = self.session.score, "game finished");
            }
            Advance::Next(index) => {
                self.clear_timer();
                self.schedule_question(index);
            }
        }
        advance
    }

    /// Close the server session and finish the game.
    ///
    /// The game always reaches the finished screen; a failed server call is still reported.
    pub async fn stop_game(&mut self) -> Result<(), GameError> {
        self.clear_timer();
        self.cancel_pending_advance();
        self.open_session = None;

        let outcome = match self.session.session_id.clone() {
            Some(session_id) => self
                .api
                .stop_session(&session_id)
                .await
                .map_err(|err| GameError::SessionStopFailed(err.to_string())),
            None => Ok(()),
        };

        self.session.finish();
        info!(score = self.session.score, "game stopped");
        outcome.map_err(|err| self.report(err))
    }

    /// Start a new game with the settings the current one was requested with.
    pub async fn restart_game(&mut self) -> Result<(), GameError> {
        let settings = self.session.settings();
        self.start_game(settings).await
    }

    /// Drop the current game and return to the welcome screen.
    ///
    /// A server session still open is closed in the background.
    pub fn go_to_welcome(&mut self) {
        self.abandon_round();
        self.session = self.session.reset();
        if let Some(session_id) = self.open_session.take() {
            let closing = self.api.stop_session(&session_id);
            tokio::spawn(async move {
                if let Err(err) = closing.await {
                    warn!(%session_id, error = %err, "failed to close abandoned session");
                }
            });
        }
    }

    /// Cancel the countdown, if any.
    pub fn clear_timer(&mut self) {
        if let Some(countdown) = self.timer.take() {
            countdown.cancel();
        }
    }

    /// Wait for the next scheduled input and apply it, returning what was applied.
    ///
    /// Cancel-safe: it can be raced against player input in `tokio::select!`.
    pub async fn process_next(&mut self) -> Option<GameInput> {
        let input = self.inputs_rx.recv().await?;
        self.apply(input);
        Some(input)
    }

    fn apply(&mut self, input: GameInput) {
        match input {
            GameInput::Tick { timer } => self.on_tick(timer),
            GameInput::ShowQuestion { round, index } => self.on_show_question(round, index),
        }
    }

    fn on_tick(&mut self, timer: u64) {
        if self.timer.as_ref().map(Countdown::id) != Some(timer) {
            debug!(timer, "ignoring tick from a cancelled countdown");
            return;
        }

        match self.session.tick() {
            TickOutcome::Remaining(_) => {}
            TickOutcome::Expired => {
                self.clear_timer();
                if let Some(question) = &self.session.current_question {
                    info!(question_id = question.id, "time is up");
                    self.notify(GameNotification::TimeUp {
                        question_id: question.id,
                    });
                }
            }
            TickOutcome::Ignored => self.clear_timer(),
        }
    }

    fn on_show_question(&mut self, round: u64, index: usize) {
        self.pending_advance = None;
        if round != self.round
            || self.session.screen != Screen::Question
            || self.session.current_index != index
            || self.session.current_question.is_some()
        {
            debug!(round, index, "discarding stale question load");
            return;
        }

        match self.session.show_current() {
            Ok(true) => self.start_timer(),
            Ok(false) => {}
            Err(err) => {
                self.report(err);
            }
        }
    }

    fn start_timer(&mut self) {
        self.clear_timer();
        if !self.session.timer_enabled {
            return;
        }

        self.next_timer_id += 1;
        self.session.timer_remaining = self.session.timer_duration();
        self.timer = Some(Countdown::start(
            self.next_timer_id,
            self.config.tick_period,
            self.inputs_tx.clone(),
        ));
    }

    fn schedule_question(&mut self, index: usize) {
        self.cancel_pending_advance();
        let inputs = self.inputs_tx.clone();
        let round = self.round;
        let delay = self.config.transition_delay;
        self.pending_advance = Some(tokio::spawn(async move {
            sleep(delay).await;
            let _ = inputs.send(GameInput::ShowQuestion { round, index });
        }));
    }

    fn cancel_pending_advance(&mut self) {
        if let Some(task) = self.pending_advance.take() {
            task.abort();
        }
    }

    /// Stop everything scheduled for the current game.
    fn abandon_round(&mut self) {
        self.clear_timer();
        self.cancel_pending_advance();
        self.round += 1;
    }

    fn report(&self, err: GameError) -> GameError {
        warn!(error = %err, screen = ?self.session.screen, "game operation failed");
        self.notify(GameNotification::Error(err.clone()));
        err
    }

    fn notify(&self, notification: GameNotification) {
        // The presentation layer may have gone away; the game keeps working without it.
        let _ = self.notifications.send(notification);
    }
}

impl Drop for TriviaGame {
    fn drop(&mut self) {
        self.cancel_pending_advance();
    }
}
