//! Game state and its synchronous transitions.
//!
//! [`GameSession`] is the single source of truth for what the presentation layer renders. It
//! never performs I/O; [`TriviaGame`](super::TriviaGame) feeds it server replies, timer ticks and
//! player actions one at a time.

use crate::dto::{
    common::{Category, Difficulty},
    question::Question,
};

use super::error::GameError;

/// Screen currently displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    /// Difficulty and category selection.
    #[default]
    Welcome,
    /// A game is in progress.
    Question,
    /// Final score.
    Finished,
}

/// Parameters chosen on the welcome screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    /// Difficulty requested from the server.
    pub difficulty: Difficulty,
    /// Category requested from the server.
    pub category: Category,
    /// Number of questions requested.
    pub total_questions: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            category: Category::Cats,
            total_questions: 10,
        }
    }
}

/// Result of asking for the next question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Not in the question screen; nothing changed.
    Ignored,
    /// The last question was passed and the game finished.
    Finished,
    /// The index moved to this question, which is now loading.
    Next(usize),
}

/// Result of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No question is waiting for an answer.
    Ignored,
    /// Time left after the tick.
    Remaining(u32),
    /// Time ran out; the question counts as answered incorrectly.
    Expired,
}

/// One playthrough, from the welcome screen to the final score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    /// Screen on display.
    pub screen: Screen,
    /// Questions fetched for the session, in play order.
    pub questions: Vec<Question>,
    /// Question on display; `None` while loading.
    pub current_question: Option<Question>,
    /// Zero-based position of the current question.
    pub current_index: usize,
    /// Length of the game; shrinks when the server returns fewer questions than requested.
    pub total_questions: usize,
    /// Correct answers so far.
    pub score: u32,
    /// Difficulty of the game.
    pub difficulty: Difficulty,
    /// Category of the game.
    pub category: Category,
    /// Server session backing the game.
    pub session_id: Option<String>,
    /// Whether the current question was answered (or timed out).
    pub has_answered: bool,
    /// Only set once the player answered the current question.
    pub selected_answer: Option<usize>,
    /// Whether the recorded answer was right; `false` after a time-out.
    pub is_correct: bool,
    /// Countdown units left for the current question.
    pub timer_remaining: u32,
    /// Whether questions are timed.
    pub timer_enabled: bool,
    /// A server call or a question transition is in flight.
    pub is_loading: bool,
    settings: GameSettings,
    timer_duration: u32,
}

impl GameSession {
    /// Fresh session sitting on the welcome screen.
    pub fn new(settings: GameSettings, timer_enabled: bool, timer_duration: u32) -> Self {
        Self {
            screen: Screen::Welcome,
            questions: Vec::new(),
            current_question: None,
            current_index: 0,
            total_questions: settings.total_questions,
            score: 0,
            difficulty: settings.difficulty,
            category: settings.category,
            session_id: None,
            has_answered: false,
            selected_answer: None,
            is_correct: false,
            timer_remaining: timer_duration,
            timer_enabled,
            is_loading: false,
            settings,
            timer_duration,
        }
    }

    /// Settings the session was created with, as requested, so a restart asks for the same game.
    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    /// Full countdown length, in ticks.
    pub fn timer_duration(&self) -> u32 {
        self.timer_duration
    }

    /// Same settings, back on the welcome screen.
    pub fn reset(&self) -> Self {
        Self::new(self.settings(), self.timer_enabled, self.timer_duration)
    }

    /// Enter the question screen for a freshly opened server session.
    pub fn begin(&mut self, session_id: String) {
        self.screen = Screen::Question;
        self.session_id = Some(session_id);
        self.questions.clear();
        self.current_question = None;
        self.current_index = 0;
        self.score = 0;
        self.clear_answer();
        self.timer_remaining = self.timer_duration;
        self.is_loading = true;
    }

    /// Take ownership of the fetched question set and display the current question.
    ///
    /// An empty set leaves the session untouched. A set shorter than requested shortens the game.
    /// Returns `false` when a question was already on display: it stays as is, answer included.
    pub fn install_questions(&mut self, questions: Vec<Question>) -> Result<bool, GameError> {
        if questions.is_empty() {
            return Err(GameError::QuestionLoadError(
                "the session has no questions".into(),
            ));
        }

        if questions.len() < self.total_questions {
            self.total_questions = questions.len();
        }
        self.questions = questions;
        self.show_current()
    }

    /// Display the question at `current_index` from the fetched set.
    ///
    /// Returns `false` without touching anything when a question is already on display.
    pub fn show_current(&mut self) -> Result<bool, GameError> {
        if self.current_question.is_some() {
            return Ok(false);
        }

        let Some(question) = self.questions.get(self.current_index) else {
            return Err(GameError::QuestionLoadError(format!(
                "question {} is out of range ({} loaded)",
                self.current_index + 1,
                self.questions.len()
            )));
        };

        self.current_question = Some(question.clone());
        self.timer_remaining = self.timer_duration;
        self.is_loading = false;
        Ok(true)
    }

    /// Record the player's answer. Returns whether it was right, or `None` when the answer was
    /// not accepted (nothing on display, or already answered).
    pub fn answer(&mut self, option_index: usize) -> Option<bool> {
        if self.screen != Screen::Question || self.has_answered {
            return None;
        }
        let correct = self.current_question.as_ref()?.is_correct(option_index);

        self.has_answered = true;
        self.selected_answer = Some(option_index);
        self.is_correct = correct;
        if correct {
            self.score += 1;
        }
        Some(correct)
    }

    /// Consume one unit of countdown.
    pub fn tick(&mut self) -> TickOutcome {
        if self.screen != Screen::Question || self.has_answered || self.current_question.is_none() {
            return TickOutcome::Ignored;
        }

        self.timer_remaining = self.timer_remaining.saturating_sub(1);
        if self.timer_remaining > 0 {
            return TickOutcome::Remaining(self.timer_remaining);
        }

        self.has_answered = true;
        self.is_correct = false;
        TickOutcome::Expired
    }

    /// Move past the current question, finishing the game after the last one.
    pub fn advance(&mut self) -> Advance {
        if self.screen != Screen::Question {
            return Advance::Ignored;
        }

        if self.current_index + 1 >= self.total_questions {
            self.finish();
            return Advance::Finished;
        }

        self.current_index += 1;
        self.current_question = None;
        self.clear_answer();
        self.is_loading = true;
        Advance::Next(self.current_index)
    }

    /// Jump to the final screen.
    pub fn finish(&mut self) {
        self.screen = Screen::Finished;
        self.is_loading = false;
    }

    fn clear_answer(&mut self) {
        self.has_answered = false;
        self.selected_answer = None;
        self.is_correct = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: i64, correct: usize) -> Question {
        Question {
            id,
            text: format!("Question {id}"),
            options: ["a", "b", "c", "d"].map(String::from),
            correct_option_index: correct,
            explanation: String::new(),
            category: "cats".into(),
            difficulty: "easy".into(),
            image: None,
        }
    }

    fn playing(total: usize, questions: Vec<Question>) -> GameSession {
        let mut session = GameSession::new(
            GameSettings {
                total_questions: total,
                ..GameSettings::default()
            },
            true,
            30,
        );
        session.begin("s-1".into());
        session.install_questions(questions).unwrap();
        session
    }

    #[test]
    fn begin_resets_progress() {
        let mut session = playing(2, vec![question(1, 0), question(2, 0)]);
        session.answer(0);
        assert_eq!(session.score, 1);

        session.begin("s-2".into());
        assert_eq!(session.screen, Screen::Question);
        assert_eq!(session.score, 0);
        assert_eq!(session.current_index, 0);
        assert!(session.current_question.is_none());
        assert!(!session.has_answered);
        assert_eq!(session.session_id.as_deref(), Some("s-2"));
    }

    #[test]
    fn correct_answer_scores_once() {
        let mut session = playing(1, vec![question(1, 2)]);
        assert_eq!(session.answer(2), Some(true));
        assert_eq!(session.score, 1);
        assert!(session.is_correct);
        assert_eq!(session.selected_answer, Some(2));

        let before = session.clone();
        assert_eq!(session.answer(2), None);
        assert_eq!(session, before);
    }

    #[test]
    fn wrong_answer_keeps_score() {
        let mut session = playing(1, vec![question(1, 2)]);
        for wrong in [0, 1, 3, 7] {
            let mut attempt = session.clone();
            assert_eq!(attempt.answer(wrong), Some(false));
            assert_eq!(attempt.score, 0);
            assert!(!attempt.is_correct);
            assert!(attempt.has_answered);
        }
        assert_eq!(session.answer(2), Some(true));
    }

    #[test]
    fn answer_without_question_is_ignored() {
        let mut session = GameSession::new(GameSettings::default(), false, 30);
        assert_eq!(session.answer(0), None);
        session.begin("s".into());
        assert_eq!(session.answer(0), None);
        assert!(session.selected_answer.is_none());
    }

    #[test]
    fn two_question_walkthrough() {
        let mut session = playing(2, vec![question(1, 1), question(2, 3)]);
        assert_eq!(session.answer(1), Some(true));
        assert_eq!(session.advance(), Advance::Next(1));
        assert!(session.is_loading);
        assert!(session.selected_answer.is_none());
        assert_eq!(session.answer(3), None, "nothing on display while loading");

        session.show_current().unwrap();
        assert_eq!(session.answer(0), Some(false));
        assert_eq!(session.score, 1);
        assert_eq!(session.advance(), Advance::Finished);
        assert_eq!(session.screen, Screen::Finished);
        assert_eq!(session.score, 1);
    }

    #[test]
    fn advance_with_no_questions_finishes() {
        let mut session = GameSession::new(
            GameSettings {
                total_questions: 0,
                ..GameSettings::default()
            },
            false,
            30,
        );
        assert_eq!(session.advance(), Advance::Ignored);
        session.begin("s".into());
        assert_eq!(session.advance(), Advance::Finished);
        assert_eq!(session.current_index, 0);
    }

    #[test]
    fn empty_question_set_leaves_state_untouched() {
        let mut session = GameSession::new(GameSettings::default(), true, 30);
        session.begin("s".into());
        let before = session.clone();
        assert!(matches!(
            session.install_questions(Vec::new()),
            Err(GameError::QuestionLoadError(_))
        ));
        assert_eq!(session, before);
    }

    #[test]
    fn short_question_set_shortens_game() {
        let session = playing(10, vec![question(1, 0), question(2, 0)]);
        assert_eq!(session.total_questions, 2);
        assert_eq!(session.current_question.as_ref().map(|q| q.id), Some(1));
        assert_eq!(session.settings().total_questions, 10);
        assert_eq!(session.reset().total_questions, 10);
    }

    #[test]
    fn reinstalling_keeps_the_answered_question() {
        let mut session = playing(1, vec![question(1, 0)]);
        assert_eq!(session.answer(0), Some(true));
        let before = session.clone();

        assert_eq!(session.install_questions(vec![question(1, 0)]), Ok(false));
        assert_eq!(session, before);
        assert_eq!(session.answer(0), None);
        assert_eq!(session.score, 1);
    }

    #[test]
    fn showing_twice_keeps_the_answer() {
        let mut session = playing(2, vec![question(1, 0), question(2, 1)]);
        session.advance();
        assert_eq!(session.show_current(), Ok(true));
        assert_eq!(session.answer(1), Some(true));

        assert_eq!(session.show_current(), Ok(false));
        assert!(session.has_answered);
        assert_eq!(session.selected_answer, Some(1));
        assert_eq!(session.score, 1);
    }

    #[test]
    fn out_of_range_index_is_reported() {
        let mut session = playing(1, vec![question(1, 0)]);
        session.current_index = 4;
        session.current_question = None;
        let before = session.clone();
        assert!(session.show_current().is_err());
        assert_eq!(session, before);
    }

    #[test]
    fn countdown_expires_as_wrong_answer() {
        let mut session = playing(1, vec![question(1, 0)]);
        session.timer_remaining = 2;
        assert_eq!(session.tick(), TickOutcome::Remaining(1));
        assert_eq!(session.tick(), TickOutcome::Expired);
        assert!(session.has_answered);
        assert!(!session.is_correct);
        assert!(session.selected_answer.is_none());
        assert_eq!(session.tick(), TickOutcome::Ignored);
        assert_eq!(session.answer(0), None);
    }
}
