//! Keyword input: turning spoken or typed text into scoring actions.

use crate::scoring::{MatchEngine, PointOutcome, Side};
use tracing::{debug, instrument};

/// What a recognized utterance asks the scorer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum ScoringAction {
    /// Point to side one ("me").
    #[strum(to_string = "Point Player 1")]
    Player1Point,
    /// Point to side two ("opponent").
    #[strum(to_string = "Point Player 2")]
    Player2Point,
    /// Revert the most recent point.
    #[strum(to_string = "Undo")]
    Undo,
}

impl ScoringAction {
    /// Side that wins the point, if this is a point action.
    pub fn side(self) -> Option<Side> {
        match self {
            Self::Player1Point => Some(Side::One),
            Self::Player2Point => Some(Side::Two),
            Self::Undo => None,
        }
    }

    /// Applies the action to `engine`.
    ///
    /// Returns the point outcome, or `None` for an undo.
    #[instrument(skip(engine))]
    pub fn apply(self, engine: &mut MatchEngine) -> Option<PointOutcome> {
        match self.side() {
            Some(side) => Some(engine.score_point(side)),
            None => {
                engine.undo();
                None
            }
        }
    }
}

#[derive(Debug, Clone)]
struct Keyword {
    text: String,
    action: ScoringAction,
    /// Whether the keyword must stand alone as a word (alphabetic scripts).
    whole_word: bool,
}

/// Longest-match-first keyword classifier.
///
/// Keywords are tried from longest to shortest, so a longer phrase that
/// contains a shorter keyword wins over it. Matching is case-insensitive.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keywords: Vec<Keyword>,
}

impl KeywordMatcher {
    /// Creates an empty matcher.
    pub fn empty() -> Self {
        Self {
            keywords: Vec::new(),
        }
    }

    /// Adds a keyword. Alphabetic keywords only match whole words.
    pub fn with_keyword(mut self, text: &str, action: ScoringAction) -> Self {
        let text = text.to_lowercase();
        let whole_word = text.chars().all(|c| c.is_ascii_alphanumeric() || c == ' ');
        self.keywords.push(Keyword {
            text,
            action,
            whole_word,
        });
        // Stable sort keeps insertion order among equal lengths.
        self.keywords
            .sort_by_key(|k| std::cmp::Reverse(k.text.chars().count()));
        self
    }

    /// Classifies `text`, returning the action of the longest keyword found.
    #[instrument(skip(self))]
    pub fn classify(&self, text: &str) -> Option<ScoringAction> {
        let text = text.to_lowercase();
        let action = self
            .keywords
            .iter()
            .find(|keyword| {
                if keyword.whole_word {
                    contains_word(&text, &keyword.text)
                } else {
                    text.contains(&keyword.text)
                }
            })
            .map(|keyword| keyword.action);
        debug!(?action, "Classified input");
        action
    }
}

impl Default for KeywordMatcher {
    /// Chinese keywords from the watch vocabulary plus English equivalents.
    fn default() -> Self {
        Self::empty()
            .with_keyword("對手", ScoringAction::Player2Point)
            .with_keyword("取消", ScoringAction::Undo)
            .with_keyword("我", ScoringAction::Player1Point)
            .with_keyword("opponent", ScoringAction::Player2Point)
            .with_keyword("them", ScoringAction::Player2Point)
            .with_keyword("cancel", ScoringAction::Undo)
            .with_keyword("undo", ScoringAction::Undo)
            .with_keyword("mine", ScoringAction::Player1Point)
            .with_keyword("me", ScoringAction::Player1Point)
    }
}

/// Whether `needle` occurs in `haystack` bounded by non-alphanumerics.
fn contains_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, _)| {
        let end = start + needle.len();
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// State of a [`RecognitionSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum SessionState {
    /// Not listening.
    Idle,
    /// Listening and waiting for a keyword.
    Listening,
    /// A keyword was recognized; further text is ignored.
    Matched(ScoringAction),
    /// The utterance ended without a keyword.
    NoMatch,
}

/// One listening session over a stream of partial transcripts.
///
/// Emits at most one action per utterance: once a keyword is recognized,
/// later partial results are ignored until the session is restarted.
#[derive(Debug, Clone)]
pub struct RecognitionSession {
    matcher: KeywordMatcher,
    state: SessionState,
}

impl RecognitionSession {
    /// Creates an idle session.
    pub fn new(matcher: KeywordMatcher) -> Self {
        Self {
            matcher,
            state: SessionState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Starts listening for a new utterance.
    #[instrument(skip(self))]
    pub fn start(&mut self) {
        debug!(previous = %self.state, "Listening");
        self.state = SessionState::Listening;
    }

    /// Feeds a partial transcript. Returns the action the first time a keyword matches.
    #[instrument(skip(self))]
    pub fn feed_partial(&mut self, transcript: &str) -> Option<ScoringAction> {
        if self.state != SessionState::Listening {
            return None;
        }
        let action = self.matcher.classify(transcript)?;
        self.state = SessionState::Matched(action);
        Some(action)
    }

    /// Feeds the final transcript and ends the utterance.
    ///
    /// Returns an action only if none was emitted for this utterance yet.
    #[instrument(skip(self))]
    pub fn finish(&mut self, transcript: &str) -> Option<ScoringAction> {
        let action = self.feed_partial(transcript);
        if self.state == SessionState::Listening {
            debug!("Utterance ended without keyword");
            self.state = SessionState::NoMatch;
        }
        action
    }

    /// Abandons the utterance (timeout or cancel).
    pub fn stop(&mut self) {
        self.state = SessionState::Idle;
    }
}

impl Default for RecognitionSession {
    fn default() -> Self {
        Self::new(KeywordMatcher::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chinese_keywords() {
        let matcher = KeywordMatcher::default();
        assert_eq!(matcher.classify("我"), Some(ScoringAction::Player1Point));
        assert_eq!(matcher.classify("對手"), Some(ScoringAction::Player2Point));
        assert_eq!(matcher.classify("取消"), Some(ScoringAction::Undo));
        assert_eq!(matcher.classify("你好"), None);
    }

    #[test]
    fn test_longer_keyword_wins() {
        let matcher = KeywordMatcher::default();
        assert_eq!(
            matcher.classify("我的對手得分"),
            Some(ScoringAction::Player2Point)
        );
        assert_eq!(matcher.classify("我要取消"), Some(ScoringAction::Undo));
    }

    #[test]
    fn test_english_whole_words() {
        let matcher = KeywordMatcher::default();
        assert_eq!(matcher.classify("Point to ME"), Some(ScoringAction::Player1Point));
        assert_eq!(matcher.classify("opponent"), Some(ScoringAction::Player2Point));
        assert_eq!(matcher.classify("undo that"), Some(ScoringAction::Undo));
        assert_eq!(matcher.classify("memory"), None);
        assert_eq!(matcher.classify("theme"), None);
    }

    #[test]
    fn test_empty_matcher() {
        assert_eq!(KeywordMatcher::empty().classify("我"), None);
    }

    #[test]
    fn test_session_emits_once_per_utterance() {
        let mut session = RecognitionSession::default();
        assert_eq!(session.feed_partial("我"), None);

        session.start();
        assert_eq!(session.feed_partial("嗯"), None);
        assert_eq!(session.feed_partial("嗯 我"), Some(ScoringAction::Player1Point));
        assert_eq!(session.feed_partial("嗯 我 對手"), None);
        assert_eq!(session.finish("嗯 我 對手"), None);
        assert_eq!(session.state(), SessionState::Matched(ScoringAction::Player1Point));

        session.start();
        assert_eq!(session.finish("nothing here"), None);
        assert_eq!(session.state(), SessionState::NoMatch);

        session.start();
        assert_eq!(session.finish("取消"), Some(ScoringAction::Undo));
        session.stop();
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_action_apply() {
        let mut engine = MatchEngine::default();
        assert_eq!(
            ScoringAction::Player2Point.apply(&mut engine),
            Some(PointOutcome::Point)
        );
        assert_eq!(engine.point_events().len(), 1);
        assert_eq!(ScoringAction::Undo.apply(&mut engine), None);
        assert!(!engine.can_undo());
    }
}
