//! Edge-timing classifier.
//!
//! The decoding core: consumes level samples, detects edges, classifies
//! each edge's elapsed time into a symbol, a letter gap, a latched word
//! reset or a no-op, and maintains the pending word. Pure logic, no
//! hardware dependencies, fully testable on host.
//!
//! # Timing rules
//!
//! A release edge measures how long the button was held:
//!
//! ```text
//! 0 ......... 1.5x dot ......... 1.5x dash ..........
//!     dot            dash             discarded
//! ```
//!
//! A press edge measures how long the button was up:
//!
//! ```text
//! 0 ......... 3x dot ......... 10x dot ..............
//!   intra-letter   letter gap      reset latch
//! ```
//!
//! Signal windows are exclusive (`<`), gap windows inclusive (`>=`), so a
//! duration equal to a threshold classifies on exactly one side. No
//! duration is an error; every elapsed time maps to one outcome.
//!
//! A qualifying reset gap only *latches*: the word is cleared at the start
//! of the next edge's processing, before that edge is classified. The
//! operator sees the old word until they key again.

use crate::code::{decode, Translation};
use crate::config::TimingConfig;
use crate::level::{ButtonLevel, EdgeEvent};
use crate::sink::PresentationSink;
use crate::word::{MorseWord, Symbol};

/// Gap classification outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GapClass {
    /// Pause between elements of one letter. No mutation.
    Intra,
    /// Letter boundary: append a separator.
    Letter,
    /// Word reset: latch, apply on the next edge.
    Reset,
}

/// State snapshot produced by every processed edge.
///
/// A by-value sample, same discipline as the rest of the crate: consumers
/// never borrow classifier state.
#[derive(Clone, Copy, Debug)]
pub struct WordUpdate {
    /// A latched reset was applied at the start of this edge.
    pub reset: bool,
    /// Pending word after classification.
    pub word: MorseWord,
    /// Decoded text, recomputed from the word.
    pub translation: Translation,
}

impl WordUpdate {
    /// Push this update to a presentation sink.
    ///
    /// Clear-before-show ordering: a reset drops displayed state before
    /// the (now empty) word and translation are mirrored.
    pub fn apply<S: PresentationSink>(&self, sink: &mut S) {
        if self.reset {
            sink.clear();
        }
        sink.show_word(self.word.as_str());
        sink.show_translation(self.translation.as_str());
    }
}

/// Edge-triggered timing state machine.
///
/// Owns all decoding state; feed it level samples and push the returned
/// updates wherever they need to go.
///
/// # Example
///
/// ```
/// use rust_morse_decoder::classifier::TimingClassifier;
/// use rust_morse_decoder::config::TimingConfig;
/// use rust_morse_decoder::level::ButtonLevel;
///
/// let mut classifier = TimingClassifier::new(TimingConfig::DEFAULT, 0);
///
/// // Press at t=500ms, release 90ms later: a dot
/// classifier.poll(500_000, ButtonLevel::Active);
/// let update = classifier.poll(590_000, ButtonLevel::Idle).unwrap();
/// assert_eq!(update.word.as_str(), ".");
/// assert_eq!(update.translation.as_str(), "E");
/// ```
pub struct TimingClassifier {
    config: TimingConfig,

    // Edge detection
    last_level: ButtonLevel,
    last_change_us: i64,

    // Word state
    word: MorseWord,
    pending_reset: bool,
}

impl TimingClassifier {
    /// Create a classifier in the released state.
    ///
    /// `start_us` anchors the first edge's elapsed time, so pass the
    /// timestamp the sampling loop starts at.
    pub fn new(config: TimingConfig, start_us: i64) -> Self {
        Self {
            config,
            last_level: ButtonLevel::Idle,
            last_change_us: start_us,
            word: MorseWord::new(),
            pending_reset: false,
        }
    }

    /// Get current configuration.
    pub fn config(&self) -> &TimingConfig {
        &self.config
    }

    /// Current pending word.
    pub fn word(&self) -> &MorseWord {
        &self.word
    }

    /// Check if a word reset is latched for the next edge.
    pub fn reset_pending(&self) -> bool {
        self.pending_reset
    }

    /// Feed one level sample.
    ///
    /// Returns `None` when the level is unchanged (the classifier is
    /// edge-triggered, not level-triggered). On an edge, returns the
    /// post-classification state unconditionally, mutation or not.
    #[inline]
    pub fn poll(&mut self, now_us: i64, level: ButtonLevel) -> Option<WordUpdate> {
        if level == self.last_level {
            return None;
        }

        let edge = EdgeEvent {
            from: self.last_level,
            to: level,
            elapsed_us: now_us - self.last_change_us,
        };

        // Apply a reset latched by the previous gap, exactly once, before
        // this edge is classified.
        let reset = self.pending_reset;
        if reset {
            self.word.clear();
            self.pending_reset = false;
        }

        self.classify(&edge);

        self.last_level = level;
        self.last_change_us = now_us;

        Some(WordUpdate {
            reset,
            word: self.word,
            translation: decode(self.word.as_str()),
        })
    }

    /// Drop all state back to startup conditions.
    pub fn reset(&mut self, now_us: i64) {
        self.last_level = ButtonLevel::Idle;
        self.last_change_us = now_us;
        self.word.clear();
        self.pending_reset = false;
    }

    // --- Private methods ---

    fn classify(&mut self, edge: &EdgeEvent) {
        if edge.is_release() {
            if let Some(symbol) = self.classify_signal(edge.elapsed_us) {
                self.word.push_symbol(symbol);
            }
        } else {
            match self.classify_gap(edge.elapsed_us) {
                GapClass::Reset => self.pending_reset = true,
                GapClass::Letter => {
                    // push_gap refuses an empty word or a doubled separator
                    self.word.push_gap();
                }
                GapClass::Intra => {}
            }
        }
    }

    /// Classify a press duration. `None` means an overlong press,
    /// discarded without feedback.
    fn classify_signal(&self, elapsed_us: i64) -> Option<Symbol> {
        if elapsed_us < self.config.dot_max_us() {
            Some(Symbol::Dot)
        } else if elapsed_us < self.config.dash_max_us() {
            Some(Symbol::Dash)
        } else {
            None
        }
    }

    /// Classify a release duration.
    fn classify_gap(&self, elapsed_us: i64) -> GapClass {
        if elapsed_us >= self.config.reset_gap_us() {
            GapClass::Reset
        } else if elapsed_us >= self.config.letter_gap_us() {
            GapClass::Letter
        } else {
            GapClass::Intra
        }
    }
}
