//! Collaborator seams: display/broadcast presentation and sound indicator.
//!
//! The core pushes state through these traits and owns nothing behind
//! them. Rendering, fan-out, reconnects and retries live entirely in the
//! implementations; calls may block, which is why the mirror path hands
//! its pulses to a separate task before they reach a sink (see
//! [`crate::mirror`]).

/// Receiver for the pending word and its translation.
///
/// Called after every processed edge: `clear` first when the edge applied
/// a latched word reset, then `show_word` and `show_translation` with the
/// freshest state, mutation or not.
pub trait PresentationSink {
    /// Render/broadcast the serialized pending word.
    fn show_word(&mut self, word: &str);

    /// Render/broadcast the decoded text.
    fn show_translation(&mut self, text: &str);

    /// A word reset was applied; drop any displayed state.
    fn clear(&mut self);
}

/// Receiver for raw on/off level notifications.
///
/// Carries no timing information; invoked on every raw level change,
/// independent of the classification pipeline.
pub trait MirrorSink {
    /// The button went down.
    fn signal_start(&mut self);

    /// The button went up.
    fn signal_stop(&mut self);
}
