//! # RustMorseDecoder
//!
//! Single-button Morse decoder with live display and remote mirroring.
//!
//! ## Architecture
//!
//! Two loops poll the same button, sharing nothing but the read-only
//! input line:
//!
//! ```text
//!                 ┌──▶ decode loop ──▶ TimingClassifier ──▶ PresentationSink
//! button GPIO ────┤    (edge timing, word state)            (display + remote)
//!                 └──▶ mirror loop ──▶ PulseRing ──▶ MirrorSink
//!                      (raw on/off, minimal latency)  (sound indicator)
//! ```
//!
//! The decode loop owns all word state and classifies press/release
//! durations into symbols, letter gaps and word resets. The mirror loop
//! keeps only its own last-level shadow and reacts to raw changes
//! without waiting on classification. No locks, no shared mutable state;
//! cross-task traffic is lock-free rings.
//!
//! All core logic is hardware-free and runs on the host under `cargo
//! test`; the firmware binary wires it to GPIO and the sinks.

#![cfg_attr(not(test), no_std)]

pub mod classifier;
pub mod code;
pub mod config;
pub mod level;
pub mod logging;
pub mod mirror;
pub mod protocol;
pub mod sink;
pub mod word;

pub use classifier::{TimingClassifier, WordUpdate};
pub use code::{decode, lookup, Translation};
pub use config::TimingConfig;
pub use level::{ButtonLevel, EdgeEvent};
pub use logging::{LogLevel, LogRing};
pub use mirror::{LevelMirror, Pulse, PulseRing};
pub use sink::{MirrorSink, PresentationSink};
pub use word::{MorseWord, Symbol};
