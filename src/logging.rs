//! Poll-safe logging.
//!
//! Neither poll loop may block on I/O, so log messages travel through
//! lock-free rings and a non-critical task formats them out to the
//! console at its leisure.
//!
//! ```text
//! decode loop ──▶ DECODE_LOG ─┐
//!                             ├──▶ drain task ──▶ console
//! mirror loop ──▶ MIRROR_LOG ─┘
//! ```
//!
//! Each ring is single-producer/single-consumer: one ring per producing
//! task, all drained by the same task. Messages are dropped (and
//! counted) when a ring is full; losing a log line beats stalling a
//! poller.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, Ordering};

/// Maximum message length in bytes. Longer messages are truncated.
pub const MAX_MSG_LEN: usize = 96;

/// Default ring capacity (entries).
pub const LOG_RING_SIZE: usize = 128;

/// Log severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    /// Fixed-width tag for console output.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

/// A single formatted log entry.
#[derive(Clone, Copy)]
#[repr(C)]
pub struct LogEntry {
    /// Timestamp in microseconds.
    pub timestamp_us: i64,
    /// Severity.
    pub level: LogLevel,
    /// Message length.
    pub len: u8,
    /// Message bytes (not null-terminated).
    pub msg: [u8; MAX_MSG_LEN],
}

impl LogEntry {
    /// Message contents as a string slice.
    pub fn msg_str(&self) -> &str {
        core::str::from_utf8(&self.msg[..self.len as usize]).unwrap_or("<invalid utf8>")
    }
}

impl Default for LogEntry {
    fn default() -> Self {
        Self {
            timestamp_us: 0,
            level: LogLevel::Info,
            len: 0,
            msg: [0; MAX_MSG_LEN],
        }
    }
}

/// Lock-free SPSC log ring.
///
/// One producing task per ring; the drain task is the single consumer
/// for all rings. Push never blocks and drops when full.
pub struct LogRing<const N: usize = LOG_RING_SIZE> {
    entries: UnsafeCell<[LogEntry; N]>,
    write_idx: AtomicU32,
    read_idx: AtomicU32,
    dropped: AtomicU32,
}

// SAFETY: Single producer, single consumer, acquire/release index
// coordination. No mutable aliasing within that contract.
unsafe impl<const N: usize> Sync for LogRing<N> {}
unsafe impl<const N: usize> Send for LogRing<N> {}

impl<const N: usize> LogRing<N> {
    const MASK: usize = N - 1;

    /// Create an empty ring.
    ///
    /// # Panics
    ///
    /// Panics at compile time if N is not a power of 2.
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "Log ring size must be power of 2");

        Self {
            entries: UnsafeCell::new(
                [LogEntry {
                    timestamp_us: 0,
                    level: LogLevel::Info,
                    len: 0,
                    msg: [0; MAX_MSG_LEN],
                }; N],
            ),
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Push a message (producer side, never blocks).
    ///
    /// Returns `false` if the ring was full and the message dropped.
    #[inline]
    pub fn push(&self, timestamp_us: i64, level: LogLevel, msg: &[u8]) -> bool {
        let write = self.write_idx.load(Ordering::Relaxed);
        let read = self.read_idx.load(Ordering::Acquire);

        if write.wrapping_sub(read) >= N as u32 {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        let idx = (write as usize) & Self::MASK;

        // SAFETY: single producer; the slot is outside the readable
        // window until the Release store below.
        unsafe {
            let entry = &mut (*self.entries.get())[idx];
            entry.timestamp_us = timestamp_us;
            entry.level = level;
            entry.len = msg.len().min(MAX_MSG_LEN) as u8;
            entry.msg[..entry.len as usize].copy_from_slice(&msg[..entry.len as usize]);
        }

        self.write_idx.store(write.wrapping_add(1), Ordering::Release);
        true
    }

    /// Pop the next entry (consumer side).
    #[inline]
    pub fn drain(&self) -> Option<LogEntry> {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);

        if read == write {
            return None;
        }

        let idx = (read as usize) & Self::MASK;

        // SAFETY: single consumer, slot published by the producer's
        // Release store.
        let entry = unsafe { (*self.entries.get())[idx] };

        self.read_idx.store(read.wrapping_add(1), Ordering::Release);
        Some(entry)
    }

    /// Check if there are entries to drain.
    #[inline]
    pub fn has_entries(&self) -> bool {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);
        read != write
    }

    /// Count of messages dropped to a full ring.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl<const N: usize> Default for LogRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Format arguments into a byte buffer. Returns bytes written.
#[inline]
pub fn format_into(buf: &mut [u8], args: core::fmt::Arguments<'_>) -> usize {
    use core::fmt::Write;

    struct BufWriter<'a> {
        buf: &'a mut [u8],
        pos: usize,
    }

    impl<'a> Write for BufWriter<'a> {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            let bytes = s.as_bytes();
            let remaining = self.buf.len() - self.pos;
            let to_write = bytes.len().min(remaining);
            self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
            self.pos += to_write;
            Ok(())
        }
    }

    let mut writer = BufWriter { buf, pos: 0 };
    let _ = core::fmt::write(&mut writer, args);
    writer.pos
}

/// Push a formatted message to a log ring.
///
/// Formats into a stack buffer, never allocates, never blocks. Safe from
/// the poll loops.
///
/// # Example
///
/// ```ignore
/// ring_log!(LogLevel::Info, DECODE_LOG, now_us, "edge at {}", now_us);
/// ```
#[macro_export]
macro_rules! ring_log {
    ($level:expr, $ring:expr, $timestamp:expr, $($arg:tt)*) => {{
        let mut buf = [0u8; $crate::logging::MAX_MSG_LEN];
        let len = $crate::logging::format_into(&mut buf, format_args!($($arg)*));
        $ring.push($timestamp, $level, &buf[..len]);
    }};
}

/// Info-level [`ring_log!`].
#[macro_export]
macro_rules! ring_info {
    ($ring:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::ring_log!($crate::logging::LogLevel::Info, $ring, $timestamp, $($arg)*)
    };
}

/// Warn-level [`ring_log!`].
#[macro_export]
macro_rules! ring_warn {
    ($ring:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::ring_log!($crate::logging::LogLevel::Warn, $ring, $timestamp, $($arg)*)
    };
}

/// Error-level [`ring_log!`].
#[macro_export]
macro_rules! ring_error {
    ($ring:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::ring_log!($crate::logging::LogLevel::Error, $ring, $timestamp, $($arg)*)
    };
}

/// Debug-level [`ring_log!`].
#[macro_export]
macro_rules! ring_debug {
    ($ring:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::ring_log!($crate::logging::LogLevel::Debug, $ring, $timestamp, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_drain_roundtrip() {
        let ring = LogRing::<16>::new();

        assert!(ring.push(1000, LogLevel::Info, b"test message"));
        assert!(ring.has_entries());

        let entry = ring.drain().unwrap();
        assert_eq!(entry.timestamp_us, 1000);
        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.msg_str(), "test message");

        assert!(!ring.has_entries());
    }

    #[test]
    fn test_drop_when_full() {
        let ring = LogRing::<4>::new();

        for i in 0..4 {
            assert!(ring.push(i, LogLevel::Info, b"x"));
        }
        assert!(!ring.push(5, LogLevel::Info, b"overflow"));
        assert_eq!(ring.dropped(), 1);

        // Draining frees a slot
        ring.drain();
        assert!(ring.push(6, LogLevel::Info, b"y"));
    }

    #[test]
    fn test_long_message_truncated() {
        let ring = LogRing::<4>::new();
        let long = [b'a'; 2 * MAX_MSG_LEN];

        assert!(ring.push(0, LogLevel::Warn, &long));
        let entry = ring.drain().unwrap();
        assert_eq!(entry.len as usize, MAX_MSG_LEN);
    }

    #[test]
    fn test_ring_log_macro_formats() {
        static RING: LogRing<16> = LogRing::new();

        ring_info!(RING, 42, "edge at {}us", 1234);

        let entry = RING.drain().unwrap();
        assert_eq!(entry.timestamp_us, 42);
        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.msg_str(), "edge at 1234us");
    }

    #[test]
    fn test_format_into() {
        let mut buf = [0u8; 32];
        let len = format_into(&mut buf, format_args!("Hello {}", 42));
        assert_eq!(&buf[..len], b"Hello 42");
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Error < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Debug);
    }
}
