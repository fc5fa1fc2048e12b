//! Level mirror: the low-latency indicator path.
//!
//! A second, independent consumer of the same physical input. It owns
//! nothing but its own shadow of the last observed level and maps raw
//! changes straight to start/stop pulses; no timing, no word state, no
//! coupling to the classifier. The two pollers never share mutable data,
//! only the read-only hardware line.
//!
//! # Architecture
//!
//! ```text
//! poll task ──▶ LevelMirror ──▶ PulseRing ──▶ indicator task ──▶ MirrorSink
//!               (shadow level)   (lock-free)   (may block)
//! ```
//!
//! The poll loop must never block, and sink calls (network send, tone
//! control) can. Pulses therefore cross tasks through a lock-free SPSC
//! ring; a full ring drops the pulse and counts it rather than stall the
//! poller.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, Ordering};

use crate::level::ButtonLevel;
use crate::sink::MirrorSink;

/// Default pulse ring capacity. Pulses are consumed at human keying
/// rates, so a small ring is plenty.
pub const DEFAULT_RING_SIZE: usize = 16;

/// Stateless on/off notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pulse {
    /// Level went Active: start the indicator.
    Start,
    /// Level went Idle: stop the indicator.
    Stop,
}

impl Pulse {
    /// Forward this pulse to a mirror sink.
    #[inline]
    pub fn apply<S: MirrorSink>(&self, sink: &mut S) {
        match self {
            Pulse::Start => sink.signal_start(),
            Pulse::Stop => sink.signal_stop(),
        }
    }
}

/// Shadow-level edge detector for the indicator path.
pub struct LevelMirror {
    last_level: ButtonLevel,
}

impl LevelMirror {
    /// Create a mirror assuming a released button.
    pub const fn new() -> Self {
        Self {
            last_level: ButtonLevel::Idle,
        }
    }

    /// Feed one level sample.
    ///
    /// Returns a pulse on any level change, `None` otherwise.
    #[inline]
    pub fn poll(&mut self, level: ButtonLevel) -> Option<Pulse> {
        if level == self.last_level {
            return None;
        }
        self.last_level = level;
        Some(match level {
            ButtonLevel::Active => Pulse::Start,
            ButtonLevel::Idle => Pulse::Stop,
        })
    }

    /// Last level this mirror observed.
    pub fn last_level(&self) -> ButtonLevel {
        self.last_level
    }
}

impl Default for LevelMirror {
    fn default() -> Self {
        Self::new()
    }
}

/// Lock-free SPSC ring carrying pulses from the poll task to the
/// indicator task.
///
/// # Safety
///
/// Uses `UnsafeCell` internally but is safe under its contract:
/// - exactly one producer task calls [`push`](Self::push)
/// - exactly one consumer task calls [`drain`](Self::drain)
/// - index coordination is acquire/release atomics, so the consumer
///   observes a slot's contents before it observes the advanced index
pub struct PulseRing<const N: usize = DEFAULT_RING_SIZE> {
    slots: UnsafeCell<[Pulse; N]>,

    /// Next write index (monotonic, wraps via mask).
    write_idx: AtomicU32,

    /// Next read index (monotonic, wraps via mask).
    read_idx: AtomicU32,

    /// Pulses dropped to a full ring since startup.
    dropped: AtomicU32,
}

// SAFETY: Single producer, single consumer, atomic index coordination.
// No mutable aliasing possible within the contract above.
unsafe impl<const N: usize> Sync for PulseRing<N> {}
unsafe impl<const N: usize> Send for PulseRing<N> {}

impl<const N: usize> PulseRing<N> {
    const MASK: usize = N - 1;

    /// Create an empty ring.
    ///
    /// # Panics
    ///
    /// Panics at compile time if N is not a power of 2.
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "Ring size must be power of 2");

        Self {
            slots: UnsafeCell::new([Pulse::Stop; N]),
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Push a pulse (producer side, never blocks).
    ///
    /// Returns `false` if the ring was full and the pulse was dropped.
    #[inline]
    pub fn push(&self, pulse: Pulse) -> bool {
        let write = self.write_idx.load(Ordering::Relaxed);
        let read = self.read_idx.load(Ordering::Acquire);

        if write.wrapping_sub(read) >= N as u32 {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        // SAFETY: single producer; this slot is outside the readable
        // window until write_idx advances below.
        unsafe {
            (*self.slots.get())[(write as usize) & Self::MASK] = pulse;
        }

        self.write_idx.store(write.wrapping_add(1), Ordering::Release);
        true
    }

    /// Pop the next pulse (consumer side).
    #[inline]
    pub fn drain(&self) -> Option<Pulse> {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);

        if read == write {
            return None;
        }

        // SAFETY: single consumer; the slot was published by the Release
        // store that made write_idx cover it.
        let pulse = unsafe { (*self.slots.get())[(read as usize) & Self::MASK] };

        self.read_idx.store(read.wrapping_add(1), Ordering::Release);
        Some(pulse)
    }

    /// Number of pulses waiting to be drained.
    #[inline]
    pub fn pending(&self) -> u32 {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);
        write.wrapping_sub(read)
    }

    /// Pulses dropped to a full ring since startup.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Ring capacity.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for PulseRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_maps_edges_to_pulses() {
        let mut mirror = LevelMirror::new();

        assert_eq!(mirror.poll(ButtonLevel::Idle), None);
        assert_eq!(mirror.poll(ButtonLevel::Active), Some(Pulse::Start));
        assert_eq!(mirror.poll(ButtonLevel::Active), None);
        assert_eq!(mirror.poll(ButtonLevel::Idle), Some(Pulse::Stop));
        assert_eq!(mirror.poll(ButtonLevel::Idle), None);
    }

    #[test]
    fn test_ring_fifo_order() {
        let ring = PulseRing::<8>::new();

        ring.push(Pulse::Start);
        ring.push(Pulse::Stop);
        ring.push(Pulse::Start);

        assert_eq!(ring.pending(), 3);
        assert_eq!(ring.drain(), Some(Pulse::Start));
        assert_eq!(ring.drain(), Some(Pulse::Stop));
        assert_eq!(ring.drain(), Some(Pulse::Start));
        assert_eq!(ring.drain(), None);
    }

    #[test]
    fn test_ring_drops_when_full() {
        let ring = PulseRing::<4>::new();

        for _ in 0..4 {
            assert!(ring.push(Pulse::Start));
        }
        assert!(!ring.push(Pulse::Stop));
        assert_eq!(ring.dropped(), 1);

        // Draining one slot makes room again
        ring.drain();
        assert!(ring.push(Pulse::Stop));
    }

    #[test]
    fn test_ring_cross_thread() {
        use std::sync::Arc;
        use std::thread;

        let ring = Arc::new(PulseRing::<64>::new());
        let producer = Arc::clone(&ring);

        let handle = thread::spawn(move || {
            for i in 0..50 {
                let pulse = if i % 2 == 0 { Pulse::Start } else { Pulse::Stop };
                while !producer.push(pulse) {
                    thread::yield_now();
                }
            }
        });

        let mut got = std::vec::Vec::new();
        while got.len() < 50 {
            if let Some(pulse) = ring.drain() {
                got.push(pulse);
            } else {
                thread::yield_now();
            }
        }
        handle.join().unwrap();

        // Alternating order preserved end to end
        for (i, pulse) in got.iter().enumerate() {
            let expected = if i % 2 == 0 { Pulse::Start } else { Pulse::Stop };
            assert_eq!(*pulse, expected);
        }
    }
}
