//! RustMorseDecoder - Firmware entry point
//!
//! Wires the hardware to the core:
//! 1. Configure the button GPIO (input, pull-up)
//! 2. Spawn the mirror poller, indicator and log-drain tasks
//! 3. Run the decode loop on the main task
//!
//! Both pollers read the button through `gpio_get_level`, a plain
//! register read that tolerates two concurrent callers. Everything else
//! they touch is private to their own task or crosses through a
//! lock-free ring.

#[cfg(target_os = "espidf")]
mod firmware {
    use std::thread;
    use std::time::Duration;

    use esp_idf_svc::sys::{self, esp};

    use rust_morse_decoder::{
        classifier::TimingClassifier,
        config::TimingConfig,
        level::ButtonLevel,
        logging::LogRing,
        mirror::{LevelMirror, PulseRing},
        protocol,
        sink::{MirrorSink, PresentationSink},
    };
    use rust_morse_decoder::{ring_debug, ring_info, ring_warn};

    /// Button input (active-low, internal pull-up).
    const BUTTON_GPIO: sys::gpio_num_t = sys::gpio_num_t_GPIO_NUM_23;

    // One log ring per producing task, plus the pulse ring between the
    // mirror poller and the indicator task.
    static MIRROR_PULSES: PulseRing = PulseRing::new();
    static DECODE_LOG: LogRing = LogRing::new();
    static MIRROR_LOG: LogRing = LogRing::new();
    static INDICATOR_LOG: LogRing = LogRing::new();

    fn timestamp_us() -> i64 {
        // SAFETY: esp_timer_get_time is always safe to call
        unsafe { sys::esp_timer_get_time() }
    }

    fn sample_level() -> ButtonLevel {
        // SAFETY: gpio_get_level is a register read; safe from two
        // concurrent callers, which both poll loops rely on.
        ButtonLevel::from_active_low(unsafe { sys::gpio_get_level(BUTTON_GPIO) } != 0)
    }

    /// Display + remote fan-out boundary.
    ///
    /// Owns whatever retry/reconnect behavior the transports need; the
    /// decode loop just pushes state through it.
    struct PresentationOut;

    impl PresentationSink for PresentationOut {
        fn show_word(&mut self, word: &str) {
            let mut frame = [0u8; protocol::MAX_FRAME_LEN];
            let len = protocol::frame_word(word, &mut frame);
            // TODO: SSD1306 render + /ws broadcast; log-only until wired
            ring_debug!(
                DECODE_LOG,
                timestamp_us(),
                "tx {}",
                core::str::from_utf8(&frame[..len]).unwrap_or("")
            );
        }

        fn show_translation(&mut self, text: &str) {
            let mut frame = [0u8; protocol::MAX_FRAME_LEN];
            let len = protocol::frame_translation(text, &mut frame);
            ring_debug!(
                DECODE_LOG,
                timestamp_us(),
                "tx {}",
                core::str::from_utf8(&frame[..len]).unwrap_or("")
            );
        }

        fn clear(&mut self) {
            ring_info!(DECODE_LOG, timestamp_us(), "tx {}", protocol::CLEAR_FRAME);
        }
    }

    /// Sound indicator boundary (sidetone + /ws-sound broadcast).
    struct SoundOut;

    impl MirrorSink for SoundOut {
        fn signal_start(&mut self) {
            // TODO: key the sidetone + /ws-sound broadcast
            ring_debug!(INDICATOR_LOG, timestamp_us(), "tx {}", protocol::START_FRAME);
        }

        fn signal_stop(&mut self) {
            ring_debug!(INDICATOR_LOG, timestamp_us(), "tx {}", protocol::STOP_FRAME);
        }
    }

    /// Mirror poller: raw level to pulse, minimal latency, never blocks.
    fn mirror_task() {
        let mut mirror = LevelMirror::new();

        loop {
            if let Some(pulse) = mirror.poll(sample_level()) {
                if !MIRROR_PULSES.push(pulse) {
                    ring_warn!(
                        MIRROR_LOG,
                        timestamp_us(),
                        "pulse dropped ({} total)",
                        MIRROR_PULSES.dropped()
                    );
                }
            }
            thread::sleep(Duration::from_millis(1));
        }
    }

    /// Indicator task: drains pulses and drives the sound sink, which
    /// is allowed to block.
    fn indicator_task() {
        let mut sink = SoundOut;

        loop {
            while let Some(pulse) = MIRROR_PULSES.drain() {
                pulse.apply(&mut sink);
            }
            thread::sleep(Duration::from_millis(2));
        }
    }

    /// Drains all log rings to the console.
    fn log_drain_task() {
        loop {
            for ring in [&DECODE_LOG, &MIRROR_LOG, &INDICATOR_LOG] {
                while let Some(entry) = ring.drain() {
                    println!(
                        "[{:10}] {}: {}",
                        entry.timestamp_us,
                        entry.level.as_str(),
                        entry.msg_str()
                    );
                }
            }
            thread::sleep(Duration::from_millis(20));
        }
    }

    pub fn run() -> Result<(), sys::EspError> {
        sys::link_patches();

        println!("{}", env!("VERSION_STRING"));

        // Button: input with internal pull-up, pressed = low
        esp!(unsafe { sys::gpio_reset_pin(BUTTON_GPIO) })?;
        esp!(unsafe { sys::gpio_set_direction(BUTTON_GPIO, sys::gpio_mode_t_GPIO_MODE_INPUT) })?;
        esp!(unsafe {
            sys::gpio_set_pull_mode(BUTTON_GPIO, sys::gpio_pull_mode_t_GPIO_PULLUP_ONLY)
        })?;

        thread::Builder::new()
            .name("mirror".into())
            .stack_size(4096)
            .spawn(mirror_task)
            .expect("spawn mirror task");

        thread::Builder::new()
            .name("indicator".into())
            .stack_size(4096)
            .spawn(indicator_task)
            .expect("spawn indicator task");

        thread::Builder::new()
            .name("logdrain".into())
            .stack_size(4096)
            .spawn(log_drain_task)
            .expect("spawn log drain task");

        // Decode loop runs on the main task
        let mut classifier = TimingClassifier::new(TimingConfig::DEFAULT, timestamp_us());
        let mut sink = PresentationOut;

        ring_info!(DECODE_LOG, timestamp_us(), "decode loop up");

        loop {
            let now = timestamp_us();
            if let Some(update) = classifier.poll(now, sample_level()) {
                if update.reset {
                    ring_info!(DECODE_LOG, now, "word reset");
                }
                update.apply(&mut sink);
            }
            // One-tick floor; well under the 150ms dot threshold
            thread::sleep(Duration::from_millis(1));
        }
    }
}

#[cfg(target_os = "espidf")]
fn main() -> Result<(), esp_idf_svc::sys::EspError> {
    firmware::run()
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    // Core logic is host-testable; the firmware needs the ESP-IDF target.
    eprintln!("decoder runs on ESP-IDF targets; on the host use `cargo test`");
}
