//! The bridge aggregate.
//!
//! One explicitly-owned context holding every piece of mutable core state:
//! the channel array, the parser context, statistics, the pattern run and
//! the transfer engine. Every core operation is a method on it; nothing
//! lives in globals. Time enters exclusively through `now` parameters.

use embassy_time::{Duration, Instant};

use crate::channel::Channel;
use crate::color::{BLACK, ColorPipeline, Rgb};
use crate::decoder::{Command, Parser, ParserState};
use crate::diag;
use crate::intake::IntakeReader;
use crate::limiter::CurrentLimiter;
use crate::pacing::Pacer;
use crate::pattern::{self, PatternId, PatternSlot};
use crate::status::{ChannelReport, Statistics, StatusSnapshot};
use crate::{MAX_LEDS_PER_CHANNEL, NUM_CHANNELS, TransferEngine};

/// Operating mode of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemMode {
    /// Pixel data comes from the serial protocol.
    Normal,
    /// Pixel data comes from the diagnostic pattern engine.
    TestPattern,
}

/// Bridge tunables. `Default` matches the reference hardware.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Gamma exponent for the color pipeline; `None` selects the identity
    /// table.
    pub gamma: Option<f32>,
    /// Per-channel brightness-unit budget; `None` disables limiting.
    pub current_limit: Option<u32>,
    /// Minimum spacing between pattern animation ticks.
    pub pattern_interval: Duration,
    /// Serial silence in normal mode before the diagnostic pattern starts.
    pub pattern_timeout: Duration,
    /// LED count assigned to every channel while a pattern runs.
    pub pattern_leds: u16,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            gamma: Some(2.8),
            current_limit: Some(30_000),
            pattern_interval: Duration::from_millis(1000 / pattern::TICK_RATE_HZ),
            pattern_timeout: Duration::from_secs(5),
            pattern_leds: MAX_LEDS_PER_CHANNEL as u16,
        }
    }
}

/// State of a running diagnostic pattern. Created on activation, dropped
/// on stop or when real pixel data arrives.
struct PatternRun {
    id: PatternId,
    slot: PatternSlot,
    started: Instant,
    frame: u32,
    ticker: Pacer,
}

/// The core of the serial-to-LED bridge, generic over the hardware
/// transfer engine.
pub struct Bridge<T: TransferEngine> {
    engine: T,
    channels: [Channel; NUM_CHANNELS],
    pipeline: ColorPipeline,
    limiter: CurrentLimiter,
    parser: Parser,
    stats: Statistics,
    pattern: Option<PatternRun>,
    scratch: [Rgb; MAX_LEDS_PER_CHANNEL],
    config: BridgeConfig,
    last_rx: Instant,
    reset_pending: bool,
}

impl<T: TransferEngine> Bridge<T> {
    pub fn new(engine: T, config: BridgeConfig, now: Instant) -> Self {
        let pipeline = ColorPipeline::new(config.gamma);
        let limiter = CurrentLimiter::new(config.current_limit);
        Self {
            engine,
            channels: core::array::from_fn(|i| Channel::new(i as u8)),
            pipeline,
            limiter,
            parser: Parser::default(),
            stats: Statistics::default(),
            pattern: None,
            scratch: [BLACK; MAX_LEDS_PER_CHANNEL],
            config,
            last_rx: now,
            reset_pending: false,
        }
    }

    /// Feed raw protocol bytes. Chunk boundaries are arbitrary; decoding
    /// resumes exactly where the previous call stopped.
    pub fn feed(&mut self, bytes: &[u8], now: Instant) {
        if !bytes.is_empty() {
            self.last_rx = now;
        }
        for &byte in bytes {
            self.step(byte, now);
        }
    }

    /// Drain staged serial bytes into the decoder.
    pub fn pump<const N: usize>(&mut self, reader: &IntakeReader<'_, N>, now: Instant) {
        let mut buf = [0u8; 64];
        loop {
            let read = reader.pop_chunk(&mut buf);
            if read == 0 {
                break;
            }
            self.feed(&buf[..read], now);
        }
    }

    /// One cooperative iteration of the core subsystems: pattern tick,
    /// then timeout check. Decoder work happens through `feed`/`pump` as
    /// bytes arrive; the excluded collaborators run alongside in the same
    /// loop.
    pub fn poll(&mut self, now: Instant) {
        self.tick_pattern(now);
        self.check_timeout(now);
    }

    fn step(&mut self, byte: u8, now: Instant) {
        match self.parser.state {
            ParserState::WaitCommand => self.on_command_byte(byte),
            ParserState::ReadChannel => self.on_channel_byte(byte),
            ParserState::ReadCountLow => {
                self.parser.led_count = u16::from(byte);
                self.parser.state = ParserState::ReadCountHigh;
            }
            ParserState::ReadCountHigh => self.on_count_high(byte),
            ParserState::ReadRgb => self.on_rgb_byte(byte),
            ParserState::ReadFlushMask => {
                self.flush_mask(byte);
                self.parser.rest();
            }
            ParserState::ReadPatternId => {
                self.start_pattern(byte, now);
                self.parser.rest();
            }
        }
    }

    fn on_command_byte(&mut self, byte: u8) {
        self.stats.commands += 1;
        // A byte that is not a command is treated as the next command
        // byte, not as an error.
        let Some(command) = Command::from_byte(byte) else {
            return;
        };
        match command {
            Command::UpdateAndFlush => {
                self.parser.auto_flush = true;
                self.parser.state = ParserState::ReadChannel;
            }
            Command::UpdateOnly => {
                self.parser.auto_flush = false;
                self.parser.state = ParserState::ReadChannel;
            }
            Command::Flush => self.parser.state = ParserState::ReadFlushMask,
            Command::Reset => self.reset_pending = true,
            Command::StartPattern => self.parser.state = ParserState::ReadPatternId,
            Command::StopPattern => self.stop_pattern(),
            Command::ClearAll => self.clear_all(),
        }
    }

    fn on_channel_byte(&mut self, byte: u8) {
        if usize::from(byte) < NUM_CHANNELS {
            self.parser.channel = byte;
            self.parser.state = ParserState::ReadCountLow;
        } else {
            diag!("invalid channel {}", byte);
            self.stats.errors += 1;
            self.parser.rest();
        }
    }

    fn on_count_high(&mut self, byte: u8) {
        self.parser.led_count |= u16::from(byte) << 8;
        let count = self.parser.led_count;
        if count == 0 || count > MAX_LEDS_PER_CHANNEL as u16 {
            diag!("invalid LED count {}", count);
            self.stats.errors += 1;
            self.parser.rest();
            return;
        }
        self.parser.write_index = 0;
        self.parser.rgb_index = 0;
        self.channels[usize::from(self.parser.channel)].set_led_count(count);
        // Real pixel data always wins over the diagnostic display.
        self.pattern = None;
        self.parser.state = ParserState::ReadRgb;
    }

    fn on_rgb_byte(&mut self, byte: u8) {
        match self.parser.rgb_index {
            0 => {
                self.parser.pending_r = byte;
                self.parser.rgb_index = 1;
            }
            1 => {
                self.parser.pending_g = byte;
                self.parser.rgb_index = 2;
            }
            _ => {
                let color = Rgb {
                    r: self.parser.pending_r,
                    g: self.parser.pending_g,
                    b: byte,
                };
                let word = self.pipeline.encode(color);
                let channel = &mut self.channels[usize::from(self.parser.channel)];
                channel.write_word(usize::from(self.parser.write_index), word);
                self.parser.write_index += 1;
                self.parser.rgb_index = 0;
                self.stats.pixels += 1;

                if self.parser.write_index >= self.parser.led_count {
                    Self::finish_frame(
                        channel,
                        &self.limiter,
                        &mut self.engine,
                        &mut self.stats,
                        self.parser.auto_flush,
                    );
                    self.parser.rest();
                }
            }
        }
    }

    /// Post-write stage shared by the decoder and the pattern engine:
    /// current limiting, then optionally the buffer swap and transfer.
    fn finish_frame(
        channel: &mut Channel,
        limiter: &CurrentLimiter,
        engine: &mut T,
        stats: &mut Statistics,
        flush: bool,
    ) {
        if limiter.apply(channel.active_words_mut()) {
            channel.record_limit_event();
        }
        if flush && channel.flush(engine) {
            stats.flushes += 1;
        }
    }

    /// Flush every channel whose mask bit is set, leaving pixel contents
    /// untouched. Idle channels are skipped.
    pub fn flush_mask(&mut self, mask: u8) {
        for index in 0..NUM_CHANNELS {
            if mask & (1 << index) != 0 && self.channels[index].flush(&mut self.engine) {
                self.stats.flushes += 1;
            }
        }
    }

    /// Black out every channel at full length and push it to the
    /// hardware. Also stops a running pattern.
    pub fn clear_all(&mut self) {
        self.pattern = None;
        for channel in &mut self.channels {
            channel.set_led_count(MAX_LEDS_PER_CHANNEL as u16);
            channel.clear_active();
            if channel.flush(&mut self.engine) {
                self.stats.flushes += 1;
            }
        }
    }

    /// Start a diagnostic pattern; out-of-range ids wrap around. Every
    /// channel is given the diagnostic LED count.
    pub fn start_pattern(&mut self, id: u8, now: Instant) {
        let id = PatternId::from_wire(id);
        let count = self.config.pattern_leds.min(MAX_LEDS_PER_CHANNEL as u16);
        for channel in &mut self.channels {
            channel.set_led_count(count);
        }
        diag!("test pattern {} activated", id as u8);
        self.pattern = Some(PatternRun {
            id,
            slot: id.to_slot(),
            started: now,
            frame: 0,
            ticker: Pacer::new(self.config.pattern_interval),
        });
    }

    /// Stop the diagnostic display and return to normal mode. Channels
    /// keep their last frame.
    pub fn stop_pattern(&mut self) {
        self.pattern = None;
    }

    /// Button entry point: advance to the next pattern, or start the
    /// first one when none is running.
    pub fn cycle_pattern(&mut self, now: Instant) {
        let next = match &self.pattern {
            Some(run) => run.id.next(),
            None => PatternId::ChannelId,
        };
        self.start_pattern(next as u8, now);
    }

    /// Advance the diagnostic display by one animation tick if one is
    /// due. Renders, limits and flushes every non-idle channel through
    /// the same path the decoder uses.
    pub fn tick_pattern(&mut self, now: Instant) {
        let Some(run) = self.pattern.as_mut() else {
            return;
        };
        if !run.ticker.poll(now) {
            return;
        }
        run.frame = run.frame.wrapping_add(1);
        let frame = run.frame;
        let run = &*run;

        for index in 0..NUM_CHANNELS {
            let channel = &mut self.channels[index];
            let count = usize::from(channel.led_count());
            if count == 0 {
                continue;
            }
            let leds = &mut self.scratch[..count];
            run.slot.render(frame, index as u8, leds);
            for (i, led) in leds.iter().enumerate() {
                channel.write_word(i, self.pipeline.encode(*led));
            }
            Self::finish_frame(channel, &self.limiter, &mut self.engine, &mut self.stats, true);
        }
    }

    /// Start the channel-id pattern after prolonged serial silence in
    /// normal mode.
    pub fn check_timeout(&mut self, now: Instant) {
        if self.pattern.is_some() {
            return;
        }
        let deadline = self.last_rx.as_millis() + self.config.pattern_timeout.as_millis();
        if now.as_millis() > deadline {
            diag!("serial idle, starting diagnostic pattern");
            self.start_pattern(PatternId::ChannelId as u8, now);
        }
    }

    /// Reset entry point for the button collaborator; the protocol's
    /// reset command lands on the same flag.
    pub fn request_reset(&mut self) {
        self.reset_pending = true;
    }

    pub fn reset_requested(&self) -> bool {
        self.reset_pending
    }

    /// Consume a pending reset request. The watchdog collaborator polls
    /// this and performs the actual reboot.
    pub fn take_reset_request(&mut self) -> bool {
        core::mem::take(&mut self.reset_pending)
    }

    pub fn mode(&self) -> SystemMode {
        if self.pattern.is_some() {
            SystemMode::TestPattern
        } else {
            SystemMode::Normal
        }
    }

    pub fn pattern_id(&self) -> Option<PatternId> {
        self.pattern.as_ref().map(|run| run.id)
    }

    /// When the running pattern was activated.
    pub fn pattern_started(&self) -> Option<Instant> {
        self.pattern.as_ref().map(|run| run.started)
    }

    pub fn stats(&self) -> Statistics {
        self.stats
    }

    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    pub fn channel(&self, index: usize) -> &Channel {
        &self.channels[index]
    }

    /// Mutable channel access for the fault-monitor collaborator (trip
    /// flag and counter live on the channel).
    pub fn channel_mut(&mut self, index: usize) -> &mut Channel {
        &mut self.channels[index]
    }

    pub fn engine(&self) -> &T {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut T {
        &mut self.engine
    }

    /// Read-only snapshot for the status/report collaborator.
    pub fn snapshot(&self) -> StatusSnapshot {
        let mut channels = [ChannelReport::default(); NUM_CHANNELS];
        for (report, channel) in channels.iter_mut().zip(&self.channels) {
            *report = ChannelReport {
                led_count: channel.led_count(),
                tripped: channel.is_tripped(),
                trip_count: channel.trip_count(),
                limit_events: channel.limit_events(),
            };
        }
        StatusSnapshot {
            stats: self.stats,
            mode: self.mode(),
            pattern: self.pattern_id(),
            channels,
        }
    }
}
