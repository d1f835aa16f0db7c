//! Shared helpers for the integration tests.

#![allow(dead_code)]

use embassy_time::Instant;
use octostrip::{Bridge, BridgeConfig, TransferEngine};

/// Transfer engine that records every started transfer. A channel stays
/// busy until `wait_complete` is observed, which counts as one wait.
#[derive(Default)]
pub struct MockEngine {
    pub transfers: Vec<(u8, Vec<u32>)>,
    pub busy: [bool; 8],
    pub waits: u32,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Words of the most recent transfer on `channel`.
    pub fn last_words(&self, channel: u8) -> Option<&[u32]> {
        self.transfers
            .iter()
            .rev()
            .find(|(ch, _)| *ch == channel)
            .map(|(_, words)| words.as_slice())
    }
}

impl TransferEngine for MockEngine {
    fn start(&mut self, channel: u8, words: &[u32]) {
        self.busy[usize::from(channel)] = true;
        self.transfers.push((channel, words.to_vec()));
    }

    fn is_complete(&self, channel: u8) -> bool {
        !self.busy[usize::from(channel)]
    }

    fn wait_complete(&mut self, channel: u8) {
        self.waits += 1;
        self.busy[usize::from(channel)] = false;
    }
}

pub fn t(ms: u64) -> Instant {
    Instant::from_millis(ms)
}

/// Bridge with the reference configuration (gamma 2.8, 30 000-unit limit).
pub fn bridge() -> Bridge<MockEngine> {
    Bridge::new(MockEngine::new(), BridgeConfig::default(), t(0))
}

/// Bridge with identity gamma and no current limit, so stored words can
/// be compared against hand-packed colors.
pub fn raw_bridge() -> Bridge<MockEngine> {
    let config = BridgeConfig {
        gamma: None,
        current_limit: None,
        ..BridgeConfig::default()
    };
    Bridge::new(MockEngine::new(), config, t(0))
}
