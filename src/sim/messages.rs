//! Message priority arbiter
//!
//! Four banner channels share one slot on screen. A request either wins the
//! slot (zeroing every lower channel) or is dropped because a higher channel
//! is still showing. Nothing is queued.

use serde::{Deserialize, Serialize};

/// Banner channels, declared lowest priority first so `Ord` follows priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Channel {
    Milestone,
    Goal,
    Card,
    HighScore,
}

impl Channel {
    /// Highest priority first
    pub const BY_PRIORITY: [Channel; 4] = [
        Channel::HighScore,
        Channel::Card,
        Channel::Goal,
        Channel::Milestone,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Banner {
    pub text: String,
    pub remaining: f32,
    /// Full display time, for scale/fade animation
    pub duration: f32,
}

impl Banner {
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    fn clear(&mut self) {
        self.text.clear();
        self.remaining = 0.0;
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageArbiter {
    banners: [Banner; 4],
}

impl MessageArbiter {
    /// Show `text` on `channel` unless a higher channel is active.
    /// Returns whether the banner was accepted.
    pub fn request(&mut self, channel: Channel, text: impl Into<String>, duration: f32) -> bool {
        if self.is_blocked(channel) {
            return false;
        }
        for lower in Channel::BY_PRIORITY.iter().filter(|c| **c < channel) {
            self.banners[lower.index()].clear();
        }
        let banner = &mut self.banners[channel.index()];
        banner.text = text.into();
        banner.remaining = duration;
        banner.duration = duration;
        true
    }

    /// True if any higher-priority channel is showing
    pub fn is_blocked(&self, channel: Channel) -> bool {
        Channel::BY_PRIORITY
            .iter()
            .filter(|c| **c > channel)
            .any(|c| self.banners[c.index()].is_active())
    }

    pub fn tick(&mut self, dt: f32) {
        for banner in &mut self.banners {
            if banner.is_active() {
                banner.remaining -= dt;
                if banner.remaining <= 0.0 {
                    banner.clear();
                }
            }
        }
    }

    /// The banner on screen, if any
    pub fn visible(&self) -> Option<(Channel, &Banner)> {
        Channel::BY_PRIORITY
            .iter()
            .map(|c| (*c, &self.banners[c.index()]))
            .find(|(_, b)| b.is_active())
    }

    pub fn banner(&self, channel: Channel) -> &Banner {
        &self.banners[channel.index()]
    }

    pub fn remaining(&self, channel: Channel) -> f32 {
        self.banners[channel.index()].remaining
    }

    pub fn active_count(&self) -> usize {
        self.banners.iter().filter(|b| b.is_active()).count()
    }

    pub fn clear_all(&mut self) {
        for banner in &mut self.banners {
            banner.clear();
        }
    }
}
