// src/display/presenter.rs

//! The seam between the event loop and whatever draws the feed.

use super::motion::{self, GeoTracker};
use crate::core::FeedState;
use crate::server::LoopStats;
use tracing::info;

/// Called by the event loop once per tick.
///
/// The presenter may move and expire display items; the target coordinates
/// are read-only from its side.
pub trait Presenter {
    fn tick(&mut self, feed: &mut FeedState, stats: &LoopStats);
}

impl<F> Presenter for F
where
    F: FnMut(&mut FeedState, &LoopStats),
{
    fn tick(&mut self, feed: &mut FeedState, stats: &LoopStats) {
        self(feed, stats)
    }
}

/// Runs the motion model without drawing anything and periodically logs
/// what a renderer would show.
#[derive(Debug, Default)]
pub struct HeadlessPresenter {
    geo: GeoTracker,
    log_every: u64,
    expired: u64,
}

impl HeadlessPresenter {
    pub fn new(log_every: u64) -> Self {
        Self {
            log_every,
            ..Self::default()
        }
    }

    pub fn geo(&self) -> &GeoTracker {
        &self.geo
    }

    /// Items that scrolled off the canvas since startup.
    pub fn expired(&self) -> u64 {
        self.expired
    }
}

impl Presenter for HeadlessPresenter {
    fn tick(&mut self, feed: &mut FeedState, stats: &LoopStats) {
        for item in feed.items_mut().iter_mut().filter(|item| !item.measured) {
            item.width = motion::estimate_width(item);
            item.measured = true;
        }
        self.expired += motion::advance_items(feed.items_mut()) as u64;

        let target = feed.target();
        let shown = self.geo.step(target);

        if self.log_every > 0 && stats.ticks % self.log_every == 0 {
            let (x, y) = motion::project(shown, feed.canvas());
            info!(
                "tick {}: {} connection(s), {} live item(s), {} expired, cursor ({:.3}, {:.3}) at ({:.0}, {:.0}){}",
                stats.ticks,
                stats.open_connections,
                feed.live_items(),
                self.expired,
                shown.lat,
                shown.lon,
                x,
                y,
                if self.geo.is_locked(target) { ", locked" } else { "" }
            );
        }
    }
}
