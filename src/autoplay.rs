//! Demo/attract mode: a simple auto-popper
//!
//! Goes for whichever visible balloon is closest to escaping, preferring the
//! more valuable one when two are level.

use crate::sim::Balloon;

#[derive(Debug, Clone, Copy)]
pub struct AutoPopper {
    /// Taps attempted between two ticks
    pub taps_per_tick: usize,
    /// Delay between consecutive taps (ms); under the combo window keeps combos alive
    pub reaction_ms: u64,
}

impl Default for AutoPopper {
    fn default() -> Self {
        Self {
            taps_per_tick: 2,
            reaction_ms: 350,
        }
    }
}

impl AutoPopper {
    /// Balloon ids to tap this tick, most urgent first
    pub fn targets(&self, balloons: &[Balloon]) -> Vec<u32> {
        let mut visible: Vec<&Balloon> = balloons.iter().filter(|b| b.is_visible()).collect();
        visible.sort_by(|a, b| {
            a.pos
                .y
                .total_cmp(&b.pos.y)
                .then_with(|| b.base_points().cmp(&a.base_points()))
                .then_with(|| a.id.cmp(&b.id))
        });
        visible
            .into_iter()
            .take(self.taps_per_tick)
            .map(|b| b.id)
            .collect()
    }
}
