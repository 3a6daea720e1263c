//! Millisecond time sources for tap timestamps

use std::cell::Cell;
use std::rc::Rc;

/// Monotonic-enough millisecond clock
pub trait TimeSource {
    fn now_ms(&self) -> u64;
}

/// Real time: `Date.now()` in the browser, `Instant` since creation natively
#[derive(Debug, Clone)]
pub struct WallTime {
    #[cfg(not(target_arch = "wasm32"))]
    origin: std::time::Instant,
}

impl Default for WallTime {
    fn default() -> Self {
        Self::new()
    }
}

impl WallTime {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            origin: std::time::Instant::now(),
        }
    }
}

impl TimeSource for WallTime {
    #[cfg(target_arch = "wasm32")]
    fn now_ms(&self) -> u64 {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Hand-advanced clock (demo mode and tests); clones share the same time
#[derive(Debug, Clone, Default)]
pub struct ManualTime {
    now: Rc<Cell<u64>>,
}

impl ManualTime {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl TimeSource for ManualTime {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_time_shared() {
        let time = ManualTime::new(100);
        let view = time.clone();
        time.advance(250);
        assert_eq!(view.now_ms(), 350);
        view.set(5);
        assert_eq!(time.now_ms(), 5);
    }

    #[test]
    fn test_wall_time_monotonic() {
        let time = WallTime::new();
        let a = time.now_ms();
        let b = time.now_ms();
        assert!(b >= a);
    }
}
