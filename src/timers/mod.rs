//! Wall clock timing of the factorization phases.

use std::collections::HashMap;

cfg_if::cfg_if! {
    if #[cfg(target_family = "wasm")] {
        use web_time::{Duration, Instant};
    } else {
        use std::time::{Duration, Instant};
    }
}

#[derive(Debug, Default)]
pub(crate) struct Timers {
    elapsed: HashMap<&'static str, Duration>,
    active: Option<(&'static str, Instant)>,
}

impl Timers {
    pub fn reset(&mut self) {
        self.elapsed.clear();
        self.active = None;
    }

    // starts the timer with name "key".  Only one
    // timer is active at a time, since phases don't nest
    pub fn start(&mut self, key: &'static str) {
        debug_assert!(self.active.is_none());
        self.active = Some((key, Instant::now()));
    }

    pub fn stop(&mut self) {
        if let Some((key, start)) = self.active.take() {
            *self.elapsed.entry(key).or_default() += start.elapsed();
        }
    }

    pub fn elapsed(&self, key: &'static str) -> Duration {
        self.elapsed.get(key).copied().unwrap_or_default()
    }
}

macro_rules! timeit {
    ($timer:ident => $key:literal; $($tt:tt)+) => {
        $timer.start($key);
        $(
            $tt
        )+
        $timer.stop();
    }
}
pub(crate) use timeit;

#[test]
fn test_timers() {
    let mut timers = Timers::default();
    let mut x = 0;
    timeit! {timers => "count"; for i in 0..100 { x += i; } }
    assert_eq!(x, 4950);
    assert!(timers.active.is_none());
    assert_eq!(timers.elapsed("missing"), Duration::ZERO);

    // repeated runs accumulate
    let first = timers.elapsed("count");
    timeit! {timers => "count"; x += 1; }
    assert_eq!(x, 4951);
    assert!(timers.elapsed("count") >= first);

    timers.reset();
    assert_eq!(timers.elapsed("count"), Duration::ZERO);
}
