use backend_domain::{current_millis, Clock};

/// Wall-clock implementation of the clock port.
#[derive(Debug, Default, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        current_millis()
    }
}
