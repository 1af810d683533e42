/// Clock port. Injected so the throttle window and persisted timestamps
/// are testable without wall-clock delay.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}
