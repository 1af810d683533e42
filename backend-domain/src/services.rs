// Pure domain services
// No storage access: every function here maps inputs to outputs so the
// core rules stay unit-testable without infrastructure.

pub mod clustering;
pub mod dedupe;
pub mod fingerprint;
pub mod promotion;

pub use clustering::*;
pub use dedupe::*;
pub use fingerprint::*;
pub use promotion::*;
