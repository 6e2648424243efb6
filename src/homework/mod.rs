//! Pure pieces of the poll loop: payload validation, verdict lookup and
//! change detection. Nothing in here touches the network or the clock.

pub mod dedup;
pub mod types;
pub mod validate;
pub mod verdict;

pub use dedup::should_notify;
pub use validate::validate;
pub use verdict::interpret;
