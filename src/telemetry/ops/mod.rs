pub mod poll;
pub mod watch;
