//! Client for the homework status API.

mod client;

pub use client::{PracticumClient, StatusApi};

#[cfg(test)]
pub use client::MockStatusApi;
