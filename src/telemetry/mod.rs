pub mod config;
pub mod ctx;
pub mod emit;
pub mod ops;

use ctx::LogCtx;

pub fn poll() -> LogCtx<ops::poll::Poll> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
pub fn watch() -> LogCtx<ops::watch::Watch> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
