//! Change notification hub
//!
//! Stores publish a [`RefreshType`](crate::models::RefreshType) on the
//! [`RefreshBus`] after every successful mutation. Subscribers (report views,
//! caches) re-read whatever they display when notified. The bus is an
//! ordinary value owned by the application context; each session or test
//! constructs its own.

mod bus;

pub use bus::{RefreshBus, RefreshListener};
