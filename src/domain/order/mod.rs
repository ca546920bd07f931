//! Order domain — placement requests and recorded orders.
//!
//! Orders are recorded by the backend, not matched against a book; the SDK
//! only submits and lists them. Order state has no coupling to the feed
//! engine's quote state.

pub mod client;
pub mod wire;

pub use wire::{NewOrder, Order};
