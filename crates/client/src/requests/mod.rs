//! Typed wrappers around individual backend calls.
//!
//! Each wrapper borrows the [`ClientProvider`](crate::ClientProvider) and
//! reads its transport when a call is issued, never earlier.

mod auth;
mod discord;

pub use auth::{AuthRequests, REFRESH_TOKEN_HEADER, TOKEN_HEADER};
pub use discord::DiscordRequests;
