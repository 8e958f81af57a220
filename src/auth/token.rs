//! Access token secrets and raw token endpoint responses.

pub mod response;
pub mod secret;
