//! NHL API integration: payload models, HTTP client, and the power-play
//! reconstruction that runs over fetched play-by-play logs.

pub mod http;
pub mod pp;
pub mod types;
