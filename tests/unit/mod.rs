//! Unit tests over the public library API

mod export;
mod schema;
mod storm;
