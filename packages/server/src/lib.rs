// Partyline - API Core
//
// Backend for a phone-first party invitation app. Members sign in with an
// SMS one-time code, create parties with photos, and see the parties they
// host or are invited to.
//
// Domain logic lives in domains/, infrastructure seams in kernel/, and the
// HTTP surface in server/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
