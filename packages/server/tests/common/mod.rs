// Shared test infrastructure

pub mod fixtures;
pub mod harness;

pub use harness::TestHarness;
