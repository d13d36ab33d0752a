// Library root for the draft recommendation engine and its data model.

pub mod config;
pub mod draft;
pub mod engine;
pub mod league;
pub mod player;
pub mod scoring;

#[cfg(test)]
pub(crate) mod test_fixtures;
