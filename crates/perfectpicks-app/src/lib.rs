// Draft session glue, simulated opponents and the event loop behind the
// `perfectpicks` binary.

pub mod app;
pub mod bot;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;
