/// Adapters - implementations of the port traits
///
/// These modules implement the ports against concrete external services.
pub mod notion;
pub mod services;
