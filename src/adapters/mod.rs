// Adapters layer: concrete implementations for external systems (remote API, output sinks).

pub mod sink;
pub mod tomba;

pub use sink::StorageSink;
pub use tomba::TombaClient;
