//! Service layer: the operations exposed by this crate.

pub mod environment;
pub mod health;
pub mod info;
pub mod normalizer;

pub use environment::spec_from_env;
pub use health::HealthChecker;
pub use info::InfoReporter;
pub use normalizer::SpecNormalizer;
