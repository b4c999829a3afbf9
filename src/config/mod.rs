mod model;

pub use model::{CheckerConfig, DEFAULT_TARGET_VERSION, Options};

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
