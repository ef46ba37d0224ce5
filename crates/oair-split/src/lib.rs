pub mod generator;

pub use generator::{JsonSplitGenerator, SplitError, to_stable_json};
