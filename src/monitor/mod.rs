pub mod engine;

pub use engine::{AlertState, Evaluation, Monitor};
