pub mod inference;

pub use inference::{ChatRequest, InferenceClient};
