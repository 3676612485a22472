//! Text-to-Speech

mod backend;
mod edge;

pub use backend::TtsBackend;
pub use edge::EdgeTts;
