pub mod error;
pub mod runner;
pub mod state;

pub use crate::replacer::ReplaceError;
pub use error::DocumentError;
pub use runner::{DocumentPipeline, CODE_FENCE};
pub use state::ParserState;
