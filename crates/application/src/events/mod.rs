pub mod emitter;
pub mod types;

pub use emitter::ResolutionEventEmitter;
pub use types::{ResolutionEvent, ResolutionPath};
