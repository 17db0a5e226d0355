mod cs;

pub mod emitter;
pub mod error;
pub mod import;
pub mod model;

pub use emitter::{Emitter, EmitterRegistry};
pub use error::Error;
pub use import::{import, ImportOptions, ImportWarning};
pub use model::{CodeUnit, ImportStyle, Protocol};
