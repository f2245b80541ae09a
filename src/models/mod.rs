pub use self::biaffine::*;
pub use self::linear::*;

mod biaffine;
mod linear;
