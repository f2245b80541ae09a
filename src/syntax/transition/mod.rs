use std::error;
use std::fmt;

pub use self::arc_standard::*;

mod arc_standard;

use syntax::Arc;

/// A parser action over a stack and a buffer.
///
/// `Done` is the terminal marker recorded when the root's self arc is
/// attached at the end of a derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Shift,
    ReduceLeft,
    ReduceRight,
    Done,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Action::Shift => "shift",
            Action::ReduceLeft => "reduce-left",
            Action::ReduceRight => "reduce-right",
            Action::Done => "done",
        }
    }

    /// Whether the action attaches an arc.
    pub fn is_reduce(&self) -> bool {
        match *self {
            Action::Shift => false,
            _ => true,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An action sequence together with the arcs it attaches, in attachment
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    pub actions: Vec<Action>,
    pub arcs: Vec<Arc>,
}

#[derive(Debug)]
pub enum Error {
    /// The oracle consumed all tokens without attaching every gold arc.
    IncompleteDerivation { stack_size: usize },
    /// An action sequence popped an empty stack during replay.
    EmptyStack,
    /// An action sequence read an exhausted buffer during replay.
    EmptyBuffer,
}

impl Error {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Error::IncompleteDerivation { .. } => "the gold tree is not derivable",
            Error::EmptyStack => "the stack is empty",
            Error::EmptyBuffer => "the buffer is empty",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::IncompleteDerivation { stack_size } => {
                write!(
                    f,
                    "the gold tree is not derivable ({} items left on the stack)",
                    stack_size
                )
            }
            _ => write!(f, "{}", self.as_str()),
        }
    }
}

impl error::Error for Error {
    fn description(&self) -> &str {
        self.as_str()
    }

    fn cause(&self) -> Option<&error::Error> {
        None
    }
}
