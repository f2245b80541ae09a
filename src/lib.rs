extern crate chrono;
extern crate csv;
extern crate pbr;
extern crate rand;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;
#[macro_use]
extern crate slog;
extern crate slog_async;
extern crate slog_term;

#[cfg(feature = "models")]
#[macro_use]
extern crate primitiv;

pub mod dataset;
pub mod io;
pub mod lang;
pub mod logging;
#[cfg(feature = "models")]
pub mod models;
pub mod preprocessing;
pub mod syntax;
