mod demo;
mod fuzz;
mod run;

pub use demo::*;
pub use fuzz::*;
pub use run::*;
