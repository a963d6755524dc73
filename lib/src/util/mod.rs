pub mod io;
pub mod parse;
