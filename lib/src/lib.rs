pub mod check;
pub mod map;
pub mod script;
pub mod util;
