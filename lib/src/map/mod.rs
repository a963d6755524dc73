mod interval_map;

pub use interval_map::*;
