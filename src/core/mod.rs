pub mod color_map;
pub mod file_io;
pub mod grid;
pub mod histogram;
pub mod interpolation;
pub mod lookup_table;
pub mod stopwatch;
