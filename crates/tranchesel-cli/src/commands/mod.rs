pub mod pattern;
pub mod select;
