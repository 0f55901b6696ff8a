pub mod style;
pub mod surface;
