pub mod lines;
pub mod validation;

pub use lines::{affected_lines, collinear_axis, is_valid_line, MAX_LINE_LENGTH};
pub use validation::validate;
