pub mod numeric;

pub use numeric::{extract_amounts, extract_percentages};
