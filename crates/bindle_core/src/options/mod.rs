mod input_options;
pub use input_options::*;
