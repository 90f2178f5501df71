mod lint;
mod load;
mod types;

pub use lint::*;
pub use load::*;
pub use types::*;
