pub mod sample;
pub mod tariff;

pub use sample::*;
pub use tariff::*;
