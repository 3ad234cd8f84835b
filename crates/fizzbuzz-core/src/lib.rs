pub mod sequence;
pub mod types;

pub use sequence::generate;
pub use types::FizzBuzzParams;
