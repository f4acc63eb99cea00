pub mod decoder;

pub use decoder::{Decoded, decode};
