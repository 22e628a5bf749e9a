//! Binary class file structures
//!
//! Only the pieces that method bodies reference are modelled here: the constants pool that
//! instructions index into, and the class file version that decides which constants can be
//! loaded.

mod constants;
mod serialize;
mod version;

pub use constants::*;
pub use serialize::*;
pub use version::*;
