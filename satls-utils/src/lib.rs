mod hash;
pub use hash::*;
mod json;
pub use json::*;
mod seeds;
pub use seeds::*;
