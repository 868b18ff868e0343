//! Collection of generic internal data types and the hashing rules shared by
//! the batch commitment and payload sealing crates.

pub mod buf;
pub mod errors;
pub mod hash;
