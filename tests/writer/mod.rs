//! Write-back tests
//!
//! Text produced by applying changes:
//! - Untouched text survives byte for byte
//! - Missing blocks are written out, dotted statements stay dotted
//! - Moves and indentation options

pub mod tests_round_trip;
pub mod tests_structure;
