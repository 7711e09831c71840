pub mod instruction;
pub mod op_code;
pub mod catalog;
pub mod op_code_grid;
pub mod instruction_search;
#[cfg(test)]
mod tests;

pub use catalog::{Catalog, CatalogError};
pub use instruction::{Flags, FlagEffect, Instruction, InstructionType};
pub use op_code::{address_to_cell, parse_address, GridLocation, Namespace, OpCodeAddress};
pub use op_code_grid::{OpCodeGrid, OpCodeGrids};
pub use instruction_search::{matches, search, MatchSet, SearchQuery};
