use log::{debug, warn};
use crate::instruction::Instruction;
use crate::op_code::{address_to_cell, GridLocation, Namespace, GRID_SIZE};

pub const NUM_GRIDS: usize = 2;

/// 16x16 cells indexed by the high (row) and low (column) nibble of an opcode.
#[derive(Debug, Clone)]
pub struct OpCodeGrid<'a> {
    cells: [[Option<&'a Instruction>; GRID_SIZE]; GRID_SIZE],
}

impl<'a> Default for OpCodeGrid<'a> {
    fn default() -> Self {
        OpCodeGrid { cells: [[None; GRID_SIZE]; GRID_SIZE] }
    }
}

impl<'a> OpCodeGrid<'a> {
    pub fn cell(&self, row: usize, column: usize) -> Option<&'a Instruction> {
        self.cells.get(row)?.get(column).copied().flatten()
    }

    /// Rows in reading order.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<&'a Instruction>; GRID_SIZE]> {
        self.cells.iter()
    }

    pub fn occupied(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_some()).count()
    }

    fn set(&mut self, row: usize, column: usize, instruction: &'a Instruction) -> Option<&'a Instruction> {
        self.cells[row][column].replace(instruction)
    }
}

/// The primary and `CB` grids, borrowed from a catalog.
#[derive(Debug, Clone, Default)]
pub struct OpCodeGrids<'a> {
    grids: [OpCodeGrid<'a>; NUM_GRIDS],
}

impl<'a> OpCodeGrids<'a> {
    /// Places every instruction at the cell of its opcode. Records without a
    /// placement are skipped; a later record landing on an occupied cell wins.
    pub fn build(instructions: &'a [Instruction]) -> OpCodeGrids<'a> {
        let mut grids = OpCodeGrids::default();

        for instruction in instructions {
            let Some(location) = address_to_cell(instruction.op_code()) else {
                warn!("grid: no placement for opcode {:?}, skipped", instruction.op_code());
                continue;
            };

            if let Some(previous) = grids.grids[location.grid].set(location.row, location.column, instruction) {
                warn!("grid: {} overwrites {} at {:?}", instruction, previous, location);
            }
        }

        debug!(
            "grid: {} primary cells, {} extended cells occupied",
            grids.grids[0].occupied(),
            grids.grids[1].occupied()
        );

        grids
    }

    pub fn grid(&self, namespace: Namespace) -> &OpCodeGrid<'a> {
        &self.grids[namespace.grid_index()]
    }

    pub fn get(&self, location: GridLocation) -> Option<&'a Instruction> {
        self.grids.get(location.grid)?.cell(location.row, location.column)
    }

    /// Cell to highlight for a selected opcode, if it has a placement.
    pub fn locate(&self, op_code: &str) -> Option<GridLocation> {
        address_to_cell(op_code)
    }

    pub fn lookup(&self, op_code: &str) -> Option<&'a Instruction> {
        self.get(self.locate(op_code)?)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Namespace, &OpCodeGrid<'a>)> {
        self.grids
            .iter()
            .enumerate()
            .filter_map(|(index, grid)| Namespace::from_grid_index(index).map(|namespace| (namespace, grid)))
    }
}
