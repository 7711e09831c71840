use std::fmt;
use std::fmt::{Display, Formatter};
use gbop_core::instruction::Instruction;
use gbop_core::op_code::GRID_SIZE;
use gbop_core::{GridLocation, MatchSet, Namespace, OpCodeGrid};
use crate::view_config::ViewConfig;

const CELL_WIDTH: usize = 13;
const HEADER_WIDTH: usize = 5;
const CELL_LINES: usize = 3;

pub fn caption(namespace: Namespace) -> &'static str {
    match namespace {
        Namespace::Primary => "8-bit opcodes",
        Namespace::Extended => "16-bit opcodes (0xCB prefix)",
    }
}

fn cell_lines(instruction: &Instruction, is_match: bool) -> [String; CELL_LINES] {
    let marker = if is_match { "*" } else { "" };

    [
        format!("{}{}", marker, instruction.mnemonic()),
        format!("{} {}", instruction.bytes(), instruction.cycles()),
        instruction.flags().cell_summary(),
    ]
}

fn header(label: String, active: bool) -> String {
    if active { format!("[{}]", label) } else { label }
}

/// One 16x16 grid as text. A matching cell is prefixed with `*`; the row and
/// column headers of the active cell are bracketed.
pub struct TableView<'a, 'g> {
    grid: &'a OpCodeGrid<'g>,
    namespace: Namespace,
    match_set: Option<&'a MatchSet>,
    active: Option<GridLocation>,
    config: &'a ViewConfig,
}

impl<'a, 'g> TableView<'a, 'g> {
    pub fn new(
        grid: &'a OpCodeGrid<'g>,
        namespace: Namespace,
        match_set: Option<&'a MatchSet>,
        active: Option<GridLocation>,
        config: &'a ViewConfig,
    ) -> Self {
        let active = active.filter(|location| location.grid == namespace.grid_index());
        TableView { grid, namespace, match_set, active, config }
    }

    fn cell(&self, cell: &Option<&Instruction>) -> [String; CELL_LINES] {
        let Some(instruction) = cell else {
            return Default::default();
        };

        let is_match = self.match_set.map(|set| set.contains(instruction.op_code())).unwrap_or(false);
        if self.config.hide_non_matches && self.match_set.is_some() && !is_match {
            Default::default()
        } else {
            cell_lines(instruction, is_match)
        }
    }
}

impl Display for TableView<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", caption(self.namespace))?;

        let mut columns = format!("{:<width$}", "", width = HEADER_WIDTH);
        for column in 0..GRID_SIZE {
            let label = header(format!("x{:X}", column), self.active.map(|a| a.column) == Some(column));
            columns.push_str(&format!("{:<width$}", label, width = CELL_WIDTH));
        }
        writeln!(f, "{}", columns.trim_end())?;

        for (row, cells) in self.grid.rows().enumerate() {
            let lines: Vec<[String; CELL_LINES]> = cells.iter().map(|cell| self.cell(cell)).collect();

            for line in 0..CELL_LINES {
                let label = if line == 0 {
                    header(format!("{:X}x", row), self.active.map(|a| a.row) == Some(row))
                } else {
                    String::new()
                };
                let mut text = format!("{:<width$}", label, width = HEADER_WIDTH);

                for cell in &lines {
                    text.push_str(&format!("{:<width$}", cell[line], width = CELL_WIDTH));
                }

                writeln!(f, "{}", text.trim_end())?;
            }
        }

        Ok(())
    }
}

pub fn render_table(
    grid: &OpCodeGrid,
    namespace: Namespace,
    match_set: Option<&MatchSet>,
    active: Option<GridLocation>,
    config: &ViewConfig,
) -> String {
    TableView::new(grid, namespace, match_set, active, config).to_string()
}
