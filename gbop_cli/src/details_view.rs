use std::fmt;
use std::fmt::{Display, Formatter};
use gbop_core::Instruction;

const NO_DESCRIPTION: &str = "Coming Soon";

pub struct DetailsView<'a>(pub &'a Instruction);

impl Display for DetailsView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let instruction = self.0;

        writeln!(f, "{}", instruction.mnemonic())?;
        writeln!(f, "Opcode: 0x{}", instruction.op_code())?;
        writeln!(f, "Number of Bytes: {}", instruction.bytes())?;
        writeln!(f, "Number of Cycles: {}", instruction.cycles())?;
        writeln!(f, "Flags: {}", instruction.flags().summary())?;
        writeln!(f)?;
        writeln!(f, "Description")?;
        writeln!(f, "{}", instruction.description().unwrap_or(NO_DESCRIPTION))
    }
}

pub fn render_details(instruction: &Instruction) -> String {
    DetailsView(instruction).to_string()
}
