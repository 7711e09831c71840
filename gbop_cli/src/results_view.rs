use std::fmt;
use std::fmt::{Display, Formatter};
use gbop_core::instruction_search::match_count_label;
use gbop_core::Instruction;
use crate::browser_error::BrowserError;
use crate::view_config::ViewConfig;

/// Count header, then one `0xOPCODE  MNEMONIC` line per shown match.
pub struct ResultsView<'a> {
    matches: &'a [&'a Instruction],
    limit: usize,
}

impl<'a> ResultsView<'a> {
    pub fn new(matches: &'a [&'a Instruction], config: &ViewConfig) -> Self {
        ResultsView { matches, limit: config.result_limit }
    }
}

impl Display for ResultsView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", match_count_label(self.matches.len()))?;

        if self.matches.is_empty() {
            return writeln!(f, "No matches.");
        }

        for instruction in self.matches.iter().take(self.limit) {
            writeln!(f, "0x{:<6}{}", instruction.op_code().to_uppercase(), instruction.mnemonic())?;
        }

        Ok(())
    }
}

pub fn render_results(matches: &[&Instruction], config: &ViewConfig) -> String {
    ResultsView::new(matches, config).to_string()
}

pub fn render_results_json(matches: &[&Instruction], config: &ViewConfig) -> Result<String, BrowserError> {
    let shown: Vec<&Instruction> = matches.iter().take(config.result_limit).copied().collect();
    let mut json = serde_json::to_string_pretty(&shown)?;
    json.push('\n');

    Ok(json)
}
