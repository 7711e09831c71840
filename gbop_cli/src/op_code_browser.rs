use log::{debug, info};
use gbop_core::{search, Catalog, GridLocation, Instruction, MatchSet, Namespace, OpCodeAddress, OpCodeGrids};
use crate::browser_error::BrowserError;
use crate::details_view::render_details;
use crate::results_view::{render_results, render_results_json};
use crate::table_view::render_table;
use crate::view_config::ViewConfig;

/// Front end over a catalog and its grids: the tables, the search results
/// list and the details panel, each rendered to text.
pub struct OpCodeBrowser<'a> {
    catalog: &'a Catalog,
    grids: OpCodeGrids<'a>,
    config: ViewConfig,
}

impl<'a> OpCodeBrowser<'a> {
    pub fn new(catalog: &'a Catalog, config: ViewConfig) -> Self {
        let grids = OpCodeGrids::build(catalog.instructions());
        info!("browser ready: {} instructions", catalog.len());

        OpCodeBrowser { catalog, grids, config }
    }

    /// Active cell for a selected opcode; unknown or malformed text highlights nothing.
    pub fn selection(&self, op_code: Option<&str>) -> Option<GridLocation> {
        let instruction = self.catalog.find(op_code?)?;
        self.grids.locate(instruction.op_code())
    }

    pub fn tables(&self, namespaces: &[Namespace], query: Option<&str>, selected: Option<&str>) -> String {
        let match_set = query.and_then(|query| MatchSet::for_query(self.catalog.instructions(), query));
        let active = self.selection(selected);
        debug!("tables: match set {:?} entries, active cell {:?}", match_set.as_ref().map(|set| set.len()), active);

        namespaces
            .iter()
            .map(|&namespace| render_table(self.grids.grid(namespace), namespace, match_set.as_ref(), active, &self.config))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn matches(&self, query: &str) -> Vec<&'a Instruction> {
        search(self.catalog.instructions(), query)
    }

    pub fn results(&self, query: &str, json: bool) -> Result<String, BrowserError> {
        let matches = self.matches(query);

        if json {
            render_results_json(&matches, &self.config)
        } else {
            Ok(render_results(&matches, &self.config))
        }
    }

    pub fn resolve(&self, op_code: Option<&str>, byte: Option<u8>, extended: bool) -> Result<&'a Instruction, BrowserError> {
        match (op_code, byte) {
            (Some(text), _) => self
                .catalog
                .find(text)
                .ok_or_else(|| BrowserError::UnknownOpCode(text.to_owned())),
            (None, Some(value)) => {
                let namespace = if extended { Namespace::Extended } else { Namespace::Primary };
                let address = OpCodeAddress::new(namespace, value);
                self.catalog
                    .get(address)
                    .ok_or_else(|| BrowserError::UnknownOpCode(address.to_string()))
            }
            (None, None) => Err(BrowserError::MissingOpCode),
        }
    }

    pub fn details(&self, op_code: Option<&str>, byte: Option<u8>, extended: bool) -> Result<String, BrowserError> {
        let instruction = self.resolve(op_code, byte, extended)?;
        Ok(render_details(instruction))
    }
}
