use std::collections::HashSet;
use log::trace;
use crate::instruction::Instruction;
use crate::op_code::parse_address;

fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

fn normalize_op_code_query(normalized: &str) -> &str {
    normalized.strip_prefix("0x").unwrap_or(normalized)
}

fn haystack(instruction: &Instruction) -> String {
    [instruction.mnemonic(), instruction.op_code(), instruction.type_tag()]
        .iter()
        .filter(|field| !field.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// A prepared query: the whitespace terms and the opcode form (leading `0x` stripped).
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    normalized: String,
    terms: Vec<String>,
}

impl SearchQuery {
    pub fn new(query: &str) -> Self {
        let normalized = normalize_query(query);
        let terms = normalized.split_whitespace().map(str::to_owned).collect();

        SearchQuery { normalized, terms }
    }

    /// A blank query applies no filter.
    pub fn is_blank(&self) -> bool {
        self.normalized.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn op_code_term(&self) -> &str {
        normalize_op_code_query(&self.normalized)
    }

    fn matches_terms(&self, instruction: &Instruction) -> bool {
        let haystack = haystack(instruction);
        self.terms.iter().all(|term| haystack.contains(term.as_str()))
    }

    fn matches_op_code(&self, instruction: &Instruction) -> bool {
        let term = self.op_code_term();
        !term.is_empty() && instruction.op_code().to_lowercase().contains(term)
    }

    pub fn matches(&self, instruction: &Instruction) -> bool {
        if self.is_blank() {
            return true;
        }

        self.matches_terms(instruction) || self.matches_op_code(instruction)
    }
}

pub fn matches(instruction: &Instruction, query: &str) -> bool {
    SearchQuery::new(query).matches(instruction)
}

/// Matching instructions in address order (primary before `CB`, ascending value).
pub fn search<'a>(instructions: &'a [Instruction], query: &str) -> Vec<&'a Instruction> {
    let query = SearchQuery::new(query);

    let mut found: Vec<&Instruction> = instructions
        .iter()
        .filter(|instruction| query.matches(instruction))
        .collect();
    sort_by_address(&mut found);

    trace!("search: {:?} -> {} matches", query.normalized, found.len());
    found
}

pub fn sort_by_address(instructions: &mut [&Instruction]) {
    instructions.sort_by_key(|instruction| parse_address(instruction.op_code()));
}

/// Lower-cased opcodes of a match list, for flagging cells while a query is active.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchSet {
    op_codes: HashSet<String>,
}

impl MatchSet {
    /// `None` for a blank query: nothing is highlighted.
    pub fn for_query(instructions: &[Instruction], query: &str) -> Option<MatchSet> {
        if SearchQuery::new(query).is_blank() {
            return None;
        }

        Some(MatchSet::from_matches(&search(instructions, query)))
    }

    pub fn from_matches(matches: &[&Instruction]) -> MatchSet {
        let op_codes = matches
            .iter()
            .map(|instruction| instruction.op_code().to_lowercase())
            .collect();

        MatchSet { op_codes }
    }

    pub fn contains(&self, op_code: &str) -> bool {
        self.op_codes.contains(&op_code.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.op_codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.op_codes.is_empty()
    }
}

/// "1 match", "2 matches".
pub fn match_count_label(count: usize) -> String {
    format!("{} match{}", count, if count == 1 { "" } else { "es" })
}
