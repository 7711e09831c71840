use crate::catalog::Catalog;
use crate::instruction::{Instruction, InstructionType};
use crate::instruction_search::{match_count_label, matches, search, sort_by_address, MatchSet, SearchQuery};
use crate::tests::{create_instruction, init};

fn ld_a_b() -> Instruction {
    create_instruction("7F", "LD A,B", InstructionType::Load8)
}

#[test]
fn test_terms_match_across_fields() {
    init();

    let instruction = ld_a_b();

    assert!(matches(&instruction, "ld a"));
    assert!(matches(&instruction, "a ld"));
    assert!(matches(&instruction, "LD  7f"));
    assert!(matches(&instruction, "load8 b"));
    assert!(!matches(&instruction, "xyz"));
    assert!(!matches(&instruction, "ld c"));
}

#[test]
fn test_opcode_fallback_strips_hex_prefix() {
    init();

    let instruction = ld_a_b();

    assert!(matches(&instruction, "0x7f"));
    assert!(matches(&instruction, "  0X7F "));
    assert!(matches(&instruction, "f"));
    assert!(!matches(&instruction, "0x7e"));
    assert!(!matches(&instruction, "0x"));
}

#[test]
fn test_blank_query_matches_everything() {
    init();

    let catalog = Catalog::generate().unwrap();

    assert!(catalog.iter().all(|instruction| matches(instruction, "")));
    assert!(catalog.iter().all(|instruction| matches(instruction, "   ")));
    assert_eq!(search(catalog.instructions(), "").len(), catalog.len());
    assert!(SearchQuery::new(" \t ").is_blank());
}

#[test]
fn test_query_terms() {
    init();

    let query = SearchQuery::new("  LD   A,(HL) ");

    assert_eq!(query.terms(), &["ld".to_string(), "a,(hl)".to_string()]);
    assert_eq!(SearchQuery::new("0x3E").op_code_term(), "3e");
}

#[test]
fn test_search_hex_query_across_namespaces() {
    init();

    let catalog = Catalog::generate().unwrap();
    let found: Vec<&str> = search(catalog.instructions(), "0x3e")
        .iter()
        .map(|instruction| instruction.op_code())
        .collect();

    assert_eq!(found, vec!["3E", "CB3E"]);
}

#[test]
fn test_search_by_mnemonic() {
    init();

    let catalog = Catalog::generate().unwrap();
    let found = search(catalog.instructions(), "xor");

    assert_eq!(found.len(), 9);
    assert_eq!(found.first().unwrap().mnemonic(), "XOR B");
    assert_eq!(found.last().unwrap().mnemonic(), "XOR d8");
}

#[test]
fn test_search_extended_opcode() {
    init();

    let catalog = Catalog::generate().unwrap();
    let found = search(catalog.instructions(), "cb11");

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].mnemonic(), "RL C");
}

#[test]
fn test_search_by_category() {
    init();

    let catalog = Catalog::generate().unwrap();
    let found = search(catalog.instructions(), "jump");

    assert!(found.iter().all(|instruction| instruction.kind() == Some(InstructionType::Jump)));
    assert!(found.iter().any(|instruction| instruction.mnemonic() == "RETI"));
}

#[test]
fn test_sort_by_address() {
    init();

    let instructions = [
        create_instruction("CB11", "RL C", InstructionType::Shift),
        create_instruction("05", "DEC B", InstructionType::Arith8),
        create_instruction("CB00", "RLC B", InstructionType::Shift),
        create_instruction("10", "STOP 0", InstructionType::Control),
    ];
    let mut refs: Vec<&Instruction> = instructions.iter().collect();
    sort_by_address(&mut refs);

    let ordered: Vec<&str> = refs.iter().map(|instruction| instruction.op_code()).collect();
    assert_eq!(ordered, vec!["05", "10", "CB00", "CB11"]);
}

#[test]
fn test_match_set() {
    init();

    let catalog = Catalog::generate().unwrap();

    assert!(MatchSet::for_query(catalog.instructions(), "  ").is_none());

    let set = MatchSet::for_query(catalog.instructions(), "0x3e").unwrap();
    assert_eq!(set.len(), 2);
    assert!(set.contains("3E"));
    assert!(set.contains("cb3e"));
    assert!(!set.contains("3F"));
}

#[test]
fn test_match_count_label() {
    assert_eq!(match_count_label(0), "0 matches");
    assert_eq!(match_count_label(1), "1 match");
    assert_eq!(match_count_label(300), "300 matches");
}
