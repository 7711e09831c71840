use crate::catalog::Catalog;
use crate::instruction::{CarryWidth, FlagEffect, Instruction, InstructionType};
use crate::tests::{create_instruction, init};

#[test]
fn test_placeholder_is_unset() {
    init();

    let placeholder = Instruction::placeholder();

    assert!(placeholder.is_placeholder());
    assert_eq!(placeholder.bytes(), -1);
    assert_eq!(placeholder.mnemonic(), "");
    assert_eq!(placeholder.op_code(), "");
    assert_eq!(placeholder.type_tag(), "");
    assert_eq!(placeholder.description(), None);
    assert_eq!(placeholder.flags().summary(), "- - - -");
}

#[test]
fn test_flag_symbols() {
    init();

    assert_eq!(FlagEffect::Unaffected.symbol("Z"), "-");
    assert_eq!(FlagEffect::Reset.symbol("N"), "0");
    assert_eq!(FlagEffect::Set.symbol("H"), "1");
    assert_eq!(FlagEffect::Affected.symbol("CY"), "CY");
    assert_eq!(FlagEffect::Carry(CarryWidth::Bits8).symbol("H"), "8-bit");
    assert_eq!(FlagEffect::Carry(CarryWidth::Bits16).symbol("CY"), "16-bit");
    assert_eq!(FlagEffect::Carry(CarryWidth::Bits16).cell_symbol("CY"), "CY");
    assert_eq!(FlagEffect::Reset.cell_symbol("Z"), "0");
}

#[test]
fn test_flags_summaries_for_add_hl() {
    init();

    let catalog = Catalog::generate().unwrap();
    let add = catalog.find("09").unwrap();

    assert_eq!(add.mnemonic(), "ADD HL,BC");
    assert_eq!(add.flags().summary(), "- 0 16-bit 16-bit");
    assert_eq!(add.flags().cell_summary(), "- 0 H CY");
    assert_eq!(add.flags().get("N"), Some(FlagEffect::Reset));
    assert_eq!(add.flags().get("X"), None);
}

#[test]
fn test_display_and_type_tag() {
    init();

    let instruction = create_instruction("cb11", "RL C", InstructionType::Shift);

    assert_eq!(instruction.to_string(), "0xCB11 RL C");
    assert_eq!(instruction.type_tag(), "shift");
    assert_eq!(InstructionType::Load16.to_string(), "load16");
    assert!(!instruction.is_placeholder());
}
