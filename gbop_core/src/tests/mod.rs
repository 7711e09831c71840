use std::sync::Once;
use log::LevelFilter;
use simplelog::{Config, TestLogger};
use crate::instruction::{Flags, Instruction, InstructionType};

mod instruction;
mod instruction_search;

static START: Once = Once::new();

fn init_logger_for_test() {
    START.call_once(|| TestLogger::init(LevelFilter::Trace, Config::default()).unwrap());
}

pub fn init() {
    init_logger_for_test();
}

fn create_instruction(op_code: &str, mnemonic: &str, kind: InstructionType) -> Instruction {
    Instruction::new(op_code, mnemonic, kind, 1, "4", Flags::default())
}
