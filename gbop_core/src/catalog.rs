use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use log::debug;
#[cfg(test)]
use mockall::automock;
use once_cell::sync::OnceCell;
use crate::instruction::{CarryWidth, FlagEffect, Flags, Instruction, InstructionType, FLAG_NAMES};
use crate::op_code::{address_to_cell, parse_address, parse_user_address, Namespace, OpCodeAddress};

const REGISTERS: [&str; 8] = ["B", "C", "D", "E", "H", "L", "(HL)", "A"];
const HL_INDIRECT: usize = 6;
const HALT_OP_CODE: u8 = 0x76;

static SHARED_CATALOG: OnceCell<Catalog> = OnceCell::new();

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    InvalidOpCode(String),
    DuplicateOpCode(String),
    InvalidFlags(String, String),
    InvalidSpecification(String),
}

impl Error for CatalogError {}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            CatalogError::InvalidOpCode(s) => write!(f, "invalid opcode: {:?}", s),
            CatalogError::DuplicateOpCode(s) => { write!(f, "duplicate opcode: {}", s) },
            CatalogError::InvalidFlags(op, s) => { write!(f, "invalid flags for {}: {:?}", op, s) },
            CatalogError::InvalidSpecification(s) => { write!(f, "invalid specification: {}", s) }
        }
    }
}

/// Anything able to produce the raw instruction records of a catalog.
#[cfg_attr(test, automock)]
pub trait InstructionSource {
    fn instructions(&self) -> Result<Vec<Instruction>, CatalogError>;
}

/// One row of the static opcode specification.
#[derive(Debug, Clone, Copy)]
pub struct InstructionSpec {
    pub op_code: &'static str,
    pub mnemonic: &'static str,
    pub kind: InstructionType,
    pub bytes: i8,
    pub cycles: &'static str,
    pub flags: &'static str,
    pub description: Option<&'static str>,
}

macro_rules! spec {
    ($op:expr, $mnemonic:expr, $kind:ident, $bytes:expr, $cycles:expr, $flags:expr) => {
        InstructionSpec {
            op_code: $op,
            mnemonic: $mnemonic,
            kind: InstructionType::$kind,
            bytes: $bytes,
            cycles: $cycles,
            flags: $flags,
            description: None,
        }
    };
    ($op:expr, $mnemonic:expr, $kind:ident, $bytes:expr, $cycles:expr, $flags:expr, $description:expr) => {
        InstructionSpec {
            op_code: $op,
            mnemonic: $mnemonic,
            kind: InstructionType::$kind,
            bytes: $bytes,
            cycles: $cycles,
            flags: $flags,
            description: Some($description),
        }
    };
}

/// Primary opcodes outside the regular `LD r,r'` and ALU blocks.
/// D3 DB DD E3 E4 EB EC ED F4 FC FD are undefined on the LR35902.
const PRIMARY_SPEC: &[InstructionSpec] = &[
    spec!("00", "NOP", Control, 1, "4", "- - - -", "No operation; only advances the program counter."),
    spec!("01", "LD BC,d16", Load16, 3, "12", "- - - -"),
    spec!("02", "LD (BC),A", Load8, 1, "8", "- - - -"),
    spec!("03", "INC BC", Arith16, 1, "8", "- - - -"),
    spec!("04", "INC B", Arith8, 1, "4", "Z 0 8 -"),
    spec!("05", "DEC B", Arith8, 1, "4", "Z 1 8 -"),
    spec!("06", "LD B,d8", Load8, 2, "8", "- - - -"),
    spec!("07", "RLCA", Shift, 1, "4", "0 0 0 CY"),
    spec!("08", "LD (a16),SP", Load16, 3, "20", "- - - -"),
    spec!("09", "ADD HL,BC", Arith16, 1, "8", "- 0 16 16"),
    spec!("0A", "LD A,(BC)", Load8, 1, "8", "- - - -"),
    spec!("0B", "DEC BC", Arith16, 1, "8", "- - - -"),
    spec!("0C", "INC C", Arith8, 1, "4", "Z 0 8 -"),
    spec!("0D", "DEC C", Arith8, 1, "4", "Z 1 8 -"),
    spec!("0E", "LD C,d8", Load8, 2, "8", "- - - -"),
    spec!("0F", "RRCA", Shift, 1, "4", "0 0 0 CY"),
    spec!("10", "STOP 0", Control, 2, "4", "- - - -", "Enter very low power mode until a button is pressed."),
    spec!("11", "LD DE,d16", Load16, 3, "12", "- - - -"),
    spec!("12", "LD (DE),A", Load8, 1, "8", "- - - -"),
    spec!("13", "INC DE", Arith16, 1, "8", "- - - -"),
    spec!("14", "INC D", Arith8, 1, "4", "Z 0 8 -"),
    spec!("15", "DEC D", Arith8, 1, "4", "Z 1 8 -"),
    spec!("16", "LD D,d8", Load8, 2, "8", "- - - -"),
    spec!("17", "RLA", Shift, 1, "4", "0 0 0 CY"),
    spec!("18", "JR r8", Jump, 2, "12", "- - - -"),
    spec!("19", "ADD HL,DE", Arith16, 1, "8", "- 0 16 16"),
    spec!("1A", "LD A,(DE)", Load8, 1, "8", "- - - -"),
    spec!("1B", "DEC DE", Arith16, 1, "8", "- - - -"),
    spec!("1C", "INC E", Arith8, 1, "4", "Z 0 8 -"),
    spec!("1D", "DEC E", Arith8, 1, "4", "Z 1 8 -"),
    spec!("1E", "LD E,d8", Load8, 2, "8", "- - - -"),
    spec!("1F", "RRA", Shift, 1, "4", "0 0 0 CY"),
    spec!("20", "JR NZ,r8", Jump, 2, "12/8", "- - - -"),
    spec!("21", "LD HL,d16", Load16, 3, "12", "- - - -"),
    spec!("22", "LD (HL+),A", Load8, 1, "8", "- - - -"),
    spec!("23", "INC HL", Arith16, 1, "8", "- - - -"),
    spec!("24", "INC H", Arith8, 1, "4", "Z 0 8 -"),
    spec!("25", "DEC H", Arith8, 1, "4", "Z 1 8 -"),
    spec!("26", "LD H,d8", Load8, 2, "8", "- - - -"),
    spec!("27", "DAA", Arith8, 1, "4", "Z - 0 CY", "Adjust A to a valid BCD value after an addition or subtraction."),
    spec!("28", "JR Z,r8", Jump, 2, "12/8", "- - - -"),
    spec!("29", "ADD HL,HL", Arith16, 1, "8", "- 0 16 16"),
    spec!("2A", "LD A,(HL+)", Load8, 1, "8", "- - - -"),
    spec!("2B", "DEC HL", Arith16, 1, "8", "- - - -"),
    spec!("2C", "INC L", Arith8, 1, "4", "Z 0 8 -"),
    spec!("2D", "DEC L", Arith8, 1, "4", "Z 1 8 -"),
    spec!("2E", "LD L,d8", Load8, 2, "8", "- - - -"),
    spec!("2F", "CPL", Arith8, 1, "4", "- 1 1 -", "Complement A: every bit of the accumulator is flipped."),
    spec!("30", "JR NC,r8", Jump, 2, "12/8", "- - - -"),
    spec!("31", "LD SP,d16", Load16, 3, "12", "- - - -"),
    spec!("32", "LD (HL-),A", Load8, 1, "8", "- - - -"),
    spec!("33", "INC SP", Arith16, 1, "8", "- - - -"),
    spec!("34", "INC (HL)", Arith8, 1, "12", "Z 0 8 -"),
    spec!("35", "DEC (HL)", Arith8, 1, "12", "Z 1 8 -"),
    spec!("36", "LD (HL),d8", Load8, 2, "12", "- - - -"),
    spec!("37", "SCF", Arith8, 1, "4", "- 0 0 1", "Set the carry flag."),
    spec!("38", "JR C,r8", Jump, 2, "12/8", "- - - -"),
    spec!("39", "ADD HL,SP", Arith16, 1, "8", "- 0 16 16"),
    spec!("3A", "LD A,(HL-)", Load8, 1, "8", "- - - -"),
    spec!("3B", "DEC SP", Arith16, 1, "8", "- - - -"),
    spec!("3C", "INC A", Arith8, 1, "4", "Z 0 8 -"),
    spec!("3D", "DEC A", Arith8, 1, "4", "Z 1 8 -"),
    spec!("3E", "LD A,d8", Load8, 2, "8", "- - - -"),
    spec!("3F", "CCF", Arith8, 1, "4", "- 0 0 CY", "Complement (flip) the carry flag."),
    spec!("76", "HALT", Control, 1, "4", "- - - -", "Stop the CPU clock until an interrupt occurs."),
    spec!("C0", "RET NZ", Jump, 1, "20/8", "- - - -"),
    spec!("C1", "POP BC", Load16, 1, "12", "- - - -"),
    spec!("C2", "JP NZ,a16", Jump, 3, "16/12", "- - - -"),
    spec!("C3", "JP a16", Jump, 3, "16", "- - - -"),
    spec!("C4", "CALL NZ,a16", Jump, 3, "24/12", "- - - -"),
    spec!("C5", "PUSH BC", Load16, 1, "16", "- - - -"),
    spec!("C6", "ADD A,d8", Arith8, 2, "8", "Z 0 8 8"),
    spec!("C7", "RST 00H", Jump, 1, "16", "- - - -"),
    spec!("C8", "RET Z", Jump, 1, "20/8", "- - - -"),
    spec!("C9", "RET", Jump, 1, "16", "- - - -"),
    spec!("CA", "JP Z,a16", Jump, 3, "16/12", "- - - -"),
    spec!("CB", "PREFIX CB", Control, 1, "4", "- - - -", "Fetch the next byte as an opcode of the CB-prefixed table."),
    spec!("CC", "CALL Z,a16", Jump, 3, "24/12", "- - - -"),
    spec!("CD", "CALL a16", Jump, 3, "24", "- - - -"),
    spec!("CE", "ADC A,d8", Arith8, 2, "8", "Z 0 8 8"),
    spec!("CF", "RST 08H", Jump, 1, "16", "- - - -"),
    spec!("D0", "RET NC", Jump, 1, "20/8", "- - - -"),
    spec!("D1", "POP DE", Load16, 1, "12", "- - - -"),
    spec!("D2", "JP NC,a16", Jump, 3, "16/12", "- - - -"),
    spec!("D4", "CALL NC,a16", Jump, 3, "24/12", "- - - -"),
    spec!("D5", "PUSH DE", Load16, 1, "16", "- - - -"),
    spec!("D6", "SUB d8", Arith8, 2, "8", "Z 1 8 8"),
    spec!("D7", "RST 10H", Jump, 1, "16", "- - - -"),
    spec!("D8", "RET C", Jump, 1, "20/8", "- - - -"),
    spec!("D9", "RETI", Jump, 1, "16", "- - - -", "Return from an interrupt handler and enable interrupts."),
    spec!("DA", "JP C,a16", Jump, 3, "16/12", "- - - -"),
    spec!("DC", "CALL C,a16", Jump, 3, "24/12", "- - - -"),
    spec!("DE", "SBC A,d8", Arith8, 2, "8", "Z 1 8 8"),
    spec!("DF", "RST 18H", Jump, 1, "16", "- - - -"),
    spec!("E0", "LDH (a8),A", Load8, 2, "12", "- - - -"),
    spec!("E1", "POP HL", Load16, 1, "12", "- - - -"),
    spec!("E2", "LD (C),A", Load8, 1, "8", "- - - -"),
    spec!("E5", "PUSH HL", Load16, 1, "16", "- - - -"),
    spec!("E6", "AND d8", Arith8, 2, "8", "Z 0 1 0"),
    spec!("E7", "RST 20H", Jump, 1, "16", "- - - -"),
    spec!("E8", "ADD SP,r8", Arith16, 2, "16", "0 0 8 8"),
    spec!("E9", "JP (HL)", Jump, 1, "4", "- - - -"),
    spec!("EA", "LD (a16),A", Load8, 3, "16", "- - - -"),
    spec!("EE", "XOR d8", Arith8, 2, "8", "Z 0 0 0"),
    spec!("EF", "RST 28H", Jump, 1, "16", "- - - -"),
    spec!("F0", "LDH A,(a8)", Load8, 2, "12", "- - - -"),
    spec!("F1", "POP AF", Load16, 1, "12", "Z N H CY"),
    spec!("F2", "LD A,(C)", Load8, 1, "8", "- - - -"),
    spec!("F3", "DI", Control, 1, "4", "- - - -", "Disable interrupts by clearing the IME flag."),
    spec!("F5", "PUSH AF", Load16, 1, "16", "- - - -"),
    spec!("F6", "OR d8", Arith8, 2, "8", "Z 0 0 0"),
    spec!("F7", "RST 30H", Jump, 1, "16", "- - - -"),
    spec!("F8", "LD HL,SP+r8", Load16, 2, "12", "0 0 8 8"),
    spec!("F9", "LD SP,HL", Load16, 1, "8", "- - - -"),
    spec!("FA", "LD A,(a16)", Load8, 3, "16", "- - - -"),
    spec!("FB", "EI", Control, 1, "4", "- - - -", "Enable interrupts after the instruction following EI."),
    spec!("FE", "CP d8", Arith8, 2, "8", "Z 1 8 8"),
    spec!("FF", "RST 38H", Jump, 1, "16", "- - - -"),
];

/// 8-bit ALU block, 0x80-0xBF: mnemonic prefix and flags per operation.
const ALU_OPERATIONS: [(&str, &str); 8] = [
    ("ADD A,", "Z 0 8 8"),
    ("ADC A,", "Z 0 8 8"),
    ("SUB ", "Z 1 8 8"),
    ("SBC A,", "Z 1 8 8"),
    ("AND ", "Z 0 1 0"),
    ("XOR ", "Z 0 0 0"),
    ("OR ", "Z 0 0 0"),
    ("CP ", "Z 1 8 8"),
];

/// CB 0x00-0x3F.
const SHIFT_OPERATIONS: [(&str, &str); 8] = [
    ("RLC", "Z 0 0 CY"),
    ("RRC", "Z 0 0 CY"),
    ("RL", "Z 0 0 CY"),
    ("RR", "Z 0 0 CY"),
    ("SLA", "Z 0 0 CY"),
    ("SRA", "Z 0 0 CY"),
    ("SWAP", "Z 0 0 0"),
    ("SRL", "Z 0 0 CY"),
];

fn parse_flag(op_code: &str, name: &'static str, token: &str, text: &str) -> Result<FlagEffect, CatalogError> {
    match token {
        "-" => Ok(FlagEffect::Unaffected),
        "0" => Ok(FlagEffect::Reset),
        "1" => Ok(FlagEffect::Set),
        "8" => Ok(FlagEffect::Carry(CarryWidth::Bits8)),
        "16" => Ok(FlagEffect::Carry(CarryWidth::Bits16)),
        t if t == name => Ok(FlagEffect::Affected),
        _ => Err(CatalogError::InvalidFlags(op_code.to_owned(), text.to_owned())),
    }
}

/// Parses a `Z N H CY` token string such as `"Z 0 8 -"`.
pub fn parse_flags(op_code: &str, text: &str) -> Result<Flags, CatalogError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != FLAG_NAMES.len() {
        return Err(CatalogError::InvalidFlags(op_code.to_owned(), text.to_owned()));
    }

    Ok(Flags {
        z: parse_flag(op_code, FLAG_NAMES[0], tokens[0], text)?,
        n: parse_flag(op_code, FLAG_NAMES[1], tokens[1], text)?,
        h: parse_flag(op_code, FLAG_NAMES[2], tokens[2], text)?,
        cy: parse_flag(op_code, FLAG_NAMES[3], tokens[3], text)?,
    })
}

fn operand_phrase(register: &str) -> String {
    if register == "(HL)" {
        "the byte at address HL".to_owned()
    } else {
        format!("register {}", register)
    }
}

fn register_cycles(register: usize, direct: &'static str, indirect: &'static str) -> &'static str {
    if register == HL_INDIRECT { indirect } else { direct }
}

/// The LR35902 opcode table: irregular rows from [`PRIMARY_SPEC`] plus the
/// regular blocks generated from the register order.
#[derive(Debug, Default, Clone, Copy)]
pub struct GameBoySpecification;

impl GameBoySpecification {
    fn from_spec(row: &InstructionSpec) -> Result<Instruction, CatalogError> {
        let flags = parse_flags(row.op_code, row.flags)?;
        let instruction = Instruction::new(row.op_code, row.mnemonic, row.kind, row.bytes, row.cycles, flags);

        Ok(match row.description {
            Some(description) => instruction.with_description(description),
            None => instruction,
        })
    }

    fn load_block(table: &mut Vec<Instruction>) -> Result<(), CatalogError> {
        for (dst, dst_name) in REGISTERS.iter().enumerate() {
            for (src, src_name) in REGISTERS.iter().enumerate() {
                let code = 0x40 + (dst * 8 + src) as u8;
                if code == HALT_OP_CODE {
                    continue;
                }

                let op_code = format!("{:02X}", code);
                let cycles = if dst == HL_INDIRECT || src == HL_INDIRECT { "8" } else { "4" };
                let flags = parse_flags(&op_code, "- - - -")?;
                let description = format!("Load the value of {} into {}.", operand_phrase(src_name), operand_phrase(dst_name));

                table.push(
                    Instruction::new(&op_code, &format!("LD {},{}", dst_name, src_name), InstructionType::Load8, 1, cycles, flags)
                        .with_description(description),
                );
            }
        }

        Ok(())
    }

    fn alu_block(table: &mut Vec<Instruction>) -> Result<(), CatalogError> {
        for (op, (prefix, flags)) in ALU_OPERATIONS.iter().enumerate() {
            for (src, src_name) in REGISTERS.iter().enumerate() {
                let op_code = format!("{:02X}", 0x80 + (op * 8 + src) as u8);
                let flags = parse_flags(&op_code, flags)?;

                table.push(Instruction::new(
                    &op_code,
                    &format!("{}{}", prefix, src_name),
                    InstructionType::Arith8,
                    1,
                    register_cycles(src, "4", "8"),
                    flags,
                ));
            }
        }

        Ok(())
    }

    fn extended_block(table: &mut Vec<Instruction>) -> Result<(), CatalogError> {
        for code in 0..=0xFFu8 {
            let op_code = format!("CB{:02X}", code);
            let register = (code & 0x07) as usize;
            let selector = ((code >> 3) & 0x07) as usize;
            let target = REGISTERS[register];

            let instruction = match code >> 6 {
                0 => {
                    let (name, flags) = SHIFT_OPERATIONS[selector];
                    Instruction::new(
                        &op_code,
                        &format!("{} {}", name, target),
                        InstructionType::Shift,
                        2,
                        register_cycles(register, "8", "16"),
                        parse_flags(&op_code, flags)?,
                    )
                }
                1 => Instruction::new(
                    &op_code,
                    &format!("BIT {},{}", selector, target),
                    InstructionType::Bit,
                    2,
                    register_cycles(register, "8", "12"),
                    parse_flags(&op_code, "Z 0 1 -")?,
                )
                .with_description(format!("Test bit {} of {}; Z is set when the bit is 0.", selector, operand_phrase(target))),
                2 => Instruction::new(
                    &op_code,
                    &format!("RES {},{}", selector, target),
                    InstructionType::Bit,
                    2,
                    register_cycles(register, "8", "16"),
                    parse_flags(&op_code, "- - - -")?,
                )
                .with_description(format!("Reset bit {} of {} to 0.", selector, operand_phrase(target))),
                _ => Instruction::new(
                    &op_code,
                    &format!("SET {},{}", selector, target),
                    InstructionType::Bit,
                    2,
                    register_cycles(register, "8", "16"),
                    parse_flags(&op_code, "- - - -")?,
                )
                .with_description(format!("Set bit {} of {} to 1.", selector, operand_phrase(target))),
            };

            table.push(instruction);
        }

        Ok(())
    }
}

impl InstructionSource for GameBoySpecification {
    fn instructions(&self) -> Result<Vec<Instruction>, CatalogError> {
        let mut table = Vec::with_capacity(512);

        for row in PRIMARY_SPEC {
            table.push(GameBoySpecification::from_spec(row)?);
        }

        GameBoySpecification::load_block(&mut table)?;
        GameBoySpecification::alu_block(&mut table)?;
        GameBoySpecification::extended_block(&mut table)?;

        Ok(table)
    }
}

/// Validated, address-ordered list of every defined instruction.
#[derive(Debug, Clone)]
pub struct Catalog {
    instructions: Vec<Instruction>,
    index: HashMap<OpCodeAddress, usize>,
}

impl Catalog {
    pub fn generate() -> Result<Catalog, CatalogError> {
        Catalog::from_source(&GameBoySpecification)
    }

    /// Process-wide catalog, generated on first use.
    pub fn shared() -> Result<&'static Catalog, CatalogError> {
        SHARED_CATALOG.get_or_try_init(Catalog::generate)
    }

    pub fn from_source(source: &dyn InstructionSource) -> Result<Catalog, CatalogError> {
        let mut instructions = source.instructions()?;

        for instruction in &instructions {
            if instruction.is_placeholder() {
                return Err(CatalogError::InvalidSpecification(format!(
                    "placeholder record at opcode {:?}",
                    instruction.op_code()
                )));
            }

            if address_to_cell(instruction.op_code()).is_none() {
                return Err(CatalogError::InvalidOpCode(instruction.op_code().to_owned()));
            }
        }

        instructions.sort_by_key(|instruction| parse_address(instruction.op_code()));

        let mut index = HashMap::with_capacity(instructions.len());
        for (position, instruction) in instructions.iter().enumerate() {
            let address = parse_address(instruction.op_code());
            if index.insert(address, position).is_some() {
                return Err(CatalogError::DuplicateOpCode(address.to_string()));
            }
        }

        let catalog = Catalog { instructions, index };
        debug!(
            "catalog: {} instructions ({} primary, {} extended)",
            catalog.len(),
            catalog.count(Namespace::Primary),
            catalog.count(Namespace::Extended)
        );

        Ok(catalog)
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.instructions.iter()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn count(&self, namespace: Namespace) -> usize {
        self.index.keys().filter(|address| address.namespace == namespace).count()
    }

    pub fn get(&self, address: OpCodeAddress) -> Option<&Instruction> {
        self.index.get(&address).map(|&position| &self.instructions[position])
    }

    /// Looks up user-typed opcode text such as `"3e"`, `"0x3E"` or `"cb11"`.
    pub fn find(&self, op_code: &str) -> Option<&Instruction> {
        let address = parse_user_address(op_code);
        if !address.is_known() {
            return None;
        }

        self.get(address)
    }
}
