use std::fmt;
use std::fmt::{Display, Formatter};
use serde::Serialize;

pub const FLAG_NAMES: [&str; 4] = ["Z", "N", "H", "CY"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InstructionType {
    Control,
    Jump,
    Load8,
    Load16,
    Arith8,
    Arith16,
    Shift,
    Bit,
}

impl InstructionType {
    pub fn tag(&self) -> &'static str {
        match self {
            InstructionType::Control => "control",
            InstructionType::Jump => "jump",
            InstructionType::Load8 => "load8",
            InstructionType::Load16 => "load16",
            InstructionType::Arith8 => "arith8",
            InstructionType::Arith16 => "arith16",
            InstructionType::Shift => "shift",
            InstructionType::Bit => "bit",
        }
    }
}

impl Display for InstructionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CarryWidth {
    #[serde(rename = "8-bit")]
    Bits8,
    #[serde(rename = "16-bit")]
    Bits16,
}

/// Effect of one instruction on one condition flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagEffect {
    Unaffected,
    Reset,
    Set,
    Affected,
    Carry(CarryWidth),
}

impl FlagEffect {
    /// Raw descriptor: `-`, `0`, `1`, the flag name, or `8-bit`/`16-bit`.
    pub fn symbol(&self, flag: &'static str) -> &'static str {
        match self {
            FlagEffect::Unaffected => "-",
            FlagEffect::Reset => "0",
            FlagEffect::Set => "1",
            FlagEffect::Affected => flag,
            FlagEffect::Carry(CarryWidth::Bits8) => "8-bit",
            FlagEffect::Carry(CarryWidth::Bits16) => "16-bit",
        }
    }

    /// Compact form used inside a table cell, carry descriptors collapse to the flag name.
    pub fn cell_symbol(&self, flag: &'static str) -> &'static str {
        match self {
            FlagEffect::Carry(_) => flag,
            other => other.symbol(flag),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct Flags {
    pub z: FlagEffect,
    pub n: FlagEffect,
    pub h: FlagEffect,
    pub cy: FlagEffect,
}

impl Default for Flags {
    fn default() -> Self {
        Flags {
            z: FlagEffect::Unaffected,
            n: FlagEffect::Unaffected,
            h: FlagEffect::Unaffected,
            cy: FlagEffect::Unaffected,
        }
    }
}

impl Flags {
    pub fn get(&self, name: &str) -> Option<FlagEffect> {
        match name {
            "Z" => Some(self.z),
            "N" => Some(self.n),
            "H" => Some(self.h),
            "CY" => Some(self.cy),
            _ => None,
        }
    }

    /// `(name, effect)` pairs in `Z N H CY` order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, FlagEffect)> {
        [self.z, self.n, self.h, self.cy]
            .into_iter()
            .enumerate()
            .map(|(i, effect)| (FLAG_NAMES[i], effect))
    }

    pub fn cell_summary(&self) -> String {
        self.iter()
            .map(|(name, effect)| effect.cell_symbol(name))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn summary(&self) -> String {
        self.iter()
            .map(|(name, effect)| effect.symbol(name))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Instruction {
    mnemonic: String,
    #[serde(rename = "type")]
    kind: Option<InstructionType>,
    flags: Flags,
    cycles: String,
    bytes: i8,
    op_code: String,
    description: Option<String>,
}

impl Instruction {
    pub fn new(
        op_code: &str,
        mnemonic: &str,
        kind: InstructionType,
        bytes: i8,
        cycles: &str,
        flags: Flags,
    ) -> Self {
        Instruction {
            mnemonic: mnemonic.to_owned(),
            kind: Some(kind),
            flags,
            cycles: cycles.to_owned(),
            bytes,
            op_code: op_code.to_owned(),
            description: None,
        }
    }

    /// The "nothing selected yet" record. Never part of a catalog.
    pub fn placeholder() -> Self {
        Instruction {
            mnemonic: String::new(),
            kind: None,
            flags: Flags::default(),
            cycles: String::new(),
            bytes: -1,
            op_code: String::new(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_placeholder(&self) -> bool {
        self.bytes == -1
    }

    pub fn mnemonic(&self) -> &str {
        self.mnemonic.as_str()
    }

    pub fn kind(&self) -> Option<InstructionType> {
        self.kind
    }

    /// Type tag, empty for the placeholder record.
    pub fn type_tag(&self) -> &'static str {
        self.kind.map(|kind| kind.tag()).unwrap_or("")
    }

    pub fn flags(&self) -> &Flags {
        &self.flags
    }

    pub fn cycles(&self) -> &str {
        self.cycles.as_str()
    }

    pub fn bytes(&self) -> i8 {
        self.bytes
    }

    pub fn op_code(&self) -> &str {
        self.op_code.as_str()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "0x{} {}", self.op_code.to_uppercase(), self.mnemonic)
    }
}
