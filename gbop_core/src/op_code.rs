use std::fmt;
use std::fmt::{Display, Formatter};
use serde::Serialize;

pub const EXTENDED_MARKER: &str = "CB";
pub const GRID_SIZE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    Primary,
    Extended,
}

impl Namespace {
    pub fn grid_index(&self) -> usize {
        match self {
            Namespace::Primary => 0,
            Namespace::Extended => 1,
        }
    }

    pub fn from_grid_index(index: usize) -> Option<Namespace> {
        match index {
            0 => Some(Namespace::Primary),
            1 => Some(Namespace::Extended),
            _ => None,
        }
    }
}

/// Normalized form of an opcode text. `value` is `None` when the hex digits
/// do not parse: the address is unknown.
///
/// Ordering is namespace first (primary before extended), then value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct OpCodeAddress {
    pub namespace: Namespace,
    pub value: Option<u8>,
}

impl OpCodeAddress {
    pub fn new(namespace: Namespace, value: u8) -> Self {
        OpCodeAddress { namespace, value: Some(value) }
    }

    pub fn is_known(&self) -> bool {
        self.value.is_some()
    }

    pub fn cell(&self) -> Option<GridLocation> {
        self.value.map(|value| GridLocation {
            grid: self.namespace.grid_index(),
            row: (value >> 4) as usize,
            column: (value & 0x0F) as usize,
        })
    }
}

impl Display for OpCodeAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let marker = match self.namespace {
            Namespace::Primary => "",
            Namespace::Extended => EXTENDED_MARKER,
        };

        match self.value {
            Some(value) => write!(f, "{}{:02X}", marker, value),
            None => write!(f, "{}??", marker),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridLocation {
    pub grid: usize,
    pub row: usize,
    pub column: usize,
}

impl GridLocation {
    /// `None` for a grid index other than 0 or 1.
    pub fn namespace(&self) -> Option<Namespace> {
        Namespace::from_grid_index(self.grid)
    }

    /// Inverse of [`OpCodeAddress::cell`]. `None` when the grid, row or column
    /// is out of range.
    pub fn address(&self) -> Option<OpCodeAddress> {
        if self.row >= GRID_SIZE || self.column >= GRID_SIZE {
            return None;
        }

        let value = u8::try_from((self.row << 4) | self.column).ok()?;
        Some(OpCodeAddress::new(self.namespace()?, value))
    }
}

fn split_marker(normalized: &str) -> (Namespace, &str) {
    if normalized.starts_with(EXTENDED_MARKER) && normalized.chars().count() == 4 {
        (Namespace::Extended, &normalized[EXTENDED_MARKER.len()..])
    } else {
        (Namespace::Primary, normalized)
    }
}

fn parse_hex(raw: &str) -> Option<u8> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    u8::from_str_radix(raw, 16).ok()
}

/// Parses `"3E"`, `"cb11"`, ... into a namespace and value. Case-insensitive.
/// A four-character text starting with `CB` is extended, anything else is
/// read whole as a primary hex value.
pub fn parse_address(op_code: &str) -> OpCodeAddress {
    let normalized = op_code.to_uppercase();
    let (namespace, raw) = split_marker(&normalized);

    OpCodeAddress { namespace, value: parse_hex(raw) }
}

/// Grid cell for an opcode text, `None` unless exactly two hex digits remain
/// once the `CB` marker is stripped.
pub fn address_to_cell(op_code: &str) -> Option<GridLocation> {
    let normalized = op_code.to_uppercase();
    let (namespace, raw) = split_marker(&normalized);

    let mut digits = raw.chars();
    let (high, low) = match (digits.next(), digits.next(), digits.next()) {
        (Some(high), Some(low), None) => (high, low),
        _ => return None,
    };

    let row = high.to_digit(16)? as usize;
    let column = low.to_digit(16)? as usize;

    Some(GridLocation { grid: namespace.grid_index(), row, column })
}

/// Strips an optional `0x` prefix before parsing, for user-typed opcodes.
pub fn parse_user_address(text: &str) -> OpCodeAddress {
    let trimmed = text.trim();
    let stripped = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    parse_address(stripped)
}
