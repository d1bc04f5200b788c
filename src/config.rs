/// Contains enums and structs that will also be exported as the public
/// API of this crate.
use itertools::Itertools;

#[derive(Clone,Copy,Hash,Eq,PartialEq,Debug)]
pub enum ECCLevel {
    L,      // allows recovery of  7% of the data
    M,      // allows recovery of 15% of the data
    Q,      // allows recovery of 25% of the data
    H       // allows recovery of 30% of the data
}

impl ECCLevel {
    /// Convert a simple string denoting the ECC level into
    /// the corresponding enum value
    pub fn from_str(desc: &str) -> ECCLevel {
        match desc {
            "L" => ECCLevel::L,
            "M" => ECCLevel::M,
            "Q" => ECCLevel::Q,
            "H" => ECCLevel::H,
            _ => panic!("Unrecognized symbol configuration string!")
        }
    }

    /// Map the high two bits of the decoded format word onto an ECC level.
    /// The format field stores the levels out of order (M sorts before L).
    pub fn from_format_bits(bits: u8) -> ECCLevel {
        match bits & 0b11 {
            0b00 => ECCLevel::M,
            0b01 => ECCLevel::L,
            0b10 => ECCLevel::H,
            _    => ECCLevel::Q
        }
    }

    /// The two format-field bits for this level, the inverse of
    /// from_format_bits. Used when assembling format words.
    pub fn format_bits(&self) -> u8 {
        match self {
            ECCLevel::M => 0b00,
            ECCLevel::L => 0b01,
            ECCLevel::H => 0b10,
            ECCLevel::Q => 0b11
        }
    }
}

/// A symbol version (1 through 40) paired with an ECC level, e.g. "8-Q".
/// Serves as the lookup key for the block structure table.
#[derive(Clone,Copy,Hash, Eq, PartialEq,Debug)]
pub struct SymbolConfig(u8, ECCLevel);

impl SymbolConfig {
    /// Constructor
    pub const fn new(version: u8, e: ECCLevel) -> SymbolConfig {
        SymbolConfig(version, e)
    }

    pub fn version(&self) -> u8 {
        self.0
    }

    pub fn level(&self) -> ECCLevel {
        self.1
    }

    /// Convenience function that creates a SymbolConfig from
    /// a string in the form commonly used in the standard,
    /// such as 1-H, 6-M, 40-L, etc.
    pub fn from_str(decl: &str) -> SymbolConfig {
        let (v, e) = decl.split("-").next_tuple().unwrap();
        let version = match v.parse::<u8>() {
            Ok(i) if i >= 1 && i <= 40 => i,
            _ => panic!("Unrecognized symbol configuration string!")
        };
        SymbolConfig::new(version, ECCLevel::from_str(e))
    }
}
