//! Bit layout of Hack machine words.
//!
//! ```text
//! address: 0vvv vvvv vvvv vvvv   v = 15-bit value
//! compute: 111a cccc ccdd djjj   a+c = comp, d = dest, j = jump
//! ```
use super::ast::{Comp, Dest, Jump};

/// Largest value an address instruction can carry.
pub const MAX_ADDRESS: u16 = 0x7FFF;

const COMPUTE_PREFIX: u16 = 0b111 << 13;

/// Encodes an address instruction. Only the low 15 bits of `value` are kept.
pub fn encode_address(value: u16) -> u16 {
    value & MAX_ADDRESS
}

pub fn encode_compute(dest: Dest, comp: Comp, jump: Jump) -> u16 {
    COMPUTE_PREFIX | (comp.bits() << 6) | (dest.bits() << 3) | jump.bits()
}

/// Renders a word as the 16-character text used in `.hack` files.
pub fn to_binary(word: u16) -> String {
    format!("{:016b}", word)
}

impl Comp {
    /// The 7-bit `a cccccc` field.
    pub fn bits(&self) -> u16 {
        use Comp::*;
        match self {
            Zero      => 0b0_101010,
            One       => 0b0_111111,
            MinusOne  => 0b0_111010,
            D         => 0b0_001100,
            A         => 0b0_110000,
            NotD      => 0b0_001101,
            NotA      => 0b0_110001,
            NegD      => 0b0_001111,
            NegA      => 0b0_110011,
            DPlusOne  => 0b0_011111,
            APlusOne  => 0b0_110111,
            DMinusOne => 0b0_001110,
            AMinusOne => 0b0_110010,
            DPlusA    => 0b0_000010,
            DMinusA   => 0b0_010011,
            AMinusD   => 0b0_000111,
            DAndA     => 0b0_000000,
            DOrA      => 0b0_010101,
            M         => 0b1_110000,
            NotM      => 0b1_110001,
            NegM      => 0b1_110011,
            MPlusOne  => 0b1_110111,
            MMinusOne => 0b1_110010,
            DPlusM    => 0b1_000010,
            DMinusM   => 0b1_010011,
            MMinusD   => 0b1_000111,
            DAndM     => 0b1_000000,
            DOrM      => 0b1_010101,
        }
    }
}

impl Dest {
    /// One bit per target, `A D M` from high to low.
    pub fn bits(&self) -> u16 {
        match self {
            Dest::Null => 0b000,
            Dest::M    => 0b001,
            Dest::D    => 0b010,
            Dest::MD   => 0b011,
            Dest::A    => 0b100,
            Dest::AM   => 0b101,
            Dest::AD   => 0b110,
            Dest::AMD  => 0b111,
        }
    }
}

impl Jump {
    /// One bit per sign test, `< = >` from high to low.
    pub fn bits(&self) -> u16 {
        match self {
            Jump::Null => 0b000,
            Jump::JGT  => 0b001,
            Jump::JEQ  => 0b010,
            Jump::JGE  => 0b011,
            Jump::JLT  => 0b100,
            Jump::JNE  => 0b101,
            Jump::JLE  => 0b110,
            Jump::JMP  => 0b111,
        }
    }
}
