//! This AST describes a parsed Hack assembly file.
//!
//! Every instruction line is one of three shapes:
//!
//! ```nasm
//! @21          // address: load a literal into A
//! @sum         // address: load the value bound to a symbol into A
//! (LOOP)       // label: names the ROM address of the next real instruction
//! D=D+A        // compute: dest=comp
//! 0;JMP        // compute: comp;jump
//! AM=M-1;JNE   // compute: dest=comp;jump
//! ```
//!
//! Labels occupy no ROM slot. Mnemonics are case-sensitive.
use std::fmt;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Operand {
    Literal(u16),
    Symbol(String),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operand::Literal(value) => write!(f, "{}", value),
            Operand::Symbol(name) => write!(f, "{}", name),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Instruction {
    Address(Operand),
    Compute { dest: Dest, comp: Comp, jump: Jump },
    Label(String),
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Instruction::Address(operand) => write!(f, "@{}", operand),
            Instruction::Label(name) => write!(f, "({})", name),
            Instruction::Compute { dest, comp, jump } => {
                if *dest != Dest::Null {
                    write!(f, "{}=", dest)?;
                }
                write!(f, "{}", comp)?;
                if *jump != Jump::Null {
                    write!(f, ";{}", jump)?;
                }
                Ok(())
            }
        }
    }
}

/// Any subset of the three writable targets.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Dest {
    Null,
    M,
    D,
    MD,
    A,
    AM,
    AD,
    AMD,
}

impl Dest {
    pub const ALL: [Dest; 8] = [
        Dest::Null, Dest::M, Dest::D, Dest::MD,
        Dest::A, Dest::AM, Dest::AD, Dest::AMD,
    ];

    /// Accepts the letters `A`, `D` and `M` in any order, each at most once.
    pub fn from_mnemonic(s: &str) -> Option<Dest> {
        if s.is_empty() {
            return None;
        }
        let (mut a, mut d, mut m) = (false, false, false);
        for c in s.chars() {
            let seen = match c {
                'A' => &mut a,
                'D' => &mut d,
                'M' => &mut m,
                _ => return None,
            };
            if *seen {
                return None;
            }
            *seen = true;
        }
        Some(match (a, d, m) {
            (false, false, true) => Dest::M,
            (false, true, false) => Dest::D,
            (false, true, true) => Dest::MD,
            (true, false, false) => Dest::A,
            (true, false, true) => Dest::AM,
            (true, true, false) => Dest::AD,
            (true, true, true) => Dest::AMD,
            (false, false, false) => Dest::Null,
        })
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Dest::Null => "",
            Dest::M => "M",
            Dest::D => "D",
            Dest::MD => "MD",
            Dest::A => "A",
            Dest::AM => "AM",
            Dest::AD => "AD",
            Dest::AMD => "AMD",
        }
    }
}

impl fmt::Display for Dest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Jump {
    Null,
    JGT,
    JEQ,
    JGE,
    JLT,
    JNE,
    JLE,
    JMP,
}

impl Jump {
    pub const ALL: [Jump; 8] = [
        Jump::Null, Jump::JGT, Jump::JEQ, Jump::JGE,
        Jump::JLT, Jump::JNE, Jump::JLE, Jump::JMP,
    ];

    pub fn from_mnemonic(s: &str) -> Option<Jump> {
        Jump::ALL
            .iter()
            .copied()
            .find(|jump| *jump != Jump::Null && jump.mnemonic() == s)
    }

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Jump::Null => "",
            Jump::JGT => "JGT",
            Jump::JEQ => "JEQ",
            Jump::JGE => "JGE",
            Jump::JLT => "JLT",
            Jump::JNE => "JNE",
            Jump::JLE => "JLE",
            Jump::JMP => "JMP",
        }
    }
}

impl fmt::Display for Jump {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// The 28 computations the ALU supports. Variants ending in `M` read
/// memory at address A instead of the A register itself.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Comp {
    Zero,
    One,
    MinusOne,
    D,
    A,
    NotD,
    NotA,
    NegD,
    NegA,
    DPlusOne,
    APlusOne,
    DMinusOne,
    AMinusOne,
    DPlusA,
    DMinusA,
    AMinusD,
    DAndA,
    DOrA,
    M,
    NotM,
    NegM,
    MPlusOne,
    MMinusOne,
    DPlusM,
    DMinusM,
    MMinusD,
    DAndM,
    DOrM,
}

impl Comp {
    pub const ALL: [Comp; 28] = [
        Comp::Zero, Comp::One, Comp::MinusOne, Comp::D, Comp::A,
        Comp::NotD, Comp::NotA, Comp::NegD, Comp::NegA,
        Comp::DPlusOne, Comp::APlusOne, Comp::DMinusOne, Comp::AMinusOne,
        Comp::DPlusA, Comp::DMinusA, Comp::AMinusD, Comp::DAndA, Comp::DOrA,
        Comp::M, Comp::NotM, Comp::NegM, Comp::MPlusOne, Comp::MMinusOne,
        Comp::DPlusM, Comp::DMinusM, Comp::MMinusD, Comp::DAndM, Comp::DOrM,
    ];

    pub fn from_mnemonic(s: &str) -> Option<Comp> {
        Comp::ALL.iter().copied().find(|comp| comp.mnemonic() == s)
    }

    pub fn mnemonic(&self) -> &'static str {
        use Comp::*;
        match self {
            Zero      => "0",
            One       => "1",
            MinusOne  => "-1",
            D         => "D",
            A         => "A",
            NotD      => "!D",
            NotA      => "!A",
            NegD      => "-D",
            NegA      => "-A",
            DPlusOne  => "D+1",
            APlusOne  => "A+1",
            DMinusOne => "D-1",
            AMinusOne => "A-1",
            DPlusA    => "D+A",
            DMinusA   => "D-A",
            AMinusD   => "A-D",
            DAndA     => "D&A",
            DOrA      => "D|A",
            M         => "M",
            NotM      => "!M",
            NegM      => "-M",
            MPlusOne  => "M+1",
            MMinusOne => "M-1",
            DPlusM    => "D+M",
            DMinusM   => "D-M",
            MMinusD   => "M-D",
            DAndM     => "D&M",
            DOrM      => "D|M",
        }
    }
}

impl fmt::Display for Comp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dest_from_mnemonic() {
        for dest in Dest::ALL.iter().skip(1) {
            assert_eq!(Dest::from_mnemonic(dest.mnemonic()), Some(*dest));
        }
        assert_eq!(Dest::from_mnemonic("DM"), Some(Dest::MD));
        assert_eq!(Dest::from_mnemonic("MDA"), Some(Dest::AMD));
        assert_eq!(Dest::from_mnemonic("DA"), Some(Dest::AD));

        assert_eq!(Dest::from_mnemonic(""), None);
        assert_eq!(Dest::from_mnemonic("MM"), None);
        assert_eq!(Dest::from_mnemonic("X"), None);
        assert_eq!(Dest::from_mnemonic("m"), None);
    }

    #[test]
    fn test_jump_from_mnemonic() {
        assert_eq!(Jump::from_mnemonic("JMP"), Some(Jump::JMP));
        assert_eq!(Jump::from_mnemonic("JLE"), Some(Jump::JLE));
        assert_eq!(Jump::from_mnemonic(""), None);
        assert_eq!(Jump::from_mnemonic("jmp"), None);
        assert_eq!(Jump::from_mnemonic("JUMP"), None);
    }

    #[test]
    fn test_comp_from_mnemonic() {
        for comp in Comp::ALL.iter() {
            assert_eq!(Comp::from_mnemonic(comp.mnemonic()), Some(*comp));
        }
        assert_eq!(Comp::from_mnemonic("M+D"), None);
        assert_eq!(Comp::from_mnemonic("D*A"), None);
        assert_eq!(Comp::from_mnemonic("2"), None);
    }

    #[test]
    fn test_display() {
        let ins = Instruction::Compute { dest: Dest::AM, comp: Comp::MMinusOne, jump: Jump::Null };
        assert_eq!(ins.to_string(), "AM=M-1");
        let ins = Instruction::Compute { dest: Dest::Null, comp: Comp::Zero, jump: Jump::JMP };
        assert_eq!(ins.to_string(), "0;JMP");
        let ins = Instruction::Compute { dest: Dest::D, comp: Comp::DMinusA, jump: Jump::JNE };
        assert_eq!(ins.to_string(), "D=D-A;JNE");
        assert_eq!(Instruction::Address(Operand::Literal(7)).to_string(), "@7");
        assert_eq!(Instruction::Address(Operand::Symbol("i".into())).to_string(), "@i");
        assert_eq!(Instruction::Label("LOOP".into()).to_string(), "(LOOP)");
    }
}
