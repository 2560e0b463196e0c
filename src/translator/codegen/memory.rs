//! push/pop for the eight memory segments.
//!
//! | segment                            | address            |
//! |------------------------------------|--------------------|
//! | `local`, `argument`, `this`, `that` | base register + i  |
//! | `temp`                             | 5 + i              |
//! | `pointer`                          | THIS (0), THAT (1) |
//! | `static`                           | `<file>.<i>`       |
//! | `constant`                         | the value i itself |
use super::{pop_d, push_d, CodeGenerator};
use crate::translator::ast::Segment;

const TEMP_BASE: u16 = 5;

/// Where a segment slot lives.
enum Location {
    /// A pointer register holding the segment base.
    Based(&'static str),
    /// A fixed RAM address or symbol.
    Fixed(String),
}

impl CodeGenerator {
    pub(super) fn push(&mut self, segment: Segment, index: u16) -> Vec<String> {
        let mut out = match self.locate(segment, index) {
            None => asm![format!("@{}", index), "D=A"],
            Some(Location::Based(base)) => {
                asm![format!("@{}", base), "D=M", format!("@{}", index), "A=D+A", "D=M"]
            }
            Some(Location::Fixed(address)) => asm![format!("@{}", address), "D=M"],
        };
        out.extend(push_d());
        out
    }

    /// `None` for `constant`, which has no slot to store into.
    pub(super) fn pop(&mut self, segment: Segment, index: u16) -> Option<Vec<String>> {
        let out = match self.locate(segment, index)? {
            Location::Based(base) => {
                // The target address is parked in R13 while D carries the value.
                let mut out = asm![
                    format!("@{}", base),
                    "D=M",
                    format!("@{}", index),
                    "D=D+A",
                    "@R13",
                    "M=D",
                ];
                out.extend(pop_d());
                out.extend(asm!["@R13", "A=M", "M=D"]);
                out
            }
            Location::Fixed(address) => {
                let mut out = pop_d();
                out.extend(asm![format!("@{}", address), "M=D"]);
                out
            }
        };
        Some(out)
    }

    /// The slot behind `segment[index]`. `constant` has none.
    fn locate(&self, segment: Segment, index: u16) -> Option<Location> {
        let location = match segment {
            Segment::Constant => return None,
            Segment::Local => Location::Based("LCL"),
            Segment::Argument => Location::Based("ARG"),
            Segment::This => Location::Based("THIS"),
            Segment::That => Location::Based("THAT"),
            Segment::Temp => Location::Fixed((TEMP_BASE + index).to_string()),
            Segment::Pointer if index == 0 => Location::Fixed("THIS".to_owned()),
            Segment::Pointer => Location::Fixed("THAT".to_owned()),
            Segment::Static => Location::Fixed(format!("{}.{}", self.file, index)),
        };
        Some(location)
    }
}
