use super::CodeGenerator;
use crate::translator::ast::ArithmeticOp;

impl CodeGenerator {
    pub(super) fn arithmetic(&mut self, op: ArithmeticOp) -> Vec<String> {
        match op {
            ArithmeticOp::Add => binary("M=D+M"),
            ArithmeticOp::Sub => binary("M=M-D"),
            ArithmeticOp::And => binary("M=D&M"),
            ArithmeticOp::Or  => binary("M=D|M"),
            ArithmeticOp::Neg => unary("M=-M"),
            ArithmeticOp::Not => unary("M=!M"),
            ArithmeticOp::Eq  => self.compare("JEQ"),
            ArithmeticOp::Gt  => self.compare("JGT"),
            ArithmeticOp::Lt  => self.compare("JLT"),
        }
    }

    /// `x - y` is tested against zero. The result slot is optimistically set
    /// to true and cleared when the jump is not taken.
    fn compare(&mut self, jump: &str) -> Vec<String> {
        let n = self.next_label();
        let target = format!("{}.CMP.{}", self.file, n);
        let mut out = binary("D=M-D");
        out.extend(asm![
            "M=-1",
            format!("@{}", target),
            format!("D;{}", jump),
            "@SP",
            "A=M-1",
            "M=0",
            format!("({})", target),
        ]);
        out
    }
}

/// Pops y into D, leaves A on x and applies `op`. SP ends one past x.
fn binary(op: &str) -> Vec<String> {
    asm!["@SP", "AM=M-1", "D=M", "A=A-1", op]
}

/// Applies `op` to the top of the stack in place.
fn unary(op: &str) -> Vec<String> {
    asm!["@SP", "A=M-1", op]
}
