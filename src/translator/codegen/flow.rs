//! Branching and the function calling convention.
//!
//! A call pushes a five-word frame above the arguments:
//!
//! ```text
//! ARG  -> argument 0
//!         ...
//!         argument n-1
//!         return address
//!         saved LCL
//!         saved ARG
//!         saved THIS
//!         saved THAT
//! LCL  -> local 0
//!         ...
//! SP   -> working stack
//! ```
use super::{pop_d, push_d, CodeGenerator};
use crate::translator::ast::FRAME_SIZE;

impl CodeGenerator {
    pub(super) fn label(&mut self, name: &str) -> Vec<String> {
        asm![format!("({})", self.scoped(name))]
    }

    pub(super) fn goto(&mut self, name: &str) -> Vec<String> {
        asm![format!("@{}", self.scoped(name)), "0;JMP"]
    }

    /// Jumps when the popped value is non-zero.
    pub(super) fn if_goto(&mut self, name: &str) -> Vec<String> {
        let mut out = pop_d();
        out.extend(asm![format!("@{}", self.scoped(name)), "D;JNE"]);
        out
    }

    pub(super) fn function(&mut self, name: &str, locals: u16) -> Vec<String> {
        self.function = Some(name.to_owned());
        let mut out = asm![format!("({})", name)];
        for _ in 0..locals {
            out.extend(asm!["D=0"]);
            out.extend(push_d());
        }
        out
    }

    /// `args` has passed [`Command::check`](crate::translator::ast::Command::check),
    /// so `FRAME_SIZE + args` stays within 15 bits.
    pub(super) fn call(&mut self, name: &str, args: u16) -> Vec<String> {
        let n = self.next_label();
        let caller = self.function.as_deref().unwrap_or(&self.file);
        let return_label = format!("{}$ret.{}", caller, n);

        let mut out = asm![format!("@{}", return_label), "D=A"];
        out.extend(push_d());
        for register in ["LCL", "ARG", "THIS", "THAT"].iter() {
            out.extend(asm![format!("@{}", register), "D=M"]);
            out.extend(push_d());
        }
        out.extend(asm![
            // ARG = SP - 5 - nArgs
            "@SP",
            "D=M",
            format!("@{}", FRAME_SIZE + args),
            "D=D-A",
            "@ARG",
            "M=D",
            // LCL = SP
            "@SP",
            "D=M",
            "@LCL",
            "M=D",
            format!("@{}", name),
            "0;JMP",
            format!("({})", return_label),
        ]);
        out
    }

    /// Unwinds the frame based at LCL. The return address is read before the
    /// return value is stored, since with zero arguments both share a slot.
    pub(super) fn ret(&mut self) -> Vec<String> {
        let mut out = asm![
            // R13 = frame
            "@LCL",
            "D=M",
            "@R13",
            "M=D",
            // R14 = *(frame - 5)
            format!("@{}", FRAME_SIZE),
            "A=D-A",
            "D=M",
            "@R14",
            "M=D",
        ];
        // *ARG = pop()
        out.extend(pop_d());
        out.extend(asm![
            "@ARG",
            "A=M",
            "M=D",
            // SP = ARG + 1
            "@ARG",
            "D=M+1",
            "@SP",
            "M=D",
        ]);
        for register in ["THAT", "THIS", "ARG", "LCL"].iter() {
            out.extend(asm!["@R13", "AM=M-1", "D=M", format!("@{}", register), "M=D"]);
        }
        out.extend(asm!["@R14", "A=M", "0;JMP"]);
        out
    }

    /// Sets SP to 256 and calls `Sys.init`.
    pub fn bootstrap(&mut self) -> Vec<String> {
        let mut out = asm!["@256", "D=A", "@SP", "M=D"];
        out.extend(self.call("Sys.init", 0));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::ast::Command;

    #[test]
    fn test_branching() {
        let mut gen = CodeGenerator::new("Prog");
        assert_eq!(gen.label("LOOP"), vec!["(Prog$LOOP)"]);
        assert_eq!(gen.goto("LOOP"), vec!["@Prog$LOOP", "0;JMP"]);
        assert_eq!(
            gen.if_goto("LOOP"),
            vec!["@SP", "AM=M-1", "D=M", "@Prog$LOOP", "D;JNE"]
        );
    }

    #[test]
    fn test_labels_follow_enclosing_function() {
        let mut gen = CodeGenerator::new("Prog");
        gen.function("Prog.a", 0);
        assert_eq!(gen.label("END"), vec!["(Prog.a$END)"]);
        gen.function("Prog.b", 0);
        assert_eq!(gen.goto("END"), vec!["@Prog.b$END", "0;JMP"]);
    }

    #[test]
    fn test_function_initialises_locals() {
        let mut gen = CodeGenerator::new("Prog");
        let out = gen.function("Prog.f", 2);
        assert_eq!(out[0], "(Prog.f)");
        assert_eq!(out.len(), 1 + 2 * 6);
        assert_eq!(out.iter().filter(|l| *l == "D=0").count(), 2);
        assert_eq!(gen.function("Prog.g", 0), vec!["(Prog.g)"]);
    }

    #[test]
    fn test_call_frame() {
        let mut gen = CodeGenerator::new("Prog");
        gen.generate(1, &Command::Function("Prog.main".into(), 0)).unwrap();
        let out = gen.call("Prog.mult", 2);

        assert_eq!(out[0], "@Prog.main$ret.0");
        assert!(out.contains(&"@7".to_string()));
        assert_eq!(out[out.len() - 3], "@Prog.mult");
        assert_eq!(out[out.len() - 2], "0;JMP");
        assert_eq!(out[out.len() - 1], "(Prog.main$ret.0)");

        let again = gen.call("Prog.mult", 2);
        assert_eq!(again[0], "@Prog.main$ret.1");
    }

    #[test]
    fn test_return_restores_in_order() {
        let mut gen = CodeGenerator::new("Prog");
        let out = gen.ret();
        let position = |target: &str| out.iter().rposition(|l| l == target).unwrap();
        assert!(position("@THAT") < position("@THIS"));
        assert!(position("@THIS") < position("@ARG"));
        assert!(position("@ARG") < position("@LCL"));
        // The return address is fetched before the return value is written.
        assert!(position("@R14") > position("@LCL"));
        assert_eq!(out.iter().position(|l| l == "@R14"), Some(7));
        assert_eq!(&out[out.len() - 3..], &["@R14", "A=M", "0;JMP"]);
    }

    #[test]
    fn test_bootstrap() {
        let mut gen = CodeGenerator::new("Sys");
        let out = gen.bootstrap();
        assert_eq!(&out[..4], &["@256", "D=A", "@SP", "M=D"]);
        assert!(out.contains(&"@Sys.init".to_string()));
        assert_eq!(out.last().unwrap(), "(Sys$ret.0)");
    }
}
