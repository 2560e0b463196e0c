mod common;

use common::{assemble, Cpu};
use hack::assembler::encoder::to_binary;
use hack::Error;

#[test]
fn test_add_program_runs() {
    let assembly = assemble("// Computes R0 = 2 + 3\n@2\nD=A\n@3\nD=D+A\n@0\nM=D\n");
    assert_eq!(assembly.words.len(), 6);

    let mut cpu = Cpu::new(assembly.words);
    cpu.run(None, 100);
    assert_eq!(cpu.ram[0], 5);
}

#[test]
fn test_max_program() {
    let src = "
        // R2 = max(R0, R1)
        @R0
        D=M
        @R1
        D=D-M
        @OUTPUT_FIRST
        D;JGT
        @R1
        D=M
        @OUTPUT_D
        0;JMP
    (OUTPUT_FIRST)
        @R0
        D=M
    (OUTPUT_D)
        @R2
        M=D
    (INFINITE_LOOP)
        @INFINITE_LOOP
        0;JMP
    ";
    let assembly = assemble(src);
    assert_eq!(assembly.symbols.lookup("OUTPUT_FIRST"), Some(10));
    assert_eq!(assembly.symbols.lookup("OUTPUT_D"), Some(12));
    assert_eq!(assembly.symbols.lookup("INFINITE_LOOP"), Some(14));
    assert_eq!(to_binary(assembly.words[4]), "0000000000001010");

    for (r0, r1, expected) in [(3u16, 9u16, 9u16), (12, 4, 12), (7, 7, 7)].iter() {
        let mut cpu = Cpu::new(assembly.words.clone());
        cpu.ram[0] = *r0;
        cpu.ram[1] = *r1;
        cpu.run(Some(14), 1_000);
        assert_eq!(cpu.ram[2], *expected);
    }
}

#[test]
fn test_variables_and_loop() {
    // sum = 1 + 2 + ... + 10
    let src = "
        @i
        M=1
        @sum
        M=0
    (LOOP)
        @i
        D=M
        @10
        D=D-A
        @END
        D;JGT
        @i
        D=M
        @sum
        M=D+M
        @i
        M=M+1
        @LOOP
        0;JMP
    (END)
        @END
        0;JMP
    ";
    let assembly = assemble(src);
    assert_eq!(assembly.symbols.lookup("i"), Some(16));
    assert_eq!(assembly.symbols.lookup("sum"), Some(17));

    let end = assembly.symbols.lookup("END").unwrap();
    let mut cpu = Cpu::new(assembly.words);
    cpu.run(Some(end), 10_000);
    assert_eq!(cpu.ram[17], 55);
}

#[test]
fn test_output_text_shape() {
    let text = assemble("(LOOP)\n@LOOP\n0;JMP").to_text();
    assert_eq!(text, "0000000000000000\n1110101010000111\n");
    for line in text.lines() {
        assert_eq!(line.len(), 16);
        assert!(line.chars().all(|c| c == '0' || c == '1'));
    }
}

#[test]
fn test_bad_line_is_reported_with_its_number() {
    let lines = hack::source::split_lines("@1\n\n// comment\nD=A;JXX\n");
    match hack::assembler::assemble(&lines) {
        Err(err @ Error::UnknownMnemonic { .. }) => {
            assert_eq!(err.line(), Some(4));
            assert_eq!(err.to_string(), "unknown jump `JXX` on line 4");
        }
        other => panic!("unexpected {:?}", other),
    }
}
