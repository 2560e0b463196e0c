//! A minimal Hack CPU used to run assembled translator output in tests.
#![allow(dead_code)]

use hack::assembler::{self, Assembly};
use hack::source::split_lines;
use hack::translator::{self, Options};

pub const SP: usize = 0;
pub const LCL: usize = 1;
pub const ARG: usize = 2;
pub const THIS: usize = 3;
pub const THAT: usize = 4;

pub struct Cpu {
    pub rom: Vec<u16>,
    pub ram: Vec<u16>,
    pub a: u16,
    pub d: u16,
    pub pc: usize,
}

impl Cpu {
    pub fn new(rom: Vec<u16>) -> Self {
        Cpu { rom, ram: vec![0; 1 << 16], a: 0, d: 0, pc: 0 }
    }

    pub fn step(&mut self) {
        let word = self.rom[self.pc];
        if word & 0x8000 == 0 {
            self.a = word;
            self.pc += 1;
            return;
        }

        let address = self.a;
        let y = if word & 0x1000 != 0 { self.ram[address as usize] } else { self.a };
        let out = alu(self.d, y, (word >> 6) & 0x3F);

        let dest = (word >> 3) & 0b111;
        if dest & 0b001 != 0 {
            self.ram[address as usize] = out;
        }
        if dest & 0b100 != 0 {
            self.a = out;
        }
        if dest & 0b010 != 0 {
            self.d = out;
        }

        let jump = word & 0b111;
        let value = out as i16;
        let taken = (jump & 0b100 != 0 && value < 0)
            || (jump & 0b010 != 0 && value == 0)
            || (jump & 0b001 != 0 && value > 0);
        self.pc = if taken { address as usize } else { self.pc + 1 };
    }

    /// Runs until the program counter falls off the end of ROM or reaches
    /// `halt`. Panics if neither happens within `limit` steps.
    pub fn run(&mut self, halt: Option<u16>, limit: usize) {
        for _ in 0..limit {
            if self.pc >= self.rom.len() || Some(self.pc as u16) == halt {
                return;
            }
            self.step();
        }
        panic!("program did not halt within {} steps (pc = {})", limit, self.pc);
    }

    pub fn stack_top(&self) -> u16 {
        self.ram[self.ram[SP] as usize - 1]
    }
}

fn alu(x: u16, y: u16, c: u16) -> u16 {
    let mut x = if c & 0b100000 != 0 { 0 } else { x };
    if c & 0b010000 != 0 {
        x = !x;
    }
    let mut y = if c & 0b001000 != 0 { 0 } else { y };
    if c & 0b000100 != 0 {
        y = !y;
    }
    let out = if c & 0b000010 != 0 { x.wrapping_add(y) } else { x & y };
    if c & 0b000001 != 0 {
        !out
    } else {
        out
    }
}

pub fn assemble(src: &str) -> Assembly {
    assembler::assemble(&split_lines(src)).unwrap()
}

/// Translates VM code, assembles it and returns the loaded CPU.
pub fn load_vm(file: &str, vm: &str, options: Options) -> (Cpu, Assembly) {
    let asm = translator::translate(file, &split_lines(vm), options)
        .unwrap()
        .to_text();
    let assembly = assemble(&asm);
    (Cpu::new(assembly.words.clone()), assembly)
}

/// The conventional segment layout used by the course test scripts.
pub fn with_standard_segments(cpu: &mut Cpu) {
    cpu.ram[SP] = 256;
    cpu.ram[LCL] = 300;
    cpu.ram[ARG] = 400;
    cpu.ram[THIS] = 3000;
    cpu.ram[THAT] = 3010;
}
