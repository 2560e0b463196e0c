//! Toolchain for the Hack 16-bit platform.
//!
//! Two independent batch pipelines live here:
//!
//! * [`assembler`] turns symbolic Hack assembly into 16-bit binary words.
//! * [`translator`] lowers stack-VM commands into Hack assembly.
//!
//! Both start from the comment-stripped lines produced by [`source`].

extern crate chrono;
extern crate fern;
#[macro_use] extern crate log;
extern crate regex;
extern crate thiserror;

pub mod assembler;
pub mod cli;
pub mod error;
pub mod source;
pub mod translator;

pub use error::{Error, Result};
