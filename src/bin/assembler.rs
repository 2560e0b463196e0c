extern crate clap;
extern crate hack;
#[macro_use] extern crate log;
extern crate term_grid;

use clap::{App, Arg, ArgMatches};
use term_grid::{Cell, Direction, Filling, Grid, GridOptions};

use std::fs::File;
use std::path::Path;

use hack::assembler::{self, encoder, Assembly};
use hack::{cli, source};

fn main() {
    let args = process_arguments();
    cli::initialize_logging(args.occurrences_of("verbose"));

    let ipath = Path::new(args.value_of("INPUT").unwrap());
    let opath = cli::output_path(ipath, args.value_of("output"), "hack");

    debug!(
        "Arguments:\n\tVerbosity: {}\n\tInfile: {}\n\tOutfile: {}",
        cli::level_filter(args.occurrences_of("verbose")),
        ipath.display(),
        opath.display()
    );

    let ifile = match File::open(ipath) {
        Err(err) => {
            error!("fatal: unable to open input file `{}`: {}", ipath.display(), err);
            std::process::exit(1);
        }
        Ok(file) => file,
    };

    let assembly = match source::read_lines(ifile).and_then(|lines| assembler::assemble(&lines)) {
        Err(err) => {
            error!("fatal: {}: {}", ipath.display(), err);
            std::process::exit(1);
        }
        Ok(assembly) => assembly,
    };

    if args.is_present("print-debug") {
        print_listing(&assembly);
    }

    if let Err(err) = cli::write_output(&opath, &assembly.to_text()) {
        error!("fatal: {}", err);
        std::process::exit(1);
    }
}

fn print_listing(assembly: &Assembly) {
    let mut grid = Grid::new(GridOptions {
        filling: Filling::Spaces(1),
        direction: Direction::LeftToRight,
    });

    for (rom, (statement, word)) in assembly.statements.iter().zip(&assembly.words).enumerate() {
        grid.add(Cell::from(format!("0x{:04X}:", rom)));
        grid.add(Cell::from(format!("{}", statement.instruction)));
        grid.add(Cell::from("=>".to_string()));
        grid.add(Cell::from(encoder::to_binary(*word)));
    }

    println!("{}", grid.fit_into_columns(4));

    let mut symbols = Grid::new(GridOptions {
        filling: Filling::Spaces(1),
        direction: Direction::LeftToRight,
    });
    for (name, address) in assembly.symbols.entries() {
        symbols.add(Cell::from(name.to_string()));
        symbols.add(Cell::from(format!("0x{:04X}", address)));
    }

    println!("Symbols:\n{}", symbols.fit_into_columns(2));
}

fn process_arguments() -> ArgMatches<'static> {
    App::new("assembler")
        .version(option_env!("CARGO_PKG_VERSION").unwrap_or("unknown"))
        .author(option_env!("CARGO_PKG_AUTHORS").unwrap_or(""))
        .about("Translates Hack assembly (.asm) into Hack machine code (.hack)")
        .arg(Arg::with_name("INPUT")
            .help("Sets the input file to use")
            .required(true)
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("output")
            .short("o")
            .takes_value(true)
            .help("write output to an outfile instead of <INPUT>.hack"))
        .arg(Arg::with_name("print-debug")
            .short("d")
            .alias("show")
            .alias("s")
            .takes_value(false)
            .help("prints each instruction alongside its binary encoding, then the symbol table, to STDOUT"))
        .get_matches()
}
