extern crate clap;
extern crate hack;
#[macro_use] extern crate log;
extern crate term_grid;

use clap::{App, Arg, ArgMatches};
use term_grid::{Cell, Direction, Filling, Grid, GridOptions};

use std::fs::File;
use std::path::Path;

use hack::translator::{self, Options, Origin, Translation};
use hack::{cli, source};

fn main() {
    let args = process_arguments();
    cli::initialize_logging(args.occurrences_of("verbose"));

    let ipath = Path::new(args.value_of("INPUT").unwrap());
    let opath = cli::output_path(ipath, args.value_of("output"), "asm");
    let options = Options {
        bootstrap: args.is_present("bootstrap"),
        annotate: args.is_present("annotate"),
    };

    debug!(
        "Arguments:\n\tVerbosity: {}\n\tBootstrap: {}\n\tAnnotate: {}\n\tInfile: {}\n\tOutfile: {}",
        cli::level_filter(args.occurrences_of("verbose")),
        options.bootstrap,
        options.annotate,
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

    let file = cli::file_stem(ipath);
    let translation = match source::read_lines(ifile)
        .and_then(|lines| translator::translate(&file, &lines, options))
    {
        Err(err) => {
            error!("fatal: {}: {}", ipath.display(), err);
            std::process::exit(1);
        }
        Ok(translation) => translation,
    };

    if args.is_present("print-debug") {
        print_listing(&translation);
    }

    if let Err(err) = cli::write_output(&opath, &translation.to_text()) {
        error!("fatal: {}", err);
        std::process::exit(1);
    }
}

fn print_listing(translation: &Translation) {
    let mut grid = Grid::new(GridOptions {
        filling: Filling::Spaces(1),
        direction: Direction::LeftToRight,
    });

    for fragment in &translation.fragments {
        let line = match &fragment.origin {
            Origin::Bootstrap => "----:".to_string(),
            Origin::Command { line, .. } => format!("{:>4}:", line),
        };
        grid.add(Cell::from(line));
        grid.add(Cell::from(fragment.origin.to_string()));
        grid.add(Cell::from("=>".to_string()));
        grid.add(Cell::from(format!("{} line(s)", fragment.asm.len())));
    }

    println!("{}", grid.fit_into_columns(4));
}

fn process_arguments() -> ArgMatches<'static> {
    App::new("vmtranslator")
        .version(option_env!("CARGO_PKG_VERSION").unwrap_or("unknown"))
        .author(option_env!("CARGO_PKG_AUTHORS").unwrap_or(""))
        .about("Translates stack VM code (.vm) into Hack assembly (.asm)")
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
            .help("write output to an outfile instead of <INPUT>.asm"))
        .arg(Arg::with_name("bootstrap")
            .short("b")
            .long("bootstrap")
            .takes_value(false)
            .help("prepends code that sets SP to 256 and calls Sys.init"))
        .arg(Arg::with_name("annotate")
            .short("a")
            .long("annotate")
            .takes_value(false)
            .help("writes each VM command as a comment above its assembly"))
        .arg(Arg::with_name("print-debug")
            .short("d")
            .alias("show")
            .alias("s")
            .takes_value(false)
            .help("prints each VM command alongside the size of its translation to STDOUT"))
        .get_matches()
}
