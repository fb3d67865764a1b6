mod error;
mod logger;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use error::CliError;
use infnat::{defined, parser, simp_steps, simplify};
use std::{
    fs::File,
    io::{self, BufReader, Read},
};

const APP_VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

const FILE_HELP: &str =
    "The input file, with one constraint per line. Blank lines and lines starting with '#' are \
    ignored. If this argument is '-' or absent, the input is read from the standard input";

fn app() -> App<'static, 'static> {
    let subcommands = vec![
        SubCommand::with_name("simplify")
            .about("Prints the normal form of each proposition")
            .setting(AppSettings::DisableVersion)
            .arg(Arg::with_name("file").help(FILE_HELP)),
        SubCommand::with_name("steps")
            .about("Prints every intermediate form the simplifier goes through")
            .setting(AppSettings::DisableVersion)
            .arg(Arg::with_name("file").help(FILE_HELP)),
        SubCommand::with_name("defined")
            .about("Prints the simplified well-definedness condition of each expression")
            .setting(AppSettings::DisableVersion)
            .arg(Arg::with_name("file").help(FILE_HELP)),
    ];
    App::new("infnat")
        .version(APP_VERSION.unwrap_or("unknown"))
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommands(subcommands)
        .arg(
            Arg::with_name("log-level")
                .long("log")
                .possible_values(&["off", "error", "warn", "info"])
                .default_value("warn")
                .help("Sets the maximum logging level"),
        )
}

fn main() {
    use log::LevelFilter;

    let matches = app().get_matches();
    let level = match matches.value_of("log-level") {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("info") => LevelFilter::Info,
        _ => unreachable!(),
    };
    logger::init(level);
    if let Err(e) = run_app(&matches) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run_app(matches: &ArgMatches) -> Result<(), CliError> {
    if let Some(matches) = matches.subcommand_matches("simplify") {
        for_each_input_line(matches, |line| {
            let prop = parser::parse_prop(line)?;
            println!("{}", simplify(prop));
            Ok(())
        })
    } else if let Some(matches) = matches.subcommand_matches("steps") {
        for_each_input_line(matches, |line| {
            let prop = parser::parse_prop(line)?;
            let mut count = 0;
            for step in simp_steps(prop) {
                println!("{}{}", if count == 0 { "" } else { "  " }, step);
                count += 1;
            }
            log::info!("reached the normal form in {} steps", count - 1);
            Ok(())
        })
    } else if let Some(matches) = matches.subcommand_matches("defined") {
        for_each_input_line(matches, |line| {
            let expr = parser::parse_expr(line)?;
            println!("{}", simplify(defined(&expr)));
            Ok(())
        })
    } else {
        unreachable!()
    }
}

/// Runs `f` on every non-blank, non-comment line of the selected input.
fn for_each_input_line(
    matches: &ArgMatches,
    f: impl Fn(&str) -> Result<(), CliError>,
) -> Result<(), CliError> {
    let input = read_input(matches.value_of("file"))?;
    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        f(line)?;
    }
    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String, CliError> {
    let mut contents = String::new();
    match path {
        None | Some("-") => {
            io::stdin().lock().read_to_string(&mut contents)?;
        }
        Some(path) => {
            BufReader::new(File::open(path)?).read_to_string(&mut contents)?;
        }
    }
    Ok(contents)
}
