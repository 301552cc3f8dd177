use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use minarray_cli::bench::input::BenchConfig;
use minarray_cli::bench::runner;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("MINARRAY_LOG", "error,minarray=info"))
        .init();

    let matches = Command::new("minarray")
        .version(clap::crate_version!())
        .about("minarray - two-dimensional numeric array engine")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("bench")
                .about("Time dot and sum over random square arrays for each dtype")
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help("Path to a JSON benchmark configuration file")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("size")
                        .short('n')
                        .long("size")
                        .help("Side length of the square operands. Overrides the config file.")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("dtype")
                        .short('t')
                        .long("dtype")
                        .help(
                            "Element type to benchmark (int32, int64, float, double). \
                             May be repeated. Overrides the config file.",
                        )
                        .action(ArgAction::Append)
                        .value_parser(clap::builder::NonEmptyStringValueParser::new()),
                )
                .arg(
                    Arg::new("seed")
                        .short('s')
                        .long("seed")
                        .help("Seed for the random operands")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("print_config")
                        .long("print-config")
                        .help("Print the resolved configuration as JSON and exit")
                        .action(ArgAction::SetTrue),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("bench", sub_m)) => handle_bench(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_bench(matches: &ArgMatches) -> Result<()> {
    let config = match BenchConfig::from_arguments(matches) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid benchmark configuration: {:#}", e);
            eprintln!("error: {:#}", e);
            std::process::exit(2)
        }
    };

    if matches.get_flag("print_config") {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    log::info!(
        "[minarray::bench] size {} dtypes {:?} seed {:?}",
        config.size,
        config.dtypes,
        config.seed
    );

    match runner::run_benchmark(&config) {
        Ok(reports) => {
            for report in reports {
                println!("{}", report);
            }
            Ok(())
        }
        Err(e) => {
            log::error!("Benchmark failed: {:#}", e);
            std::process::exit(1)
        }
    }
}
