use clap::{
    crate_authors, crate_description, crate_name, crate_version, Arg, ArgAction, ArgMatches,
    Command,
};
use colored::Colorize;
use ossa::materialize::Options;

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("generate")
                .about("Materializes a blueprint into a destination directory")
                .arg(
                    Arg::new("blueprint")
                        .help("path to the blueprint manifest (TOML)")
                        .required(true),
                )
                .arg(
                    Arg::new("destination")
                        .help("The destination directory where the skeleton will be created")
                        .required(true),
                )
                .arg(
                    Arg::new("skip-existing")
                        .help("Leave files that already exist untouched instead of truncating them")
                        .long("skip-existing")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("preview")
                .about("Prints the tree a generate run would create, touching nothing on disk")
                .arg(
                    Arg::new("blueprint")
                        .help("path to the blueprint manifest (TOML)")
                        .required(true),
                )
                .arg(
                    Arg::new("destination")
                        .help("The destination directory the preview is rooted at")
                        .required(true),
                ),
        )
        .get_matches();

    let is_verbose = matches.get_flag("verbose");

    env_logger::Builder::from_default_env()
        .filter_level(if is_verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    match matches.subcommand() {
        Some(("generate", args)) => handle_generate(args),
        Some(("preview", args)) => handle_preview(args),
        _ => unreachable!(),
    }
}

fn handle_generate(args: &ArgMatches) -> miette::Result<()> {
    let blueprint = args
        .get_one::<String>("blueprint")
        .expect("blueprint required");
    let destination = args
        .get_one::<String>("destination")
        .expect("destination required");

    let options = Options {
        skip_existing: args.get_flag("skip-existing"),
    };

    let summary = ossa::api::generate(blueprint, destination, &options)?;

    println!(
        "{} {} directories, {} files, {} skipped",
        "Skeleton created successfully!".green(),
        summary.directories,
        summary.files,
        summary.skipped
    );

    Ok(())
}

fn handle_preview(args: &ArgMatches) -> miette::Result<()> {
    let blueprint = args
        .get_one::<String>("blueprint")
        .expect("blueprint required");
    let destination = args
        .get_one::<String>("destination")
        .expect("destination required");

    ossa::api::preview(blueprint, destination)?;

    Ok(())
}
