use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::path::Path;

use mediaexpect::{
    batch::ExpectationGenerator,
    config::Config,
    export::SuccessPolicy,
};

fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .init();

    let matches = Command::new("mediaexpect")
        .about("Generate .expected fixture files for media files")
        .arg(
            Arg::new("file")
                .help("Media file to generate an expectation for")
                .long("file")
                .short('f')
                .value_name("PATH"),
        )
        .arg(
            Arg::new("dir")
                .help("Directory to recurse over for media files")
                .long("dir")
                .short('d')
                .value_name("PATH"),
        )
        .arg(
            Arg::new("picky")
                .help("Require every mapped field to export successfully")
                .long("picky")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let file = matches.get_one::<String>("file");
    let dir = matches.get_one::<String>("dir");

    if file.is_none() && dir.is_none() {
        eprintln!("Error: Supply a file or directory");
        std::process::exit(1);
    }

    let policy = if matches.get_flag("picky") {
        SuccessPolicy::All
    } else {
        SuccessPolicy::Any
    };

    let config = Config::from_env()?;
    let generator = ExpectationGenerator::new(&config, policy);

    if let Some(file) = file {
        generator.process_file(Path::new(file))?;
    }
    if let Some(dir) = dir {
        let dir_path = Path::new(dir);
        if !dir_path.exists() {
            eprintln!("Error: Directory {} does not exist", dir);
            std::process::exit(1);
        }
        generator.process_directory(dir_path)?;
    }

    Ok(())
}
