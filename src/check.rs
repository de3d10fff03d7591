use std::path::PathBuf;

use colored::*;
use expanduser::expanduser;
use kicad_sch::validate_document;

#[derive(clap::Args)]
pub struct CheckArgs {
    #[clap(help = "Path to the .kicad_sch file to check")]
    path: PathBuf,

    #[clap(long, help = "Enable debug logging")]
    pub debug: bool,
}

pub fn run(args: CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let path = expanduser(args.path.to_string_lossy())?;
    let text = std::fs::read_to_string(&path)?;

    let dangling = validate_document(&text);
    log::debug!("{}: {} dangling net(s)", path.display(), dangling.len());

    if dangling.is_empty() {
        println!("{} {}", "OK".green(), path.display());
        return Ok(());
    }

    for net in &dangling {
        println!(
            "{} {} {} appears {} time(s)",
            "dangling:".red(),
            net.kind,
            net.name.bold(),
            net.occurrences
        );
    }
    Err(format!("{} dangling net(s) in {}", dangling.len(), path.display()).into())
}
