use std::path::PathBuf;

use colored::*;
use expanduser::expanduser;
use inquire::{Confirm, Text};
use kicad_sch::{ids::SequentialIds, validate_document, KicadSchExporter};
use schematics::SymbolLibrary;

use crate::completer::FilePathCompleter;

const DEFAULT_OUTPUT: &str = "bbq-controller.kicad_sch";

#[derive(clap::Args)]
pub struct GenerateArgs {
    #[clap(short, long, help = "Path of the .kicad_sch file to write")]
    output: Option<PathBuf>,

    #[clap(short, long, help = "Overwrite the output file if it exists")]
    force: bool,

    #[clap(
        long,
        help = "Use sequential identifiers so repeated runs produce identical files"
    )]
    deterministic: bool,

    #[clap(long, help = "Enable debug logging")]
    pub debug: bool,
}

impl GenerateArgs {
    /// Prompt for whatever the command line left open. Returns whether any
    /// prompt was shown.
    pub fn complete(&mut self) -> Result<bool, Box<dyn std::error::Error>> {
        let mut required_input = false;

        let output = loop {
            if let Some(output) = self.output.as_ref() {
                break output.clone();
            }
            required_input = true;
            let answer = Text::new("Output schematic (.kicad_sch): ")
                .with_default(DEFAULT_OUTPUT)
                .with_autocomplete(FilePathCompleter::default())
                .prompt()?;
            let path: PathBuf = expanduser(answer)?;
            if path.is_dir() {
                println!("Not a file path: \"{}\"", path.display());
            } else {
                self.output = Some(path);
            }
        };

        if !self.force && output.exists() {
            required_input = true;

            let overwrite = Confirm::new(&format!(
                "File already exists: \"{}\". Overwrite?",
                output.display()
            ))
            .with_default(false)
            .prompt()?;

            if overwrite {
                self.force = true;
            } else {
                return Err(Box::new(std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    format!("File already exists: \"{}\"", output.display()),
                )));
            }
        }

        Ok(required_input)
    }

    pub fn get_command(&self) -> String {
        let mut command = String::from("schgen generate ");

        if let Some(output) = self.output.as_ref() {
            command.push_str(&format!("--output \"{}\" ", output.display()));
        }
        if self.force {
            command.push_str("--force ");
        }
        if self.deterministic {
            command.push_str("--deterministic ");
        }
        if self.debug {
            command.push_str("--debug ");
        }

        command.trim().to_string()
    }
}

pub fn run(mut args: GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.complete()? {
        println!("$ {}", args.get_command());
    }
    let output = args.output.clone().ok_or("no output path given")?;

    let library = SymbolLibrary::standard()?;
    let topology = carrier_board::build(&library)?;
    let settings = carrier_board::sheet_settings()?;

    let mut exporter = KicadSchExporter::new(&library, &settings);
    if args.deterministic {
        exporter = exporter.with_ids(SequentialIds::new());
    }
    let text = exporter.export(&topology)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&output, &text)?;

    let stats = topology.stats();
    println!("{} {}", "Generated".green(), output.display());
    println!("  symbols:       {}", stats.symbols);
    println!("  power symbols: {}", stats.power_symbols);
    println!("  wires:         {}", stats.wires);
    println!("  junctions:     {}", stats.junctions);
    println!("  labels:        {}", stats.labels);
    println!("  no-connects:   {}", stats.no_connects);
    println!("  text notes:    {}", stats.texts);

    let dangling = validate_document(&text);
    for net in &dangling {
        log::warn!("{} {} referenced {} time(s)", net.kind, net.name, net.occurrences);
        println!(
            "{} {} {} appears {} time(s)",
            "warning:".yellow(),
            net.kind,
            net.name.bold(),
            net.occurrences
        );
    }
    if dangling.is_empty() {
        println!("{}", "All nets paired.".green());
    }

    Ok(())
}
