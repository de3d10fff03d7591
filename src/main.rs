use check::CheckArgs;
use clap::Parser;
use generate::GenerateArgs;
use inquire::ui::{Color, RenderConfig, StyleSheet, Styled};

mod check;
mod completer;
mod generate;

#[derive(Parser)]
#[command(version, about, name = "schgen", bin_name = "schgen")]
enum SchgenCli {
    /// Render the carrier board schematic
    Generate(GenerateArgs),
    /// Check label pairing in an existing .kicad_sch file
    Check(CheckArgs),
}

fn get_inquire_config() -> RenderConfig<'static> {
    let mut config = RenderConfig::default();
    config.prompt_prefix = Styled::new(">").with_fg(Color::DarkGrey);
    config.answered_prompt_prefix = Styled::new(">").with_fg(Color::DarkGrey);
    config.prompt = StyleSheet::new().with_fg(Color::DarkGrey);
    config
}

fn init_logger(debug: bool) {
    let default_filter = if debug { "debug" } else { "error" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    inquire::set_global_render_config(get_inquire_config());

    let args = SchgenCli::parse();

    match args {
        SchgenCli::Generate(args) => {
            init_logger(args.debug);
            generate::run(args)
        }
        SchgenCli::Check(args) => {
            init_logger(args.debug);
            check::run(args)
        }
    }
}
