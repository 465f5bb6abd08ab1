use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of build_cli() from src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
const FORMATS: &[&str] = &["html", "markdown"];

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input file path, or '-' for stdin")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn format_arg(name: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_parser(clap::builder::PossibleValuesParser::new(FORMATS))
        .value_hint(ValueHint::Other)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("inkdown")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert between Markdown and rich-text HTML, and build tables of contents")
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available conversion formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an inkdown.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats")
                .arg(input_arg())
                .arg(format_arg("from"))
                .arg(format_arg("to").required(true))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("toc")
                .about("Build a table of contents from a document's headings")
                .arg(input_arg())
                .arg(format_arg("from"))
                .arg(
                    Arg::new("style")
                        .long("style")
                        .value_parser(["linked", "simple"]),
                )
                .arg(Arg::new("title").long("title"))
                .arg(Arg::new("max-level").long("max-level"))
                .arg(Arg::new("html").long("html").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("headings")
                .about("Print the heading outline of a document as JSON")
                .arg(input_arg())
                .arg(format_arg("from")),
        )
        .subcommand(
            Command::new("slug")
                .about("Print the anchor id for each argument")
                .arg(Arg::new("text").required(true).num_args(1..).index(1)),
        );

    generate_to(Bash, &mut cmd, "inkdown", &outdir)?;
    generate_to(Zsh, &mut cmd, "inkdown", &outdir)?;
    generate_to(Fish, &mut cmd, "inkdown", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
