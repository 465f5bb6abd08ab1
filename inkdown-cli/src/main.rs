// Command-line interface for inkdown
//
// The binary is a thin shell over inkdown-babel: every conversion goes through the format
// registry, and the TOC/heading commands go through the outline walker.
//
// Converting:
//
// The conversion needs a to and from pair. The from is auto-detected from the file extension,
// while being overwrittable by an explicit --from flag. Reading from stdin ("-") always needs --from.
// Usage:
//  inkdown <input> --to <format> [--from <format>] [--output <file>]          - Convert (default)
//  inkdown convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above
//  inkdown toc <input> [--style linked|simple] [--title T] [--max-level N] [--html]
//  inkdown headings <input>                                                 - Heading records as JSON
//  inkdown slug <text>...                                                   - Anchor ids
//  inkdown --list-formats                                                   - List formats
//
// Extra Parameters:
//
// Format parameters can be passed using --extra-<parameter-name> <value>. They override the
// matching configuration keys:
//  inkdown notes.md --to html --extra-heading-ids
//  inkdown page.html --to markdown --extra-unsupported-tags reject

use clap::{Arg, ArgAction, Command, ValueHint};
use inkdown_babel::{
    build_toc_with_options, collect_headings, decode_source, slug, toc_html, FormatError,
    FormatRegistry, HeadingRecord, HtmlOutline, MarkdownOptions, TocOptions, TocStyle,
    UnsupportedTagPolicy,
};
use inkdown_config::{InkdownConfig, Loader, PROJECT_FILE};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};

const SUBCOMMANDS: &[&str] = &["convert", "toc", "headings", "slug", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        if let Some(key) = arg.strip_prefix("--extra-") {
            let has_value = args.get(i + 1).is_some_and(|next| !next.starts_with('-'));

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input file path, or '-' for stdin")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn from_arg() -> Arg {
    Arg::new("from")
        .long("from")
        .help("Source format (auto-detected from file extension if not specified)")
        .value_hint(ValueHint::Other)
}

fn build_cli() -> Command {
    Command::new("inkdown")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert between Markdown and rich-text HTML, and build tables of contents")
        .long_about(
            "inkdown converts between Markdown and the HTML subset produced by rich-text editors.\n\n\
            Commands:\n  \
            - convert:  Transform between markdown and html (default command)\n  \
            - toc:      Build a table of contents from a document's headings\n  \
            - headings: Print the heading outline as JSON\n  \
            - slug:     Turn heading text into anchor ids\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format options\n  \
            (heading-ids, code-language, unsupported-tags).\n\n\
            Examples:\n  \
            inkdown notes.md --to html                 # Convert to HTML (stdout)\n  \
            inkdown page.html --to markdown -o out.md  # Convert to a markdown file\n  \
            inkdown toc notes.md --style simple        # Unlinked table of contents",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
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
                .help("Log format detection and dispatch to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between formats.\n\n\
                    Supported formats:\n  \
                    - markdown: Markdown (.md, .markdown, .txt)\n  \
                    - html:     Rich-text HTML (.html, .htm)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    inkdown convert notes.md --to html            # Markdown to HTML (stdout)\n  \
                    inkdown convert page.html --to markdown -o a.md\n  \
                    cat a.md | inkdown - --from markdown --to html  # Read stdin\n  \
                    inkdown notes.md --to html                    # 'convert' is optional",
                )
                .arg(input_arg())
                .arg(from_arg())
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("toc")
                .about("Build a table of contents from a document's headings")
                .arg(input_arg())
                .arg(from_arg())
                .arg(
                    Arg::new("style")
                        .long("style")
                        .help("Entry style (defaults to the configured style)")
                        .value_parser(["linked", "simple"]),
                )
                .arg(
                    Arg::new("title")
                        .long("title")
                        .help("Title of the TOC heading"),
                )
                .arg(
                    Arg::new("max-level")
                        .long("max-level")
                        .help("Deepest heading level to include")
                        .value_parser(clap::value_parser!(u8).range(1..=6)),
                )
                .arg(
                    Arg::new("html")
                        .long("html")
                        .help("Emit the TOC as HTML instead of Markdown")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("headings")
                .about("Print the heading outline of a document as JSON")
                .arg(input_arg())
                .arg(from_arg()),
        )
        .subcommand(
            Command::new("slug")
                .about("Print the anchor id for each argument")
                .arg(
                    Arg::new("text")
                        .help("Heading text")
                        .required(true)
                        .num_args(1..)
                        .index(1),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, extra_params) = parse_extra_args(&args);

    // If no subcommand is provided, inject "convert"
    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            let first = cleaned_args.get(1).map(String::as_str).unwrap_or("");
            if cleaned_args.len() > 1
                && (!first.starts_with('-') || first == "-")
                && !SUBCOMMANDS.contains(&first)
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);
                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    init_logging(matches.get_flag("verbose"));

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    if let Err(message) = apply_config_overrides(&mut config, extra_params) {
        fail(message);
    }
    let registry = FormatRegistry::with_options(MarkdownOptions::from(&config.convert));

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&registry);
        return;
    }

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = required(sub_matches, "input");
            let from = resolve_from(&registry, input, sub_matches.get_one::<String>("from"))
                .unwrap_or_else(|| {
                    fail(format!(
                        "Could not detect format from filename '{input}'\nPlease specify --from explicitly"
                    ))
                });
            let to = required(sub_matches, "to");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(&registry, input, &from, to, output);
        }
        Some(("toc", sub_matches)) => {
            let input = required(sub_matches, "input");
            let mut options = TocOptions::from(&config.toc);
            if let Some(style) = sub_matches.get_one::<String>("style") {
                options.style = style
                    .parse::<TocStyle>()
                    .unwrap_or_else(|e| fail(format!("Error: {e}")));
            }
            if let Some(title) = sub_matches.get_one::<String>("title") {
                options.title = title.clone();
            }
            if let Some(level) = sub_matches.get_one::<u8>("max-level") {
                options.max_level = *level;
            }
            let headings = read_headings(&registry, input, sub_matches.get_one::<String>("from"));
            let result = if sub_matches.get_flag("html") {
                toc_html(&headings, &options)
            } else {
                build_toc_with_options(&headings, &options)
            };
            match result {
                Ok(toc) => println!("{toc}"),
                Err(e) => fail(format!("Error: {e}")),
            }
        }
        Some(("headings", sub_matches)) => {
            let input = required(sub_matches, "input");
            let headings = read_headings(&registry, input, sub_matches.get_one::<String>("from"));
            match serde_json::to_string_pretty(&headings) {
                Ok(json) => println!("{json}"),
                Err(e) => fail(format!("Error: {e}")),
            }
        }
        Some(("slug", sub_matches)) => {
            for text in sub_matches.get_many::<String>("text").into_iter().flatten() {
                println!("{}", slug(text));
            }
        }
        _ => fail("Unknown subcommand. Use --help for usage information."),
    }
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn required<'a>(matches: &'a clap::ArgMatches, id: &str) -> &'a str {
    matches
        .get_one::<String>(id)
        .map(|s| s.as_str())
        .unwrap_or_else(|| fail(format!("Missing required argument '{id}'")))
}

/// Source format: the explicit flag, else detection from the input's extension.
fn resolve_from(registry: &FormatRegistry, input: &str, explicit: Option<&String>) -> Option<String> {
    match explicit {
        Some(name) => Some(name.clone()),
        None if input == "-" => None,
        None => registry.detect_format_from_filename(input),
    }
}

fn read_input(input: &str) -> Vec<u8> {
    if input == "-" {
        let mut bytes = Vec::new();
        if let Err(e) = io::stdin().read_to_end(&mut bytes) {
            fail(format!("Error reading stdin: {e}"));
        }
        bytes
    } else {
        fs::read(input).unwrap_or_else(|e| fail(format!("Error reading file '{input}': {e}")))
    }
}

/// Handle the convert command
fn handle_convert_command(
    registry: &FormatRegistry,
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
) {
    for name in [from, to] {
        if let Err(e) = registry.get(name) {
            fail(format!("Error: {e}"));
        }
    }

    let bytes = read_input(input);
    let result = registry
        .convert(Some(bytes.as_slice()), from, to)
        .unwrap_or_else(|e| fail(format!("Conversion error: {e}")));

    match output {
        Some(path) => {
            if let Err(e) = fs::write(path, format!("{result}\n")) {
                fail(format!("Error writing file '{path}': {e}"));
            }
        }
        None => println!("{result}"),
    }
}

/// Headings of the input, read as HTML or as Markdown (the default for unknown extensions).
fn read_headings(
    registry: &FormatRegistry,
    input: &str,
    explicit_from: Option<&String>,
) -> Vec<HeadingRecord> {
    let from = resolve_from(registry, input, explicit_from).unwrap_or_else(|| "markdown".to_string());
    let bytes = read_input(input);
    let outline = decode_source(Some(bytes.as_slice()))
        .and_then(|source| registry.parse(source, &from))
        .map(|doc| HtmlOutline::parse(doc.as_str()))
        .unwrap_or_else(|e: FormatError| fail(format!("Error: {e}")));
    collect_headings(&outline)
}

/// Handle the list-formats command
fn handle_list_formats_command(registry: &FormatRegistry) {
    println!("Available formats:\n");
    for name in registry.list_formats() {
        if let Ok(format) = registry.get(&name) {
            println!(
                "  {name:<10} {} (.{})",
                format.description(),
                format.file_extensions().join(", .")
            );
        }
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> InkdownConfig {
    let loader = Loader::new().with_optional_file(PROJECT_FILE);
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader
        .build()
        .unwrap_or_else(|err| fail(format!("Failed to load configuration: {err}")))
}

/// Fold --extra-* parameters into the loaded configuration.
fn apply_config_overrides(
    config: &mut InkdownConfig,
    mut extra_params: HashMap<String, String>,
) -> Result<(), String> {
    if let Some(raw) = extra_params.remove("heading-ids") {
        config.convert.markdown.heading_ids = parse_bool_arg("heading-ids", &raw)?;
    }
    if let Some(raw) = extra_params.remove("code-language") {
        config.convert.markdown.code_language = parse_bool_arg("code-language", &raw)?;
    }
    if let Some(raw) = extra_params.remove("unsupported-tags") {
        config.convert.html.unsupported_tags = raw
            .parse::<UnsupportedTagPolicy>()
            .map_err(|e| format!("Invalid value for --extra-unsupported-tags: {e}"))?;
    }

    if !extra_params.is_empty() {
        let mut unknown: Vec<String> = extra_params.into_keys().collect();
        unknown.sort();
        return Err(format!("Unknown parameter(s): --extra-{}", unknown.join(", --extra-")));
    }
    Ok(())
}

fn parse_bool_arg(flag: &str, raw: &str) -> Result<bool, String> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        other => Err(format!("Invalid boolean value '{other}' for --extra-{flag}")),
    }
}
