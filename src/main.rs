mod debug_report;

use roadlex::{AnalyzerError, ConceptTable, Options, PreparsedParser, RoadAnalyzer, Scenario, Vehicle};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(&config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

struct CliConfig {
    input: String,
    ontology: PathBuf,
    graphs: PathBuf,
    vehicles: Option<PathBuf>,
    options: Option<PathBuf>,
    json: bool,
    color: bool,
}

fn run(config: &CliConfig) -> roadlex::Result<()> {
    let ontology = ConceptTable::from_json(&std::fs::read_to_string(&config.ontology)?)?;
    let parser = PreparsedParser::from_json(&std::fs::read_to_string(&config.graphs)?)?;

    let options = match &config.options {
        Some(path) => Options::from_json(&std::fs::read_to_string(path)?)?,
        None => Options::default(),
    };
    let vehicles: Vec<Vehicle> = match &config.vehicles {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)
            .map_err(|source| AnalyzerError::Document { what: "vehicles", source })?,
        None => Vec::new(),
    };

    let analyzer = RoadAnalyzer::with_options(ontology, options)?;
    let mut scenario = Scenario::with_vehicles(vehicles);
    let report = analyzer.analyze_paragraph(&config.input, &parser, &mut scenario);

    if config.json {
        let out = serde_json::to_string_pretty(&report).map_err(|source| AnalyzerError::Document { what: "report", source })?;
        println!("{out}");
    } else {
        debug_report::print_report(&config.input, &report, config.color);
    }
    Ok(())
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut ontology: Option<PathBuf> = None;
    let mut graphs: Option<PathBuf> = None;
    let mut vehicles: Option<PathBuf> = None;
    let mut options: Option<PathBuf> = None;
    let mut json = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("roadlex {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--json" => json = true,
            "--ontology" => ontology = Some(path_value(&mut args, "--ontology")?),
            "--graphs" => graphs = Some(path_value(&mut args, "--graphs")?),
            "--vehicles" => vehicles = Some(path_value(&mut args, "--vehicles")?),
            "--options" => options = Some(path_value(&mut args, "--options")?),
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                set_input(&mut input, value)?;
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    set_input(&mut input, rest)?;
                }
                break;
            }
            _ if arg.starts_with("--ontology=") => ontology = Some(PathBuf::from(arg.trim_start_matches("--ontology="))),
            _ if arg.starts_with("--graphs=") => graphs = Some(PathBuf::from(arg.trim_start_matches("--graphs="))),
            _ if arg.starts_with("--vehicles=") => vehicles = Some(PathBuf::from(arg.trim_start_matches("--vehicles="))),
            _ if arg.starts_with("--options=") => options = Some(PathBuf::from(arg.trim_start_matches("--options="))),
            _ if arg.starts_with("--input=") => {
                set_input(&mut input, arg.trim_start_matches("--input=").to_string())?;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                set_input(&mut input, rest)?;
                break;
            }
        }
    }

    let ontology = ontology.ok_or_else(|| format!("error: --ontology is required\n\n{}", help_text()))?;
    let graphs = graphs.ok_or_else(|| format!("error: --graphs is required\n\n{}", help_text()))?;

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, ontology, graphs, vehicles, options, json, color })
}

fn path_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<PathBuf, String> {
    args.next().map(PathBuf::from).ok_or_else(|| format!("error: {flag} expects a value"))
}

fn set_input(input: &mut Option<String>, value: String) -> Result<(), String> {
    if input.is_some() {
        return Err("error: input provided multiple times".to_string());
    }
    *input = Some(value);
    Ok(())
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "roadlex {version}

Extract a road-network model from an accident-scene paragraph.

Usage:
  roadlex --ontology <file> --graphs <file> [OPTIONS] [--] <paragraph...>
  roadlex --ontology <file> --graphs <file> [OPTIONS] --input <text>

Inputs:
  --ontology <file>          Concept table JSON: {{\"concepts\": [{{\"name\", \"category\", \"data_properties\"}}]}}
  --graphs <file>            Pre-parsed dependency JSON:
                             {{\"sentences\": [{{\"text\", \"relations\": [\"amod(road-6, north-5)\"]}}]}}
  --vehicles <file>          Optional vehicle list JSON: [{{\"id\": \"v1\", \"on_roadway\": false}}]
  --options <file>           Optional analysis options JSON (search depths, street cap).

Options:
  -i, --input <text>         Paragraph to analyze. If omitted, reads remaining args
                             or stdin when no args are provided.
  --json                     Print the analysis report as JSON.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Logging:
  RUST_LOG=roadlex=debug     Trace every pass (default level: warn).

Exit codes:
  0  Success.
  1  Fixture, options or I/O error.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
    )
}
