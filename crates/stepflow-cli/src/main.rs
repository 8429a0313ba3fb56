use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;
use stepflow_cli::script::{parse_script, run_script};
use stepflow_cli::summary::describe_projection;
use stepflow_cli::{load_config, load_spec, play};
use stepflow_reveal::{GraphStateController, RenderAdapter};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Command::new("stepflow")
        .version(stepflow_reveal::VERSION)
        .about("Step-by-step reveal of workflow diagrams")
        .arg_required_else_help(true)
        .arg(
            Arg::new("spec")
                .long("spec")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Graph definition (.json, .yaml); defaults to the built-in sample"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Render settings (.toml)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log every state transition"),
        )
        .subcommand(
            Command::new("show")
                .about("Project the graph at one reveal step")
                .arg(
                    Arg::new("step")
                        .long("step")
                        .default_value("1")
                        .value_parser(value_parser!(usize))
                        .help("Reveal cursor (clamped to the step count)"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output the engine projection as JSON"),
                ),
        )
        .subcommand(Command::new("play").about("Reveal every step in turn"))
        .subcommand(
            Command::new("replay")
                .about("Apply a JSON action script and show the final state")
                .arg(
                    Arg::new("script")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON array of actions"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output the engine projection as JSON"),
                ),
        );

    let matches = cli.get_matches();

    let default_level = if matches.get_flag("verbose") { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let spec = load_spec(matches.get_one::<PathBuf>("spec").map(PathBuf::as_path))?;
    let config = load_config(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    let adapter = RenderAdapter::new(config);

    match matches.subcommand() {
        Some(("show", args)) => {
            let step = args.get_one::<usize>("step").copied().unwrap_or(1);
            let mut state = GraphStateController::new(spec);
            state.seek(step);
            print_projection(&state, &adapter, args.get_flag("json"))?;
        }
        Some(("play", _)) => {
            print!("{}", play(spec));
        }
        Some(("replay", args)) => {
            let path = args
                .get_one::<PathBuf>("script")
                .context("missing script path")?;
            let input = std::fs::read_to_string(path)
                .with_context(|| format!("reading script {}", path.display()))?;
            let actions = parse_script(&input)?;

            let mut state = GraphStateController::new(spec);
            let report = run_script(&mut state, &adapter, actions)?;
            eprintln!("applied {} actions, ignored {}", report.applied, report.ignored);
            print_projection(&state, &adapter, args.get_flag("json"))?;
        }
        _ => {}
    }

    Ok(())
}

fn print_projection(
    state: &GraphStateController,
    adapter: &RenderAdapter,
    json: bool,
) -> anyhow::Result<()> {
    let projection = adapter.project(state);
    if json {
        println!("{}", serde_json::to_string_pretty(&projection)?);
    } else {
        print!("{}", describe_projection(state, &projection));
    }
    Ok(())
}
