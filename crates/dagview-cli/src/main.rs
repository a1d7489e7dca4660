use dagview::store::IdRemap;
use dagview::{DagView, Dataset, Direction, InteractionEvent, ViewOptions, build_graph};
use serde::Serialize;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
    Config(json5::Error),
    View(dagview::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Config(err) => write!(f, "config error: {err}"),
            CliError::View(err) => write!(f, "{err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<json5::Error> for CliError {
    fn from(value: json5::Error) -> Self {
        Self::Config(value)
    }
}

impl From<dagview::Error> for CliError {
    fn from(value: dagview::Error) -> Self {
        Self::View(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Check,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    verbose: bool,
    direction: Option<Direction>,
    config: Option<String>,
    events: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckOut<'a> {
    nodes: usize,
    edges: usize,
    roots: Vec<&'a str>,
    remaps: &'a [IdRemap],
}

fn usage() -> &'static str {
    "dagview\n\
\n\
USAGE:\n\
  dagview [layout] [--pretty] [--direction TB|BT|LR|RL] [--config <path>] [--events <path>] [-v|--verbose] [<path>|-]\n\
  dagview check [--pretty] [-v|--verbose] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the dataset is read from stdin.\n\
  - The dataset is JSON: {\"nodes\": [{\"id\": ..}], \"links\": [{\"source\": .., \"target\": ..}]}.\n\
  - --config reads view options as JSON5 (nodeWidth, nodeHeight, nodeSeparation, levelSeparation,\n\
    transitionDuration, direction, collapseAll, maxSweeps); --direction wins over the config.\n\
  - --events replays a JSON array of interaction events before the frame is printed.\n\
  - check prints node, edge and root counts plus the renamed duplicate ids.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "check" => args.command = Command::Check,
            "--pretty" => args.pretty = true,
            "--verbose" | "-v" => args.verbose = true,
            "--direction" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.direction = Some(
                    dir.parse::<Direction>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--events" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.events = Some(path.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn load_options(args: &Args) -> Result<ViewOptions, CliError> {
    let mut options = match args.config.as_deref() {
        Some(path) => json5::from_str::<ViewOptions>(&std::fs::read_to_string(path)?)?,
        None => ViewOptions::default(),
    };
    if let Some(direction) = args.direction {
        options.direction = direction;
    }
    Ok(options)
}

fn load_events(path: Option<&str>) -> Result<Vec<InteractionEvent>, CliError> {
    match path {
        Some(path) => Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?),
        None => Ok(Vec::new()),
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let dataset = Dataset::from_json_str(&text)?;

    match args.command {
        Command::Check => {
            let dag = build_graph(dataset)?;
            let out = CheckOut {
                nodes: dag.node_count(),
                edges: dag.edge_count(),
                roots: dag.roots(),
                remaps: dag.remaps(),
            };
            write_json(&out, args.pretty)
        }
        Command::Layout => {
            let options = load_options(&args)?;
            let events = load_events(args.events.as_deref())?;

            let mut view = DagView::new(options)?;
            view.load(dataset)?;
            for event in events {
                let name = event.name();
                let outcome = view.handle(event)?;
                tracing::debug!(event = name, ?outcome, "replayed event");
            }
            let Some(frame) = view.frame() else {
                return Err(dagview::Error::input("nothing was rendered").into());
            };
            write_json(frame, args.pretty)
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    init_logging(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
