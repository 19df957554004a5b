mod app;
mod core;
mod effect;
mod platform;
mod sway;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use argh::FromArgs;
use tracing_subscriber::EnvFilter;
use wrandr_ipc::{Command, OutputFormat, Response};

use crate::app::App;
use crate::core::{Config, ModeSpec, State};
use crate::platform::{OutputSystem, SwayOutputSystem};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// wrandr - arrange sway outputs and generate output commands
#[derive(FromArgs)]
struct Cli {
    /// config file (default: $XDG_CONFIG_HOME/wrandr/config.json)
    #[argh(option)]
    config: Option<PathBuf>,
    /// world pixels per map unit
    #[argh(option)]
    density: Option<i32>,
    /// snap distance in map units
    #[argh(option)]
    tolerance: Option<i32>,
    /// program used to query and configure outputs
    #[argh(option)]
    swaymsg: Option<String>,
    #[argh(subcommand)]
    command: Option<SubCommand>,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum SubCommand {
    List(ListCmd),
    Export(ExportCmd),
    Apply(ApplyCmd),
    Set(SetCmd),
    Session(SessionCmd),
    Version(VersionCmd),
}

/// List outputs and their modes
#[derive(FromArgs)]
#[argh(subcommand, name = "list")]
struct ListCmd {}

/// Print one configuration line per output
#[derive(FromArgs)]
#[argh(subcommand, name = "export")]
struct ExportCmd {
    /// output format: swaymsg, kanshi, legacy
    #[argh(option)]
    format: Option<OutputFormat>,
}

/// Re-apply the current output configuration
#[derive(FromArgs)]
#[argh(subcommand, name = "apply")]
struct ApplyCmd {
    /// print the commands instead of running them
    #[argh(switch)]
    dry_run: bool,
}

/// Change one output, then apply all outputs
#[derive(FromArgs)]
#[argh(subcommand, name = "set")]
struct SetCmd {
    /// output name (e.g., DP-1)
    #[argh(positional)]
    output: String,
    /// enable the output
    #[argh(switch)]
    enable: bool,
    /// disable the output
    #[argh(switch)]
    disable: bool,
    /// mode as WIDTHxHEIGHT[@RATE]
    #[argh(option)]
    mode: Option<ModeSpec>,
    /// scale factor (0.1-4.0)
    #[argh(option)]
    scale: Option<f64>,
    /// position in pixels as X,Y
    #[argh(option, from_str_fn(parse_position))]
    position: Option<(i32, i32)>,
    /// print the commands instead of running them
    #[argh(switch)]
    dry_run: bool,
}

/// Serve JSON commands on stdin, one per line
#[derive(FromArgs)]
#[argh(subcommand, name = "session")]
struct SessionCmd {}

/// Show version information
#[derive(FromArgs)]
#[argh(subcommand, name = "version")]
struct VersionCmd {}

fn main() -> Result<()> {
    let cli: Cli = argh::from_env();

    let command = match cli.command {
        None => {
            // No subcommand - show help (simulate --help)
            let args: Vec<&str> = vec!["wrandr", "--help"];
            match Cli::from_args(&args[..1], &args[1..]) {
                Ok(_) => {}
                Err(e) => {
                    println!("{}", e.output);
                }
            }
            return Ok(());
        }
        Some(SubCommand::Version(_)) => {
            println!("wrandr {}", VERSION);
            return Ok(());
        }
        Some(command) => command,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config, cli.density, cli.tolerance, cli.swaymsg)?;
    let system = SwayOutputSystem::new(&config.swaymsg);
    let mut app = App::start(config, system)?;

    match command {
        SubCommand::List(_) => {
            print_outputs(app.state());
            Ok(())
        }
        SubCommand::Export(cmd) => run_commands(
            &mut app,
            vec![Command::Export {
                format: cmd.format,
            }],
        ),
        SubCommand::Apply(cmd) => run_commands(
            &mut app,
            vec![Command::Apply {
                dry_run: cmd.dry_run,
            }],
        ),
        SubCommand::Set(cmd) => {
            let commands = to_commands(cmd, app.state())?;
            run_commands(&mut app, commands)
        }
        SubCommand::Session(_) => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            app.run_session(stdin.lock(), stdout.lock())
        }
        SubCommand::Version(_) => unreachable!("handled above"),
    }
}

fn load_config(
    path: Option<PathBuf>,
    density: Option<i32>,
    tolerance: Option<i32>,
    swaymsg: Option<String>,
) -> Result<Config> {
    let mut config = Config::load(path.as_deref()).context("Failed to load config")?;
    if let Some(density) = density {
        config.density = density;
    }
    if let Some(tolerance) = tolerance {
        config.snap_tolerance = tolerance;
    }
    if let Some(swaymsg) = swaymsg {
        config.swaymsg = swaymsg;
    }
    config.validate()?;
    Ok(config)
}

fn to_commands(cmd: SetCmd, state: &State) -> Result<Vec<Command>> {
    let Some(output) = state.output(&cmd.output) else {
        bail!("Unknown output: {}", cmd.output);
    };
    if cmd.enable && cmd.disable {
        bail!("--enable and --disable are mutually exclusive");
    }

    let mut commands = Vec::new();

    if cmd.enable || cmd.disable {
        commands.push(Command::SetActive {
            output: cmd.output.clone(),
            active: cmd.enable,
        });
    }
    if let Some(spec) = cmd.mode {
        let Some(mode) = output.find_mode(&spec) else {
            bail!("Output {} has no mode matching {}x{}", cmd.output, spec.width, spec.height);
        };
        commands.push(Command::SetMode {
            output: cmd.output.clone(),
            width: mode.width,
            height: mode.height,
            refresh: mode.refresh,
        });
    }
    if let Some(scale) = cmd.scale {
        commands.push(Command::SetScale {
            output: cmd.output.clone(),
            scale,
        });
    }
    if let Some((x, y)) = cmd.position {
        commands.push(Command::SetPosition {
            output: cmd.output.clone(),
            x,
            y,
        });
    }
    commands.push(Command::Apply {
        dry_run: cmd.dry_run,
    });

    Ok(commands)
}

fn parse_position(s: &str) -> Result<(i32, i32), String> {
    let invalid = || format!("Invalid position: {} (use X,Y)", s);
    let (x, y) = s.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse().map_err(|_| invalid())?;
    let y = y.trim().parse().map_err(|_| invalid())?;
    Ok((x, y))
}

fn run_commands<S: OutputSystem>(app: &mut App<S>, commands: Vec<Command>) -> Result<()> {
    for cmd in &commands {
        let response = app.dispatch(cmd);
        if !print_response(response) {
            std::process::exit(1);
        }
    }
    Ok(())
}

/// Print a response; returns false when it reports a failure.
fn print_response(response: Response) -> bool {
    match response {
        Response::Ok => true,
        Response::Error { message } => {
            eprintln!("Error: {}", message);
            false
        }
        Response::Outputs { outputs } => {
            for o in outputs {
                println!(
                    "{}: {} [{}x{} @ ({},{})] {}",
                    o.name, o.current_mode.label, o.width, o.height, o.x, o.y, o.style_class
                );
            }
            true
        }
        Response::Position { x, y } => {
            println!("{},{}", x, y);
            true
        }
        Response::Commands { lines } => {
            for line in lines {
                println!("{}", line);
            }
            true
        }
        Response::Applied { results } => {
            let mut ok = true;
            for r in results {
                match r.error {
                    None => println!("{}", r.command),
                    Some(e) => {
                        eprintln!("Error: {}: {}", r.output, e);
                        ok = false;
                    }
                }
            }
            ok
        }
    }
}

fn print_outputs(state: &State) {
    for o in state.outputs() {
        println!(
            "{} {} ({})",
            o.name,
            o.identifier(),
            if o.active { "active" } else { "inactive" }
        );
        if o.active {
            println!(
                "  {} at {},{} scale {:.2}",
                o.current_mode, o.rect.x, o.rect.y, o.scale
            );
        }
        for mode in &o.modes {
            let marker = if o.active && *mode == o.current_mode {
                "*"
            } else {
                " "
            };
            println!("  {} {}", marker, mode);
        }
    }
}
