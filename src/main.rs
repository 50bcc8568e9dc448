use clap::{ArgAction, Parser};
use trailpen::{Config, input::StrategyKind};

mod backend;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("TRAILPEN_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "trailpen")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "Freehand line drawing overlay for Wayland compositors")]
struct Cli {
    /// Show the drawing overlay now
    #[arg(long, short = 'a', action = ArgAction::SetTrue)]
    active: bool,

    /// Initial line drawing strategy (straight or wavy)
    #[arg(long, short = 's', value_name = "NAME")]
    strategy: Option<String>,

    /// Write the documented example config to ~/.config/trailpen/config.toml
    #[arg(long, action = ArgAction::SetTrue)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.init_config {
        let path = Config::create_default_file()?;
        println!("Wrote example config to {}", path.display());
        return Ok(());
    }

    let strategy = cli
        .strategy
        .as_deref()
        .map(str::parse::<StrategyKind>)
        .transpose()
        .map_err(anyhow::Error::msg)?;

    if cli.active {
        if std::env::var("WAYLAND_DISPLAY").is_err() {
            log::error!("WAYLAND_DISPLAY not set - this application requires Wayland.");
            log::error!("Please run on a Wayland compositor with wlr-layer-shell support.");
            return Err(anyhow::anyhow!("Wayland environment required"));
        }

        log::info!("Starting drawing overlay...");
        log::info!("Controls:");
        log::info!("  - Draw: hold the left button and move");
        log::info!("  - Switch straight/wavy lines: Space");
        log::info!("  - Exit: Escape");
        log::info!("");

        backend::run_wayland(strategy)?;

        log::info!("Drawing overlay closed.");
    } else {
        println!("trailpen: Freehand line drawing overlay for Wayland compositors");
        println!();
        println!("Usage:");
        println!("  trailpen --active                 Show the overlay");
        println!("  trailpen --active --strategy wavy Start with wavy lines");
        println!("  trailpen --init-config            Write an example config file");
        println!("  trailpen --help                   Show help");
        println!();
        println!("While drawing:");
        println!("  - Hold the left button and move to draw");
        println!("  - Space switches between straight and wavy lines");
        println!("  - Escape closes the overlay");
        println!();
        println!("Requirements:");
        println!("  - Wayland compositor (Hyprland, Sway, etc.)");
        println!("  - wlr-layer-shell protocol support");
    }

    Ok(())
}
