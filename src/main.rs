use anyhow::{anyhow, bail, Context, Result};
use bikestations::display::{Selector, StationView};
use bikestations::{Gateway, GatewayConfig, Stations, DEFAULT_BASE_URL};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Application key for the Gothenburg open data portal
    #[arg(long, env = "BIKESTATIONS_APP_KEY", hide_env_values = true)]
    app_key: Option<String>,

    /// Base URL of the SelfServiceBicycleService
    #[arg(long, env = "BIKESTATIONS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds (no timeout by default)
    #[arg(long)]
    timeout: Option<u64>,

    /// Read the station feed from a file instead of the service
    #[arg(short, long)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List station names in feed order
    List,
    /// Show one station (the first one if no name is given)
    Show { name: Option<String> },
    /// Show the station closest to a position
    Closest {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },
    /// Pick stations interactively
    Browse,
    /// Print all stations as JSON
    Dump,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let stations = load_stations(&cli).await?;
    info!(count = stations.len(), "loaded stations");

    match &cli.command {
        Commands::List => {
            for name in stations.names() {
                println!("{}", name);
            }
        }
        Commands::Show { name } => {
            let mut selector = Selector::new(&stations);
            if let Some(name) = name {
                if !selector.select(name) {
                    bail!("No station named '{}'", name);
                }
            }
            match selector.view() {
                Some(view) => print_view(&view),
                None => println!("The feed contains no stations."),
            }
        }
        Commands::Closest {
            latitude,
            longitude,
        } => {
            let (station, distance) = stations.closest(*latitude, *longitude)?;
            println!("{:.0} m away", distance);
            print_view(&StationView::of(station));
        }
        Commands::Browse => browse(&stations)?,
        Commands::Dump => println!("{}", serde_json::to_string_pretty(&stations)?),
    }

    Ok(())
}

async fn load_stations(cli: &Cli) -> Result<Stations> {
    if let Some(path) = &cli.file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        return Ok(Stations::parse(&text)?);
    }

    let app_key = cli.app_key.clone().ok_or_else(|| {
        anyhow!("No application key. Pass --app-key or set BIKESTATIONS_APP_KEY.")
    })?;
    let mut config = GatewayConfig::new(app_key).with_base_url(&cli.base_url);
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let gateway = Gateway::new(config)?;
    let stations = gateway
        .get_stations()
        .await
        .context("Could not load the station feed")?;
    Ok(stations)
}

fn print_view(view: &StationView) {
    println!("{}", view.name);
    println!("{}", view);
}

fn browse(stations: &Stations) -> Result<()> {
    let mut selector = Selector::new(stations);
    if stations.is_empty() {
        println!("The feed contains no stations.");
        return Ok(());
    }

    for (i, name) in selector.names().iter().enumerate() {
        println!("{:>4}  {}", i + 1, name);
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        if let Some(view) = selector.view() {
            println!();
            print_view(&view);
        }

        print!("\nStation name or number (empty to quit): ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            break;
        }

        let selected = selector.select(input)
            || match input.parse::<usize>() {
                Ok(n) if n >= 1 => selector.select_index(n - 1),
                _ => false,
            };
        if !selected {
            println!("No station named '{}'", input);
        }
    }

    Ok(())
}
