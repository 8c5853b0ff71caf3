use anyhow::{bail, Result};
use clap::Parser;
use scanner_core::{load_client_settings, GridMapping, HttpMotionService, MotionDriver};
use shared::domain::Direction;
use tracing_subscriber::EnvFilter;

/// Replays a key script against the motion service and prints the ledgers.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    cell_size: Option<f64>,
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Letters `L R U D`, or comma-separated names such as `left,ArrowUp`.
    #[arg(long)]
    keys: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();

    let settings =
        load_client_settings().with_overrides(args.server_url, args.cell_size, args.timeout_ms);

    let script = parse_key_script(&args.keys)?;
    let service = HttpMotionService::new(&settings.server_url, settings.request_timeout)?;
    let mut driver = MotionDriver::new(
        service,
        GridMapping::new(settings.cell_size),
        settings.frame_interval,
    );

    let session = driver.connect().await?;
    println!(
        "Connected to {}: cell ({}, {}) on a {}x{} grid",
        settings.server_url,
        session.position.x,
        session.position.y,
        session.bounds.width,
        session.bounds.height
    );

    let accepted = script.iter().filter(|d| driver.enqueue(**d)).count();
    if accepted < script.len() {
        println!(
            "Dropped {} key presses beyond the queue capacity",
            script.len() - accepted
        );
    }

    let report = driver.run_until_settled().await?;
    for failure in &report.move_failures {
        eprintln!("move failed: {failure}");
    }

    let sequencer = driver.sequencer();
    let summary = serde_json::json!({
        "cell": sequencer.current_cell(),
        "position": sequencer.position(),
        "visited": sequencer.visited(),
        "focused": sequencer.focus_ledger(),
        "moves_animated": report.moves_animated,
        "moves_unchanged": report.moves_unchanged,
        "move_failures": report.move_failures.len(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn parse_key_script(raw: &str) -> Result<Vec<Direction>> {
    let raw = raw.trim();
    if raw.contains(',') {
        return raw
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(parse_key_name)
            .collect();
    }

    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c.to_ascii_uppercase() {
            'L' => Ok(Direction::Left),
            'R' => Ok(Direction::Right),
            'U' => Ok(Direction::Up),
            'D' => Ok(Direction::Down),
            other => bail!("unknown key '{other}' in script"),
        })
        .collect()
}

fn parse_key_name(token: &str) -> Result<Direction> {
    if let Some(direction) = Direction::from_key_name(token) {
        return Ok(direction);
    }
    match token.to_ascii_lowercase().as_str() {
        "left" | "l" => Ok(Direction::Left),
        "right" | "r" => Ok(Direction::Right),
        "up" | "u" => Ok(Direction::Up),
        "down" | "d" => Ok(Direction::Down),
        _ => bail!("unknown key '{token}' in script"),
    }
}
