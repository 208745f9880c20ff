use std::io::{self, BufRead};

use engine_logging::engine_info;
use log::LevelFilter;
use rxredux_demo::{parse_script, run_screen, DemoConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = DemoConfig::default();
    engine_logging::initialize(config.log_destination.clone(), LevelFilter::Debug);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let lines = if args.is_empty() {
        io::stdin().lock().lines().collect::<Result<Vec<_>, _>>()?
    } else {
        args
    };
    let events = parse_script(lines.iter().map(String::as_str))?;
    engine_info!("Running {} events", events.len());

    run_screen(&config, events, io::stdout()).await?;
    Ok(())
}
