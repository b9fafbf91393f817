//! Terminal demo entry point.
//!
//! Loads a targeting config and a tile field, registers the demo strategies,
//! runs a single lookup and prints the field with the result marked.
mod config;
mod demo;

use std::sync::Arc;

use anyhow::Result;
use config::DemoConfig;
use demo::NativeTargeting;
use runtime::{CursorRuntime, LogSink};
use targeting_content::{ConfigLoader, FieldLoader};
use targeting_core::grid::world_to_cell;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let demo_config = DemoConfig::from_env();

    let config = match &demo_config.config_path {
        Some(path) => ConfigLoader::load(path)?,
        None => ConfigLoader::parse(demo::BUNDLED_CONFIG)?,
    };
    let field = Arc::new(match &demo_config.field_path {
        Some(path) => FieldLoader::load(path)?,
        None => FieldLoader::parse(demo::BUNDLED_FIELD)?,
    });

    let mut runtime = CursorRuntime::new(config)?.with_sink(LogSink);
    demo::register_strategies(&runtime, &field)?;
    let mut native = NativeTargeting::new(Arc::clone(&field));

    let tool = demo_config.tool;
    let outcome = demo::run(
        &mut runtime,
        &mut native,
        tool,
        demo_config.anchor,
        demo_config.hint,
    )?;

    let query = demo::query(demo_config.anchor, demo_config.hint, runtime.config().cell_size);
    let agent = world_to_cell(query.center(), runtime.config().cell_size);

    let mut marks = vec![(agent, '@'), (demo_config.hint, '+')];
    if let Some(target) = outcome.target {
        marks.push((target, 'X'));
    }
    print!("{}", field.render(&marks));

    match (outcome.target, outcome.producer) {
        (Some(target), Some(producer)) => {
            println!("{tool}: target {target} from {producer}");
        }
        _ => println!("{tool}: no target"),
    }

    Ok(())
}

/// Logs go to stderr so the rendered field on stdout stays clean.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
