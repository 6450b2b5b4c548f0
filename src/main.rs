use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use alchemy::combine::Resolution;
use alchemy::config::{ConfigError, EngineConfig};
use alchemy::engine::Engine;
use alchemy::entity::Entity;
use alchemy::generator::LlmGenerator;
use alchemy::geom::{Point, Rect};
use alchemy::input::{Button, InputEvent};
use alchemy::llm::LlmClient;
use alchemy::llm::types::LlmError;
use alchemy::panel::Template;
use alchemy::render::{Color, MonospaceMetrics, Surface};
use clap::Parser;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("llm: {0}")]
    Llm(#[from] LlmError),
    #[error("combination still pending after {0} ticks")]
    Stalled(u32),
}

#[derive(Parser, Debug)]
#[command(name = "alchemy", about = "Headless alchemy canvas: drop one tile onto another and print the result")]
struct Cli {
    /// Label of the tile that gets dragged.
    #[arg(long, default_value = "Fire")]
    first: String,

    /// Label of the tile it is dropped onto.
    #[arg(long, default_value = "Water")]
    second: String,

    /// Give up after this many ticks.
    #[arg(long, env = "ALCHEMY_MAX_TICKS", default_value_t = 1000)]
    max_ticks: u32,

    /// Milliseconds between ticks.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    /// Seed for spawn positions.
    #[arg(long)]
    seed: Option<u64>,
}

/// Discards draw calls; counts them for the log.
#[derive(Default)]
struct Headless {
    calls: usize,
}

impl Surface for Headless {
    type Error = Infallible;

    fn fill_rect(&mut self, _rect: Rect, _color: Color) -> Result<(), Infallible> {
        self.calls += 1;
        Ok(())
    }

    fn stroke_rect(&mut self, _rect: Rect, _color: Color, _thickness: f64) -> Result<(), Infallible> {
        self.calls += 1;
        Ok(())
    }

    fn draw_text(&mut self, _text: &str, _origin: Point, _color: Color, _bg: Option<Color>) -> Result<(), Infallible> {
        self.calls += 1;
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt::init();
    if let Err(err) = dotenvy::dotenv() {
        debug!(%err, "no .env file loaded");
    }

    let cli = Cli::parse();
    let config = EngineConfig::from_env()?;
    let llm = LlmClient::from_env()?;
    info!(model = llm.model(), "llm client ready");

    let generator = Arc::new(LlmGenerator::new(Arc::new(llm)));
    let mut engine = Engine::new(&config, generator, Box::new(MonospaceMetrics::default()), Handle::current());
    if let Some(seed) = cli.seed {
        engine = engine.with_seed(seed);
    }

    let first = engine.spawn_template(&cli.first);
    let second = engine.spawn_template(&cli.second);
    let (Some(from), Some(to)) = (
        engine.store().get(&first).map(Entity::position),
        engine.store().get(&second).map(Entity::position),
    ) else {
        return Ok(());
    };

    let script = [
        InputEvent::PointerDown { pos: from, button: Button::Primary },
        InputEvent::PointerMove { pos: to },
        InputEvent::PointerUp { pos: to, button: Button::Primary },
    ];
    let mut surface = Headless::default();
    let Ok(report) = engine.tick(script, &mut surface);
    debug!(actions = ?report.actions, draw_calls = surface.calls, "scripted drag applied");

    let mut ticks = 0;
    while engine.in_flight() > 0 {
        if ticks == cli.max_ticks {
            return Err(AppError::Stalled(ticks));
        }
        tokio::time::sleep(Duration::from_millis(cli.tick_ms)).await;
        let Ok(report) = engine.tick([], &mut surface);
        for resolution in report.resolutions {
            match resolution {
                Resolution::Merged { label, discovered, .. } => info!(%label, discovered, "combined"),
                Resolution::Failed => warn!("combination failed; tiles are free again"),
                Resolution::Stale => debug!("combination outlived its tiles"),
            }
        }
        ticks += 1;
    }

    for entity in engine.store().all() {
        let pos = entity.position();
        println!("{:>4} {:>7.1} {:>7.1}  {}", entity.z_order(), pos.x, pos.y, entity.label());
    }
    let catalogue: Vec<&str> = engine.panel().templates().iter().map(Template::label).collect();
    println!("templates: {}", catalogue.join(", "));
    Ok(())
}
