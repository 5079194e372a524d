use std::{cell::RefCell, path::PathBuf, rc::Rc, time::Duration};

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use robot_world::{
    config::WorldConfig,
    domain::RobotModel,
    population::{populate_demo, RobotFactory},
    simulator::Animation,
    views::TableAdapter,
};

/// Animates a composition of bouncing robots and prints their final state.
#[derive(Parser, Debug)]
#[command(name = "robot-world")]
#[command(version, about, long_about = None)]
struct Args {
    /// World configuration file (TOML)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of animation ticks
    #[arg(short, long, default_value_t = 100)]
    ticks: u64,

    /// Time between two ticks in milliseconds
    #[arg(long, default_value_t = 25)]
    period_ms: u64,

    /// Number of random robots added to the demo scene
    #[arg(long, value_name = "N", default_value_t = 0)]
    random: usize,

    /// Seed for random robots
    #[arg(long)]
    seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();

    let filter = if args.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .init();

    let config = WorldConfig::load_or_default(args.config.as_deref());
    let mut model = RobotModel::from_config(&config);
    populate_demo(&mut model);

    if args.random > 0 {
        let mut factory = args.seed.map(RobotFactory::new).unwrap_or_default();
        factory.populate(&mut model, &config.robot_kinds(), args.random);
    }

    info!(
        width = model.bounds().width(),
        height = model.bounds().height(),
        robots = model.root().robot_count(),
        "world created"
    );

    let table = Rc::new(RefCell::new(TableAdapter::new(model.root().clone())));
    model.add_listener(table.clone());

    let mut animation = Animation::new(model, Duration::from_millis(args.period_ms));
    animation.run(args.ticks);

    print!("{}", table.borrow());
}
