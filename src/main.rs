use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sort_stepper::cli::Cli;
use sort_stepper::config::config::Config;
use sort_stepper::driver::Driver;
use sort_stepper::headless::{run_headless, TextPresenter, TraceFormat};
use sort_stepper::sequence::Sequence;
use sort_stepper::ui::tui_app::{run_tui, SortTui};
use sort_stepper::utils::dual_logging::get_dual_logger;
use sort_stepper::utils::logging::init_tracing_with_dual_logging;
use sort_stepper::widgets::bar_chart_widget::BarChartWidget;
use std::io;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.generate_config {
        let path = Config::get_config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(&path, Config::create_default_with_comments())
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Configuration file created at: {}", path.display());
        return Ok(());
    }

    let log_buffer = init_tracing_with_dual_logging(true);
    if let Some(logger) = get_dual_logger() {
        eprintln!("Debug logs: {}", logger.log_path().display());
    }

    let mut config = if cli.no_config {
        Config::default()
    } else {
        Config::load()?
    };
    cli.apply_overrides(&mut config);
    config.validate()?;

    let sequence = match cli.seed {
        Some(seed) => Sequence::generate_with(
            &mut StdRng::seed_from_u64(seed),
            config.sequence.size,
            config.sequence.min,
            config.sequence.max,
        ),
        None => Sequence::generate(config.sequence.size, config.sequence.min, config.sequence.max),
    };
    let algorithm = config.behavior.default_algorithm;
    info!(target: "system", "Starting {} on {} values", algorithm, sequence.len());

    if cli.headless {
        let format = if cli.json {
            TraceFormat::Json
        } else {
            TraceFormat::Text
        };
        let driver = Driver::new(sequence, algorithm, TextPresenter::new(io::stdout(), format));
        let runtime = tokio::runtime::Runtime::new()?;
        let sorted = runtime.block_on(run_headless(driver, config.auto.interval()));
        info!(target: "system", "Final sequence {:?}", sorted.values());
        return Ok(());
    }

    let driver = Driver::new(
        sequence,
        algorithm,
        BarChartWidget::new(config.display.show_values),
    );
    run_tui(SortTui::new(driver, config, log_buffer))
}
