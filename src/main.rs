use anyhow::Context;
use clap::Parser;
use date_range::utils::{logger, validation::Validate};
use date_range::{
    CliConfig, ConfigProvider, DateRange, DateRangeError, FixedClock, RangeResolver, TomlConfig,
};

fn main() {
    let cli = CliConfig::parse();

    let file = match cli.config.as_deref().map(load_config).transpose() {
        Ok(file) => file,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            std::process::exit(1);
        }
    };

    let config = match &file {
        Some(file) => cli.with_defaults_from(file),
        None => cli,
    };

    let log_level = file.as_ref().and_then(TomlConfig::log_level);
    if file.as_ref().is_some_and(TomlConfig::json_logs) {
        logger::init_json_logger(log_level);
    } else {
        logger::init_cli_logger(config.verbose, log_level);
    }

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config) {
        tracing::error!("❌ {:#}", e);
        eprintln!("❌ {:#}", e);

        let input_error = e
            .downcast_ref::<DateRangeError>()
            .is_some_and(DateRangeError::is_input_error);
        std::process::exit(if input_error { 2 } else { 1 });
    }
}

fn load_config(path: &str) -> anyhow::Result<TomlConfig> {
    let file = TomlConfig::from_file(path).with_context(|| format!("failed to load {}", path))?;
    file.validate()
        .with_context(|| format!("invalid configuration in {}", path))?;
    Ok(file)
}

fn run(config: &CliConfig) -> anyhow::Result<()> {
    config.validate()?;

    // One snapshot of "now" for the whole run.
    let clock = match config.reference_now() {
        Some(reference) => FixedClock::parse(reference)?,
        None => FixedClock::snapshot(),
    };
    let resolver = RangeResolver::from_config(clock, config);

    let range = match config.preset()? {
        Some(preset) => resolver.resolve(preset, None)?,
        None => resolver.create(config.start.as_deref(), config.end.as_deref())?,
    };
    tracing::info!("Resolved range {}", range);

    let instants = match config.interval()? {
        Some(interval) => Some(range.each(interval, config.reverse).collect::<Vec<_>>()),
        None => None,
    };

    if config.json {
        print_json(&range, instants.as_deref())?;
    } else {
        print_text(&range, instants.as_deref())?;
    }

    Ok(())
}

fn print_text(range: &DateRange, instants: Option<&[chrono::NaiveDateTime]>) -> anyhow::Result<()> {
    println!("{}", range);
    println!("Start:    {}", range.start().format("%Y-%m-%d %H:%M:%S"));
    println!("End:      {}", range.end().format("%Y-%m-%d %H:%M:%S"));
    println!("Days:     {}", range.range_difference_in_days());
    println!(
        "Previous: {} to {}",
        range.prev_start()?.format("%Y-%m-%d %H:%M:%S"),
        range.prev_end().format("%Y-%m-%d %H:%M:%S")
    );

    for instant in instants.unwrap_or_default() {
        println!("{}", instant.format("%Y-%m-%d"));
    }

    Ok(())
}

fn print_json(range: &DateRange, instants: Option<&[chrono::NaiveDateTime]>) -> anyhow::Result<()> {
    let prev_start = range.prev_start()?;
    let document = serde_json::json!({
        "text": range.as_text(),
        "range": range,
        "days": range.range_difference_in_days(),
        "previous": {
            "start": prev_start,
            "end": range.prev_end(),
        },
        "each": instants,
    });
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
