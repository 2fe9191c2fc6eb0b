//! subsearch: check which configured subnets a list of IP addresses fall into.

use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

use subsearch::geo::GeoClient;
use subsearch::notify::{notify_all, EmailNotifier, Notifier, TelegramNotifier};
use subsearch::{input, output, report, Classifier, OutputFormat, Registry, Settings, Summary};

#[derive(Parser)]
#[command(name = "subsearch")]
#[command(version)]
#[command(about = "Check if IPs are in specified subnets", long_about = None)]
struct Cli {
    /// IPs to check
    ips: Vec<String>,

    /// Single IP to check
    #[arg(long)]
    ip: Option<String>,

    /// File containing IPs to check (one per line, or CSV with --column)
    #[arg(long)]
    file: Option<PathBuf>,

    /// Column name in the CSV file containing IPs
    #[arg(long)]
    column: Option<String>,

    /// Name of the subnet group to check against
    #[arg(long)]
    subnet: Option<String>,

    /// Print the configured subnets and exit
    #[arg(long)]
    psubs: bool,

    /// Write results to results.json or results.csv
    #[arg(long, value_enum)]
    output: Option<OutputFormat>,

    /// Email address to send the results to
    #[arg(long)]
    email: Option<String>,

    /// Include geolocation information for IPs
    #[arg(long)]
    geolocation: bool,

    /// Send results via Telegram
    #[arg(long)]
    telegram: bool,

    /// Subnet configuration, overrides SUBNETS (name:cidr1;cidr2,...)
    #[arg(long)]
    subnets: Option<String>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load();
    let config_text = cli.subnets.as_deref().unwrap_or(&settings.subnets);
    let (registry, _diagnostics) = Registry::parse(config_text);

    if cli.psubs {
        print_subnets(&registry);
        return Ok(());
    }

    let ips = if let Some(ip) = &cli.ip {
        vec![ip.clone()]
    } else if !cli.ips.is_empty() {
        cli.ips.clone()
    } else if let Some(file) = &cli.file {
        input::read_ips(file, cli.column.as_deref())?
    } else {
        return Err("No IPs provided. Use command-line arguments or specify a file.".into());
    };

    if ips.is_empty() {
        return Err("No IPs to check. Please provide IPs via command-line arguments or a file.".into());
    }

    let start = Instant::now();
    let results = Classifier::new(&registry).classify(&ips, cli.subnet.as_deref());
    let elapsed = start.elapsed();

    report::log_results(&results);
    Summary::from_results(&results).log();

    if cli.geolocation {
        let geo = GeoClient::new(settings.geolocation_url())?;
        for result in &results {
            log::info!("Geolocation for {}: {}", result.ip, geo.lookup(&result.ip));
        }
    }

    if let Some(format) = cli.output {
        output::write_results(&results, format, format.default_path())?;
    }

    let mut notifiers: Vec<Box<dyn Notifier>> = Vec::new();
    if let Some(recipient) = &cli.email {
        match settings.email() {
            Ok(email) => notifiers.push(Box::new(EmailNotifier::new(email, recipient.as_str()))),
            Err(e) => log::error!("Failed to send Email notification: {}", e),
        }
    }
    if cli.telegram {
        match settings.telegram().and_then(TelegramNotifier::new) {
            Ok(telegram) => notifiers.push(Box::new(telegram)),
            Err(e) => log::error!("Failed to send Telegram notification: {}", e),
        }
    }
    notify_all(&notifiers, &results);

    log::info!("Execution time: {:.2} seconds", elapsed.as_secs_f64());
    Ok(())
}

fn print_subnets(registry: &Registry) {
    log::info!("Configured Subnets:");
    for line in report::describe_registry(registry) {
        log::info!("{}", line);
    }
}
