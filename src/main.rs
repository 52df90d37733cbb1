use bic_lookup::batch::{process_csv, write_codes, BatchSummary};
use bic_lookup::generator::{generate_codes, GeneratorConfig};
use bic_lookup::logging;
use bic_lookup::registry::{default_data_dir, BankRegistry, DirectoryRegistry};
use bic_lookup::util::parse_country_list;
use bic_lookup::BicResult;
use clap::{Parser, Subcommand};
use rand::Rng;
use std::fs::create_dir_all;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "bic-lookup")]
#[command(about = "SWIFT/BIC validation and bank lookup", long_about = None)]
struct Cli {
    /// Directory holding <cc>.yml bank datasets (defaults to $BIC_DATA_DIR, then ./data)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Parse(ParseArgs),
    Batch(BatchArgs),
    Generate(GenerateArgs),
}

#[derive(Parser)]
struct ParseArgs {
    #[arg(required = true)]
    codes: Vec<String>,
}

#[derive(Parser)]
struct BatchArgs {
    #[arg(long, default_value = "data/codes.csv")]
    input: PathBuf,
    #[arg(long, default_value = "data/output/codes_parsed.csv")]
    output: PathBuf,
}

#[derive(Parser)]
struct GenerateArgs {
    #[arg(long, default_value_t = 100)]
    count: usize,
    #[arg(long)]
    seed: Option<u64>,
    /// Comma separated country codes, EU member states when omitted
    #[arg(long)]
    countries: Option<String>,
    #[arg(long, default_value_t = 0.7)]
    branch_ratio: f64,
    #[arg(long, default_value = "data/codes.csv")]
    output: PathBuf,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    logging::init_logging("bic-lookup")?;
    let cli = Cli::parse();
    let registry = DirectoryRegistry::new(cli.data_dir.unwrap_or_else(default_data_dir));
    match cli.command {
        Command::Parse(args) => run_parse(args, &registry),
        Command::Batch(args) => run_batch(args, &registry),
        Command::Generate(args) => run_generate(args),
    }
}

fn run_parse(args: ParseArgs, registry: &DirectoryRegistry) -> Result<(), String> {
    let results = parse_codes(&args.codes, registry);
    for bic in &results {
        print_result(bic);
    }
    ensure_all_valid(&results)
}

fn parse_codes(codes: &[String], registry: &dyn BankRegistry) -> Vec<BicResult> {
    codes
        .iter()
        .map(|raw| BicResult::with_registry(raw, registry))
        .collect()
}

// Any invalid code makes the command fail, which `main` turns into exit status 1.
fn ensure_all_valid(results: &[BicResult]) -> Result<(), String> {
    let invalid = results.iter().filter(|bic| !bic.valid()).count();
    if invalid > 0 {
        return Err(format!("{} of {} code(s) invalid", invalid, results.len()));
    }
    Ok(())
}

fn print_result(bic: &BicResult) {
    println!("original:      {}", bic.original());
    println!("valid:         {}", bic.valid());
    if !bic.valid() {
        for error in bic.errors() {
            println!("error:         {} ({})", error, error.description());
        }
        println!();
        return;
    }
    let fields = [
        ("formatted", bic.formatted()),
        ("bank_code", bic.bank_code()),
        ("bank_name", bic.bank_name()),
        ("country_code", bic.country_code()),
        ("country_name", bic.country_name()),
        ("location_code", bic.location_code()),
        ("location_name", bic.location_name()),
        ("branch_code", bic.branch_code()),
        ("branch_name", bic.branch_name()),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("{:<14} {}", format!("{label}:"), value);
        }
    }
    println!();
}

fn run_batch(args: BatchArgs, registry: &DirectoryRegistry) -> Result<(), String> {
    if let Some(parent) = args.output.parent() {
        create_dir_all(parent).map_err(|err| err.to_string())?;
    }
    let start = Instant::now();
    let summary = process_csv(&args.input, &args.output, registry)?;
    let elapsed = start.elapsed();

    emit_info_line(&format!(
        "Batch: input={} output={} data_dir={}",
        args.input.display(),
        args.output.display(),
        registry.dir().display()
    ));
    log_batch_summary(&summary);
    emit_info_line(&format!("Batch time: {} ms", elapsed.as_millis()));
    Ok(())
}

fn log_batch_summary(summary: &BatchSummary) {
    emit_info_line(&format!(
        "Codes: total={} valid={} invalid={} enriched={}",
        summary.total_records,
        summary.valid_records,
        summary.invalid_records,
        summary.enriched_records
    ));
    let mut items: Vec<_> = summary.error_counts.iter().collect();
    items.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (error, count) in items {
        emit_info_line(&format!("Errors: {} = {}", error, count));
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), String> {
    let seed = args.seed.unwrap_or_else(random_seed);
    let countries = match args.countries.as_deref() {
        Some(value) => parse_country_list(value)?,
        None => Vec::new(),
    };
    let config = GeneratorConfig {
        count: args.count,
        countries,
        branch_ratio: args.branch_ratio,
    };

    let codes = generate_codes(&config, seed)?;
    if let Some(parent) = args.output.parent() {
        create_dir_all(parent).map_err(|err| err.to_string())?;
    }
    write_codes(&args.output, &codes)?;

    emit_info_line(&format!(
        "Generated {} code(s), seed {}, output {}",
        codes.len(),
        seed,
        args.output.display()
    ));
    Ok(())
}

fn random_seed() -> u64 {
    let mut rng = rand::rngs::OsRng;
    rng.gen()
}

fn emit_info_line(message: &str) {
    if log::log_enabled!(log::Level::Info) {
        log::info!("{}", message);
    } else {
        println!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bic_lookup::NoRegistry;

    fn codes(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|code| code.to_string()).collect()
    }

    #[test]
    fn all_valid_codes_succeed() {
        let results = parse_codes(&codes(&["PSST FR PP SCE", "DEUTDEFF"]), &NoRegistry);
        assert_eq!(results.len(), 2);
        assert!(ensure_all_valid(&results).is_ok());
    }

    #[test]
    fn invalid_codes_are_counted_and_fail() {
        let results = parse_codes(
            &codes(&["PSSTFRPPSCE", "PSSTFRPPS", "PSSTFAPPSCE"]),
            &NoRegistry,
        );
        assert_eq!(
            ensure_all_valid(&results),
            Err("2 of 3 code(s) invalid".to_string())
        );
    }

    #[test]
    fn results_keep_input_order() {
        let results = parse_codes(&codes(&["bad", "BARCGB22"]), &NoRegistry);
        assert_eq!(results[0].original(), "bad");
        assert_eq!(results[1].formatted(), Some("BARCGB22"));
    }
}
