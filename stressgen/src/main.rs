use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use fixture::{
    generate_uniform_with_progress, generate_waves, read_document, write_document,
    FixtureDocument, FixtureSummary, UniformConfig, WaveConfig, WaveSummary,
    DEFAULT_SPAWN_DURATION, MAX_WAVE_COUNT,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Wave count used when `--waves` is given without a value.
const BARE_WAVES_FLAG: &str = "10";

const QUICK_EXAMPLES: &str = "\
Quick examples:
  # 1000 entities over 30 seconds
  stressgen 1000 stress_1k.json 30

  # 10000 entities over 60 seconds
  stressgen 10000 stress_10k.json 60

  # 5000 entities spawning almost simultaneously
  stressgen 5000 stress_simultaneous.json 0.5

  # 1000 entities in 10 waves
  stressgen 1000 stress_waves.json --waves 10";

#[derive(Parser, Debug)]
#[command(
    name = "stressgen",
    version,
    about = "Enemy spawn fixture generator for server stress tests",
    after_help = QUICK_EXAMPLES
)]
struct Cli {
    /// Number of enemies to generate.
    entity_count: usize,
    /// Path of the JSON fixture to write.
    output_file: PathBuf,
    /// Spawn window in seconds [default: 120]. Ignored in wave mode.
    #[arg(value_parser = parse_duration)]
    duration: Option<f64>,
    /// Generate clustered waves instead of a uniform schedule [default: 10].
    #[arg(
        long,
        value_name = "N",
        num_args = 0..=1,
        default_missing_value = BARE_WAVES_FLAG,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_WAVE_COUNT))
    )]
    waves: Option<u32>,
    /// RNG seed for reproducible fixtures; drawn at random when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = parse_cli();

    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(seed, "seeding rng");
    let mut rng = StdRng::seed_from_u64(seed);

    let mut out = io::stdout().lock();
    match cli.waves {
        Some(wave_count) => {
            if cli.duration.is_some() {
                warn!("duration argument is ignored in wave mode");
            }
            let config = WaveConfig::new(cli.entity_count, wave_count);
            run_waves(&config, &cli.output_file, seed, &mut rng, &mut out)
        }
        None => {
            let duration = cli.duration.unwrap_or(DEFAULT_SPAWN_DURATION);
            let config = UniformConfig::new(cli.entity_count, duration);
            run_uniform(&config, &cli.output_file, seed, &mut rng, &mut out)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Parses arguments; on a usage error prints the help text to stdout and
/// exits with status 1.
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            let _ = Cli::command().print_long_help();
            eprintln!("\n{err}");
            process::exit(1);
        }
    }
}

fn parse_duration(raw: &str) -> Result<f64, String> {
    let seconds: f64 = raw
        .trim()
        .parse()
        .map_err(|err| format!("invalid duration: {err}"))?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(format!("duration must be finite and >= 0, got {seconds}"));
    }
    Ok(seconds)
}

fn run_uniform(
    config: &UniformConfig,
    output: &Path,
    seed: u64,
    rng: &mut StdRng,
    out: &mut impl Write,
) -> Result<()> {
    writeln!(out, "Generating {} entities...", config.entity_count)?;
    let mut progress_err = None;
    let doc = generate_uniform_with_progress(config, rng, |done, total| {
        if progress_err.is_none() {
            progress_err = writeln!(out, "  Generated {done}/{total} entities...").err();
        }
    })
    .context("generate uniform fixture")?;
    if let Some(err) = progress_err {
        return Err(err).context("report progress");
    }

    // The generator hands back a document already ordered by spawn time.
    writeln!(out, "Sorting entities by spawn time...")?;
    writeln!(out, "Writing to {}...", output.display())?;
    write_and_verify(output, &doc)?;

    let summary = FixtureSummary::from_document(&doc, config.spawn_duration);
    if summary.first_spawn.is_none() {
        warn!("fixture is empty; no spawn times to report");
    }
    write!(out, "{}", uniform_report(output, &summary, seed))?;
    Ok(())
}

fn run_waves(
    config: &WaveConfig,
    output: &Path,
    seed: u64,
    rng: &mut StdRng,
    out: &mut impl Write,
) -> Result<()> {
    writeln!(
        out,
        "Generating {} waves with {} entities each...",
        config.wave_count,
        config.entities_per_wave()
    )?;
    let doc = generate_waves(config, rng).context("generate wave fixture")?;
    if doc.len() < config.entity_count {
        info!(
            requested = config.entity_count,
            generated = doc.len(),
            "entity count truncated to a multiple of the wave count"
        );
    }

    write_and_verify(output, &doc)?;

    let summary = WaveSummary::from_document(&doc, config);
    write!(out, "{}", wave_report(output, &summary, seed))?;
    Ok(())
}

/// Writes the fixture, then reads it back and checks it the way the server
/// will load it.
fn write_and_verify(path: &Path, doc: &FixtureDocument) -> Result<()> {
    write_document(path, doc).with_context(|| format!("write {}", path.display()))?;
    let loaded = read_document(path).with_context(|| format!("read back {}", path.display()))?;
    loaded
        .validate()
        .with_context(|| format!("validate {}", path.display()))?;
    if loaded.len() != doc.len() {
        anyhow::bail!(
            "{} holds {} entities, expected {}",
            path.display(),
            loaded.len(),
            doc.len()
        );
    }
    Ok(())
}

fn uniform_report(output: &Path, summary: &FixtureSummary, seed: u64) -> String {
    let rule = "=".repeat(60);
    let lines = [
        String::new(),
        rule.clone(),
        format!(
            "✓ Successfully generated {} entities!",
            summary.entity_count
        ),
        format!("  Output file: {}", output.display()),
        format!("  Spawn duration: {:?}s", summary.spawn_duration),
        format!("  First spawn: {}", format_spawn(summary.first_spawn)),
        format!("  Last spawn: {}", format_spawn(summary.last_spawn)),
        format!(
            "  Average spawn rate: {:.1} entities/second",
            summary.avg_spawn_rate
        ),
        format!("  Seed: {seed}"),
        rule,
    ];
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn wave_report(output: &Path, summary: &WaveSummary, seed: u64) -> String {
    format!(
        "\n✓ Generated {} entities in {} waves\n  Output file: {}\n  Seed: {seed}\n",
        summary.entity_count,
        summary.wave_count,
        output.display()
    )
}

fn format_spawn(spawn: Option<f64>) -> String {
    spawn.map_or_else(|| "n/a (no entities)".to_owned(), |t| format!("{t:.3}s"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixture::{generate_uniform, DEFAULT_WAVE_COUNT};
    use std::fs;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("stressgen").chain(args.iter().copied()))
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("stressgen-cli-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn positional_defaults() {
        let cli = parse(&["1000", "out.json"]).unwrap();
        assert_eq!(cli.entity_count, 1000);
        assert_eq!(cli.output_file, PathBuf::from("out.json"));
        assert_eq!(cli.duration, None);
        assert_eq!(cli.waves, None);
        assert_eq!(cli.seed, None);
    }

    #[test]
    fn explicit_duration() {
        let cli = parse(&["5000", "sim.json", "0.5"]).unwrap();
        assert_eq!(cli.duration, Some(0.5));
    }

    #[test]
    fn bare_waves_flag_uses_default_count() {
        let cli = parse(&["100", "w.json", "--waves"]).unwrap();
        assert_eq!(cli.waves, Some(DEFAULT_WAVE_COUNT));
    }

    #[test]
    fn waves_flag_with_value() {
        let cli = parse(&["100", "w.json", "--waves", "4", "--seed", "9"]).unwrap();
        assert_eq!(cli.waves, Some(4));
        assert_eq!(cli.seed, Some(9));
    }

    #[test]
    fn zero_waves_rejected() {
        assert!(parse(&["100", "w.json", "--waves", "0"]).is_err());
    }

    #[test]
    fn waves_above_limit_rejected() {
        let limit = MAX_WAVE_COUNT.to_string();
        let over = (MAX_WAVE_COUNT + 1).to_string();
        assert_eq!(
            parse(&["100", "w.json", "--waves", &limit]).unwrap().waves,
            Some(MAX_WAVE_COUNT)
        );
        assert!(parse(&["100", "w.json", "--waves", &over]).is_err());
        assert!(parse(&["100", "w.json", "--waves", "4294967295"]).is_err());
    }

    #[test]
    fn missing_output_is_usage_error() {
        let err = parse(&["100"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn non_numeric_arguments_rejected() {
        assert!(parse(&["lots", "out.json"]).is_err());
        assert!(parse(&["10", "out.json", "soon"]).is_err());
    }

    #[test]
    fn duration_parser_bounds() {
        assert_eq!(parse_duration("30"), Ok(30.0));
        assert_eq!(parse_duration("0"), Ok(0.0));
        assert!(parse_duration("-1").is_err());
        assert!(parse_duration("inf").is_err());
        assert!(parse_duration("NaN").is_err());
    }

    #[test]
    fn help_lists_quick_examples() {
        let help = Cli::command().render_long_help().to_string();
        assert!(help.contains("Quick examples"));
        assert!(help.contains("--waves"));
    }

    #[test]
    fn uniform_report_lists_statistics() {
        let mut rng = StdRng::seed_from_u64(3);
        let doc = generate_uniform(&UniformConfig::new(40, 20.0), &mut rng).unwrap();
        let summary = FixtureSummary::from_document(&doc, 20.0);
        let report = uniform_report(Path::new("out.json"), &summary, 3);
        assert!(report.contains("✓ Successfully generated 40 entities!"));
        assert!(report.contains("Output file: out.json"));
        assert!(report.contains("Spawn duration: 20.0s"));
        assert!(report.contains("Average spawn rate: 2.0 entities/second"));
        assert!(report.contains("Seed: 3"));
    }

    #[test]
    fn empty_uniform_report_marks_missing_spawns() {
        let summary = FixtureSummary::from_document(&FixtureDocument::default(), 120.0);
        let report = uniform_report(Path::new("empty.json"), &summary, 0);
        assert!(report.contains("First spawn: n/a"));
        assert!(report.contains("Last spawn: n/a"));
    }

    #[test]
    fn wave_report_confirms_count() {
        let summary = WaveSummary {
            wave_count: 10,
            entities_per_wave: 10,
            entity_count: 100,
        };
        let report = wave_report(Path::new("w.json"), &summary, 1);
        assert!(report.contains("✓ Generated 100 entities in 10 waves"));
    }

    #[test]
    fn run_uniform_writes_verified_fixture() {
        let path = temp_path("uniform");
        let mut rng = StdRng::seed_from_u64(12);
        let mut out = Vec::new();
        run_uniform(&UniformConfig::new(5, 0.5), &path, 12, &mut rng, &mut out).unwrap();
        let doc = read_document(&path).unwrap();
        assert_eq!(doc.len(), 5);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn run_uniform_reports_steps_in_order() {
        let path = temp_path("uniform-steps");
        let mut rng = StdRng::seed_from_u64(21);
        let mut out = Vec::new();
        run_uniform(&UniformConfig::new(2500, 10.0), &path, 21, &mut rng, &mut out).unwrap();
        fs::remove_file(&path).unwrap();

        let text = String::from_utf8(out).unwrap();
        let writing = format!("Writing to {}...", path.display());
        let steps: [&str; 6] = [
            "Generating 2500 entities...",
            "  Generated 1000/2500 entities...",
            "  Generated 2000/2500 entities...",
            "Sorting entities by spawn time...",
            &writing,
            "✓ Successfully generated 2500 entities!",
        ];
        let positions: Vec<usize> = steps
            .iter()
            .map(|step| text.find(step).unwrap_or_else(|| panic!("missing {step:?} in {text}")))
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]), "{text}");
    }

    #[test]
    fn run_waves_writes_verified_fixture() {
        let path = temp_path("waves");
        let mut rng = StdRng::seed_from_u64(13);
        let mut out = Vec::new();
        run_waves(&WaveConfig::new(100, 10), &path, 13, &mut rng, &mut out).unwrap();
        let doc = read_document(&path).unwrap();
        assert_eq!(doc.len(), 100);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Generating 10 waves with 10 entities each..."));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn unwritable_output_fails_with_context() {
        let path = std::env::temp_dir()
            .join(format!("stressgen-cli-missing-{}", std::process::id()))
            .join("out.json");
        let mut rng = StdRng::seed_from_u64(1);
        let err = run_uniform(&UniformConfig::new(1, 1.0), &path, 1, &mut rng, &mut Vec::new())
            .unwrap_err();
        assert!(err.to_string().starts_with("write "));
    }
}
