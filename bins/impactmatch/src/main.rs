//! impactmatch: score volunteers against NGOs and causes from the command line.

use clap::{Parser, Subcommand};
use impactmatch_cli::output::{
    display_name, format_count, format_duration, print_match, print_ranked_row, print_suggestion,
    Status,
};
use impactmatch_core::config::Config;
use impactmatch_core::error::{Error, Result, ResultExt};
use impactmatch_core::validation::Validator;
use impactmatch_matching::batch::truncate;
use impactmatch_matching::{
    city_coordinates, discover_causes, distance_between_cities, nearby_cities,
    personalized_causes, suggest_causes, Cause, DiscoverOptions, MatchingEngine, Preferences,
    Profile,
};
use impactmatch_telemetry::{LogFormat, TelemetryConfig, Timer};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "impactmatch")]
#[command(about = "Volunteer-to-NGO matching, cause discovery and preference feeds")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log format: compact or json
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a volunteer against one NGO
    Score {
        /// Volunteer profile JSON file ("-" for stdin)
        volunteer: PathBuf,
        /// NGO profile JSON file
        ngo: PathBuf,
    },

    /// Rank NGOs for a volunteer
    Rank {
        /// Volunteer profile JSON file ("-" for stdin)
        volunteer: PathBuf,
        /// JSON array of NGO profiles
        ngos: PathBuf,
        /// Maximum number of results
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Rank causes for a volunteer with the scoring engine
    Feed {
        /// Volunteer profile JSON file ("-" for stdin)
        volunteer: PathBuf,
        /// JSON array of causes
        causes: PathBuf,
        /// Only causes in these cities
        #[arg(long, value_delimiter = ',')]
        cities: Vec<String>,
        /// Only causes in these categories
        #[arg(long, value_delimiter = ',')]
        categories: Vec<String>,
        /// Maximum number of results
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Find nearby causes whose text matches the volunteer's interests
    Discover {
        /// Volunteer profile JSON file ("-" for stdin)
        volunteer: PathBuf,
        /// JSON array of causes
        causes: PathBuf,
        /// Maximum number of results
        #[arg(long)]
        limit: Option<usize>,
        /// Score all causes when none are nearby
        #[arg(long)]
        fallback_to_all: bool,
    },

    /// Suggest causes for a free-text query
    Suggest {
        /// Search text
        #[arg(short, long)]
        query: String,
        /// JSON array of causes
        causes: PathBuf,
        /// Maximum number of suggestions
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Filter causes by preferred cities and categories
    Filter {
        /// JSON array of causes
        causes: PathBuf,
        /// Preferred cities
        #[arg(long, value_delimiter = ',')]
        cities: Vec<String>,
        /// Preferred categories
        #[arg(long, value_delimiter = ',')]
        categories: Vec<String>,
    },

    /// List a city's neighbours
    Nearby {
        /// City name
        city: String,
        /// Also print the distance to this city
        #[arg(long)]
        to: Option<String>,
    },

    /// Print the effective configuration
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => exit_with(&err, cli.json),
    };

    let format = match &cli.log_format {
        Some(value) => value.parse::<LogFormat>()?,
        None => config
            .schema
            .logging
            .format
            .parse::<LogFormat>()
            .map_err(|e| e.context("Invalid logging.format in config"))?,
    };
    impactmatch_telemetry::init_with_config(
        TelemetryConfig::new(config.schema.logging.level.clone(), format).with_verbosity(cli.verbose),
    )?;

    if let Some(path) = &config.path {
        tracing::debug!(path = %path.display(), "Loaded configuration");
    }

    let timer = Timer::start("command");
    if let Err(err) = run(cli.command, &config, cli.json) {
        exit_with(&err, cli.json);
    }
    tracing::debug!(elapsed = %format_duration(timer.stop()), "Done");

    Ok(())
}

fn exit_with(err: &Error, json: bool) -> ! {
    if json {
        match serde_json::to_string_pretty(&err.to_report()) {
            Ok(report) => println!("{report}"),
            Err(_) => Status::error(&err.to_string()),
        }
    } else {
        Status::error(&err.to_string());
    }
    std::process::exit(err.code.exit_code());
}

fn run(command: Commands, config: &Config, json: bool) -> Result<()> {
    match command {
        Commands::Score { volunteer, ngo } => run_score(&volunteer, &ngo, config, json),
        Commands::Rank { volunteer, ngos, limit } => run_rank(&volunteer, &ngos, limit, config, json),
        Commands::Feed {
            volunteer,
            causes,
            cities,
            categories,
            limit,
        } => {
            let preferences = Preferences::cities(cities).with_categories(categories);
            run_feed(&volunteer, &causes, &preferences, limit, config, json)
        }
        Commands::Discover {
            volunteer,
            causes,
            limit,
            fallback_to_all,
        } => {
            let defaults = config.schema.discover.to_options();
            let options = DiscoverOptions {
                limit: limit.unwrap_or(defaults.limit),
                fallback_to_all: fallback_to_all || defaults.fallback_to_all,
            };
            run_discover(&volunteer, &causes, options, json)
        }
        Commands::Suggest { query, causes, limit } => {
            run_suggest(&query, &causes, limit.unwrap_or(config.schema.suggest.limit), json)
        }
        Commands::Filter {
            causes,
            cities,
            categories,
        } => {
            let preferences = Preferences::cities(cities).with_categories(categories);
            run_filter(&causes, &preferences, json)
        }
        Commands::Nearby { city, to } => run_nearby(&city, to.as_deref(), json),
        Commands::Config => run_config(config, json),
    }
}

fn engine(config: &Config) -> Result<MatchingEngine> {
    MatchingEngine::with_settings(config.schema.matching)
        .context("Building the scoring engine from [matching]")
}

fn run_score(volunteer: &Path, ngo: &Path, config: &Config, json: bool) -> Result<()> {
    let volunteer: Profile = read_json(volunteer)?;
    let ngo: Profile = read_json(ngo)?;

    let result = engine(config)?.calculate_match(&volunteer, &ngo);

    if json {
        return print_json(&result);
    }
    let title = display_name(ngo.name.as_deref(), ngo.id.as_deref(), 0);
    print_match(&format!("Match with {title}"), &result);
    Ok(())
}

fn run_rank(volunteer: &Path, ngos: &Path, limit: Option<usize>, config: &Config, json: bool) -> Result<()> {
    let volunteer: Profile = read_json(volunteer)?;
    let ngos: Vec<Profile> = read_json(ngos)?;

    let ranked = truncate(engine(config)?.match_volunteer_with_ngos(&volunteer, &ngos), limit);

    if json {
        return print_json(&ranked);
    }
    Status::header(&format!("Ranked {}", format_count(ngos.len(), "NGO", "NGOs")));
    for (i, entry) in ranked.iter().enumerate() {
        let name = display_name(entry.ngo.name.as_deref(), entry.ngo.id.as_deref(), i);
        print_ranked_row(i + 1, &name, &entry.result);
    }
    Ok(())
}

fn run_feed(
    volunteer: &Path,
    causes: &Path,
    preferences: &Preferences,
    limit: Option<usize>,
    config: &Config,
    json: bool,
) -> Result<()> {
    let volunteer: Profile = read_json(volunteer)?;
    let causes: Vec<Cause> = read_json(causes)?;

    let selected: Vec<Cause> = personalized_causes(&causes, preferences)
        .into_iter()
        .map(|entry| entry.cause)
        .collect();
    let ranked = truncate(engine(config)?.rank_causes(&volunteer, &selected), limit);

    if json {
        return print_json(&ranked);
    }
    if ranked.is_empty() {
        Status::warning("No causes match the selected preferences");
        return Ok(());
    }
    Status::header(&format!("Feed: {}", format_count(ranked.len(), "cause", "causes")));
    for (i, entry) in ranked.iter().enumerate() {
        print_ranked_row(i + 1, &entry.cause.name, &entry.result);
    }
    Ok(())
}

fn run_discover(volunteer: &Path, causes: &Path, options: DiscoverOptions, json: bool) -> Result<()> {
    let volunteer: Profile = read_json(volunteer)?;
    let causes: Vec<Cause> = read_json(causes)?;

    let found = discover_causes(&volunteer, &causes, options);

    if json {
        return print_json(&serde_json::json!({ "matches": found }));
    }
    if found.is_empty() {
        Status::warning(&format!("No causes found near {}", volunteer.city));
        return Ok(());
    }
    Status::header(&format!("Causes near {}", volunteer.city));
    for (i, suggestion) in found.iter().enumerate() {
        print_suggestion(i + 1, suggestion);
    }
    Ok(())
}

fn run_suggest(query: &str, causes: &Path, limit: usize, json: bool) -> Result<()> {
    let causes: Vec<Cause> = read_json(causes)?;

    let response = suggest_causes(query, &causes, Some(limit))?;

    if json {
        return print_json(&response);
    }
    if response.suggestions.is_empty() {
        Status::warning(&response.message);
        return Ok(());
    }
    Status::success(&response.message);
    for (i, suggestion) in response.suggestions.iter().enumerate() {
        print_suggestion(i + 1, suggestion);
    }
    Ok(())
}

fn run_filter(causes: &Path, preferences: &Preferences, json: bool) -> Result<()> {
    let causes: Vec<Cause> = read_json(causes)?;

    let feed = personalized_causes(&causes, preferences);

    if json {
        return print_json(&feed);
    }
    Status::info(&format!(
        "{} of {} match your preferences",
        format_count(feed.len(), "cause", "causes"),
        causes.len()
    ));
    for entry in &feed {
        println!("  • {} ({}, {})", entry.cause.name, entry.cause.category, entry.cause.city);
    }
    Ok(())
}

fn run_nearby(city: &str, to: Option<&str>, json: bool) -> Result<()> {
    Validator::new()
        .required("city", city)
        .validate()
        .to_result()?;

    let nearby = nearby_cities(city);
    let distance_km = match to {
        Some(other) => Some(distance_between_cities(city, other).ok_or_else(|| {
            Error::invalid_input(format!("No coordinates for {city} or {other}"))
                .with_suggestion("Run `impactmatch nearby <city>` to see known cities")
        })?),
        None => None,
    };

    if json {
        return print_json(&serde_json::json!({
            "city": city.trim(),
            "nearby": nearby,
            "coordinates": city_coordinates(city),
            "distanceKm": distance_km,
        }));
    }

    Status::header(city.trim());
    match city_coordinates(city) {
        Some(c) => println!("  Coordinates: {:.4}, {:.4}", c.lat, c.lng),
        None => Status::warning("Unknown city, no neighbours on record"),
    }
    println!("  Nearby: {}", nearby.join(", "));
    if let (Some(km), Some(other)) = (distance_km, to) {
        println!("  Distance to {other}: {km:.1} km");
    }
    Ok(())
}

fn run_config(config: &Config, json: bool) -> Result<()> {
    if json {
        return print_json(&config.schema);
    }
    match &config.path {
        Some(path) => Status::info(&format!("Loaded from {}", path.display())),
        None => Status::info("Using built-in defaults"),
    }
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Read and parse a JSON file, or stdin when the path is `-`
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = if path == Path::new("-") {
        std::io::read_to_string(std::io::stdin()).context("Reading stdin")?
    } else if !path.is_file() {
        return Err(Error::file_not_found(path));
    } else {
        std::fs::read_to_string(path).context(format!("Reading {}", path.display()))?
    };

    serde_json::from_str(&content).context(format!("Parsing {}", path.display()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
