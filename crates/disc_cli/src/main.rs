//! disc_sim CLI
//!
//! Runs single matches (autonomous, coach or star-player mode), full
//! round-robin leagues, and writes generated rosters.

mod console;
mod logger;
mod report;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use disc_core::engine::{Game, InteractiveController, MatchConfig, MatchObserver};
use disc_core::league::play_season;
use disc_core::models::{Registry, RosterFile, TeamId};

use console::{ConsoleInput, ConsoleObserver};
use report::Names;

#[derive(Parser)]
#[command(name = "disc_sim", version)]
#[command(about = "Turn-based disc-sport match simulator", long_about = None)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one match
    Simulate(SimulateArgs),

    /// Play a round robin between every roster team
    League(MatchArgs),

    /// Write a randomly generated roster file
    Generate {
        /// Number of teams (2-8)
        #[arg(long, default_value_t = 2)]
        teams: usize,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Output JSON file path
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Args)]
struct MatchArgs {
    /// Random seed; a fresh one is drawn and logged when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Roster JSON file; teams are generated when omitted
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Match configuration JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the score needed to win
    #[arg(long)]
    points_for_win: Option<u8>,

    /// Print the result as JSON instead of text
    #[arg(long, default_value = "false")]
    json: bool,
}

#[derive(Args)]
struct SimulateArgs {
    #[command(flatten)]
    common: MatchArgs,

    /// Who makes the left team's decisions
    #[arg(long, value_enum, default_value_t = Mode::Auto)]
    mode: Mode,

    /// Left team name (first roster team by default)
    #[arg(long)]
    left: Option<String>,

    /// Right team name (second roster team by default)
    #[arg(long)]
    right: Option<String>,

    /// Lineup slot of the star player in star mode
    #[arg(long, default_value_t = 0)]
    star_slot: usize,

    /// Print every play and the field after each turn
    #[arg(long, default_value = "false")]
    show_field: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Every decision is autonomous
    Auto,
    /// You pick the left team's lineup and substitutions
    Coach,
    /// You shoot and pass for one left-team player
    Star,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose).map_err(|e| anyhow!("failed to install logger: {}", e))?;

    match cli.command {
        Commands::Simulate(args) => simulate(args),
        Commands::League(args) => league(args),
        Commands::Generate { teams, seed, out } => generate(teams, resolve_seed(seed), &out),
    }
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    let seed = seed.unwrap_or_else(rand::random);
    log::info!("seed {}", seed);
    seed
}

fn load_config(args: &MatchArgs) -> Result<MatchConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
            MatchConfig::from_json(&json).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => MatchConfig::standard(),
    };
    if let Some(points) = args.points_for_win {
        config.points_for_win = points;
    }
    config.validate().context("invalid match configuration")?;
    Ok(config)
}

fn load_registry(path: Option<&Path>, teams: usize, rng: &mut ChaCha8Rng) -> Result<Registry> {
    let roster = match path {
        Some(path) => {
            let json = fs::read_to_string(path).with_context(|| format!("reading roster {}", path.display()))?;
            RosterFile::from_json(&json).with_context(|| format!("parsing roster {}", path.display()))?
        }
        None => RosterFile::generate(rng, teams).context("generating roster")?,
    };
    Registry::from_roster(&roster).context("building teams from roster")
}

fn pick_team(registry: &Registry, name: Option<&str>, fallback: usize) -> Result<TeamId> {
    match name {
        Some(name) => registry.team_by_name(name).with_context(|| format!("no team named {:?}", name)),
        None => registry
            .team_ids()
            .get(fallback)
            .copied()
            .with_context(|| format!("roster needs at least {} teams", fallback + 1)),
    }
}

fn simulate(args: SimulateArgs) -> Result<()> {
    let config = load_config(&args.common)?;
    let mut rng = ChaCha8Rng::seed_from_u64(resolve_seed(args.common.seed));
    let mut registry = load_registry(args.common.roster.as_deref(), 2, &mut rng)?;

    let left = pick_team(&registry, args.left.as_deref(), 0)?;
    let right = pick_team(&registry, args.right.as_deref(), 1)?;
    if left == right {
        bail!("a team cannot play itself");
    }

    let input = ConsoleInput::new(io::stdin().lock(), io::stdout());
    let controller = match args.mode {
        Mode::Auto => None,
        Mode::Coach => Some(InteractiveController::coach(left, input)),
        Mode::Star => {
            let lineup = registry.team(left)?.lineup();
            let star = *lineup
                .get(args.star_slot)
                .with_context(|| format!("star slot {} is outside the lineup", args.star_slot))?;
            Some(InteractiveController::star(star, input))
        }
    };

    let show_field = args.show_field || args.mode != Mode::Auto;
    let mut observer = ConsoleObserver::new(Names::from_registry(&registry), show_field);

    let mut game = Game::new(&mut registry, left, right, config, rng).context("setting up match")?;
    if let Some(controller) = controller {
        game = game.with_controller(Box::new(controller));
    }
    if !args.common.json {
        game = game.with_observer(&mut observer as &mut dyn MatchObserver);
    }
    let result = game.simulate().context("match aborted")?;

    if args.common.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!();
        print!("{}", report::match_summary(&result));
    }
    Ok(())
}

fn league(args: MatchArgs) -> Result<()> {
    let config = load_config(&args)?;
    let seed = resolve_seed(args.seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut registry = load_registry(args.roster.as_deref(), 4, &mut rng)?;

    let season = play_season(&mut registry, &config, seed).context("league season aborted")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&season)?);
        return Ok(());
    }
    for result in &season.results {
        println!("{} {} : {} {}", result.left_name, result.left_score, result.right_score, result.right_name);
    }
    println!();
    print!("{}", report::standings(&season.table));
    println!();
    print!("{}", report::season_leaders(&registry, 3));
    Ok(())
}

fn generate(teams: usize, seed: u64, out: &Path) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let roster = RosterFile::generate(&mut rng, teams).context("generating roster")?;
    fs::write(out, roster.to_json()?).with_context(|| format!("writing {}", out.display()))?;
    println!("wrote {} teams to {}", roster.teams.len(), out.display());
    for team in &roster.teams {
        let value: u32 = team.players.iter().map(|p| p.attributes.value()).sum();
        println!("  {:<8} squad value {}", team.name, value);
    }
    Ok(())
}
