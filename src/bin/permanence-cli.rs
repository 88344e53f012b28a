#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use permanence::{
    io,
    model::{Day, Roster},
    report::{self, ScheduleRenderer, TextTable},
    scheduler::{FailurePolicy, SchedError, ScheduleOptions, Scheduler, TieBreak},
    storage::{JsonStorage, Storage},
};
use std::fs;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de répartition des permanences (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de roster
    #[arg(long, global = true, default_value = "roster.json")]
    roster: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Importer un roster depuis un CSV `nom,jours...`
    Import {
        #[arg(long)]
        csv: String,
        /// Ajoute au roster existant au lieu de le remplacer
        #[arg(long)]
        append: bool,
    },

    /// Lister les personnes et leurs disponibilités
    People,

    /// Générer le planning de la semaine
    Plan {
        #[command(flatten)]
        opts: PlanArgs,
        #[arg(long)]
        out_csv: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
    },

    /// Vérifier les disponibilités par jour sans affecter personne
    Check {
        #[command(flatten)]
        opts: PlanArgs,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum TieBreakArg {
    Shuffle,
    Id,
}

#[derive(Args, Debug)]
struct PlanArgs {
    /// Fichier JSON d'options ; les flags explicites priment
    #[arg(long)]
    options: Option<String>,
    #[arg(long)]
    min_per_day: Option<u32>,
    #[arg(long)]
    max_per_day: Option<u32>,
    /// Jours de la période, ex. "mon,tue,wed"
    #[arg(long, value_delimiter = ',')]
    days: Option<Vec<Day>>,
    #[arg(long, value_enum)]
    tie_break: Option<TieBreakArg>,
    /// Graine du départage aléatoire (planning reproductible)
    #[arg(long)]
    seed: Option<u64>,
    /// Rapporter tous les jours en sous-effectif au lieu de s'arrêter au premier
    #[arg(long)]
    collect_all: bool,
}

impl PlanArgs {
    fn resolve(&self) -> Result<ScheduleOptions> {
        let mut opts = match &self.options {
            Some(path) => {
                let data = fs::read(path).with_context(|| format!("reading {path}"))?;
                serde_json::from_slice(&data).with_context(|| format!("parsing {path}"))?
            }
            None => ScheduleOptions::default(),
        };
        if let Some(min) = self.min_per_day {
            opts.min_per_day = min;
        }
        if let Some(max) = self.max_per_day {
            opts.max_per_day = max;
        }
        if let Some(days) = &self.days {
            opts.period = days.clone();
        }
        if self.tie_break == Some(TieBreakArg::Id) && self.seed.is_some() {
            bail!("--seed has no effect with --tie-break id");
        }
        opts.tie_break = match (self.tie_break, opts.tie_break) {
            (Some(TieBreakArg::Id), _) => TieBreak::ById,
            (Some(TieBreakArg::Shuffle), TieBreak::Shuffle { seed })
            | (None, TieBreak::Shuffle { seed }) => TieBreak::Shuffle {
                seed: self.seed.or(seed),
            },
            (Some(TieBreakArg::Shuffle), TieBreak::ById) => TieBreak::Shuffle { seed: self.seed },
            (None, TieBreak::ById) => TieBreak::ById,
        };
        if self.collect_all {
            opts.failure_policy = FailurePolicy::CollectAll;
        }
        opts.validate()?;
        Ok(opts)
    }
}

fn load_roster(storage: &JsonStorage) -> Result<Roster> {
    let roster = storage.load_or_default()?;
    if roster.is_empty() {
        bail!(
            "roster {} is empty: run `import --csv <file>` first",
            storage.path().display()
        );
    }
    Ok(roster)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.roster)?;

    let code = match cli.cmd {
        Commands::Import { csv, append } => {
            // ids numérotés à la suite du roster existant en mode ajout
            let mut roster = if append {
                storage.load_or_default()?
            } else {
                Roster::default()
            };
            let imported = io::import_roster_csv_from(&csv, roster.len() + 1)?;
            let count = imported.len();
            roster.people.extend(imported.people);
            storage.save(&roster)?;
            println!(
                "Imported {} person(s) into {}",
                count,
                storage.path().display()
            );
            0
        }
        Commands::People => {
            let roster = load_roster(&storage)?;
            for p in &roster.people {
                let days: Vec<&str> = p.available_days.iter().map(|d| d.name()).collect();
                let days = if days.is_empty() {
                    "-".to_string()
                } else {
                    days.join(", ")
                };
                println!("{} | {} | {}", p.id, p.name, days);
            }
            0
        }
        Commands::Plan {
            opts,
            out_csv,
            out_json,
        } => {
            let roster = load_roster(&storage)?;
            let scheduler = Scheduler::new(opts.resolve()?);
            let (schedule, shortfalls) = match scheduler.schedule(&roster) {
                Ok(schedule) => (Some(schedule), Vec::new()),
                Err(SchedError::Understaffed {
                    shortfalls,
                    partial,
                }) => (Some(partial), shortfalls),
                Err(err @ SchedError::InsufficientStaff { .. }) => (None, err.shortfalls()),
                Err(err) => return Err(err.into()),
            };

            if let Some(schedule) = &schedule {
                print!("{}", TextTable.render(&roster, schedule));
                if let Some(path) = out_csv {
                    io::export_schedule_csv(path, &roster, schedule)?;
                }
                if let Some(path) = out_json {
                    io::export_schedule_json(path, &roster, schedule)?;
                }
            }

            if shortfalls.is_empty() {
                0
            } else {
                eprintln!("{}", report::render_shortfalls(&shortfalls));
                // Code 2 = planning incomplet
                2
            }
        }
        Commands::Check { opts } => {
            let roster = load_roster(&storage)?;
            let scheduler = Scheduler::new(opts.resolve()?);
            let index = scheduler.availability(&roster);
            print!(
                "{}",
                report::render_availability(&index, scheduler.options().min_per_day)
            );
            let shortfalls = scheduler.detect_shortfalls(&roster);
            if shortfalls.is_empty() {
                println!("OK: every day can be staffed");
                0
            } else {
                eprintln!("Found {} understaffed day(s)", shortfalls.len());
                2
            }
        }
    };

    std::process::exit(code);
}
