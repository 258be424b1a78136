//! Seating planner CLI.
//!
//! All state lives in a plan document (JSON); every subcommand loads
//! it, drives the engine, and writes it back. Placement logic stays in
//! seatplan-core — this binary only parses arguments and renders text.

mod render;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use seatplan_core::{
    Axis, Direction, DropEffect, Gender, GridConfig, PlanDocument, Planner, Quotas, ResetOutcome,
    Seat, SortKey, SortOrder, Spot, StudentId, Tier,
};

#[derive(Parser)]
#[command(name = "sp")]
#[command(about = "Classroom seating planner")]
struct Cli {
    /// Path to the plan document
    #[arg(long, default_value = "seating-plan.json")]
    plan: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add students, one per non-blank line of a file (or stdin)
    Import {
        /// File with one name per line; stdin when omitted
        #[arg(long)]
        names: Option<PathBuf>,

        /// Tier for the whole batch (1-6)
        #[arg(long, default_value = "1")]
        tier: u8,

        /// Gender marker for the whole batch: m, f, or none
        #[arg(long, default_value = "none")]
        gender: String,
    },

    /// Set the grid geometry (prunes placements that fall outside)
    Config {
        #[arg(long)]
        rows: u16,

        #[arg(long)]
        cols: u16,

        /// Seats per cluster
        #[arg(long, default_value = "2")]
        cluster: u16,
    },

    /// Auto-fill the board
    Fill {
        /// Strategy: rows, cols, tier, or mix
        #[arg(long)]
        strategy: String,

        /// forward/reverse for rows and cols, asc/desc for tier
        #[arg(long, default_value = "forward")]
        direction: String,

        /// Per-cluster tier minimum for mix, as TIER=N (repeatable)
        #[arg(long)]
        min: Vec<String>,

        /// Per-cluster tier maximum for mix, as TIER=N (repeatable)
        #[arg(long)]
        max: Vec<String>,
    },

    /// Move a student through the drag protocol (swap/evict semantics)
    Move {
        /// Student id or exact name
        #[arg(long)]
        student: String,

        /// Target: a ROW-COL seat, or "roster" to unseat
        #[arg(long)]
        to: String,
    },

    /// Sort the unseated roster block
    Sort {
        /// Criterion: name or tier
        #[arg(long, default_value = "name")]
        by: String,
    },

    /// Print the board and the unseated roster
    Show,

    /// Empty the board, keeping the roster
    Clear,

    /// Delete a student from the roster and the board
    Remove {
        /// Student id or exact name
        #[arg(long)]
        student: String,
    },

    /// Delete everything (asks for confirmation within 3 seconds)
    Reset,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut planner = load_plan(&cli.plan)?;

    match cli.command {
        Command::Import {
            names,
            tier,
            gender,
        } => {
            let text = match names {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let added = planner.add_students(&text, Tier::new(tier), parse_gender(&gender)?);
            println!("added {} students", added.len());
        }

        Command::Config {
            rows,
            cols,
            cluster,
        } => {
            planner.set_grid(GridConfig::new(rows, cols, cluster));
            println!(
                "grid is now {}x{} (clusters of {})",
                rows, cols, cluster
            );
        }

        Command::Fill {
            strategy,
            direction,
            min,
            max,
        } => match strategy.as_str() {
            "rows" => planner.apply_directional(Axis::Rows, parse_direction(&direction)?),
            "cols" => planner.apply_directional(Axis::Cols, parse_direction(&direction)?),
            "tier" => planner.apply_tier_sorted(parse_order(&direction)?),
            "mix" => {
                let quotas = parse_quotas(&min, &max)?;
                planner.apply_composition(&quotas);
            }
            other => bail!("unknown strategy: {}", other),
        },

        Command::Move { student, to } => {
            let id = find_student(&planner, &student)?;
            let origin = match planner.chart().seat_of(&id) {
                Some(seat) => Spot::Seat(seat),
                None => Spot::Roster,
            };
            planner.pick(&id, origin);
            let effect = planner.drop_on(parse_spot(&to)?);
            match effect {
                DropEffect::Moved(seat) => println!("moved to {}", seat),
                DropEffect::Unseated => println!("returned to roster"),
                DropEffect::Swapped { with } => println!("swapped with {}", with),
                DropEffect::Evicted { evicted } => println!("seated; {} evicted", evicted),
                DropEffect::NoOp => println!("nothing to do"),
            }
        }

        Command::Sort { by } => {
            let key = match by.as_str() {
                "name" => SortKey::Name,
                "tier" => SortKey::Tier,
                other => bail!("unknown sort criterion: {}", other),
            };
            planner.sort_roster(key);
        }

        Command::Show => {
            print!("{}", render::board(&planner));
            println!();
            print!("{}", render::roster(&planner));
        }

        Command::Clear => {
            planner.clear_board();
            println!("board cleared");
        }

        Command::Remove { student } => {
            let id = find_student(&planner, &student)?;
            planner.delete_student(&id);
            println!("removed {}", id);
        }

        Command::Reset => {
            planner.reset_all();
            println!("this deletes every student and placement; press Enter within 3s to confirm");
            let mut line = String::new();
            std::io::stdin().read_line(&mut line)?;
            match planner.reset_all() {
                ResetOutcome::Cleared => println!("plan cleared"),
                ResetOutcome::Armed => println!("confirmation expired; plan unchanged"),
            }
        }
    }

    save_plan(&cli.plan, &planner)
}

fn load_plan(path: &Path) -> anyhow::Result<Planner> {
    let mut planner = Planner::new();
    if path.exists() {
        let json =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let doc = PlanDocument::from_json(&json)
            .with_context(|| format!("loading {}", path.display()))?;
        planner.apply_document(doc);
    }
    Ok(planner)
}

fn save_plan(path: &Path, planner: &Planner) -> anyhow::Result<()> {
    let json = planner.export_document().to_json()?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Accepts a student id or an exact (unique) name.
fn find_student(planner: &Planner, needle: &str) -> anyhow::Result<StudentId> {
    let as_id = StudentId::new(needle);
    if planner.roster().contains(&as_id) {
        return Ok(as_id);
    }
    let mut matches = planner.roster().iter().filter(|s| s.name == needle);
    match (matches.next(), matches.next()) {
        (Some(student), None) => Ok(student.id.clone()),
        (Some(_), Some(_)) => bail!("name {:?} is ambiguous, use the id", needle),
        (None, _) => bail!("no student {:?}", needle),
    }
}

fn parse_gender(value: &str) -> anyhow::Result<Option<Gender>> {
    match value.to_lowercase().as_str() {
        "m" => Ok(Some(Gender::M)),
        "f" => Ok(Some(Gender::F)),
        "none" | "-" => Ok(None),
        other => bail!("unknown gender: {}", other),
    }
}

fn parse_direction(value: &str) -> anyhow::Result<Direction> {
    match value {
        "forward" => Ok(Direction::Forward),
        "reverse" => Ok(Direction::Reverse),
        other => bail!("unknown direction: {}", other),
    }
}

fn parse_order(value: &str) -> anyhow::Result<SortOrder> {
    match value {
        "asc" | "forward" => Ok(SortOrder::Ascending),
        "desc" | "reverse" => Ok(SortOrder::Descending),
        other => bail!("unknown tier order: {}", other),
    }
}

fn parse_spot(value: &str) -> anyhow::Result<Spot> {
    if value == "roster" {
        return Ok(Spot::Roster);
    }
    let seat: Seat = value
        .parse()
        .with_context(|| format!("expected ROW-COL or \"roster\", got {:?}", value))?;
    Ok(Spot::Seat(seat))
}

/// Parses repeated `TIER=N` pairs into a quota table.
fn parse_quotas(min: &[String], max: &[String]) -> anyhow::Result<Quotas> {
    let mut quotas = Quotas::new();
    for entry in min {
        let (tier, count) = parse_quota_entry(entry)?;
        quotas.set_min(tier, count);
    }
    for entry in max {
        let (tier, count) = parse_quota_entry(entry)?;
        quotas.set_max(tier, count);
    }
    Ok(quotas)
}

fn parse_quota_entry(entry: &str) -> anyhow::Result<(Tier, u32)> {
    let (tier, count) = entry
        .split_once('=')
        .with_context(|| format!("expected TIER=N, got {:?}", entry))?;
    let tier: u8 = tier.parse().with_context(|| format!("bad tier in {:?}", entry))?;
    if !(Tier::MIN..=Tier::MAX).contains(&tier) {
        bail!("tier out of range in {:?}", entry);
    }
    let count: u32 = count.parse().with_context(|| format!("bad count in {:?}", entry))?;
    Ok((Tier::new(tier), count))
}
