//! ReelRaffle — draw winners from a GitHub issue's commenters
//!
//! Usage:
//!   reelraffle https://github.com/owner/repo/issues/123
//!   reelraffle owner/repo#123 --rounds 5,5,1 --exclude repo-owner
//!   reelraffle --mock 25 --seed 7 --turbo

mod mock;

use std::io::Write as _;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use rr_core::{CandidatePool, RoundPlan, RoundSpec, SessionPhase};
use rr_engine::{Ceremony, CeremonyEvent};
use rr_github::{FilterSettings, GithubClient, IssueRef};
use rr_reveal::{RevealEvent, RevealTiming};

#[derive(Parser)]
#[command(
    name = "reelraffle",
    about = "GitHub issue raffle with slot-machine reveals"
)]
struct Cli {
    /// Issue to draw from (URL or owner/repo#123); omit with --mock
    issue: Option<String>,

    /// Winners per round, comma separated
    #[arg(long, default_value = "5,5,1")]
    rounds: String,

    /// Round names, comma separated; missing names fall back to "Round N"
    #[arg(long, default_value = "Round 1,Round 2,Grand Finale")]
    names: String,

    /// Logins to exclude (e.g. the repo owner), comma separated
    #[arg(long)]
    exclude: Option<String>,

    /// GitHub token for the comments fetch; falls back to $GITHUB_TOKEN
    #[arg(long)]
    token: Option<String>,

    /// Seed both random sources for a replayable ceremony
    #[arg(long)]
    seed: Option<u64>,

    /// Faster pacing for rehearsals
    #[arg(long)]
    turbo: bool,

    /// No pacing at all
    #[arg(long, conflicts_with = "turbo")]
    instant: bool,

    /// Run against N generated participants instead of a real issue
    #[arg(long, value_name = "N")]
    mock: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let plan = parse_plan(&cli.rounds, &cli.names)?;
    let pool = load_pool(&cli).await?;

    if (pool.len() as u32) < plan.total_winners_required() {
        println!(
            "⚠️  {} participants for {} prizes; later rounds will run short\n",
            pool.len(),
            plan.total_winners_required()
        );
    }

    let mut ceremony = match cli.seed {
        Some(seed) => Ceremony::seeded(seed),
        None => Ceremony::new(),
    };
    if cli.instant {
        ceremony = ceremony
            .with_timing(RevealTiming::instant())
            .with_finale_timing(RevealTiming::instant());
    } else if cli.turbo {
        ceremony = ceremony
            .with_timing(RevealTiming::turbo())
            .with_finale_timing(RevealTiming::turbo());
    }

    run(ceremony, plan, pool, !cli.instant).await
}

/// Comma-separated winner counts + names into a validated plan
fn parse_plan(rounds: &str, names: &str) -> Result<RoundPlan> {
    let names: Vec<&str> = names
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .collect();

    let mut specs = Vec::new();
    for (index, count) in rounds.split(',').map(str::trim).enumerate() {
        let winners: u32 = count
            .parse()
            .with_context(|| format!("bad winner count {count:?} in --rounds"))?;
        let name = names
            .get(index)
            .map(|n| n.to_string())
            .unwrap_or_else(|| format!("Round {}", index + 1));
        specs.push(RoundSpec::new(name, winners));
    }

    let plan = RoundPlan::new(specs);
    plan.validate()?;
    Ok(plan)
}

async fn load_pool(cli: &Cli) -> Result<CandidatePool> {
    if let Some(count) = cli.mock {
        println!("🎭 Using {count} mock participants\n");
        return Ok(mock::mock_pool(count));
    }

    let input = cli
        .issue
        .as_deref()
        .context("pass an issue reference, or --mock N for a rehearsal")?;
    let issue = IssueRef::parse(input)?;

    let mut client = GithubClient::new();
    let token = cli
        .token
        .clone()
        .or_else(|| std::env::var("GITHUB_TOKEN").ok());
    if let Some(token) = token {
        client = client.with_token(token);
    }
    let filter = FilterSettings::excluding(
        cli.exclude
            .iter()
            .flat_map(|list| list.split(','))
            .map(|login| login.trim().to_string())
            .filter(|login| !login.is_empty()),
    );

    println!("🔎 Fetching commenters of {issue}…");
    let candidates = client.fetch_participants(&issue, &filter).await?;
    println!("   {} eligible participants\n", candidates.len());
    Ok(CandidatePool::from_candidates(candidates))
}

/// Drive the ceremony, sleeping until each scheduled callback in real-time
/// mode
async fn run(
    mut ceremony: Ceremony,
    plan: RoundPlan,
    pool: CandidatePool,
    realtime: bool,
) -> Result<()> {
    for event in ceremony.start(plan, pool)? {
        render(&event);
    }

    while ceremony.phase() == SessionPhase::RoundPending {
        for event in ceremony.begin_round()? {
            render(&event);
        }
        while let Some(due) = ceremony.next_due_ms() {
            if realtime {
                let wait = due - ceremony.now_ms();
                if wait > 0.0 {
                    tokio::time::sleep(Duration::from_millis(wait.ceil() as u64)).await;
                }
            }
            for event in ceremony.advance_to(due) {
                render(&event);
            }
        }
    }

    Ok(())
}

fn render(event: &CeremonyEvent) {
    match event {
        CeremonyEvent::SessionStarted {
            participants,
            rounds,
        } => {
            println!("🎰 {participants} participants, {rounds} rounds — good luck!\n");
        }
        CeremonyEvent::RoundStarted { spec, .. } => {
            println!(
                "━━ {} — {} winner{} ━━",
                spec.name,
                spec.winners_required,
                if spec.winners_required == 1 { "" } else { "s" }
            );
        }
        CeremonyEvent::DrawStarted {
            round_index,
            draw_index,
        } => {
            debug!("round {round_index}: draw {draw_index} started");
        }
        CeremonyEvent::Reveal(RevealEvent::DisplayTick { candidate }) => {
            print!("\r   {:<40}", candidate.display_name);
            let _ = std::io::stdout().flush();
        }
        CeremonyEvent::Reveal(RevealEvent::WinnerRevealed { candidate }) => {
            println!("\r🏆 {:<40}", candidate.display_name);
        }
        CeremonyEvent::Reveal(_) => {}
        CeremonyEvent::RoundCompleted { result, .. } => {
            if result.is_short() {
                println!(
                    "   pool ran dry: {} of {} drawn\n",
                    result.winners.len(),
                    result.spec.winners_required
                );
            } else {
                println!();
            }
        }
        CeremonyEvent::SessionCompleted { results } => {
            println!("🎉 All rounds complete!\n");
            for result in results {
                println!("   {}:", result.spec.name);
                for (place, winner) in result.winners.iter().enumerate() {
                    println!("     {}. {}", place + 1, winner.display_name);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plan_default_shape() {
        let plan = parse_plan("5,5,1", "Round 1,Round 2,Grand Finale").unwrap();

        assert_eq!(plan.len(), 3);
        assert_eq!(plan.total_winners_required(), 11);
        assert_eq!(plan.get(2).unwrap().name, "Grand Finale");
    }

    #[test]
    fn test_parse_plan_pads_missing_names() {
        let plan = parse_plan("3,2,2,1", "Opener").unwrap();

        assert_eq!(plan.get(0).unwrap().name, "Opener");
        assert_eq!(plan.get(3).unwrap().name, "Round 4");
    }

    #[test]
    fn test_parse_plan_rejects_junk() {
        assert!(parse_plan("5,banana", "").is_err());
        assert!(parse_plan("5,0,1", "").is_err());
    }
}
