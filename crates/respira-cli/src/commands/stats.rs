use std::io::{BufRead, Write};

use clap::Subcommand;
use respira_core::{BreathController, Config, Database, NullSink, Statistics, SystemClock};

use crate::bell;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Lifetime totals
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Recently completed sessions
    History {
        #[arg(long, default_value = "10")]
        limit: usize,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Zero all statistics
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        StatsAction::Show { json } => {
            let stats = Statistics::load(&db);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                let display = stats.display();
                println!("Sessions: {}", display.sessions);
                println!("Cycles:   {}", display.cycles);
                println!("Minutes:  {}", display.minutes);
            }
        }
        StatsAction::History { limit, json } => {
            let sessions = db.recent_sessions(limit)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&sessions)?);
            } else if sessions.is_empty() {
                println!("No sessions yet.");
            } else {
                for s in &sessions {
                    println!(
                        "{}  {:>3} cycles  {:>6.1} min",
                        s.completed_at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M"),
                        s.cycles,
                        s.minutes
                    );
                }
            }
        }
        StatsAction::Reset { yes } => {
            if !yes && !confirm("Reset all statistics? [y/N] ")? {
                println!("cancelled");
                return Ok(());
            }
            let haptics_enabled = Config::load().map(|c| c.haptics.enabled).unwrap_or(true);
            let mut controller = BreathController::new(
                Box::new(SystemClock),
                Box::new(db),
                bell::haptics(haptics_enabled),
                NullSink,
            );
            controller.reset_statistics();
            println!("statistics reset");
        }
    }
    Ok(())
}

fn confirm(prompt: &str) -> std::io::Result<bool> {
    let mut stdout = std::io::stdout();
    stdout.write_all(prompt.as_bytes())?;
    stdout.flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "YES"))
}
