use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use super::{SeedReport, WalkStats};

fn totals(reports: &[SeedReport]) -> WalkStats {
    reports.iter().fold(WalkStats::default(), |mut acc, report| {
        acc.absorb(report.stats);
        acc
    })
}

pub fn generate_console_report(
    out: &mut dyn Write,
    reports: &[SeedReport],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Simulation Results".bright_cyan().bold())?;
    writeln!(out, "{}", "=====================".cyan())?;

    let walks: usize = reports.iter().map(|r| r.walks_run).sum();
    let passed: usize = reports.iter().map(|r| r.successful_walks).sum();
    writeln!(out, "Seeds: {}", reports.len())?;
    writeln!(out, "Walks passed: {}/{walks}", passed.to_string().green())?;
    if walks > passed {
        writeln!(out, "Walks failed: {}", (walks - passed).to_string().red())?;
    }
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for report in reports {
        let status = if report.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(out, "{status} seed {}", report.seed.to_string().bold())?;
        writeln!(
            out,
            "   Walks: {}/{} successful, average {:?}",
            report.successful_walks, report.walks_run, report.average_duration
        )?;
        for failure in &report.failures {
            writeln!(out, "     • {}", failure.red())?;
        }
    }

    let stats = totals(reports);
    writeln!(out)?;
    writeln!(out, "{}", "🪙 Activity".bright_yellow().bold())?;
    writeln!(
        out,
        "Moves: {} (+{} automatic)  Collects: {}  Deposits: {}  Refused: {}",
        stats.moves, stats.auto_moves, stats.collects, stats.deposits, stats.refusals
    )?;
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, reports: &[SeedReport]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, reports)?;
    writeln!(out)?;
    Ok(())
}
