use std::io::{self, BufRead, Write};

use anyhow::{bail, Context};
use colored::Colorize;
use loto_ledger::{default_export_file_name, DrawLedger, RestoreReport, Verification};
use loto_store::KeyValueStore;
use loto_types::{transcript, Ticket};
use serde_json::json;

use crate::cli::*;
use crate::config::LotoConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = LotoConfig::load(cli.config.as_deref())?.with_data_dir(cli.data_dir);
    let (mut ledger, report) = config.open_ledger()?;
    if let RestoreReport::Corrupt { reason } = &report {
        eprintln!(
            "{} stored history was unreadable and has been reset ({reason})",
            "warning:".yellow().bold()
        );
    }

    let stdout = io::stdout();
    let stdin = io::stdin();
    execute(
        cli.command,
        &config,
        &mut ledger,
        cli.format,
        &mut stdout.lock(),
        &mut stdin.lock(),
    )
}

/// Run one command against an open ledger.
///
/// `input` is only read by `clear` without `--yes`.
pub fn execute<S: KeyValueStore>(
    command: Command,
    config: &LotoConfig,
    ledger: &mut DrawLedger<S>,
    format: OutputFormat,
    out: &mut dyn Write,
    input: &mut dyn BufRead,
) -> anyhow::Result<()> {
    match command {
        Command::Add(args) => cmd_add(ledger, &args.number, format, out),
        Command::Say(args) => cmd_say(ledger, &args.words.join(" "), format, out),
        Command::Edit(args) => cmd_edit(ledger, args, format, out),
        Command::Clear(args) => cmd_clear(ledger, args, format, out, input),
        Command::History(args) => cmd_history(ledger, args, format, out),
        Command::Current(args) => cmd_current(ledger, args, format, out),
        Command::Verify(args) => cmd_verify(ledger, &args.ticket_input(), format, out),
        Command::Export(args) => cmd_export(ledger, args, format, out),
        Command::Config => cmd_config(config, format, out),
    }
}

fn cmd_add<S: KeyValueStore>(
    ledger: &mut DrawLedger<S>,
    raw: &str,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let entry = ledger.append(raw)?;
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&entry)?)?,
        OutputFormat::Text => writeln!(
            out,
            "{} Drawn {}  (draw #{}, {})",
            "✓".green().bold(),
            entry.number.to_string().yellow().bold(),
            ledger.len(),
            entry.timestamp.dimmed()
        )?,
    }
    Ok(())
}

fn cmd_say<S: KeyValueStore>(
    ledger: &mut DrawLedger<S>,
    text: &str,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let Some(number) = transcript::extract_number(text) else {
        bail!("no number from 01 to 90 recognized in {text:?}");
    };
    cmd_add(ledger, &number.to_string(), format, out)
}

fn cmd_edit<S: KeyValueStore>(
    ledger: &mut DrawLedger<S>,
    args: EditArgs,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    if args.position == 0 {
        bail!("draw positions start at 1");
    }
    let index = args.position - 1;
    let before = ledger.entries().get(index).map(|e| e.number);
    let entry = ledger.edit_at(index, &args.number)?;
    match format {
        OutputFormat::Json => writeln!(
            out,
            "{}",
            json!({ "position": args.position, "entry": entry })
        )?,
        OutputFormat::Text => {
            let from = before.map(|n| n.to_string()).unwrap_or_default();
            writeln!(
                out,
                "{} Draw #{}: {} → {}",
                "✓".green().bold(),
                args.position,
                from.dimmed(),
                entry.number.to_string().yellow().bold()
            )?
        }
    }
    Ok(())
}

fn cmd_clear<S: KeyValueStore>(
    ledger: &mut DrawLedger<S>,
    args: ClearArgs,
    format: OutputFormat,
    out: &mut dyn Write,
    input: &mut dyn BufRead,
) -> anyhow::Result<()> {
    if !args.yes {
        write!(out, "Delete all {} draws? [y/N] ", ledger.len())?;
        out.flush()?;
        let mut answer = String::new();
        input.read_line(&mut answer).context("reading confirmation")?;
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            writeln!(out, "Aborted.")?;
            return Ok(());
        }
    }
    let removed = ledger.clear()?;
    match format {
        OutputFormat::Json => writeln!(out, "{}", json!({ "removed": removed }))?,
        OutputFormat::Text => {
            writeln!(out, "{} Cleared {} draws.", "✓".green().bold(), removed)?
        }
    }
    Ok(())
}

fn cmd_history<S: KeyValueStore>(
    ledger: &DrawLedger<S>,
    args: HistoryArgs,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let limit = args.limit.unwrap_or(usize::MAX);
    let rows: Vec<_> = ledger.recent_first().take(limit).collect();

    match format {
        OutputFormat::Json => {
            let items: Vec<_> = rows
                .iter()
                .map(|(i, e)| json!({ "position": i + 1, "number": e.number, "timestamp": e.timestamp }))
                .collect();
            writeln!(out, "{}", serde_json::Value::Array(items))?;
        }
        OutputFormat::Text => {
            if ledger.is_empty() {
                writeln!(out, "No numbers drawn yet.")?;
            }
            for (i, e) in rows {
                writeln!(
                    out,
                    "{:>4}  {}  {}",
                    format!("#{}", i + 1).dimmed(),
                    e.number.to_string().yellow().bold(),
                    e.timestamp.dimmed()
                )?;
            }
        }
    }
    Ok(())
}

fn cmd_current<S: KeyValueStore>(
    ledger: &mut DrawLedger<S>,
    args: CurrentArgs,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    if let Some(raw) = &args.set {
        ledger.set_current(raw)?;
    }
    match format {
        OutputFormat::Json => writeln!(out, "{}", json!({ "current": ledger.current() }))?,
        OutputFormat::Text => match ledger.current() {
            Some(n) => writeln!(out, "{}", n.to_string().yellow().bold())?,
            None => writeln!(out, "--")?,
        },
    }
    Ok(())
}

fn cmd_verify<S: KeyValueStore>(
    ledger: &DrawLedger<S>,
    input: &str,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let ticket = Ticket::parse(input)?;
    let verification = ledger.verify_ticket(&ticket)?;
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&verification)?)?,
        OutputFormat::Text => render_verification(&verification, out)?,
    }
    Ok(())
}

fn render_verification(v: &Verification, out: &mut dyn Write) -> anyhow::Result<()> {
    for r in &v.results {
        let drawn = r
            .drawn_number
            .map(|n| n.to_string())
            .unwrap_or_else(|| "--".into());
        let mark = if r.matched { "✓".green().bold() } else { "✗".red().bold() };
        writeln!(
            out,
            "  {}. {}  {}  {}",
            r.position,
            r.ticket_number.to_string().bold(),
            mark,
            drawn
        )?;
    }
    if v.is_winner {
        writeln!(out, "{}", "★ WINNER: all 5 numbers drawn!".green().bold())?;
    } else {
        writeln!(
            out,
            "{} {}/5 numbers drawn, not a winner yet.",
            "✗".red(),
            v.match_count()
        )?;
    }
    Ok(())
}

fn cmd_export<S: KeyValueStore>(
    ledger: &DrawLedger<S>,
    args: ExportArgs,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let csv = ledger.export_csv();
    if args.stdout {
        writeln!(out, "{csv}")?;
        return Ok(());
    }

    let path = args.output.unwrap_or_else(|| {
        default_export_file_name(chrono::Local::now().date_naive()).into()
    });
    std::fs::write(&path, &csv).with_context(|| format!("writing {}", path.display()))?;
    match format {
        OutputFormat::Json => writeln!(
            out,
            "{}",
            json!({ "path": path.display().to_string(), "count": ledger.len() })
        )?,
        OutputFormat::Text => writeln!(
            out,
            "{} Exported {} draws to {}",
            "✓".green().bold(),
            ledger.len(),
            path.display().to_string().bold()
        )?,
    }
    Ok(())
}

fn cmd_config(config: &LotoConfig, format: OutputFormat, out: &mut dyn Write) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(config)?)?,
        OutputFormat::Text => write!(out, "{}", toml::to_string(config)?)?,
    }
    Ok(())
}
