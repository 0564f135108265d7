//! Binary entry point: load the configuration, open the roster database, and
//! either run the interactive kiosk or one of the headless commands.
use anyhow::{Context, Result};
use clap::Parser;

use badge_kiosk::cli::{Cli, Command, ExportCsvCommand, StatsCommand};
use badge_kiosk::db::{open_database, SqliteSlot};
use badge_kiosk::export::ResvgRasterizer;
use badge_kiosk::logging::{init_file_logging, init_logging};
use badge_kiosk::store::RecordStore;
use badge_kiosk::{run_app, App, Config, Kiosk};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;

    // The kiosk owns the terminal, so its log goes to a file.
    match cli.resolved_command() {
        Command::Kiosk => init_file_logging(cli.verbosity(), &config.log_path())
            .context("failed to open the log file")?,
        _ => init_logging(cli.verbosity()),
    }

    let db_path = config.database_path();
    let conn = open_database(&db_path)
        .with_context(|| format!("failed to open roster at {}", db_path.display()))?;
    let store = RecordStore::open(Box::new(SqliteSlot::participants(conn)));
    let kiosk = Kiosk::from_config(store, &config);

    match cli.resolved_command() {
        Command::Kiosk => {
            let mut app = App::new(kiosk, Box::new(ResvgRasterizer::new()));
            run_app(&mut app)
        }
        Command::ExportCsv(cmd) => handle_export_csv(&kiosk, &config, cmd),
        Command::Stats(cmd) => handle_stats(&kiosk, cmd),
    }
}

fn handle_export_csv(kiosk: &Kiosk, config: &Config, cmd: &ExportCsvCommand) -> Result<()> {
    let dir = cmd.out.clone().unwrap_or_else(|| config.output_dir());
    let file = kiosk
        .export_csv(&dir)
        .with_context(|| format!("failed to export CSV to {}", dir.display()))?;
    println!("Exported {} row(s) to {}", file.count, file.path.display());
    Ok(())
}

fn handle_stats(kiosk: &Kiosk, cmd: &StatsCommand) -> Result<()> {
    let stats = kiosk.stats();
    if cmd.json {
        let value = serde_json::json!({
            "total": stats.total,
            "printed": stats.printed,
            "duplicate_names": stats.duplicate_names,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("badge-kiosk roster");
        println!("------------------");
        println!("Participants:  {}", stats.total);
        println!("Printed:       {}", stats.printed);
        if stats.duplicate_names.is_empty() {
            println!("Duplicates:    none");
        } else {
            println!("Duplicates:    {}", stats.duplicate_names.join(", "));
        }
    }
    Ok(())
}
