//! The `emtprep scores` command: leaderboard for one test.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, Table};

use emtprep_core::statistics::leaderboard;
use emtprep_core::traits::{ScoreQuery, ScoreStore};

pub async fn execute(test_id: String, config_path: Option<PathBuf>) -> Result<()> {
    let (_, store) = super::open_store(config_path.as_deref())?;

    let records = store.list_scores(&ScoreQuery::for_test(&test_id)).await?;
    if records.is_empty() {
        println!("No high scores found for {test_id}.");
        return Ok(());
    }

    let board = leaderboard(&records);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "User", "Best", "Attempts", "Last attempt"]);
    for (rank, entry) in board.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&entry.username),
            Cell::new(format!("{:.0}%", entry.best)),
            Cell::new(entry.attempts),
            Cell::new(entry.latest.format("%Y-%m-%d")),
        ]);
    }

    println!("High scores for {test_id}:");
    println!("{table}");

    Ok(())
}
