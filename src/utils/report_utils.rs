use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path
};

use strum::IntoEnumIterator;
use tracing::info;

use crate::model::{snapshot::PlayerSnapshot, structures::surface::Surface};

const REPORT_HEADER: &str = "Player,Overall Elo,Hard Elo,Clay Elo,Grass Elo,Last Match,\
Matches Last 6M,Career Matches,Avg Elo Faced,Matches vs Top Tier,Winrate vs Top Tier,\
Matches vs Upper Tier,Winrate vs Upper Tier";

/// Writes the terminal player report as a comma-delimited file, ratings
/// formatted to 2 decimals.
pub fn write_report(path: &Path, snapshots: &[PlayerSnapshot]) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_rows(&mut writer, snapshots)?;
    writer.flush()?;

    info!("Wrote {} player rows to {}", snapshots.len(), path.display());
    Ok(())
}

fn write_rows<W: Write>(writer: &mut W, snapshots: &[PlayerSnapshot]) -> io::Result<()> {
    writeln!(writer, "{}", REPORT_HEADER)?;

    for snapshot in snapshots {
        write!(writer, "{},{:.2}", snapshot.name, snapshot.overall_rating)?;
        for surface in Surface::iter() {
            write!(writer, ",{:.2}", snapshot.surface_rating(surface))?;
        }
        writeln!(
            writer,
            ",{},{},{},{:.2},{},{:.2},{},{:.2}",
            snapshot.last_active.format("%Y-%m-%d"),
            snapshot.matches_last_six_months,
            snapshot.career_matches,
            snapshot.avg_rating_faced,
            snapshot.top_tier_matches,
            snapshot.top_tier_win_rate,
            snapshot.upper_tier_matches,
            snapshot.upper_tier_win_rate
        )?;
    }

    Ok(())
}
