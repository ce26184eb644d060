use std::sync::Arc;

use postgres_types::ToSql;
use tokio_postgres::{Client, Error, NoTls, Row};
use tracing::{error, info};

use super::db_structs::{MatchRecord, PreMatchStats};
use crate::{model::structures::match_status::MatchStatus, utils::progress_utils::progress_bar};

#[derive(Clone)]
pub struct DbClient {
    client: Arc<Client>
}

impl DbClient {
    // Connect to the database and return a DbClient instance
    pub async fn connect(connection_str: &str) -> Result<Self, Error> {
        let (client, connection) = tokio_postgres::connect(connection_str, NoTls).await?;

        // Spawn the connection object to run in the background
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!("connection error: {}", e);
            }
        });

        Ok(DbClient {
            client: Arc::new(client)
        })
    }

    /// Fetches the full match table in processing order. The secondary key
    /// makes reruns stable when several matches share a date.
    pub async fn get_match_records(&self) -> Result<Vec<MatchRecord>, Error> {
        info!("Fetching match records...");
        let rows = self
            .client
            .query(
                "SELECT matchid, date, surface, winner_name, loser_name, comment \
                 FROM matched_atp_records \
                 ORDER BY date ASC, matchid ASC",
                &[]
            )
            .await?;

        let records: Vec<MatchRecord> = rows.iter().map(Self::match_record_from_row).collect();

        info!("Fetched {} match records", records.len());
        Ok(records)
    }

    fn match_record_from_row(row: &Row) -> MatchRecord {
        let comment: Option<String> = row.get("comment");

        MatchRecord {
            id: row.get("matchid"),
            date: row.get("date"),
            surface: row.get("surface"),
            winner_name: row.get("winner_name"),
            loser_name: row.get("loser_name"),
            status: MatchStatus::from_comment(comment.as_deref())
        }
    }

    /// Writes both sides' pre-match ratings back onto the match rows.
    /// Ratings are rounded to 2 decimals at this boundary only; the model
    /// itself never rounds.
    pub async fn save_pre_match_stats(&self, stats: &[PreMatchStats]) -> Result<(), Error> {
        let statement = self
            .client
            .prepare(
                "UPDATE matched_atp_records SET \
                 winner_overall_elo = $1, winner_surface_elo = $2, winner_total_matches = $3, winner_avg_elo_faced = $4, \
                 loser_overall_elo = $5, loser_surface_elo = $6, loser_total_matches = $7, loser_avg_elo_faced = $8 \
                 WHERE matchid = $9"
            )
            .await?;

        let p_bar = progress_bar(stats.len() as u64, "Saving pre-match ratings to db".to_string());

        for row in stats {
            let values: &[&(dyn ToSql + Sync)] = &[
                &round2(row.winner_overall_rating),
                &round2(row.winner_surface_rating),
                &row.winner_total_matches,
                &round2(row.winner_avg_rating_faced),
                &round2(row.loser_overall_rating),
                &round2(row.loser_surface_rating),
                &row.loser_total_matches,
                &round2(row.loser_avg_rating_faced),
                &row.match_id
            ];
            self.client.execute(&statement, values).await?;

            if let Some(bar) = &p_bar {
                bar.inc(1);
            }
        }

        if let Some(bar) = &p_bar {
            bar.finish_with_message("Pre-match ratings saved");
        }

        info!("Saved pre-match stats for {} matches", stats.len());
        Ok(())
    }

    // Access the underlying Client
    pub fn client(&self) -> Arc<Client> {
        Arc::clone(&self.client)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
