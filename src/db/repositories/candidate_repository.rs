use crate::db::connection::DbPool;
use crate::db::models::{Candidate, NewCandidate};
use sqlx::Error;

pub async fn create_candidate(pool: &DbPool, candidate: &NewCandidate) -> Result<i64, Error> {
    let result = sqlx::query("INSERT INTO candidates (name, partner, photo) VALUES (?, ?, ?)")
        .bind(&candidate.name)
        .bind(candidate.partner.as_deref())
        .bind(candidate.photo.as_deref())
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

pub async fn get_all_candidates(pool: &DbPool) -> Result<Vec<Candidate>, Error> {
    let rows = sqlx::query_as::<_, Candidate>(
        "SELECT id, name, partner, photo, votes FROM candidates ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Overwrites the stored count. Returns the number of rows touched (0 for an unknown id).
pub async fn set_votes(pool: &DbPool, candidate_id: i64, votes: i64) -> Result<u64, Error> {
    let result = sqlx::query("UPDATE candidates SET votes = ? WHERE id = ?")
        .bind(votes)
        .bind(candidate_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
