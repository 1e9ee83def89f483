use super::IMatchRepo;
use playground_scheduler_domain::{Match, MatchStatus, WindowLabel, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::collections::HashMap;
use tracing::error;

pub struct PostgresMatchRepo {
    pool: PgPool,
}

impl PostgresMatchRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MatchRaw {
    match_uid: Uuid,
    home_team_uid: Uuid,
    scheduled_at: i64,
    status: String,
    venue: Option<String>,
    window_marks: serde_json::Value,
    created: i64,
}

impl Into<Match> for MatchRaw {
    fn into(self) -> Match {
        let window_marks: HashMap<WindowLabel, i64> =
            serde_json::from_value(self.window_marks).unwrap_or_default();
        Match {
            id: self.match_uid.into(),
            home_team_id: self.home_team_uid.into(),
            scheduled_at: self.scheduled_at,
            status: self.status.parse().unwrap_or(MatchStatus::Pending),
            venue: self.venue,
            window_marks,
            created: self.created,
        }
    }
}

#[async_trait::async_trait]
impl IMatchRepo for PostgresMatchRepo {
    async fn insert(&self, m: &Match) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO matches
            (match_uid, home_team_uid, scheduled_at, status, venue, window_marks, created)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(m.id.inner_ref())
        .bind(m.home_team_id.inner_ref())
        .bind(m.scheduled_at)
        .bind(m.status.as_str())
        .bind(&m.venue)
        .bind(serde_json::to_value(&m.window_marks)?)
        .bind(m.created)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, match_id: &ID) -> Option<Match> {
        let m: Option<MatchRaw> = sqlx::query_as(
            r#"
            SELECT * FROM matches AS m
            WHERE m.match_uid = $1
            "#,
        )
        .bind(match_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!("Find match with id: {} failed. DB returned error: {:?}", match_id, e);
            None
        });
        m.map(|m| m.into())
    }

    async fn find_candidates(
        &self,
        statuses: &[MatchStatus],
        skip: i64,
        limit: i64,
    ) -> anyhow::Result<Vec<Match>> {
        let statuses: Vec<String> = statuses.iter().map(|s| s.as_str().to_string()).collect();
        let matches: Vec<MatchRaw> = sqlx::query_as(
            r#"
            SELECT * FROM matches AS m
            WHERE m.status = ANY($1)
            ORDER BY m.scheduled_at, m.match_uid
            LIMIT $2
            OFFSET $3
            "#,
        )
        .bind(&statuses)
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;
        Ok(matches.into_iter().map(|m| m.into()).collect())
    }

    async fn mark_window(&self, match_id: &ID, label: WindowLabel, at: i64) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE matches AS m
            SET window_marks = m.window_marks || jsonb_build_object($2::text, $3::bigint)
            WHERE m.match_uid = $1
            "#,
        )
        .bind(match_id.inner_ref())
        .bind(label.as_str())
        .bind(at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
