use super::IAttendanceRepo;
use playground_scheduler_domain::{AttendanceResponse, AttendanceStatus, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresAttendanceRepo {
    pool: PgPool,
}

impl PostgresAttendanceRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AttendanceResponseRaw {
    match_uid: Uuid,
    user_uid: Uuid,
    status: String,
    updated: i64,
}

impl Into<AttendanceResponse> for AttendanceResponseRaw {
    fn into(self) -> AttendanceResponse {
        AttendanceResponse {
            match_id: self.match_uid.into(),
            user_id: self.user_uid.into(),
            status: match self.status.as_str() {
                "absent" => AttendanceStatus::Absent,
                _ => AttendanceStatus::Attending,
            },
            updated: self.updated,
        }
    }
}

#[async_trait::async_trait]
impl IAttendanceRepo for PostgresAttendanceRepo {
    async fn insert(&self, response: &AttendanceResponse) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO attendance_responses
            (match_uid, user_uid, status, updated)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(response.match_id.inner_ref())
        .bind(response.user_id.inner_ref())
        .bind(response.status.as_str())
        .bind(response.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_match(&self, match_id: &ID) -> anyhow::Result<Vec<AttendanceResponse>> {
        let responses: Vec<AttendanceResponseRaw> = sqlx::query_as(
            r#"
            SELECT * FROM attendance_responses AS a
            WHERE a.match_uid = $1
            ORDER BY a.user_uid
            "#,
        )
        .bind(match_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;
        Ok(responses.into_iter().map(|r| r.into()).collect())
    }
}
