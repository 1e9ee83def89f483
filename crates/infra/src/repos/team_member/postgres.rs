use super::ITeamMemberRepo;
use playground_scheduler_domain::{TeamMember, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresTeamMemberRepo {
    pool: PgPool,
}

impl PostgresTeamMemberRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TeamMemberRaw {
    team_uid: Uuid,
    user_uid: Uuid,
    phone: Option<String>,
}

impl Into<TeamMember> for TeamMemberRaw {
    fn into(self) -> TeamMember {
        TeamMember {
            team_id: self.team_uid.into(),
            user_id: self.user_uid.into(),
            phone: self.phone,
        }
    }
}

#[async_trait::async_trait]
impl ITeamMemberRepo for PostgresTeamMemberRepo {
    async fn insert(&self, member: &TeamMember) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO team_members
            (team_uid, user_uid, phone)
            VALUES($1, $2, $3)
            "#,
        )
        .bind(member.team_id.inner_ref())
        .bind(member.user_id.inner_ref())
        .bind(&member.phone)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_team(&self, team_id: &ID) -> anyhow::Result<Vec<TeamMember>> {
        let members: Vec<TeamMemberRaw> = sqlx::query_as(
            r#"
            SELECT * FROM team_members AS tm
            WHERE tm.team_uid = $1
            ORDER BY tm.user_uid
            "#,
        )
        .bind(team_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;
        Ok(members.into_iter().map(|m| m.into()).collect())
    }
}
