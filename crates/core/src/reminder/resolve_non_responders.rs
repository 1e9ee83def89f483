use crate::shared::usecase::UseCase;
use playground_scheduler_domain::{pending_responders, TeamMember, ID};
use playground_scheduler_infra::PlaygroundContext;

/// Computes which home-team members have not answered the attendance
/// prompt for a match. A response of either status counts as answered.
#[derive(Debug)]
pub struct ResolveNonRespondersUseCase {
    pub team_id: ID,
    pub match_id: ID,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    StorageUnavailable,
}

#[async_trait::async_trait]
impl UseCase for ResolveNonRespondersUseCase {
    type Response = Vec<TeamMember>;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "ResolveNonResponders";

    async fn execute(&mut self, ctx: &PlaygroundContext) -> Result<Self::Response, Self::Errors> {
        let members = ctx
            .repos
            .team_members
            .find_by_team(&self.team_id)
            .await
            .map_err(|_| UseCaseErrors::StorageUnavailable)?;

        // A dangling team reference or an empty roster is not an error,
        // there is just nobody to remind.
        if members.is_empty() {
            return Ok(Vec::new());
        }

        let responses = ctx
            .repos
            .attendance
            .find_by_match(&self.match_id)
            .await
            .map_err(|_| UseCaseErrors::StorageUnavailable)?;

        Ok(pending_responders(members, &responses))
    }
}
