use crate::reminder::resolve_non_responders::ResolveNonRespondersUseCase;
use crate::shared::usecase::{execute, UseCase};
use chrono::{TimeZone, Utc};
use playground_scheduler_domain::{Match, MatchStatus, ReminderWindow, TeamMember, WindowPolicy};
use playground_scheduler_infra::{AlimtalkMessage, PlaygroundContext};
use std::collections::HashMap;
use tracing::{error, info, warn};

/// The hourly reminder driver. Scans all candidate matches, resolves the
/// reminder window that currently applies to each, and reminds the home
/// team members that have not yet answered the attendance prompt, at most
/// once per match per window.
#[derive(Debug)]
pub struct SendMatchRemindersUseCase {
    pub policy: WindowPolicy,
}

impl Default for SendMatchRemindersUseCase {
    fn default() -> Self {
        Self {
            policy: WindowPolicy::default(),
        }
    }
}

/// Counters for one scheduler invocation, logged as the run summary
#[derive(Debug, Default, PartialEq)]
pub struct RunSummary {
    pub scanned: usize,
    pub windows_evaluated: usize,
    pub dispatched: usize,
    pub skipped_already_marked: usize,
    pub errors: usize,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    /// Candidate enumeration failed. Nothing was processed this run; the
    /// next scheduled run retries from scratch.
    StorageUnavailable,
}

#[async_trait::async_trait]
impl UseCase for SendMatchRemindersUseCase {
    type Response = RunSummary;

    type Errors = UseCaseErrors;

    const NAME: &'static str = "SendMatchReminders";

    async fn execute(&mut self, ctx: &PlaygroundContext) -> Result<Self::Response, Self::Errors> {
        let now = ctx.sys.get_timestamp_millis();

        if ctx.dispatcher.is_none() {
            info!("No dispatch gateway configured, reminders will only be marked as processed");
        }

        let candidates = list_candidate_matches(ctx).await.map_err(|e| {
            error!("Unable to enumerate candidate matches: {:?}", e);
            UseCaseErrors::StorageUnavailable
        })?;

        let mut summary = RunSummary {
            scanned: candidates.len(),
            ..Default::default()
        };

        for m in &candidates {
            if let Err(e) = process_match(m, &self.policy, now, ctx, &mut summary).await {
                error!("Processing reminders for match {} failed: {:?}", m.id, e);
                summary.errors += 1;
            }
        }

        info!(
            scanned = summary.scanned,
            windows_evaluated = summary.windows_evaluated,
            dispatched = summary.dispatched,
            skipped_already_marked = summary.skipped_already_marked,
            errors = summary.errors,
            "Reminder run completed"
        );

        Ok(summary)
    }
}

/// All matches in a candidate status, paged until the store runs dry
async fn list_candidate_matches(ctx: &PlaygroundContext) -> anyhow::Result<Vec<Match>> {
    let statuses = MatchStatus::candidates();
    let page_size = ctx.config.candidate_page_size;
    let mut matches = Vec::new();
    let mut skip = 0;

    loop {
        let page = ctx
            .repos
            .matches
            .find_candidates(&statuses, skip, page_size)
            .await?;
        let page_len = page.len() as i64;
        matches.extend(page);
        if page_len < page_size {
            break;
        }
        skip += page_size;
    }

    Ok(matches)
}

async fn process_match(
    m: &Match,
    policy: &WindowPolicy,
    now: i64,
    ctx: &PlaygroundContext,
    summary: &mut RunSummary,
) -> anyhow::Result<()> {
    let window = match policy.resolve(m.hours_until(now)) {
        Some(window) => window,
        None => return Ok(()),
    };
    summary.windows_evaluated += 1;

    if m.is_window_marked(&window.label) {
        summary.skipped_already_marked += 1;
        return Ok(());
    }

    let usecase = ResolveNonRespondersUseCase {
        team_id: m.home_team_id.clone(),
        match_id: m.id.clone(),
    };
    let pending = execute(usecase, ctx)
        .await
        .map_err(|e| anyhow::anyhow!("Resolving non-responders failed: {:?}", e))?;

    if pending.is_empty() {
        info!(
            "Match {}: everyone already responded for window {}, marking without dispatch",
            m.id, window.label
        );
    } else {
        dispatch_reminders(m, window, &pending, ctx, summary).await;
    }

    // The mark is the final step per match and is deliberately not
    // conditioned on delivery success: a dropped reminder is less severe
    // than re-notifying the whole roster every hour.
    ctx.repos.matches.mark_window(&m.id, window.label, now).await?;

    Ok(())
}

async fn dispatch_reminders(
    m: &Match,
    window: &ReminderWindow,
    pending: &[TeamMember],
    ctx: &PlaygroundContext,
    summary: &mut RunSummary,
) {
    let dispatcher = match &ctx.dispatcher {
        Some(dispatcher) => dispatcher,
        None => return,
    };

    let (reachable, unreachable): (Vec<&TeamMember>, Vec<&TeamMember>) =
        pending.iter().partition(|member| member.phone.is_some());

    if !unreachable.is_empty() {
        let user_ids = unreachable
            .iter()
            .map(|member| member.user_id.as_string())
            .collect::<Vec<_>>()
            .join(", ");
        warn!(
            "Match {}: {} non-responders have no contact address and cannot be reminded: {}",
            m.id,
            unreachable.len(),
            user_ids
        );
    }

    if reachable.is_empty() {
        return;
    }

    let messages: Vec<AlimtalkMessage> = reachable
        .iter()
        .map(|member| AlimtalkMessage {
            to: member.phone.clone().unwrap_or_default(),
            template_id: window.template_id.clone(),
            variables: message_variables(m, window),
        })
        .collect();
    summary.dispatched += messages.len();

    info!(
        "Match {}: dispatching {} reminders for window {}",
        m.id,
        messages.len(),
        window.label
    );

    match dispatcher.send_batch(messages).await {
        Ok(outcomes) => {
            let rejected = outcomes.iter().filter(|o| !o.delivered).count();
            if rejected > 0 {
                warn!(
                    "Match {}: the gateway rejected {}/{} reminders",
                    m.id,
                    rejected,
                    outcomes.len()
                );
            }
        }
        Err(e) => {
            // Best effort: the window is still marked by the caller, the
            // next window will get its own attempt.
            error!("Match {}: dispatch gateway call failed: {:?}", m.id, e);
        }
    }
}

fn message_variables(m: &Match, window: &ReminderWindow) -> HashMap<String, String> {
    let kickoff = Utc
        .timestamp_millis(m.scheduled_at)
        .format("%Y-%m-%d %H:%M")
        .to_string();
    vec![
        ("#{venue}", m.venue.clone().unwrap_or_else(|| "TBD".into())),
        ("#{date}", kickoff),
        ("#{dday}", window.label.to_string()),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value))
    .collect()
}
