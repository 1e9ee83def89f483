use playground_scheduler_core::{execute, SendMatchRemindersUseCase};
use playground_scheduler_domain::{
    AttendanceResponse, AttendanceStatus, Match, TeamMember, WindowLabel, ID,
};
use playground_scheduler_infra::{
    AlimtalkMessage, DeliveryOutcome, IDispatchGateway, ISys, PlaygroundContext,
};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

const HOUR_MILLIS: i64 = 1000 * 60 * 60;
// Sat Jun 20 2026 18:00:00 GMT+0000, kickoff of the fixture under test
const KICKOFF: i64 = 1_781_892_000_000;

/// Clock that the test advances between scheduler runs
struct SteppingTimeSys {
    now: AtomicI64,
}

impl SteppingTimeSys {
    fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }
}

impl ISys for SteppingTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
struct RecordingGateway {
    batches: Mutex<Vec<Vec<AlimtalkMessage>>>,
}

#[async_trait::async_trait]
impl IDispatchGateway for RecordingGateway {
    async fn send_batch(
        &self,
        messages: Vec<AlimtalkMessage>,
    ) -> anyhow::Result<Vec<DeliveryOutcome>> {
        let outcomes = messages
            .iter()
            .map(|m| DeliveryOutcome {
                to: m.to.clone(),
                delivered: true,
            })
            .collect();
        self.batches.lock().unwrap().push(messages);
        Ok(outcomes)
    }
}

/// Walks a pending match from 52 hours before kickoff all the way past it,
/// running the scheduler once per "hour" like the production trigger does.
/// Each reminder window must fire exactly once.
#[tokio::test]
async fn hourly_runs_fire_each_window_exactly_once() {
    let clock = Arc::new(SteppingTimeSys::new(KICKOFF - 52 * HOUR_MILLIS));
    let gateway = Arc::new(RecordingGateway::default());
    let mut ctx = PlaygroundContext::create_inmemory();
    ctx.sys = clock.clone();
    ctx.dispatcher = Some(gateway.clone());

    let m = Match::new(
        ID::new(),
        KICKOFF,
        Some("Han River Park Pitch 2".into()),
        KICKOFF - 200 * HOUR_MILLIS,
    );
    ctx.repos.matches.insert(&m).await.unwrap();

    let members: Vec<TeamMember> = (0..4)
        .map(|i| {
            TeamMember::new(
                m.home_team_id.clone(),
                ID::new(),
                Some(format!("010555501{:02}", i)),
            )
        })
        .collect();
    for member in &members {
        ctx.repos.team_members.insert(member).await.unwrap();
    }

    // One member answers before any reminder goes out
    ctx.repos
        .attendance
        .insert(&AttendanceResponse {
            match_id: m.id.clone(),
            user_id: members[0].user_id.clone(),
            status: AttendanceStatus::Attending,
            updated: clock.get_timestamp_millis(),
        })
        .await
        .unwrap();

    for hours_before in (-2i64..=52).rev() {
        clock.set(KICKOFF - hours_before * HOUR_MILLIS);
        let summary = execute(SendMatchRemindersUseCase::default(), &ctx)
            .await
            .unwrap();
        assert_eq!(summary.scanned, 1);
        assert_eq!(summary.errors, 0);
    }

    // D-2, D-1 and same-day each dispatched one batch to the three
    // non-responders, even though several hourly runs fell inside each
    // two-hour window.
    let batches = gateway.batches.lock().unwrap().clone();
    assert_eq!(batches.len(), 3);
    assert!(batches.iter().all(|batch| batch.len() == 3));
    let templates: Vec<_> = batches
        .iter()
        .map(|batch| batch[0].template_id.clone())
        .collect();
    assert_eq!(
        templates,
        vec!["pg-reminder-d2", "pg-reminder-d1", "pg-reminder-day"]
    );

    let marked = ctx.repos.matches.find(&m.id).await.unwrap();
    for label in [
        WindowLabel::DayMinus2,
        WindowLabel::DayMinus1,
        WindowLabel::SameDay,
    ]
    .iter()
    {
        assert!(marked.is_window_marked(label));
    }
}

/// A match that leaves the candidate statuses is never evaluated again,
/// even if its kickoff is still ahead.
#[tokio::test]
async fn rejected_matches_are_not_reminded() {
    let clock = Arc::new(SteppingTimeSys::new(KICKOFF - 24 * HOUR_MILLIS));
    let gateway = Arc::new(RecordingGateway::default());
    let mut ctx = PlaygroundContext::create_inmemory();
    ctx.sys = clock;
    ctx.dispatcher = Some(gateway.clone());

    let mut m = Match::new(ID::new(), KICKOFF, None, 0);
    m.status = playground_scheduler_domain::MatchStatus::Rejected;
    ctx.repos.matches.insert(&m).await.unwrap();
    ctx.repos
        .team_members
        .insert(&TeamMember::new(
            m.home_team_id.clone(),
            ID::new(),
            Some("01055550000".into()),
        ))
        .await
        .unwrap();

    let summary = execute(SendMatchRemindersUseCase::default(), &ctx)
        .await
        .unwrap();

    assert_eq!(summary.scanned, 0);
    assert!(gateway.batches.lock().unwrap().is_empty());
}
