// One live auction room plus the two timers that drive it.
//
// The countdown and the rival-bid generator run as separate tokio tasks that
// only send events; all state changes happen on the app loop when it
// receives them. Events carry the session id so a late event from a room
// that was already closed is recognised and dropped.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use bidroom_core::auction::{
    AuctionController, BidError, BidReceipt, OpponentStrategy, TickOutcome,
};

pub type SessionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// One second of auction time has passed.
    Tick(SessionId),
    /// Rivals get a chance to bid.
    OpponentTurn(SessionId),
}

impl SessionEvent {
    pub fn session_id(&self) -> SessionId {
        match self {
            SessionEvent::Tick(id) | SessionEvent::OpponentTurn(id) => *id,
        }
    }
}

// ---------------------------------------------------------------------------
// SessionTimers
// ---------------------------------------------------------------------------

/// Handles to the periodic tasks of one session. Dropping cancels them.
#[derive(Debug)]
pub struct SessionTimers {
    tick_task: Option<JoinHandle<()>>,
    opponent_task: Option<JoinHandle<()>>,
}

impl SessionTimers {
    /// Spawn the countdown and rival tasks. The first event of each fires
    /// one full period after the call.
    pub fn spawn(
        id: SessionId,
        tick_every: Duration,
        opponent_every: Duration,
        tx: mpsc::Sender<SessionEvent>,
    ) -> Self {
        SessionTimers {
            tick_task: Some(spawn_interval(tick_every, SessionEvent::Tick(id), tx.clone())),
            opponent_task: Some(spawn_interval(
                opponent_every,
                SessionEvent::OpponentTurn(id),
                tx,
            )),
        }
    }

    /// Abort both tasks. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        for handle in [self.tick_task.take(), self.opponent_task.take()]
            .into_iter()
            .flatten()
        {
            handle.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.tick_task.is_none() && self.opponent_task.is_none()
    }
}

impl Drop for SessionTimers {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn spawn_interval(
    period: Duration,
    event: SessionEvent,
    tx: mpsc::Sender<SessionEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately; skip it.
        interval.tick().await;
        loop {
            interval.tick().await;
            if tx.send(event).await.is_err() {
                debug!("Session event receiver gone, stopping {:?} timer", event);
                break;
            }
        }
    })
}

// ---------------------------------------------------------------------------
// AuctionSession
// ---------------------------------------------------------------------------

pub struct AuctionSession {
    id: SessionId,
    controller: AuctionController,
    opponents: Box<dyn OpponentStrategy>,
    timers: Option<SessionTimers>,
}

impl AuctionSession {
    pub fn new(
        id: SessionId,
        controller: AuctionController,
        opponents: Box<dyn OpponentStrategy>,
    ) -> Self {
        AuctionSession {
            id,
            controller,
            opponents,
            timers: None,
        }
    }

    /// Start the countdown and rival timers for this session.
    pub fn start(
        &mut self,
        tick_every: Duration,
        opponent_every: Duration,
        tx: mpsc::Sender<SessionEvent>,
    ) {
        self.stop();
        self.timers = Some(SessionTimers::spawn(self.id, tick_every, opponent_every, tx));
        info!("Session {} timers started", self.id);
    }

    /// Cancel all pending timer work.
    pub fn stop(&mut self) {
        if let Some(mut timers) = self.timers.take() {
            timers.cancel();
            debug!("Session {} timers cancelled", self.id);
        }
    }

    pub fn timers_running(&self) -> bool {
        self.timers.is_some()
    }

    /// Advance the countdown. Stops the timers when the auction ends.
    pub fn on_tick(&mut self) -> TickOutcome {
        let outcome = self.controller.tick();
        if !matches!(outcome, TickOutcome::Running { .. }) {
            self.stop();
        }
        outcome
    }

    /// Let the rival strategy try one bid.
    pub fn on_opponent_turn(&mut self) -> Option<Result<BidReceipt, BidError>> {
        self.controller
            .generate_competing_bid(self.opponents.as_mut())
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn controller(&self) -> &AuctionController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut AuctionController {
        &mut self.controller
    }
}

impl Drop for AuctionSession {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bidroom_core::auction::{BidProposal, Roster, ScriptedOpponents};
    use bidroom_core::catalog::Catalog;
    use bidroom_core::config::AuctionConfig;

    fn controller(starting: u32) -> AuctionController {
        let catalog = Catalog::builtin().unwrap();
        let player = catalog.players()[0].clone();
        let config = AuctionConfig {
            starting_window_secs: starting,
            ..AuctionConfig::default()
        };
        AuctionController::new(player, Roster::sample(), &config)
    }

    #[tokio::test(start_paused = true)]
    async fn timers_emit_tagged_events() {
        let (tx, mut rx) = mpsc::channel(16);
        let _timers = SessionTimers::spawn(
            7,
            Duration::from_secs(1),
            Duration::from_secs(3),
            tx,
        );

        let mut ticks = 0;
        let mut turns = 0;
        while ticks < 3 || turns < 1 {
            match rx.recv().await.unwrap() {
                SessionEvent::Tick(id) => {
                    assert_eq!(id, 7);
                    ticks += 1;
                }
                SessionEvent::OpponentTurn(id) => {
                    assert_eq!(id, 7);
                    turns += 1;
                }
            }
        }
        assert_eq!(ticks, 3);
        assert_eq!(turns, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_events() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut timers = SessionTimers::spawn(
            1,
            Duration::from_secs(1),
            Duration::from_secs(1),
            tx,
        );
        timers.cancel();
        assert!(timers.is_cancelled());

        tokio::time::sleep(Duration::from_secs(5)).await;
        // Both senders were owned by the aborted tasks, so the channel closes.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_session_cancels_timers() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut session = AuctionSession::new(
            2,
            controller(180),
            Box::new(ScriptedOpponents::default()),
        );
        session.start(Duration::from_secs(1), Duration::from_secs(3), tx);
        assert!(session.timers_running());
        drop(session);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn tick_to_end_stops_timers() {
        let (tx, _rx) = mpsc::channel(16);
        let mut session = AuctionSession::new(
            3,
            controller(2),
            Box::new(ScriptedOpponents::default()),
        );
        session.start(Duration::from_secs(1), Duration::from_secs(3), tx);

        assert_eq!(session.on_tick(), TickOutcome::Running { remaining: 1 });
        assert!(session.timers_running());
        assert!(matches!(session.on_tick(), TickOutcome::Ended(_)));
        assert!(!session.timers_running());
        assert_eq!(session.on_tick(), TickOutcome::Idle);
    }

    #[test]
    fn opponent_turn_uses_injected_strategy() {
        let mut session = AuctionSession::new(
            4,
            controller(180),
            Box::new(ScriptedOpponents::new(vec![
                None,
                Some(BidProposal::new("1", 0)),
            ])),
        );
        assert!(session.on_opponent_turn().is_none());

        let minimum = session.controller().minimum_bid();
        assert!(matches!(
            session.on_opponent_turn(),
            Some(Err(BidError::BidTooLow { minimum: m, .. })) if m == minimum
        ));
        assert!(session.on_opponent_turn().is_none());
    }

    #[test]
    fn session_event_id() {
        assert_eq!(SessionEvent::Tick(5).session_id(), 5);
        assert_eq!(SessionEvent::OpponentTurn(9).session_id(), 9);
    }
}
