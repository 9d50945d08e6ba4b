// Auction engine: roster, ledger, clock, rival strategies and the controller
// that ties them together.

pub mod clock;
pub mod controller;
pub mod ledger;
pub mod opponent;
pub mod roster;

pub use clock::{format_clock, ClockTick, CountdownClock};
pub use controller::{
    AuctionController, AuctionPhase, AuctionResult, BidError, BidReceipt, TickOutcome,
};
pub use ledger::{AuctionStats, Bid, BidId, BidLedger};
pub use opponent::{AuctionView, BidProposal, OpponentStrategy, RandomOpponents, ScriptedOpponents};
pub use roster::{Participant, Roster, RosterError};
