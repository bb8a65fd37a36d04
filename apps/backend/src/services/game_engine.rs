//! Game engine façade.
//!
//! Looks up (or creates) the caller's session, applies one player action and
//! returns the payload for that caller only. `Ok(None)` means the action was a
//! benign no-op (stale or duplicate message, acting before a roll, rolling a
//! final cup). `Err` is reserved for invalid client input.

use std::sync::Arc;

use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::domain::{DiceCup, DieState, LowerCategory, RollOutcome, UpperCategory};
use crate::errors::domain::DomainError;
use crate::services::sessions::{
    ConnectionId, GameSession, SessionFactory, SessionRegistry, SharedSession, UserId,
};
use crate::services::statistics::{CompletedGame, StatisticsSink};

/// Score reported for a lower category that was already filled.
pub const ALREADY_SCORED: i32 = -1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldToggled {
    pub index: usize,
    pub die_state: DieState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpperScored {
    pub category: u8,
    pub score: i32,
    pub is_upper_section_complete: bool,
    pub upper_section_score: Option<u32>,
    pub upper_section_bonus: Option<u32>,
    pub upper_section_total: Option<u32>,
    pub is_score_sheet_complete: bool,
    pub grand_total: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LowerScored {
    pub name: LowerCategory,
    pub score: i32,
    pub is_lower_section_complete: bool,
    pub lower_section_total: Option<u32>,
    pub is_score_sheet_complete: bool,
    pub grand_total: Option<u32>,
}

pub struct GameEngine {
    registry: SessionRegistry,
    factory: SessionFactory,
    statistics: Arc<dyn StatisticsSink>,
}

impl GameEngine {
    pub fn new(factory: SessionFactory, statistics: Arc<dyn StatisticsSink>) -> Self {
        Self {
            registry: SessionRegistry::new(),
            factory,
            statistics,
        }
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn session_count(&self) -> usize {
        self.registry.len()
    }

    /// Create the session for a new connection. Repeated calls are harmless.
    pub fn on_connect(&self, conn: ConnectionId, user_id: Option<UserId>) -> SharedSession {
        self.registry
            .get_or_create(conn, || self.factory.create(conn, user_id))
    }

    /// Discard the connection's session and all in-progress state.
    pub fn on_disconnect(&self, conn: ConnectionId) -> bool {
        let removed = self.registry.remove(conn);
        if removed {
            debug!(conn_id = %conn, "[ENGINE] session discarded");
        }
        removed
    }

    fn session(&self, conn: ConnectionId) -> SharedSession {
        self.on_connect(conn, None)
    }

    /// Roll every free die. `None` once the cup is final.
    pub fn roll_dice(&self, conn: ConnectionId) -> Option<RollOutcome> {
        let session = self.session(conn);
        let mut guard = session.lock();
        let session = &mut *guard;
        session.dice_cup.roll(&mut session.rng)
    }

    /// Flip a die between Held and Free. No-op on an unrolled or final cup,
    /// or for an index outside the cup.
    pub fn toggle_hold_die(&self, conn: ConnectionId, index: i64) -> Option<HoldToggled> {
        let index = usize::try_from(index).ok()?;
        let session = self.session(conn);
        let mut session = session.lock();

        if session.dice_cup.is_final() || !session.dice_cup.is_rolled() {
            return None;
        }
        let die_state = session.dice_cup.toggle_hold(index)?;
        Some(HoldToggled { index, die_state })
    }

    /// Score the current cup into an upper category (0 = Ones .. 5 = Sixes).
    ///
    /// An out-of-range category is ignored like any other stale index. Taking a
    /// filled category reports the stored score; the cup is spent either way.
    pub fn take_upper_category(
        &self,
        conn: ConnectionId,
        category: i64,
    ) -> Option<UpperScored> {
        let Some(category) = u8::try_from(category)
            .ok()
            .and_then(|c| UpperCategory::try_from(c).ok())
        else {
            debug!(conn_id = %conn, category, "[ENGINE] upper category out of range");
            return None;
        };

        let session = self.session(conn);
        let mut guard = session.lock();
        let session = &mut *guard;

        if !session.dice_cup.is_rolled() {
            return None;
        }

        session.score_sheet.record_upper(category, &session.dice_cup);
        session.dice_cup = DiceCup::new();

        let sheet = &session.score_sheet;
        let score = sheet
            .upper(category)
            .map_or(ALREADY_SCORED, |s| s as i32);
        let is_upper_section_complete = sheet.is_upper_section_complete();
        let is_score_sheet_complete = sheet.is_complete();
        let payload = UpperScored {
            category: category.index() as u8,
            score,
            is_upper_section_complete,
            upper_section_score: is_upper_section_complete.then(|| sheet.upper_section_total()),
            upper_section_bonus: is_upper_section_complete.then(|| sheet.upper_section_bonus()),
            upper_section_total: is_upper_section_complete
                .then(|| sheet.upper_section_total_with_bonus()),
            is_score_sheet_complete,
            grand_total: is_score_sheet_complete.then(|| sheet.grand_total()),
        };

        let completed = take_completion(session);
        drop(guard);
        self.report(completed);

        Some(payload)
    }

    /// Score the current cup into a named lower category.
    ///
    /// An unknown name is a lookup failure and leaves the sheet untouched.
    /// Taking a filled category reports `ALREADY_SCORED`; the cup is spent either way.
    pub fn take_lower_category(
        &self,
        conn: ConnectionId,
        name: &str,
    ) -> Result<Option<LowerScored>, DomainError> {
        let category: LowerCategory = name.parse()?;

        let session = self.session(conn);
        let mut guard = session.lock();
        let session = &mut *guard;

        if !session.dice_cup.is_rolled() {
            return Ok(None);
        }

        let recorded = session.score_sheet.record_lower(category, &session.dice_cup);
        session.dice_cup = DiceCup::new();

        let sheet = &session.score_sheet;
        let is_lower_section_complete = sheet.is_lower_section_complete();
        let is_score_sheet_complete = sheet.is_complete();
        let payload = LowerScored {
            name: category,
            score: recorded.map_or(ALREADY_SCORED, |s| s as i32),
            is_lower_section_complete,
            lower_section_total: is_lower_section_complete.then(|| sheet.lower_section_total()),
            is_score_sheet_complete,
            grand_total: is_score_sheet_complete.then(|| sheet.grand_total()),
        };

        let completed = take_completion(session);
        drop(guard);
        self.report(completed);

        Ok(Some(payload))
    }

    fn report(&self, completed: Option<CompletedGame>) {
        let Some(record) = completed else {
            return;
        };
        info!(
            user_id = record.user_id.as_ref().map(UserId::as_str),
            final_score = record.final_score,
            "[ENGINE] score sheet complete"
        );
        self.statistics.submit(record);
    }
}

/// The completed-game record, the first time the sheet is seen complete.
fn take_completion(session: &mut GameSession) -> Option<CompletedGame> {
    if session.completion_reported || !session.score_sheet.is_complete() {
        return None;
    }
    session.completion_reported = true;
    Some(CompletedGame {
        user_id: session.user_id.clone(),
        final_score: session.score_sheet.grand_total(),
        game_completed: true,
        game_start_time: session.started_at,
        game_end_time: OffsetDateTime::now_utc(),
    })
}
