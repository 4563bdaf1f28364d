// src/events/assembly.rs
//! Game assembly state machine.
//!
//! ```text
//!   Idle --id--> Building --data--> Finalizing --resolved--> Idle (emits Game)
//!                   |  ^
//!                   +--+ info / start / sub
//! ```
//!
//! A new `id` while still `Building`, or the end of input while `Building`, is an
//! unterminated game. It is reported under the configured [`MalformedPolicy`], never
//! dropped silently.

use crate::config::options::MalformedPolicy;
use crate::error::{Error, Result};
use crate::events::classify::{Appearance, EventLine, FieldPosition};
use crate::game::{Game, GameDraft, MalformedGame, Side};
use crate::players::{IdResolver, PlayerLookup};

/// Per-game working state while lines are being applied.
#[derive(Debug)]
pub struct Building {
    draft: GameDraft,
    /// Winning pitcher named by `info,wp`.
    pitcher_of_record: Option<String>,
}

impl Building {
    fn new(game_id: &str) -> Self {
        Self { draft: GameDraft::new(game_id), pitcher_of_record: None }
    }

    pub fn draft(&self) -> &GameDraft {
        &self.draft
    }

    fn apply(&mut self, line: EventLine) {
        let d = &mut self.draft;
        match line {
            EventLine::Date(date) => d.date = Some(date),
            EventLine::GameNumber(n) => d.game_number = n,
            EventLine::VisitingTeam(team) => d.away_team = Some(team),
            EventLine::HomeTeam(team) => d.home_team = Some(team),
            EventLine::WinningPitcher(wp) => self.pitcher_of_record = wp,
            EventLine::Start(appearance) => self.start(appearance),
            EventLine::Sub { player, side } => self.appears(&player, side),
            EventLine::GameStart(_) | EventLine::EndOfGame | EventLine::Ignored => {}
        }
    }

    fn start(&mut self, a: Appearance) {
        let roster = self.draft.roster_mut(a.side);
        if let Some(n) = a.batting {
            if let Some(slot) = roster.lineup.get_mut(usize::from(n).saturating_sub(1)) {
                *slot = Some(a.player.clone());
            }
        }
        match a.position {
            FieldPosition::Pitcher => roster.starter = Some(a.player.clone()),
            FieldPosition::Fielder(i) => {
                if let Some(slot) = roster.defense.get_mut(i) {
                    *slot = Some(a.player.clone());
                }
            }
            FieldPosition::Other(_) => {}
        }
        self.appears(&a.player, a.side);
    }

    /// The side a player is listed under last decides the winner when that player
    /// is the pitcher of record.
    fn appears(&mut self, player: &str, side: Side) {
        if self.pitcher_of_record.as_deref() == Some(player) {
            self.draft.winner = Some(side);
        }
    }
}

#[derive(Debug, Default)]
pub enum State {
    #[default]
    Idle,
    Building(Box<Building>),
    /// End marker seen; identifiers are being resolved.
    Finalizing(Box<GameDraft>),
}

/// A game left out under [`MalformedPolicy::Skip`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dropped {
    pub game_id: String,
    pub problem: MalformedGame,
}

/// Turns a stream of classified lines into finalized games, one at a time.
#[derive(Debug, Default)]
pub struct Assembler {
    state: State,
    policy: MalformedPolicy,
    dropped: Vec<Dropped>,
}

impl Assembler {
    pub fn new(policy: MalformedPolicy) -> Self {
        Self { state: State::Idle, policy, dropped: Vec::new() }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Apply one line. Returns the finalized game when `line` closes one.
    pub fn feed<L: PlayerLookup>(&mut self, line: EventLine, resolver: &mut IdResolver<L>) -> Result<Option<Game>> {
        match (std::mem::take(&mut self.state), line) {
            (State::Idle, EventLine::GameStart(id)) => {
                self.state = State::Building(Box::new(Building::new(&id)));
                Ok(None)
            }
            // lines between games carry nothing we use
            (State::Idle, _) => Ok(None),
            (State::Building(open), EventLine::GameStart(id)) => {
                self.state = State::Building(Box::new(Building::new(&id)));
                self.malformed(&open.draft.game_id, MalformedGame::Unterminated)?;
                Ok(None)
            }
            (State::Building(open), EventLine::EndOfGame) => {
                self.state = State::Finalizing(Box::new(open.draft));
                self.finalize(resolver)
            }
            (State::Building(mut open), line) => {
                open.apply(line);
                self.state = State::Building(open);
                Ok(None)
            }
            // finalize() always leaves Finalizing before returning
            (State::Finalizing(_), _) => Ok(None),
        }
    }

    fn finalize<L: PlayerLookup>(&mut self, resolver: &mut IdResolver<L>) -> Result<Option<Game>> {
        let State::Finalizing(draft) = std::mem::take(&mut self.state) else {
            return Ok(None);
        };
        if let Err(problem) = draft.check() {
            self.malformed(&draft.game_id, problem)?;
            return Ok(None);
        }

        resolver.resolve_batch(&draft.game_id, draft.source_ids())?;
        let game = draft
            .resolve(|id| resolver.get(id))
            .map_err(|ids| Error::UnresolvedPlayers { game_id: draft.game_id.clone(), ids })?;
        logd!("finalized {} ({} @ {})", game.game_id, game.away_team, game.home_team);
        Ok(Some(game))
    }

    /// End of input. A game still open is unterminated.
    pub fn finish(&mut self) -> Result<()> {
        if let State::Building(open) = std::mem::take(&mut self.state) {
            self.malformed(&open.draft.game_id, MalformedGame::Unterminated)?;
        }
        Ok(())
    }

    pub fn take_dropped(&mut self) -> Vec<Dropped> {
        std::mem::take(&mut self.dropped)
    }

    fn malformed(&mut self, game_id: &str, problem: MalformedGame) -> Result<()> {
        match self.policy {
            MalformedPolicy::Abort => Err(Error::MalformedGame { game_id: game_id.to_string(), problem }),
            MalformedPolicy::Skip => {
                logw!("dropping game {game_id}: {problem}");
                self.dropped.push(Dropped { game_id: game_id.to_string(), problem });
                Ok(())
            }
        }
    }
}
