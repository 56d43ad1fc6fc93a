//! The rules engine: a single game of Quoridor as a state machine.
//!
//! ```text
//!  Init --begin_game--> Playing --winning turn--> Over
//!   ^ create_player        ^ do_turn                |
//!                          +-------- undo ----------+
//! ```
//!
//! Turns are written in the notation of [`Turn`]. The engine is
//! single-writer; searches work on independent copies made with
//! [`Quoridor::copy`].

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use tracing::{debug, info, instrument, trace};

use crate::board::Board;
use crate::cell::Cell;
use crate::error::{IllegalReason, QuoridorError, Result};
use crate::player::{Player, PlayerCount, PlayerId};
use crate::summary::Summary;
use crate::turn::Turn;
use crate::wall::Wall;

/// Phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GameState {
    /// Accepting player registrations.
    Init,
    /// Accepting turns.
    Playing,
    /// Someone reached their goal.
    Over,
}

/// What observers are told after every change to a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Played { player: PlayerId, turn: Turn },
    Won { player: PlayerId, turn: Turn },
    Undone { player: PlayerId, turn: Turn },
}

/// Callback registered with [`Quoridor::observe`].
pub type Observer = Box<dyn FnMut(&Quoridor, &GameEvent) + Send>;

#[derive(Debug, Clone, Copy)]
struct Record {
    player: PlayerId,
    turn: Turn,
    from: Cell,
}

pub struct Quoridor {
    seats: PlayerCount,
    board: Board,
    players: Vec<Player>,
    current: usize,
    state: GameState,
    /// Legal pawn destinations for `current`, refreshed once per turn.
    destinations: BTreeSet<Cell>,
    history: Vec<Record>,
    undone: Vec<Turn>,
    observers: Vec<Observer>,
}

impl fmt::Debug for Quoridor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quoridor")
            .field("state", &self.state)
            .field("current", &self.current)
            .field("players", &self.players)
            .field("walls", &self.board.walls())
            .finish_non_exhaustive()
    }
}

impl Quoridor {
    pub fn new(seats: PlayerCount) -> Self {
        Quoridor {
            seats,
            board: Board::new(),
            players: Vec::with_capacity(seats.count()),
            current: 0,
            state: GameState::Init,
            destinations: BTreeSet::new(),
            history: Vec::new(),
            undone: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// A two-player game with both players registered and started.
    pub fn two_player(first: &str, second: &str) -> Result<Self> {
        let mut game = Quoridor::new(PlayerCount::Two);
        game.create_player(first)?;
        game.create_player(second)?;
        game.begin_game()?;
        Ok(game)
    }

    fn require(&self, expected: GameState) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(QuoridorError::WrongState {
                expected,
                actual: self.state,
            })
        }
    }

    /// Registers the next seat and returns its id.
    pub fn create_player(&mut self, name: &str) -> Result<PlayerId> {
        self.require(GameState::Init)?;
        let capacity = self.seats.count();
        if self.players.len() == capacity {
            return Err(QuoridorError::GameFull { capacity });
        }
        let id = PlayerId(self.players.len());
        let (start, goal) = self.seats.seat(id.0);
        self.players
            .push(Player::new(name, start, goal, self.seats.wall_allowance()));
        debug!(%id, name, %start, "player registered");
        Ok(id)
    }

    pub fn begin_game(&mut self) -> Result<()> {
        self.require(GameState::Init)?;
        let required = self.seats.count();
        if self.players.len() != required {
            return Err(QuoridorError::InvalidPlayerCount {
                registered: self.players.len(),
                required,
            });
        }
        self.state = GameState::Playing;
        self.current = 0;
        self.refresh_destinations();
        info!(players = required, "game started");
        self.notify(GameEvent::Started);
        Ok(())
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state == GameState::Over
    }

    pub fn seats(&self) -> PlayerCount {
        self.seats
    }

    /// The player to move, or the winner once the game is over.
    pub fn current_player(&self) -> PlayerId {
        PlayerId(self.current)
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.is_over().then_some(PlayerId(self.current))
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.0)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn opponents(&self, id: PlayerId) -> impl Iterator<Item = PlayerId> + '_ {
        (0..self.players.len())
            .filter(move |&seat| seat != id.0)
            .map(PlayerId)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    // oldest first
    pub fn history(&self) -> impl Iterator<Item = Turn> + '_ {
        self.history.iter().map(|record| record.turn)
    }

    /// Cells the player to move may step or jump to this turn.
    pub fn legal_destinations(&self) -> &BTreeSet<Cell> {
        &self.destinations
    }

    fn refresh_destinations(&mut self) {
        self.destinations = self.compute_destinations();
        trace!(player = %self.current_player(), count = self.destinations.len(), "destinations refreshed");
    }

    fn compute_destinations(&self) -> BTreeSet<Cell> {
        let me = self.players[self.current].position();
        let occupied: Vec<Cell> = self
            .players
            .iter()
            .enumerate()
            .filter(|&(seat, _)| seat != self.current)
            .map(|(_, p)| p.position())
            .collect();

        let mut out = BTreeSet::new();
        for next in self.board.neighbors(me) {
            if !occupied.contains(&next) {
                out.insert(next);
                continue;
            }
            // an adjacent pawn: jump straight over it if nothing is behind it
            let Some(dir) = me.direction_to(next) else {
                continue;
            };
            let straight = next
                .step(dir)
                .filter(|&beyond| self.board.can_step(next, beyond));
            match straight {
                Some(beyond) if !occupied.contains(&beyond) => {
                    out.insert(beyond);
                }
                _ => {
                    for side in dir.perpendicular() {
                        if let Some(diagonal) = next.step(side) {
                            if self.board.can_step(next, diagonal) && !occupied.contains(&diagonal) {
                                out.insert(diagonal);
                            }
                        }
                    }
                }
            }
        }
        out
    }

    /// Checks a wall for the player to move.
    pub fn check_wall(&mut self, wall: Wall) -> Result<()> {
        self.require(GameState::Playing)?;
        self.wall_reason(wall)
            .map_err(|reason| QuoridorError::illegal(wall.to_string(), reason))
    }

    /// Checks a typed turn for the player to move.
    pub fn check(&mut self, turn: Turn) -> Result<()> {
        self.require(GameState::Playing)?;
        self.turn_reason(turn)
            .map_err(|reason| QuoridorError::illegal(turn.to_string(), reason))
    }

    // Cheapest rules first. The reachability rule places the wall
    // provisionally and always takes it back before returning.
    // Callers guarantee the game is in play.
    fn wall_reason(&mut self, wall: Wall) -> std::result::Result<(), IllegalReason> {
        if self.players[self.current].walls() == 0 {
            return Err(IllegalReason::NoWallsLeft);
        }
        if self.board.has_wall(wall) {
            return Err(IllegalReason::AlreadyPlayed);
        }
        let cross = wall.cross();
        if self.board.has_wall(cross) {
            return Err(IllegalReason::Crosses(cross));
        }
        if let Some(overlap) = wall.collinear().find(|&w| self.board.has_wall(w)) {
            return Err(IllegalReason::Overlaps(overlap));
        }

        self.board.add_wall(wall);
        let cut_off = self
            .players
            .iter()
            .position(|p| self.board.distance(p.position(), p.goal()).is_none());
        self.board.remove_wall(wall);

        match cut_off {
            Some(seat) => Err(IllegalReason::CutsOffPath {
                player: PlayerId(seat),
            }),
            None => Ok(()),
        }
    }

    fn turn_reason(&mut self, turn: Turn) -> std::result::Result<(), IllegalReason> {
        match turn {
            Turn::Move(cell) if self.destinations.contains(&cell) => Ok(()),
            Turn::Move(_) => Err(IllegalReason::NotReachable),
            Turn::Wall(wall) => self.wall_reason(wall),
        }
    }

    /// Parses and validates a turn string for the player to move.
    pub fn check_turn(&mut self, turn: &str) -> Result<Turn> {
        self.require(GameState::Playing)?;
        let parsed: Turn = turn
            .parse()
            .map_err(|reason| QuoridorError::illegal(turn, reason))?;
        self.turn_reason(parsed)
            .map_err(|reason| QuoridorError::illegal(turn, reason))?;
        Ok(parsed)
    }

    /// Whether `turn` is legal for the player to move, with a reason for
    /// the renderer when it is not.
    pub fn turn_is_legal(&mut self, turn: &str) -> (bool, String) {
        match self.check_turn(turn) {
            Ok(_) => (true, String::new()),
            Err(QuoridorError::IllegalMove { reason, .. }) => (false, reason.to_string()),
            Err(other) => (false, other.to_string()),
        }
    }

    /// Every wall the player to move may place.
    pub fn legal_walls(&mut self) -> Vec<Wall> {
        if self.state != GameState::Playing || self.players[self.current].walls() == 0 {
            return Vec::new();
        }
        Wall::all().filter(|&w| self.wall_reason(w).is_ok()).collect()
    }

    /// Pawn moves followed by wall placements.
    pub fn legal_turns(&mut self) -> Vec<Turn> {
        let mut turns: Vec<Turn> = self.destinations.iter().copied().map(Turn::Move).collect();
        turns.extend(self.legal_walls().into_iter().map(Turn::Wall));
        turns
    }

    /// Takes a turn for `player`.
    ///
    /// Fails without changing anything if it is not `player`'s turn or the
    /// turn is illegal.
    #[instrument(skip(self), level = "debug")]
    pub fn do_turn(&mut self, player: PlayerId, turn: &str) -> Result<Turn> {
        self.require(GameState::Playing)?;
        if player.0 != self.current {
            return Err(QuoridorError::NotYourTurn {
                player,
                to_move: self.current_player(),
            });
        }
        let parsed = self.check_turn(turn)?;
        self.undone.clear();
        self.commit(parsed);
        Ok(parsed)
    }

    /// Typed variant of [`Quoridor::do_turn`] for the player to move.
    pub fn play(&mut self, turn: Turn) -> Result<()> {
        self.check(turn)?;
        self.undone.clear();
        self.commit(turn);
        Ok(())
    }

    /// Applies turns in order for whoever is to move, stopping at the first
    /// failure.
    pub fn replay<I, S>(&mut self, turns: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for turn in turns {
            self.do_turn(self.current_player(), turn.as_ref())?;
        }
        Ok(())
    }

    fn commit(&mut self, turn: Turn) {
        let player = self.current_player();
        self.apply(turn);
        let event = if self.is_over() {
            info!(%player, %turn, "game over");
            GameEvent::Won { player, turn }
        } else {
            debug!(%player, %turn, "turn applied");
            GameEvent::Played { player, turn }
        };
        self.notify(event);
    }

    /// Applies an already validated turn for the player to move.
    pub(crate) fn apply(&mut self, turn: Turn) {
        let seat = self.current;
        let from = self.players[seat].position();
        match turn {
            Turn::Move(cell) => self.players[seat].move_to(cell),
            Turn::Wall(wall) => {
                self.board.add_wall(wall);
                self.players[seat].use_wall();
            }
        }
        self.history.push(Record {
            player: PlayerId(seat),
            turn,
            from,
        });

        if self.players[seat].has_won() {
            self.state = GameState::Over;
            self.destinations.clear();
        } else {
            self.current = (seat + 1) % self.players.len();
            self.refresh_destinations();
        }
    }

    /// Reverses the last applied turn, leaving the engine as it was before.
    pub(crate) fn retract(&mut self) -> Option<Turn> {
        let record = self.history.pop()?;
        let seat = record.player.0;
        match record.turn {
            Turn::Move(_) => self.players[seat].move_to(record.from),
            Turn::Wall(wall) => {
                self.board.remove_wall(wall);
                self.players[seat].return_wall();
            }
        }
        self.state = GameState::Playing;
        self.current = seat;
        self.refresh_destinations();
        Some(record.turn)
    }

    /// Takes back the last turn. A finished game becomes playable again.
    pub fn undo(&mut self) -> Option<Turn> {
        if self.state == GameState::Init {
            return None;
        }
        let turn = self.retract()?;
        self.undone.push(turn);
        let player = self.current_player();
        debug!(%player, %turn, "turn undone");
        self.notify(GameEvent::Undone { player, turn });
        Some(turn)
    }

    /// Re-applies the most recently undone turn.
    pub fn redo(&mut self) -> Option<Turn> {
        if self.state != GameState::Playing {
            return None;
        }
        let turn = self.undone.pop()?;
        self.commit(turn);
        Some(turn)
    }

    /// An independent copy of the game for simulation. Observers are not
    /// copied; nothing done to the copy is visible to this game.
    pub fn copy(&self) -> Quoridor {
        Quoridor {
            seats: self.seats,
            board: self.board.clone(),
            players: self.players.clone(),
            current: self.current,
            state: self.state,
            destinations: self.destinations.clone(),
            history: self.history.clone(),
            undone: self.undone.clone(),
            observers: Vec::new(),
        }
    }

    /// Registers a callback run after every turn, undo and game start.
    pub fn observe<F>(&mut self, observer: F)
    where
        F: FnMut(&Quoridor, &GameEvent) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self, event: GameEvent) {
        if self.observers.is_empty() {
            return;
        }
        let mut observers = std::mem::take(&mut self.observers);
        for observer in observers.iter_mut() {
            observer(self, &event);
        }
        observers.append(&mut self.observers);
        self.observers = observers;
    }

    pub fn summary(&self) -> Summary {
        Summary::of(self)
    }
}
