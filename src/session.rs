//! In-memory relay session: pairs players into rooms and validates every
//! submitted move against the room's authoritative board before relaying it.
//! Transport is left to the embedder; everything here returns the messages to send.

use crate::board::{Board, Color};
use crate::error::SessionError;
use crate::moves::types::Move;
use crate::status::GameResult;
use crate::wire::{Message, decode_line};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

pub type RoomId = u64;

/// A message addressed to one seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outgoing {
    pub to: Color,
    pub message: Message,
}

impl Outgoing {
    fn to_both(message: Message) -> Vec<Outgoing> {
        vec![
            Outgoing {
                to: Color::White,
                message: message.clone(),
            },
            Outgoing {
                to: Color::Black,
                message,
            },
        ]
    }
}

#[derive(Debug)]
struct RoomState {
    board: Board,
    white: bool,
    black: bool,
}

impl RoomState {
    fn seated(&self, color: Color) -> &bool {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    fn seat_mut(&mut self, color: Color) -> &mut bool {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    fn is_full(&self) -> bool {
        self.white && self.black
    }
}

/// One game. Its board sits behind its own lock, so games never contend.
#[derive(Debug)]
pub struct GameRoom {
    id: RoomId,
    state: Mutex<RoomState>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl GameRoom {
    fn new(id: RoomId) -> Self {
        GameRoom {
            id,
            state: Mutex::new(RoomState {
                board: Board::new(),
                white: false,
                black: false,
            }),
        }
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    /// Validate and apply `mv` for `color`; on success both seats get the move.
    pub fn submit(&self, color: Color, mv: Move) -> Result<Vec<Outgoing>, SessionError> {
        let mut state = lock(&self.state);
        // A finished game reports its result even after a seat was vacated.
        if state.board.is_game_over() {
            return Err(SessionError::GameOver(state.board.game_result()));
        }
        if !state.is_full() {
            return Err(SessionError::GameNotStarted);
        }
        if state.board.side_to_move() != color {
            return Err(SessionError::NotYourTurn);
        }
        if !state.board.is_valid_move(&mv) {
            return Err(SessionError::IllegalMove);
        }

        state.board.apply_move(mv);
        debug!(room = self.id, %mv, "relaying move");
        Ok(Outgoing::to_both(Message::Move(mv)))
    }

    /// Handle one raw line from `color`. Rejections come back as an `{error}` to the sender.
    pub fn handle_line(&self, color: Color, line: &str) -> Vec<Outgoing> {
        let line = line.trim();
        if line.is_empty() {
            return Vec::new();
        }

        let result = match decode_line(line) {
            Ok(Message::Move(mv)) => self.submit(color, mv),
            Ok(other) => {
                debug!(room = self.id, ?other, "ignoring non-move message");
                return Vec::new();
            }
            Err(e) => {
                warn!(room = self.id, error = %e, "malformed message");
                Err(SessionError::MalformedMove)
            }
        };

        result.unwrap_or_else(|e| {
            debug!(room = self.id, ?color, error = %e, "rejected");
            vec![Outgoing {
                to: color,
                message: Message::Error(e.to_string()),
            }]
        })
    }

    /// Run `f` against the board while holding the room lock.
    pub fn with_board<R>(&self, f: impl FnOnce(&Board) -> R) -> R {
        f(&lock(&self.state).board)
    }

    pub fn game_result(&self) -> GameResult {
        self.with_board(Board::game_result)
    }
}

#[derive(Debug, Default)]
struct LobbyState {
    rooms: HashMap<RoomId, Arc<GameRoom>>,
    waiting: Option<Arc<GameRoom>>,
    next_id: RoomId,
}

/// Seat assignment handed back by [`Lobby::join`].
#[derive(Debug, Clone)]
pub struct Seat {
    pub room: Arc<GameRoom>,
    pub color: Color,
    /// Messages to deliver now: the joiner's colour, plus `begin` to both when the room fills.
    pub greeting: Vec<Outgoing>,
}

/// Pairs arriving players two by two. The first joiner of a room plays White.
#[derive(Debug, Default)]
pub struct Lobby {
    inner: Mutex<LobbyState>,
}

impl Lobby {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn join(&self) -> Seat {
        let mut lobby = lock(&self.inner);

        let (room, color) = match lobby.waiting.take() {
            Some(room) => {
                let _ = lobby.rooms.insert(room.id, Arc::clone(&room));
                (room, Color::Black)
            }
            None => {
                lobby.next_id += 1;
                let room = Arc::new(GameRoom::new(lobby.next_id));
                lobby.waiting = Some(Arc::clone(&room));
                (room, Color::White)
            }
        };

        let mut greeting = vec![Outgoing {
            to: color,
            message: Message::Colour(color),
        }];

        let full = {
            let mut state = lock(&room.state);
            *state.seat_mut(color) = true;
            state.is_full()
        };
        if full {
            greeting.extend(Outgoing::to_both(Message::Begin(true)));
            info!(room = room.id, "game started");
        } else {
            info!(room = room.id, "waiting for opponent");
        }

        Seat {
            room,
            color,
            greeting,
        }
    }

    pub fn room(&self, id: RoomId) -> Result<Arc<GameRoom>, SessionError> {
        let lobby = lock(&self.inner);
        lobby
            .rooms
            .get(&id)
            .or(lobby.waiting.as_ref().filter(|r| r.id == id))
            .cloned()
            .ok_or(SessionError::UnknownRoom(id))
    }

    /// Number of rooms with both seats filled.
    pub fn active_rooms(&self) -> usize {
        lock(&self.inner).rooms.len()
    }

    /// Drop `color` from room `id`. The remaining player, if any, is told and wins
    /// by disconnect; the room is closed either way.
    pub fn leave(&self, id: RoomId, color: Color) -> Vec<Outgoing> {
        let mut lobby = lock(&self.inner);

        if lobby.waiting.as_ref().is_some_and(|r| r.id == id) {
            lobby.waiting = None;
            info!(room = id, ?color, "player left before the game started");
            return Vec::new();
        }

        let Some(room) = lobby.rooms.remove(&id) else {
            return Vec::new();
        };

        let mut state = lock(&room.state);
        *state.seat_mut(color) = false;
        info!(room = id, ?color, "player disconnected");

        let other = color.opposite();
        if !*state.seated(other) {
            return Vec::new();
        }
        if !state.board.is_game_over() {
            state.board.declare_result(GameResult::Disconnect);
        }
        vec![Outgoing {
            to: other,
            message: Message::Disconnect(true),
        }]
    }
}
