//! Turn sequencing over a board, plus a random-move player

use crate::board::Board;
use crate::config::{ConfigError, GameConfig};
use crate::error::BoardError;
use crate::geometry::{ring_distance, Hex};
use crate::moves::Move;
use crate::tile::PlayerId;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("board has no players")]
    NoPlayers,

    #[error("{player} cannot play {mv}")]
    IllegalMove { player: PlayerId, mv: Move },

    #[error("{player} has a legal move and may not pass")]
    PassNotAllowed { player: PlayerId },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Board(#[from] BoardError),
}

// ============================================================================
// GAME
// ============================================================================

/// A board plus whose turn it is and what has been played so far
#[derive(Clone, Debug)]
pub struct Game {
    initial: Board,
    board: Board,
    current: usize,
    history: Vec<(PlayerId, Move)>,
}

impl Game {
    pub fn new(board: Board) -> Result<Self, GameError> {
        if board.players().is_empty() {
            return Err(GameError::NoPlayers);
        }
        Ok(Self {
            initial: board.clone(),
            board,
            current: 0,
            history: Vec::new(),
        })
    }

    /// Deal `tiles_per_player` tiles to each player, round-robin, onto random
    /// free hexes within `radius` of the origin
    pub fn setup<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<Self, GameError> {
        config.validate()?;

        let r = config.radius;
        let mut cells: Vec<Hex> = (-r..=r)
            .flat_map(|x| (-r..=r).map(move |y| Hex::new(x, y)))
            .filter(|&hex| ring_distance(hex) <= r)
            .collect();
        cells.shuffle(rng);

        let mut board = Board::new(config.players.iter().cloned());
        let total = config.tiles_per_player * config.players.len();
        for (i, &hex) in cells.iter().take(total).enumerate() {
            let owner = &config.players[i % config.players.len()];
            board.place_tile(hex, owner, config.start_height)?;
        }

        tracing::info!(
            "Set up {} tiles for {} players within radius {}",
            board.len(),
            config.players.len(),
            r
        );
        Game::new(board)
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Board as it stood before the first move
    pub fn initial_board(&self) -> &Board {
        &self.initial
    }

    pub fn current_player(&self) -> &PlayerId {
        &self.board.players()[self.current]
    }

    pub fn history(&self) -> &[(PlayerId, Move)] {
        &self.history
    }

    /// Number of turns played, passes included
    pub fn turns(&self) -> usize {
        self.history.len()
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.board.legal_moves(self.current_player())
    }

    pub fn is_over(&self) -> bool {
        self.board.is_game_over()
    }

    pub fn gains(&self) -> FxHashMap<PlayerId, i64> {
        self.board.gains()
    }

    pub fn winners(&self) -> Vec<PlayerId> {
        self.board.winners()
    }

    // ========================================================================
    // PLAY
    // ========================================================================

    /// Play `mv` for the current player and pass the turn on.
    ///
    /// A step must be legal and start from one of the current player's
    /// stacks. `Move::Null` is only accepted when the player has no move.
    pub fn play(&mut self, mv: Move) -> Result<(), GameError> {
        let player = self.current_player().clone();
        match mv {
            Move::Null => {
                if self.board.has_legal_move(&player) {
                    return Err(GameError::PassNotAllowed { player });
                }
            }
            Move::Step { from, .. } => {
                let owns_source = self.board.get(from).is_some_and(|t| t.owner == player);
                if !owns_source || !self.board.is_legal_move(&mv) {
                    return Err(GameError::IllegalMove { player, mv });
                }
                self.board.apply_move(&mv)?;
            }
        }

        tracing::debug!("turn {}: {} plays {}", self.history.len() + 1, player, mv);
        self.history.push((player, mv));
        self.current = (self.current + 1) % self.board.players().len();
        Ok(())
    }
}

// ============================================================================
// RANDOM PLAYER
// ============================================================================

/// Picks uniformly among legal moves
pub struct RandomPlayer {
    rng: ChaCha8Rng,
}

impl RandomPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Choose a move for whoever is to play; `Move::Null` when stuck
    pub fn choose(&mut self, game: &Game) -> Move {
        game.legal_moves()
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Move::Null)
    }

    /// Play until nobody can move or `max_turns` turns have been played.
    /// Returns true if the game reached its end.
    pub fn play_game(&mut self, game: &mut Game, max_turns: usize) -> Result<bool, GameError> {
        while !game.is_over() && game.turns() < max_turns {
            let mv = self.choose(game);
            game.play(mv)?;
        }
        let finished = game.is_over();
        if finished {
            tracing::info!("Game over after {} turns, winners: {:?}", game.turns(), game.winners());
        } else {
            tracing::warn!("Stopped at the {} turn limit before the game ended", max_turns);
        }
        Ok(finished)
    }
}
