//! Per-turn text protocol.
//!
//! The referee sends whitespace-separated tokens. Once at the start of the
//! game:
//!
//! ```text
//! <boardSize>
//! <playerId>          A = first player, B = second player
//! ```
//!
//! and then every turn:
//!
//! ```text
//! <playerScore> <opponentScore>
//! <numBoxes>
//! <boxId> <sides>     numBoxes times, e.g. "B3 LT"
//! ```
//!
//! A box id is a column letter (`'A' + x`) followed by a row digit
//! (`'1' + y`). `sides` lists the open sides with the letters `L`, `R`,
//! `T` and `B`. Boxes that are not listed are fully captured.
//!
//! The engine answers each turn with one line, `"<boxId> <side>"`,
//! optionally followed by a free-text message.
//!
//! ## Example
//!
//! ```
//! use boxes_bot::protocol::Engine;
//! use boxes_bot::selector::EngineConfig;
//!
//! let input = "1\nA\n0 0\n1\nA1 T\n";
//! let mut output = Vec::new();
//! let mut engine = Engine::with_seed(EngineConfig::default(), 1);
//! engine.run(input.as_bytes(), &mut output).unwrap();
//! assert_eq!(String::from_utf8(output).unwrap(), "A1 T\n");
//! ```

use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::str::FromStr;
use std::time::Duration;

use log::{debug, info, warn};

use crate::board::{Board, Sides};
use crate::constants::MAX_BOARD_SIZE;
use crate::error::{EngineError, ProtocolError};
use crate::heuristic::ScoredMove;
use crate::minimax::Search;
use crate::selector::{EngineConfig, decide_move};
use crate::state::{GameState, Move, box_id};

/// Splits the input into whitespace-separated tokens across lines.
pub struct TokenReader<R> {
    input: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            pending: VecDeque::new(),
        }
    }

    /// Next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<String>, ProtocolError> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }

    fn expect(&mut self, what: &'static str) -> Result<String, ProtocolError> {
        self.next_token()?.ok_or(ProtocolError::UnexpectedEof(what))
    }

    fn expect_parse<T: FromStr>(&mut self, what: &'static str) -> Result<T, ProtocolError> {
        let token = self.expect(what)?;
        token
            .parse()
            .map_err(|_| ProtocolError::InvalidToken { what, token })
    }
}

/// Game settings sent once before the first turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameHeader {
    pub board_size: usize,
    pub player_id: String,
}

/// Everything the referee tells us about one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub player_score: u8,
    pub opponent_score: u8,
    pub board: Board,
}

impl Turn {
    pub fn to_state(&self) -> GameState {
        GameState::new(self.board.clone(), self.player_score, self.opponent_score)
    }
}

pub fn read_header<R: BufRead>(reader: &mut TokenReader<R>) -> Result<GameHeader, ProtocolError> {
    let board_size: usize = reader.expect_parse("board size")?;
    if board_size == 0 || board_size > MAX_BOARD_SIZE {
        return Err(ProtocolError::UnsupportedBoardSize(board_size));
    }
    let player_id = reader.expect("player id")?;
    Ok(GameHeader {
        board_size,
        player_id,
    })
}

/// Parse a box id such as `"C2"` into `(x, y)`.
pub fn parse_box_id(id: &str, board_size: usize) -> Result<(usize, usize), ProtocolError> {
    let out_of_board = || ProtocolError::BoxOutOfBoard(id.to_string());
    let &[col, row] = id.as_bytes() else {
        return Err(out_of_board());
    };
    if !col.is_ascii_uppercase() || !(b'1'..=b'9').contains(&row) {
        return Err(out_of_board());
    }

    let x = (col - b'A') as usize;
    let y = (row - b'1') as usize;
    if x >= board_size || y >= board_size {
        return Err(out_of_board());
    }
    Ok((x, y))
}

/// Read one turn. Returns `None` if the input ends cleanly before it.
pub fn read_turn<R: BufRead>(
    reader: &mut TokenReader<R>,
    board_size: usize,
) -> Result<Option<Turn>, ProtocolError> {
    let Some(token) = reader.next_token()? else {
        return Ok(None);
    };
    let player_score: u8 = token.parse().map_err(|_| ProtocolError::InvalidToken {
        what: "player score",
        token,
    })?;
    let opponent_score: u8 = reader.expect_parse("opponent score")?;
    let num_boxes: usize = reader.expect_parse("box count")?;

    let mut board = Board::new(board_size);
    for _ in 0..num_boxes {
        let id = reader.expect("box id")?;
        let (x, y) = parse_box_id(&id, board_size)?;
        let letters = reader.expect("box sides")?;
        let sides = Sides::parse(&letters)
            .map_err(|letter| ProtocolError::UnknownSide { box_id: id, letter })?;
        board.set_open_sides(x, y, sides);
    }

    if let Some((x, y, d)) = board.first_unmirrored_side() {
        return Err(ProtocolError::UnmirroredSide {
            box_id: box_id(x, y),
            side: d.letter(),
        });
    }
    let captured = board.boxes().filter(|(_, _, s)| s.is_empty()).count();
    if usize::from(player_score) + usize::from(opponent_score) > captured {
        return Err(ProtocolError::InconsistentScores {
            player: player_score,
            opponent: opponent_score,
            captured,
        });
    }

    Ok(Some(Turn {
        player_score,
        opponent_score,
        board,
    }))
}

/// Render a move as an answer line, without the trailing newline.
pub fn format_move(mv: &Move, message: Option<&str>) -> String {
    match message {
        Some(msg) if !msg.is_empty() => format!("{mv} {msg}"),
        _ => mv.to_string(),
    }
}

/// Plays one game over the text protocol.
pub struct Engine {
    config: EngineConfig,
    rng: fastrand::Rng,
    message: Option<String>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_rng(config, fastrand::Rng::new())
    }

    /// Engine with a fixed tie-break seed, for reproducible games.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Self {
        Self::with_rng(config, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(config: EngineConfig, rng: fastrand::Rng) -> Self {
        Self {
            config,
            rng,
            message: None,
        }
    }

    /// Free text appended to every answer line.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Pick the move for one turn and log the diagnostics around it.
    pub fn play_turn(&mut self, turn: &Turn) -> Result<ScoredMove, EngineError> {
        debug!("board:\n{}", turn.board);

        let chosen = decide_move(&turn.board, self.config.endgame, &mut self.rng)?;
        info!("playing {} (score {})", chosen.mv, chosen.score);

        if self.config.search_depth > 0 {
            let depth = self.config.search_depth;
            let mut search = Search::with_budget(Duration::from_millis(self.config.time_budget_ms));
            let value = search.evaluate(&turn.to_state(), depth);
            let stats = search.stats();
            match value {
                Some(v) => info!(
                    "best score is {}, minimax score is {v} with depth {depth} ({} nodes, {:?})",
                    chosen.score, stats.nodes, stats.elapsed
                ),
                None => warn!(
                    "minimax at depth {depth} ran out of time after {} nodes",
                    stats.nodes
                ),
            }
        }

        Ok(chosen)
    }

    /// Run the turn loop until the input ends.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<(), ProtocolError> {
        let mut reader = TokenReader::new(input);
        let header = read_header(&mut reader)?;
        info!(
            "board size {}, playing as {}, endgame {}",
            header.board_size, header.player_id, self.config.endgame
        );

        while let Some(turn) = read_turn(&mut reader, header.board_size)? {
            let chosen = self.play_turn(&turn)?;
            writeln!(output, "{}", format_move(&chosen.mv, self.message.as_deref()))?;
            output.flush()?;
        }

        info!("input closed, exiting");
        Ok(())
    }
}
