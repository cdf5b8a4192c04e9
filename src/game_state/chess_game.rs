//! The move API: one game, its legality pass, and reversible move application.
//!
//! Every successful call leaves the game with a fresh [`LegalityPass`] and
//! refreshed terminal flags for the new side to move. Every rejected call
//! leaves board, counters, history, and move text untouched.

use tracing::{debug, info};

use crate::chess_errors::{ChessError, ChessResult, IllegalMoveReason};
use crate::game_state::board::Board;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::game_state::game_config::GameConfig;
use crate::game_state::game_state::GameState;
use crate::game_state::move_record::{MoveRecord, MoveRequest};
use crate::game_state::terminal::{evaluate_terminal, DrawReason, GameResult};
use crate::move_generation::castling::castle_squares;
use crate::move_generation::legal_move_apply::{
    apply_to_board, classify_intent, revert_board, update_state_after_move,
};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::LegalityPass;
use crate::utils::fen_generator::{generate_fen, repetition_key};
use crate::utils::fen_parser::{parse_fen, parse_fen_state};
use crate::utils::long_algebraic::parse_coordinate_move;
use crate::utils::san::{check_suffix, parse_san, san_body};

#[derive(Debug, Clone)]
pub struct ChessGame {
    board: Board,
    state: GameState,
    config: GameConfig,
    legality: LegalityPass,
    pending_promotion: Option<(Square, Square)>,
    moves_applied: usize,
    initial_fen: String,
}

impl Default for ChessGame {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessGame {
    /// A game at the standard starting position.
    pub fn new() -> Self {
        Self::from_fen(STARTING_POSITION_FEN).expect("starting position FEN is valid")
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        Self::with_config(fen, GameConfig::default())
    }

    /// Build a game from a full FEN. Fails with `MalformedPosition` when the
    /// FEN does not parse or the side not on move is in check.
    pub fn with_config(fen: &str, config: GameConfig) -> ChessResult<Self> {
        let (board, fields) = parse_fen(fen)?;
        if is_king_in_check(&board, fields.side_to_move.opposite()) {
            return Err(ChessError::MalformedPosition(format!(
                "side not to move is in check: {fen}"
            )));
        }

        let state = GameState::from_fields(fields);
        let legality = LegalityPass::compute(&board, &state);
        let initial_fen = generate_fen(&board, &state);
        let mut game = Self {
            board,
            state,
            config,
            legality,
            pending_promotion: None,
            moves_applied: 0,
            initial_fen,
        };
        game.record_current_position();
        game.state.status =
            evaluate_terminal(&game.board, &game.state, &game.legality, &game.config);
        game.log_terminal();
        Ok(game)
    }

    /// Replace the position, keeping the configuration. History and move text
    /// start over. On error the game is unchanged.
    pub fn load_position(&mut self, fen: &str) -> ChessResult<()> {
        *self = Self::with_config(fen, self.config)?;
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn legality(&self) -> &LegalityPass {
        &self.legality
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn fen(&self) -> String {
        generate_fen(&self.board, &self.state)
    }

    /// FEN the game was constructed or last loaded from.
    pub fn initial_fen(&self) -> &str {
        &self.initial_fen
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move
    }

    pub fn legal_moves_from(&self, square: Square) -> &[Square] {
        self.legality.moves_from(square)
    }

    pub fn legal_move_count(&self) -> usize {
        self.legality.legal_move_count()
    }

    pub fn is_check(&self) -> bool {
        self.state.status.check
    }

    pub fn is_double_check(&self) -> bool {
        self.state.status.double_check
    }

    pub fn attacker(&self) -> Option<(Square, Piece)> {
        self.legality.attacker()
    }

    pub fn is_checkmate(&self) -> bool {
        self.state.status.checkmate
    }

    pub fn is_stalemate(&self) -> bool {
        self.state.status.stalemate
    }

    pub fn is_draw(&self) -> bool {
        self.state.status.is_draw()
    }

    pub fn draw_reason(&self) -> Option<DrawReason> {
        self.state.status.draw
    }

    pub fn is_repetition(&self) -> bool {
        self.state.status.repetition
    }

    pub fn move_text(&self) -> String {
        self.state.move_text()
    }

    pub fn position_history(&self) -> &[String] {
        self.state.position_history()
    }

    pub fn result(&self) -> GameResult {
        GameResult::from_status(&self.state.status, self.state.side_to_move)
    }

    pub fn pending_promotion(&self) -> Option<(Square, Square)> {
        self.pending_promotion
    }

    pub fn moves_applied(&self) -> usize {
        self.moves_applied
    }

    pub fn piece_list(&self) -> Vec<(Square, Piece)> {
        self.board.pieces().collect()
    }

    /// Validate and apply one move.
    ///
    /// A pawn reaching the last rank without a promotion piece, on a request
    /// that is not engine-originated, enters the pending-promotion state and
    /// is refused with `PromotionRequired`; resolve it with
    /// [`ChessGame::make_promotion`] or [`ChessGame::cancel_promotion`].
    pub fn make_move(&mut self, request: MoveRequest) -> ChessResult<MoveRecord> {
        let MoveRequest { from, to, .. } = request;

        if let Some((pending_from, pending_to)) = self.pending_promotion {
            let selects_pending =
                from == pending_from && to == pending_to && request.promotion.is_some();
            if !selects_pending {
                debug!(%from, %to, "move rejected: promotion pending");
                return Err(ChessError::PromotionPending {
                    from: pending_from,
                    to: pending_to,
                });
            }
        }

        let Some(piece) = self.board.piece_at(from) else {
            return Err(reject(from, to, IllegalMoveReason::NoPieceOnOrigin));
        };
        if piece.color != self.state.side_to_move {
            return Err(reject(from, to, IllegalMoveReason::WrongTurn));
        }
        if from == to {
            return Err(reject(from, to, IllegalMoveReason::NoOp));
        }
        if !self.legality.is_legal(from, to) {
            return Err(reject(from, to, IllegalMoveReason::NotLegal));
        }

        let promotes =
            piece.kind == PieceKind::Pawn && to.rank() == piece.color.promotion_rank();
        let promotion = match (promotes, request.promotion) {
            (true, Some(kind)) if !kind.is_promotion_target() => {
                debug!(%from, %to, ?kind, "move rejected: invalid promotion piece");
                return Err(ChessError::InvalidPromotion(kind));
            }
            (true, Some(kind)) => Some(kind),
            (true, None) if request.engine_originated => Some(PieceKind::Queen),
            (true, None) => {
                debug!(%from, %to, "promotion required");
                self.pending_promotion = Some((from, to));
                return Err(ChessError::PromotionRequired { from, to });
            }
            (false, Some(_)) => {
                return Err(reject(from, to, IllegalMoveReason::PromotionNotApplicable));
            }
            (false, None) => None,
        };

        Ok(self.apply_validated(piece, from, to, promotion))
    }

    /// Complete the pending promotion with `kind`.
    pub fn make_promotion(&mut self, kind: PieceKind) -> ChessResult<MoveRecord> {
        let (from, to) = self
            .pending_promotion
            .ok_or(ChessError::NoPendingPromotion)?;
        self.make_move(MoveRequest::new(from, to).with_promotion(kind))
    }

    /// Abandon a pending promotion. Returns whether one was pending.
    pub fn cancel_promotion(&mut self) -> bool {
        self.pending_promotion.take().is_some()
    }

    pub fn castle(&mut self, side: CastleSide) -> ChessResult<MoveRecord> {
        let color = self.state.side_to_move;
        let (king_from, king_to, _, _) = castle_squares(color, side);
        if self.board.piece_at(king_from) != Some(Piece::new(PieceKind::King, color)) {
            return Err(reject(king_from, king_to, IllegalMoveReason::NotLegal));
        }
        self.make_move(MoveRequest::new(king_from, king_to))
    }

    /// Capture en passant with the pawn on `from`.
    pub fn en_passant(&mut self, from: Square) -> ChessResult<MoveRecord> {
        let Some(target) = self.state.en_passant_square else {
            return Err(reject(from, from, IllegalMoveReason::NotLegal));
        };
        let is_pawn = matches!(self.board.piece_at(from), Some(p) if p.kind == PieceKind::Pawn);
        if !is_pawn || from.file() == target.file() {
            return Err(reject(from, target, IllegalMoveReason::NotLegal));
        }
        self.make_move(MoveRequest::new(from, target))
    }

    /// Apply `<from><to>[promotion]` text as an engine-originated move.
    pub fn apply_coordinate_move(&mut self, text: &str) -> ChessResult<MoveRecord> {
        let request = parse_coordinate_move(text)?;
        self.make_move(request)
    }

    pub fn apply_san(&mut self, token: &str) -> ChessResult<MoveRecord> {
        let request = parse_san(&self.board, &self.legality, token)?;
        self.make_move(request)
    }

    /// Reverse `record`, which must be the most recently applied move.
    ///
    /// # Panics
    ///
    /// When no applied move remains to be reversed.
    pub fn unmake_move(&mut self, record: &MoveRecord) -> ChessResult<()> {
        assert!(
            self.moves_applied > 0,
            "unmake_move called with no applied move to reverse"
        );
        let fields = parse_fen_state(&record.fen_before)?;

        revert_board(&mut self.board, record);
        self.state.restore_fields(fields);
        if self.config.track_repetitions {
            self.state.forget_last_position();
        }
        if self.config.record_notation {
            self.state.pop_move_token();
        }
        self.moves_applied -= 1;
        self.pending_promotion = None;

        self.legality = LegalityPass::compute(&self.board, &self.state);
        self.state.status = evaluate_terminal(&self.board, &self.state, &self.legality, &self.config);
        Ok(())
    }

    fn apply_validated(
        &mut self,
        piece: Piece,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> MoveRecord {
        let intent = classify_intent(piece, from, to, self.state.en_passant_square, promotion);
        let fen_before = self.fen();
        let fullmove = self.state.fullmove_number;
        let body = self
            .config
            .record_notation
            .then(|| san_body(&self.board, &self.legality, piece, from, to, intent));

        let change = apply_to_board(&mut self.board, piece, from, to, intent);
        let mut record = MoveRecord {
            piece,
            from,
            to,
            captured: change.captured,
            intent,
            rook_move: change.rook_move,
            fen_before,
            san: None,
        };
        update_state_after_move(&mut self.state, &record);
        self.pending_promotion = None;
        self.moves_applied += 1;

        self.legality = LegalityPass::compute(&self.board, &self.state);
        self.record_current_position();
        self.state.status = evaluate_terminal(&self.board, &self.state, &self.legality, &self.config);

        if let Some(body) = body {
            let san = format!("{body}{}", check_suffix(&self.state.status));
            let token = match piece.color {
                Color::Light => format!("{fullmove}. {san}"),
                Color::Dark if self.state.move_tokens().is_empty() => {
                    format!("{fullmove}... {san}")
                }
                Color::Dark => san.clone(),
            };
            self.state.push_move_token(token);
            record.san = Some(san);
        }

        self.log_terminal();
        record
    }

    fn record_current_position(&mut self) {
        if self.config.track_repetitions {
            let key = repetition_key(&self.board, &self.state);
            self.state.record_position(key);
        }
    }

    fn log_terminal(&self) {
        let status = &self.state.status;
        if status.checkmate {
            info!(loser = ?self.state.side_to_move, "checkmate");
        } else if let Some(reason) = status.draw {
            info!(?reason, fen = %self.fen(), "draw");
        }
    }
}

fn reject(from: Square, to: Square, reason: IllegalMoveReason) -> ChessError {
    debug!(%from, %to, %reason, "move rejected");
    ChessError::IllegalMove { from, to, reason }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::game_state::move_record::MoveIntent;
    use crate::utils::algebraic::sq;
    use crate::utils::long_algebraic::record_to_coordinate;

    fn play(game: &mut ChessGame, moves: &[&str]) {
        for text in moves {
            game.apply_coordinate_move(text)
                .unwrap_or_else(|err| panic!("{text} should be legal: {err}"));
        }
    }

    #[test]
    fn fools_mate_is_checkmate() {
        let mut game = ChessGame::new();
        play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert!(game.is_checkmate());
        assert!(game.is_check());
        assert_eq!(game.legal_move_count(), 0);
        assert!(!game.is_draw());
        assert_eq!(game.result(), GameResult::BlackWins);
        assert_eq!(game.move_text(), "1. f3 e5 2. g4 Qh4#");
        assert_eq!(game.attacker().map(|(s, _)| s), Some(sq("h4")));
    }

    #[test]
    fn stalemate_is_a_draw_without_check() {
        let game = ChessGame::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should load");
        assert_eq!(game.legal_move_count(), 0);
        assert!(!game.is_check());
        assert!(game.is_stalemate());
        assert!(game.is_draw());
        assert_eq!(game.draw_reason(), Some(DrawReason::Stalemate));
        assert_eq!(game.result(), GameResult::Draw);
    }

    #[test]
    fn en_passant_exposing_king_is_not_offered() {
        let game = ChessGame::from_fen("4k3/8/8/KPp4r/8/8/8/8 w - c6 0 1").expect("FEN should load");
        assert!(!game.legal_moves_from(sq("b5")).contains(&sq("c6")));
    }

    #[test]
    fn king_shuffle_reaches_threefold_repetition() {
        let mut game =
            ChessGame::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").expect("FEN should load");
        let cycle = ["e1d1", "e8d8", "d1e1", "d8e8"];
        play(&mut game, &cycle);
        play(&mut game, &cycle[..3]);
        assert!(!game.is_draw());
        play(&mut game, &cycle[3..]);
        assert!(game.is_draw());
        assert!(game.is_repetition());
        assert_eq!(game.draw_reason(), Some(DrawReason::Repetition));
        assert_eq!(game.position_history().len(), 9);
    }

    #[test]
    fn hundred_quiet_half_moves_draw() {
        let config = GameConfig::default().with_repetition_tracking(false);
        let mut game =
            ChessGame::with_config("4k3/8/8/8/8/8/4P3/R3K3 w - - 0 1", config).expect("FEN should load");
        for _ in 0..25 {
            assert!(!game.is_draw());
            play(&mut game, &["a1a2", "e8d8", "a2a1", "d8e8"]);
        }
        assert_eq!(game.state().halfmove_clock, 100);
        assert_eq!(game.draw_reason(), Some(DrawReason::FiftyMoveRule));
    }

    #[test]
    fn fifty_move_draw_from_loaded_clock() {
        let mut game =
            ChessGame::from_fen("4k3/8/8/8/8/8/4P3/R3K3 w - - 98 60").expect("FEN should load");
        play(&mut game, &["a1a2"]);
        assert!(!game.is_draw());
        play(&mut game, &["e8d8"]);
        assert!(game.is_draw());
    }

    #[test]
    fn rejections_leave_the_game_untouched() {
        let mut game = ChessGame::new();
        let before = game.fen();
        let cases = [
            (MoveRequest::new(sq("e7"), sq("e5")), IllegalMoveReason::WrongTurn),
            (MoveRequest::new(sq("e2"), sq("e2")), IllegalMoveReason::NoOp),
            (MoveRequest::new(sq("e3"), sq("e4")), IllegalMoveReason::NoPieceOnOrigin),
            (MoveRequest::new(sq("e2"), sq("e5")), IllegalMoveReason::NotLegal),
            (
                MoveRequest::new(sq("e2"), sq("e4")).with_promotion(PieceKind::Queen),
                IllegalMoveReason::PromotionNotApplicable,
            ),
        ];
        for (request, expected) in cases {
            match game.make_move(request) {
                Err(ChessError::IllegalMove { reason, .. }) => assert_eq!(reason, expected),
                other => panic!("expected {expected:?}, got {other:?}"),
            }
        }
        assert_eq!(game.fen(), before);
        assert_eq!(game.move_text(), "");
        assert_eq!(game.moves_applied(), 0);
    }

    #[test]
    fn promotion_waits_for_a_choice() {
        let mut game = ChessGame::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should load");
        let before = game.fen();

        let err = game.make_move(MoveRequest::new(sq("a7"), sq("a8"))).expect_err("needs a piece");
        assert!(matches!(err, ChessError::PromotionRequired { .. }));
        assert_eq!(game.pending_promotion(), Some((sq("a7"), sq("a8"))));

        let err = game.make_move(MoveRequest::new(sq("e1"), sq("e2"))).expect_err("pending");
        assert!(matches!(err, ChessError::PromotionPending { .. }));
        assert_eq!(
            game.make_promotion(PieceKind::King),
            Err(ChessError::InvalidPromotion(PieceKind::King))
        );
        assert_eq!(game.fen(), before);

        let record = game.make_promotion(PieceKind::Knight).expect("knight promotion");
        assert_eq!(record.intent, MoveIntent::Promotion(PieceKind::Knight));
        assert_eq!(
            game.board().piece_at(sq("a8")),
            Some(Piece::new(PieceKind::Knight, Color::Light))
        );
        assert_eq!(game.move_text(), "1. a8=N");
        assert_eq!(game.pending_promotion(), None);
    }

    #[test]
    fn cancelled_promotion_frees_the_board() {
        let mut game = ChessGame::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should load");
        assert!(game.make_move(MoveRequest::new(sq("a7"), sq("a8"))).is_err());
        assert!(game.cancel_promotion());
        assert!(!game.cancel_promotion());
        assert_eq!(game.make_promotion(PieceKind::Queen), Err(ChessError::NoPendingPromotion));
        game.make_move(MoveRequest::new(sq("e1"), sq("e2"))).expect("king move");
    }

    #[test]
    fn engine_promotion_defaults_to_queen() {
        let mut game = ChessGame::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should load");
        let record = game.apply_coordinate_move("a7a8").expect("engine promotion");
        assert_eq!(record.promotion(), Some(PieceKind::Queen));
        assert_eq!(record.san.as_deref(), Some("a8=Q+"));
    }

    #[test]
    fn castling_and_unmake_restore_rights() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        let mut game = ChessGame::from_fen(fen).expect("FEN should load");
        let record = game.castle(CastleSide::Kingside).expect("castle");
        assert_eq!(record.rook_move, Some((sq("h1"), sq("f1"))));
        assert_eq!(game.fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1");
        assert_eq!(game.move_text(), "1. O-O");
        assert_eq!(record_to_coordinate(&record), "e1g1");

        game.unmake_move(&record).expect("unmake");
        assert_eq!(game.fen(), fen);
        assert_eq!(game.move_text(), "");
        assert_eq!(game.position_history().len(), 1);
    }

    #[test]
    fn rook_leaving_its_corner_drops_only_that_right() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        let mut game = ChessGame::from_fen(fen).expect("FEN should load");
        let record = game.apply_coordinate_move("h1g1").expect("h1g1");
        assert_eq!(game.state().castling_rights, CASTLE_ALL & !CASTLE_LIGHT_KINGSIDE);
        assert_eq!(game.fen(), "r3k2r/8/8/8/8/8/8/R3K1R1 b Qkq - 1 1");

        game.unmake_move(&record).expect("unmake");
        assert_eq!(game.state().castling_rights, CASTLE_ALL);
        assert_eq!(game.fen(), fen);
    }

    #[test]
    fn en_passant_target_without_enemy_pawn_is_malformed() {
        for fen in [
            "4k3/8/8/3PK3/8/8/8/8 w - e6 0 1",
            "4k3/8/8/3PN3/8/8/8/4K3 w - e6 0 1",
        ] {
            let err = ChessGame::from_fen(fen).expect_err("inconsistent en-passant target");
            assert!(matches!(err, ChessError::MalformedPosition(_)), "{fen}");
        }
    }

    #[test]
    fn en_passant_call_removes_the_passed_pawn() {
        let fen = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1";
        let mut game = ChessGame::from_fen(fen).expect("FEN should load");
        let record = game.en_passant(sq("e5")).expect("en passant");
        assert_eq!(record.intent, MoveIntent::EnPassant);
        assert_eq!(record.captured, Some((Piece::new(PieceKind::Pawn, Color::Dark), sq("d5"))));
        assert!(game.board().is_empty(sq("d5")));
        assert_eq!(record.san.as_deref(), Some("exd6"));

        game.unmake_move(&record).expect("unmake");
        assert_eq!(game.fen(), fen);
    }

    #[test]
    fn black_first_move_uses_ellipsis() {
        let mut game = ChessGame::from_fen(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
        )
        .expect("FEN should load");
        game.apply_san("e5").expect("e5");
        game.apply_san("Nf3").expect("Nf3");
        assert_eq!(game.move_text(), "1... e5 2. Nf3");
    }

    #[test]
    fn side_not_to_move_in_check_is_malformed() {
        let err = ChessGame::from_fen("4k2R/8/8/8/8/8/8/4K3 w - - 0 1").expect_err("illegal position");
        assert!(matches!(err, ChessError::MalformedPosition(_)));
    }

    #[test]
    fn load_position_resets_history() {
        let mut game = ChessGame::new();
        play(&mut game, &["e2e4"]);
        game.load_position("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should load");
        assert_eq!(game.move_text(), "");
        assert_eq!(game.draw_reason(), Some(DrawReason::InsufficientMaterial));
        assert!(game.load_position("not a fen").is_err());
        assert_eq!(game.fen(), "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    }

    #[test]
    fn random_playouts_keep_invariants() {
        for seed in 0..4u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut game = ChessGame::new();
            let start = game.fen();
            let mut records = Vec::new();

            for _ in 0..80 {
                let requests = game.legality().move_requests();
                if requests.is_empty() {
                    break;
                }
                let request = requests[rng.random_range(0..requests.len())];
                let fen_before = game.fen();
                let mover = game.side_to_move();

                let record = game.make_move(request).expect("generated move is legal");
                assert!(!is_king_in_check(game.board(), mover), "{fen_before} {request:?}");

                let reloaded = ChessGame::from_fen(&game.fen()).expect("reachable FEN loads");
                assert_eq!(reloaded.fen(), game.fen());

                game.unmake_move(&record).expect("unmake");
                assert_eq!(game.fen(), fen_before);
                let record = game.make_move(request).expect("replayed move is legal");
                records.push(record);
            }

            while let Some(record) = records.pop() {
                game.unmake_move(&record).expect("unmake");
            }
            assert_eq!(game.fen(), start);
            assert_eq!(game.move_text(), "");
        }
    }
}
