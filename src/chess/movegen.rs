//! Pseudo-legal move generation on the padded mailbox.
//!
//! Generators step by fixed offsets and stop at the first `OffBoard` cell, so no
//! per-axis range checks are needed. Moves produced here respect occupancy and
//! blocking but may leave the mover's own king attacked; see `legality`.

use super::board::{Board, CastlingRights, Cell};
use super::moves::{Move, MoveFlag};
use super::piece::{Color, Piece, PieceKind};
use super::square::{
    Square, BISHOP_OFFSETS, EAST, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_OFFSETS, WEST,
};

/// Candidate moves for every piece of the side to move.
pub fn pseudo_legal_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    let color = board.active_color();
    for piece in board.pieces().filter(|piece| piece.is(color)) {
        piece_moves(board, piece, &mut moves);
    }
    moves
}

/// Candidate moves for a single piece, dispatched on its variant.
pub fn piece_moves(board: &Board, piece: Piece, moves: &mut Vec<Move>) {
    match piece {
        Piece::Empty(_) => {}
        Piece::Pawn(color, from) => pawn_moves(board, color, from, moves),
        Piece::Knight(color, from) => step_moves(board, color, from, &KNIGHT_OFFSETS, moves),
        Piece::Bishop(color, from) => slide_moves(board, color, from, &BISHOP_OFFSETS, moves),
        Piece::Rook(color, from) => slide_moves(board, color, from, &ROOK_OFFSETS, moves),
        Piece::Queen(color, from) => slide_moves(board, color, from, &KING_OFFSETS, moves),
        Piece::King(color, from) => {
            step_moves(board, color, from, &KING_OFFSETS, moves);
            castling_moves(board, color, from, moves);
        }
    }
}

/// Playable target of `index`, if the cell is empty or holds an enemy of `color`.
fn open_target(board: &Board, color: Color, index: usize) -> Option<Square> {
    match board.cell(index) {
        Cell::Tile(piece) if !piece.is(color) => Some(piece.square()),
        _ => None,
    }
}

fn step_moves(board: &Board, color: Color, from: Square, offsets: &[i16], moves: &mut Vec<Move>) {
    for &offset in offsets {
        if let Some(to) = open_target(board, color, from.step(offset)) {
            moves.push(Move::new(from, to));
        }
    }
}

fn slide_moves(board: &Board, color: Color, from: Square, offsets: &[i16], moves: &mut Vec<Move>) {
    for &offset in offsets {
        let mut index = from.step(offset);
        while let Cell::Tile(piece) = board.cell(index) {
            if piece.is(color) {
                break;
            }
            moves.push(Move::new(from, piece.square()));
            if !piece.is_empty() {
                break;
            }
            index = piece.square().step(offset);
        }
    }
}

fn push_pawn_move(from: Square, to: Square, color: Color, moves: &mut Vec<Move>) {
    if to.rank() == color.opposite().back_rank() {
        for kind in PieceKind::PROMOTIONS {
            moves.push(Move::promotion(from, to, kind));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}

fn pawn_moves(board: &Board, color: Color, from: Square, moves: &mut Vec<Move>) {
    let forward = color.forward();
    let start_rank = match color {
        Color::White => 1,
        Color::Black => 6,
    };

    if let Cell::Tile(Piece::Empty(one)) = board.cell(from.step(forward)) {
        push_pawn_move(from, one, color, moves);
        if from.rank() == start_rank {
            if let Cell::Tile(Piece::Empty(two)) = board.cell(from.step(2 * forward)) {
                moves.push(Move::with_flag(from, two, MoveFlag::DoublePush));
            }
        }
    }

    for side in [WEST, EAST] {
        match board.cell(from.step(forward + side)) {
            Cell::Tile(target) if target.is(color.opposite()) => {
                push_pawn_move(from, target.square(), color, moves);
            }
            Cell::Tile(Piece::Empty(to)) if board.en_passant_target() == Some(to) => {
                let victim = board.cell(to.step(-forward));
                if matches!(victim, Cell::Tile(Piece::Pawn(c, _)) if c == color.opposite()) {
                    moves.push(Move::with_flag(from, to, MoveFlag::EnPassant));
                }
            }
            _ => {}
        }
    }
}

/// Castling needs: rights intact (king and rook unmoved), the rook on its
/// corner, every square between them empty, the king not in check, and no
/// square the king crosses or lands on attacked.
fn castling_moves(board: &Board, color: Color, king: Square, moves: &mut Vec<Move>) {
    if king != Square::from_coords(4, color.back_rank()) {
        return;
    }

    let rights = board.castling_rights();
    let enemy = color.opposite();
    let is_empty = |index: usize| matches!(board.cell(index), Cell::Tile(Piece::Empty(_)));
    let is_safe = |index: usize| {
        Square::new(index).is_some_and(|square| !is_square_attacked(board, square, enemy))
    };
    let has_rook = |index: usize| matches!(board.cell(index), Cell::Tile(Piece::Rook(c, _)) if c == color);

    let mut king_safe = None;
    let mut not_in_check = || *king_safe.get_or_insert_with(|| is_safe(king.index()));

    if rights.has(CastlingRights::kingside(color))
        && has_rook(king.step(3 * EAST))
        && is_empty(king.step(EAST))
        && is_empty(king.step(2 * EAST))
        && not_in_check()
        && is_safe(king.step(EAST))
        && is_safe(king.step(2 * EAST))
    {
        if let Some(to) = Square::new(king.step(2 * EAST)) {
            moves.push(Move::with_flag(king, to, MoveFlag::KingsideCastle));
        }
    }

    if rights.has(CastlingRights::queenside(color))
        && has_rook(king.step(4 * WEST))
        && is_empty(king.step(WEST))
        && is_empty(king.step(2 * WEST))
        && is_empty(king.step(3 * WEST))
        && not_in_check()
        && is_safe(king.step(WEST))
        && is_safe(king.step(2 * WEST))
    {
        if let Some(to) = Square::new(king.step(2 * WEST)) {
            moves.push(Move::with_flag(king, to, MoveFlag::QueensideCastle));
        }
    }
}

/// Whether any piece of `by` attacks `target`.
///
/// Looks outward from the target along each attack pattern, which yields
/// exactly the set of squares `by`'s pieces could capture on: pawn diagonals
/// regardless of occupancy, knight and king steps, and the first piece met on
/// each ray.
pub fn is_square_attacked(board: &Board, target: Square, by: Color) -> bool {
    let holds = |index: usize, kinds: &[PieceKind]| match board.cell(index) {
        Cell::Tile(piece) => {
            piece.color() == Some(by) && piece.kind().is_some_and(|kind| kinds.contains(&kind))
        }
        Cell::OffBoard => false,
    };

    let behind = -by.forward();
    if holds(target.step(behind + WEST), &[PieceKind::Pawn])
        || holds(target.step(behind + EAST), &[PieceKind::Pawn])
    {
        return true;
    }

    if KNIGHT_OFFSETS
        .iter()
        .any(|&offset| holds(target.step(offset), &[PieceKind::Knight]))
    {
        return true;
    }

    if KING_OFFSETS
        .iter()
        .any(|&offset| holds(target.step(offset), &[PieceKind::King]))
    {
        return true;
    }

    let ray_hits = |offsets: &[i16], kinds: &[PieceKind]| {
        offsets.iter().any(|&offset| {
            let mut index = target.step(offset);
            while let Cell::Tile(Piece::Empty(square)) = board.cell(index) {
                index = square.step(offset);
            }
            holds(index, kinds)
        })
    };

    ray_hits(&ROOK_OFFSETS, &[PieceKind::Rook, PieceKind::Queen])
        || ray_hits(&BISHOP_OFFSETS, &[PieceKind::Bishop, PieceKind::Queen])
}
