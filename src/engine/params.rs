/// Search constants.
///
/// Scores are integers in material units (a pawn is worth 1).

// Above any reachable material balance; mates are scored MATE_SCORE - ply.
pub const MATE_SCORE: i32 = 100_000;

// Window bound, strictly above MATE_SCORE so mate scores stay inside it
pub const INFINITY: i32 = 1_000_000;

/// Plies searched by an AI player unless configured otherwise.
pub const DEFAULT_DEPTH: usize = 2;

pub const MAX_DEPTH: usize = 8;

/// Root-parallel workers; 1 keeps the search on the calling thread.
pub const DEFAULT_THREADS: usize = 1;

pub const MAX_THREADS: usize = 64;

#[inline(always)]
pub const fn is_mate_score(score: i32) -> bool {
    score.abs() > MATE_SCORE - MAX_DEPTH as i32 - 1
}
