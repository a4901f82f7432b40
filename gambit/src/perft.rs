use std::{
    fmt,
    ops::{Add, AddAssign},
};

use super::{Game, Move, Result};

/// A result from [`perft_full`].
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerftResult {
    /// Depth searched
    pub depth: usize,

    /// Number of game states reachable.
    pub nodes: u64,

    /// Number of captures made on the last ply.
    pub captures: u64,

    /// Number of times en passant was played on the last ply.
    pub eps: u64,

    /// Number of times castling was played on the last ply.
    pub castles: u64,

    /// Number of promotions played on the last ply.
    pub promotions: u64,

    /// Number of leaves where the side to move is in check.
    pub checks: u64,
}

impl Add for PerftResult {
    type Output = Self;
    /// Convenience implementation to add perft results.
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            depth: self.depth.max(rhs.depth),
            nodes: self.nodes + rhs.nodes,
            captures: self.captures + rhs.captures,
            eps: self.eps + rhs.eps,
            castles: self.castles + rhs.castles,
            promotions: self.promotions + rhs.promotions,
            checks: self.checks + rhs.checks,
        }
    }
}

impl AddAssign for PerftResult {
    /// Convenience implementation to add perft results.
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs
    }
}

impl fmt::Display for PerftResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = [
            ("Depth", self.depth as u64),
            ("Nodes", self.nodes),
            ("Capt.", self.captures),
            ("E.p.", self.eps),
            ("Cast.", self.castles),
            ("Promo.", self.promotions),
            ("Checks", self.checks),
        ];

        let mut header = String::from("|");
        let mut values = String::from("|");
        for (name, val) in columns {
            let width = name.len().max(val.to_string().len());
            header += &format!(" {name:>width$} |");
            values += &format!(" {val:>width$} |");
        }
        let divider = "-".repeat(header.len());

        write!(f, "{header}\n{divider}\n{values}")
    }
}

/// Counts the leaves of the pseudo-legal move tree `depth` plies below `game`.
///
/// Every listed move is played, including ones that leave the mover's King attacked.
///
/// # Example
/// ```
/// # use gambit::{perft, Game};
/// let game = Game::new();
/// assert_eq!(perft(&game, 1).unwrap(), 20);
/// assert_eq!(perft(&game, 2).unwrap(), 400);
/// ```
pub fn perft(game: &Game, depth: usize) -> Result<u64> {
    // Recursion limit; return 1, since we're fathoming this node.
    if depth == 0 {
        return Ok(1);
    }

    // Bulk counting; no need to recurse again just to apply a singular move and return 1.
    if depth == 1 {
        return Ok(game.legal_moves().len() as u64);
    }

    let mut nodes = 0;
    for &mv in game.legal_moves() {
        let mut child = game.clone();
        child.apply(mv)?;
        nodes += perft(&child, depth - 1)?;
    }

    Ok(nodes)
}

/// Performs a perft, but reports the node count below each move at the root separately.
///
/// The moves come back in the order they were generated.
///
/// # Example
/// ```
/// # use gambit::{splitperft, Game};
/// let game = Game::new();
/// let split = splitperft(&game, 2).unwrap();
/// assert_eq!(split.len(), 20);
/// assert!(split.iter().all(|&(_, nodes)| nodes == 20));
/// ```
pub fn splitperft(game: &Game, depth: usize) -> Result<Vec<(Move, u64)>> {
    let mut split = Vec::with_capacity(game.legal_moves().len());

    for &mv in game.legal_moves() {
        let mut child = game.clone();
        child.apply(mv)?;
        split.push((mv, perft(&child, depth.saturating_sub(1))?));
    }

    Ok(split)
}

/// Perform a perft at the specified depth, collecting data on captures, castling, promotions, etc.
pub fn perft_full(game: &Game, depth: usize) -> Result<PerftResult> {
    let mut res = PerftResult {
        depth,
        ..Default::default()
    };

    if depth == 0 {
        res.nodes = 1;
        res.checks = game.in_check(game.side_to_move()) as u64;
        return Ok(res);
    }

    for &mv in game.legal_moves() {
        let mut child = game.clone();
        child.apply(mv)?;

        let below = perft_full(&child, depth - 1)?;
        if depth == 1 {
            res.captures += mv.is_capture() as u64;
            res.eps += mv.is_en_passant() as u64;
            res.castles += mv.is_castling() as u64;
            res.promotions += mv.is_promotion() as u64;
        }
        res += PerftResult { depth, ..below };
    }

    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_zero_is_one_node() {
        assert_eq!(perft(&Game::new(), 0).unwrap(), 1);
    }

    #[test]
    fn full_perft_agrees_with_perft() {
        let game = Game::new();
        let full = perft_full(&game, 2).unwrap();
        assert_eq!(full.nodes, perft(&game, 2).unwrap());
        assert_eq!(full.depth, 2);
        assert_eq!(full.captures, 0);
        assert_eq!(full.checks, 0);
    }

    #[test]
    fn split_sums_to_total() {
        let game = Game::new();
        let split = splitperft(&game, 3).unwrap();
        let total: u64 = split.iter().map(|&(_, nodes)| nodes).sum();
        assert_eq!(total, perft(&game, 3).unwrap());
    }
}
