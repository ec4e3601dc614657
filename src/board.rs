use crate::hex::HexPos;
use crate::types::Player;

/// State of one occupied cell. Empty cells are simply absent from the board,
/// so an occupied cell always has `power >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellState {
    pub owner: Player,
    pub power: u8,
}

impl CellState {
    #[inline]
    pub const fn new(owner: Player, power: u8) -> Self {
        Self { owner, power }
    }
}

/// Cell storage for a toroidal hex board of size `n`, row-major by (r, q).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    n: u8,
    cells: Vec<Option<CellState>>,
}

impl Board {
    pub fn new(n: u8) -> Self {
        Self {
            n,
            cells: vec![None; usize::from(n) * usize::from(n)],
        }
    }

    #[inline]
    fn index(&self, pos: HexPos) -> usize {
        debug_assert!(pos.r < self.n && pos.q < self.n);
        usize::from(pos.r) * usize::from(self.n) + usize::from(pos.q)
    }

    #[inline]
    pub fn size(&self) -> u8 {
        self.n
    }

    #[inline]
    pub fn get(&self, pos: HexPos) -> Option<CellState> {
        self.cells[self.index(pos)]
    }

    #[inline]
    pub fn set(&mut self, pos: HexPos, cell: Option<CellState>) {
        let idx = self.index(pos);
        self.cells[idx] = cell;
    }

    #[inline]
    pub fn is_empty(&self, pos: HexPos) -> bool {
        self.get(pos).is_none()
    }

    /// Row-major iterator over every position on the board.
    pub fn positions(&self) -> impl Iterator<Item = HexPos> {
        let n = self.n;
        (0..n).flat_map(move |r| (0..n).map(move |q| HexPos::new(r, q)))
    }

    /// Row-major iterator over occupied cells.
    pub fn occupied(&self) -> impl Iterator<Item = (HexPos, CellState)> + '_ {
        self.positions().filter_map(|pos| self.get(pos).map(|c| (pos, c)))
    }

    /// Sum of power over all occupied cells.
    pub fn total_power(&self) -> u32 {
        self.cells
            .iter()
            .copied()
            .flatten()
            .map(|s| u32::from(s.power))
            .sum()
    }

    /// Sum of power over cells owned by `side`.
    pub fn side_power(&self, side: Player) -> u32 {
        self.cells
            .iter()
            .copied()
            .flatten()
            .filter(|s| s.owner == side)
            .map(|s| u32::from(s.power))
            .sum()
    }

    /// Number of cells owned by `side`.
    pub fn token_count(&self, side: Player) -> u32 {
        self.cells
            .iter()
            .copied()
            .flatten()
            .filter(|s| s.owner == side)
            .count() as u32
    }

    /// Highest single-stack power owned by `side`, 0 when `side` owns
    /// nothing.
    pub fn tallest_stack(&self, side: Player) -> u8 {
        self.cells
            .iter()
            .copied()
            .flatten()
            .filter(|s| s.owner == side)
            .map(|s| s.power)
            .max()
            .unwrap_or(0)
    }

    #[inline]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}
