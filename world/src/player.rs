use tile_twister_core::CellIndex;

/// Authoritative record of the cell the player stands on.
///
/// Transforms stage the player's destination while they rearrange the grid
/// and commit it once, at their terminal step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerTracker {
    index: CellIndex,
    pending: Option<CellIndex>,
}

impl PlayerTracker {
    pub(crate) const fn new(index: CellIndex) -> Self {
        Self {
            index,
            pending: None,
        }
    }

    /// Cell the player currently occupies.
    #[must_use]
    pub const fn get(&self) -> CellIndex {
        self.index
    }

    /// Destination staged by the running transform, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<CellIndex> {
        self.pending
    }

    /// Moves the player immediately, returning the previous cell.
    pub(crate) fn place(&mut self, index: CellIndex) -> CellIndex {
        self.pending = None;
        std::mem::replace(&mut self.index, index)
    }

    pub(crate) fn set_pending(&mut self, index: CellIndex) {
        self.pending = Some(index);
    }

    /// Applies the staged destination; a no-op when nothing was staged.
    pub(crate) fn commit(&mut self) -> Option<(CellIndex, CellIndex)> {
        let to = self.pending.take()?;
        let from = std::mem::replace(&mut self.index, to);
        Some((from, to))
    }
}
