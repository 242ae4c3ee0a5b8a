use super::PERTURB_SHIFT;

/// Perturbation probe sequence over a power-of-two table.
///
/// Starts at `hash & mask` and steps with
/// `index = (5 * index + perturb + 1) & mask`, shifting `perturb` right by
/// [`PERTURB_SHIFT`] after each step. Once `perturb` reaches zero the
/// recurrence is a full-period generator modulo the capacity, so every slot
/// is eventually visited.
#[derive(Debug, Clone)]
pub(crate) struct ProbeSeq {
    index: usize,
    perturb: u64,
    mask: usize,
}

impl ProbeSeq {
    /// `capacity` must be a power of two.
    #[inline]
    pub(crate) fn new(hash: u64, capacity: usize) -> Self {
        debug_assert!(capacity.is_power_of_two());
        let mask = capacity - 1;
        Self {
            index: hash as usize & mask,
            perturb: hash,
            mask,
        }
    }

    #[inline]
    pub(crate) fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub(crate) fn advance(&mut self) {
        self.index = self
            .index
            .wrapping_mul(5)
            .wrapping_add(self.perturb as usize)
            .wrapping_add(1)
            & self.mask;
        self.perturb >>= PERTURB_SHIFT;
    }
}
