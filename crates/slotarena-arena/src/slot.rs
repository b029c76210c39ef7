//! Slot table entries.
//!
//! A [`Slot`] is one fixed-size cell of the arena. Its index is set when
//! the arena is built and never changes; only its [`SlotState`] moves
//! between free and allocated.

use std::fmt;

use slotarena_core::BlockId;

/// Base of the synthetic address range shown for slots.
pub const BASE_ADDRESS: u64 = 0x7fff_0000;

/// Distance between the synthetic addresses of neighbouring slots.
pub const SLOT_STRIDE: u64 = 64;

/// Occupancy of a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotState {
    /// Available for allocation.
    Free,
    /// Holding a live block.
    Allocated {
        /// Id of the block.
        id: BlockId,
        /// Logical size in bytes. Informational only.
        size: u32,
        /// Whether freeing the block runs a finalizer first.
        has_finalizer: bool,
    },
}

impl SlotState {
    /// Whether the slot holds a live block.
    pub fn is_allocated(&self) -> bool {
        matches!(self, Self::Allocated { .. })
    }

    /// Id of the live block, if any.
    pub fn id(&self) -> Option<BlockId> {
        match self {
            Self::Allocated { id, .. } => Some(*id),
            Self::Free => None,
        }
    }

    /// Whether the live block carries a finalizer. `false` for free slots.
    pub fn has_finalizer(&self) -> bool {
        matches!(
            self,
            Self::Allocated {
                has_finalizer: true,
                ..
            }
        )
    }
}

/// One cell of the arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    index: usize,
    pub(crate) state: SlotState,
}

impl Slot {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index,
            state: SlotState::Free,
        }
    }

    /// Position of the slot in the arena.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current occupancy.
    pub fn state(&self) -> SlotState {
        self.state
    }

    /// Synthetic address for display: `BASE_ADDRESS + index * SLOT_STRIDE`.
    pub fn address(&self) -> u64 {
        address_of(self.index)
    }

    pub(crate) fn release(&mut self) {
        self.state = SlotState::Free;
    }
}

/// Synthetic display address of the slot at `index`.
pub fn address_of(index: usize) -> u64 {
    BASE_ADDRESS + index as u64 * SLOT_STRIDE
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state {
            SlotState::Free => write!(f, "FREE"),
            SlotState::Allocated { id, .. } => write!(f, "B{id}"),
        }
    }
}
