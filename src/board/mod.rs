//! Board geometry and occupancy.
//!
//! `absolute_cell` is the single source of truth for where a token stands:
//! capture collision and rendering positions are both derived from it.

mod occupancy;
mod path;

pub use occupancy::{opponents_at, stacks, Position, Stack};
pub use path::{
    absolute_cell, grid_square, home_slot, is_safe, start_cell, HOME_STRETCH_CELLS, PATH_CELLS,
    SAFE_CELLS, SHARED_CELLS,
};
