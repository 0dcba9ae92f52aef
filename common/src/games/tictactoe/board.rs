use super::types::{CELL_COUNT, Grid};

pub fn get_available_moves(grid: &Grid) -> Vec<usize> {
    (0..CELL_COUNT).filter(|&index| !grid.is_occupied(index)).collect()
}

pub fn is_empty(grid: &Grid) -> bool {
    grid.cells().iter().all(|cell| cell.is_none())
}

pub fn has_empty_cell(grid: &Grid) -> bool {
    grid.cells().iter().any(|cell| cell.is_none())
}

pub fn is_valid_move(grid: &Grid, index: usize) -> bool {
    index < CELL_COUNT && !grid.is_occupied(index)
}
