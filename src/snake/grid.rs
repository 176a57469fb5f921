//! Flat occupancy mask over the level.

use super::types::Position;

/// `width * height` booleans, row-major. Out-of-range access is inert.
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    width: i32,
    height: i32,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    pub fn new(width: u16, height: u16) -> Self {
        let width = width.max(1) as i32;
        let height = height.max(1) as i32;
        Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width && y >= 0 && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    pub fn set(&mut self, x: i32, y: i32, occupied: bool) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = occupied;
        }
    }

    pub fn get(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| self.cells[i])
    }

    pub fn set_at(&mut self, pos: Position, occupied: bool) {
        self.set(pos.x, pos.y, occupied);
    }

    pub fn get_at(&self, pos: Position) -> bool {
        self.get(pos.x, pos.y)
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}
