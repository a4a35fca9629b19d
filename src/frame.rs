// Copyright (c) 2026 rezky_nightky

use crossterm::style::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        fg: None,
        bg: None,
        bold: false,
    };
}

/// Terminal-sized cell buffer that remembers which cells changed since the
/// last flush.
#[derive(Clone, Debug)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    cells: Vec<Cell>,
    dirty_all: bool,
    dirty_map: Vec<bool>,
    dirty: Vec<usize>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; len],
            dirty_all: true,
            dirty_map: vec![false; len],
            dirty: Vec::new(),
        }
    }

    pub fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).and_then(|i| self.cells.get(i))
    }

    pub fn cell_at_index(&self, i: usize) -> Cell {
        self.cells.get(i).copied().unwrap_or(Cell::BLANK)
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        if self.cells[i] == cell {
            return;
        }
        self.cells[i] = cell;
        if !self.dirty_all && !self.dirty_map[i] {
            self.dirty_map[i] = true;
            self.dirty.push(i);
        }
    }

    pub fn is_dirty_all(&self) -> bool {
        self.dirty_all
    }

    pub fn has_changes(&self) -> bool {
        self.dirty_all || !self.dirty.is_empty()
    }

    pub fn dirty_indices(&self) -> &[usize] {
        &self.dirty
    }

    pub fn clear_dirty(&mut self) {
        if self.dirty_all {
            self.dirty_map.fill(false);
        } else {
            for &i in &self.dirty {
                self.dirty_map[i] = false;
            }
        }
        self.dirty_all = false;
        self.dirty.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x_cell() -> Cell {
        Cell {
            ch: 'x',
            ..Cell::BLANK
        }
    }

    #[test]
    fn new_frame_needs_full_redraw() {
        let f = Frame::new(3, 2);
        assert!(f.is_dirty_all());
        assert!(f.has_changes());
    }

    #[test]
    fn set_tracks_only_changed_cells() {
        let mut f = Frame::new(3, 2);
        f.clear_dirty();
        f.set(1, 1, x_cell());
        f.set(1, 1, x_cell());
        f.set(0, 0, Cell::BLANK);
        assert_eq!(f.dirty_indices(), &[4]);
        assert_eq!(f.get(1, 1).unwrap().ch, 'x');
    }

    #[test]
    fn out_of_bounds_set_is_ignored() {
        let mut f = Frame::new(2, 2);
        f.clear_dirty();
        f.set(5, 0, x_cell());
        assert!(!f.has_changes());
    }

    #[test]
    fn clear_dirty_resets_tracking() {
        let mut f = Frame::new(2, 2);
        f.clear_dirty();
        f.set(0, 1, x_cell());
        f.clear_dirty();
        f.set(0, 1, Cell::BLANK);
        assert_eq!(f.dirty_indices(), &[2]);
    }
}
