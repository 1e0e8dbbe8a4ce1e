/*
 * Spatial Grid Module
 *
 * This module defines the SpatialGrid struct for neighbour lookups when
 * drawing connective lines. It divides the surface into square cells at least
 * as large as the link distance, so every particle within range of a point
 * lies in that point's cell or one of the eight cells around it.
 *
 * The grid covers surface-space [0, width] x [0, height]; positions outside
 * are clamped into the border cells.
 */

use nannou::prelude::*;

pub struct SpatialGrid {
    pub cell_size: f32,
    pub columns: usize,
    pub rows: usize,
    grid: Vec<Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32, width: f32, height: f32) -> Self {
        let columns = ((width / cell_size).ceil() as usize).max(1);
        let rows = ((height / cell_size).ceil() as usize).max(1);

        Self {
            cell_size,
            columns,
            rows,
            grid: vec![Vec::new(); columns * rows],
        }
    }

    /// Whether this grid can be reused for the given cell size and surface
    pub fn fits(&self, cell_size: f32, width: f32, height: f32) -> bool {
        self.cell_size == cell_size
            && self.columns == ((width / cell_size).ceil() as usize).max(1)
            && self.rows == ((height / cell_size).ceil() as usize).max(1)
    }

    #[inline]
    fn cell_coords(&self, pos: Point2) -> (usize, usize) {
        let x = (pos.x / self.cell_size).clamp(0.0, self.columns as f32 - 1.0) as usize;
        let y = (pos.y / self.cell_size).clamp(0.0, self.rows as f32 - 1.0) as usize;
        (x, y)
    }

    // Clear the grid
    pub fn clear(&mut self) {
        for cell in &mut self.grid {
            cell.clear();
        }
    }

    #[inline]
    pub fn insert(&mut self, index: usize, position: Point2) {
        let (x, y) = self.cell_coords(position);
        self.grid[y * self.columns + x].push(index);
    }

    /// Indices stored in the cell containing `position` and its neighbours
    pub fn nearby(&self, position: Point2, out: &mut Vec<usize>) {
        out.clear();
        let (cx, cy) = self.cell_coords(position);

        for y in cy.saturating_sub(1)..=(cy + 1).min(self.rows - 1) {
            let row = y * self.columns;
            for x in cx.saturating_sub(1)..=(cx + 1).min(self.columns - 1) {
                out.extend_from_slice(&self.grid[row + x]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_grid_to_surface() {
        let grid = SpatialGrid::new(120.0, 800.0, 600.0);
        assert_eq!(grid.columns, 7);
        assert_eq!(grid.rows, 5);
        assert!(grid.fits(120.0, 800.0, 600.0));
        assert!(!grid.fits(150.0, 800.0, 600.0));
        assert!(!grid.fits(120.0, 1000.0, 600.0));
    }

    #[test]
    fn nearby_covers_adjacent_cells_only() {
        let mut grid = SpatialGrid::new(100.0, 500.0, 500.0);
        grid.insert(0, pt2(150.0, 150.0));
        grid.insert(1, pt2(250.0, 250.0));
        grid.insert(2, pt2(450.0, 450.0));
        grid.insert(3, pt2(500.0, 500.0)); // on the far edge, clamped

        let mut out = Vec::new();
        grid.nearby(pt2(160.0, 160.0), &mut out);
        out.sort_unstable();
        assert_eq!(out, vec![0, 1]);

        grid.nearby(pt2(0.0, 0.0), &mut out);
        assert_eq!(out, vec![0]);

        grid.nearby(pt2(499.0, 499.0), &mut out);
        out.sort_unstable();
        assert_eq!(out, vec![2, 3]);

        grid.clear();
        grid.nearby(pt2(160.0, 160.0), &mut out);
        assert!(out.is_empty());
    }
}
