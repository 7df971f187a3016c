/*
 * Spatial Grid Module
 *
 * This module defines the SpatialGrid struct for cloud neighbour lookups.
 * Space is divided into cubes keyed by quantized (x, y, z); a query returns
 * every point in the 3x3x3 block of cells around a position. With the cell
 * size at least as large as the largest perception radius, the result is a
 * superset of the true neighbours.
 *
 * Buckets are kept between rebuilds so their allocations are reused.
 */

use std::collections::HashMap;

use crate::vector::Vector;

type CellKey = (i32, i32, i32);

pub struct SpatialGrid {
    pub cell_size: f32,
    cells: HashMap<CellKey, Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    #[inline]
    fn key(&self, position: &Vector) -> CellKey {
        (
            (position.x / self.cell_size).floor() as i32,
            (position.y / self.cell_size).floor() as i32,
            (position.z / self.cell_size).floor() as i32,
        )
    }

    pub fn clear(&mut self) {
        for bucket in self.cells.values_mut() {
            bucket.clear();
        }
    }

    #[inline]
    pub fn insert(&mut self, index: usize, position: &Vector) {
        let key = self.key(position);
        self.cells.entry(key).or_default().push(index);
    }

    // Clear the grid and insert every position under its slice index
    pub fn rebuild<'a>(&mut self, positions: impl Iterator<Item = &'a Vector>) {
        self.clear();
        for (index, position) in positions.enumerate() {
            self.insert(index, position);
        }
    }

    /// Collect the indices around `position` into `out`, sorted ascending so
    /// callers visit candidates in the same order as a plain slice scan.
    pub fn query_into(&self, position: &Vector, out: &mut Vec<usize>) {
        out.clear();
        let (cx, cy, cz) = self.key(position);
        for dz in -1..=1 {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let key = (cx.saturating_add(dx), cy.saturating_add(dy), cz.saturating_add(dz));
                    if let Some(bucket) = self.cells.get(&key) {
                        out.extend_from_slice(bucket);
                    }
                }
            }
        }
        // Cells at the i32 limits collapse onto each other
        out.sort_unstable();
        out.dedup();
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.values().filter(|bucket| !bucket.is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn query_is_a_superset_of_points_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let positions: Vec<Vector> = (0..300)
            .map(|_| {
                Vector::new(
                    rng.gen_range(-170.0..170.0),
                    rng.gen_range(-170.0..170.0),
                    rng.gen_range(-170.0..170.0),
                )
            })
            .collect();

        let radius = 50.0;
        let mut grid = SpatialGrid::new(radius);
        grid.rebuild(positions.iter());

        let mut nearby = Vec::new();
        for (i, p) in positions.iter().enumerate() {
            grid.query_into(p, &mut nearby);
            assert!(nearby.contains(&i));
            assert!(nearby.windows(2).all(|w| w[0] < w[1]));
            for (j, q) in positions.iter().enumerate() {
                if p.distance(q) < radius {
                    assert!(nearby.contains(&j), "{j} is within range of {i} but missing");
                }
            }
        }
    }

    #[test]
    fn far_out_positions_stay_in_range() {
        let mut grid = SpatialGrid::new(1e-8);
        let positions = [Vector::new(170.0, -170.0, 170.0), Vector::new(-170.0, 170.0, -170.0)];
        grid.rebuild(positions.iter());

        let mut nearby = Vec::new();
        grid.query_into(&positions[0], &mut nearby);
        assert_eq!(nearby, vec![0]);
        grid.query_into(&positions[1], &mut nearby);
        assert_eq!(nearby, vec![1]);
    }

    #[test]
    fn rebuild_forgets_old_positions() {
        let mut grid = SpatialGrid::new(10.0);
        grid.rebuild([Vector::new(0.0, 0.0, 0.0)].iter());
        grid.rebuild([Vector::new(500.0, 0.0, 0.0)].iter());

        let mut nearby = Vec::new();
        grid.query_into(&Vector::ZERO, &mut nearby);
        assert!(nearby.is_empty());
        assert_eq!(grid.occupied_cells(), 1);
    }
}
