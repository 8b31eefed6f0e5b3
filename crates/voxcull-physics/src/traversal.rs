//! Grid DDA (Amanatides-Woo) over unit voxels.

use glam::{IVec3, Vec3};
use voxcull_core::coords::WorldPos;

/// Cell advances allowed before a walk gives up.
pub const DEFAULT_MAX_STEPS: u32 = 100;

/// Boundary distances within this fraction of the segment length count as
/// equal.
const BOUNDARY_SLACK: f32 = 1e-4;

/// One cell visited by a [`VoxelTraversal`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraversalCell {
    /// Integer cell coordinates.
    pub pos: WorldPos,
    /// Face the walk entered through, `IVec3::ZERO` for the start cell.
    pub entry_normal: IVec3,
    /// Distance from the segment start to where the walk entered this cell.
    pub distance: f32,
}

/// Iterator over the cells a segment passes through, in order.
///
/// Visits the start cell first and stops after the end cell, after
/// `max_steps` advances, or when the next boundary lies past the end of the
/// segment.
#[derive(Debug, Clone)]
pub struct VoxelTraversal {
    cell: WorldPos,
    end: WorldPos,
    step: [i64; 3],
    delta_dist: [f32; 3],
    side_dist: [f32; 3],
    /// Segment length; boundaries beyond it (plus slack) are never crossed.
    length: f32,
    slack: f32,
    entry_normal: IVec3,
    distance: f32,
    steps: u32,
    max_steps: u32,
    finished: bool,
}

impl VoxelTraversal {
    /// Walk from `from` to `to`.
    pub fn new(from: Vec3, to: Vec3, max_steps: u32) -> Self {
        let cell = WorldPos::from(from);
        let end = WorldPos::from(to);
        let dir = (to - from).normalize_or_zero();
        let length = (to - from).length();

        let start = [from.x, from.y, from.z];
        let cells = [cell.x, cell.y, cell.z];
        let ends = [end.x, end.y, end.z];
        let dirs = [dir.x, dir.y, dir.z];

        let mut step = [0i64; 3];
        let mut delta_dist = [f32::INFINITY; 3];
        let mut side_dist = [f32::INFINITY; 3];

        for axis in 0..3 {
            // Axes the walk never has to cross stay at infinity, which also
            // covers zero direction components.
            if cells[axis] == ends[axis] || dirs[axis] == 0.0 {
                continue;
            }
            delta_dist[axis] = (1.0 / dirs[axis]).abs();
            let cell_min = cells[axis] as f32;
            if dirs[axis] < 0.0 {
                step[axis] = -1;
                side_dist[axis] = (start[axis] - cell_min) * delta_dist[axis];
            } else {
                step[axis] = 1;
                side_dist[axis] = (cell_min + 1.0 - start[axis]) * delta_dist[axis];
            }
        }

        Self {
            cell,
            end,
            step,
            delta_dist,
            side_dist,
            length,
            slack: BOUNDARY_SLACK * length.max(1.0),
            entry_normal: IVec3::ZERO,
            distance: 0.0,
            steps: 0,
            max_steps,
            finished: false,
        }
    }

    /// Number of cell advances taken so far.
    #[inline]
    pub const fn steps(&self) -> u32 {
        self.steps
    }

    /// Whether the walk reached the end cell.
    #[inline]
    pub fn reached_end(&self) -> bool {
        self.cell == self.end
    }

    /// Axis with the nearest boundary.
    ///
    /// Boundaries within slack of the nearest one are ties. A tie goes to an
    /// axis that still has to move toward the end cell, then to the later
    /// axis, so a target on a cell edge or corner lands in its own cell.
    fn next_axis(&self) -> usize {
        let nearest = self.side_dist.iter().copied().fold(f32::INFINITY, f32::min);
        let cells = [self.cell.x, self.cell.y, self.cell.z];
        let ends = [self.end.x, self.end.y, self.end.z];

        let mut chosen = None;
        for axis in 0..3 {
            if self.side_dist[axis] > nearest + self.slack {
                continue;
            }
            let pending = cells[axis] != ends[axis];
            match chosen {
                Some((_, true)) if !pending => {}
                _ => chosen = Some((axis, pending)),
            }
        }
        chosen.map_or(2, |(axis, _)| axis)
    }

    fn advance(&mut self) -> bool {
        if self.reached_end() || self.steps >= self.max_steps {
            return false;
        }

        let axis = self.next_axis();
        let boundary = self.side_dist[axis];
        if !boundary.is_finite() || boundary > self.length + self.slack {
            return false;
        }

        self.distance = self.side_dist[axis];
        self.side_dist[axis] += self.delta_dist[axis];
        self.cell = self.cell.offset_axis(axis, self.step[axis]);

        let mut normal = IVec3::ZERO;
        normal[axis] = -(self.step[axis] as i32);
        self.entry_normal = normal;
        self.steps += 1;
        true
    }
}

impl Iterator for VoxelTraversal {
    type Item = TraversalCell;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let current = TraversalCell {
            pos: self.cell,
            entry_normal: self.entry_normal,
            distance: self.distance,
        };
        if !self.advance() {
            self.finished = true;
        }
        // The cell captured above is always yielded, including the last one.
        Some(current)
    }
}
