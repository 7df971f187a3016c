/*
 * Flocking Module
 *
 * Cloud points follow three rules:
 * 1. Separation: Avoid crowding neighbors
 * 2. Alignment: Steer towards the average heading of neighbors
 * 3. Cohesion: Steer towards the average position of neighbors
 *
 * A neighbour must also sit within `depth_layer` of the point along z, so
 * only clouds in roughly the same shell of the globe influence each other.
 * The point itself is skipped by the `d > 0` guard.
 */

use crate::point::Point;
use crate::settings::SceneSettings;
use crate::spatial_grid::SpatialGrid;
use crate::vector::{self, Vector};

impl Point {
    // Distance to `other` when it counts as a neighbour within `radius`
    #[inline]
    fn neighbor_distance(&self, other: &Point, radius: f32, settings: &SceneSettings) -> Option<f32> {
        let d = self.position.distance(&other.position);
        if d > 0.0 && d < radius && (self.position.z - other.position.z).abs() < settings.depth_layer {
            Some(d)
        } else {
            None
        }
    }

    // Weighted sum of the three rules
    pub fn flock<'a, I>(&self, neighbors: I, settings: &SceneSettings) -> Vector
    where
        I: Iterator<Item = &'a Point> + Clone,
    {
        let mut steering = self.separation(neighbors.clone(), settings);
        steering.multiply(settings.separation_weight);
        let mut alignment = self.alignment(neighbors.clone(), settings);
        alignment.multiply(settings.alignment_weight);
        let mut cohesion = self.cohesion(neighbors, settings);
        cohesion.multiply(settings.cohesion_weight);

        steering.add(&alignment).add(&cohesion);
        steering
    }

    // Average of unit vectors pointing away from close neighbours, weighted by 1/d
    pub fn separation<'a>(&self, neighbors: impl Iterator<Item = &'a Point>, settings: &SceneSettings) -> Vector {
        let mut mean = Vector::ZERO;
        let mut count = 0;

        for other in neighbors {
            if let Some(d) = self.neighbor_distance(other, settings.desired_separation, settings) {
                let mut away = vector::subtract(&self.position, &other.position);
                away.normalize().divide(d);
                mean.add(&away);
                count += 1;
            }
        }

        if count > 0 {
            mean.divide(count as f32);
        }
        mean
    }

    // Average neighbour velocity, clamped to the force limit
    pub fn alignment<'a>(&self, neighbors: impl Iterator<Item = &'a Point>, settings: &SceneSettings) -> Vector {
        let mut mean = Vector::ZERO;
        let mut count = 0;

        for other in neighbors {
            if self.neighbor_distance(other, settings.neighbor_radius, settings).is_some() {
                mean.add(&other.velocity);
                count += 1;
            }
        }

        if count > 0 {
            mean.divide(count as f32);
        }
        mean.limit(settings.max_force);
        mean
    }

    // Steer towards the centroid of the neighbours
    pub fn cohesion<'a>(&self, neighbors: impl Iterator<Item = &'a Point>, settings: &SceneSettings) -> Vector {
        let mut sum = Vector::ZERO;
        let mut count = 0;

        for other in neighbors {
            if self.neighbor_distance(other, settings.neighbor_radius, settings).is_some() {
                sum.add(&other.position);
                count += 1;
            }
        }

        if count > 0 {
            sum.divide(count as f32);
            self.steer_to(&sum, settings)
        } else {
            Vector::ZERO
        }
    }

    /// Reynolds steering towards `target`: desired velocity minus current
    /// velocity, clamped to the force limit. The desired speed ramps down
    /// linearly inside `arrival_distance` so points settle instead of
    /// overshooting.
    pub fn steer_to(&self, target: &Vector, settings: &SceneSettings) -> Vector {
        let mut desired = vector::subtract(target, &self.position);
        let d = desired.magnitude();

        if d > 0.0 {
            desired.normalize();
            if d < settings.arrival_distance {
                desired.multiply(settings.max_speed * (d / settings.arrival_distance));
            } else {
                desired.multiply(settings.max_speed);
            }
            desired.subtract(&self.velocity).limit(settings.max_force);
            desired
        } else {
            Vector::ZERO
        }
    }
}

/// Step every cloud once, in order and in place: later clouds see the
/// already-updated state of earlier ones. With a grid, candidates come from
/// the cells around each cloud instead of the whole slice.
pub fn step_clouds(clouds: &mut [Point], settings: &SceneSettings, grid: Option<&mut SpatialGrid>) {
    match grid {
        Some(grid) => {
            grid.rebuild(clouds.iter().map(|cloud| &cloud.position));
            let mut nearby = Vec::new();
            for i in 0..clouds.len() {
                grid.query_into(&clouds[i].position, &mut nearby);
                let acceleration = clouds[i].flock(nearby.iter().map(|&j| &clouds[j]), settings);
                clouds[i].drift(&acceleration, settings);
            }
        }
        None => {
            for i in 0..clouds.len() {
                let acceleration = clouds[i].flock(clouds.iter(), settings);
                clouds[i].drift(&acceleration, settings);
            }
        }
    }
}
