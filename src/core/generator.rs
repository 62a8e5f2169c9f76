//! Procedural galaxy point-cloud generator
//!
//! Branch membership is `index mod branch_count`, not random: every star in
//! branch `k` shares radius `k / 10` and tilt `2πk / branch_count`. The
//! vertex shader turns the resulting ring pattern into spiral arms.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::distribution::signed_log_normal;
use super::geometry::PointAttributes;
use super::params::GalaxyParams;
use super::scene::{CloudId, Material, PointCloud};
use crate::time::now_seconds;

/// Radius of the branch star `index` belongs to
#[inline]
pub fn branch_radius(index: usize, branch_count: u32) -> f64 {
    (index % branch_count as usize) as f64 / 10.0
}

/// Tilt angle of the branch star `index` belongs to
#[inline]
pub fn branch_tilt(index: usize, branch_count: u32) -> f64 {
    (index % branch_count as usize) as f64 * TAU / branch_count as f64
}

/// Inner→outer color factor; radii past the lerp distance extrapolate
#[inline]
pub fn color_factor(radius: f64, lerp_distance: f32) -> f32 {
    (radius / lerp_distance as f64) as f32
}

/// Builds point clouds, owning the random source and the id counter
pub struct GalaxyGenerator {
    rng: StdRng,
    next_id: u64,
}

impl GalaxyGenerator {
    /// Seeded generators reproduce identical clouds for identical params
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, next_id: 1 }
    }

    /// Synthesize the six attribute arrays for `params.point_count` stars
    pub fn generate_attributes(&mut self, params: &GalaxyParams) -> PointAttributes {
        let count = params.point_count as usize;
        let branches = params.branch_count;
        let mu = params.distribution_mu as f64;
        let sigma = params.distribution_sigma as f64;
        let scatter = params.randomness_scale as f64;

        let mut attrs = PointAttributes::zeroed(count);

        for i in 0..count {
            let i3 = i * 3;
            let radius = branch_radius(i, branches);
            attrs.radii[i] = radius as f32;

            // Position: flat disk, y stays 0
            let fi = i as f64;
            attrs.positions[i3] = (1.5 * fi.sin() * radius) as f32;
            attrs.positions[i3 + 2] = (fi.cos() * radius) as f32;

            attrs.axis_tilt[i] = branch_tilt(i, branches) as f32;

            for axis in 0..3 {
                attrs.randomness[i3 + axis] =
                    (signed_log_normal(&mut self.rng, mu, sigma) * scatter) as f32;
            }

            let color = params
                .inner_color
                .lerp(params.outer_color, color_factor(radius, params.color_lerp_distance));
            attrs.colors[i3] = color.r;
            attrs.colors[i3 + 1] = color.g;
            attrs.colors[i3 + 2] = color.b;

            attrs.scales[i] = self.rng.gen::<f32>();
        }

        attrs
    }

    /// Release `previous` (if any), then build a fresh cloud from `params`.
    ///
    /// `pixel_ratio` is baked into the material's point size, matching the
    /// ratio in effect at generation time.
    pub fn generate(
        &mut self,
        params: &GalaxyParams,
        previous: Option<PointCloud>,
        pixel_ratio: f32,
    ) -> PointCloud {
        if let Some(mut previous) = previous {
            previous.release();
        }

        let started = now_seconds();
        let attributes = self.generate_attributes(params);
        let material = Material::new(params.point_size, pixel_ratio, params.blend_mode);
        let id = CloudId(self.next_id);
        self.next_id += 1;

        let cloud = PointCloud::new(id, attributes, material);
        debug!(
            id = id.0,
            stars = cloud.star_count(),
            branches = params.branch_count,
            elapsed_ms = format!("{:.1}", (now_seconds() - started) * 1000.0),
            "Galaxy generated"
        );
        cloud
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn small_params() -> GalaxyParams {
        GalaxyParams {
            point_count: 1_000,
            ..Default::default()
        }
    }

    #[test]
    fn arrays_have_expected_lengths_and_are_finite() {
        let mut generator = GalaxyGenerator::new(Some(1));
        for params in [
            small_params(),
            GalaxyParams { point_count: 100, branch_count: 1, ..small_params() },
            GalaxyParams {
                branch_count: 50,
                randomness_scale: 10.0,
                distribution_sigma: 2.0,
                distribution_mu: 0.0,
                color_lerp_distance: 0.01,
                ..small_params()
            },
            GalaxyParams { randomness_scale: 0.0, distribution_sigma: 0.0, ..small_params() },
        ] {
            let n = params.point_count as usize;
            let attrs = generator.generate_attributes(&params);
            assert_eq!(attrs.positions.len(), 3 * n);
            assert_eq!(attrs.colors.len(), 3 * n);
            assert_eq!(attrs.randomness.len(), 3 * n);
            assert_eq!(attrs.scales.len(), n);
            assert_eq!(attrs.radii.len(), n);
            assert_eq!(attrs.axis_tilt.len(), n);

            for array in [
                &attrs.positions,
                &attrs.colors,
                &attrs.randomness,
                &attrs.scales,
                &attrs.radii,
                &attrs.axis_tilt,
            ] {
                assert!(array.iter().all(|v| v.is_finite()));
            }
        }
    }

    #[test]
    fn radius_depends_only_on_index_mod_branches() {
        assert_eq!(branch_radius(0, 20), 0.0);
        assert_eq!(branch_radius(7, 20), 0.7);
        assert_eq!(branch_radius(27, 20), 0.7);
        assert_eq!(branch_radius(19, 20), 1.9);
        assert_eq!(branch_radius(5, 1), 0.0);

        let mut generator = GalaxyGenerator::new(Some(9));
        let attrs = generator.generate_attributes(&small_params());
        for (i, r) in attrs.radii.iter().enumerate() {
            assert_eq!(*r, branch_radius(i, 20) as f32);
        }
    }

    #[test]
    fn single_branch_collapses_to_central_clump() {
        use crate::core::motion::animated_position;

        let mut generator = GalaxyGenerator::new(Some(4));
        let params = GalaxyParams { point_count: 300, branch_count: 1, ..small_params() };
        let attrs = generator.generate_attributes(&params);
        for i in 0..attrs.len() {
            let star = attrs.vertex(i);
            assert_eq!(star.radius, 0.0);
            let position = animated_position(&star, 12.5);
            assert!(position.is_finite());
            assert_eq!(position.to_array(), star.randomness);
        }
    }

    #[test]
    fn positions_lie_on_flat_disk() {
        let mut generator = GalaxyGenerator::new(Some(2));
        let params = small_params();
        let attrs = generator.generate_attributes(&params);
        for i in 0..attrs.len() {
            let radius = branch_radius(i, params.branch_count);
            assert_eq!(attrs.radii[i], radius as f32);
            assert_eq!(attrs.positions[i * 3 + 1], 0.0);
            let x = (1.5 * (i as f64).sin() * radius) as f32;
            let z = ((i as f64).cos() * radius) as f32;
            assert_eq!(attrs.positions[i * 3], x);
            assert_eq!(attrs.positions[i * 3 + 2], z);
        }
    }

    #[test]
    fn tilt_takes_exactly_branch_count_values() {
        for branches in [1u32, 3, 20, 50] {
            let mut generator = GalaxyGenerator::new(Some(branches as u64));
            let params = GalaxyParams { point_count: 500, branch_count: branches, ..small_params() };
            let attrs = generator.generate_attributes(&params);

            let distinct: BTreeSet<u32> = attrs.axis_tilt.iter().map(|t| t.to_bits()).collect();
            assert_eq!(distinct.len(), branches as usize);

            let expected: BTreeSet<u32> = (0..branches)
                .map(|k| ((k as f64 * TAU / branches as f64) as f32).to_bits())
                .collect();
            assert_eq!(distinct, expected);
        }
    }

    #[test]
    fn colors_interpolate_without_clamping() {
        // branches 30 gives radii up to 2.9; lerp distance 2 is reached at index 20
        let params = GalaxyParams { point_count: 100, branch_count: 30, ..small_params() };
        let mut generator = GalaxyGenerator::new(Some(5));
        let attrs = generator.generate_attributes(&params);
        let color_at = |i: usize| [attrs.colors[i * 3], attrs.colors[i * 3 + 1], attrs.colors[i * 3 + 2]];

        assert_eq!(color_at(0), params.inner_color.to_array());
        assert_eq!(attrs.radii[20], 2.0);
        assert_eq!(color_at(20), params.outer_color.to_array());

        // Past the lerp distance the red channel keeps falling below outer
        let beyond = color_at(29);
        assert!(beyond[0] < params.outer_color.r);
        assert!(beyond[2] > params.outer_color.b);
    }

    #[test]
    fn scales_are_unit_uniform() {
        let mut generator = GalaxyGenerator::new(Some(11));
        let attrs = generator.generate_attributes(&GalaxyParams { point_count: 10_000, ..small_params() });
        assert!(attrs.scales.iter().all(|s| (0.0..1.0).contains(s)));
        let mean = attrs.scales.iter().sum::<f32>() / attrs.len() as f32;
        assert!((mean - 0.5).abs() < 0.02, "mean {}", mean);
    }

    #[test]
    fn zero_randomness_scale_removes_scatter() {
        let mut generator = GalaxyGenerator::new(Some(4));
        let params = GalaxyParams { randomness_scale: 0.0, ..small_params() };
        let attrs = generator.generate_attributes(&params);
        assert!(attrs.randomness.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn seeded_regeneration_is_reproducible() {
        let params = GalaxyParams {
            point_count: 300_000,
            branch_count: 20,
            color_lerp_distance: 2.0,
            distribution_mu: 1.0,
            distribution_sigma: 1.75,
            ..Default::default()
        };

        let a = GalaxyGenerator::new(Some(1234)).generate_attributes(&params);
        let b = GalaxyGenerator::new(Some(1234)).generate_attributes(&params);
        assert_eq!(a, b);

        // A different seed only moves the random fields
        let c = GalaxyGenerator::new(Some(99)).generate_attributes(&params);
        assert_eq!(a.positions, c.positions);
        assert_eq!(a.colors, c.colors);
        assert_eq!(a.radii, c.radii);
        assert_eq!(a.axis_tilt, c.axis_tilt);
        assert_ne!(a.randomness, c.randomness);
        assert_ne!(a.scales, c.scales);
    }

    #[test]
    fn generate_releases_previous_and_assigns_new_id() {
        let mut generator = GalaxyGenerator::new(Some(8));
        let params = small_params();
        let first = generator.generate(&params, None, 2.0);
        assert_eq!(first.material.size, 80.0);
        assert_eq!(first.material.time, 0.0);
        assert_eq!(first.vertices().len(), 1_000);

        let first_id = first.id();
        let second = generator.generate(&params, Some(first), 1.0);
        assert_ne!(second.id(), first_id);
        assert_eq!(second.material.size, 40.0);
        assert!(!second.is_released());
    }
}
