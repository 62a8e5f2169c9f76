//! Application context
//!
//! Owns every piece of mutable state the galaxy needs: parameters, the
//! scene with its live cloud, camera, orbit controls, viewport, the frame
//! driver and the generator. The UI layer holds one of these and calls
//! into it; nothing is global.

use tracing::debug;

use super::animation::AnimationDriver;
use super::camera::PerspectiveCamera;
use super::config::GalaxyConfig;
use super::generator::GalaxyGenerator;
use super::orbit::OrbitControls;
use super::panel::{PanelBinding, PanelEvent, UpdateMode};
use super::params::GalaxyParams;
use super::scene::Scene;
use super::viewport::Viewport;

pub struct GalaxyContext {
    pub params: GalaxyParams,
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub viewport: Viewport,
    pub driver: AnimationDriver,
    pub binding: PanelBinding,
    generator: GalaxyGenerator,
    /// Regenerations performed, including the initial one
    generations: u64,
}

impl GalaxyContext {
    /// Build the context and generate the first galaxy
    pub fn new(config: GalaxyConfig, viewport: Viewport) -> Self {
        let GalaxyConfig { params, seed } = config;
        let mut ctx = Self {
            binding: PanelBinding::new(UpdateMode::from_instant(params.instant_update)),
            params,
            scene: Scene::new(),
            camera: PerspectiveCamera::galaxy_default(viewport.aspect()),
            controls: OrbitControls::new(),
            viewport,
            driver: AnimationDriver::new(),
            generator: GalaxyGenerator::new(seed),
            generations: 0,
        };
        ctx.regenerate();
        ctx
    }

    /// Replace the live cloud with one built from the current params.
    ///
    /// The previous cloud is detached and released before the new one is
    /// generated, so there is never more than one attached. The new cloud
    /// picks up the current animation time so it is drawn mid-swirl, not
    /// from its rest pose.
    pub fn regenerate(&mut self) {
        let previous = self.scene.detach_cloud();
        let mut cloud = self
            .generator
            .generate(&self.params, previous, self.viewport.pixel_ratio);
        cloud.material.time = self.driver.elapsed();
        self.scene.attach(cloud);
        self.generations += 1;
    }

    /// Route a panel event; regenerates if the current mode says so
    pub fn handle_panel_event(&mut self, event: PanelEvent) -> bool {
        if self.binding.triggers(event) {
            self.regenerate();
            true
        } else {
            false
        }
    }

    /// Feed one frame of panel state; returns true if the galaxy was regenerated
    pub fn observe_panel(&mut self, changed: bool, settled: bool) -> bool {
        let events: Vec<PanelEvent> = self.binding.observe(changed, settled).collect();
        let mut regenerated = false;
        for event in events {
            regenerated |= self.handle_panel_event(event);
        }
        regenerated
    }

    /// Flip between instant and deferred regeneration.
    ///
    /// The toggle is itself a panel change, seen under the mode in effect
    /// before the flip: leaving instant mode regenerates once, entering it
    /// does not. Returns true if the galaxy was regenerated.
    pub fn set_instant_update(&mut self, instant: bool) -> bool {
        let mode = UpdateMode::from_instant(instant);
        if self.binding.mode() == mode {
            return false;
        }
        let regenerated = self.handle_panel_event(PanelEvent::Changed);
        self.params.instant_update = instant;
        self.binding.set_mode(mode);
        regenerated
    }

    /// Surface resized: update camera aspect and viewport, leave the cloud alone
    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) {
        if self.viewport.resize(width, height, device_pixel_ratio) {
            self.camera.set_aspect(width, height);
            debug!(
                width,
                height,
                pixel_ratio = self.viewport.pixel_ratio,
                "Viewport resized"
            );
        }
    }

    /// One frame of the animation loop: advance time into the material
    /// uniform and step the orbit damping. `None` once the driver stops.
    pub fn tick(&mut self, now: f64) -> Option<f32> {
        let time = self.driver.tick(now)?;
        if let Some(cloud) = self.scene.cloud_mut() {
            cloud.material.time = time;
        }
        self.controls.update(&mut self.camera);
        Some(time)
    }

    pub fn generations(&self) -> u64 {
        self.generations
    }

    /// Stars in the live cloud
    pub fn star_count(&self) -> usize {
        self.scene.cloud().map_or(0, |c| c.star_count())
    }
}
