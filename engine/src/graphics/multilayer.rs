//! Multilayer rendering
//!
//! Per-frame driver of the depth-partitioning scheme. `update` runs once
//! per frame before any camera pass:
//! - re-center the floating origin on the camera
//! - build the view pyramid and classify every registered object
//! - carve the visible depth into bands, each with its own scale
//! - enable one secondary camera per band
//!
//! The host then drives the passes through [`RenderPass`], primary camera
//! first, and the system writes each pass's parameters onto the objects.

use crate::config::{ConfigError, LayeringConfig};
use crate::core::camera::CameraPose;
use crate::core::coordinates::{meter_to_unit, meter_to_unit_vec, unit_to_meter, FloatingOrigin};
use crate::core::entity::{Entity, VisibilityChannel, World};
use crate::core::geometry::{SphereIntersection, ViewPyramid};
use crate::graphics::pass::{CameraId, CameraRenderParams, RenderPass};
use crate::graphics::render_layer::{ObjectDepth, RenderLayer};
use crate::scene::{
    apply_render_params, set_visibility_channel, SceneObjectRegistry, SceneObjectRenderParams,
};
use tracing::{debug, debug_span, info, trace, warn};

/// Conditions that abort band construction for one frame
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayeringError {
    #[error("No scene object intersects the view")]
    NoVisibleObjects,

    #[error("Start depth is zero")]
    ZeroStartDepth,
}

/// Outcome of one frame's layering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Objects that received a depth interval
    pub classified: usize,
    /// Solid objects hidden because the camera is inside them
    pub hidden: usize,
    /// Bands constructed
    pub layers: usize,
    /// Bands were dropped for lack of camera slots
    pub truncated: bool,
    pub start_depth: Option<f64>,
    /// Why no bands were built, if layering failed this frame
    pub error: Option<LayeringError>,
}

/// Bands carved from one frame's classified objects
#[derive(Debug, Clone)]
pub struct Partition {
    pub layers: Vec<RenderLayer>,
    pub start_depth: f64,
    pub truncated: bool,
}

/// Pick the depth the first band starts at
///
/// See-through objects closer than `non_solid_floor` do not pull the start
/// depth in unless a solid object is already that close.
pub fn determine_start_depth(
    objects: &[ObjectDepth],
    non_solid_floor: f64,
) -> Result<f64, LayeringError> {
    let solid_min = objects
        .iter()
        .filter(|object| object.solid)
        .map(|object| object.min_depth)
        .reduce(f64::min);
    let non_solid_min = objects
        .iter()
        .filter(|object| !object.solid)
        .map(|object| object.min_depth)
        .reduce(f64::min);

    match (solid_min, non_solid_min) {
        (Some(solid), Some(non_solid)) => {
            if solid < non_solid_floor {
                Ok(solid)
            } else if non_solid < non_solid_floor {
                Ok(non_solid_floor)
            } else {
                Ok(solid.min(non_solid))
            }
        }
        (None, Some(non_solid)) => Ok(non_solid.max(non_solid_floor)),
        (Some(solid), None) => Ok(solid),
        (None, None) => Err(LayeringError::NoVisibleObjects),
    }
}

/// Slice `[start depth, max_depth]` into bands and assign objects to them
///
/// Each band's scale is `near_anchor / band start`, so its near edge always
/// lands `near_anchor` render units from its camera, and it is `band_size`
/// render units thick.
pub fn partition_depth(
    objects: &[ObjectDepth],
    config: &LayeringConfig,
    max_depth: f64,
) -> Result<Partition, LayeringError> {
    let start_depth = determine_start_depth(objects, config.non_solid_min_depth)?;
    if start_depth.abs() < f64::EPSILON {
        return Err(LayeringError::ZeroStartDepth);
    }

    let mut layers: Vec<RenderLayer> = Vec::new();
    let mut truncated = false;

    if start_depth >= max_depth {
        debug!(
            start_depth,
            max_depth,
            "Nearest object lies beyond the band range"
        );
        return Ok(Partition {
            layers,
            start_depth,
            truncated,
        });
    }

    let mut current_depth = start_depth;
    loop {
        if layers.len() >= config.camera_slots {
            warn!(
                slots = config.camera_slots,
                depth = current_depth,
                "Out of camera slots, dropping further bands"
            );
            truncated = true;
            break;
        }

        let scale = config.near_anchor / current_depth;
        let depth_size = unit_to_meter(config.band_size, scale);
        let layer_max_depth = (current_depth + depth_size).min(max_depth);

        let mut layer = RenderLayer::new(
            current_depth,
            layer_max_depth,
            scale,
            VisibilityChannel::Band(layers.len()),
        );
        for object in objects {
            if layer.overlaps(object) {
                layer.add_member(object.entity);
            }
        }

        trace!(
            index = layers.len(),
            min_depth = current_depth,
            max_depth = layer_max_depth,
            scale,
            members = layer.members().len(),
            "Band created"
        );
        layers.push(layer);

        current_depth += depth_size;
        if current_depth >= max_depth {
            break;
        }
    }

    Ok(Partition {
        layers,
        start_depth,
        truncated,
    })
}

/// Depth-partitioning render orchestrator
pub struct MultilayerRenderSystem {
    config: LayeringConfig,
    registry: SceneObjectRegistry,
    origin: FloatingOrigin,
    camera: CameraPose,
    layers: Vec<RenderLayer>,
    /// Solid objects the camera is inside of this frame
    hidden: Vec<Entity>,
    camera_enabled: Vec<bool>,
    main_camera_params: CameraRenderParams,
    post_processing: bool,
    open_layer: Option<usize>,
}

impl MultilayerRenderSystem {
    /// Create the system with an empty registry
    pub fn new(config: LayeringConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            max_depth = config.max_depth(),
            slots = config.camera_slots,
            "Multilayer render system created"
        );

        let camera_enabled = vec![false; config.camera_slots];
        Ok(Self {
            config,
            registry: SceneObjectRegistry::new(),
            origin: FloatingOrigin::new(),
            camera: CameraPose::default(),
            layers: Vec::new(),
            hidden: Vec::new(),
            camera_enabled,
            main_camera_params: CameraRenderParams::default(),
            post_processing: true,
            open_layer: None,
        })
    }

    pub fn config(&self) -> &LayeringConfig {
        &self.config
    }

    pub fn registry(&self) -> &SceneObjectRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut SceneObjectRegistry {
        &mut self.registry
    }

    pub fn origin(&self) -> &FloatingOrigin {
        &self.origin
    }

    /// Bands of the current frame, nearest first
    pub fn layers(&self) -> &[RenderLayer] {
        &self.layers
    }

    pub fn hidden_objects(&self) -> &[Entity] {
        &self.hidden
    }

    pub fn is_camera_enabled(&self, slot: usize) -> bool {
        self.camera_enabled.get(slot).copied().unwrap_or(false)
    }

    pub fn active_camera_count(&self) -> usize {
        self.camera_enabled.iter().filter(|enabled| **enabled).count()
    }

    pub fn main_camera_params(&self) -> CameraRenderParams {
        self.main_camera_params
    }

    /// The whole-scene post effect only works without bands
    pub fn post_processing_enabled(&self) -> bool {
        self.post_processing
    }

    /// Band whose pass is currently open, if any
    pub fn current_layer(&self) -> Option<usize> {
        self.open_layer
    }

    /// Run the frame's layering ahead of any camera pass
    pub fn update(&mut self, world: &World, camera: &CameraPose) -> FrameReport {
        let _span = debug_span!("multilayer_update", registered = self.registry.len()).entered();

        self.camera = *camera;
        self.origin.recenter(camera.coordinate);
        self.layers.clear();
        self.hidden.clear();
        self.open_layer = None;

        let pyramid = ViewPyramid::from_camera(camera, self.config.max_depth());

        let mut classified = Vec::new();
        for (entity, object) in self.registry.objects(world) {
            match pyramid.check_sphere(object.coordinate, object.radius) {
                SphereIntersection::NoIntersection => {
                    trace!(entity = ?entity, "Outside the view");
                }
                SphereIntersection::Intersection {
                    corner_inside_sphere,
                    min_depth,
                    max_depth,
                } => {
                    if object.is_solid() && corner_inside_sphere {
                        trace!(entity = ?entity, "Camera inside solid object, hiding it");
                        self.hidden.push(entity);
                        continue;
                    }

                    match (min_depth, max_depth) {
                        (Some(min_depth), Some(max_depth)) => classified.push(ObjectDepth {
                            entity,
                            solid: object.is_solid(),
                            min_depth,
                            max_depth,
                        }),
                        _ => debug!(entity = ?entity, "Intersection without depth range, skipping"),
                    }
                }
            }
        }

        let mut report = FrameReport {
            classified: classified.len(),
            hidden: self.hidden.len(),
            ..Default::default()
        };

        match partition_depth(&classified, &self.config, pyramid.depth()) {
            Ok(partition) => {
                report.start_depth = Some(partition.start_depth);
                report.truncated = partition.truncated;
                self.layers = partition.layers;
            }
            Err(error) => {
                warn!(%error, "Depth partitioning failed, rendering without bands");
                report.error = Some(error);
            }
        }
        report.layers = self.layers.len();

        let layer_count = self.layers.len();
        for (slot, enabled) in self.camera_enabled.iter_mut().enumerate() {
            *enabled = slot < layer_count;
        }

        let scene_scale = self.config.meter_to_unit;
        self.main_camera_params = CameraRenderParams {
            position: meter_to_unit_vec(self.origin.to_local(camera.coordinate), scene_scale),
            rotation: camera.rotation,
            near_clip: self.config.primary_near_clip as f32,
            far_clip: meter_to_unit(2.0 * self.config.scene_radius, scene_scale) as f32,
        };

        self.post_processing = self.layers.is_empty();

        debug!(
            classified = report.classified,
            hidden = report.hidden,
            layers = report.layers,
            truncated = report.truncated,
            "Frame layering complete"
        );

        report
    }

    /// Place every registered object at the scene-wide scale
    fn apply_primary(&self, world: &mut World) {
        let params: Vec<SceneObjectRenderParams> = self
            .registry
            .objects(world)
            .map(|(entity, object)| {
                let channel = if self.hidden.contains(&entity) {
                    VisibilityChannel::Hidden
                } else {
                    VisibilityChannel::Primary
                };
                SceneObjectRenderParams::compute(
                    entity,
                    &object,
                    &self.origin,
                    self.config.meter_to_unit,
                    channel,
                )
            })
            .collect();

        for params in &params {
            apply_render_params(world, params);
        }
    }
}

impl RenderPass for MultilayerRenderSystem {
    fn on_pass_begin(&mut self, world: &mut World, camera: CameraId) -> Option<CameraRenderParams> {
        match camera {
            CameraId::Main => {
                self.apply_primary(world);
                Some(self.main_camera_params)
            }
            CameraId::Layer(index) => {
                if !self.is_camera_enabled(index) {
                    debug!(index, "Pass begin for a disabled camera slot");
                    return None;
                }
                let Some(layer) = self.layers.get(index) else {
                    debug!(index, "Pass begin for a missing band");
                    return None;
                };

                for params in layer.object_render_params(world, &self.origin) {
                    apply_render_params(world, &params);
                }
                let camera_params = layer.camera_render_params(
                    self.camera.coordinate,
                    &self.origin,
                    self.camera.rotation,
                );

                self.open_layer = Some(index);
                Some(camera_params)
            }
        }
    }

    fn on_pass_end(&mut self, world: &mut World, camera: CameraId) {
        let CameraId::Layer(index) = camera else {
            return;
        };
        if !self.is_camera_enabled(index) {
            debug!(index, "Pass end for a disabled camera slot");
            return;
        }

        if let Some(layer) = self.layers.get(index) {
            for &member in layer.members() {
                set_visibility_channel(world, member, VisibilityChannel::Primary);
            }
        }
        self.open_layer = None;

        if index == 0 && self.config.restore_primary_after_layers {
            self.apply_primary(world);
        }
    }
}
