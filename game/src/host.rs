//! Headless render host
//!
//! Drives the pass callbacks the way a renderer would: the primary camera
//! first, then every enabled band camera from the furthest to the nearest.
//! Instead of drawing, each pass packs its camera and object uniforms into
//! byte buffers ready for upload.

use hugescale_engine::prelude::*;
use tracing::{debug, trace};

/// Everything a renderer would upload for one camera pass
pub struct RecordedPass {
    pub camera: CameraId,
    pub camera_uniform: CameraUniform,
    pub objects: Vec<ObjectUniform>,
}

impl RecordedPass {
    /// Size of the object buffer in bytes
    pub fn object_bytes(&self) -> usize {
        bytemuck::cast_slice::<ObjectUniform, u8>(&self.objects).len()
    }
}

/// Host that records passes instead of drawing them
pub struct HeadlessHost {
    camera_slots: usize,
    frames_rendered: u64,
}

impl HeadlessHost {
    pub fn new(camera_slots: usize) -> Self {
        Self {
            camera_slots,
            frames_rendered: 0,
        }
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Run every pass of one frame
    pub fn render_frame(
        &mut self,
        passes: &mut impl RenderPass,
        world: &mut World,
    ) -> Vec<RecordedPass> {
        let frame = self.frames_rendered;
        let _span = tracing::debug_span!("render_frame", frame).entered();

        let mut recorded = Vec::new();
        let cameras = std::iter::once(CameraId::Main)
            .chain((0..self.camera_slots).rev().map(CameraId::Layer));

        for camera in cameras {
            let Some(params) = passes.on_pass_begin(world, camera) else {
                continue;
            };

            let pass = RecordedPass {
                camera,
                camera_uniform: CameraUniform::from(&params),
                objects: collect_objects(world, camera),
            };
            debug!(
                camera = ?camera,
                objects = pass.objects.len(),
                bytes = pass.object_bytes(),
                near = params.near_clip,
                far = params.far_clip,
                "Pass recorded"
            );

            passes.on_pass_end(world, camera);
            recorded.push(pass);
        }

        self.frames_rendered += 1;
        recorded
    }
}

fn pass_channel(camera: CameraId) -> VisibilityChannel {
    match camera {
        CameraId::Main => VisibilityChannel::Primary,
        CameraId::Layer(index) => VisibilityChannel::Band(index),
    }
}

/// Gather the objects tagged for this pass, skipping switched-off markers
fn collect_objects(world: &World, camera: CameraId) -> Vec<ObjectUniform> {
    let channel = pass_channel(camera);

    world
        .query::<(&RenderState, Option<&MarkerVisibility>)>()
        .iter()
        .filter(|(_, (state, marker))| {
            state.channel == channel && marker.map_or(true, |visibility| visibility.0)
        })
        .map(|(entity, (state, _))| {
            trace!(
                entity = ?entity,
                position = ?state.position,
                scale = state.scale,
                "Object packed"
            );
            ObjectUniform::from(state)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_visits_main_then_bands_far_to_near() {
        let mut world = World::new();
        let mut system = MultilayerRenderSystem::new(LayeringConfig::default()).unwrap();
        for (depth, radius) in [(100.0, 1.0), (990_099.0, 1_000.0)] {
            let object = SceneObject::solid(DVec3::new(0.0, 0.0, depth), radius);
            let entity = world.spawn_scene_object(object, ());
            system.registry_mut().register(entity);
        }
        system.update(&world, &CameraPose::default());
        let layers = system.layers().len();
        assert!(layers >= 2);

        let mut host = HeadlessHost::new(system.config().camera_slots);
        let passes = host.render_frame(&mut system, &mut world);

        assert_eq!(passes.len(), layers + 1);
        assert_eq!(passes[0].camera, CameraId::Main);
        assert_eq!(passes[1].camera, CameraId::Layer(layers - 1));
        assert_eq!(passes[layers].camera, CameraId::Layer(0));
        assert_eq!(passes[0].objects.len(), 2);
        assert_eq!(passes[0].object_bytes(), 160);
        assert_eq!(passes[layers].objects.len(), 2);
        assert_eq!(host.frames_rendered(), 1);
    }

    #[test]
    fn test_hidden_markers_are_not_packed() {
        let mut world = World::new();
        world.spawn((RenderState::default(), MarkerVisibility(false)));
        world.spawn((RenderState::default(), MarkerVisibility(true)));
        world.spawn((RenderState::default(),));

        assert_eq!(collect_objects(&world, CameraId::Main).len(), 2);
        assert!(collect_objects(&world, CameraId::Layer(0)).is_empty());
    }
}
