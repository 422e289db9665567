//! View pyramid: the camera frustum in double precision
//!
//! The frustum is modelled as four tilted border sides plus a far side, with
//! the camera at the local origin looking down local +Z. A sphere query
//! answers whether the sphere touches the frustum and over which depth
//! interval, which is all the depth partitioning needs.

use crate::core::camera::{vertical_to_horizontal_fov, CameraPose};
use crate::core::coordinates::{rotate_precise, PrecisionVector};
use crate::core::geometry::planar::{
    circle_border_points, circle_horizontal_line_intersections, circle_line_intersections,
    circle_vertical_line_intersections, point_in_rectangle, point_in_wedge,
};
use glam::{DQuat, DVec2, DVec3, Quat};

/// Result of a sphere query against the view pyramid
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SphereIntersection {
    /// The sphere lies wholly outside the frustum
    NoIntersection,
    /// The sphere touches the frustum
    Intersection {
        /// The camera (pyramid apex) lies inside the sphere
        corner_inside_sphere: bool,
        /// Nearest depth of the visible part of the sphere, in meters
        min_depth: Option<f64>,
        /// Furthest depth of the visible part of the sphere, in meters
        max_depth: Option<f64>,
    },
}

impl SphereIntersection {
    pub fn intersects(&self) -> bool {
        matches!(self, SphereIntersection::Intersection { .. })
    }

    pub fn corner_inside_sphere(&self) -> bool {
        matches!(
            self,
            SphereIntersection::Intersection {
                corner_inside_sphere: true,
                ..
            }
        )
    }

    /// Both depth bounds, when the query produced them
    pub fn depth_range(&self) -> Option<(f64, f64)> {
        match *self {
            SphereIntersection::Intersection {
                min_depth: Some(min),
                max_depth: Some(max),
                ..
            } => Some((min, max)),
            _ => None,
        }
    }
}

/// One tilted border plane of the frustum
///
/// In the side's own 2D frame `x` runs along the tilted forward axis and `y`
/// along the side's left axis; the visible part of the plane is a wedge.
#[derive(Debug, Clone, Copy)]
struct BorderSide {
    forward: DVec3,
    left: DVec3,
    up: DVec3,
    tilt_cos: f64,
    side_depth: f64,
    wedge_fov: f64,
}

impl BorderSide {
    fn new(
        left_axis: DVec3,
        up_axis: DVec3,
        tilt_degrees: f64,
        lateral_fov: f64,
        depth: f64,
    ) -> Self {
        let tilt = tilt_degrees.to_radians();
        let tilt_cos = tilt.cos();
        let side_depth = depth / tilt_cos;
        let far_half_width = (lateral_fov / 2.0).to_radians().tan() * depth;
        let wedge_fov = 2.0 * far_half_width.atan2(side_depth).to_degrees();

        let rotation = DQuat::from_axis_angle(left_axis, tilt);

        Self {
            forward: rotation * DVec3::Z,
            left: rotation * left_axis,
            up: rotation * up_axis,
            tilt_cos,
            side_depth,
            wedge_fov,
        }
    }

    /// Depth interval where the sphere crosses this side, if it does
    fn check_sphere(&self, center: DVec3, radius: f64) -> Option<(f64, f64)> {
        let on_plane = center.project_on_plane(self.up);
        let distance = (center - on_plane).length();
        if distance >= radius {
            return None;
        }

        let circle_center = DVec2::new(
            on_plane.signed_length_along(self.forward),
            on_plane.signed_length_along(self.left),
        );
        let circle_radius = (radius * radius - distance * distance).sqrt();

        let slope = (self.wedge_fov / 2.0).to_radians().tan();
        let far_corner = DVec2::new(self.side_depth, slope * self.side_depth);

        let lines = [
            circle_line_intersections(circle_center, circle_radius, slope),
            circle_line_intersections(circle_center, circle_radius, -slope),
            circle_vertical_line_intersections(circle_center, circle_radius, self.side_depth),
        ];

        let mut candidates: Vec<DVec2> = lines.into_iter().flatten().flatten().collect();
        candidates.extend(circle_border_points(circle_center, circle_radius));

        // Wedge vertices covered by the circle bound the interval too
        let vertices = [
            DVec2::ZERO,
            far_corner,
            DVec2::new(far_corner.x, -far_corner.y),
        ];
        for vertex in vertices {
            if vertex.distance(circle_center) <= circle_radius {
                candidates.push(vertex);
            }
        }

        let mut range: Option<(f64, f64)> = None;
        for point in candidates
            .into_iter()
            .filter(|point| point_in_wedge(*point, self.wedge_fov, self.side_depth))
        {
            range = Some(match range {
                Some((min, max)) => (min.min(point.x), max.max(point.x)),
                None => (point.x, point.x),
            });
        }

        range.map(|(min, max)| (min * self.tilt_cos, max * self.tilt_cos))
    }
}

/// The far plane of the frustum as a rectangle at `z = depth`
#[derive(Debug, Clone, Copy)]
struct FarSide {
    depth: f64,
    width: f64,
    height: f64,
}

impl FarSide {
    fn new(depth: f64, vertical_fov: f64, horizontal_fov: f64) -> Self {
        Self {
            depth,
            width: 2.0 * (horizontal_fov / 2.0).to_radians().tan() * depth,
            height: 2.0 * (vertical_fov / 2.0).to_radians().tan() * depth,
        }
    }

    fn check_sphere(&self, center: DVec3, radius: f64) -> bool {
        if !(center.z - radius < self.depth && self.depth < center.z + radius) {
            return false;
        }

        let offset = self.depth - center.z;
        let circle_radius = (radius * radius - offset * offset).sqrt();
        let circle_center = center.truncate();

        if circle_center.length() <= circle_radius
            || point_in_rectangle(circle_center, self.width, self.height)
        {
            return true;
        }

        let half_width = self.width / 2.0;
        let half_height = self.height / 2.0;
        let edge_points = [
            circle_vertical_line_intersections(circle_center, circle_radius, half_width),
            circle_vertical_line_intersections(circle_center, circle_radius, -half_width),
            circle_horizontal_line_intersections(circle_center, circle_radius, half_height),
            circle_horizontal_line_intersections(circle_center, circle_radius, -half_height),
        ];

        edge_points
            .into_iter()
            .flatten()
            .flatten()
            .any(|point| point_in_rectangle(point, self.width, self.height))
    }
}

/// Per-frame view frustum of a camera
///
/// Rebuilt from the camera pose every frame; never cached.
#[derive(Debug, Clone)]
pub struct ViewPyramid {
    coordinate: DVec3,
    rotation: Quat,
    inverse_rotation: Quat,
    depth: f64,
    vertical_fov: f64,
    horizontal_fov: f64,
    border_sides: [BorderSide; 4],
    far_side: FarSide,
}

impl ViewPyramid {
    /// Create a view pyramid
    ///
    /// # Arguments
    /// * `coordinate` - Apex (camera) coordinate in meters
    /// * `rotation` - Camera rotation, local +Z forward
    /// * `depth` - Far extent of the pyramid in meters
    /// * `vertical_fov` - Vertical field of view in degrees
    /// * `horizontal_fov` - Horizontal field of view in degrees
    pub fn new(
        coordinate: DVec3,
        rotation: Quat,
        depth: f64,
        vertical_fov: f64,
        horizontal_fov: f64,
    ) -> Self {
        let half_vertical = vertical_fov / 2.0;
        let half_horizontal = horizontal_fov / 2.0;
        let (h_fov, v_fov) = (horizontal_fov, vertical_fov);

        let border_sides = [
            // up
            BorderSide::new(DVec3::NEG_X, DVec3::Y, half_vertical, h_fov, depth),
            // down
            BorderSide::new(DVec3::NEG_X, DVec3::Y, -half_vertical, h_fov, depth),
            // left
            BorderSide::new(DVec3::NEG_Y, DVec3::NEG_X, half_horizontal, v_fov, depth),
            // right
            BorderSide::new(DVec3::NEG_Y, DVec3::X, -half_horizontal, v_fov, depth),
        ];

        Self {
            coordinate,
            rotation,
            inverse_rotation: rotation.inverse(),
            depth,
            vertical_fov,
            horizontal_fov,
            border_sides,
            far_side: FarSide::new(depth, vertical_fov, horizontal_fov),
        }
    }

    /// Build the pyramid for a camera pose, deriving the horizontal FOV
    pub fn from_camera(camera: &CameraPose, depth: f64) -> Self {
        Self::new(
            camera.coordinate,
            camera.rotation,
            depth,
            camera.vertical_fov_degrees,
            vertical_to_horizontal_fov(camera.vertical_fov_degrees, camera.aspect_ratio),
        )
    }

    pub fn coordinate(&self) -> DVec3 {
        self.coordinate
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn depth(&self) -> f64 {
        self.depth
    }

    pub fn vertical_fov(&self) -> f64 {
        self.vertical_fov
    }

    pub fn horizontal_fov(&self) -> f64 {
        self.horizontal_fov
    }

    /// Convert a world coordinate into pyramid-local meters
    pub fn to_local(&self, world_coordinate: DVec3) -> DVec3 {
        rotate_precise(self.inverse_rotation, world_coordinate - self.coordinate)
    }

    /// Check that a pyramid-local point lies inside the frustum
    pub fn contains_local_point(&self, point: DVec3) -> bool {
        let lateral = DVec2::new(point.z, point.x);
        let vertical = DVec2::new(point.z, point.y);

        point_in_wedge(lateral, self.horizontal_fov, self.depth)
            && point_in_wedge(vertical, self.vertical_fov, self.depth)
    }

    /// Intersect a sphere with the frustum
    ///
    /// # Arguments
    /// * `center` - Sphere center in world meters
    /// * `radius` - Sphere radius in meters
    pub fn check_sphere(&self, center: DVec3, radius: f64) -> SphereIntersection {
        let relative = center - self.coordinate;
        let corner_inside_sphere = relative.length() < radius;

        let local = rotate_precise(self.inverse_rotation, relative);
        let front = local - DVec3::Z * radius;
        let back = local + DVec3::Z * radius;

        let front_inside = self.contains_local_point(front);
        let back_inside = self.contains_local_point(back);
        let far_hit = self.far_side.check_sphere(local, radius);

        let mut side_range: Option<(f64, f64)> = None;
        for side in &self.border_sides {
            if let Some((min, max)) = side.check_sphere(local, radius) {
                side_range = Some(match side_range {
                    Some((low, high)) => (low.min(min), high.max(max)),
                    None => (min, max),
                });
            }
        }

        let inside = front_inside || back_inside;
        if !(corner_inside_sphere || side_range.is_some() || far_hit || inside) {
            return SphereIntersection::NoIntersection;
        }

        let mut min_depth = if corner_inside_sphere {
            Some(0.0)
        } else if front_inside {
            Some(front.z)
        } else {
            None
        };

        let mut max_depth = if far_hit {
            Some(self.depth)
        } else if back_inside {
            Some(back.z)
        } else {
            None
        };

        if let Some((side_min, side_max)) = side_range {
            min_depth = Some(min_depth.map_or(side_min, |depth| depth.min(side_min)));
            max_depth = Some(max_depth.map_or(side_max, |depth| depth.max(side_max)));
        }

        SphereIntersection::Intersection {
            corner_inside_sphere,
            min_depth,
            max_depth,
        }
    }
}
