//! Integration tests for frustum/sphere intersection

use glam::{DVec3, Quat};
use hugescale_engine::core::camera::CameraPose;
use hugescale_engine::core::geometry::{SphereIntersection, ViewPyramid};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{FRAC_PI_2, PI};

fn axis_pyramid() -> ViewPyramid {
    let camera = CameraPose::new(DVec3::ZERO, Quat::IDENTITY, 60.0, 1.0);
    ViewPyramid::from_camera(&camera, 100.0)
}

#[test]
fn test_axis_case_depth_range() {
    let pyramid = axis_pyramid();
    assert!((pyramid.horizontal_fov() - 60.0).abs() < 1e-9);

    match pyramid.check_sphere(DVec3::new(0.0, 0.0, 10.0), 1.0) {
        SphereIntersection::Intersection {
            corner_inside_sphere,
            min_depth,
            max_depth,
        } => {
            assert!(!corner_inside_sphere);
            assert!((min_depth.unwrap() - 9.0).abs() < 1e-6);
            assert!((max_depth.unwrap() - 11.0).abs() < 1e-6);
        }
        SphereIntersection::NoIntersection => panic!("Sphere on the axis must intersect"),
    }
}

#[test]
fn test_spheres_outside_do_not_intersect() {
    let pyramid = axis_pyramid();

    // Behind the camera
    assert_eq!(
        pyramid.check_sphere(DVec3::new(0.0, 0.0, -10.0), 1.0),
        SphereIntersection::NoIntersection
    );
    // Beyond the far plane
    assert_eq!(
        pyramid.check_sphere(DVec3::new(0.0, 0.0, 200.0), 1.0),
        SphereIntersection::NoIntersection
    );
    // Off to the side
    assert_eq!(
        pyramid.check_sphere(DVec3::new(50.0, 0.0, 10.0), 1.0),
        SphereIntersection::NoIntersection
    );
    // Above the view
    assert_eq!(
        pyramid.check_sphere(DVec3::new(0.0, 50.0, 10.0), 1.0),
        SphereIntersection::NoIntersection
    );
}

#[test]
fn test_sphere_straddling_far_plane() {
    let pyramid = axis_pyramid();
    let (min, max) = pyramid
        .check_sphere(DVec3::new(0.0, 0.0, 100.0), 5.0)
        .depth_range()
        .unwrap();

    assert!((min - 95.0).abs() < 1e-9);
    assert_eq!(max, 100.0);
}

#[test]
fn test_sphere_touching_only_a_side() {
    // Center above the upper border, only the lower cap pokes into the view
    let pyramid = axis_pyramid();
    let result = pyramid.check_sphere(DVec3::new(0.0, 6.5, 10.0), 1.0);

    assert!(result.intersects());
    assert!(!result.corner_inside_sphere());
    let (min, max) = result.depth_range().unwrap();
    assert!(min >= 9.0 - 1e-9 && max <= 11.0 + 1e-9);
    assert!(min < max);
}

#[test]
fn test_sphere_touching_each_other_side() {
    // Mirrors of the up-side case: down, then both lateral sides
    let pyramid = axis_pyramid();
    let centers = [
        DVec3::new(0.0, -6.5, 10.0),
        DVec3::new(6.5, 0.0, 10.0),
        DVec3::new(-6.5, 0.0, 10.0),
    ];

    for center in centers {
        let result = pyramid.check_sphere(center, 1.0);
        assert!(result.intersects(), "center {center:?}");
        assert!(!result.corner_inside_sphere());

        let (min, max) = result.depth_range().unwrap();
        assert!(min >= 9.0 - 1e-9 && max <= 11.0 + 1e-9, "center {center:?}");
        assert!(min < max);
    }
}

#[test]
fn test_wide_horizontal_fov() {
    let wide = ViewPyramid::new(DVec3::ZERO, Quat::IDENTITY, 100.0, 60.0, 90.0);
    let square = axis_pyramid();
    let center = DVec3::new(10.5, 0.0, 10.0);

    let (min, max) = wide.check_sphere(center, 0.5).depth_range().unwrap();
    assert!(min >= 9.5 - 1e-9 && max <= 10.5 + 1e-9);
    assert!(!square.check_sphere(center, 0.5).intersects());

    // Vertically it is still the narrow 60° view
    let above = DVec3::new(0.0, 10.5, 10.0);
    assert!(!wide.check_sphere(above, 0.5).intersects());
}

/// Depth extent of sampled points lying inside both the sphere and the
/// frustum, shrunk by `margin` so float noise at the borders cannot matter
fn sampled_depth_extent(
    rng: &mut StdRng,
    center: DVec3,
    radius: f64,
    depth: f64,
    half_tangents: (f64, f64),
    margin: f64,
) -> Option<(f64, f64)> {
    let (tan_h, tan_v) = half_tangents;
    let mut extent: Option<(f64, f64)> = None;

    for _ in 0..1_500 {
        let offset = DVec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        ) * radius;
        if offset.length() > radius - margin {
            continue;
        }

        let point = center + offset;
        let inside = point.z >= margin
            && point.z <= depth - margin
            && point.x.abs() <= tan_h * point.z - margin
            && point.y.abs() <= tan_v * point.z - margin;
        if inside {
            extent = Some(match extent {
                Some((min, max)) => (min.min(point.z), max.max(point.z)),
                None => (point.z, point.z),
            });
        }
    }

    extent
}

#[test]
fn test_random_spheres_match_sampled_intersection() {
    let depth = 100.0;
    let pyramid = ViewPyramid::new(DVec3::ZERO, Quat::IDENTITY, depth, 60.0, 90.0);
    let half_tangents = (45f64.to_radians().tan(), 30f64.to_radians().tan());
    let tolerance = 1e-3;

    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut hits = 0;

    for _ in 0..300 {
        let center = DVec3::new(
            rng.gen_range(-90.0..90.0),
            rng.gen_range(-60.0..60.0),
            rng.gen_range(-20.0..120.0),
        );
        let radius = rng.gen_range(1.0..30.0);

        let result = pyramid.check_sphere(center, radius);
        let sampled =
            sampled_depth_extent(&mut rng, center, radius, depth, half_tangents, tolerance);

        if let Some((sampled_min, sampled_max)) = sampled {
            hits += 1;
            assert!(result.intersects(), "missed sphere {center:?} r {radius}");

            let (min, max) = result.depth_range().unwrap();
            assert!(
                min <= sampled_min + tolerance,
                "{center:?} r {radius}: {min} > {sampled_min}"
            );
            assert!(
                max >= sampled_max - tolerance,
                "{center:?} r {radius}: {max} < {sampled_max}"
            );
        }

        if let Some((min, max)) = result.depth_range() {
            assert!(min <= max);
            assert!(min >= -tolerance && max <= depth + tolerance);
            assert!(min >= center.z - radius - tolerance);
            assert!(max <= center.z + radius + tolerance);
        }
    }

    // The seed must exercise a fair share of intersecting spheres
    assert!(hits > 30, "only {hits} intersecting spheres");
}

#[test]
fn test_engulfed_apex_starts_at_zero() {
    let pyramid = axis_pyramid();
    let result = pyramid.check_sphere(DVec3::new(0.0, 0.0, 0.5), 1.0);

    assert!(result.corner_inside_sphere());
    let (min, max) = result.depth_range().unwrap();
    assert_eq!(min, 0.0);
    assert!((max - 1.5).abs() < 1e-9);
}

#[test]
fn test_corner_inside_sphere_ignores_rotation() {
    let center = DVec3::new(3.0, -2.0, 1.0);
    let rotations = [
        Quat::IDENTITY,
        Quat::from_rotation_y(PI),
        Quat::from_rotation_x(FRAC_PI_2),
        Quat::from_euler(glam::EulerRot::YXZ, 0.4, 1.2, -0.3),
    ];

    for rotation in rotations {
        let pyramid = ViewPyramid::new(DVec3::ZERO, rotation, 100.0, 60.0, 90.0);

        let inside = pyramid.check_sphere(center, center.length() + 0.01);
        assert!(inside.corner_inside_sphere(), "rotation {rotation:?}");

        let outside = pyramid.check_sphere(center, center.length() - 0.01);
        assert!(!outside.corner_inside_sphere(), "rotation {rotation:?}");
    }
}

#[test]
fn test_rotated_camera() {
    // Looking down +X
    let camera = CameraPose::new(DVec3::ZERO, Quat::from_rotation_y(FRAC_PI_2), 60.0, 1.0);
    let pyramid = ViewPyramid::from_camera(&camera, 100.0);

    let (min, max) = pyramid
        .check_sphere(DVec3::new(10.0, 0.0, 0.0), 1.0)
        .depth_range()
        .unwrap();
    assert!((min - 9.0).abs() < 1e-5);
    assert!((max - 11.0).abs() < 1e-5);

    let behind_side = DVec3::new(0.0, 0.0, 10.0);
    assert!(!pyramid.check_sphere(behind_side, 1.0).intersects());
}

#[test]
fn test_precision_far_from_world_origin() {
    let camera = CameraPose::new(DVec3::new(1e12, 0.0, 0.0), Quat::IDENTITY, 60.0, 1.0);
    let pyramid = ViewPyramid::from_camera(&camera, 1e4);

    let (min, max) = pyramid
        .check_sphere(DVec3::new(1e12, 0.0, 1_000.0), 10.0)
        .depth_range()
        .unwrap();

    assert!((min - 990.0).abs() < 1e-6);
    assert!((max - 1_010.0).abs() < 1e-6);
}

#[test]
fn test_to_local_matches_camera_frame() {
    let rotation = Quat::from_rotation_y(FRAC_PI_2);
    let camera = CameraPose::new(DVec3::new(5.0, 0.0, 0.0), rotation, 60.0, 1.0);
    let pyramid = ViewPyramid::from_camera(&camera, 100.0);

    let local = pyramid.to_local(DVec3::new(15.0, 0.0, 0.0));
    assert!((local - DVec3::new(0.0, 0.0, 10.0)).length() < 1e-5);
    assert!(pyramid.contains_local_point(local));
}
