use approx::assert_abs_diff_eq;
use cgmath::{One, Quaternion, Vector3};

use vox_ngin::data_structures::transform::{Transform, rotation_from_euler_deg};

#[test]
fn compose_with_identity_parent_keeps_local_placement() {
    let parent = Transform::identity();
    let position = Vector3::new(3.0, -2.0, 7.5);
    let rotation = rotation_from_euler_deg(10.0, 20.0, 30.0);

    let composed = parent.compose(position, rotation);

    assert_abs_diff_eq!(composed.position, position, epsilon = 1e-6);
    assert_abs_diff_eq!(composed.rotation, rotation, epsilon = 1e-6);
}

#[test]
fn compose_rotates_child_offset_into_parent_frame() {
    let parent = Transform::new(
        Vector3::new(0.0, 5.0, 0.0),
        rotation_from_euler_deg(0.0, 90.0, 0.0),
    );

    let composed = parent.compose(Vector3::new(1.0, 0.0, 0.0), Quaternion::one());

    // a quarter turn about y sends +x to -z
    assert_abs_diff_eq!(
        composed.position,
        Vector3::new(0.0, 5.0, -1.0),
        epsilon = 1e-5
    );
}

#[test]
fn compose_matches_sequential_point_application() {
    let parent = Transform::new(
        Vector3::new(1.0, 2.0, 3.0),
        rotation_from_euler_deg(25.0, -40.0, 110.0),
    );
    let child_position = Vector3::new(-4.0, 0.5, 2.0);
    let child_rotation = rotation_from_euler_deg(-15.0, 60.0, 5.0);
    let composed = parent.compose(child_position, child_rotation);

    for point in [
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(-2.5, 3.0, 0.25),
        Vector3::new(100.0, -50.0, 12.0),
    ] {
        let via_composed = composed.transform_point(point);
        let child = Transform::new(child_position, child_rotation);
        let sequential = parent.transform_point(child.transform_point(point));
        assert_abs_diff_eq!(via_composed, sequential, epsilon = 1e-3);
    }
}

#[test]
fn euler_quarter_turn_about_y_sends_x_to_negative_z() {
    let rotation = rotation_from_euler_deg(0.0, 90.0, 0.0);
    let rotated = rotation * Vector3::new(1.0, 0.0, 0.0);
    assert_abs_diff_eq!(rotated, Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-5);
}

#[test]
fn euler_quarter_turn_about_x_sends_y_to_z() {
    let rotation = rotation_from_euler_deg(90.0, 0.0, 0.0);
    let rotated = rotation * Vector3::new(0.0, 1.0, 0.0);
    assert_abs_diff_eq!(rotated, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-5);
}

#[test]
fn euler_applies_x_rotation_before_y() {
    // x first: +y goes to +z; then the quarter turn about y carries +z to +x.
    // The reverse order would leave the vector on +z.
    let rotation = rotation_from_euler_deg(90.0, 90.0, 0.0);
    let rotated = rotation * Vector3::new(0.0, 1.0, 0.0);
    assert_abs_diff_eq!(rotated, Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-5);
}

#[test]
fn default_transform_is_identity() {
    let transform = Transform::default();
    let point = Vector3::new(4.0, 5.0, 6.0);
    assert_abs_diff_eq!(transform.transform_point(point), point, epsilon = 1e-6);
}
