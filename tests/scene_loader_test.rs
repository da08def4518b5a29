use approx::assert_abs_diff_eq;
use cgmath::{Vector2, Vector3};

use vox_ngin::{
    data_structures::transform::Transform,
    scene::{Scene, SceneBackend, SceneError},
};

/// Records every construction request instead of touching a GPU.
#[derive(Default)]
struct StubBackend {
    loads: Vec<String>,
    fail_loads: bool,
}

impl SceneBackend for StubBackend {
    type Model = String;
    type ShapeBinding = ();
    type Voxbox = (Vector3<f32>, Vector3<f32>, Transform);
    type Water = (Vec<Vector2<f32>>, Vector3<f32>);
    type Rope = (Vec<Vector3<f32>>, Vector3<f32>, Transform);

    fn load_model(&mut self, path: &str) -> anyhow::Result<String> {
        if self.fail_loads {
            anyhow::bail!("simulated read failure");
        }
        self.loads.push(path.to_string());
        Ok(path.to_string())
    }

    fn shape_binding(&mut self, _transform: &Transform, _scale: f32) {}

    fn voxbox(
        &mut self,
        size: Vector3<f32>,
        color: Vector3<f32>,
        transform: &Transform,
    ) -> Self::Voxbox {
        (size, color, *transform)
    }

    fn water(&mut self, boundary: &[Vector2<f32>], position: Vector3<f32>) -> Self::Water {
        (boundary.to_vec(), position)
    }

    fn rope(
        &mut self,
        points: &[Vector3<f32>],
        color: Vector3<f32>,
        transform: &Transform,
    ) -> Self::Rope {
        (points.to_vec(), color, *transform)
    }
}

fn parse(text: &str) -> Scene<StubBackend> {
    let mut backend = StubBackend::default();
    Scene::from_str(text, "", &mut backend).expect("scene should parse")
}

#[test]
fn repeated_model_file_is_loaded_once() {
    let mut backend = StubBackend::default();
    let scene = Scene::from_str(
        r#"<scene>
            <vox file="crate.vox" pos="0 0 0"/>
            <vox file="crate.vox" pos="5 0 0"/>
        </scene>"#,
        "",
        &mut backend,
    )
    .unwrap();

    assert_eq!(scene.shapes.len(), 2);
    assert_eq!(scene.models.len(), 1);
    assert_eq!(backend.loads, vec!["crate.vox"]);
}

#[test]
fn mod_prefix_resolves_against_document_folder() {
    let mut backend = StubBackend::default();
    let scene = Scene::from_str(
        r#"<scene>
            <vox file="MOD/a.vox" pos="1 0 0"/>
            <vox file="b.vox" pos="0 0 4"/>
        </scene>"#,
        "assets/",
        &mut backend,
    )
    .unwrap();

    assert_eq!(scene.shapes[0].file, "assets/a.vox");
    assert_abs_diff_eq!(
        scene.shapes[0].transform.position,
        Vector3::new(1.0, 0.0, 0.0),
        epsilon = 1e-6
    );
    assert_eq!(scene.shapes[1].file, "b.vox");
    assert_abs_diff_eq!(
        scene.shapes[1].transform.position,
        Vector3::new(0.0, 0.0, 4.0),
        epsilon = 1e-6
    );
}

#[test]
fn nested_elements_inherit_composed_transforms() {
    let scene = parse(
        r#"<scene>
            <group pos="0 10 0" rot="0 90 0">
                <vox file="m.vox" pos="1 0 0"/>
            </group>
        </scene>"#,
    );

    // the group's quarter turn about y carries the child's +x offset to -z
    assert_eq!(scene.shapes.len(), 1);
    assert_abs_diff_eq!(
        scene.shapes[0].transform.position,
        Vector3::new(0.0, 10.0, -1.0),
        epsilon = 1e-5
    );
}

#[test]
fn unknown_tags_still_propagate_transforms() {
    let scene = parse(
        r#"<scene>
            <whatever pos="0 0 5">
                <vox file="m.vox" pos="0 2 0"/>
            </whatever>
        </scene>"#,
    );

    assert_eq!(scene.shapes.len(), 1);
    assert_abs_diff_eq!(
        scene.shapes[0].transform.position,
        Vector3::new(0.0, 2.0, 5.0),
        epsilon = 1e-6
    );
}

#[test]
fn vox_without_file_attribute_fails_the_load() {
    let mut backend = StubBackend::default();
    let result = Scene::from_str(r#"<scene><vox pos="0 0 0"/></scene>"#, "", &mut backend);

    match result {
        Err(SceneError::MissingAttribute { element, attribute }) => {
            assert_eq!(element, "vox");
            assert_eq!(attribute, "file");
        }
        other => panic!("expected MissingAttribute, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn malformed_position_names_element_attribute_and_value() {
    let mut backend = StubBackend::default();
    let result = Scene::from_str(
        r#"<scene><vox file="m.vox" pos="1 banana 3"/></scene>"#,
        "",
        &mut backend,
    );

    match result {
        Err(SceneError::InvalidAttribute {
            element,
            attribute,
            value,
        }) => {
            assert_eq!(element, "vox");
            assert_eq!(attribute, "pos");
            assert_eq!(value, "1 banana 3");
        }
        other => panic!("expected InvalidAttribute, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn wrong_field_count_is_rejected() {
    let mut backend = StubBackend::default();
    let result = Scene::from_str(
        r#"<scene><vox file="m.vox" pos="1 2"/></scene>"#,
        "",
        &mut backend,
    );
    assert!(matches!(result, Err(SceneError::InvalidAttribute { .. })));
}

#[test]
fn model_load_failure_names_the_path() {
    let mut backend = StubBackend {
        fail_loads: true,
        ..Default::default()
    };
    let result = Scene::from_str(
        r#"<scene><vox file="gone.vox"/></scene>"#,
        "",
        &mut backend,
    );

    match result {
        Err(SceneError::Model { path, .. }) => assert_eq!(path, "gone.vox"),
        other => panic!("expected Model error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn scale_defaults_to_one_and_rejects_non_positive_values() {
    let scene = parse(r#"<scene><vox file="m.vox"/></scene>"#);
    assert_eq!(scene.shapes[0].scale, 1.0);

    let mut backend = StubBackend::default();
    let result = Scene::from_str(
        r#"<scene><vox file="m.vox" scale="0"/></scene>"#,
        "",
        &mut backend,
    );
    assert!(matches!(
        result,
        Err(SceneError::InvalidAttribute {
            attribute: "scale",
            ..
        })
    ));
}

#[test]
fn empty_object_attribute_selects_the_whole_model() {
    let scene = parse(r#"<scene><vox file="m.vox" object=""/></scene>"#);
    assert_eq!(scene.shapes[0].object, None);

    let scene = parse(r#"<scene><vox file="m.vox" object="wheel"/></scene>"#);
    assert_eq!(scene.shapes[0].object.as_deref(), Some("wheel"));
}

#[test]
fn voxbox_defaults_and_placement() {
    let scene = parse(r#"<scene><voxbox pos="0 1 0"/></scene>"#);

    assert_eq!(scene.voxboxes.len(), 1);
    let (size, color, transform) = &scene.voxboxes[0];
    assert_abs_diff_eq!(*size, Vector3::new(10.0, 10.0, 10.0), epsilon = 1e-6);
    assert_abs_diff_eq!(*color, Vector3::new(1.0, 1.0, 1.0), epsilon = 1e-6);
    assert_abs_diff_eq!(
        transform.position,
        Vector3::new(0.0, 1.0, 0.0),
        epsilon = 1e-6
    );
}

#[test]
fn water_requires_at_least_three_vertices() {
    let scene = parse(
        r#"<scene>
            <water pos="0 2 0">
                <vertex pos="0 0"/>
                <vertex pos="10 0"/>
            </water>
        </scene>"#,
    );
    assert!(scene.water.is_none());

    let scene = parse(
        r#"<scene>
            <water pos="0 2 0">
                <vertex pos="0 0"/>
                <vertex pos="10 0"/>
                <vertex pos="10 10"/>
            </water>
        </scene>"#,
    );
    let (boundary, position) = scene.water.expect("three vertices make a water body");
    assert_eq!(boundary.len(), 3);
    assert_abs_diff_eq!(position, Vector3::new(0.0, 2.0, 0.0), epsilon = 1e-6);
}

#[test]
fn only_the_first_water_body_is_kept() {
    let scene = parse(
        r#"<scene>
            <water pos="0 1 0">
                <vertex pos="0 0"/><vertex pos="1 0"/><vertex pos="1 1"/>
            </water>
            <water pos="0 9 0">
                <vertex pos="0 0"/><vertex pos="2 0"/><vertex pos="2 2"/>
            </water>
        </scene>"#,
    );

    let (_, position) = scene.water.expect("first water body survives");
    assert_abs_diff_eq!(position, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
}

#[test]
fn rope_requires_two_points_and_defaults_to_black() {
    let scene = parse(
        r#"<scene>
            <rope><location pos="0 0 0"/></rope>
        </scene>"#,
    );
    assert!(scene.ropes.is_empty());

    let scene = parse(
        r#"<scene>
            <rope>
                <location pos="0 0 0"/>
                <location pos="0 -3 0"/>
            </rope>
        </scene>"#,
    );
    assert_eq!(scene.ropes.len(), 1);
    let (points, color, _) = &scene.ropes[0];
    assert_eq!(points.len(), 2);
    assert_abs_diff_eq!(*color, Vector3::new(0.0, 0.0, 0.0), epsilon = 1e-6);
}

#[test]
fn missing_document_yields_an_empty_scene() {
    let mut backend = StubBackend::default();
    let scene = Scene::load("does/not/exist.xml", &mut backend).unwrap();

    assert!(scene.shapes.is_empty());
    assert!(scene.models.is_empty());
    assert!(scene.water.is_none());
}

#[test]
fn corrupt_document_yields_an_empty_scene() {
    let mut backend = StubBackend::default();
    let scene = Scene::from_str("<scene><vox", "", &mut backend).unwrap();

    assert!(scene.shapes.is_empty());
}

#[test]
fn parsing_twice_builds_independent_scenes() {
    let text = r#"<scene><vox file="m.vox"/></scene>"#;

    let mut backend = StubBackend::default();
    let first = Scene::from_str(text, "", &mut backend).unwrap();
    let second = Scene::from_str(text, "", &mut backend).unwrap();

    assert_eq!(first.models.len(), 1);
    assert_eq!(second.models.len(), 1);
    // each scene owns its registry, so the file loads once per scene
    assert_eq!(backend.loads.len(), 2);
}
