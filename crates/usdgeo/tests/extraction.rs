//! End-to-end extraction through `GeoReader` against in-memory stages.

use proptest::prelude::*;
use usdgeo::glam::{DMat4, DQuat, DVec3, Vec2, Vec3};
use usdgeo::scene::{
    Interpolation, MemoryPrim, MemoryPrimvar, MemoryStage, MeshAttribute, Prim, Value, ValueType,
};
use usdgeo::{ExtractRequest, GeoReader, PathFilter, READ_FLOAT2_AS_UV_VAR, ReaderConfig};

fn flatten(points: &[Vec3]) -> Vec<f32> {
    points.iter().flat_map(|p| p.to_array()).collect()
}

fn triangle(path: &str) -> MemoryPrim {
    MemoryPrim::mesh(path)
        .with_attribute(MeshAttribute::FaceVertexIndices, Value::IntArray(vec![0, 1, 2]))
        .with_attribute(MeshAttribute::FaceVertexCounts, Value::IntArray(vec![3]))
        .with_attribute(
            MeshAttribute::Points,
            Value::Vec3fArray(vec![Vec3::ZERO, Vec3::X, Vec3::Y]),
        )
}

fn read(prim: &dyn Prim, request: &ExtractRequest) -> (usdgeo::MeshData, Vec<String>) {
    let mut log = Vec::new();
    let mesh = GeoReader::default().read_mesh(prim, prim, request, &mut log);
    (mesh, log)
}

#[test]
fn animated_topology_reads_earliest_sample() {
    let prim = MemoryPrim::mesh("/geo/anim")
        .with_attribute(
            MeshAttribute::FaceVertexIndices,
            Value::IntArray(vec![0, 1, 2, 3]),
        )
        .with_sample(MeshAttribute::FaceVertexIndices, 1.0, Value::IntArray(vec![0, 1, 2]))
        .with_sample(MeshAttribute::FaceVertexIndices, 3.0, Value::IntArray(vec![2, 1, 0]))
        .with_attribute(MeshAttribute::FaceVertexCounts, Value::IntArray(vec![4]))
        .with_sample(MeshAttribute::FaceVertexCounts, 1.0, Value::IntArray(vec![3]))
        .with_sample(
            MeshAttribute::Points,
            1.0,
            Value::Vec3fArray(vec![Vec3::ZERO, Vec3::X, Vec3::Y]),
        )
        .with_sample(
            MeshAttribute::Points,
            3.0,
            Value::Vec3fArray(vec![Vec3::ZERO, Vec3::X * 2.0, Vec3::Y * 2.0]),
        )
        .with_attribute(MeshAttribute::Normals, Value::Vec3fArray(vec![Vec3::X; 4]))
        .with_sample(MeshAttribute::Normals, 1.0, Value::Vec3fArray(vec![Vec3::Z; 3]))
        .with_primvar(
            MemoryPrimvar::new("st", ValueType::TexCoord2fArray, Interpolation::FaceVarying)
                .with_value(Value::Vec2fArray(vec![Vec2::ONE; 4]))
                .with_value_sample(1.0, Value::Vec2fArray(vec![Vec2::ZERO, Vec2::X, Vec2::Y])),
        );

    let (mesh, log) = read(&prim, &ExtractRequest::new(vec![3]).with_uv_set("st"));
    assert!(log.is_empty(), "{log:?}");
    assert!(mesh.is_valid());
    assert_eq!(mesh.vertex_indices(), [0, 1, 2]);
    assert_eq!(mesh.face_counts(), [3]);
    assert_eq!(mesh.uvs(), [0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
    assert_eq!(mesh.uv_indices(), [0, 1, 2]);
    assert_eq!(mesh.normals(), flatten(&[Vec3::Z; 3]).as_slice());
    assert_eq!(mesh.normal_indices(), [0, 1, 2]);
    // Points use the literal frame, not the earliest sample.
    assert_eq!(
        mesh.vertices(3).unwrap(),
        flatten(&[Vec3::ZERO, Vec3::X * 2.0, Vec3::Y * 2.0]).as_slice()
    );
}

#[test]
fn static_topology_reads_default_value() {
    let prim = triangle("/geo/tri")
        .with_sample(MeshAttribute::FaceVertexCounts, 1.0, Value::IntArray(vec![1, 1, 1]));
    let (mesh, log) = read(&prim, &ExtractRequest::new(vec![1]));
    assert!(log.is_empty(), "{log:?}");
    assert_eq!(mesh.face_counts(), [3]);
}

#[test]
fn identity_transform_is_bit_exact() {
    let raw = [
        Vec3::new(0.1, 1.0 / 3.0, -7.125_3),
        Vec3::new(1e-30, 123_456.7, f32::MIN_POSITIVE),
        Vec3::new(-0.0, 2.0_f32.sqrt(), std::f32::consts::PI),
    ];
    let stage = MemoryStage::from_prims([
        MemoryPrim::xform("/root").with_transform(DMat4::IDENTITY),
        MemoryPrim::mesh("/root/geo")
            .with_attribute(MeshAttribute::FaceVertexIndices, Value::IntArray(vec![0, 1, 2]))
            .with_attribute(MeshAttribute::FaceVertexCounts, Value::IntArray(vec![3]))
            .with_attribute(MeshAttribute::Points, Value::Vec3fArray(raw.to_vec())),
    ])
    .unwrap();
    let prim = stage.prim("/root/geo").unwrap();

    let (mesh, log) = read(&prim, &ExtractRequest::new(vec![1]));
    assert!(log.is_empty());
    let points = mesh.vertices(1).unwrap();
    let expected = flatten(&raw);
    assert_eq!(points.len(), expected.len());
    for (got, want) in points.iter().zip(&expected) {
        assert_eq!(got.to_bits(), want.to_bits());
    }
}

#[test]
fn keep_centered_removes_reference_placement() {
    let reference = DMat4::from_scale_rotation_translation(
        DVec3::splat(2.0),
        DQuat::from_rotation_y(0.5),
        DVec3::new(3.0, -1.0, 2.0),
    );
    let moved = DMat4::from_translation(DVec3::new(10.0, 0.0, 0.0)) * reference;
    let local = DMat4::from_translation(DVec3::Y) * DMat4::from_rotation_x(0.3);
    let raw = vec![Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0), Vec3::new(-4.0, 0.5, 1.5)];

    let stage = MemoryStage::from_prims([
        MemoryPrim::xform("/model")
            .with_transform_sample(1.0, reference)
            .with_transform_sample(2.0, moved),
        MemoryPrim::mesh("/model/geo")
            .with_attribute(MeshAttribute::FaceVertexIndices, Value::IntArray(vec![0, 1, 2]))
            .with_attribute(MeshAttribute::FaceVertexCounts, Value::IntArray(vec![3]))
            .with_attribute(MeshAttribute::Points, Value::Vec3fArray(raw.clone()))
            .with_transform(local),
    ])
    .unwrap();
    let prim = stage.prim("/model/geo").unwrap();
    let model = stage.prim("/model").unwrap();

    let reader = GeoReader::default();
    let mut log = Vec::new();
    let request = ExtractRequest::new(vec![1, 2]).keep_centered(true);
    let mesh = reader.read_mesh(&prim, &model, &request, &mut log);
    assert!(log.is_empty(), "{log:?}");

    // points * W * inverse(R) leaves only the mesh's own placement.
    for frame in [1, 2] {
        let points = mesh.vertices(frame).unwrap();
        for (p, got) in raw.iter().zip(points.chunks_exact(3)) {
            let want = local.transform_point3(p.as_dvec3()).as_vec3();
            let got = Vec3::from_slice(got);
            assert!(got.abs_diff_eq(want, 1e-4), "frame {frame}: {got} != {want}");
        }
    }

    // Without keep_centered the full world placement is applied.
    let world = reader.read_mesh(&prim, &model, &ExtractRequest::new(vec![1]), &mut log);
    let first = Vec3::from_slice(&world.vertices(1).unwrap()[3..6]);
    let want = (reference * local).transform_point3(raw[1].as_dvec3()).as_vec3();
    assert!(first.abs_diff_eq(want, 1e-4));
}

#[test]
fn uniform_uvs_fail_the_node() {
    for interpolation in [Interpolation::Uniform, Interpolation::Constant] {
        let prim = triangle("/geo/tri").with_primvar(
            MemoryPrimvar::new("st", ValueType::TexCoord2fArray, interpolation)
                .with_value(Value::Vec2fArray(vec![Vec2::ZERO])),
        );
        let (mesh, log) = read(&prim, &ExtractRequest::new(vec![1]).with_uv_set("st"));
        assert!(!mesh.is_valid());
        assert_eq!(log.len(), 1);
        assert!(
            log[0].starts_with(
                "Discarding because vertex or faceVarying interpolation is not defined for the st uv set on /geo/tri"
            ),
            "{}",
            log[0]
        );
        assert!(mesh.uvs().is_empty());
    }
}

#[test]
fn missing_uv_set_fails_the_node() {
    let (mesh, log) = read(&triangle("/geo/tri"), &ExtractRequest::new(vec![1]).with_uv_set("map1"));
    assert!(!mesh.is_valid());
    assert_eq!(log, ["Discarding invalid uv set map1 on /geo/tri"]);
}

#[test]
fn unindexed_uvs_get_identity_indices() {
    let prim = triangle("/geo/tri").with_primvar(
        MemoryPrimvar::new("st", ValueType::Float2Array, Interpolation::FaceVarying)
            .with_value(Value::Vec2fArray(vec![Vec2::ZERO, Vec2::X, Vec2::Y])),
    );
    let (mesh, log) = read(&prim, &ExtractRequest::new(vec![1]).with_uv_set("st"));
    assert!(log.is_empty(), "{log:?}");
    assert_eq!(mesh.uv_indices(), [0, 1, 2]);
    assert_eq!(mesh.uv_indices().len(), mesh.vertex_indices().len());
}

#[test]
fn short_unindexed_uvs_fail_the_node() {
    let prim = triangle("/geo/tri").with_primvar(
        MemoryPrimvar::new("st", ValueType::TexCoord2fArray, Interpolation::Vertex)
            .with_value(Value::Vec2fArray(vec![Vec2::ZERO])),
    );
    let (mesh, log) = read(&prim, &ExtractRequest::new(vec![1]).with_uv_set("st"));
    assert!(!mesh.is_valid());
    assert_eq!(
        log,
        ["Discarding because could not read uvs of st on /geo/tri: 1 unindexed uvs for 3 face-vertices"]
    );
}

#[test]
fn empty_uv_name_skips_uvs() {
    let (mesh, log) = read(&triangle("/geo/tri"), &ExtractRequest::new(vec![1]));
    assert!(log.is_empty());
    assert!(mesh.is_valid());
    assert!(mesh.uvs().is_empty());
}

#[test]
fn path_filter_cases() {
    let reader = |require: &[&str], ignore: &[&str]| {
        GeoReader::new(ReaderConfig {
            path_filter: PathFilter::new(
                require.iter().map(ToString::to_string).collect(),
                ignore.iter().map(ToString::to_string).collect(),
            ),
            ..ReaderConfig::default()
        })
    };
    let node = |path: &str| MemoryPrim::mesh(path);

    assert!(!reader(&["abc"], &[]).is_valid_node(&node("/xyz/foo")));
    assert!(!reader(&[], &["bad"]).is_valid_node(&node("/bad/thing")));
    assert!(!reader(&["geo"], &["proxy"]).is_valid_node(&node("/geo/proxy/mesh")));
    assert!(reader(&[], &[]).is_valid_node(&node("/anything/at/all")));
    assert!(!reader(&[], &[]).is_valid_node(&MemoryPrim::xform("/anything")));
}

#[test]
fn float2_discovery_follows_config() {
    let prim = MemoryPrim::mesh("/geo/tri").with_primvar(MemoryPrimvar::new(
        "st",
        ValueType::Float2Array,
        Interpolation::Vertex,
    ));

    let enabled = GeoReader::new(ReaderConfig::from_lookup(|_| None));
    let sets = enabled.uv_sets([&prim]);
    assert_eq!(sets.len(), 1);
    assert_eq!(sets.get("st"), Some(&1));

    let disabled = GeoReader::new(ReaderConfig::from_lookup(|name| {
        (name == READ_FLOAT2_AS_UV_VAR).then(|| "0".to_string())
    }));
    assert!(disabled.uv_sets([&prim]).is_empty());
}

#[test]
fn failing_frame_aborts_with_one_diagnostic() {
    let good = Value::Vec3fArray(vec![Vec3::ZERO, Vec3::X, Vec3::Y]);
    let prim = MemoryPrim::mesh("/geo/tri")
        .with_attribute(MeshAttribute::FaceVertexIndices, Value::IntArray(vec![0, 1, 2]))
        .with_attribute(MeshAttribute::FaceVertexCounts, Value::IntArray(vec![3]))
        .with_sample(MeshAttribute::Points, 1.0, good.clone())
        .with_sample(MeshAttribute::Points, 5.0, Value::FloatArray(vec![0.0]))
        .with_sample(MeshAttribute::Points, 10.0, good);

    let mut log = vec!["earlier entry".to_string()];
    let mesh = GeoReader::default().read_mesh(
        &prim,
        &prim,
        &ExtractRequest::new(vec![1, 5, 10]),
        &mut log,
    );
    assert!(!mesh.is_valid());
    assert_eq!(
        log,
        ["earlier entry", "Failed getting vertices on /geo/tri at frame 5"]
    );
}

#[test]
fn read_meshes_keeps_valid_eligible_prims() {
    let stage = MemoryStage::from_prims([
        triangle("/set/a/geo"),
        triangle("/set/a/geo_proxy"),
        MemoryPrim::mesh("/set/b/broken"),
        MemoryPrim::xform("/set"),
    ])
    .unwrap();
    let reader = GeoReader::new(ReaderConfig {
        path_filter: PathFilter::new(vec![], vec!["proxy".to_string()]),
        ..ReaderConfig::default()
    });
    let model = stage.prim("/set").unwrap();

    let mut log = Vec::new();
    let meshes = reader.read_meshes(stage.prims(), &model, &ExtractRequest::new(vec![1]), &mut log);
    let paths: Vec<_> = meshes.iter().map(|(path, _)| path.as_str()).collect();
    assert_eq!(paths, ["/set/a/geo"]);
    assert_eq!(log, ["Failed getting face vertex indices on /set/b/broken"]);
}

#[test]
fn subdivision_metadata_reaches_the_host() {
    let prim = triangle("/geo/tri")
        .with_attribute(MeshAttribute::SubdivisionScheme, Value::Token("catmullClark".into()))
        .with_attribute(MeshAttribute::InterpolateBoundary, Value::Token("edgeAndCorner".into()))
        .with_attribute(
            MeshAttribute::FaceVaryingLinearInterpolation,
            Value::Token("cornersPlus1".into()),
        )
        .with_attribute(MeshAttribute::HoleIndices, Value::IntArray(vec![0]));
    let (mesh, log) = read(&prim, &ExtractRequest::new(vec![1]));
    assert!(log.is_empty());
    assert!(mesh.is_subdiv_mesh());
    let subdiv = mesh.subdivision();
    assert_eq!(subdiv.scheme_name(), "catmullClark");
    assert_eq!(subdiv.interpolate_boundary.code(), 1);
    assert_eq!(subdiv.face_varying_linear_interpolation.code(), 1);
    assert!(!subdiv.propagate_corner);
    assert_eq!(subdiv.hole_indices, [0]);
}

#[allow(clippy::cast_precision_loss)]
fn polygon_soup(counts: &[i32]) -> MemoryPrim {
    let total: i32 = counts.iter().sum();
    let points = (0..total).map(|i| Vec3::splat(i as f32)).collect();
    MemoryPrim::mesh("/geo/soup")
        .with_attribute(
            MeshAttribute::FaceVertexIndices,
            Value::IntArray((0..total).collect()),
        )
        .with_attribute(MeshAttribute::FaceVertexCounts, Value::IntArray(counts.to_vec()))
        .with_attribute(MeshAttribute::Points, Value::Vec3fArray(points))
}

proptest! {
    #[test]
    fn index_count_matches_face_counts(counts in prop::collection::vec(3..8i32, 1..24)) {
        let (mesh, log) = read(&polygon_soup(&counts), &ExtractRequest::new(vec![1]));
        prop_assert!(log.is_empty());
        prop_assert!(mesh.is_valid());
        let sum: i32 = mesh.face_counts().iter().sum();
        prop_assert_eq!(mesh.vertex_indices().len(), usize::try_from(sum).unwrap());
        prop_assert_eq!(mesh.face_selection_indices().len(), counts.len());
    }
}
