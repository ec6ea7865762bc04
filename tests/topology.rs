mod common;

use std::collections::HashSet;

use common::quad;
use meshmask::{
    AttributeStore, DataMask, FaceChannel, MaskController, StoreError, TopologyBuilder,
    TopologyError, VertexChannel,
};

/// A store fake that records channel state and counts rebuild calls.
#[derive(Debug, Default)]
struct CountingMesh {
    vertex_on: HashSet<VertexChannel>,
    face_on: HashSet<FaceChannel>,
    vf_rebuilds: usize,
    ff_rebuilds: usize,
}

impl AttributeStore for CountingMesh {
    fn enable_vertex_channel(&mut self, chan: VertexChannel) -> Result<(), StoreError> {
        self.vertex_on.insert(chan);
        Ok(())
    }

    fn disable_vertex_channel(&mut self, chan: VertexChannel) {
        self.vertex_on.remove(&chan);
    }

    fn vertex_channel_enabled(&self, chan: VertexChannel) -> bool {
        self.vertex_on.contains(&chan)
    }

    fn enable_face_channel(&mut self, chan: FaceChannel) -> Result<(), StoreError> {
        self.face_on.insert(chan);
        Ok(())
    }

    fn disable_face_channel(&mut self, chan: FaceChannel) {
        self.face_on.remove(&chan);
    }

    fn face_channel_enabled(&self, chan: FaceChannel) -> bool {
        self.face_on.contains(&chan)
    }
}

impl TopologyBuilder for CountingMesh {
    fn rebuild_vertex_face(&mut self) -> Result<(), TopologyError> {
        self.vf_rebuilds += 1;
        Ok(())
    }

    fn rebuild_face_face(&mut self) -> Result<(), TopologyError> {
        self.ff_rebuilds += 1;
        Ok(())
    }
}

/// Scenario C / P4: one enable of the vertex-face bit turns on both sides of
/// the coupled structure and rebuilds exactly once.
#[test]
fn vertex_face_enable_couples_and_rebuilds_once() {
    let mut mesh = CountingMesh::default();
    let mut mask = MaskController::new();

    mask.enable(&mut mesh, DataMask::VERT_FACE_TOPO).unwrap();
    assert!(mesh.vertex_channel_enabled(VertexChannel::VertFaceAdjacency));
    assert!(mesh.face_channel_enabled(FaceChannel::VertFaceAdjacency));
    assert_eq!(mesh.vf_rebuilds, 1);
    assert_eq!(mesh.ff_rebuilds, 0);
}

/// The rebuild is mandatory on every enable, even when the buffers were
/// already on — partially stale topology is not a supported state.
#[test]
fn adjacency_rebuild_always_reruns() {
    let mut mesh = CountingMesh::default();
    let mut mask = MaskController::new();

    mask.enable(&mut mesh, DataMask::VERT_FACE_TOPO).unwrap();
    mask.enable(&mut mesh, DataMask::VERT_FACE_TOPO).unwrap();
    assert_eq!(mesh.vf_rebuilds, 2);
    assert_eq!(mask.current(), DataMask::BASELINE | DataMask::VERT_FACE_TOPO);
}

/// P4: disabling the coupled bit turns off both sides and never rebuilds.
#[test]
fn vertex_face_disable_couples_without_rebuild() {
    let mut mesh = CountingMesh::default();
    let mut mask = MaskController::new();
    mask.enable(&mut mesh, DataMask::VERT_FACE_TOPO).unwrap();

    mask.disable(&mut mesh, DataMask::VERT_FACE_TOPO);
    assert!(!mesh.vertex_channel_enabled(VertexChannel::VertFaceAdjacency));
    assert!(!mesh.face_channel_enabled(FaceChannel::VertFaceAdjacency));
    assert_eq!(mesh.vf_rebuilds, 1);
}

#[test]
fn face_face_enable_rebuilds_once() {
    let mut mesh = CountingMesh::default();
    let mut mask = MaskController::new();
    mask.enable(&mut mesh, DataMask::FACE_FACE_TOPO).unwrap();
    assert!(mesh.face_channel_enabled(FaceChannel::FaceFaceAdjacency));
    assert_eq!(mesh.ff_rebuilds, 1);
    assert_eq!(mesh.vf_rebuilds, 0);
}

/// A store fake whose vertex-color buffer cannot be allocated.
#[derive(Debug, Default)]
struct FailingMesh {
    inner: CountingMesh,
}

impl AttributeStore for FailingMesh {
    fn enable_vertex_channel(&mut self, chan: VertexChannel) -> Result<(), StoreError> {
        if chan == VertexChannel::Color {
            return Err(StoreError::AllocationFailed("vertex color"));
        }
        self.inner.enable_vertex_channel(chan)
    }

    fn disable_vertex_channel(&mut self, chan: VertexChannel) {
        self.inner.disable_vertex_channel(chan);
    }

    fn vertex_channel_enabled(&self, chan: VertexChannel) -> bool {
        self.inner.vertex_channel_enabled(chan)
    }

    fn enable_face_channel(&mut self, chan: FaceChannel) -> Result<(), StoreError> {
        self.inner.enable_face_channel(chan)
    }

    fn disable_face_channel(&mut self, chan: FaceChannel) {
        self.inner.disable_face_channel(chan);
    }

    fn face_channel_enabled(&self, chan: FaceChannel) -> bool {
        self.inner.face_channel_enabled(chan)
    }
}

impl TopologyBuilder for FailingMesh {
    fn rebuild_vertex_face(&mut self) -> Result<(), TopologyError> {
        self.inner.rebuild_vertex_face()
    }

    fn rebuild_face_face(&mut self) -> Result<(), TopologyError> {
        self.inner.rebuild_face_face()
    }
}

/// A mid-loop failure leaves earlier store side effects in place but
/// declares none of the requested bits; resync is the way back to truth.
#[test]
fn partial_enable_failure_leaves_mask_unchanged() {
    let mut mesh = FailingMesh::default();
    let mut mask = MaskController::new();

    // FACE_COLOR is processed before VERT_COLOR, so it is already enabled
    // when the failure hits
    let res = mask.enable(&mut mesh, DataMask::FACE_COLOR | DataMask::VERT_COLOR);
    assert!(res.is_err());
    assert_eq!(mask.current(), DataMask::BASELINE);
    assert!(mesh.face_channel_enabled(FaceChannel::Color));

    let derived = mask.resync(&mesh);
    assert_eq!(derived, DataMask::BASELINE | DataMask::FACE_COLOR);
}

/// MemMesh: shared edge pairs mutually, borders self-link.
#[test]
fn memmesh_face_face_adjacency() {
    let mut mesh = quad();
    let mut mask = MaskController::new();
    mask.enable(&mut mesh, DataMask::FACE_FACE_TOPO).unwrap();

    // f0 = [0,1,2], f1 = [0,2,3]; shared edge (0,2) is f0's edge 2 and
    // f1's edge 0
    assert_eq!(mesh.ff_neighbors(0), Some([0, 0, 1]));
    assert_eq!(mesh.ff_neighbors(1), Some([0, 1, 1]));
}

/// MemMesh: the intrusive chains enumerate every incident face.
#[test]
fn memmesh_vertex_face_adjacency() {
    let mut mesh = quad();
    let mut mask = MaskController::new();
    mask.enable(&mut mesh, DataMask::VERT_FACE_TOPO).unwrap();

    let of = |v: u32, mesh: &meshmask::mem::MemMesh| {
        let mut faces: Vec<u32> = mesh.faces_of_vertex(v).collect();
        faces.sort_unstable();
        faces
    };
    assert_eq!(of(0, &mesh), vec![0, 1]);
    assert_eq!(of(1, &mesh), vec![0]);
    assert_eq!(of(2, &mesh), vec![0, 1]);
    assert_eq!(of(3, &mesh), vec![1]);
}

/// Rebuilding without the adjacency buffers is an error, not a silent no-op.
#[test]
fn memmesh_rebuild_requires_enabled_buffers() {
    let mut mesh = quad();
    assert!(matches!(
        mesh.rebuild_face_face(),
        Err(TopologyError::AdjacencyDisabled)
    ));
    assert!(matches!(
        mesh.rebuild_vertex_face(),
        Err(TopologyError::AdjacencyDisabled)
    ));
}

/// Out-of-range vertex indices are rejected when faces are pushed.
#[test]
fn memmesh_rejects_bad_face_indices() {
    let mut mesh = quad();
    assert!(matches!(
        mesh.push_face([0, 1, 9]),
        Err(TopologyError::VertexOutOfRange { vertex: 9, .. })
    ));
}
