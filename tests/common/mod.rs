#![allow(dead_code)]

use meshmask::{
    mem::{MemMesh, Position},
    AttributeStore, DataMask, FaceChannel, VertexChannel,
};
use quickcheck::{Arbitrary, Gen};

pub const VERTEX_CHANNELS: [VertexChannel; 7] = [
    VertexChannel::Color,
    VertexChannel::Quality,
    VertexChannel::TexCoord,
    VertexChannel::Radius,
    VertexChannel::CurvDir,
    VertexChannel::Mark,
    VertexChannel::VertFaceAdjacency,
];

pub const FACE_CHANNELS: [FaceChannel; 7] = [
    FaceChannel::Color,
    FaceChannel::Quality,
    FaceChannel::Mark,
    FaceChannel::CurvDir,
    FaceChannel::WedgeTexCoord,
    FaceChannel::VertFaceAdjacency,
    FaceChannel::FaceFaceAdjacency,
];

/// Two triangles sharing the edge (0, 2).
pub fn quad() -> MemMesh {
    let mut mesh = MemMesh::new();
    for p in [
        Position::new(0.0, 0.0, 0.0),
        Position::new(1.0, 0.0, 0.0),
        Position::new(1.0, 1.0, 0.0),
        Position::new(0.0, 1.0, 0.0),
    ] {
        mesh.push_vertex(p);
    }
    mesh.push_face([0, 1, 2]).unwrap();
    mesh.push_face([0, 2, 3]).unwrap();
    mesh
}

/// Which store buffers are enabled right now, in a comparable form.
pub fn buffer_snapshot(mesh: &MemMesh) -> ([bool; 7], [bool; 7]) {
    (
        VERTEX_CHANNELS.map(|c| mesh.vertex_channel_enabled(c)),
        FACE_CHANNELS.map(|c| mesh.face_channel_enabled(c)),
    )
}

/// An arbitrary mask drawn from the optional (non-baseline) bits.
#[derive(Debug, Clone, Copy)]
pub struct OptionalMask(pub DataMask);

impl Arbitrary for OptionalMask {
    fn arbitrary(g: &mut Gen) -> Self {
        OptionalMask(DataMask::from_bits_truncate(u32::arbitrary(g)) & DataMask::OPTIONAL)
    }
}

/// An arbitrary mask over the whole vocabulary, baseline bits included.
#[derive(Debug, Clone, Copy)]
pub struct AnyMask(pub DataMask);

impl Arbitrary for AnyMask {
    fn arbitrary(g: &mut Gen) -> Self {
        AnyMask(DataMask::from_bits_truncate(u32::arbitrary(g)))
    }
}
