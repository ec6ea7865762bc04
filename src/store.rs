//! The seams through which the mask controller touches actual storage: an
//! attribute store for per-element buffers and a topology builder for the
//! derived adjacency structures.

/// Optional per-vertex buffers addressable on an [AttributeStore].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexChannel {
    Color,
    Quality,
    TexCoord,
    Radius,
    CurvDir,
    Mark,
    /// Vertex side of the vertex-face incidence structure. Coupled with
    /// [FaceChannel::VertFaceAdjacency]; never enabled alone.
    VertFaceAdjacency,
}

/// Optional per-face buffers addressable on an [AttributeStore].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceChannel {
    Color,
    Quality,
    Mark,
    CurvDir,
    WedgeTexCoord,
    /// Face side of the vertex-face incidence structure.
    VertFaceAdjacency,
    FaceFaceAdjacency,
}

/// Errors raised by [AttributeStore] implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store has no per-vertex buffer for {0:?}")]
    UnsupportedVertexChannel(VertexChannel),
    #[error("store has no per-face buffer for {0:?}")]
    UnsupportedFaceChannel(FaceChannel),
    #[error("allocation of {0} buffer failed")]
    AllocationFailed(&'static str),
}

/// Errors raised by [TopologyBuilder] implementations.
#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    #[error("face {face} refers to vertex {vertex}, but the mesh has only {vertex_count} vertices")]
    VertexOutOfRange {
        face: usize,
        vertex: u32,
        vertex_count: usize,
    },
    #[error("adjacency buffers are not enabled; enable them before rebuilding")]
    AdjacencyDisabled,
}

/// Per-element buffer storage of one mesh, vertex side and face side
/// separately addressable.
///
/// Enabling must be idempotent: enabling an already-enabled channel must not
/// reallocate or clear it. Disabling an absent channel is a no-op.
pub trait AttributeStore {
    fn enable_vertex_channel(&mut self, chan: VertexChannel) -> Result<(), StoreError>;
    fn disable_vertex_channel(&mut self, chan: VertexChannel);
    fn vertex_channel_enabled(&self, chan: VertexChannel) -> bool;

    fn enable_face_channel(&mut self, chan: FaceChannel) -> Result<(), StoreError>;
    fn disable_face_channel(&mut self, chan: FaceChannel);
    fn face_channel_enabled(&self, chan: FaceChannel) -> bool;
}

/// Recomputation of derived adjacency structures. Both passes are full,
/// mesh-wide and synchronous; there is no supported partial/incremental
/// state in between.
pub trait TopologyBuilder {
    fn rebuild_vertex_face(&mut self) -> Result<(), TopologyError>;
    fn rebuild_face_face(&mut self) -> Result<(), TopologyError>;
}

// TODO :: convert to trait alias once https://github.com/rust-lang/rfcs/pull/1733 is stabilized
/// Trait alias for the full set of collaborators a [MaskController](crate::MaskController)
/// drives.
pub trait MeshStore: AttributeStore + TopologyBuilder {}
impl<M> MeshStore for M where M: AttributeStore + TopologyBuilder {}
