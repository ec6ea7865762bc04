use bitflags::bitflags;

use crate::store::{FaceChannel, VertexChannel};

bitflags! {
    /// The internal attribute-mask vocabulary: one flag per optional data
    /// channel a mesh may carry.
    ///
    /// Raw bit values are a stable wire format — callers persist and compare
    /// them as plain integers — so existing values must never be renumbered,
    /// only appended to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DataMask: u32 {
        const VERT_COORD     = 1 << 0;
        const VERT_NORMAL    = 1 << 1;
        const VERT_FLAG      = 1 << 2;
        const VERT_COLOR     = 1 << 3;
        const VERT_QUALITY   = 1 << 4;
        const VERT_MARK      = 1 << 5;
        const VERT_TEXCOORD  = 1 << 6;
        const VERT_RADIUS    = 1 << 7;
        const VERT_CURV_DIR  = 1 << 8;
        const VERT_FACE_TOPO = 1 << 9;

        const FACE_VERT      = 1 << 10;
        const FACE_NORMAL    = 1 << 11;
        const FACE_FLAG      = 1 << 12;
        const FACE_COLOR     = 1 << 13;
        const FACE_QUALITY   = 1 << 14;
        const FACE_MARK      = 1 << 15;
        const FACE_CURV_DIR  = 1 << 16;
        const FACE_FACE_TOPO = 1 << 17;

        const WEDGE_TEXCOORD = 1 << 18;
        const WEDGE_COLOR    = 1 << 19;
        const WEDGE_NORMAL   = 1 << 20;

        /// Faces carry polygon-reconstruction info; a capability flag with
        /// no per-element storage of its own.
        const POLYGONAL      = 1 << 21;
        /// A camera/shot is attached to the mesh; no per-element storage.
        const CAMERA         = 1 << 22;
    }
}

impl DataMask {
    /// The channels every mesh carries from construction onward. These are
    /// set once at controller creation/reset and are never part of
    /// enable/disable traffic.
    pub const BASELINE: DataMask = DataMask::VERT_COORD
        .union(DataMask::VERT_NORMAL)
        .union(DataMask::VERT_FLAG)
        .union(DataMask::FACE_VERT)
        .union(DataMask::FACE_NORMAL)
        .union(DataMask::FACE_FLAG);

    /// Every bit that is legal enable/disable traffic, i.e. everything
    /// outside [Self::BASELINE].
    pub const OPTIONAL: DataMask = DataMask::all().difference(DataMask::BASELINE);
}

/// The physical storage implied by one optional mask bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backing {
    /// A plain per-vertex buffer.
    Vertex(VertexChannel),
    /// A plain per-face buffer.
    Face(FaceChannel),
    /// Vertex-face incidence: adjacency buffers on *both* stores, plus a
    /// mandatory mesh-wide rebuild on every enable.
    VertexFaceAdjacency,
    /// Face-face incidence: adjacency buffer on the face store, plus a
    /// mandatory mesh-wide rebuild on every enable.
    FaceFaceAdjacency,
}

/// The backing table: optional mask bit → storage it implies.
///
/// Enable, disable and resync all walk this table instead of testing each
/// bit by hand, so adding an attribute kind is a one-line change here.
/// Adjacency entries come first: topology must be in place before filters
/// see the mask flip. Bits with no entry (POLYGONAL, CAMERA, WEDGE_COLOR,
/// WEDGE_NORMAL) have no physical buffer and take no store action.
pub const BACKING: &[(DataMask, Backing)] = &[
    (DataMask::FACE_FACE_TOPO, Backing::FaceFaceAdjacency),
    (DataMask::VERT_FACE_TOPO, Backing::VertexFaceAdjacency),
    (
        DataMask::WEDGE_TEXCOORD,
        Backing::Face(FaceChannel::WedgeTexCoord),
    ),
    (DataMask::FACE_COLOR, Backing::Face(FaceChannel::Color)),
    (DataMask::FACE_QUALITY, Backing::Face(FaceChannel::Quality)),
    (DataMask::FACE_CURV_DIR, Backing::Face(FaceChannel::CurvDir)),
    (DataMask::FACE_MARK, Backing::Face(FaceChannel::Mark)),
    (DataMask::VERT_MARK, Backing::Vertex(VertexChannel::Mark)),
    (
        DataMask::VERT_CURV_DIR,
        Backing::Vertex(VertexChannel::CurvDir),
    ),
    (DataMask::VERT_RADIUS, Backing::Vertex(VertexChannel::Radius)),
    (
        DataMask::VERT_TEXCOORD,
        Backing::Vertex(VertexChannel::TexCoord),
    ),
    (DataMask::VERT_COLOR, Backing::Vertex(VertexChannel::Color)),
    (
        DataMask::VERT_QUALITY,
        Backing::Vertex(VertexChannel::Quality),
    ),
];

/// Look up the backing storage of a single optional bit, if it has any.
pub fn backing_of(bit: DataMask) -> Option<Backing> {
    BACKING
        .iter()
        .find(|(b, _)| *b == bit)
        .map(|&(_, backing)| backing)
}
