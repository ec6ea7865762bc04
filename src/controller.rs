use tracing::{debug, trace};

use crate::{
    error::Error,
    io::{self, IoMask},
    mask::{Backing, DataMask, BACKING},
    store::{FaceChannel, MeshStore, VertexChannel},
};

/// Owner of the current attribute mask of one mesh.
///
/// The controller's invariant is "declared == actual": a backed optional bit
/// is set in [current](Self::current) exactly when the corresponding store
/// buffer is enabled. All buffer traffic therefore has to flow through
/// [enable](Self::enable)/[disable](Self::disable); if some other code path
/// touches buffers directly, [resync](Self::resync) re-derives the mask from
/// the store.
///
/// One controller per mesh, used under a single-writer discipline; no
/// internal locking, and the store/builder calls must not re-enter the
/// controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskController {
    current: DataMask,
}

impl Default for MaskController {
    fn default() -> Self {
        Self::new()
    }
}

impl MaskController {
    /// Construct a controller declaring exactly the baseline channels.
    pub fn new() -> Self {
        Self {
            current: DataMask::BASELINE,
        }
    }

    /// Forget everything back to the baseline mask. Buffers are untouched;
    /// pair with [disable](Self::disable) or a store teardown.
    pub fn reset(&mut self) {
        self.current = DataMask::BASELINE;
    }

    /// The mask as currently declared.
    #[inline]
    pub fn current(&self) -> DataMask {
        self.current
    }

    /// Enable every attribute in `needed`, allocating buffers and rebuilding
    /// adjacency topology as the backing table dictates.
    ///
    /// Already-enabled buffer bits are no-ops for the stores, but an
    /// adjacency bit in `needed` always triggers its full rebuild, enabled
    /// before or not — partially stale topology is not a supported state, so
    /// the controller never tries to detect "already correct" and skip.
    ///
    /// The mask is updated once, after every store call has succeeded. On
    /// error, buffers enabled before the failure stay enabled but none of
    /// the requested bits are declared; treat the failure as fatal to the
    /// current operation and [resync](Self::resync) before trusting
    /// [current](Self::current) again.
    pub fn enable<M: MeshStore>(&mut self, mesh: &mut M, needed: DataMask) -> Result<(), Error> {
        for &(bit, backing) in BACKING {
            if !needed.contains(bit) {
                continue;
            }
            match backing {
                Backing::FaceFaceAdjacency => {
                    mesh.enable_face_channel(FaceChannel::FaceFaceAdjacency)?;
                    trace!(?bit, "rebuilding face-face adjacency");
                    mesh.rebuild_face_face()?;
                }
                Backing::VertexFaceAdjacency => {
                    // the two sides are one structure; never enabled apart
                    mesh.enable_vertex_channel(VertexChannel::VertFaceAdjacency)?;
                    mesh.enable_face_channel(FaceChannel::VertFaceAdjacency)?;
                    trace!(?bit, "rebuilding vertex-face adjacency");
                    mesh.rebuild_vertex_face()?;
                }
                Backing::Vertex(chan) => mesh.enable_vertex_channel(chan)?,
                Backing::Face(chan) => mesh.enable_face_channel(chan)?,
            }
        }
        self.current |= needed;
        debug!(mask = ?self.current, "enabled attributes");
        Ok(())
    }

    /// Disable every attribute in `unneeded` that is currently declared.
    ///
    /// Bits not currently set are ignored; disabling an absent attribute is
    /// a no-op, not an error. Never rebuilds topology. Baseline bits are
    /// never cleared, even if `unneeded` names them.
    pub fn disable<M: MeshStore>(&mut self, mesh: &mut M, unneeded: DataMask) {
        for &(bit, backing) in BACKING {
            if !unneeded.contains(bit) || !self.current.contains(bit) {
                continue;
            }
            match backing {
                Backing::FaceFaceAdjacency => {
                    mesh.disable_face_channel(FaceChannel::FaceFaceAdjacency);
                }
                Backing::VertexFaceAdjacency => {
                    mesh.disable_vertex_channel(VertexChannel::VertFaceAdjacency);
                    mesh.disable_face_channel(FaceChannel::VertFaceAdjacency);
                }
                Backing::Vertex(chan) => mesh.disable_vertex_channel(chan),
                Backing::Face(chan) => mesh.disable_face_channel(chan),
            }
        }
        self.current &= !(unneeded & DataMask::OPTIONAL);
        debug!(mask = ?self.current, "disabled attributes");
    }

    /// Re-derive the mask from the ground truth of the store.
    ///
    /// Overwrites the declared mask entirely — the previous value may be
    /// stale, so nothing is merged. Bits with no backing buffer (POLYGONAL,
    /// CAMERA, the static wedge kinds) cannot be probed and come out
    /// cleared.
    pub fn resync<M: MeshStore>(&mut self, mesh: &M) -> DataMask {
        let mut mask = DataMask::BASELINE;
        for &(bit, backing) in BACKING {
            let enabled = match backing {
                Backing::FaceFaceAdjacency => {
                    mesh.face_channel_enabled(FaceChannel::FaceFaceAdjacency)
                }
                Backing::VertexFaceAdjacency => {
                    mesh.vertex_channel_enabled(VertexChannel::VertFaceAdjacency)
                        || mesh.face_channel_enabled(FaceChannel::VertFaceAdjacency)
                }
                Backing::Vertex(chan) => mesh.vertex_channel_enabled(chan),
                Backing::Face(chan) => mesh.face_channel_enabled(chan),
            };
            if enabled {
                mask |= bit;
            }
        }
        self.current = mask;
        debug!(?mask, "resynced mask from store");
        mask
    }

    /// Copy another controller's declared mask wholesale — the fast path
    /// when the source is already known correct.
    pub fn resync_from(&mut self, other: &MaskController) {
        self.current = other.current;
    }

    /// Apply the mask reported by a freshly opened file: every recognized
    /// flag present in `file_mask` is translated and enabled. Flags outside
    /// [io::OPEN_TABLE] — including ones from newer format vocabularies —
    /// are silently skipped.
    pub fn apply_io_mask<M: MeshStore>(
        &mut self,
        mesh: &mut M,
        file_mask: IoMask,
    ) -> Result<(), Error> {
        for &flag in io::OPEN_TABLE {
            if file_mask.contains(flag) {
                self.enable(mesh, io::translate(flag))?;
            }
        }
        Ok(())
    }

    /// True if every bit of `mask` is declared. No side effects; safe to
    /// call at any time.
    #[inline]
    pub fn has(&self, mask: DataMask) -> bool {
        self.current.contains(mask)
    }

    #[inline]
    pub fn has_per_vertex_color(&self) -> bool {
        self.has(DataMask::VERT_COLOR)
    }

    #[inline]
    pub fn has_per_vertex_quality(&self) -> bool {
        self.has(DataMask::VERT_QUALITY)
    }

    #[inline]
    pub fn has_per_vertex_tex_coord(&self) -> bool {
        self.has(DataMask::VERT_TEXCOORD)
    }

    #[inline]
    pub fn has_per_face_color(&self) -> bool {
        self.has(DataMask::FACE_COLOR)
    }

    #[inline]
    pub fn has_per_face_quality(&self) -> bool {
        self.has(DataMask::FACE_QUALITY)
    }

    #[inline]
    pub fn has_per_face_wedge_tex_coords(&self) -> bool {
        self.has(DataMask::WEDGE_TEXCOORD)
    }
}
