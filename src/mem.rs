//! A reference in-memory mesh store.
//!
//! [MemMesh] keeps the baseline channels as plain vectors and every optional
//! channel as a [chanbuf::Channel], and implements both collaborator seams
//! ([AttributeStore], [TopologyBuilder]) so the mask lifecycle is usable and
//! testable without an external mesh kernel.

use std::collections::HashMap;

use chanbuf::Channel;
use nalgebra::{Point2, Point3, Vector3};

use crate::store::{
    AttributeStore, FaceChannel, StoreError, TopologyBuilder, TopologyError, VertexChannel,
};

pub type Position = Point3<f32>;
pub type Normal = Vector3<f32>;
/// RGBA, 8 bits per component.
pub type Rgba = [u8; 4];

/// A texture coordinate plus the index of the texture it refers to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexCoord2 {
    pub uv: Point2<f32>,
    pub id: u16,
}

impl Default for TexCoord2 {
    fn default() -> Self {
        Self {
            uv: Point2::origin(),
            id: 0,
        }
    }
}

/// Principal curvature directions and values at one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvDir {
    pub max_dir: Normal,
    pub min_dir: Normal,
    pub k1: f32,
    pub k2: f32,
}

impl Default for CurvDir {
    fn default() -> Self {
        Self {
            max_dir: Normal::zeros(),
            min_dir: Normal::zeros(),
            k1: 0.0,
            k2: 0.0,
        }
    }
}

/// One link in the intrusive vertex-face incidence chains: a face index and
/// the corner of that face at which the chain continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VfLink {
    pub face: u32,
    pub corner: u8,
}

impl VfLink {
    /// Chain terminator.
    pub const NONE: VfLink = VfLink {
        face: u32::MAX,
        corner: u8::MAX,
    };

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

impl Default for VfLink {
    fn default() -> Self {
        Self::NONE
    }
}

/// A triangle mesh with enable/disable-able optional attribute channels.
///
/// # Invariants
///
/// * every enabled channel has exactly one entry per element of its side
/// * `faces[..]` only holds vertex indices < `vertex_count()` (checked at
///   [push_face](Self::push_face))
#[derive(Debug, Default, Clone)]
pub struct MemMesh {
    positions: Vec<Position>,
    vert_normals: Vec<Normal>,
    vert_flags: Vec<u32>,
    faces: Vec<[u32; 3]>,
    face_normals: Vec<Normal>,
    face_flags: Vec<u32>,

    vert_color: Channel<Rgba>,
    vert_quality: Channel<f32>,
    vert_texcoord: Channel<TexCoord2>,
    vert_radius: Channel<f32>,
    vert_curv_dir: Channel<CurvDir>,
    vert_mark: Channel<u32>,
    vert_vf: Channel<VfLink>,

    face_color: Channel<Rgba>,
    face_quality: Channel<f32>,
    face_mark: Channel<u32>,
    face_curv_dir: Channel<CurvDir>,
    face_wedge_texcoord: Channel<[TexCoord2; 3]>,
    face_vf: Channel<[VfLink; 3]>,
    face_ff: Channel<[u32; 3]>,
}

impl MemMesh {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Append a vertex, growing every enabled per-vertex channel with it.
    pub fn push_vertex(&mut self, p: Position) -> u32 {
        let idx = self.positions.len() as u32;
        self.positions.push(p);
        self.vert_normals.push(Normal::zeros());
        self.vert_flags.push(0);
        let n = self.positions.len();
        self.vert_color.resize(n);
        self.vert_quality.resize(n);
        self.vert_texcoord.resize(n);
        self.vert_radius.resize(n);
        self.vert_curv_dir.resize(n);
        self.vert_mark.resize(n);
        self.vert_vf.resize(n);
        idx
    }

    /// Append a face, growing every enabled per-face channel with it.
    ///
    /// # Errors
    ///
    /// * a vertex index is out of range
    pub fn push_face(&mut self, verts: [u32; 3]) -> Result<u32, TopologyError> {
        let vertex_count = self.positions.len();
        for &v in &verts {
            if v as usize >= vertex_count {
                return Err(TopologyError::VertexOutOfRange {
                    face: self.faces.len(),
                    vertex: v,
                    vertex_count,
                });
            }
        }
        let idx = self.faces.len() as u32;
        let [a, b, c] = verts.map(|v| self.positions[v as usize]);
        self.faces.push(verts);
        self.face_normals.push((b - a).cross(&(c - a)));
        self.face_flags.push(0);
        let n = self.faces.len();
        self.face_color.resize(n);
        self.face_quality.resize(n);
        self.face_mark.resize(n);
        self.face_curv_dir.resize(n);
        self.face_wedge_texcoord.resize(n);
        self.face_vf.resize(n);
        self.face_ff.resize(n);
        Ok(idx)
    }

    #[inline]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    #[inline]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Recompute face normals (area-weighted cross products) and accumulate
    /// them into normalized vertex normals.
    pub fn update_normals(&mut self) {
        for v in &mut self.vert_normals {
            *v = Normal::zeros();
        }
        for (f, verts) in self.faces.iter().enumerate() {
            let [a, b, c] = verts.map(|v| self.positions[v as usize]);
            let n = (b - a).cross(&(c - a));
            self.face_normals[f] = n;
            for &v in verts {
                self.vert_normals[v as usize] += n;
            }
        }
        for v in &mut self.vert_normals {
            let len = v.norm();
            if len > 0.0 {
                *v /= len;
            }
        }
    }

    /// Axis-aligned bounds of the vertex positions, `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<(Position, Position)> {
        let first = *self.positions.first()?;
        let mut min = first.coords;
        let mut max = first.coords;
        for p in &self.positions[1..] {
            min = min.inf(&p.coords);
            max = max.sup(&p.coords);
        }
        Some((min.into(), max.into()))
    }

    pub fn vert_color(&self) -> &Channel<Rgba> {
        &self.vert_color
    }

    pub fn vert_color_mut(&mut self) -> &mut Channel<Rgba> {
        &mut self.vert_color
    }

    pub fn vert_quality(&self) -> &Channel<f32> {
        &self.vert_quality
    }

    pub fn vert_quality_mut(&mut self) -> &mut Channel<f32> {
        &mut self.vert_quality
    }

    pub fn face_quality_mut(&mut self) -> &mut Channel<f32> {
        &mut self.face_quality
    }

    /// The faces incident to `vertex`, walked through the intrusive chains.
    /// Empty if vertex-face adjacency is disabled or stale-empty.
    pub fn faces_of_vertex(&self, vertex: u32) -> VfIter<'_> {
        VfIter {
            mesh: self,
            link: self
                .vert_vf
                .get(vertex as usize)
                .copied()
                .unwrap_or(VfLink::NONE),
        }
    }

    /// The face on the other side of each edge of `face`; a border edge
    /// reports the face itself. `None` if face-face adjacency is disabled.
    pub fn ff_neighbors(&self, face: u32) -> Option<[u32; 3]> {
        self.face_ff.get(face as usize).copied()
    }

    fn check_face_indices(&self) -> Result<(), TopologyError> {
        let vertex_count = self.positions.len();
        for (f, verts) in self.faces.iter().enumerate() {
            for &v in verts {
                if v as usize >= vertex_count {
                    return Err(TopologyError::VertexOutOfRange {
                        face: f,
                        vertex: v,
                        vertex_count,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Iterator over the faces incident to one vertex.
pub struct VfIter<'mesh> {
    mesh: &'mesh MemMesh,
    link: VfLink,
}

impl Iterator for VfIter<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.link.is_none() {
            return None;
        }
        let face = self.link.face;
        self.link = self
            .mesh
            .face_vf
            .get(face as usize)
            .map_or(VfLink::NONE, |links| links[self.link.corner as usize]);
        Some(face)
    }
}

impl AttributeStore for MemMesh {
    fn enable_vertex_channel(&mut self, chan: VertexChannel) -> Result<(), StoreError> {
        let n = self.positions.len();
        match chan {
            VertexChannel::Color => self.vert_color.enable(n),
            VertexChannel::Quality => self.vert_quality.enable(n),
            VertexChannel::TexCoord => self.vert_texcoord.enable(n),
            VertexChannel::Radius => self.vert_radius.enable(n),
            VertexChannel::CurvDir => self.vert_curv_dir.enable(n),
            VertexChannel::Mark => self.vert_mark.enable(n),
            VertexChannel::VertFaceAdjacency => self.vert_vf.enable(n),
        }
        Ok(())
    }

    fn disable_vertex_channel(&mut self, chan: VertexChannel) {
        match chan {
            VertexChannel::Color => self.vert_color.disable(),
            VertexChannel::Quality => self.vert_quality.disable(),
            VertexChannel::TexCoord => self.vert_texcoord.disable(),
            VertexChannel::Radius => self.vert_radius.disable(),
            VertexChannel::CurvDir => self.vert_curv_dir.disable(),
            VertexChannel::Mark => self.vert_mark.disable(),
            VertexChannel::VertFaceAdjacency => self.vert_vf.disable(),
        }
    }

    fn vertex_channel_enabled(&self, chan: VertexChannel) -> bool {
        match chan {
            VertexChannel::Color => self.vert_color.is_enabled(),
            VertexChannel::Quality => self.vert_quality.is_enabled(),
            VertexChannel::TexCoord => self.vert_texcoord.is_enabled(),
            VertexChannel::Radius => self.vert_radius.is_enabled(),
            VertexChannel::CurvDir => self.vert_curv_dir.is_enabled(),
            VertexChannel::Mark => self.vert_mark.is_enabled(),
            VertexChannel::VertFaceAdjacency => self.vert_vf.is_enabled(),
        }
    }

    fn enable_face_channel(&mut self, chan: FaceChannel) -> Result<(), StoreError> {
        let n = self.faces.len();
        match chan {
            FaceChannel::Color => self.face_color.enable(n),
            FaceChannel::Quality => self.face_quality.enable(n),
            FaceChannel::Mark => self.face_mark.enable(n),
            FaceChannel::CurvDir => self.face_curv_dir.enable(n),
            FaceChannel::WedgeTexCoord => self.face_wedge_texcoord.enable(n),
            FaceChannel::VertFaceAdjacency => self.face_vf.enable(n),
            FaceChannel::FaceFaceAdjacency => self.face_ff.enable(n),
        }
        Ok(())
    }

    fn disable_face_channel(&mut self, chan: FaceChannel) {
        match chan {
            FaceChannel::Color => self.face_color.disable(),
            FaceChannel::Quality => self.face_quality.disable(),
            FaceChannel::Mark => self.face_mark.disable(),
            FaceChannel::CurvDir => self.face_curv_dir.disable(),
            FaceChannel::WedgeTexCoord => self.face_wedge_texcoord.disable(),
            FaceChannel::VertFaceAdjacency => self.face_vf.disable(),
            FaceChannel::FaceFaceAdjacency => self.face_ff.disable(),
        }
    }

    fn face_channel_enabled(&self, chan: FaceChannel) -> bool {
        match chan {
            FaceChannel::Color => self.face_color.is_enabled(),
            FaceChannel::Quality => self.face_quality.is_enabled(),
            FaceChannel::Mark => self.face_mark.is_enabled(),
            FaceChannel::CurvDir => self.face_curv_dir.is_enabled(),
            FaceChannel::WedgeTexCoord => self.face_wedge_texcoord.is_enabled(),
            FaceChannel::VertFaceAdjacency => self.face_vf.is_enabled(),
            FaceChannel::FaceFaceAdjacency => self.face_ff.is_enabled(),
        }
    }
}

impl TopologyBuilder for MemMesh {
    /// Rebuild the vertex-face incidence chains from scratch: for every face
    /// corner, the corner is pushed onto the chain of its vertex, so each
    /// vertex ends up heading a list of all its incident faces.
    fn rebuild_vertex_face(&mut self) -> Result<(), TopologyError> {
        if !self.vert_vf.is_enabled() || !self.face_vf.is_enabled() {
            return Err(TopologyError::AdjacencyDisabled);
        }
        self.check_face_indices()?;
        self.vert_vf.fill_default();
        self.face_vf.fill_default();
        for (f, verts) in self.faces.iter().enumerate() {
            for (corner, &v) in verts.iter().enumerate() {
                self.face_vf[f][corner] = self.vert_vf[v as usize];
                self.vert_vf[v as usize] = VfLink {
                    face: f as u32,
                    corner: corner as u8,
                };
            }
        }
        Ok(())
    }

    /// Rebuild face-face adjacency from scratch. Manifold edges pair their
    /// two faces mutually, a border edge points back at its own face, and a
    /// non-manifold fan is linked in a ring.
    fn rebuild_face_face(&mut self) -> Result<(), TopologyError> {
        if !self.face_ff.is_enabled() {
            return Err(TopologyError::AdjacencyDisabled);
        }
        self.check_face_indices()?;
        // border convention: an edge with no neighbor links to itself
        for f in 0..self.faces.len() {
            self.face_ff[f] = [f as u32; 3];
        }
        let mut edges: HashMap<(u32, u32), Vec<(u32, u8)>> = HashMap::new();
        for (f, verts) in self.faces.iter().enumerate() {
            for e in 0..3 {
                let a = verts[e];
                let b = verts[(e + 1) % 3];
                let key = (a.min(b), a.max(b));
                edges.entry(key).or_default().push((f as u32, e as u8));
            }
        }
        for group in edges.into_values() {
            if group.len() < 2 {
                continue;
            }
            for (i, &(f, e)) in group.iter().enumerate() {
                let (next, _) = group[(i + 1) % group.len()];
                self.face_ff[f as usize][e as usize] = next;
            }
        }
        Ok(())
    }
}
