//! Per-mesh bookkeeping: identity, paths, the modified flag, and the
//! texture-name registry that maps a mesh's declared texture names to loaded
//! images.
//!
//! Image decode/encode stays outside this crate; embedders supply it through
//! [TextureIo], with images as an opaque payload type.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use tracing::warn;

use crate::{
    error::Error,
    io::IoMask,
    mask::DataMask,
    store::MeshStore,
    MaskController,
};

/// Errors raised by [TextureIo] implementations.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("texture not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to decode texture {0}: {1}")]
    Decode(PathBuf, String),
    #[error("failed to encode texture {0}: {1}")]
    Encode(PathBuf, String),
}

/// The codec seam: loading and saving of texture images, plus the
/// placeholder used when a declared texture cannot be loaded.
pub trait TextureIo {
    type Image;

    fn load(&mut self, path: &Path) -> Result<Self::Image, TextureError>;
    fn save(
        &mut self,
        path: &Path,
        image: &Self::Image,
        quality: Option<u8>,
    ) -> Result<(), TextureError>;
    /// The stand-in image substituted for textures that fail to load.
    fn placeholder(&self) -> Self::Image;
}

/// One mesh plus the state that surrounds it in a document: label, file
/// path, visibility, the modified flag, the texture registry, and the
/// attribute-mask controller.
#[derive(Debug)]
pub struct MeshModel<M, I> {
    id: u32,
    label: String,
    full_path: Option<PathBuf>,
    pub visible: bool,
    modified: bool,
    mesh: M,
    mask: MaskController,
    /// Texture names as the mesh declares them, in declaration order.
    texture_names: Vec<String>,
    images: HashMap<String, I>,
}

impl<M: MeshStore, I> MeshModel<M, I> {
    pub fn new(id: u32, mesh: M, full_path: Option<PathBuf>, label: Option<String>) -> Self {
        Self {
            id,
            label: label.unwrap_or_default(),
            full_path,
            visible: true,
            modified: false,
            mesh,
            mask: MaskController::new(),
            texture_names: Vec::new(),
            images: HashMap::new(),
        }
    }

    /// Reset bookkeeping to the freshly constructed state: not modified,
    /// visible, baseline mask. The mesh's buffers are untouched.
    pub fn clear(&mut self) {
        self.set_modified(false);
        self.visible = true;
        self.mask.reset();
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn full_path(&self) -> Option<&Path> {
        self.full_path.as_deref()
    }

    /// The mesh's path relative to `base`, or the full path when it does not
    /// live under `base`.
    pub fn relative_path(&self, base: &Path) -> Option<&Path> {
        let full = self.full_path()?;
        Some(full.strip_prefix(base).unwrap_or(full))
    }

    #[inline]
    pub fn modified(&self) -> bool {
        self.modified
    }

    #[inline]
    pub fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    #[inline]
    pub fn mesh(&self) -> &M {
        &self.mesh
    }

    #[inline]
    pub fn mesh_mut(&mut self) -> &mut M {
        &mut self.mesh
    }

    #[inline]
    pub fn mask(&self) -> &MaskController {
        &self.mask
    }

    /// Current declared attribute mask.
    #[inline]
    pub fn data_mask(&self) -> DataMask {
        self.mask.current()
    }

    #[inline]
    pub fn has_data_mask(&self, mask: DataMask) -> bool {
        self.mask.has(mask)
    }

    /// See [MaskController::enable].
    pub fn update_mask(&mut self, needed: DataMask) -> Result<(), Error> {
        self.mask.enable(&mut self.mesh, needed)
    }

    /// See [MaskController::disable].
    pub fn clear_mask(&mut self, unneeded: DataMask) {
        self.mask.disable(&mut self.mesh, unneeded);
    }

    /// See [MaskController::resync].
    pub fn resync_mask(&mut self) -> DataMask {
        self.mask.resync(&self.mesh)
    }

    /// See [MaskController::apply_io_mask].
    pub fn apply_io_mask(&mut self, file_mask: IoMask) -> Result<(), Error> {
        self.mask.apply_io_mask(&mut self.mesh, file_mask)
    }

    /// Texture names declared by the mesh, in declaration order.
    #[inline]
    pub fn texture_names(&self) -> &[String] {
        &self.texture_names
    }

    pub fn texture(&self, name: &str) -> Option<&I> {
        self.images.get(name)
    }

    pub fn textures(&self) -> &HashMap<String, I> {
        &self.images
    }

    /// Declare a texture name with no image yet — the state a mesh is in
    /// right after a format reader has listed its textures. Duplicates are
    /// ignored.
    pub fn declare_texture(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.texture_names.contains(&name) {
            self.texture_names.push(name);
        }
    }

    /// Declare a texture and store its image. Duplicate names are ignored so
    /// the declared-name list never holds the same name twice.
    pub fn add_texture(&mut self, name: impl Into<String>, image: I) {
        let name = name.into();
        if !self.images.contains_key(&name) {
            if !self.texture_names.contains(&name) {
                self.texture_names.push(name.clone());
            }
            self.images.insert(name, image);
        }
    }

    /// Replace the image of an already-declared texture; unknown names are
    /// ignored.
    pub fn set_texture(&mut self, name: &str, image: I) {
        if let Some(slot) = self.images.get_mut(name) {
            *slot = image;
        }
    }

    /// Rename a declared texture, keeping its image and its position in the
    /// declared-name list.
    pub fn rename_texture(&mut self, old_name: &str, new_name: impl Into<String>) {
        let new_name = new_name.into();
        if old_name == new_name {
            return;
        }
        let Some(slot) = self.texture_names.iter_mut().find(|n| *n == old_name) else {
            return;
        };
        let Some(image) = self.images.remove(old_name) else {
            return;
        };
        *slot = new_name.clone();
        self.images.insert(new_name, image);
    }

    pub fn clear_textures(&mut self) {
        self.texture_names.clear();
        self.images.clear();
    }

    /// Load every declared-but-unloaded texture through `loader`.
    ///
    /// Each name is tried as given, then relative to the mesh's own
    /// directory. A texture that still fails gets the loader's placeholder
    /// instead, and its name is reported in the returned list — a missed
    /// texture is substitute-and-continue, never an error.
    pub fn load_textures<L>(&mut self, loader: &mut L) -> Vec<String>
    where
        L: TextureIo<Image = I>,
    {
        let mut fallbacks = Vec::new();
        let mesh_dir = self
            .full_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf);
        for name in &self.texture_names {
            if self.images.contains_key(name) {
                continue;
            }
            let direct = loader.load(Path::new(name));
            let image = match direct {
                Ok(img) => img,
                Err(_) => {
                    let retried = mesh_dir
                        .as_deref()
                        .map(|dir| loader.load(&dir.join(name)));
                    match retried {
                        Some(Ok(img)) => img,
                        _ => {
                            warn!(texture = %name, "failed to load texture; using a placeholder");
                            fallbacks.push(name.clone());
                            loader.placeholder()
                        }
                    }
                }
            };
            self.images.insert(name.clone(), image);
        }
        fallbacks
    }

    /// Save every loaded texture under `base`.
    pub fn save_textures<L>(
        &mut self,
        base: &Path,
        quality: Option<u8>,
        loader: &mut L,
    ) -> Result<(), TextureError>
    where
        L: TextureIo<Image = I>,
    {
        for name in &self.texture_names {
            if let Some(image) = self.images.get(name) {
                loader.save(&base.join(name), image, quality)?;
            }
        }
        Ok(())
    }
}
