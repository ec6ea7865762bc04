//! The file-format mask vocabulary and its translation into internal bits.
//!
//! Format readers and writers speak [IoMask], a bit-set numbered
//! independently of [DataMask]; the two must never be mixed, which is why
//! both are distinct `bitflags` types rather than raw integers.

use bitflags::bitflags;

use crate::DataMask;

bitflags! {
    /// Attribute flags as file-format handlers see them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct IoMask: u32 {
        const VERT_COORD     = 1 << 0;
        const VERT_FLAGS     = 1 << 1;
        const VERT_COLOR     = 1 << 2;
        const VERT_QUALITY   = 1 << 3;
        const VERT_NORMAL    = 1 << 4;
        const VERT_TEXCOORD  = 1 << 5;
        const VERT_RADIUS    = 1 << 6;

        const FACE_INDEX     = 1 << 7;
        const FACE_FLAGS     = 1 << 8;
        const FACE_COLOR     = 1 << 9;
        const FACE_QUALITY   = 1 << 10;
        const FACE_NORMAL    = 1 << 11;

        const WEDGE_COLOR    = 1 << 12;
        const WEDGE_TEXCOORD = 1 << 13;
        const WEDGE_NORMAL   = 1 << 14;

        const BIT_POLYGONAL  = 1 << 15;
        const CAMERA         = 1 << 16;
    }
}

/// Every recognized file-format flag, paired with the internal bit it
/// implies.
///
/// Note the polygonal special case: [IoMask::BIT_POLYGONAL] maps to a
/// capability bit with no backing buffer.
const TRANSLATION: &[(IoMask, DataMask)] = &[
    (IoMask::VERT_COORD, DataMask::VERT_COORD),
    (IoMask::VERT_FLAGS, DataMask::VERT_FLAG),
    (IoMask::VERT_COLOR, DataMask::VERT_COLOR),
    (IoMask::VERT_QUALITY, DataMask::VERT_QUALITY),
    (IoMask::VERT_NORMAL, DataMask::VERT_NORMAL),
    (IoMask::VERT_TEXCOORD, DataMask::VERT_TEXCOORD),
    (IoMask::VERT_RADIUS, DataMask::VERT_RADIUS),
    (IoMask::FACE_INDEX, DataMask::FACE_VERT),
    (IoMask::FACE_FLAGS, DataMask::FACE_FLAG),
    (IoMask::FACE_COLOR, DataMask::FACE_COLOR),
    (IoMask::FACE_QUALITY, DataMask::FACE_QUALITY),
    (IoMask::FACE_NORMAL, DataMask::FACE_NORMAL),
    (IoMask::WEDGE_COLOR, DataMask::WEDGE_COLOR),
    (IoMask::WEDGE_TEXCOORD, DataMask::WEDGE_TEXCOORD),
    (IoMask::WEDGE_NORMAL, DataMask::WEDGE_NORMAL),
    (IoMask::BIT_POLYGONAL, DataMask::POLYGONAL),
    (IoMask::CAMERA, DataMask::CAMERA),
];

/// Translate a single file-format flag into the internal bit it implies.
///
/// The empty mask translates to the empty mask.
///
/// # Panics
///
/// * `single_io_bit` is not empty and not exactly one recognized flag.
///   An unknown flag here is a programming-contract violation by the
///   caller; guessing a default would silently swallow future vocabulary
///   additions, so we fail fast instead.
pub fn translate(single_io_bit: IoMask) -> DataMask {
    if single_io_bit.is_empty() {
        return DataMask::empty();
    }
    match TRANSLATION.iter().find(|&&(io, _)| io == single_io_bit) {
        Some(&(_, internal)) => internal,
        None => panic!(
            "unrecognized file-format flag: {:#010x}",
            single_io_bit.bits()
        ),
    }
}

/// The flags consulted when applying a freshly opened file's mask
/// ([MaskController::apply_io_mask](crate::MaskController::apply_io_mask)).
///
/// Deliberately not exhaustive: flags absent from this table — including
/// ones newer than this vocabulary — are silently skipped at that layer, so
/// readers of future formats keep working. Contrast with [translate], which
/// is strict.
pub const OPEN_TABLE: &[IoMask] = &[
    IoMask::VERT_TEXCOORD,
    IoMask::WEDGE_TEXCOORD,
    IoMask::VERT_COLOR,
    IoMask::FACE_COLOR,
    IoMask::VERT_RADIUS,
    IoMask::CAMERA,
    IoMask::VERT_QUALITY,
    IoMask::FACE_QUALITY,
    IoMask::BIT_POLYGONAL,
];
