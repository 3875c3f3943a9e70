//! Known EBML/WebM element IDs.
//!
//! Only the elements needed to reach and rewrite the segment duration get a
//! decodable kind. A few more carry names so inspection output is readable;
//! their content is still treated as opaque bytes.

/// How an element's content is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum ElementKind {
    /// Content is a sequence of child elements.
    Container,
    /// Big-endian unsigned integer.
    UnsignedInt,
    /// IEEE-754 float, 4 or 8 bytes.
    Float,
    /// Opaque bytes, copied through untouched.
    Unknown,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Container => "Container",
            Self::UnsignedInt => "UnsignedInt",
            Self::Float => "Float",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registry entry for one element ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub name: &'static str,
    pub kind: ElementKind,
}

impl Section {
    /// Entry for IDs missing from the registry.
    pub const UNKNOWN: Self = Self {
        name: "Unknown",
        kind: ElementKind::Unknown,
    };

    const fn new(name: &'static str, kind: ElementKind) -> Self {
        Self { name, kind }
    }
}

/// Element IDs, marker bit stripped.
pub mod ids {
    pub const EBML: u64 = 0xa45dfa3;
    pub const EBML_VERSION: u64 = 0x286;
    pub const EBML_READ_VERSION: u64 = 0x2f7;
    pub const EBML_MAX_ID_LENGTH: u64 = 0x2f2;
    pub const EBML_MAX_SIZE_LENGTH: u64 = 0x2f3;
    pub const DOC_TYPE: u64 = 0x282;
    pub const DOC_TYPE_VERSION: u64 = 0x287;
    pub const DOC_TYPE_READ_VERSION: u64 = 0x285;
    pub const VOID: u64 = 0x6c;

    pub const SEGMENT: u64 = 0x8538067;
    pub const SEEK_HEAD: u64 = 0x14d9b74;
    pub const SEEK: u64 = 0xdbb;
    pub const SEEK_ID: u64 = 0x13ab;
    pub const SEEK_POSITION: u64 = 0x13ac;

    pub const INFO: u64 = 0x549a966;
    pub const TIMECODE_SCALE: u64 = 0xad7b1;
    pub const DURATION: u64 = 0x489;
    pub const MUXING_APP: u64 = 0xd80;
    pub const WRITING_APP: u64 = 0x1741;

    pub const TRACKS: u64 = 0x654ae6b;
    pub const TRACK_ENTRY: u64 = 0x2e;
    pub const TRACK_NUMBER: u64 = 0x57;
    pub const TRACK_TYPE: u64 = 0x3;
    pub const CODEC_ID: u64 = 0x6;
    pub const CODEC_PRIVATE: u64 = 0x23a2;
    pub const VIDEO: u64 = 0x60;
    pub const AUDIO: u64 = 0x61;
    pub const SAMPLING_FREQUENCY: u64 = 0x35;

    pub const CHAPTERS: u64 = 0x43a770;
    pub const CLUSTER: u64 = 0xf43b675;
    pub const CUES: u64 = 0xc53bb6b;
    pub const ATTACHMENTS: u64 = 0x941a469;
    pub const TAGS: u64 = 0x254c367;
}

use ElementKind::{Container, Float, Unknown, UnsignedInt};

static SECTIONS: &[(u64, Section)] = &[
    (ids::EBML, Section::new("EBML", Container)),
    (ids::EBML_VERSION, Section::new("EBMLVersion", UnsignedInt)),
    (ids::EBML_READ_VERSION, Section::new("EBMLReadVersion", UnsignedInt)),
    (ids::EBML_MAX_ID_LENGTH, Section::new("EBMLMaxIDLength", UnsignedInt)),
    (ids::EBML_MAX_SIZE_LENGTH, Section::new("EBMLMaxSizeLength", UnsignedInt)),
    (ids::DOC_TYPE, Section::new("DocType", Unknown)),
    (ids::DOC_TYPE_VERSION, Section::new("DocTypeVersion", UnsignedInt)),
    (ids::DOC_TYPE_READ_VERSION, Section::new("DocTypeReadVersion", UnsignedInt)),
    (ids::VOID, Section::new("Void", Unknown)),
    (ids::SEGMENT, Section::new("Segment", Container)),
    (ids::SEEK_HEAD, Section::new("SeekHead", Container)),
    (ids::SEEK, Section::new("Seek", Container)),
    (ids::SEEK_ID, Section::new("SeekID", Unknown)),
    (ids::SEEK_POSITION, Section::new("SeekPosition", UnsignedInt)),
    (ids::INFO, Section::new("Info", Container)),
    (ids::TIMECODE_SCALE, Section::new("TimecodeScale", UnsignedInt)),
    (ids::DURATION, Section::new("Duration", Float)),
    (ids::MUXING_APP, Section::new("MuxingApp", Unknown)),
    (ids::WRITING_APP, Section::new("WritingApp", Unknown)),
    (ids::TRACKS, Section::new("Tracks", Container)),
    (ids::TRACK_ENTRY, Section::new("TrackEntry", Container)),
    (ids::TRACK_NUMBER, Section::new("TrackNumber", UnsignedInt)),
    (ids::TRACK_TYPE, Section::new("TrackType", UnsignedInt)),
    (ids::CODEC_ID, Section::new("CodecID", Unknown)),
    (ids::CODEC_PRIVATE, Section::new("CodecPrivate", Unknown)),
    (ids::VIDEO, Section::new("Video", Container)),
    (ids::AUDIO, Section::new("Audio", Container)),
    (ids::SAMPLING_FREQUENCY, Section::new("SamplingFrequency", Float)),
    (ids::CHAPTERS, Section::new("Chapters", Unknown)),
    (ids::CLUSTER, Section::new("Cluster", Unknown)),
    (ids::CUES, Section::new("Cues", Container)),
    (ids::ATTACHMENTS, Section::new("Attachments", Unknown)),
    (ids::TAGS, Section::new("Tags", Container)),
];

/// Look up an element ID. Unregistered IDs resolve to [`Section::UNKNOWN`].
pub fn lookup(id: u64) -> Section {
    SECTIONS
        .iter()
        .find(|(known, _)| *known == id)
        .map(|(_, section)| *section)
        .unwrap_or(Section::UNKNOWN)
}

fn is_top_level(id: u64) -> bool {
    matches!(id, ids::EBML | ids::SEGMENT)
}

fn is_segment_level(id: u64) -> bool {
    matches!(
        id,
        ids::SEEK_HEAD
            | ids::INFO
            | ids::TRACKS
            | ids::CHAPTERS
            | ids::CLUSTER
            | ids::CUES
            | ids::ATTACHMENTS
            | ids::TAGS
    )
}

/// Whether an element `id` closes an unknown-size `parent`.
///
/// An unknown-size element runs until an element that cannot be its
/// descendant: a top-level element for a top-level parent, otherwise a
/// top-level or Segment-level element.
pub fn ends_unknown_size(parent: u64, id: u64) -> bool {
    if is_top_level(parent) {
        is_top_level(id)
    } else {
        is_top_level(id) || is_segment_level(id)
    }
}
