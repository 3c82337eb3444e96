//! Pose and crop enums for the Starlight Skins render API.
//!
//! These map one-to-one onto the path segments of the upstream
//! `/render/{pose}/{identifier}/{crop}` endpoint. Not every pose accepts
//! every crop; see [`RenderPose::supported_crops`].

/// How much of the rendered figure the image includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CropMode {
    /// The entire figure.
    Full,
    /// The upper body.
    Bust,
    /// The face only.
    Face,
}

impl CropMode {
    /// The lowercase path segment used in render URLs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Bust => "bust",
            Self::Face => "face",
        }
    }
}

/// One of the fixed 3D poses the upstream API can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderPose {
    Default,
    Marching,
    Mojavatar,
    Sleeping,
    Head,
    Clown,
    HighGround,
    Reading,
    Kicking,
    Archer,
    Dead,
    Facepalm,
    Dungeons,
    Lunging,
    Pointing,
    Cowering,
    Trudging,
    Relaxing,
    Cheering,
    Isometric,
    Ultimate,
    CrissCross,
    Walking,
}

impl RenderPose {
    /// All poses, in upstream declaration order.
    pub const ALL: [Self; 23] = [
        Self::Default,
        Self::Marching,
        Self::Mojavatar,
        Self::Sleeping,
        Self::Head,
        Self::Clown,
        Self::HighGround,
        Self::Reading,
        Self::Kicking,
        Self::Archer,
        Self::Dead,
        Self::Facepalm,
        Self::Dungeons,
        Self::Lunging,
        Self::Pointing,
        Self::Cowering,
        Self::Trudging,
        Self::Relaxing,
        Self::Cheering,
        Self::Isometric,
        Self::Ultimate,
        Self::CrissCross,
        Self::Walking,
    ];

    /// The lowercase path segment used in render URLs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Marching => "marching",
            Self::Mojavatar => "mojavatar",
            Self::Sleeping => "sleeping",
            Self::Head => "head",
            Self::Clown => "clown",
            Self::HighGround => "high_ground",
            Self::Reading => "reading",
            Self::Kicking => "kicking",
            Self::Archer => "archer",
            Self::Dead => "dead",
            Self::Facepalm => "facepalm",
            Self::Dungeons => "dungeons",
            Self::Lunging => "lunging",
            Self::Pointing => "pointing",
            Self::Cowering => "cowering",
            Self::Trudging => "trudging",
            Self::Relaxing => "relaxing",
            Self::Cheering => "cheering",
            Self::Isometric => "isometric",
            Self::Ultimate => "ultimate",
            Self::CrissCross => "criss_cross",
            Self::Walking => "walking",
        }
    }

    /// The crop modes the upstream API accepts for this pose.
    ///
    /// `Mojavatar` and `Sleeping` render only full-body and bust images;
    /// `Head` renders only the full image. Every other pose accepts all
    /// three crops.
    #[must_use]
    pub fn supported_crops(self) -> &'static [CropMode] {
        match self {
            Self::Mojavatar | Self::Sleeping => &[CropMode::Full, CropMode::Bust],
            Self::Head => &[CropMode::Full],
            _ => &[CropMode::Full, CropMode::Bust, CropMode::Face],
        }
    }

    /// Check whether this pose can be rendered with the given crop.
    #[must_use]
    pub fn supports_crop(self, crop: CropMode) -> bool {
        self.supported_crops().contains(&crop)
    }
}
