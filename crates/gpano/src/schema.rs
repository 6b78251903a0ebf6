//! GPano schema constants.
//!
//! Names and casing must match the published panorama-metadata schema
//! bit-for-bit; downstream viewers key on them.

/// Namespace URI of the GPano schema.
pub const GPANO_NAMESPACE_URI: &str = "http://ns.google.com/photos/1.0/panorama/";

/// Namespace prefix used when serializing GPano properties.
pub const GPANO_PREFIX: &str = "GPano";

pub const PROJECTION_TYPE: &str = "ProjectionType";
pub const USE_PANORAMA_VIEWER: &str = "UsePanoramaViewer";
pub const FULL_PANO_WIDTH_PIXELS: &str = "FullPanoWidthPixels";
pub const FULL_PANO_HEIGHT_PIXELS: &str = "FullPanoHeightPixels";
pub const CROPPED_AREA_IMAGE_WIDTH_PIXELS: &str = "CroppedAreaImageWidthPixels";
pub const CROPPED_AREA_IMAGE_HEIGHT_PIXELS: &str = "CroppedAreaImageHeightPixels";
pub const CROPPED_AREA_LEFT_PIXELS: &str = "CroppedAreaLeftPixels";
pub const CROPPED_AREA_TOP_PIXELS: &str = "CroppedAreaTopPixels";
pub const INITIAL_VIEW_HEADING_DEGREES: &str = "InitialViewHeadingDegrees";
pub const INITIAL_VIEW_PITCH_DEGREES: &str = "InitialViewPitchDegrees";
pub const INITIAL_VIEW_ROLL_DEGREES: &str = "InitialViewRollDegrees";
pub const INITIAL_HORIZONTAL_FOV_DEGREES: &str = "InitialHorizontalFOVDegrees";
pub const POSE_HEADING_DEGREES: &str = "PoseHeadingDegrees";
pub const POSE_PITCH_DEGREES: &str = "PosePitchDegrees";
pub const POSE_ROLL_DEGREES: &str = "PoseRollDegrees";
