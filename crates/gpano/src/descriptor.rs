//! Panorama descriptor types and validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema;

/// Panorama projection model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionType {
    Equirectangular,
    Cylindrical,
    Unspecified,
}

impl ProjectionType {
    /// Canonical schema literal for this projection.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectionType::Equirectangular => "equirectangular",
            ProjectionType::Cylindrical => "cylindrical",
            ProjectionType::Unspecified => "unspecified",
        }
    }
}

impl std::fmt::Display for ProjectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single violated descriptor constraint.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstraintViolation {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("{field} must be greater than zero")]
    ZeroDimension { field: &'static str },

    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field} out of range: {value} (expected {expected})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("Cropped area exceeds panorama width: {left} + {width} > {full_width}")]
    CroppedWidthExceedsFull {
        left: u32,
        width: u32,
        full_width: u32,
    },

    #[error("Cropped area exceeds panorama height: {top} + {height} > {full_height}")]
    CroppedHeightExceedsFull {
        top: u32,
        height: u32,
        full_height: u32,
    },
}

/// Aggregate validation failure listing every violated constraint.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", format_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<ConstraintViolation>,
}

fn format_violations(violations: &[ConstraintViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Raw panorama field values, as they arrive from a camera/stitcher dump
/// or a descriptor JSON file. Everything is optional here; validation
/// happens in [`PanoramaParams::into_descriptor`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PanoramaParams {
    #[serde(rename = "ProjectionType")]
    pub projection_type: Option<ProjectionType>,

    #[serde(rename = "UsePanoramaViewer")]
    pub use_panorama_viewer: Option<bool>,

    #[serde(rename = "FullPanoWidthPixels")]
    pub full_pano_width_pixels: Option<u32>,

    #[serde(rename = "FullPanoHeightPixels")]
    pub full_pano_height_pixels: Option<u32>,

    #[serde(rename = "CroppedAreaImageWidthPixels")]
    pub cropped_area_image_width_pixels: Option<u32>,

    #[serde(rename = "CroppedAreaImageHeightPixels")]
    pub cropped_area_image_height_pixels: Option<u32>,

    #[serde(rename = "CroppedAreaLeftPixels")]
    pub cropped_area_left_pixels: Option<u32>,

    #[serde(rename = "CroppedAreaTopPixels")]
    pub cropped_area_top_pixels: Option<u32>,

    #[serde(rename = "InitialViewHeadingDegrees")]
    pub initial_view_heading_degrees: Option<f64>,

    #[serde(rename = "InitialViewPitchDegrees")]
    pub initial_view_pitch_degrees: Option<f64>,

    #[serde(rename = "InitialViewRollDegrees")]
    pub initial_view_roll_degrees: Option<f64>,

    #[serde(rename = "InitialHorizontalFOVDegrees")]
    pub initial_horizontal_fov_degrees: Option<f64>,

    #[serde(rename = "PoseHeadingDegrees")]
    pub pose_heading_degrees: Option<f64>,

    #[serde(rename = "PosePitchDegrees")]
    pub pose_pitch_degrees: Option<f64>,

    #[serde(rename = "PoseRollDegrees")]
    pub pose_roll_degrees: Option<f64>,
}

impl PanoramaParams {
    /// Validate into a typed descriptor.
    ///
    /// All-or-nothing: every violated constraint is collected and the
    /// whole set is reported, no field is clamped or defaulted.
    pub fn into_descriptor(self) -> Result<PanoramaDescriptor, ValidationError> {
        let mut violations = Vec::new();

        macro_rules! require {
            ($field:expr, $name:expr) => {
                match $field {
                    Some(v) => Some(v),
                    None => {
                        violations.push(ConstraintViolation::MissingField($name));
                        None
                    }
                }
            };
        }

        let projection_type = require!(self.projection_type, schema::PROJECTION_TYPE);
        let full_w = require!(self.full_pano_width_pixels, schema::FULL_PANO_WIDTH_PIXELS);
        let full_h = require!(self.full_pano_height_pixels, schema::FULL_PANO_HEIGHT_PIXELS);
        let crop_w = require!(
            self.cropped_area_image_width_pixels,
            schema::CROPPED_AREA_IMAGE_WIDTH_PIXELS
        );
        let crop_h = require!(
            self.cropped_area_image_height_pixels,
            schema::CROPPED_AREA_IMAGE_HEIGHT_PIXELS
        );
        let left = require!(self.cropped_area_left_pixels, schema::CROPPED_AREA_LEFT_PIXELS);
        let top = require!(self.cropped_area_top_pixels, schema::CROPPED_AREA_TOP_PIXELS);

        let candidate = match (projection_type, full_w, full_h, crop_w, crop_h, left, top) {
            (Some(pt), Some(fw), Some(fh), Some(cw), Some(ch), Some(l), Some(t)) => {
                Some(PanoramaDescriptor {
                    projection_type: pt,
                    use_panorama_viewer: self.use_panorama_viewer,
                    full_pano_width_pixels: fw,
                    full_pano_height_pixels: fh,
                    cropped_area_image_width_pixels: cw,
                    cropped_area_image_height_pixels: ch,
                    cropped_area_left_pixels: l,
                    cropped_area_top_pixels: t,
                    initial_view_heading_degrees: self.initial_view_heading_degrees,
                    initial_view_pitch_degrees: self.initial_view_pitch_degrees,
                    initial_view_roll_degrees: self.initial_view_roll_degrees,
                    initial_horizontal_fov_degrees: self.initial_horizontal_fov_degrees,
                    pose_heading_degrees: self.pose_heading_degrees,
                    pose_pitch_degrees: self.pose_pitch_degrees,
                    pose_roll_degrees: self.pose_roll_degrees,
                })
            }
            _ => None,
        };

        match candidate {
            Some(descriptor) => match descriptor.validate() {
                Ok(()) => Ok(descriptor),
                Err(mut err) => {
                    violations.append(&mut err.violations);
                    Err(ValidationError { violations })
                }
            },
            None => {
                // Required fields are missing; still report range problems
                // on whatever angles were supplied.
                check_angles(&self, &mut violations);
                Err(ValidationError { violations })
            }
        }
    }
}

/// A validated photo-sphere description.
///
/// Immutable value object in intent: construct it through
/// [`PanoramaParams::into_descriptor`] and treat it as read-only. The
/// writer re-runs [`PanoramaDescriptor::validate`] before touching a
/// document, so a descriptor mutated into an invalid state is rejected
/// rather than written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanoramaDescriptor {
    #[serde(rename = "ProjectionType")]
    pub projection_type: ProjectionType,

    #[serde(rename = "UsePanoramaViewer")]
    pub use_panorama_viewer: Option<bool>,

    #[serde(rename = "FullPanoWidthPixels")]
    pub full_pano_width_pixels: u32,

    #[serde(rename = "FullPanoHeightPixels")]
    pub full_pano_height_pixels: u32,

    #[serde(rename = "CroppedAreaImageWidthPixels")]
    pub cropped_area_image_width_pixels: u32,

    #[serde(rename = "CroppedAreaImageHeightPixels")]
    pub cropped_area_image_height_pixels: u32,

    #[serde(rename = "CroppedAreaLeftPixels")]
    pub cropped_area_left_pixels: u32,

    #[serde(rename = "CroppedAreaTopPixels")]
    pub cropped_area_top_pixels: u32,

    #[serde(rename = "InitialViewHeadingDegrees")]
    pub initial_view_heading_degrees: Option<f64>,

    #[serde(rename = "InitialViewPitchDegrees")]
    pub initial_view_pitch_degrees: Option<f64>,

    #[serde(rename = "InitialViewRollDegrees")]
    pub initial_view_roll_degrees: Option<f64>,

    #[serde(rename = "InitialHorizontalFOVDegrees")]
    pub initial_horizontal_fov_degrees: Option<f64>,

    #[serde(rename = "PoseHeadingDegrees")]
    pub pose_heading_degrees: Option<f64>,

    #[serde(rename = "PosePitchDegrees")]
    pub pose_pitch_degrees: Option<f64>,

    #[serde(rename = "PoseRollDegrees")]
    pub pose_roll_degrees: Option<f64>,
}

impl PanoramaDescriptor {
    /// Check every numeric constraint, reporting all violations.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Vec::new();

        for (field, value) in [
            (schema::FULL_PANO_WIDTH_PIXELS, self.full_pano_width_pixels),
            (schema::FULL_PANO_HEIGHT_PIXELS, self.full_pano_height_pixels),
            (
                schema::CROPPED_AREA_IMAGE_WIDTH_PIXELS,
                self.cropped_area_image_width_pixels,
            ),
            (
                schema::CROPPED_AREA_IMAGE_HEIGHT_PIXELS,
                self.cropped_area_image_height_pixels,
            ),
        ] {
            if value == 0 {
                violations.push(ConstraintViolation::ZeroDimension { field });
            }
        }

        // Overflow-checked: left + width must fit in u32 and within the
        // full panorama. Covers the width <= full_width constraint too.
        let fits_width = self
            .cropped_area_left_pixels
            .checked_add(self.cropped_area_image_width_pixels)
            .map(|end| end <= self.full_pano_width_pixels)
            .unwrap_or(false);
        if !fits_width {
            violations.push(ConstraintViolation::CroppedWidthExceedsFull {
                left: self.cropped_area_left_pixels,
                width: self.cropped_area_image_width_pixels,
                full_width: self.full_pano_width_pixels,
            });
        }

        let fits_height = self
            .cropped_area_top_pixels
            .checked_add(self.cropped_area_image_height_pixels)
            .map(|end| end <= self.full_pano_height_pixels)
            .unwrap_or(false);
        if !fits_height {
            violations.push(ConstraintViolation::CroppedHeightExceedsFull {
                top: self.cropped_area_top_pixels,
                height: self.cropped_area_image_height_pixels,
                full_height: self.full_pano_height_pixels,
            });
        }

        check_angle(
            &mut violations,
            schema::INITIAL_VIEW_HEADING_DEGREES,
            self.initial_view_heading_degrees,
            "[0, 360)",
            |v| (0.0..360.0).contains(&v),
        );
        check_angle(
            &mut violations,
            schema::INITIAL_VIEW_PITCH_DEGREES,
            self.initial_view_pitch_degrees,
            "[-90, 90]",
            |v| (-90.0..=90.0).contains(&v),
        );
        check_angle(
            &mut violations,
            schema::INITIAL_VIEW_ROLL_DEGREES,
            self.initial_view_roll_degrees,
            "[-180, 180]",
            |v| (-180.0..=180.0).contains(&v),
        );
        check_angle(
            &mut violations,
            schema::INITIAL_HORIZONTAL_FOV_DEGREES,
            self.initial_horizontal_fov_degrees,
            "(0, 360]",
            |v| v > 0.0 && v <= 360.0,
        );
        check_angle(
            &mut violations,
            schema::POSE_HEADING_DEGREES,
            self.pose_heading_degrees,
            "[0, 360)",
            |v| (0.0..360.0).contains(&v),
        );
        check_angle(
            &mut violations,
            schema::POSE_PITCH_DEGREES,
            self.pose_pitch_degrees,
            "[-90, 90]",
            |v| (-90.0..=90.0).contains(&v),
        );
        check_angle(
            &mut violations,
            schema::POSE_ROLL_DEGREES,
            self.pose_roll_degrees,
            "[-180, 180]",
            |v| (-180.0..=180.0).contains(&v),
        );

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations })
        }
    }
}

fn check_angle<F>(
    violations: &mut Vec<ConstraintViolation>,
    field: &'static str,
    value: Option<f64>,
    expected: &'static str,
    in_range: F,
) where
    F: Fn(f64) -> bool,
{
    let Some(value) = value else {
        return;
    };
    if !value.is_finite() {
        violations.push(ConstraintViolation::NotFinite { field, value });
    } else if !in_range(value) {
        violations.push(ConstraintViolation::OutOfRange {
            field,
            value,
            expected,
        });
    }
}

/// Range-check whatever angles are present on a raw params struct.
fn check_angles(params: &PanoramaParams, violations: &mut Vec<ConstraintViolation>) {
    check_angle(
        violations,
        schema::INITIAL_VIEW_HEADING_DEGREES,
        params.initial_view_heading_degrees,
        "[0, 360)",
        |v| (0.0..360.0).contains(&v),
    );
    check_angle(
        violations,
        schema::INITIAL_VIEW_PITCH_DEGREES,
        params.initial_view_pitch_degrees,
        "[-90, 90]",
        |v| (-90.0..=90.0).contains(&v),
    );
    check_angle(
        violations,
        schema::INITIAL_VIEW_ROLL_DEGREES,
        params.initial_view_roll_degrees,
        "[-180, 180]",
        |v| (-180.0..=180.0).contains(&v),
    );
    check_angle(
        violations,
        schema::INITIAL_HORIZONTAL_FOV_DEGREES,
        params.initial_horizontal_fov_degrees,
        "(0, 360]",
        |v| v > 0.0 && v <= 360.0,
    );
    check_angle(
        violations,
        schema::POSE_HEADING_DEGREES,
        params.pose_heading_degrees,
        "[0, 360)",
        |v| (0.0..360.0).contains(&v),
    );
    check_angle(
        violations,
        schema::POSE_PITCH_DEGREES,
        params.pose_pitch_degrees,
        "[-90, 90]",
        |v| (-90.0..=90.0).contains(&v),
    );
    check_angle(
        violations,
        schema::POSE_ROLL_DEGREES,
        params.pose_roll_degrees,
        "[-180, 180]",
        |v| (-180.0..=180.0).contains(&v),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_frame_params() -> PanoramaParams {
        PanoramaParams {
            projection_type: Some(ProjectionType::Equirectangular),
            full_pano_width_pixels: Some(4000),
            full_pano_height_pixels: Some(2000),
            cropped_area_image_width_pixels: Some(4000),
            cropped_area_image_height_pixels: Some(2000),
            cropped_area_left_pixels: Some(0),
            cropped_area_top_pixels: Some(0),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_full_frame() {
        let descriptor = full_frame_params().into_descriptor().unwrap();
        assert_eq!(descriptor.projection_type, ProjectionType::Equirectangular);
        assert_eq!(descriptor.full_pano_width_pixels, 4000);
        assert!(descriptor.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_all_reported() {
        let err = PanoramaParams::default().into_descriptor().unwrap_err();
        // Projection type plus six pixel fields.
        assert_eq!(err.violations.len(), 7);
        assert!(err
            .violations
            .contains(&ConstraintViolation::MissingField("ProjectionType")));
        assert!(err
            .violations
            .contains(&ConstraintViolation::MissingField("CroppedAreaTopPixels")));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let mut params = full_frame_params();
        params.full_pano_width_pixels = Some(0);
        params.cropped_area_image_width_pixels = Some(0);
        let err = params.into_descriptor().unwrap_err();
        assert!(err.violations.contains(&ConstraintViolation::ZeroDimension {
            field: "FullPanoWidthPixels"
        }));
        assert!(err.violations.contains(&ConstraintViolation::ZeroDimension {
            field: "CroppedAreaImageWidthPixels"
        }));
    }

    #[test]
    fn test_cropped_area_outside_width() {
        let mut params = full_frame_params();
        params.cropped_area_left_pixels = Some(500);
        let err = params.into_descriptor().unwrap_err();
        assert_eq!(
            err.violations,
            vec![ConstraintViolation::CroppedWidthExceedsFull {
                left: 500,
                width: 4000,
                full_width: 4000,
            }]
        );
    }

    #[test]
    fn test_cropped_area_outside_height() {
        let mut params = full_frame_params();
        params.cropped_area_top_pixels = Some(1);
        let err = params.into_descriptor().unwrap_err();
        assert!(matches!(
            err.violations[0],
            ConstraintViolation::CroppedHeightExceedsFull { .. }
        ));
    }

    #[test]
    fn test_cropped_area_offset_overflow() {
        let mut params = full_frame_params();
        params.cropped_area_left_pixels = Some(u32::MAX);
        assert!(params.into_descriptor().is_err());
    }

    #[test]
    fn test_heading_range_half_open() {
        let mut params = full_frame_params();
        params.initial_view_heading_degrees = Some(359.9);
        assert!(params.clone().into_descriptor().is_ok());

        params.initial_view_heading_degrees = Some(360.0);
        let err = params.clone().into_descriptor().unwrap_err();
        assert!(matches!(
            err.violations[0],
            ConstraintViolation::OutOfRange {
                field: "InitialViewHeadingDegrees",
                ..
            }
        ));

        params.initial_view_heading_degrees = Some(-0.1);
        assert!(params.into_descriptor().is_err());
    }

    #[test]
    fn test_pitch_range_closed() {
        let mut params = full_frame_params();
        params.initial_view_pitch_degrees = Some(90.0);
        assert!(params.clone().into_descriptor().is_ok());

        params.initial_view_pitch_degrees = Some(-90.0);
        assert!(params.clone().into_descriptor().is_ok());

        params.initial_view_pitch_degrees = Some(90.1);
        assert!(params.into_descriptor().is_err());
    }

    #[test]
    fn test_roll_range() {
        let mut params = full_frame_params();
        params.initial_view_roll_degrees = Some(180.0);
        assert!(params.clone().into_descriptor().is_ok());

        params.initial_view_roll_degrees = Some(-180.1);
        assert!(params.into_descriptor().is_err());
    }

    #[test]
    fn test_fov_range_open_below() {
        let mut params = full_frame_params();
        params.initial_horizontal_fov_degrees = Some(360.0);
        assert!(params.clone().into_descriptor().is_ok());

        params.initial_horizontal_fov_degrees = Some(0.0);
        assert!(params.into_descriptor().is_err());
    }

    #[test]
    fn test_pose_angles_share_analog_ranges() {
        let mut params = full_frame_params();
        params.pose_heading_degrees = Some(360.0);
        assert!(params.clone().into_descriptor().is_err());

        params.pose_heading_degrees = Some(12.5);
        params.pose_pitch_degrees = Some(-45.0);
        params.pose_roll_degrees = Some(170.0);
        assert!(params.into_descriptor().is_ok());
    }

    #[test]
    fn test_nan_rejected() {
        let mut params = full_frame_params();
        params.initial_view_heading_degrees = Some(f64::NAN);
        let err = params.into_descriptor().unwrap_err();
        assert!(matches!(
            err.violations[0],
            ConstraintViolation::NotFinite {
                field: "InitialViewHeadingDegrees",
                ..
            }
        ));
    }

    #[test]
    fn test_infinity_rejected() {
        let mut params = full_frame_params();
        params.pose_pitch_degrees = Some(f64::INFINITY);
        assert!(params.into_descriptor().is_err());
    }

    #[test]
    fn test_missing_fields_and_bad_angles_both_reported() {
        let params = PanoramaParams {
            initial_view_heading_degrees: Some(400.0),
            ..Default::default()
        };
        let err = params.into_descriptor().unwrap_err();
        assert_eq!(err.violations.len(), 8);
    }

    #[test]
    fn test_params_deserialize_schema_names() {
        let json = r#"{
            "ProjectionType": "equirectangular",
            "FullPanoWidthPixels": 4000,
            "FullPanoHeightPixels": 2000,
            "CroppedAreaImageWidthPixels": 4000,
            "CroppedAreaImageHeightPixels": 2000,
            "CroppedAreaLeftPixels": 0,
            "CroppedAreaTopPixels": 0,
            "InitialViewHeadingDegrees": 180.0
        }"#;
        let params: PanoramaParams = serde_json::from_str(json).unwrap();
        let descriptor = params.into_descriptor().unwrap();
        assert_eq!(descriptor.initial_view_heading_degrees, Some(180.0));
    }

    #[test]
    fn test_descriptor_equality() {
        let a = full_frame_params().into_descriptor().unwrap();
        let b = full_frame_params().into_descriptor().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_validation_error_display_lists_all() {
        let err = PanoramaParams::default().into_descriptor().unwrap_err();
        let text = err.to_string();
        assert!(text.contains("ProjectionType"));
        assert!(text.contains("; "));
    }
}
