//! Photo sphere metadata writer.
//!
//! Merges a validated [`PanoramaDescriptor`] into an [`XmpDocument`]
//! under the GPano namespace, leaving every other namespace untouched.

use tracing::{debug, warn};
use xmp_common::{XmpError, XmpResult, XmpValue};
use xmp_document::XmpDocument;

use crate::descriptor::PanoramaDescriptor;
use crate::schema;

/// Write the descriptor's fields into the document's GPano node.
///
/// Validates first and mutates nothing on a validation failure. Fields
/// are written in fixed declaration order so repeated writes serialize
/// identically. An adapter failure mid-write aborts immediately;
/// properties already set stay in place (the tree is not transactional).
pub fn write_photo_sphere(
    descriptor: &PanoramaDescriptor,
    document: &mut XmpDocument,
) -> XmpResult<()> {
    descriptor
        .validate()
        .map_err(|err| XmpError::InvalidDescriptor(err.to_string()))?;

    let node =
        document.find_or_create_namespace_node(schema::GPANO_NAMESPACE_URI, schema::GPANO_PREFIX)?;

    document.set_property(
        node,
        schema::PROJECTION_TYPE,
        XmpValue::Str(descriptor.projection_type.as_str().to_string()),
    )?;
    if let Some(use_viewer) = descriptor.use_panorama_viewer {
        document.set_property(node, schema::USE_PANORAMA_VIEWER, XmpValue::Bool(use_viewer))?;
    }
    document.set_property(
        node,
        schema::FULL_PANO_WIDTH_PIXELS,
        XmpValue::Int(descriptor.full_pano_width_pixels.into()),
    )?;
    document.set_property(
        node,
        schema::FULL_PANO_HEIGHT_PIXELS,
        XmpValue::Int(descriptor.full_pano_height_pixels.into()),
    )?;
    document.set_property(
        node,
        schema::CROPPED_AREA_IMAGE_WIDTH_PIXELS,
        XmpValue::Int(descriptor.cropped_area_image_width_pixels.into()),
    )?;
    document.set_property(
        node,
        schema::CROPPED_AREA_IMAGE_HEIGHT_PIXELS,
        XmpValue::Int(descriptor.cropped_area_image_height_pixels.into()),
    )?;
    document.set_property(
        node,
        schema::CROPPED_AREA_LEFT_PIXELS,
        XmpValue::Int(descriptor.cropped_area_left_pixels.into()),
    )?;
    document.set_property(
        node,
        schema::CROPPED_AREA_TOP_PIXELS,
        XmpValue::Int(descriptor.cropped_area_top_pixels.into()),
    )?;

    let optional_reals = [
        (
            schema::INITIAL_VIEW_HEADING_DEGREES,
            descriptor.initial_view_heading_degrees,
        ),
        (
            schema::INITIAL_VIEW_PITCH_DEGREES,
            descriptor.initial_view_pitch_degrees,
        ),
        (
            schema::INITIAL_VIEW_ROLL_DEGREES,
            descriptor.initial_view_roll_degrees,
        ),
        (
            schema::INITIAL_HORIZONTAL_FOV_DEGREES,
            descriptor.initial_horizontal_fov_degrees,
        ),
        (schema::POSE_HEADING_DEGREES, descriptor.pose_heading_degrees),
        (schema::POSE_PITCH_DEGREES, descriptor.pose_pitch_degrees),
        (schema::POSE_ROLL_DEGREES, descriptor.pose_roll_degrees),
    ];
    for (name, value) in optional_reals {
        if let Some(value) = value {
            document.set_property(node, name, XmpValue::Real(value))?;
        }
    }

    debug!(
        properties = document.node(node)?.property_count(),
        "wrote photo sphere metadata"
    );
    Ok(())
}

/// Boolean call surface: `true` on full success, `false` on any
/// validation or structural failure. The cause is logged, not returned;
/// callers needing the distinction should validate the descriptor first.
pub fn write_photo_sphere_metadata(
    descriptor: &PanoramaDescriptor,
    document: &mut XmpDocument,
) -> bool {
    match write_photo_sphere(descriptor, document) {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, "photo sphere metadata write failed");
            false
        }
    }
}
