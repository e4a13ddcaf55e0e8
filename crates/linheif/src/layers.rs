//! Auxiliary-layer compositing and the gain-map collaborator hook.
//!
//! Each auxiliary image is decoded through the same color-resolution and
//! transform path as the primary, resampled to the primary's resolution, and
//! appended to the primary's channel sequence under a name prefix. Layers are
//! processed sequentially; any failure on an individual layer is a warning
//! and that layer is skipped.

use crate::bridge::{self, AuxiliaryLayer};
use crate::color::{self, ColorMapping};
use crate::selector::matches_selector;
use crate::{decode, resample, LoadResult};
use libheif_rs::{ImageHandle, LibHeif};
use linheif_core::parallel::Priority;
use linheif_core::ImageData;
use tracing::{debug, warn};

/// Vendor HDR gain-map collaborator.
///
/// Implementations consume the primary image, the decoded and resampled
/// gain-map layer, the scheduling hint, and the parsed vendor maker note,
/// mutating the primary in place.
pub trait GainMapApplier: Send + Sync {
    /// Applies the gain map to `primary`.
    fn apply(
        &self,
        primary: &mut ImageData,
        gain_map: &ImageData,
        priority: Priority,
        maker_note: &[u8],
    );
}

/// Decodes one handle into a linear-light image with prefixed channel names.
pub(crate) fn decode_image(
    lib: &LibHeif,
    handle: &ImageHandle,
    name_prefix: &str,
    priority: Priority,
) -> LoadResult<ImageData> {
    let raw = bridge::decode_samples(lib, handle)?;
    let mapping = color::resolve(
        bridge::read_icc_profile(handle),
        bridge::read_nclx_profile(handle),
    );

    let mut image = ImageData::new_rgba(raw.channels(), raw.width(), raw.height(), name_prefix);
    match mapping {
        ColorMapping::Icc(transform) => {
            decode::icc_transform_into(&raw, &transform, &mut image, priority);
        }
        ColorMapping::Matrix(matrix) => {
            decode::linearize_into(&raw, &mut image, priority);
            image.to_rec709 = matrix;
        }
        ColorMapping::None => {
            decode::linearize_into(&raw, &mut image, priority);
        }
    }
    Ok(image)
}

/// Returns true when a layer name carries the Apple HDR gain-map signature.
fn is_apple_gain_map(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.contains("apple") && lower.contains("hdrgainmap")
}

/// Merges one auxiliary layer into `primary`.
///
/// `decode` produces the layer already resampled to the primary's resolution;
/// it runs only when the selector matches, and returning `None` (after its
/// own warning) skips the layer. The maker note is read lazily only when a
/// gain-map layer is actually matched; its absence suppresses gain-map
/// application but never the channel append. Gain-map channels are appended
/// before the applier runs, so the applier sees the composed image.
pub(crate) fn merge_layer(
    primary: &mut ImageData,
    label: &str,
    selector: &str,
    priority: Priority,
    applier: Option<&dyn GainMapApplier>,
    decode: impl FnOnce() -> Option<ImageData>,
    maker_note: impl FnOnce() -> Option<Vec<u8>>,
) {
    if !matches_selector(label, selector) {
        debug!("Auxiliary layer '{label}' does not match selector, skipping");
        return;
    }
    let Some(layer) = decode() else { return };

    if is_apple_gain_map(label) {
        if let Err(e) = primary.append_channels(layer.channels.clone()) {
            warn!("Dropping auxiliary layer '{label}': {e}");
            return;
        }
        match (applier, maker_note()) {
            (Some(applier), Some(note)) => {
                debug!("Applying HDR gain map from layer '{label}'");
                applier.apply(primary, &layer, priority, &note);
            }
            (_, None) => warn!("Gain-map layer '{label}' without usable maker note, skipping application"),
            (None, _) => debug!("No gain-map applier configured for layer '{label}'"),
        }
    } else if let Err(e) = primary.append_channels(layer.channels) {
        warn!("Dropping auxiliary layer '{label}': {e}");
    }
}

/// Merges matching auxiliary layers into `primary`.
pub(crate) fn compose_auxiliaries(
    lib: &LibHeif,
    primary_handle: &ImageHandle,
    primary: &mut ImageData,
    selector: &str,
    priority: Priority,
    applier: Option<&dyn GainMapApplier>,
) {
    let target_w = primary.width();
    let target_h = primary.height();

    for AuxiliaryLayer { handle, label } in bridge::list_auxiliaries(primary_handle) {
        merge_layer(
            primary,
            &label,
            selector,
            priority,
            applier,
            || match decode_image(lib, &handle, &format!("{label}."), priority) {
                Ok(layer) => Some(resample::resize_to(layer, target_w, target_h, priority)),
                Err(e) => {
                    warn!("Failed to decode auxiliary layer '{label}': {e}");
                    None
                }
            },
            || bridge::read_maker_note(primary_handle),
        );
    }
}
