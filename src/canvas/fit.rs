use image::{RgbaImage, imageops::FilterType};

use crate::{
    canvas::{
        composite::{paste_over, premultiply_in_place, unpremultiply_in_place},
        plan::{FitPlan, TargetSpec},
        source::SourceImage,
    },
    foundation::error::StoreResult,
};

/// A fully initialized RGBA canvas of exactly the target dimensions.
#[derive(Clone, Debug)]
pub struct CanvasResult {
    pub plan: FitPlan,
    pub image: RgbaImage,
}

impl CanvasResult {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

/// Scales `source` to cover `target` (preserving aspect ratio), centers it on a
/// transparent canvas and crops whatever overflows.
#[tracing::instrument(skip(source), fields(source_w = source.width(), source_h = source.height()))]
pub fn fit(source: &SourceImage, target: TargetSpec) -> StoreResult<CanvasResult> {
    let (sw, sh) = source.dimensions();
    let plan = FitPlan::compute(sw, sh, target)?;
    tracing::debug!(?plan, "computed fit plan");

    let mut canvas = RgbaImage::new(target.width, target.height);
    if plan.needs_resample(sw, sh) {
        let scaled = resample(source.as_rgba(), plan.scaled_width, plan.scaled_height);
        paste_over(&mut canvas, &scaled, plan.offset_x, plan.offset_y);
    } else {
        paste_over(&mut canvas, source.as_rgba(), plan.offset_x, plan.offset_y);
    }

    Ok(CanvasResult {
        plan,
        image: canvas,
    })
}

/// Lanczos3 on premultiplied pixels so fully transparent regions do not bleed color
/// into their neighbors.
fn resample(src: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let mut premul = src.clone();
    premultiply_in_place(&mut premul);
    let mut scaled = image::imageops::resize(&premul, width, height, FilterType::Lanczos3);
    unpremultiply_in_place(&mut scaled);
    scaled
}
