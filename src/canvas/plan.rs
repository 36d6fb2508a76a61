use crate::foundation::error::{StoreError, StoreResult};

/// Side length of the store icon canvas.
pub const ICON_SIZE: u32 = 512;

/// Upper bound on the scaled intermediate image (RGBA8, so 1 GiB).
pub const MAX_SCALED_PIXELS: u64 = 1 << 28;

/// Fixed output dimensions for a fit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TargetSpec {
    pub width: u32,  // must be > 0
    pub height: u32, // must be > 0
}

impl TargetSpec {
    pub fn new(width: u32, height: u32) -> StoreResult<Self> {
        let spec = Self { width, height };
        spec.validate()?;
        Ok(spec)
    }

    pub fn square(size: u32) -> StoreResult<Self> {
        Self::new(size, size)
    }

    pub fn icon() -> Self {
        Self {
            width: ICON_SIZE,
            height: ICON_SIZE,
        }
    }

    pub fn validate(&self) -> StoreResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(StoreError::invalid_spec(format!(
                "target width/height must be > 0 (got {}x{})",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

impl Default for TargetSpec {
    fn default() -> Self {
        Self::icon()
    }
}

/// Where the scaled source lands on the canvas.
///
/// Exactly one axis of the scaled size matches the target; the other is equal or larger,
/// so at most one offset is negative (that axis is cropped).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FitPlan {
    pub scaled_width: u32,
    pub scaled_height: u32,
    pub offset_x: i64,
    pub offset_y: i64,
}

impl FitPlan {
    pub fn compute(source_width: u32, source_height: u32, target: TargetSpec) -> StoreResult<Self> {
        target.validate()?;
        if source_width == 0 || source_height == 0 {
            return Err(StoreError::image_decode(format!(
                "source image has zero area ({source_width}x{source_height})"
            )));
        }

        let source_aspect = f64::from(source_width) / f64::from(source_height);
        let (scaled_width, scaled_height) = if source_aspect > target.aspect() {
            let w = (f64::from(target.height) * source_aspect).round();
            (to_dim(w)?, target.height)
        } else {
            let h = (f64::from(target.width) / source_aspect).round();
            (target.width, to_dim(h)?)
        };

        let pixels = u64::from(scaled_width) * u64::from(scaled_height);
        if pixels > MAX_SCALED_PIXELS {
            return Err(StoreError::resource_limit(format!(
                "scaled image {scaled_width}x{scaled_height} exceeds {MAX_SCALED_PIXELS} pixels"
            )));
        }

        // Floor division: an odd overflow puts the extra cropped pixel on the left/top.
        let offset_x = (i64::from(target.width) - i64::from(scaled_width)).div_euclid(2);
        let offset_y = (i64::from(target.height) - i64::from(scaled_height)).div_euclid(2);

        Ok(Self {
            scaled_width,
            scaled_height,
            offset_x,
            offset_y,
        })
    }

    pub fn needs_resample(&self, source_width: u32, source_height: u32) -> bool {
        (self.scaled_width, self.scaled_height) != (source_width, source_height)
    }

    pub fn crops(&self) -> bool {
        self.offset_x < 0 || self.offset_y < 0
    }
}

fn to_dim(v: f64) -> StoreResult<u32> {
    if !v.is_finite() || v < 1.0 || v > f64::from(u32::MAX) {
        return Err(StoreError::resource_limit(format!(
            "scaled dimension {v} is out of range"
        )));
    }
    Ok(v as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_rejects_zero_dims() {
        assert!(matches!(
            TargetSpec::new(0, 512),
            Err(StoreError::InvalidSpec(_))
        ));
        assert!(matches!(
            TargetSpec::new(512, 0),
            Err(StoreError::InvalidSpec(_))
        ));
        assert_eq!(TargetSpec::square(64).unwrap().width, 64);
    }

    #[test]
    fn wide_source_matches_target_height_and_crops_x() {
        let plan = FitPlan::compute(1000, 500, TargetSpec::icon()).unwrap();
        assert_eq!(
            plan,
            FitPlan {
                scaled_width: 1024,
                scaled_height: 512,
                offset_x: -256,
                offset_y: 0,
            }
        );
        assert!(plan.crops());
    }

    #[test]
    fn tall_source_matches_target_width_and_crops_y() {
        let plan = FitPlan::compute(300, 600, TargetSpec::icon()).unwrap();
        assert_eq!(
            plan,
            FitPlan {
                scaled_width: 512,
                scaled_height: 1024,
                offset_x: 0,
                offset_y: -256,
            }
        );
    }

    #[test]
    fn equal_aspect_has_no_offsets() {
        let plan = FitPlan::compute(128, 64, TargetSpec::new(256, 128).unwrap()).unwrap();
        assert_eq!((plan.scaled_width, plan.scaled_height), (256, 128));
        assert_eq!((plan.offset_x, plan.offset_y), (0, 0));

        let plan = FitPlan::compute(512, 512, TargetSpec::icon()).unwrap();
        assert!(!plan.needs_resample(512, 512));
        assert!(!plan.crops());
    }

    #[test]
    fn derived_dims_use_round_not_truncate() {
        // 512 * (1000 / 999) = 512.51 -> 513
        let plan = FitPlan::compute(1000, 999, TargetSpec::icon()).unwrap();
        assert_eq!((plan.scaled_width, plan.scaled_height), (513, 512));
        // (512 - 513) / 2 rounds down
        assert_eq!(plan.offset_x, -1);
        assert_eq!(plan.offset_y, 0);
    }

    #[test]
    fn one_axis_always_matches_target() {
        let target = TargetSpec::new(300, 200).unwrap();
        for &(w, h) in &[(1, 1), (7, 3), (3, 7), (1920, 1080), (1080, 1920), (301, 199)] {
            let plan = FitPlan::compute(w, h, target).unwrap();
            assert!(plan.scaled_width >= target.width);
            assert!(plan.scaled_height >= target.height);
            assert!(plan.scaled_width == target.width || plan.scaled_height == target.height);
        }
    }

    #[test]
    fn zero_area_source_is_decode_error() {
        assert!(matches!(
            FitPlan::compute(0, 10, TargetSpec::icon()),
            Err(StoreError::ImageDecode(_))
        ));
        assert!(matches!(
            FitPlan::compute(10, 0, TargetSpec::icon()),
            Err(StoreError::ImageDecode(_))
        ));
    }

    #[test]
    fn extreme_aspect_hits_resource_limit() {
        let res = FitPlan::compute(u32::MAX, 1, TargetSpec::icon());
        assert!(matches!(res, Err(StoreError::ResourceLimit(_))));
    }
}
