use image::RgbaImage;

pub type StraightRgba8 = [u8; 4];

/// Straight-alpha "source over" for a single pixel.
///
/// A fully transparent `dst` yields `src` unchanged, so pasting onto a cleared canvas
/// keeps the source's own transparency.
pub fn over(dst: StraightRgba8, src: StraightRgba8) -> StraightRgba8 {
    let sa = u32::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let da = u32::from(dst[3]);
    let inv = 255 - sa;
    // Output alpha scaled by 255.
    let oa = sa * 255 + da * inv;
    if oa == 0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for i in 0..3 {
        let num = u32::from(src[i]) * sa * 255 + u32::from(dst[i]) * da * inv;
        out[i] = ((num + oa / 2) / oa).min(255) as u8;
    }
    out[3] = ((oa + 127) / 255).min(255) as u8;
    out
}

/// Composites `src` onto `dst` with its top-left corner at `(offset_x, offset_y)`.
///
/// Offsets may be negative or push `src` past the far edge; only the overlapping
/// region is touched.
pub fn paste_over(dst: &mut RgbaImage, src: &RgbaImage, offset_x: i64, offset_y: i64) {
    let Some(region) = overlap(dst.dimensions(), src.dimensions(), offset_x, offset_y) else {
        return;
    };

    for row in 0..region.height {
        let sy = region.src_y + row;
        let dy = region.dst_y + row;
        for col in 0..region.width {
            let sx = region.src_x + col;
            let dx = region.dst_x + col;
            let s = src.get_pixel(sx, sy).0;
            let d = dst.get_pixel_mut(dx, dy);
            d.0 = over(d.0, s);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Overlap {
    src_x: u32,
    src_y: u32,
    dst_x: u32,
    dst_y: u32,
    width: u32,
    height: u32,
}

fn overlap(dst: (u32, u32), src: (u32, u32), offset_x: i64, offset_y: i64) -> Option<Overlap> {
    let (src_x, dst_x, width) = overlap_axis(dst.0, src.0, offset_x)?;
    let (src_y, dst_y, height) = overlap_axis(dst.1, src.1, offset_y)?;
    Some(Overlap {
        src_x,
        src_y,
        dst_x,
        dst_y,
        width,
        height,
    })
}

fn overlap_axis(dst_len: u32, src_len: u32, offset: i64) -> Option<(u32, u32, u32)> {
    let start = offset.max(0);
    let end = (offset + i64::from(src_len)).min(i64::from(dst_len));
    if end <= start {
        return None;
    }
    let src_start = start - offset;
    Some((src_start as u32, start as u32, (end - start) as u32))
}

pub fn premultiply_in_place(img: &mut RgbaImage) {
    for px in img.pixels_mut() {
        let a = u16::from(px[3]);
        if a == 255 {
            continue;
        }
        for c in 0..3 {
            px[c] = ((u16::from(px[c]) * a + 127) / 255) as u8;
        }
    }
}

pub fn unpremultiply_in_place(img: &mut RgbaImage) {
    for px in img.pixels_mut() {
        let a = u16::from(px[3]);
        if a == 255 {
            continue;
        }
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        for c in 0..3 {
            px[c] = ((u16::from(px[c]) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}
