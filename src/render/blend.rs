use crate::{
    assets::decode::PreparedImage,
    foundation::core::Rgba8Premul,
};

/// Porter-Duff source-over of premultiplied pixels.
pub fn over(dst: Rgba8Premul, src: Rgba8Premul) -> Rgba8Premul {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        out[i] = add_sat_u8(src[i], mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Paste `src` onto `dst` with its top-left corner at `(x, y)`, clipping to `dst`.
///
/// This is source-over, so translucent edges landing on transparent canvas keep their own
/// alpha rather than being weighted a second time as a paste-through-mask would.
pub fn over_at(dst: &mut [u8], dst_w: u32, dst_h: u32, src: &PreparedImage, x: i64, y: i64) {
    let (dw, dh) = (i64::from(dst_w), i64::from(dst_h));
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + i64::from(src.width)).min(dw);
    let y1 = (y + i64::from(src.height)).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let sw = src.width as usize;
    let row_px = (x1 - x0) as usize;
    for dy in y0..y1 {
        let sy = (dy - y) as usize;
        let sx = (x0 - x) as usize;
        let s_start = (sy * sw + sx) * 4;
        let d_start = (dy as usize * dst_w as usize + x0 as usize) * 4;
        let s_row = &src.rgba8_premul[s_start..s_start + row_px * 4];
        let d_row = &mut dst[d_start..d_start + row_px * 4];
        for (d, s) in d_row.chunks_exact_mut(4).zip(s_row.chunks_exact(4)) {
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/blend.rs"]
mod tests;
