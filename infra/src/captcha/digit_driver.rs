//! Digit captcha rendered as a PNG
//!
//! The answer is a string of random digits. Each glyph is painted from a
//! 5x7 dot-matrix font with a random shear and offset, then covered by
//! interference curves and noise dots. The image is returned as a base64
//! `data:` URI; only pixels carry the digits.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageOutputFormat, Rgb, RgbImage};
use rand::{rngs::OsRng, Rng};

use hub_core::errors::{DomainError, DomainResult};
use hub_core::services::captcha::{CaptchaDriver, Challenge};
use hub_shared::config::CaptchaConfig;

/// Rows of each digit, most significant of the low 5 bits is the left column
const GLYPHS: [[u8; 7]; 10] = [
    [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
    [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
    [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
    [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
    [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
    [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
    [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
    [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
];

const GLYPH_COLUMNS: u32 = 5;
const GLYPH_ROWS: u32 = 7;

/// Horizontal shear per unit of height, reached at `max_skew = 1.0`
const MAX_SHEAR: f64 = 0.5;

const INTERFERENCE_LINES: u32 = 2;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Digit captcha driver
#[derive(Debug, Clone)]
pub struct DigitCaptchaDriver {
    height: u32,
    width: u32,
    length: usize,
    max_skew: f64,
    dot_count: u32,
}

impl DigitCaptchaDriver {
    pub fn new(height: u32, width: u32, length: usize, max_skew: f64, dot_count: u32) -> Self {
        Self {
            height: height.max(GLYPH_ROWS),
            width: width.max(GLYPH_COLUMNS),
            length: length.max(1),
            max_skew: max_skew.clamp(0.0, 1.0),
            dot_count,
        }
    }

    pub fn from_config(config: &CaptchaConfig) -> Self {
        Self::new(
            config.height,
            config.width,
            config.length,
            config.max_skew,
            config.dot_count,
        )
    }

    fn random_digits(&self, rng: &mut impl Rng) -> Vec<u8> {
        (0..self.length).map(|_| rng.gen_range(0..10u8)).collect()
    }

    fn render(&self, digits: &[u8], rng: &mut impl Rng) -> RgbImage {
        let mut img = RgbImage::from_pixel(self.width, self.height, BACKGROUND);
        let (w, h) = (f64::from(self.width), f64::from(self.height));

        let cell = w / digits.len() as f64;
        let glyph_h = h * 0.6;
        let glyph_w = (cell * 0.7).min(glyph_h * 5.0 / 7.0);
        let max_shear = self.max_skew * MAX_SHEAR;

        for (i, &digit) in digits.iter().enumerate() {
            let jitter_x = (cell - glyph_w) / 4.0;
            let jitter_y = (h - glyph_h) / 4.0;
            let origin_x = cell * i as f64 + (cell - glyph_w) / 2.0 + symmetric(rng, jitter_x);
            let origin_y = (h - glyph_h) / 2.0 + symmetric(rng, jitter_y);
            let shear = symmetric(rng, max_shear);
            let color = dark_color(rng);

            paint_glyph(
                &mut img,
                &GLYPHS[usize::from(digit)],
                (origin_x, origin_y),
                (glyph_w, glyph_h),
                shear,
                color,
            );
        }

        for _ in 0..INTERFERENCE_LINES {
            let amplitude = rng.gen_range(h * 0.05..=h * 0.2);
            let frequency = rng.gen_range(1.0..=3.0) * std::f64::consts::TAU / w;
            let phase = rng.gen_range(0.0..std::f64::consts::TAU);
            let baseline = rng.gen_range(h * 0.3..=h * 0.7);
            let color = dark_color(rng);
            for x in 0..self.width {
                let y = baseline + amplitude * (frequency * f64::from(x) + phase).sin();
                put(&mut img, f64::from(x), y, color);
                put(&mut img, f64::from(x), y + 1.0, color);
            }
        }

        let radius = (h / 40.0).max(1.0);
        for _ in 0..self.dot_count {
            let (cx, cy) = (rng.gen_range(0.0..w), rng.gen_range(0.0..h));
            let r = rng.gen_range(radius * 0.5..=radius * 1.5);
            let color = dark_color(rng);
            let reach = r.ceil() as i64;
            for dy in -reach..=reach {
                for dx in -reach..=reach {
                    let (fx, fy) = (dx as f64, dy as f64);
                    if fx * fx + fy * fy <= r * r {
                        put(&mut img, cx + fx, cy + fy, color);
                    }
                }
            }
        }

        img
    }
}

/// Fill every pixel whose inverse-sheared position lands on a lit cell
fn paint_glyph(
    img: &mut RgbImage,
    rows: &[u8; 7],
    (origin_x, origin_y): (f64, f64),
    (glyph_w, glyph_h): (f64, f64),
    shear: f64,
    color: Rgb<u8>,
) {
    let cell_w = glyph_w / f64::from(GLYPH_COLUMNS);
    let cell_h = glyph_h / f64::from(GLYPH_ROWS);
    let spread = shear.abs() * glyph_h / 2.0;

    let x_start = (origin_x - spread).floor().max(0.0) as u32;
    let x_end = ((origin_x + glyph_w + spread).ceil().max(0.0) as u32).min(img.width());
    let y_start = origin_y.floor().max(0.0) as u32;
    let y_end = ((origin_y + glyph_h).ceil().max(0.0) as u32).min(img.height());

    for y in y_start..y_end {
        let local_y = f64::from(y) + 0.5 - origin_y;
        let row = (local_y / cell_h).floor();
        if !(0.0..f64::from(GLYPH_ROWS)).contains(&row) {
            continue;
        }
        let bits = rows[row as usize];
        let offset = shear * (local_y - glyph_h / 2.0);

        for x in x_start..x_end {
            let local_x = f64::from(x) + 0.5 - origin_x - offset;
            let column = (local_x / cell_w).floor();
            if !(0.0..f64::from(GLYPH_COLUMNS)).contains(&column) {
                continue;
            }
            let mask = 1u8 << (GLYPH_COLUMNS - 1 - column as u32);
            if bits & mask != 0 {
                img.put_pixel(x, y, color);
            }
        }
    }
}

fn put(img: &mut RgbImage, x: f64, y: f64, color: Rgb<u8>) {
    if x < 0.0 || y < 0.0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x < img.width() && y < img.height() {
        img.put_pixel(x, y, color);
    }
}

fn symmetric(rng: &mut impl Rng, bound: f64) -> f64 {
    if bound > 0.0 {
        rng.gen_range(-bound..=bound)
    } else {
        0.0
    }
}

fn dark_color(rng: &mut impl Rng) -> Rgb<u8> {
    Rgb([
        rng.gen_range(0..180u8),
        rng.gen_range(0..180u8),
        rng.gen_range(0..180u8),
    ])
}

impl CaptchaDriver for DigitCaptchaDriver {
    fn generate(&self) -> DomainResult<Challenge> {
        let mut rng = OsRng;
        let digits = self.random_digits(&mut rng);
        let img = self.render(&digits, &mut rng);

        let mut png = Cursor::new(Vec::new());
        img.write_to(&mut png, ImageOutputFormat::Png)
            .map_err(|e| DomainError::Captcha {
                message: format!("Failed to encode captcha: {}", e),
            })?;

        Ok(Challenge {
            answer: digits.iter().map(|d| char::from(b'0' + d)).collect(),
            image: format!("data:image/png;base64,{}", STANDARD.encode(png.into_inner())),
        })
    }
}
