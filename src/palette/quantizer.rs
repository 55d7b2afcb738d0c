//! Median-cut quantization into a bounded set of swatches.
//!
//! Pixels are reduced to 5 bits per channel and histogrammed; the color space
//! is then split at population medians until `max_colors` boxes exist or no
//! box can be split further.

use super::color::Color;
use image::{imageops::FilterType, DynamicImage, GenericImageView};
use std::collections::HashMap;

/// Images larger than this many pixels are downsampled first.
const RESIZE_AREA: u32 = 112 * 112;

/// Pixels with lower alpha are treated as background and skipped.
const MIN_ALPHA: u8 = 128;

const QUANTIZE_BITS: u8 = 5;

/// A palette color and the number of pixels it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub color: Color,
    pub population: u32,
}

impl Swatch {
    /// Near-black or near-white swatches are treated as background.
    pub fn is_background(&self) -> bool {
        let lightness = self.color.lightness();
        lightness <= 0.05 || lightness >= 0.95
    }
}

// Quantized color packed as 0bRRRRRGGGGGBBBBB.
type Quantized = u16;

fn quantize(r: u8, g: u8, b: u8) -> Quantized {
    let shift = 8 - QUANTIZE_BITS;
    ((r >> shift) as u16) << 10 | ((g >> shift) as u16) << 5 | (b >> shift) as u16
}

fn channel(q: Quantized, component: usize) -> u8 {
    match component {
        0 => ((q >> 10) & 0x1F) as u8,
        1 => ((q >> 5) & 0x1F) as u8,
        _ => (q & 0x1F) as u8,
    }
}

// Widen a 5-bit channel back to 8 bits, mapping 31 to 255.
fn widen(value: u32) -> u8 {
    let value = value.min(31) as u8;
    (value << 3) | (value >> 2)
}

/// Build a palette of at most `max_colors` swatches, most populous first.
pub fn build_palette(image: &DynamicImage, max_colors: usize) -> Vec<Swatch> {
    let histogram = histogram(&downsample(image));
    let mut colors: Vec<(Quantized, u32)> = histogram.into_iter().collect();
    // HashMap order is random; sort for deterministic splits.
    colors.sort_unstable_by_key(|(q, _)| *q);

    let mut swatches = if colors.len() <= max_colors {
        colors
            .iter()
            .map(|&(q, population)| Swatch {
                color: Color::rgb(
                    widen(channel(q, 0) as u32),
                    widen(channel(q, 1) as u32),
                    widen(channel(q, 2) as u32),
                ),
                population,
            })
            .collect()
    } else {
        median_cut(&mut colors, max_colors)
    };

    swatches.sort_by(|a, b| b.population.cmp(&a.population));
    swatches
}

fn downsample(image: &DynamicImage) -> DynamicImage {
    let (width, height) = image.dimensions();
    let area = width.saturating_mul(height);
    if area <= RESIZE_AREA {
        return image.clone();
    }

    let scale = (RESIZE_AREA as f64 / area as f64).sqrt();
    let new_width = ((width as f64 * scale).round() as u32).max(1);
    let new_height = ((height as f64 * scale).round() as u32).max(1);
    image.resize_exact(new_width, new_height, FilterType::Nearest)
}

fn histogram(image: &DynamicImage) -> HashMap<Quantized, u32> {
    let mut counts = HashMap::new();
    for pixel in image.to_rgba8().pixels() {
        let [r, g, b, a] = pixel.0;
        if a < MIN_ALPHA {
            continue;
        }
        *counts.entry(quantize(r, g, b)).or_insert(0u32) += 1;
    }
    counts
}

/// A contiguous run of `colors` forming one box of the color space.
#[derive(Debug, Clone, Copy)]
struct ColorBox {
    lower: usize,
    upper: usize,
}

impl ColorBox {
    fn len(&self) -> usize {
        self.upper - self.lower
    }

    fn bounds(&self, colors: &[(Quantized, u32)]) -> [(u8, u8); 3] {
        let mut bounds = [(u8::MAX, u8::MIN); 3];
        for &(q, _) in &colors[self.lower..self.upper] {
            for (component, (min, max)) in bounds.iter_mut().enumerate() {
                let value = channel(q, component);
                *min = (*min).min(value);
                *max = (*max).max(value);
            }
        }
        bounds
    }

    fn volume(&self, colors: &[(Quantized, u32)]) -> u32 {
        self.bounds(colors)
            .iter()
            .map(|(min, max)| (*max - *min) as u32 + 1)
            .product()
    }

    fn longest_component(&self, colors: &[(Quantized, u32)]) -> usize {
        let bounds = self.bounds(colors);
        (0..3)
            .max_by_key(|&c| bounds[c].1 - bounds[c].0)
            .unwrap_or(0)
    }

    /// Split at the population median along the longest component.
    fn split(&self, colors: &mut [(Quantized, u32)]) -> (ColorBox, ColorBox) {
        let component = self.longest_component(colors);
        let slice = &mut colors[self.lower..self.upper];
        slice.sort_by_key(|&(q, _)| (channel(q, component), q));

        let total: u32 = slice.iter().map(|(_, count)| *count).sum();
        let mut running = 0;
        let mut split_at = slice.len() - 1;
        for (i, (_, count)) in slice.iter().enumerate() {
            running += count;
            if running >= total / 2 {
                split_at = i;
                break;
            }
        }
        // Both halves keep at least one color.
        let split_at = split_at.min(slice.len() - 2);

        let mid = self.lower + split_at + 1;
        (
            ColorBox {
                lower: self.lower,
                upper: mid,
            },
            ColorBox {
                lower: mid,
                upper: self.upper,
            },
        )
    }

    fn swatch(&self, colors: &[(Quantized, u32)]) -> Swatch {
        let (mut r, mut g, mut b, mut population) = (0u64, 0u64, 0u64, 0u64);
        for &(q, count) in &colors[self.lower..self.upper] {
            let count = count as u64;
            r += channel(q, 0) as u64 * count;
            g += channel(q, 1) as u64 * count;
            b += channel(q, 2) as u64 * count;
            population += count;
        }
        let population = population.max(1);

        Swatch {
            color: Color::rgb(
                widen((r / population) as u32),
                widen((g / population) as u32),
                widen((b / population) as u32),
            ),
            population: population as u32,
        }
    }
}

fn median_cut(colors: &mut [(Quantized, u32)], max_colors: usize) -> Vec<Swatch> {
    let mut boxes = vec![ColorBox {
        lower: 0,
        upper: colors.len(),
    }];

    while boxes.len() < max_colors {
        let candidate = boxes
            .iter()
            .enumerate()
            .filter(|(_, color_box)| color_box.len() > 1)
            .max_by_key(|(_, color_box)| color_box.volume(colors))
            .map(|(index, _)| index);

        let Some(index) = candidate else {
            break;
        };

        let color_box = boxes.swap_remove(index);
        let (left, right) = color_box.split(colors);
        boxes.push(left);
        boxes.push(right);
    }

    boxes.iter().map(|color_box| color_box.swatch(colors)).collect()
}
