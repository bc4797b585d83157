//! Mean RGB colour of rectangular pixel regions
//!
//! Samples are read at the native depth of the image view, so a 16-bit buffer
//! averages on the `0..=65535` scale and nothing is quantised to 8 bits first.

use crate::io::error::{MosaicError, Result};
use image::{GenericImageView, Pixel};
use num_traits::ToPrimitive;
use rayon::prelude::*;
use std::ops::Range;

/// Mean red, green and blue channel values of a region
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AverageColor {
    /// Mean red channel value
    pub r: f64,
    /// Mean green channel value
    pub g: f64,
    /// Mean blue channel value
    pub b: f64,
}

impl AverageColor {
    /// Create a colour from explicit channel means
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Channels as an `[r, g, b]` array
    pub const fn channels(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }
}

/// Half-open pixel rectangle `[x, x + width) × [y, y + height)`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Region {
    /// Create a region from its top-left corner and size
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Region covering a whole `width × height` image
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Intersect with `[0, bounds_width) × [0, bounds_height)`
    ///
    /// Returns `None` when nothing of the region lies inside the bounds.
    pub fn clip(self, bounds_width: u32, bounds_height: u32) -> Option<Self> {
        let x_end = self.x.saturating_add(self.width).min(bounds_width);
        let y_end = self.y.saturating_add(self.height).min(bounds_height);
        (self.x < x_end && self.y < y_end)
            .then(|| Self::new(self.x, self.y, x_end - self.x, y_end - self.y))
    }

    /// Number of pixels covered
    pub const fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Column range covered, saturating at `u32::MAX`
    pub const fn columns(&self) -> Range<u32> {
        self.x..self.x.saturating_add(self.width)
    }

    /// Row range covered, saturating at `u32::MAX`
    pub const fn rows(&self) -> Range<u32> {
        self.y..self.y.saturating_add(self.height)
    }
}

// Partial channel sums; merged associatively by the parallel reduction
#[derive(Clone, Copy, Debug, Default)]
struct ChannelSums {
    r: f64,
    g: f64,
    b: f64,
}

impl ChannelSums {
    fn merge(self, other: Self) -> Self {
        Self {
            r: self.r + other.r,
            g: self.g + other.g,
            b: self.b + other.b,
        }
    }

    fn into_average(self, pixel_count: u64) -> AverageColor {
        let n = pixel_count as f64;
        AverageColor::new(self.r / n, self.g / n, self.b / n)
    }
}

fn sum_rows<I: GenericImageView>(
    image: &I,
    columns: Range<u32>,
    rows: Range<u32>,
) -> ChannelSums {
    let mut sums = ChannelSums::default();
    for y in rows {
        for x in columns.clone() {
            let [r, g, b] = image.get_pixel(x, y).to_rgb().0;
            sums.r += r.to_f64().unwrap_or(0.0);
            sums.g += g.to_f64().unwrap_or(0.0);
            sums.b += b.to_f64().unwrap_or(0.0);
        }
    }
    sums
}

fn clip_region<I: GenericImageView>(image: &I, region: Region) -> Result<Region> {
    let (width, height) = image.dimensions();
    region.clip(width, height).ok_or(MosaicError::EmptyRegion {
        region: (region.x, region.y, region.width, region.height),
        bounds: (width, height),
    })
}

/// Average colour of `region`, clipped to the image bounds, in a single pass
///
/// # Errors
///
/// Returns [`MosaicError::EmptyRegion`] if the clipped region contains no pixels
pub fn average_color<I: GenericImageView>(image: &I, region: Region) -> Result<AverageColor> {
    let clipped = clip_region(image, region)?;
    let sums = sum_rows(image, clipped.columns(), clipped.rows());
    Ok(sums.into_average(clipped.pixel_count()))
}

/// Average colour of the whole image
///
/// # Errors
///
/// Returns [`MosaicError::EmptyRegion`] for a zero-sized image
pub fn average_image_color<I: GenericImageView>(image: &I) -> Result<AverageColor> {
    let (width, height) = image.dimensions();
    average_color(image, Region::full(width, height))
}

/// Average colour of `region` summed in parallel bands of `rows_per_chunk` rows
///
/// Produces the same result as [`average_color`] up to floating-point
/// reassociation of the per-band sums.
///
/// # Errors
///
/// Returns [`MosaicError::EmptyRegion`] if the clipped region contains no pixels
pub fn average_color_parallel<I>(
    image: &I,
    region: Region,
    rows_per_chunk: u32,
) -> Result<AverageColor>
where
    I: GenericImageView + Sync,
{
    let clipped = clip_region(image, region)?;
    let band = rows_per_chunk.clamp(1, clipped.height);
    let band_count = clipped.height.div_ceil(band);
    let rows = clipped.rows();

    let sums = (0..band_count)
        .into_par_iter()
        .map(|index| {
            let start = rows.start + index * band;
            let end = start.saturating_add(band).min(rows.end);
            sum_rows(image, clipped.columns(), start..end)
        })
        .reduce(ChannelSums::default, ChannelSums::merge);

    Ok(sums.into_average(clipped.pixel_count()))
}
