//! Output canvas and the clipping blit

use crate::color::average::Region;
use crate::io::image::Rgb16Image;
use rayon::prelude::*;

const CHANNELS: usize = 3;

/// Mutable `width × height` pixel grid the mosaic is assembled on
///
/// Starts out black. Every write goes through [`Canvas::blit`] or a
/// [`CanvasBand`], both of which clip to the canvas bounds.
#[derive(Clone, Debug)]
pub struct Canvas {
    pixels: Rgb16Image,
}

impl Canvas {
    /// Create a blank canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: Rgb16Image::new(width, height),
        }
    }

    /// Canvas width in pixels
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Canvas height in pixels
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Read-only view of the pixels
    pub const fn image(&self) -> &Rgb16Image {
        &self.pixels
    }

    /// Finish painting and take the pixels
    pub fn into_image(self) -> Rgb16Image {
        self.pixels
    }

    /// Copy `source` into `dest`, reading from `source_origin`
    ///
    /// The written rectangle is clipped to the canvas and to the part of
    /// `source` available from the origin; pixels outside either are left
    /// untouched. Returns the number of pixels written.
    pub fn blit(&mut self, dest: Region, source: &Rgb16Image, source_origin: (u32, u32)) -> u64 {
        let width = self.width();
        let height = self.height();
        let mut band = CanvasBand {
            y: 0,
            width,
            height,
            pixels: &mut *self.pixels,
        };
        band.blit(dest, source, source_origin)
    }

    /// Split the canvas into disjoint full-width bands of `band_height` rows
    ///
    /// Band `i` starts at row `i * band_height`; the last band may be shorter.
    pub fn bands_mut(
        &mut self,
        band_height: u32,
    ) -> impl IndexedParallelIterator<Item = CanvasBand<'_>> {
        let width = self.width();
        let band_height = band_height.max(1);
        let row_len = (width as usize * CHANNELS).max(1);
        let pixels: &mut [u16] = &mut self.pixels;

        pixels
            .par_chunks_mut(row_len * band_height as usize)
            .enumerate()
            .map(move |(index, pixels)| CanvasBand {
                y: index as u32 * band_height,
                width,
                height: (pixels.len() / row_len) as u32,
                pixels,
            })
    }
}

/// Exclusive view of a horizontal strip of a [`Canvas`]
///
/// Coordinates passed to [`CanvasBand::blit`] are canvas coordinates.
#[derive(Debug)]
pub struct CanvasBand<'a> {
    y: u32,
    width: u32,
    height: u32,
    pixels: &'a mut [u16],
}

impl CanvasBand<'_> {
    /// First canvas row covered by the band
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Number of rows in the band
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Same as [`Canvas::blit`], additionally clipped to the rows of this band
    pub fn blit(&mut self, dest: Region, source: &Rgb16Image, source_origin: (u32, u32)) -> u64 {
        let (origin_x, origin_y) = source_origin;
        let available_width = source.width().saturating_sub(origin_x);
        let available_height = source.height().saturating_sub(origin_y);

        let x_start = dest.x;
        let x_end = dest
            .x
            .saturating_add(dest.width.min(available_width))
            .min(self.width);
        let y_start = dest.y.max(self.y);
        let y_end = dest
            .y
            .saturating_add(dest.height.min(available_height))
            .min(self.y + self.height);

        if x_start >= x_end || y_start >= y_end {
            return 0;
        }

        let span = (x_end - x_start) as usize * CHANNELS;
        let source_row_len = source.width() as usize * CHANNELS;
        let dest_row_len = self.width as usize * CHANNELS;
        let source_x = (origin_x + (x_start - dest.x)) as usize * CHANNELS;
        let raw = source.as_raw();

        let mut written = 0;
        for y in y_start..y_end {
            let source_y = (origin_y + (y - dest.y)) as usize;
            let source_start = source_y * source_row_len + source_x;
            let dest_start = (y - self.y) as usize * dest_row_len + x_start as usize * CHANNELS;

            if let (Some(to), Some(from)) = (
                self.pixels.get_mut(dest_start..dest_start + span),
                raw.get(source_start..source_start + span),
            ) {
                to.copy_from_slice(from);
                written += u64::from(x_end - x_start);
            }
        }
        written
    }
}
