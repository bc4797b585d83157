//! Tests for canvas blitting, clipping and band partitioning

#[cfg(test)]
mod tests {
    use crate::solid_rgb16;
    use image::Rgb;
    use photomosaic::color::average::Region;
    use photomosaic::io::image::Rgb16Image;
    use photomosaic::mosaic::canvas::Canvas;
    use rayon::prelude::*;

    const WHITE: [u16; 3] = [65535, 65535, 65535];
    const BLACK: [u16; 3] = [0, 0, 0];

    fn count_color(image: &Rgb16Image, color: [u16; 3]) -> usize {
        image.pixels().filter(|pixel| pixel.0 == color).count()
    }

    // Tests a new canvas is blank and sized as requested
    // Verified by initialising with white
    #[test]
    fn test_new_canvas_blank() {
        let canvas = Canvas::new(6, 4);
        assert_eq!((canvas.width(), canvas.height()), (6, 4));
        assert_eq!(count_color(canvas.image(), BLACK), 24);
    }

    // Tests a blit writes exactly the destination rectangle
    // Verified by writing the whole source size
    #[test]
    fn test_blit_fills_destination() {
        let mut canvas = Canvas::new(10, 10);
        let tile = solid_rgb16(8, 8, WHITE);

        let written = canvas.blit(Region::new(2, 3, 4, 5), &tile, (0, 0));

        assert_eq!(written, 20);
        let image = canvas.into_image();
        assert_eq!(count_color(&image, WHITE), 20);
        assert_eq!(image.get_pixel(2, 3).0, WHITE);
        assert_eq!(image.get_pixel(5, 7).0, WHITE);
        assert_eq!(image.get_pixel(6, 7).0, BLACK);
        assert_eq!(image.get_pixel(5, 8).0, BLACK);
    }

    // Tests writes past the canvas edge are clipped
    // Verified by removing the canvas width bound
    #[test]
    fn test_blit_clipped_to_canvas() {
        let mut canvas = Canvas::new(10, 10);
        let tile = solid_rgb16(8, 8, WHITE);

        let written = canvas.blit(Region::new(7, 8, 8, 8), &tile, (0, 0));

        assert_eq!(written, 6);
        assert_eq!(count_color(canvas.image(), WHITE), 6);
        assert_eq!(canvas.blit(Region::new(10, 0, 5, 5), &tile, (0, 0)), 0);
    }

    // Tests a source smaller than the cell leaves the remainder untouched
    // Verified by reading past the source height
    #[test]
    fn test_blit_clipped_to_source() {
        let mut canvas = Canvas::new(10, 10);
        let short_tile = solid_rgb16(10, 3, WHITE);

        let written = canvas.blit(Region::new(0, 0, 10, 10), &short_tile, (0, 0));

        assert_eq!(written, 30);
        assert_eq!(canvas.image().get_pixel(0, 2).0, WHITE);
        assert_eq!(canvas.image().get_pixel(0, 3).0, BLACK);
    }

    // Tests the source origin offsets where pixels are read from
    // Verified by ignoring the origin
    #[test]
    fn test_blit_source_origin() {
        let source = Rgb16Image::from_fn(4, 4, |x, y| Rgb([x as u16, y as u16, 0]));
        let mut canvas = Canvas::new(4, 4);

        canvas.blit(Region::new(0, 0, 4, 4), &source, (1, 2));

        let image = canvas.image();
        assert_eq!(image.get_pixel(0, 0).0, [1, 2, 0]);
        assert_eq!(image.get_pixel(2, 1).0, [3, 3, 0]);
        assert_eq!(image.get_pixel(3, 0).0, BLACK);
        assert_eq!(image.get_pixel(0, 2).0, BLACK);
    }

    // Tests bands are disjoint, ordered and cover every row
    // Verified by overlapping the last band
    #[test]
    fn test_bands_partition_rows() {
        let mut canvas = Canvas::new(5, 11);
        let bands: Vec<(u32, u32)> = canvas
            .bands_mut(4)
            .map(|band| (band.y(), band.height()))
            .collect();

        assert_eq!(bands, [(0, 4), (4, 4), (8, 3)]);
    }

    // Tests a band only writes inside its own rows
    // Verified by clipping bands to the whole canvas
    #[test]
    fn test_band_blit_clipped_to_band() {
        let mut canvas = Canvas::new(4, 6);
        let tile = solid_rgb16(4, 6, WHITE);

        let written: Vec<u64> = canvas
            .bands_mut(3)
            .map(|mut band| {
                if band.y() == 3 {
                    band.blit(Region::new(0, 0, 4, 6), &tile, (0, 0))
                } else {
                    0
                }
            })
            .collect();

        assert_eq!(written, [0, 12]);
        let image = canvas.image();
        assert_eq!(image.get_pixel(0, 2).0, BLACK);
        assert_eq!(image.get_pixel(0, 3).0, WHITE);
        assert_eq!(count_color(image, WHITE), 12);
    }
}
