//! Tests for tile construction and catalog ordering

#[cfg(test)]
mod tests {
    use crate::solid_rgb16;
    use image::{DynamicImage, Rgb, RgbImage};
    use photomosaic::catalog::tile::{Catalog, Tile};
    use photomosaic::color::average::AverageColor;

    // Tests tiles are resized to the cell width with aspect ratio kept
    // Verified by resizing to a square cell
    #[test]
    fn test_from_image_resizes_to_cell_width() {
        let decoded = DynamicImage::ImageRgb8(RgbImage::from_pixel(20, 40, Rgb([255, 0, 0])));
        let tile = Tile::from_image("tall.jpg", &decoded, 10).unwrap();

        assert_eq!(tile.id(), "tall.jpg");
        assert_eq!(tile.bitmap().dimensions(), (10, 20));
        assert_eq!(tile.origin(), (0, 0));
    }

    // Tests a decoded image at cell width becomes the same tile as its bitmap
    // Verified by reading the origin from a cropped view
    #[test]
    fn test_from_image_matches_from_bitmap() {
        let bitmap = solid_rgb16(6, 4, [500, 1000, 1500]);
        let decoded = DynamicImage::ImageRgb16(bitmap.clone());

        let from_image = Tile::from_image("a.jpg", &decoded, 6).unwrap();
        let from_bitmap = Tile::from_bitmap("a.jpg", bitmap).unwrap();

        assert_eq!(from_image.origin(), (0, 0));
        assert_eq!(from_image.origin(), from_bitmap.origin());
        assert_eq!(from_image.bitmap().dimensions(), (6, 4));
        let pairs = from_image
            .average_color()
            .channels()
            .into_iter()
            .zip(from_bitmap.average_color().channels());
        for (resized, direct) in pairs {
            assert!((resized - direct).abs() < 1.0);
        }
    }

    // Tests the average is taken from the widened resized bitmap
    // Verified by averaging at 8-bit scale
    #[test]
    fn test_from_image_average_color() {
        let decoded = DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 16, Rgb([0, 0, 255])));
        let tile = Tile::from_image("blue.jpg", &decoded, 4).unwrap();

        let average = tile.average_color();
        assert!(average.r.abs() < 1.0);
        assert!(average.g.abs() < 1.0);
        assert!((average.b - 65535.0).abs() < 1.0);
    }

    // Tests a bitmap tile keeps its pixels untouched
    // Verified by resizing inside from_bitmap
    #[test]
    fn test_from_bitmap() {
        let tile = Tile::from_bitmap("grey", solid_rgb16(3, 5, [7, 7, 7])).unwrap();
        assert_eq!(tile.bitmap().dimensions(), (3, 5));
        assert_eq!(tile.average_color(), AverageColor::new(7.0, 7.0, 7.0));
    }

    // Tests an empty bitmap cannot become a tile
    // Verified by skipping the averaging error
    #[test]
    fn test_from_bitmap_empty() {
        assert!(Tile::from_bitmap("empty", solid_rgb16(0, 0, [0, 0, 0])).is_err());
    }

    // Tests catalog iteration is sorted by id regardless of insertion order
    // Verified by storing tiles in a hash map
    #[test]
    fn test_catalog_is_ordered() {
        let catalog = Catalog::from_tiles([
            Tile::from_bitmap("c.jpg", solid_rgb16(1, 1, [3, 3, 3])).unwrap(),
            Tile::from_bitmap("a.jpg", solid_rgb16(1, 1, [1, 1, 1])).unwrap(),
            Tile::from_bitmap("b.jpg", solid_rgb16(1, 1, [2, 2, 2])).unwrap(),
        ]);

        assert_eq!(catalog.len(), 3);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.ids().collect::<Vec<_>>(), ["a.jpg", "b.jpg", "c.jpg"]);
        assert!(catalog.contains("b.jpg"));
        assert!(catalog.get("d.jpg").is_none());
    }

    // Tests inserting an existing id replaces and returns the old tile
    // Verified by keeping the first insertion
    #[test]
    fn test_catalog_insert_replaces() {
        let mut catalog = Catalog::new();
        assert!(catalog.is_empty());

        let first = Tile::from_bitmap("x.jpg", solid_rgb16(1, 1, [1, 1, 1])).unwrap();
        let second = Tile::from_bitmap("x.jpg", solid_rgb16(1, 1, [9, 9, 9])).unwrap();

        assert!(catalog.insert(first).is_none());
        let replaced = catalog.insert(second).unwrap();

        assert_eq!(replaced.average_color().r, 1.0);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("x.jpg").unwrap().average_color().r, 9.0);
    }
}
