//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use photomosaic::MosaicError;
    use photomosaic::io::error::invalid_parameter;
    use std::error::Error;
    use std::path::PathBuf;

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = MosaicError::FileSystem {
            path: "/tmp/images".into(),
            operation: "list tile directory",
            source: io_error,
        };

        assert!(error.source().is_some());
        assert!(error.to_string().contains("list tile directory"));
    }

    // Tests InvalidGrid reports the image size and resulting cell size
    // Verified by omitting the cell size from the message
    #[test]
    fn test_invalid_grid_error() {
        let error = MosaicError::InvalidGrid {
            width: 5,
            height: 80,
            tile_count: 10,
        };

        let message = error.to_string();
        assert!(message.contains("5x80"));
        assert!(message.contains("0x8"));
        assert!(error.source().is_none());
    }

    // Tests EmptyCatalog names the directory and candidate count
    // Verified by omitting the directory from the message
    #[test]
    fn test_empty_catalog_error() {
        let error = MosaicError::EmptyCatalog {
            source_dir: Some(PathBuf::from("./images/")),
            candidates: 3,
        };

        let message = error.to_string();
        assert!(message.contains("./images/"));
        assert!(message.contains("3 candidates"));
    }

    // Tests an EmptyCatalog without a directory reports no path at all
    // Verified by substituting a placeholder directory name
    #[test]
    fn test_empty_catalog_without_directory() {
        let error = MosaicError::EmptyCatalog {
            source_dir: None,
            candidates: 0,
        };

        let message = error.to_string();
        assert!(message.starts_with("Tile catalog is empty"));
        assert!(!message.contains('\''));
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("quality", &0, &"must be between 1 and 100");

        let message = error.to_string();
        assert!(message.contains("quality"));
        assert!(message.contains("'0'"));
        assert!(message.contains("must be between 1 and 100"));
    }

    // Tests ImageExport error with IO source
    // Verified by excluding source error from message
    #[test]
    fn test_image_export_error() {
        let image_error = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "access denied",
        ));

        let error = MosaicError::ImageExport {
            path: PathBuf::from("/restricted/mosaic.jpg"),
            source: image_error,
        };

        let message = error.to_string();
        assert!(message.contains("/restricted/mosaic.jpg"));
        assert!(message.contains("access denied"));
        assert!(error.source().is_some());
    }

    // Tests conversions from library errors keep the source
    // Verified by dropping the source in From
    #[test]
    fn test_from_conversions() {
        let from_io = MosaicError::from(std::io::Error::other("disk gone"));
        assert!(matches!(from_io, MosaicError::FileSystem { .. }));
        assert!(from_io.source().is_some());

        let from_image =
            MosaicError::from(image::ImageError::IoError(std::io::Error::other("bad")));
        assert!(matches!(from_image, MosaicError::ImageLoad { .. }));
    }

    // Tests EmptyRegion reports the region and bounds
    // Verified by swapping region and bounds in the message
    #[test]
    fn test_empty_region_error() {
        let error = MosaicError::EmptyRegion {
            region: (10, 0, 4, 4),
            bounds: (10, 10),
        };
        let message = error.to_string();
        assert!(message.contains("(10, 0)"));
        assert!(message.contains("4x4"));
        assert!(message.contains("10x10"));
    }
}
