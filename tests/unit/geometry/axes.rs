//! Tests for spatial axis validation and ordering

#[cfg(test)]
mod tests {
    use chunkpatch::SamplingError;
    use chunkpatch::geometry::SpatialAxes;
    use chunkpatch::geometry::axes::is_spatial_axis;

    // Tests declared order is preserved
    // Verified by sorting labels on construction
    #[test]
    fn test_axes_keep_declared_order() {
        let axes = SpatialAxes::new("XYZ").unwrap();
        assert_eq!(axes.labels(), &['X', 'Y', 'Z']);
        assert_eq!(axes.iter().collect::<String>(), "XYZ");
        assert_eq!(axes.len(), 3);
        assert!(!axes.is_empty());
    }

    // Tests only Z, Y and X count as spatial
    // Verified by adding C to the recognized labels
    #[test]
    fn test_spatial_axis_recognition() {
        assert!(is_spatial_axis('Z'));
        assert!(is_spatial_axis('Y'));
        assert!(is_spatial_axis('X'));
        assert!(!is_spatial_axis('C'));
        assert!(!is_spatial_axis('T'));
        assert!(!is_spatial_axis('x'));
    }

    // Tests unrecognized labels are rejected
    // Verified by skipping label validation
    #[test]
    fn test_rejects_unknown_label() {
        let error = SpatialAxes::new("YXC").unwrap_err();
        assert!(matches!(error, SamplingError::InvalidAxes { .. }));
        assert!(error.to_string().contains("'C'"));
    }

    // Tests repeated labels are rejected
    // Verified by removing the duplicate check
    #[test]
    fn test_rejects_repeated_label() {
        let error = SpatialAxes::new("YXY").unwrap_err();
        assert!(matches!(error, SamplingError::InvalidAxes { .. }));
        assert!(error.to_string().contains("repeated"));
    }

    // Tests empty axis strings are rejected
    // Verified by accepting empty input
    #[test]
    fn test_rejects_empty() {
        assert!(SpatialAxes::new("").is_err());
    }

    // Tests default axes are YX
    // Verified by changing the default constant
    #[test]
    fn test_default_is_yx() {
        let axes = SpatialAxes::default();
        assert_eq!(axes.labels(), &['Y', 'X']);
        assert!(axes.contains('Y'));
        assert!(!axes.contains('Z'));
    }

    // Tests parsing and display agree
    // Verified by reversing labels in Display
    #[test]
    fn test_parse_and_display() {
        let axes: SpatialAxes = "ZYX".parse().unwrap();
        assert_eq!(axes.to_string(), "ZYX");
        assert!("ZZ".parse::<SpatialAxes>().is_err());
    }
}
