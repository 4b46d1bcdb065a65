//! Tests for array metadata and region views

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chunkpatch::SamplingError;
    use chunkpatch::collection::{ArrayMeta, ChunkedArray};
    use chunkpatch::geometry::SpatialRegion;
    use ndarray::{Array3, ArrayD, Ix3, IxDyn};

    // Tests metadata lookups by axis label
    // Verified by indexing shape in reverse
    #[test]
    fn test_meta_lookups() {
        let meta = ArrayMeta::new("ZYX", &[2, 64, 32], &[1, 16, 16]).unwrap();

        assert_eq!(meta.axes(), &['Z', 'Y', 'X']);
        assert_eq!(meta.shape(), &[2, 64, 32]);
        assert!(meta.has_axis('Y'));
        assert!(!meta.has_axis('C'));
        assert_eq!(meta.extent_of('Y'), Some(64));
        assert_eq!(meta.chunk_of('X'), Some(16));
        assert_eq!(meta.extent_of('C'), None);
        assert_eq!(meta.extent(), BTreeMap::from([('X', 32), ('Y', 64), ('Z', 2)]));
        assert_eq!(
            meta.chunk_size(),
            BTreeMap::from([('X', 16), ('Y', 16), ('Z', 1)])
        );
    }

    // Tests inconsistent descriptions are rejected
    // Verified by skipping the length comparison
    #[test]
    fn test_meta_validation() {
        let mismatch = ArrayMeta::new("YX", &[4, 4, 4], &[4, 4, 4]).unwrap_err();
        assert!(matches!(mismatch, SamplingError::InvalidArray { .. }));

        assert!(ArrayMeta::new("YX", &[4, 4], &[4]).is_err());
        assert!(ArrayMeta::new("YY", &[4, 4], &[4, 4]).is_err());
        assert!(ArrayMeta::new("YX", &[4, 4], &[0, 4]).is_err());
    }

    // Tests data dimensionality must match the labels
    // Verified by building metadata from the labels alone
    #[test]
    fn test_chunked_array_checks_dimensionality() {
        let data = ArrayD::<f32>::zeros(IxDyn(&[4, 4]));
        assert!(ChunkedArray::new(data.clone(), "ZYX", &[1, 4, 4]).is_err());

        let array = ChunkedArray::new(data, "YX", &[2, 2]).unwrap();
        assert_eq!(array.meta().chunk_of('Y'), Some(2));
        assert_eq!(array.data().shape(), &[4, 4]);
    }

    // Tests a single-chunk array uses its shape as chunking
    // Verified by defaulting chunk lengths to one
    #[test]
    fn test_single_chunk() {
        let array = ChunkedArray::single_chunk(ArrayD::<u8>::zeros(IxDyn(&[3, 5])), "YX").unwrap();
        assert_eq!(array.meta().chunk_size(), array.meta().extent());

        assert!(ChunkedArray::single_chunk(ArrayD::<u8>::zeros(IxDyn(&[0, 5])), "YX").is_err());
    }

    // Tests region views slice by label and take unrestricted axes whole
    // Verified by slicing axes in region key order
    #[test]
    fn test_view_region() {
        let data = Array3::from_shape_fn((2, 4, 6), |(z, y, x)| (z * 100 + y * 10 + x) as u16);
        let array = ChunkedArray::new(data.into_dyn(), "ZYX", &[1, 2, 3]).unwrap();

        let region = SpatialRegion::new().with_axis('X', 2..5).with_axis('Y', 1..3);
        let view = array.view_region(&region).into_dimensionality::<Ix3>().unwrap();

        assert_eq!(view.shape(), &[2, 2, 3]);
        assert_eq!(view[(0, 0, 0)], 12);
        assert_eq!(view[(1, 1, 2)], 124);
    }

    // Tests regions past the edge give clamped or empty views
    // Verified by removing the clamp
    #[test]
    fn test_view_region_clamps() {
        let array = ChunkedArray::filled_mask(&[4, 4], "YX").unwrap();

        let partial = array.view_region(&SpatialRegion::new().with_axis('Y', 2..10));
        assert_eq!(partial.shape(), &[2, 4]);

        let outside = array.view_region(&SpatialRegion::new().with_axis('X', 8..12));
        assert_eq!(outside.len(), 0);
    }

    // Tests mask construction from booleans
    // Verified by mapping true to zero
    #[test]
    fn test_mask_constructors() {
        let flags = ArrayD::from_shape_vec(IxDyn(&[2, 2]), vec![true, false, false, true]).unwrap();
        let mask = ChunkedArray::from_mask(&flags, "YX").unwrap();
        assert_eq!(mask.data().iter().copied().collect::<Vec<u8>>(), vec![1, 0, 0, 1]);

        let filled = ChunkedArray::filled_mask(&[3, 2], "YX").unwrap();
        assert!(filled.data().iter().all(|&value| value == 1));
        assert_eq!(filled.meta().shape(), &[3, 2]);
    }
}
