//! Tests for chunk computation and grid patch sampling

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chunkpatch::SamplingError;
    use chunkpatch::collection::{
        ArrayMeta, ArrayRole, ChunkedArray, ImageCollection, MemoryCollection,
    };
    use chunkpatch::geometry::SpatialRegion;
    use chunkpatch::sampling::{PatchSampler, Sampler, SamplingStats, StatsSnapshot};
    use ndarray::{ArrayD, IxDyn};

    fn image() -> ChunkedArray<f32> {
        ChunkedArray::new(ArrayD::zeros(IxDyn(&[1, 64, 96])), "ZYX", &[1, 32, 32]).unwrap()
    }

    // Quarter-resolution mask set on rows 8..12 and columns 0..8
    fn partial_collection() -> MemoryCollection {
        let flags =
            ArrayD::from_shape_fn(IxDyn(&[16, 24]), |index| (8..12).contains(&index[0]) && index[1] < 8);
        MemoryCollection::with_mask(image(), ChunkedArray::from_mask(&flags, "YX").unwrap())
    }

    fn region(bounds: &[(char, std::ops::Range<usize>)]) -> SpatialRegion {
        bounds.iter().cloned().collect()
    }

    struct Headless;

    impl ImageCollection for Headless {
        fn meta(&self, _role: ArrayRole) -> Option<&ArrayMeta> {
            None
        }

        fn read(&self, role: ArrayRole, _region: &SpatialRegion) -> chunkpatch::Result<ArrayD<f64>> {
            Err(SamplingError::MissingArray { role })
        }
    }

    // Tests construction normalizes the patch size
    // Verified by storing the raw specification
    #[test]
    fn test_construction() {
        let sampler = PatchSampler::new(16, "ZYX").unwrap();
        assert_eq!(
            sampler.patch_size(),
            &BTreeMap::from([('X', 16), ('Y', 16), ('Z', 16)])
        );
        assert_eq!(sampler.spatial_axes().to_string(), "ZYX");

        let sampler = PatchSampler::with_default_axes([8, 4]).unwrap();
        assert_eq!(sampler.patch_size(), &BTreeMap::from([('X', 4), ('Y', 8)]));
    }

    // Tests invalid axes and patch sizes fail construction
    // Verified by deferring validation to sampling
    #[test]
    fn test_construction_errors() {
        assert!(matches!(
            PatchSampler::new(16, "YXC"),
            Err(SamplingError::InvalidAxes { .. })
        ));
        assert!(matches!(
            PatchSampler::new([1, 2, 3], "YX"),
            Err(SamplingError::InvalidPatchSize { .. })
        ));
    }

    // Tests every chunk is returned in row-major order without a mask
    // Verified by iterating columns outermost
    #[test]
    fn test_chunks_without_mask() {
        let collection = MemoryCollection::new(image());
        let sampler = PatchSampler::with_default_axes(16).unwrap();

        let chunks = sampler.compute_chunks(&collection).unwrap();
        assert_eq!(chunks.len(), 6);
        assert_eq!(chunks[0], region(&[('Z', 0..1), ('Y', 0..32), ('X', 0..32)]));
        assert_eq!(chunks[1], region(&[('Z', 0..1), ('Y', 0..32), ('X', 32..64)]));
        assert_eq!(chunks[5], region(&[('Z', 0..1), ('Y', 32..64), ('X', 64..96)]));
    }

    // Tests only chunks over truthy mask blocks are kept
    // Verified by accepting chunks with an all-zero footprint
    #[test]
    fn test_chunks_filtered_by_mask() {
        let collection = partial_collection();
        let sampler = PatchSampler::with_default_axes(16).unwrap();

        let chunks = sampler.compute_chunks(&collection).unwrap();
        assert_eq!(chunks, vec![region(&[('Z', 0..1), ('Y', 32..64), ('X', 0..32)])]);

        let stats = sampler.stats();
        assert_eq!(stats.chunks_considered, 6);
        assert_eq!(stats.chunks_accepted, 1);
        assert_eq!(stats.chunks_rejected(), 5);
    }

    // Tests repeated chunk computation gives identical results
    // Verified by caching a mutated list
    #[test]
    fn test_chunks_idempotent() {
        let collection = partial_collection();
        let sampler = PatchSampler::with_default_axes(16).unwrap();

        let first = sampler.compute_chunks(&collection).unwrap();
        let second = sampler.compute_chunks(&collection).unwrap();
        assert_eq!(first, second);
    }

    // Tests patches tile the chunk and respect the mask
    // Verified by skipping the patch mask test
    #[test]
    fn test_patches_filtered_by_mask() {
        let collection = partial_collection();
        let sampler = PatchSampler::with_default_axes(16).unwrap();
        let chunk = region(&[('Z', 0..1), ('Y', 32..64), ('X', 0..32)]);

        let patches = sampler.compute_patches(&collection, &chunk).unwrap();
        assert_eq!(
            patches,
            vec![
                region(&[('Z', 0..1), ('Y', 32..48), ('X', 0..16)]),
                region(&[('Z', 0..1), ('Y', 32..48), ('X', 16..32)]),
            ]
        );
        assert!(patches.iter().all(|patch| chunk.contains_region(patch)));

        let stats = sampler.stats();
        assert_eq!(stats.patches_considered, 4);
        assert_eq!(stats.patches_accepted, 2);
        assert_eq!(stats.patches_rejected(), 2);
        assert_eq!(stats.empty_patch_lists, 0);
    }

    // Tests the last patch is clipped to the chunk
    // Verified by letting tiles run past the chunk end
    #[test]
    fn test_patches_clipped_to_chunk() {
        let collection = MemoryCollection::new(image());
        let sampler = PatchSampler::with_default_axes([32, 20]).unwrap();
        let chunk = region(&[('Z', 0..1), ('Y', 0..32), ('X', 0..32)]);

        let patches = sampler.compute_patches(&collection, &chunk).unwrap();
        assert_eq!(
            patches,
            vec![
                region(&[('Z', 0..1), ('Y', 0..32), ('X', 0..20)]),
                region(&[('Z', 0..1), ('Y', 0..32), ('X', 20..32)]),
            ]
        );
    }

    // Tests a mask lacking a declared axis leaves that axis unrestricted
    // Verified by rejecting chunks along the missing axis
    #[test]
    fn test_mask_missing_axis_is_unrestricted() {
        let flags = ArrayD::from_shape_fn(IxDyn(&[24]), |index| index[0] < 8);
        let collection =
            MemoryCollection::with_mask(image(), ChunkedArray::from_mask(&flags, "X").unwrap());
        let sampler = PatchSampler::with_default_axes(16).unwrap();

        let chunks = sampler.compute_chunks(&collection).unwrap();
        assert_eq!(
            chunks,
            vec![
                region(&[('Z', 0..1), ('Y', 0..32), ('X', 0..32)]),
                region(&[('Z', 0..1), ('Y', 32..64), ('X', 0..32)]),
            ]
        );
    }

    // Tests the occupancy map matches the chunk list
    // Verified by rendering rows and columns swapped
    #[test]
    fn test_chunk_occupancy() {
        let collection = partial_collection();
        let sampler = PatchSampler::with_default_axes(16).unwrap();

        let (grid, occupancy) = sampler.chunk_occupancy(&collection).unwrap();
        assert_eq!(grid.shape(), vec![2, 3]);
        assert_eq!(occupancy.to_string(), "...\n#..");
        assert_eq!(
            occupancy.regions(&grid).collect::<Vec<_>>(),
            sampler.compute_chunks(&collection).unwrap()
        );
    }

    // Tests a collection without images is an error
    // Verified by returning an empty chunk list
    #[test]
    fn test_missing_images() {
        let sampler = PatchSampler::with_default_axes(16).unwrap();
        let error = sampler.compute_chunks(&Headless).unwrap_err();

        assert!(matches!(
            error,
            SamplingError::MissingArray {
                role: ArrayRole::Images
            }
        ));
        assert!(sampler.compute_patches(&Headless, &SpatialRegion::new()).is_err());
    }

    // Tests counters accumulate and empty lists are counted
    // Verified by counting non-empty lists as empty
    #[test]
    fn test_sampling_stats() {
        let stats = SamplingStats::new();
        stats.record_chunks(10, 4);
        stats.record_patches(8, 0);
        stats.record_patches(8, 3);

        assert_eq!(
            stats.snapshot(),
            StatsSnapshot {
                chunks_considered: 10,
                chunks_accepted: 4,
                patches_considered: 16,
                patches_accepted: 3,
                empty_patch_lists: 1,
            }
        );
    }
}
