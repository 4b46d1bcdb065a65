//! Command-line interface listing the patches sampled from a PNG image

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::collection::{ImageCollection, MemoryCollection};
use crate::geometry::{PatchSize, SpatialAxes};
use crate::io::configuration::{
    DEFAULT_CHUNK_SIZE, DEFAULT_PATCH_SIZE, DEFAULT_SEED, DEFAULT_SPATIAL_AXES,
};
use crate::io::error::{Result, SamplingError};
use crate::io::image::{load_image, load_mask};
use crate::io::progress::ChunkProgress;
use crate::sampling::{BlueNoisePatchSampler, PatchSampler, Sampler};

/// Patch placement strategy
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SamplerKind {
    /// Regular grid of patches inside each chunk
    Grid,
    /// Poisson-disk positions inside each chunk
    BlueNoise,
}

#[derive(Parser, Debug)]
#[command(name = "chunkpatch")]
#[command(
    author,
    version,
    about = "List chunk-aligned training patches of an image, filtered by a mask"
)]
/// Command-line arguments for the patch listing tool
// CLI tools commonly need multiple boolean flags for sampler policies and output
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input PNG image
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// PNG mask marking regions of interest (nonzero luminance)
    #[arg(short, long)]
    pub mask: Option<PathBuf>,

    /// Patch size: `32`, `128,64` (per axis) or `Y=32,X=16`
    #[arg(short, long, default_value = DEFAULT_PATCH_SIZE)]
    pub patch_size: PatchSize,

    /// Spatial axes to tile, in enumeration order
    #[arg(short, long, default_value = DEFAULT_SPATIAL_AXES)]
    pub axes: SpatialAxes,

    /// Chunk edge length assigned to the image
    #[arg(short, long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Patch placement strategy
    #[arg(long, value_enum, default_value_t = SamplerKind::Grid)]
    pub sampler: SamplerKind,

    /// Random seed for blue-noise positions
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Let blue-noise patches overlap by up to half a patch
    #[arg(long)]
    pub allow_overlap: bool,

    /// Draw new blue-noise positions for every chunk
    #[arg(long)]
    pub resample: bool,

    /// Write the listing to a file instead of standard output
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the accepted-chunk map before the listing
    #[arg(long)]
    pub occupancy: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Totals of one run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Chunks holding any region of interest
    pub chunks: usize,
    /// Patches listed across all chunks
    pub patches: usize,
}

/// Loads the inputs, runs the selected sampler and writes the listing
pub struct PatchLister {
    cli: Cli,
}

impl PatchLister {
    /// Create a lister for the given arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Sample patches and write one `chunk<TAB>region` line per patch
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The image or mask cannot be loaded
    /// - The patch size or axes are inconsistent
    /// - The output cannot be written
    pub fn run(&self) -> Result<RunSummary> {
        let collection = self.load_collection()?;
        let grid = PatchSampler::with_axes(self.cli.patch_size.clone(), self.cli.axes.clone())?;

        let mut out = self.open_output()?;

        if self.cli.occupancy {
            let (_, occupancy) = grid.chunk_occupancy(&collection)?;
            for line in occupancy.to_string().lines() {
                writeln!(out, "# {line}")?;
            }
        }

        let summary = match self.cli.sampler {
            SamplerKind::Grid => self.list(&grid, &collection, out.as_mut())?,
            SamplerKind::BlueNoise => {
                let sampler = BlueNoisePatchSampler::from_grid(grid)
                    .with_seed(self.cli.seed)
                    .with_allow_overlap(self.cli.allow_overlap)
                    .with_resample_positions(self.cli.resample);
                self.list(&sampler, &collection, out.as_mut())?
            }
        };

        out.flush()?;
        Ok(summary)
    }

    fn load_collection(&self) -> Result<MemoryCollection> {
        let images = load_image(&self.cli.image, self.cli.chunk_size)?;
        match &self.cli.mask {
            Some(path) => Ok(MemoryCollection::with_mask(images, load_mask(path)?)),
            None => Ok(MemoryCollection::new(images)),
        }
    }

    fn open_output(&self) -> Result<Box<dyn Write>> {
        match &self.cli.output {
            Some(path) => {
                let file = File::create(path).map_err(|e| SamplingError::FileSystem {
                    path: path.clone(),
                    operation: "create listing",
                    source: e,
                })?;
                Ok(Box::new(BufWriter::new(file)))
            }
            None => Ok(Box::new(BufWriter::new(std::io::stdout().lock()))),
        }
    }

    fn list<S, C>(&self, sampler: &S, collection: &C, out: &mut dyn Write) -> Result<RunSummary>
    where
        S: Sampler,
        C: ImageCollection,
    {
        let chunks = sampler.compute_chunks(collection)?;
        let mut progress = if self.cli.should_show_progress() {
            ChunkProgress::new(chunks.len())
        } else {
            ChunkProgress::hidden(chunks.len())
        };

        for (index, chunk) in chunks.iter().enumerate() {
            let patches = sampler.compute_patches(collection, chunk)?;
            for patch in &patches {
                writeln!(out, "{index}\t{patch}")?;
            }
            progress.advance(patches.len());
        }
        progress.finish();

        Ok(RunSummary {
            chunks: progress.chunks_done() as usize,
            patches: progress.patches_done() as usize,
        })
    }
}
