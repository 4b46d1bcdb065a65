//! Patch size specifications and their normalization against spatial axes

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::geometry::axes::SpatialAxes;
use crate::geometry::region::AxisSizeMap;
use crate::io::error::{Result, SamplingError, invalid_patch_size};

/// Patch size as supplied by a caller, before it is tied to axis labels
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatchSize {
    /// Same edge length along every spatial axis
    Scalar(usize),
    /// One edge length per spatial axis, in declared axis order
    PerAxis(Vec<usize>),
    /// Edge lengths keyed by axis label
    Named(BTreeMap<char, usize>),
}

impl PatchSize {
    /// Resolve this specification into one size per declared axis
    ///
    /// # Errors
    ///
    /// Returns [`SamplingError::InvalidPatchSize`] when a size is zero, when a
    /// per-axis sequence does not have one entry per axis, or when a keyed
    /// specification misses a declared axis or names an undeclared one
    pub fn normalize(&self, axes: &SpatialAxes) -> Result<AxisSizeMap> {
        match self {
            Self::Scalar(size) => {
                ensure_positive(self, *size)?;
                Ok(axes.iter().map(|axis| (axis, *size)).collect())
            }
            Self::PerAxis(sizes) => {
                if sizes.len() != axes.len() {
                    return Err(invalid_patch_size(
                        self,
                        &format!(
                            "expected {} sizes for axes '{axes}', got {}",
                            axes.len(),
                            sizes.len()
                        ),
                    ));
                }
                for &size in sizes {
                    ensure_positive(self, size)?;
                }
                Ok(axes.iter().zip(sizes.iter().copied()).collect())
            }
            Self::Named(sizes) => {
                if let Some(axis) = sizes.keys().find(|&&axis| !axes.contains(axis)) {
                    return Err(invalid_patch_size(
                        self,
                        &format!("axis '{axis}' is not one of the spatial axes '{axes}'"),
                    ));
                }
                axes.iter()
                    .map(|axis| {
                        let size = sizes.get(&axis).copied().ok_or_else(|| {
                            invalid_patch_size(self, &format!("no size given for axis '{axis}'"))
                        })?;
                        ensure_positive(self, size)?;
                        Ok((axis, size))
                    })
                    .collect()
            }
        }
    }
}

fn ensure_positive(spec: &PatchSize, size: usize) -> Result<()> {
    if size == 0 {
        Err(invalid_patch_size(spec, &"sizes must be positive"))
    } else {
        Ok(())
    }
}

impl From<usize> for PatchSize {
    fn from(size: usize) -> Self {
        Self::Scalar(size)
    }
}

impl From<Vec<usize>> for PatchSize {
    fn from(sizes: Vec<usize>) -> Self {
        Self::PerAxis(sizes)
    }
}

impl<const N: usize> From<[usize; N]> for PatchSize {
    fn from(sizes: [usize; N]) -> Self {
        Self::PerAxis(sizes.to_vec())
    }
}

impl From<&[usize]> for PatchSize {
    fn from(sizes: &[usize]) -> Self {
        Self::PerAxis(sizes.to_vec())
    }
}

impl From<BTreeMap<char, usize>> for PatchSize {
    fn from(sizes: BTreeMap<char, usize>) -> Self {
        Self::Named(sizes)
    }
}

impl<const N: usize> From<[(char, usize); N]> for PatchSize {
    fn from(sizes: [(char, usize); N]) -> Self {
        Self::Named(sizes.into_iter().collect())
    }
}

/// Parses `"32"`, `"128,64"` or `"Y=32,X=16"`
impl FromStr for PatchSize {
    type Err = SamplingError;

    fn from_str(s: &str) -> Result<Self> {
        let parse_size = |token: &str| {
            token.trim().parse::<usize>().map_err(|error| {
                invalid_patch_size(&s, &format!("'{}' is not a size: {error}", token.trim()))
            })
        };

        if s.contains('=') {
            let mut sizes = BTreeMap::new();
            for pair in s.split(',') {
                let (axis, size) = pair
                    .split_once('=')
                    .ok_or_else(|| invalid_patch_size(&s, &format!("'{pair}' is not AXIS=SIZE")))?;
                let mut chars = axis.trim().chars();
                let (Some(label), None) = (chars.next(), chars.next()) else {
                    return Err(invalid_patch_size(
                        &s,
                        &format!("'{}' is not a single axis label", axis.trim()),
                    ));
                };
                if sizes.insert(label, parse_size(size)?).is_some() {
                    return Err(invalid_patch_size(&s, &format!("axis '{label}' is repeated")));
                }
            }
            Ok(Self::Named(sizes))
        } else if s.contains(',') {
            s.split(',')
                .map(parse_size)
                .collect::<Result<Vec<_>>>()
                .map(Self::PerAxis)
        } else {
            parse_size(s).map(Self::Scalar)
        }
    }
}

impl fmt::Display for PatchSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(size) => write!(f, "{size}"),
            Self::PerAxis(sizes) => {
                let joined: Vec<String> = sizes.iter().map(ToString::to_string).collect();
                write!(f, "{}", joined.join(","))
            }
            Self::Named(sizes) => {
                let joined: Vec<String> = sizes
                    .iter()
                    .map(|(axis, size)| format!("{axis}={size}"))
                    .collect();
                write!(f, "{}", joined.join(","))
            }
        }
    }
}
