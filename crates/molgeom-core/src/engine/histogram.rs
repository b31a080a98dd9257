use super::config::BinSpec;
use super::kernels::gaussian_proximity;
use crate::core::models::atom::{NUM_CHANNELS, Species};

/// Per-channel smoothed histogram.
///
/// Every contribution is spread over all bins with a Gaussian kernel and added to the
/// channel of the contributing atom's species and, for non-hydrogen atoms, to the
/// heavy-atom aggregate channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelHistogram {
    centers: Vec<f64>,
    bandwidth: f64,
    values: Vec<f64>,
}

impl ChannelHistogram {
    pub fn new(bins: &BinSpec) -> Self {
        let centers = bins.centers();
        let values = vec![0.0; NUM_CHANNELS * centers.len()];
        Self {
            centers,
            bandwidth: bins.bandwidth,
            values,
        }
    }

    pub fn bin_count(&self) -> usize {
        self.centers.len()
    }

    pub fn add(&mut self, species: Species, value: f64) {
        self.add_weighted(species, value, 1.0);
    }

    /// Adds `weight · gaussian_proximity(value, center, bandwidth)` to every bin of the
    /// channels `species` feeds.
    pub fn add_weighted(&mut self, species: Species, value: f64, weight: f64) {
        let bins = self.centers.len();
        for channel in species.channels() {
            let row = &mut self.values[channel * bins..(channel + 1) * bins];
            for (slot, &center) in row.iter_mut().zip(&self.centers) {
                *slot += weight * gaussian_proximity(value, center, self.bandwidth);
            }
        }
    }

    pub fn channel(&self, channel: usize) -> &[f64] {
        let bins = self.centers.len();
        &self.values[channel * bins..(channel + 1) * bins]
    }

    /// Channel-major flattening: all bins of H, then C, N, F, O and the heavy aggregate.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }
}

/// Plain per-channel tallies, laid out like [`ChannelHistogram`] channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementCounts([u64; NUM_CHANNELS]);

impl ElementCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, species: Species) {
        for channel in species.channels() {
            self.0[channel] += 1;
        }
    }

    pub fn get(&self, channel: usize) -> u64 {
        self.0[channel]
    }

    pub fn as_array(&self) -> [u64; NUM_CHANNELS] {
        self.0
    }
}
