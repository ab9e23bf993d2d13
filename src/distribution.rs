//! Item-popularity distribution model.
//!
//! Converts a [`DistributionSpec`] into a normalized weight vector over the
//! item universe and provides the transaction-length sampler. Every weight is
//! strictly positive so no item is categorically impossible; overlap and
//! noise both rely on that.

use crate::config::{DistributionSpec, GeneratorConfig, DEFAULT_DENSITY};
use crate::{Error, Result};
use rand::Rng;
use rand_distr::{Distribution, Poisson};

/// Tolerance on `sum(weights) == 1`.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Densities are floored here before normalization so far-tail items keep a
/// nonzero selection probability instead of underflowing to 0.
const DENSITY_FLOOR: f64 = 1e-12;

/// Build per-item selection weights: a probability vector of length
/// `num_items`, all entries > 0, summing to 1 within [`WEIGHT_SUM_TOLERANCE`].
///
/// # Errors
///
/// [`Error::Config`] on out-of-range distribution parameters or
/// `num_items == 0`.
pub fn build_weights(spec: &DistributionSpec, num_items: usize) -> Result<Vec<f64>> {
    if num_items == 0 {
        return Err(Error::config("cannot build weights over zero items"));
    }
    spec.validate()?;

    let raw: Vec<f64> = match *spec {
        DistributionSpec::Uniform => vec![1.0; num_items],
        DistributionSpec::Zipf { alpha } => (0..num_items)
            .map(|i| ((i + 1) as f64).powf(-alpha).max(DENSITY_FLOOR))
            .collect(),
        DistributionSpec::Normal { mean, std } => (0..num_items)
            .map(|i| {
                let z = (i as f64 - mean) / std;
                (-0.5 * z * z).exp().max(DENSITY_FLOOR)
            })
            .collect(),
        DistributionSpec::Exponential { lambda } => (0..num_items)
            .map(|i| (-lambda * i as f64).exp().max(DENSITY_FLOOR))
            .collect(),
    };

    let total: f64 = raw.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(Error::config(format!(
            "distribution produced a degenerate weight total: {total}"
        )));
    }
    Ok(raw.into_iter().map(|w| w / total).collect())
}

/// Transaction-length sampler producing integers in `[1, num_items]`.
#[derive(Debug, Clone)]
pub struct LengthSampler {
    kind: Kind,
    max_len: usize,
}

#[derive(Debug, Clone)]
enum Kind {
    /// Poisson draw truncated by rejection.
    Poisson(Poisson<f64>),
    /// Fixed length derived from the configured density.
    Fixed(usize),
}

impl LengthSampler {
    /// Poisson length sampler with mean `avg_len`, truncated to
    /// `[1, num_items]`.
    pub fn poisson(avg_len: usize, num_items: usize) -> Result<Self> {
        if avg_len < 1 || avg_len > num_items {
            return Err(Error::config(format!(
                "avg_transaction_len must be in [1, {num_items}], got {avg_len}"
            )));
        }
        let dist = Poisson::new(avg_len as f64)
            .map_err(|e| Error::config(format!("invalid Poisson mean {avg_len}: {e}")))?;
        Ok(Self {
            kind: Kind::Poisson(dist),
            max_len: num_items,
        })
    }

    /// Fixed-length sampler.
    pub fn fixed(len: usize, num_items: usize) -> Result<Self> {
        if len < 1 || len > num_items {
            return Err(Error::config(format!(
                "fixed transaction length must be in [1, {num_items}], got {len}"
            )));
        }
        Ok(Self {
            kind: Kind::Fixed(len),
            max_len: num_items,
        })
    }

    /// Length sampler for a validated configuration: Poisson around
    /// `avg_transaction_len` when present, otherwise a fixed
    /// `num_items * density` fallback.
    pub fn for_config(config: &GeneratorConfig) -> Result<Self> {
        match config.avg_transaction_len {
            Some(avg) => Self::poisson(avg, config.num_items),
            None => {
                let density = config.density.unwrap_or(DEFAULT_DENSITY);
                let len = ((config.num_items as f64 * density).round() as usize)
                    .clamp(1, config.num_items);
                Self::fixed(len, config.num_items)
            }
        }
    }

    /// Largest length this sampler can produce.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Draw a length in `[1, max_len]`.
    ///
    /// Out-of-range Poisson draws are rejected and re-drawn, never clamped;
    /// clamping would pile probability mass at the bounds and bias the mean.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        match &self.kind {
            Kind::Fixed(len) => *len,
            Kind::Poisson(dist) => loop {
                let drawn = dist.sample(rng) as usize;
                if (1..=self.max_len).contains(&drawn) {
                    return drawn;
                }
            },
        }
    }
}
