//! In-memory reductions behind the chart endpoints.
//!
//! Prices are bucketed into ten fixed bands of 100 each, the last one open
//! ended. Categories are counted as-is and only categories that occur are
//! reported.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer, ser::SerializeMap};

pub const PRICE_BAND_COUNT: usize = 10;

const BAND_WIDTH: f64 = 100.0;

/// One of the ten histogram bands, `0-100` through `901-above`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PriceBand(usize);

impl PriceBand {
    /// Band holding `price`.
    ///
    /// The price is rounded up to the next multiple of 100 and that ceiling
    /// picks the band, so 100 lands in `0-100` and 100.01 in `101-200`.
    /// Zero and negative prices go to the first band.
    pub fn for_price(price: f64) -> Self {
        let ceiling = (price / BAND_WIDTH).ceil();

        if ceiling >= PRICE_BAND_COUNT as f64 {
            Self(PRICE_BAND_COUNT - 1)
        } else if ceiling > 1.0 {
            Self(ceiling as usize - 1)
        } else {
            Self(0)
        }
    }

    pub fn all() -> impl Iterator<Item = PriceBand> {
        (0..PRICE_BAND_COUNT).map(PriceBand)
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn label(self) -> String {
        match self.0 {
            0 => "0-100".to_string(),
            i if i == PRICE_BAND_COUNT - 1 => format!("{}-above", i * 100 + 1),
            i => format!("{}-{}", i * 100 + 1, (i + 1) * 100),
        }
    }
}

/// Number of transactions per price band.
///
/// All ten bands are always present, zero or not. Serialises as a JSON
/// object keyed by band label in ascending price order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceHistogram {
    counts: [u64; PRICE_BAND_COUNT],
}

impl PriceHistogram {
    pub fn from_prices<I>(prices: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut histogram = Self::default();
        for price in prices {
            histogram.counts[PriceBand::for_price(price).index()] += 1;
        }
        histogram
    }

    pub fn count(&self, band: PriceBand) -> u64 {
        self.counts[band.index()]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PriceBand, u64)> + '_ {
        PriceBand::all().map(|band| (band, self.count(band)))
    }
}

impl Serialize for PriceHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(PRICE_BAND_COUNT))?;
        for (band, count) in self.iter() {
            map.serialize_entry(&band.label(), &count)?;
        }
        map.end()
    }
}

/// Number of transactions per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryBreakdown(BTreeMap<String, u64>);

impl CategoryBreakdown {
    pub fn from_categories<I>(categories: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut counts = BTreeMap::new();
        for category in categories {
            *counts.entry(category).or_insert(0) += 1;
        }
        Self(counts)
    }
}
