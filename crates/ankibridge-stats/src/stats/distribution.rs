//! Summary statistics and labeled histograms over numeric samples.

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::{Error, Result};

/// Renders a bucket label from its lower and upper bound.
///
/// The first bucket has no lower bound and the last has no upper bound.
pub type LabelFormatter = Arc<dyn Fn(Option<f64>, Option<f64>) -> String + Send + Sync>;

/// Bucket layout for [`compute_distribution`].
///
/// `N` boundaries produce `N + 1` buckets: `(-inf, b0)`, `[b0, b1)`, ...,
/// `[bN-1, +inf)`. A value equal to a boundary lands in the bucket that
/// starts at it.
///
/// # Example
///
/// ```
/// use ankibridge_stats::stats::BucketConfig;
///
/// let config = BucketConfig::new(vec![7.0, 30.0])?.with_unit_suffix("d");
/// assert_eq!(config.labels(), vec!["<7d", "7-30d", ">30d"]);
/// # Ok::<(), ankibridge_stats::Error>(())
/// ```
#[derive(Clone)]
pub struct BucketConfig {
    boundaries: Vec<f64>,
    unit_suffix: Option<String>,
    formatter: Option<LabelFormatter>,
}

impl BucketConfig {
    /// Create a layout from boundaries that must be finite and strictly ascending.
    ///
    /// An empty boundary list is allowed and yields no buckets.
    pub fn new(boundaries: impl Into<Vec<f64>>) -> Result<Self> {
        let boundaries = boundaries.into();

        if let Some(bad) = boundaries.iter().find(|b| !b.is_finite()) {
            return Err(Error::InvalidBuckets(format!(
                "boundary {} is not finite",
                bad
            )));
        }
        if let Some(pair) = boundaries.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(Error::InvalidBuckets(format!(
                "boundaries must be strictly ascending, found {} before {}",
                pair[0], pair[1]
            )));
        }

        Ok(Self {
            boundaries,
            unit_suffix: None,
            formatter: None,
        })
    }

    /// Append a unit to every auto-generated label (`"d"` gives `<7d`).
    pub fn with_unit_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.unit_suffix = Some(suffix.into());
        self
    }

    /// Replace auto-generated labels with a custom formatter.
    ///
    /// Labels must be distinct; buckets sharing a label share a count.
    pub fn with_label_formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(Option<f64>, Option<f64>) -> String + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// The configured boundaries.
    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    /// Labels for every bucket, lowest first.
    pub fn labels(&self) -> Vec<String> {
        let Some((&first, &last)) = self.boundaries.first().zip(self.boundaries.last()) else {
            return Vec::new();
        };

        let mut labels = Vec::with_capacity(self.boundaries.len() + 1);
        labels.push(self.label(None, Some(first)));
        for pair in self.boundaries.windows(2) {
            labels.push(self.label(Some(pair[0]), Some(pair[1])));
        }
        labels.push(self.label(Some(last), None));
        labels
    }

    fn label(&self, lower: Option<f64>, upper: Option<f64>) -> String {
        if let Some(formatter) = &self.formatter {
            return formatter(lower, upper);
        }

        let suffix = self.unit_suffix.as_deref().unwrap_or("");
        match (lower, upper) {
            (None, Some(upper)) => format!("<{}{}", format_number(upper), suffix),
            (Some(lower), Some(upper)) => format!(
                "{}-{}{}",
                format_number(lower),
                format_number(upper),
                suffix
            ),
            (Some(lower), None) => format!(">{}{}", format_number(lower), suffix),
            (None, None) => format!("all{}", suffix),
        }
    }

    /// Index of the bucket `value` falls in.
    fn bucket_index(&self, value: f64) -> usize {
        self.boundaries.partition_point(|&boundary| boundary <= value)
    }
}

impl fmt::Debug for BucketConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BucketConfig")
            .field("boundaries", &self.boundaries)
            .field("unit_suffix", &self.unit_suffix)
            .field("formatter", &self.formatter.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// Ease buckets in Anki's ratio form: `<2`, `2-2.5`, `2.5-3`, `>3`.
pub fn ease_buckets() -> BucketConfig {
    BucketConfig {
        boundaries: vec![2.0, 2.5, 3.0],
        unit_suffix: None,
        formatter: None,
    }
}

/// Interval buckets in days: `<1d`, `1-7d`, `7-21d`, `21-90d`, `90-365d`, `>365d`.
pub fn interval_buckets() -> BucketConfig {
    BucketConfig {
        boundaries: vec![1.0, 7.0, 21.0, 90.0, 365.0],
        unit_suffix: Some("d".to_string()),
        formatter: None,
    }
}

/// Render integral values without a decimal point, others to one decimal place.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

/// Histogram counts keyed by label, in bucket order.
///
/// Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Buckets {
    entries: Vec<(String, usize)>,
}

impl Buckets {
    /// Count for a label, if the label exists.
    pub fn get(&self, label: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, count)| *count)
    }

    /// Iterate over `(label, count)` pairs in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries
            .iter()
            .map(|(label, count)| (label.as_str(), *count))
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no buckets at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }
}

impl Serialize for Buckets {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(label, count)| (label, count)))
    }
}

/// Summary of a numeric sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DistributionMetrics {
    /// Arithmetic mean (0 for an empty sample).
    pub mean: f64,
    /// Middle value; average of the two middle values for even counts.
    pub median: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Number of values.
    pub count: usize,
    /// Histogram over the configured buckets.
    pub buckets: Buckets,
}

/// Compute summary statistics and a histogram for `sample`.
///
/// The sample is not modified; a sorted copy is used for the median and
/// extremes. Every configured bucket appears in the result, including empty
/// ones.
///
/// # Example
///
/// ```
/// use ankibridge_stats::stats::{BucketConfig, compute_distribution};
///
/// let config = BucketConfig::new(vec![10.0, 20.0, 30.0])?;
/// let metrics = compute_distribution(&[5.0, 10.0, 20.0, 30.0, 35.0], &config);
///
/// assert_eq!(metrics.median, 20.0);
/// assert_eq!(metrics.buckets.get("10-20"), Some(1));
/// assert_eq!(metrics.buckets.get(">30"), Some(2));
/// # Ok::<(), ankibridge_stats::Error>(())
/// ```
pub fn compute_distribution(sample: &[f64], config: &BucketConfig) -> DistributionMetrics {
    let labels = config.labels();

    // Slot per bucket index; labels that repeat share a slot.
    let mut entries: Vec<(String, usize)> = Vec::with_capacity(labels.len());
    let mut slots = Vec::with_capacity(labels.len());
    for label in labels {
        let slot = match entries.iter().position(|(existing, _)| *existing == label) {
            Some(slot) => slot,
            None => {
                entries.push((label, 0));
                entries.len() - 1
            }
        };
        slots.push(slot);
    }

    if !slots.is_empty() {
        for &value in sample {
            entries[slots[config.bucket_index(value)]].1 += 1;
        }
    }

    let buckets = Buckets { entries };

    if sample.is_empty() {
        return DistributionMetrics {
            buckets,
            ..Default::default()
        };
    }

    let mut sorted = sample.to_vec();
    sorted.sort_by(f64::total_cmp);

    let count = sorted.len();
    let mid = count / 2;
    let median = if count % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };

    DistributionMetrics {
        mean: sorted.iter().sum::<f64>() / count as f64,
        median,
        min: sorted[0],
        max: sorted[count - 1],
        count,
        buckets,
    }
}
