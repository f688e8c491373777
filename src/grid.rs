//! One-dimensional density clustering of dot coordinates.
//!
//! Projects dot centres onto a single axis and groups them the way DBSCAN
//! would: a value is a core point when at least `min_samples` values
//! (itself included) lie within `radius`, cores within `radius` of each other
//! share a cluster, and non-core values join a cluster only if some core is in
//! reach. Anything left over is noise.

/// Result of clustering one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisClusters {
    /// Mean coordinate of each cluster, ascending.
    pub centers: Vec<f32>,
    /// Number of values that joined no cluster.
    pub noise: usize,
}

impl AxisClusters {
    /// Distinct labels produced, with all noise points sharing a single label.
    pub fn label_count(&self) -> usize {
        self.centers.len() + usize::from(self.noise > 0)
    }
}

pub fn cluster_axis(values: &[f32], radius: f32, min_samples: usize) -> AxisClusters {
    let mut vals: Vec<f32> = values.to_vec();
    vals.sort_by(|a, b| a.total_cmp(b));
    let n = vals.len();

    // Neighbour counts via a sliding window over the sorted values.
    let mut is_core = vec![false; n];
    let (mut lo, mut hi) = (0usize, 0usize);
    for i in 0..n {
        while vals[i] - vals[lo] > radius {
            lo += 1;
        }
        if hi < i {
            hi = i;
        }
        while hi + 1 < n && vals[hi + 1] - vals[i] <= radius {
            hi += 1;
        }
        is_core[i] = hi - lo + 1 >= min_samples;
    }

    // Consecutive cores within reach share a label.
    let mut label: Vec<Option<usize>> = vec![None; n];
    let mut clusters = 0usize;
    let mut last_core: Option<usize> = None;
    for i in (0..n).filter(|&i| is_core[i]) {
        match last_core {
            Some(j) if vals[i] - vals[j] <= radius => label[i] = label[j],
            _ => {
                label[i] = Some(clusters);
                clusters += 1;
            }
        }
        last_core = Some(i);
    }

    // Border values take the label of the nearest core in reach.
    for i in 0..n {
        if is_core[i] {
            continue;
        }
        let left = (0..i).rev().find(|&j| is_core[j]);
        let right = (i + 1..n).find(|&j| is_core[j]);
        let nearest = [left, right]
            .into_iter()
            .flatten()
            .filter(|&j| (vals[j] - vals[i]).abs() <= radius)
            .min_by(|&a, &b| {
                (vals[a] - vals[i])
                    .abs()
                    .total_cmp(&(vals[b] - vals[i]).abs())
            });
        label[i] = nearest.and_then(|j| label[j]);
    }

    let mut sums = vec![(0f32, 0usize); clusters];
    let mut noise = 0usize;
    for (v, l) in vals.iter().zip(&label) {
        match l {
            Some(c) => {
                sums[*c].0 += v;
                sums[*c].1 += 1;
            }
            None => noise += 1,
        }
    }

    AxisClusters {
        centers: sums.iter().map(|&(s, c)| s / c as f32).collect(),
        noise,
    }
}
