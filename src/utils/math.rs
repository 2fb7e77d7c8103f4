use std::cmp::Ordering;

#[inline]
fn median_of_three_index<T: Ord + Copy>(data: &[T], low: usize, mid: usize, high: usize) -> usize {
    let (a, b, c) = (data[low], data[mid], data[high]);
    if (a <= b && b <= c) || (c <= b && b <= a) {
        mid
    } else if (b <= a && a <= c) || (c <= a && a <= b) {
        low
    } else {
        high
    }
}

/// Partition data in-place using Lomuto scheme
fn partition_inplace<T: Ord + Copy>(data: &mut [T], low: usize, high: usize) -> usize {
    if low >= high {
        return low;
    }
    let mid = low + (high - low) / 2;
    let pivot_index = median_of_three_index(data, low, mid, high);
    data.swap(pivot_index, high);
    let pivot_value = data[high];

    let mut boundary = low;
    for j in low..high {
        if data[j] <= pivot_value {
            data.swap(boundary, j);
            boundary += 1;
        }
    }
    data.swap(boundary, high);
    boundary
}

// Iterative quickselect with a median-of-three pivot
fn select_inplace<T: Ord + Copy>(data: &mut [T], k: usize) -> Option<T> {
    if data.is_empty() || k >= data.len() {
        return None;
    }

    let mut low = 0;
    let mut high = data.len() - 1;
    loop {
        if low == high {
            return if low == k { Some(data[low]) } else { None };
        }
        let pivot_index = partition_inplace(data, low, high);
        match pivot_index.cmp(&k) {
            Ordering::Equal => return Some(data[k]),
            Ordering::Greater => {
                if pivot_index == 0 {
                    return None;
                }
                high = pivot_index - 1;
            }
            Ordering::Less => low = pivot_index + 1,
        }
        if low > high {
            return None;
        }
    }
}

/// Median of integer counts; the mean of the two central values for even lengths.
pub fn median<T>(data: &[T]) -> Option<f64>
where
    T: Ord + Copy + Into<f64>,
{
    let size = data.len();
    if size == 0 {
        return None;
    }
    let mut data_copy = data.to_vec();
    if size % 2 == 0 {
        let k1 = size / 2 - 1;
        let fst = select_inplace(&mut data_copy, k1)?;
        // After selecting k1 everything right of it is >= fst
        let snd = *data_copy[size / 2..].iter().min()?;
        Some((fst.into() + snd.into()) / 2.0)
    } else {
        select_inplace(&mut data_copy, size / 2).map(Into::into)
    }
}

/// Sorts ascending; NaNs are ordered after every number.
pub fn sort_floats(values: &mut [f64]) {
    values.sort_by(|a, b| a.total_cmp(b));
}

/// Linear-interpolated percentile of an ascending slice at normalized rank `rank` in [0, 1].
pub fn percentile(sorted: &[f64], rank: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&rank) {
        return None;
    }
    let position = (sorted.len() - 1) as f64 * rank;
    let lower = position.floor() as usize;
    let fraction = position - lower as f64;
    let value = match sorted.get(lower + 1) {
        Some(&upper) if fraction > 0.0 => sorted[lower] + (upper - sorted[lower]) * fraction,
        _ => sorted[lower],
    };
    Some(value)
}
