use ordered_float::OrderedFloat;

/// Median of `values`, reordering the slice in place.
/// For an even count this is the mean of the two middle elements.
pub fn median(values: &mut [f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    let odd = values.len() % 2 == 1;
    let mid = values.len() / 2;
    let (lower, &mut upper, _) = values.select_nth_unstable_by_key(mid, |v| OrderedFloat(*v));
    if odd {
        return Some(upper);
    }
    // `lower` holds every element ranked below `mid`, its maximum is the other middle element.
    let below = match lower.iter().copied().map(OrderedFloat).max() {
        Some(OrderedFloat(v)) => v,
        None => upper,
    };
    Some(((below as f64 + upper as f64) / 2.0) as f32)
}
