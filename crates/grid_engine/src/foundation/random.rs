//! Random helpers for gameplay code

use crate::scene::SceneError;
use rand::Rng;

/// Pick a random element, `None` for an empty slice
pub fn random_element<T>(items: &[T]) -> Option<&T> {
    if items.is_empty() {
        return None;
    }
    let index = rand::thread_rng().gen_range(0..items.len());
    items.get(index)
}

/// Random integer in `[min, max)`
pub fn random_in_range(min: i32, max: i32) -> Result<i32, SceneError> {
    if min >= max {
        return Err(SceneError::InvalidArgument(format!(
            "empty range: min {min} must be lower than max {max}"
        )));
    }
    Ok(rand::thread_rng().gen_range(min..max))
}
