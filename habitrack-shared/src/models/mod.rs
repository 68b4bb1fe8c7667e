/// Data models for Habitrack
///
/// Plain records owned by a user. Persistence lives behind the
/// [`Store`](crate::store::Store) trait.
///
/// # Models
///
/// - `habit`: habits the user tracks
/// - `todo`: todo items with a completion flag
/// - `timer_settings`: per-user Pomodoro durations (upsert only)
///
/// # Example
///
/// ```
/// use habitrack_shared::models::habit::{CreateHabit, Habit};
///
/// let habit = Habit::new("user_123", CreateHabit {
///     name: "Drink water".to_string(),
///     description: None,
/// });
/// assert_eq!(habit.user_id, "user_123");
/// ```

pub mod habit;
pub mod timer_settings;
pub mod todo;

use serde::{Deserialize, Deserializer};

/// Deserializes a present field (including `null`) as `Some`
///
/// Paired with `#[serde(default)]` so a missing field stays `None` and an
/// explicit `null` becomes `Some(None)`.
pub(crate) fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
