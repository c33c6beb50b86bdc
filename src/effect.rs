//! Effects - side effects declared by the reducer

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Look up the current temperature for `city`; the outcome is tagged
    /// with `request_id` so superseded lookups can be discarded
    FetchTemperature { city: String, request_id: u64 },
}
