/// Classification for how the refresh loop reacts to a failed fetch.
///
/// # Behavior Summary
///
/// | Class | Record failure on every asset? | Suspend the periodic trigger? |
/// |-------|-------------------------------|-------------------------------|
/// | `NextCycle` | Yes | No |
/// | `Backoff` | Yes | Yes, for the backoff window |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Try again on the next regular tick.
    ///
    /// Used for transport failures, timeouts, non-2xx statuses and
    /// undecodable bodies. The failure is recorded against every tracked
    /// asset but the schedule is left alone.
    NextCycle,

    /// The provider asked us to slow down (HTTP 429).
    ///
    /// The periodic trigger is suspended for the backoff window so that
    /// further requests do not compound the rate-limit violation.
    Backoff,
}
