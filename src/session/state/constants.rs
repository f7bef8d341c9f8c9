use std::time::Duration;

/// Fixed audio timestep: the sync table's time axis, in milliseconds.
pub(crate) const TIMESTEP_MS: u64 = 20;
/// Mapper tick period; one timestep of virtual time per tick at rate 1.0.
pub(crate) const TICK: Duration = Duration::from_millis(TIMESTEP_MS);
