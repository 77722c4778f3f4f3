//! Capture metrics emitted while a closure runs.

use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshot};

/// Run `f` with a thread-local debugging recorder installed.
///
/// Async code must be driven to completion inside `f` on the current thread
/// for its metrics to be captured.
pub fn with_recorder<T>(f: impl FnOnce() -> T) -> (T, Snapshot) {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    let out = metrics::with_local_recorder(&recorder, f);
    (out, snapshotter.snapshot())
}

/// Sum of counter `name` whose labels include every pair in `labels`.
pub fn counter_value(snapshot: Snapshot, name: &str, labels: &[(&str, &str)]) -> u64 {
    snapshot
        .into_vec()
        .into_iter()
        .filter(|(key, _, _, _)| {
            key.key().name() == name
                && labels.iter().all(|(k, v)| {
                    key.key()
                        .labels()
                        .any(|label| label.key() == *k && label.value() == *v)
                })
        })
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(count) => count,
            _ => 0,
        })
        .sum()
}
