/// Estimates how long a text takes to read.
pub trait ReadTimeEstimator: Send + Sync {
    /// Human readable duration, e.g. `"3 min read"`.
    fn estimate(&self, text: &str) -> String;
}
