// Text classification primitives: TF-IDF features and a random forest.
// Both are CPU-bound to fit; callers run fitting inside tokio::task::spawn_blocking.

pub mod forest;
pub mod tfidf;
