// Resume trait classification.
// Implements: keyword labelling of the training set, dataset preparation,
// the tip catalog, the prediction service and its HTTP handlers.
// The TF-IDF + forest primitives live in `crate::ml`.

pub mod dataset;
pub mod handlers;
pub mod labeler;
pub mod predictor;
pub mod taxonomy;
pub mod tips;
pub mod views;
