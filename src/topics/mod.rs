// Topic post-processing: model seam, top-word selection, word/weight
// linking, and representative documents.

pub mod linking;
pub mod precomputed;
pub mod representative;
pub mod selection;
pub mod traits;
