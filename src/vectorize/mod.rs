// Vectorization: turn normalized documents into a document-term matrix.

pub mod count;
