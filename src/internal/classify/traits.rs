pub mod type_classifier;

pub use type_classifier::TypeClassifier;
