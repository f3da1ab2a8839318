pub mod detected_type;
pub mod signature_classifier;
pub mod type_descriptor;

pub use detected_type::DetectedType;
pub use signature_classifier::SignatureClassifier;
pub use type_descriptor::TypeDescriptor;
