pub mod suffix_registry;

pub use suffix_registry::SuffixRegistry;
