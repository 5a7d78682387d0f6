pub mod header;
pub mod variant;
pub mod variant_set;
pub mod variant_type;
pub mod zygosity;

// re-export for cleaner imports
pub use self::header::VcfHeader;
pub use self::variant::{InfoField, VariantRecord};
pub use self::variant_set::VariantSet;
pub use self::variant_type::VariantType;
pub use self::zygosity::{GenotypeCounts, Zygosity};
