#[cfg(feature = "c001")]
pub mod weighted_path;
#[cfg(feature = "c001")]
pub use weighted_path as c001;
