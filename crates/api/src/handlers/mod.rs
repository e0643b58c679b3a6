pub mod destinations;
pub mod geocode;
