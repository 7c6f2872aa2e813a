mod annotator;
mod image_codec;

pub use annotator::DetectionAnnotator;
pub use image_codec::{crop_region, encode_data_url, encode_jpeg_bytes};
