#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

// Always inside [0, width] x [0, height] of the image it was computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl NormalizedBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn to_pixel_rect(&self, image_width: u32, image_height: u32) -> PixelRect {
        let left = scale_to_extent(self.left, image_width);
        let top = scale_to_extent(self.top, image_height);
        let right = scale_to_extent(self.left + self.width, image_width).max(left);
        let bottom = scale_to_extent(self.top + self.height, image_height).max(top);

        PixelRect {
            left,
            top,
            right,
            bottom,
        }
    }
}

// Truncates toward zero, then clamps into [0, extent]. NaN lands on 0.
fn scale_to_extent(fraction: f64, extent: u32) -> u32 {
    let scaled = (fraction * f64::from(extent)).trunc();

    if scaled >= f64::from(extent) {
        extent
    } else if scaled > 0.0 {
        scaled as u32
    } else {
        0
    }
}

impl PixelRect {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub label: String,
    pub confidence: f64,
    pub bounding_box: NormalizedBox,
}

impl Detection {
    pub fn new(label: impl Into<String>, confidence: f64, bounding_box: NormalizedBox) -> Self {
        Self {
            label: label.into(),
            confidence,
            bounding_box,
        }
    }

    pub fn exceeds_threshold(&self, threshold: f64) -> bool {
        self.confidence > threshold
    }
}
