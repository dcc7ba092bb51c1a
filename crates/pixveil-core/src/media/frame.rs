use image::{Rgb, RgbImage};

/// Samples per pixel
pub const CHANNELS: usize = 3;

/// Index of a channel inside a pixel, in storage order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Blue = 0,
    Green = 1,
    Red = 2,
}

impl Channel {
    pub const ALL: [Channel; CHANNELS] = [Channel::Blue, Channel::Green, Channel::Red];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// A raster frame of 8-bit samples, stored row-major with the channels of a pixel in B,G,R order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    samples: Vec<u8>,
}

impl Frame {
    /// A black frame
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            samples: vec![0; width * height * CHANNELS],
        }
    }

    /// Builds a frame from raw B,G,R samples, `None` if the length does not match the dimensions
    pub fn from_bgr(width: usize, height: usize, samples: Vec<u8>) -> Option<Self> {
        (samples.len() == width * height * CHANNELS).then_some(Self {
            width,
            height,
            samples,
        })
    }

    /// Builds a frame by asking `f` for the `[b, g, r]` samples of every pixel `(x, y)`
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> [u8; CHANNELS],
    {
        let mut samples = Vec::with_capacity(width * height * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                samples.extend_from_slice(&f(x, y));
            }
        }
        Self {
            width,
            height,
            samples,
        }
    }

    pub fn from_rgb_image(image: &RgbImage) -> Self {
        let (width, height) = image.dimensions();
        let mut samples = Vec::with_capacity(image.as_raw().len());
        for Rgb([r, g, b]) in image.pixels() {
            samples.extend_from_slice(&[*b, *g, *r]);
        }
        Self {
            width: width as usize,
            height: height as usize,
            samples,
        }
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let [b, g, r] = self.pixel(x as usize, y as usize);
            Rgb([r, g, b])
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Channel bytes per row
    pub fn row_stride(&self) -> usize {
        self.width * CHANNELS
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// The `[b, g, r]` samples of the pixel at `(x, y)`
    pub fn pixel(&self, x: usize, y: usize) -> [u8; CHANNELS] {
        let start = (y * self.width + x) * CHANNELS;
        [
            self.samples[start],
            self.samples[start + 1],
            self.samples[start + 2],
        ]
    }

    /// Channel byte `column` of `row`, where column counts bytes and not pixels
    pub fn sample(&self, row: usize, column: usize) -> u8 {
        self.samples[row * self.row_stride() + column]
    }

    pub fn sample_mut(&mut self, row: usize, column: usize) -> &mut u8 {
        let stride = self.row_stride();
        &mut self.samples[row * stride + column]
    }

    /// Copies every channel into its own plane
    pub fn split_planes(&self) -> [Plane; CHANNELS] {
        Channel::ALL.map(|channel| Plane {
            width: self.width,
            height: self.height,
            samples: self
                .samples
                .iter()
                .skip(channel.index())
                .step_by(CHANNELS)
                .copied()
                .collect(),
        })
    }

    /// Writes the planes back, the inverse of [`Frame::split_planes`]
    pub fn merge_planes(&mut self, planes: &[Plane; CHANNELS]) {
        for (channel, plane) in planes.iter().enumerate() {
            debug_assert_eq!(plane.samples.len(), self.pixel_count());
            for (pixel, sample) in plane.samples.iter().enumerate() {
                self.samples[pixel * CHANNELS + channel] = *sample;
            }
        }
    }
}

/// One channel of a [`Frame`], owned separately from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane {
    width: usize,
    height: usize,
    samples: Vec<u8>,
}

impl Plane {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, column: usize) -> u8 {
        self.samples[row * self.width + column]
    }

    /// The samples at `column` and `column + 1`
    pub fn pair(&self, row: usize, column: usize) -> (u8, u8) {
        let start = row * self.width + column;
        (self.samples[start], self.samples[start + 1])
    }

    pub fn set_pair(&mut self, row: usize, column: usize, (first, second): (u8, u8)) {
        let start = row * self.width + column;
        self.samples[start] = first;
        self.samples[start + 1] = second;
    }
}
