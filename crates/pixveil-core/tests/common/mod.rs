#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

/// Noisy carrier, every pixel differs from its neighbours
pub fn textured_image(width: u32, height: u32, seed: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let v = x.wrapping_mul(2_654_435_761) ^ y.wrapping_mul(40_503) ^ seed.wrapping_mul(97);
        Rgb([(v >> 3) as u8, (v >> 11) as u8, (v >> 19) as u8])
    })
}

/// Flat background with one bright rectangle, edges only along its border
pub fn rectangle_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let inside = (width / 4..width * 3 / 4).contains(&x)
            && (height / 4..height * 3 / 4).contains(&y);
        if inside {
            Rgb([230, 220, 210])
        } else {
            Rgb([20, 30, 40])
        }
    })
}

pub fn checkerboard_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        if (x / 4 + y / 4) % 2 == 0 {
            Rgb([25, 35, 45])
        } else {
            Rgb([225, 215, 205])
        }
    })
}

/// Checkerboard with its blocks moved by `shift` pixels, so every frame differs
pub fn shifted_checkerboard(width: u32, height: u32, shift: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        if ((x + shift) / 4 + (y + shift) / 4) % 2 == 0 {
            Rgb([25, 35, 45])
        } else {
            Rgb([225, 215, 205])
        }
    })
}

pub fn flat_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([128, 128, 128]))
}

pub fn save(image: &RgbImage, path: &Path) -> PathBuf {
    image.save(path).expect("cannot write carrier");
    path.to_path_buf()
}

pub fn payload(len: usize) -> Vec<u8> {
    (0..len)
        .map(|i| (i.wrapping_mul(7919) >> 3) as u8)
        .collect()
}

pub fn write_payload(dir: &Path, name: &str, len: usize) -> (PathBuf, Vec<u8>) {
    let data = payload(len);
    let path = dir.join(name);
    fs::write(&path, &data).expect("cannot write payload");
    (path, data)
}
