// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Minimal layout rasterizer
//!
//! Rooms are filled with flat per-kind colours on a white page. The outer
//! boundary is the union of all rooms, morphologically closed until it forms
//! one solid shape, drawn as a black band along its edge. Unassigned space
//! enclosed by that band stays white and is what the detector picks up as the
//! living room.

use crate::contour_ops::external_contours;
use crate::image_ops::{erode, morphological_close};
use floorgen_layout::{FloorBounds, Layout, Rect, RoomKind};
use image::{imageops, GrayImage, Luma, Rgb, RgbImage};
use imageproc::contours::{find_contours, BorderType};
use imageproc::drawing::draw_filled_rect_mut;
use serde::{Deserialize, Serialize};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Room fill colours, none of them near-white
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Palette {
    pub garage: [u8; 3],
    pub kitchen: [u8; 3],
    pub bedroom: [u8; 3],
    pub washroom: [u8; 3],
    pub storage: [u8; 3],
    pub study: [u8; 3],
    pub balcony: [u8; 3],
    pub other: [u8; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            garage: [173, 216, 230],  // lightblue
            kitchen: [144, 238, 144], // lightgreen
            bedroom: [240, 128, 128], // lightcoral
            washroom: [255, 255, 0],  // yellow
            storage: [255, 192, 203], // pink
            study: [238, 130, 238],   // violet
            balcony: [255, 165, 0],   // orange
            other: [128, 128, 128],
        }
    }
}

impl Palette {
    pub fn color(&self, kind: &RoomKind) -> Rgb<u8> {
        Rgb(match kind {
            RoomKind::Garage => self.garage,
            RoomKind::Kitchen => self.kitchen,
            RoomKind::Bedroom => self.bedroom,
            RoomKind::Washroom => self.washroom,
            RoomKind::Storage => self.storage,
            RoomKind::Study => self.study,
            RoomKind::Balcony => self.balcony,
            RoomKind::Other(_) => self.other,
        })
    }
}

/// Rasterizer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Pixels per layout unit
    pub pixels_per_unit: u32,
    /// Blank border around the floor, in pixels
    pub margin: u32,
    /// Width of the black boundary band, in pixels
    pub boundary_width: u8,
    /// Largest closing radius tried when fusing rooms, in layout units
    pub max_closing_units: u32,
    pub palette: Palette,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pixels_per_unit: 20,
            margin: 10,
            boundary_width: 4,
            max_closing_units: 10,
            palette: Palette::default(),
        }
    }
}

impl RenderConfig {
    fn to_px(&self, units: f64) -> i32 {
        (units * self.pixels_per_unit as f64).round() as i32
    }

    /// Pixel rectangle of a room, `None` when it rounds to nothing
    fn room_px(&self, rect: &Rect) -> Option<imageproc::rect::Rect> {
        let x0 = self.margin as i32 + self.to_px(rect.x);
        let y0 = self.margin as i32 + self.to_px(rect.y);
        let x1 = self.margin as i32 + self.to_px(rect.right());
        let y1 = self.margin as i32 + self.to_px(rect.bottom());
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(imageproc::rect::Rect::at(x0, y0).of_size((x1 - x0) as u32, (y1 - y0) as u32))
    }
}

/// True when the mask is one solid shape without holes
fn is_solid(mask: &GrayImage) -> bool {
    let contours = find_contours::<i32>(mask);
    let outer = contours
        .iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .count();
    let holes = contours
        .iter()
        .any(|c| c.border_type == BorderType::Hole);
    outer == 1 && !holes
}

/// Close the room mask with growing radii until it is solid
///
/// The mask is padded so dilation never runs into the image edge. Falls back
/// to the largest radius tried when no radius fuses the rooms.
fn fuse_rooms(occupancy: &GrayImage, config: &RenderConfig) -> GrayImage {
    if is_solid(occupancy) {
        return occupancy.clone();
    }

    let (width, height) = occupancy.dimensions();
    let pad = (config.max_closing_units * config.pixels_per_unit).min(u8::MAX as u32) + 1;
    let mut padded = GrayImage::new(width + 2 * pad, height + 2 * pad);
    imageops::replace(&mut padded, occupancy, pad as i64, pad as i64);

    let mut fused = padded.clone();
    for units in 1..=config.max_closing_units {
        let radius = (units * config.pixels_per_unit).min(u8::MAX as u32) as u8;
        fused = morphological_close(&padded, radius);
        if is_solid(&fused) {
            tracing::trace!(units, "Rooms fused");
            break;
        }
        if radius == u8::MAX {
            break;
        }
    }

    let fused = imageops::crop_imm(&fused, pad, pad, width, height).to_image();
    if !is_solid(&fused) {
        tracing::debug!(
            parts = external_contours(&fused).len(),
            "Rooms did not fuse into one boundary"
        );
    }
    fused
}

/// Render a layout onto a white canvas
pub fn render_layout(layout: &Layout, bounds: FloorBounds, config: &RenderConfig) -> RgbImage {
    let width = 2 * config.margin + config.to_px(bounds.width).max(0) as u32;
    let height = 2 * config.margin + config.to_px(bounds.height).max(0) as u32;
    let mut canvas = RgbImage::from_pixel(width, height, WHITE);
    let mut occupancy = GrayImage::new(width, height);

    for (id, rect) in layout.iter() {
        let Some(px) = config.room_px(rect) else {
            continue;
        };
        draw_filled_rect_mut(&mut canvas, px, config.palette.color(&id.kind));
        draw_filled_rect_mut(&mut occupancy, px, Luma([255]));
    }

    if layout.is_empty() {
        return canvas;
    }

    let fused = fuse_rooms(&occupancy, config);
    let interior = erode(&fused, config.boundary_width);
    for (x, y, pixel) in fused.enumerate_pixels() {
        if pixel[0] > 0 && interior.get_pixel(x, y)[0] == 0 {
            canvas.put_pixel(x, y, BLACK);
        }
    }

    canvas
}
