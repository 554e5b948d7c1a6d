//! Preview overlay for the interactive cropper.
//!
//! Recomputed from the region on every redraw; nothing is drawn here, the
//! host renders the rectangles however it likes.

use serde::Serialize;

use super::CropRegion;

/// An axis-aligned rectangle in display space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlayRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// What the preview should draw for a crop region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropOverlay {
    /// The selected area, drawn unshaded with a border.
    pub selection: OverlayRect,
    /// Dimmed bands covering everything outside the selection (top, bottom,
    /// left, right; empty bands are omitted).
    pub shaded: Vec<OverlayRect>,
    /// Corner resize handles: top-left, top-right, bottom-right, bottom-left.
    pub handles: [(f64, f64); 4],
}

pub fn overlay(region: &CropRegion) -> CropOverlay {
    let (dw, dh) = (region.display.width, region.display.height);
    let right = region.x + region.width;
    let bottom = region.y + region.height;

    let bands = [
        OverlayRect {
            x: 0.0,
            y: 0.0,
            width: dw,
            height: region.y,
        },
        OverlayRect {
            x: 0.0,
            y: bottom,
            width: dw,
            height: dh - bottom,
        },
        OverlayRect {
            x: 0.0,
            y: region.y,
            width: region.x,
            height: region.height,
        },
        OverlayRect {
            x: right,
            y: region.y,
            width: dw - right,
            height: region.height,
        },
    ];

    CropOverlay {
        selection: OverlayRect {
            x: region.x,
            y: region.y,
            width: region.width,
            height: region.height,
        },
        shaded: bands
            .into_iter()
            .filter(|r| r.width > 0.0 && r.height > 0.0)
            .collect(),
        handles: [
            (region.x, region.y),
            (right, region.y),
            (right, bottom),
            (region.x, bottom),
        ],
    }
}
