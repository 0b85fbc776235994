//! Horizontal region classification for pointer input.
//!
//! The window is split into three equal columns: the reference artwork and
//! instructions on the left, the shared drawing surface in the middle, and the
//! collaborator's complete rendition on the right. Only the middle column
//! accepts drawing input.

use serde::{Deserialize, Serialize};

/// One of three equal horizontal thirds of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Left,
    Middle,
    Right,
}

/// Classifies a horizontal coordinate into a region.
///
/// The intervals are `[0, W/3)`, `[W/3, 2W/3)` and `[2W/3, W]`; a coordinate
/// exactly on a divider belongs to the region on its right. Coordinates outside
/// the window still map to the nearest outer region.
pub fn classify(x: f64, total_width: f64) -> Region {
    let third = total_width / 3.0;
    if x < third {
        Region::Left
    } else if x < third * 2.0 {
        Region::Middle
    } else {
        Region::Right
    }
}

/// Returns whether drawing input in `region` should be processed.
pub fn gate(region: Region) -> bool {
    region == Region::Middle
}
