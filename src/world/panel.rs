//! Panels - the editable wall sections of a grid
//!
//! Every cell (x, y) owns two panels: a horizontal one running to the next
//! column and a vertical one running to the next row. Panels are stored in a
//! flat vector, cell-major and row-major, horizontal before vertical.
//! Panels on the right column (horizontal) or bottom row (vertical) have no
//! pillar to connect to; they are placeholders and always stay `None`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::LayoutError;

/// Fill color of an empty section
pub const NONE_COLOR: u32 = 0xFFFFFF;
/// Fill color of a wall
pub const WALL_COLOR: u32 = 0x000000;
/// Fill color of a door
pub const DOOR_COLOR: u32 = 0xFF0000;
/// Fill color of a window
pub const WINDOW_COLOR: u32 = 0x00FF00;
/// Fill color of pillars (not a panel state)
pub const PILLAR_COLOR: u32 = 0x777777;

/// What occupies a wall section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanelState {
    #[default]
    None,
    Wall,
    Door,
    Window,
}

impl PanelState {
    /// Cycle order used by clicks
    pub const ALL: [PanelState; 4] = [
        PanelState::None,
        PanelState::Wall,
        PanelState::Door,
        PanelState::Window,
    ];

    /// Next state in the click cycle, wrapping after `Window`
    pub fn cycle(self) -> Self {
        match self {
            PanelState::None => PanelState::Wall,
            PanelState::Wall => PanelState::Door,
            PanelState::Door => PanelState::Window,
            PanelState::Window => PanelState::None,
        }
    }

    /// Name used on the wire (`type` field)
    pub fn name(self) -> &'static str {
        match self {
            PanelState::None => "None",
            PanelState::Wall => "Wall",
            PanelState::Door => "Door",
            PanelState::Window => "Window",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, LayoutError> {
        Self::ALL
            .into_iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| LayoutError::UnknownState(name.to_string()))
    }

    /// Canonical fill color as 0xRRGGBB
    pub fn color(self) -> u32 {
        match self {
            PanelState::None => NONE_COLOR,
            PanelState::Wall => WALL_COLOR,
            PanelState::Door => DOOR_COLOR,
            PanelState::Window => WINDOW_COLOR,
        }
    }

    pub fn from_color(color: u32) -> Result<Self, LayoutError> {
        Self::ALL
            .into_iter()
            .find(|s| s.color() == color)
            .ok_or(LayoutError::UnknownColor(color))
    }

    pub fn is_none(self) -> bool {
        self == PanelState::None
    }
}

impl fmt::Display for PanelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PanelState {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Flat index of the panel at (x, y) in a grid `width` cells wide
pub fn panel_index(width: usize, x: usize, y: usize, horizontal: bool) -> usize {
    (x + y * width) * 2 + if horizontal { 0 } else { 1 }
}

/// Whether the panel connects two pillars (and can therefore be clicked)
pub fn is_interior(width: usize, height: usize, x: usize, y: usize, horizontal: bool) -> bool {
    if horizontal {
        x + 1 < width && y < height
    } else {
        y + 1 < height && x < width
    }
}

/// One wall section of the in-memory grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
    pub x: usize,
    pub y: usize,
    pub horizontal: bool,
    pub state: PanelState,
}

impl Panel {
    pub fn new(x: usize, y: usize, horizontal: bool) -> Self {
        Self {
            x,
            y,
            horizontal,
            state: PanelState::None,
        }
    }

    pub fn to_saved(&self) -> SavedPanel {
        SavedPanel {
            x: self.x,
            y: self.y,
            horizontal: self.horizontal,
            state: self.state,
        }
    }
}

/// Panel entry as persisted in a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SavedPanel {
    pub x: usize,
    pub y: usize,
    pub horizontal: bool,
    #[serde(rename = "type")]
    pub state: PanelState,
}

/// Allocate the full panel list for a grid, every panel `None`
pub fn empty_panels(width: usize, height: usize) -> Vec<Panel> {
    let mut panels = Vec::with_capacity(2 * width * height);
    for y in 0..height {
        for x in 0..width {
            panels.push(Panel::new(x, y, true));
            panels.push(Panel::new(x, y, false));
        }
    }
    panels
}

/// Keep only non-`None` panels, in grid order
pub fn serialize_panels(panels: &[Panel]) -> Vec<SavedPanel> {
    panels
        .iter()
        .filter(|p| !p.state.is_none())
        .map(Panel::to_saved)
        .collect()
}

/// Rebuild the full panel list of a `width × height` grid from saved entries.
///
/// Entries outside the grid or on placeholder positions are rejected rather
/// than silently dropped. A later entry for the same panel wins.
pub fn deserialize_panels(
    width: usize,
    height: usize,
    saved: &[SavedPanel],
) -> Result<Vec<Panel>, LayoutError> {
    let mut panels = empty_panels(width, height);
    for entry in saved {
        if entry.x >= width || entry.y >= height {
            return Err(LayoutError::PanelOutOfBounds {
                x: entry.x,
                y: entry.y,
                width,
                height,
            });
        }
        if !is_interior(width, height, entry.x, entry.y, entry.horizontal) {
            if entry.state.is_none() {
                continue;
            }
            return Err(LayoutError::PlaceholderPanel {
                x: entry.x,
                y: entry.y,
                horizontal: entry.horizontal,
            });
        }
        let index = panel_index(width, entry.x, entry.y, entry.horizontal);
        panels[index].state = entry.state;
    }
    Ok(panels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_cycle_order() {
        assert_eq!(PanelState::None.cycle(), PanelState::Wall);
        assert_eq!(PanelState::Wall.cycle(), PanelState::Door);
        assert_eq!(PanelState::Door.cycle(), PanelState::Window);
        assert_eq!(PanelState::Window.cycle(), PanelState::None);
    }

    #[test]
    fn test_cycle_is_bijection_with_period_four() {
        let images: HashSet<_> = PanelState::ALL.iter().map(|s| s.cycle()).collect();
        assert_eq!(images.len(), 4);
        for s in PanelState::ALL {
            assert_ne!(s.cycle(), s);
            assert_eq!(s.cycle().cycle().cycle().cycle(), s);
        }
    }

    #[test]
    fn test_color_round_trip() {
        for s in PanelState::ALL {
            assert_eq!(PanelState::from_color(s.color()).unwrap(), s);
        }
        assert_eq!(
            PanelState::from_color(PILLAR_COLOR),
            Err(LayoutError::UnknownColor(PILLAR_COLOR))
        );
    }

    #[test]
    fn test_unknown_state_name() {
        assert_eq!("Door".parse::<PanelState>().unwrap(), PanelState::Door);
        assert!(matches!(
            "Roof".parse::<PanelState>(),
            Err(LayoutError::UnknownState(name)) if name == "Roof"
        ));
    }

    #[test]
    fn test_saved_panel_wire_format() {
        let panel = SavedPanel { x: 0, y: 0, horizontal: true, state: PanelState::Wall };
        let json = serde_json::to_value(panel).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"x": 0, "y": 0, "horizontal": true, "type": "Wall"})
        );
        let bad = r#"{"x":0,"y":0,"horizontal":true,"type":"Roof"}"#;
        assert!(serde_json::from_str::<SavedPanel>(bad).is_err());
    }

    #[test]
    fn test_empty_deserialize() {
        let panels = deserialize_panels(5, 4, &[]).unwrap();
        assert_eq!(panels.len(), 40);
        assert!(panels.iter().all(|p| p.state.is_none()));
        for (i, p) in panels.iter().enumerate() {
            assert_eq!(panel_index(5, p.x, p.y, p.horizontal), i);
        }
    }

    #[test]
    fn test_deserialize_rejects_out_of_bounds() {
        let saved = [SavedPanel { x: 3, y: 0, horizontal: false, state: PanelState::Wall }];
        assert_eq!(
            deserialize_panels(3, 3, &saved),
            Err(LayoutError::PanelOutOfBounds { x: 3, y: 0, width: 3, height: 3 })
        );
    }

    #[test]
    fn test_deserialize_rejects_placeholder_walls() {
        let saved = [SavedPanel { x: 2, y: 0, horizontal: true, state: PanelState::Door }];
        assert_eq!(
            deserialize_panels(3, 3, &saved),
            Err(LayoutError::PlaceholderPanel { x: 2, y: 0, horizontal: true })
        );
        // Explicit None on a placeholder carries no wall and is tolerated
        let saved = [SavedPanel { x: 2, y: 0, horizontal: true, state: PanelState::None }];
        assert!(deserialize_panels(3, 3, &saved).is_ok());
    }

    #[test]
    fn test_serialize_keeps_only_set_panels() {
        let mut panels = empty_panels(3, 3);
        panels[panel_index(3, 0, 0, true)].state = PanelState::Wall;
        let saved = serialize_panels(&panels);
        assert_eq!(
            saved,
            vec![SavedPanel { x: 0, y: 0, horizontal: true, state: PanelState::Wall }]
        );
    }

    fn interior_panel(w: usize, h: usize) -> impl Strategy<Value = SavedPanel> {
        (0..w, 0..h, any::<bool>(), 0..4usize)
            .prop_filter("placeholder", move |&(x, y, horizontal, _)| {
                is_interior(w, h, x, y, horizontal)
            })
            .prop_map(|(x, y, horizontal, s)| SavedPanel {
                x,
                y,
                horizontal,
                state: PanelState::ALL[s],
            })
    }

    fn grid_with_panels() -> impl Strategy<Value = (usize, usize, Vec<SavedPanel>)> {
        (2..10usize, 2..10usize).prop_flat_map(|(w, h)| {
            (Just(w), Just(h), prop::collection::vec(interior_panel(w, h), 0..30))
        })
    }

    proptest! {
        #[test]
        fn prop_index_unique_and_in_range(w in 1..20usize, h in 1..20usize) {
            let mut seen = HashSet::new();
            for y in 0..h {
                for x in 0..w {
                    for horizontal in [true, false] {
                        let i = panel_index(w, x, y, horizontal);
                        prop_assert!(i < 2 * w * h);
                        prop_assert!(seen.insert(i));
                    }
                }
            }
        }

        #[test]
        fn prop_serialize_inverts_deserialize((w, h, saved) in grid_with_panels()) {
            // Last write wins for duplicate positions
            let mut expected = std::collections::HashMap::new();
            for p in &saved {
                expected.insert((p.x, p.y, p.horizontal), p.state);
            }
            let expected: HashSet<SavedPanel> = expected
                .into_iter()
                .filter(|(_, s)| !s.is_none())
                .map(|((x, y, horizontal), state)| SavedPanel { x, y, horizontal, state })
                .collect();

            let panels = deserialize_panels(w, h, &saved).unwrap();
            prop_assert_eq!(panels.len(), 2 * w * h);
            let round_trip: HashSet<SavedPanel> = serialize_panels(&panels).into_iter().collect();
            prop_assert_eq!(round_trip, expected);
        }
    }
}
