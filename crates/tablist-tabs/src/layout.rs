//! Responsive Layout Resolver
//!
//! Turns the measured width and two breakpoints into the `vertical` and
//! `icons_only` presentation flags.

use serde::{Deserialize, Serialize};

use crate::error::TabsError;
use crate::registry::TabRegistry;

/// A width threshold for one layout switch.
///
/// Serialized as an optional integer: `null`/`0` is `Unset`, any negative
/// value (canonically `-1`) is `Forced`, a positive value is `Width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<i64>", into = "Option<i64>")]
pub enum Breakpoint {
    /// Feature off: always horizontal / always icon with label
    #[default]
    Unset,
    /// Alternate mode regardless of width
    Forced,
    Width(u32),
}

impl From<Option<i64>> for Breakpoint {
    fn from(value: Option<i64>) -> Self {
        match value {
            None | Some(0) => Breakpoint::Unset,
            Some(n) if n < 0 => Breakpoint::Forced,
            Some(n) => Breakpoint::Width(u32::try_from(n).unwrap_or(u32::MAX)),
        }
    }
}

impl From<Breakpoint> for Option<i64> {
    fn from(value: Breakpoint) -> Self {
        match value {
            Breakpoint::Unset => None,
            Breakpoint::Forced => Some(-1),
            Breakpoint::Width(w) => Some(i64::from(w)),
        }
    }
}

impl std::str::FromStr for Breakpoint {
    type Err = TabsError;

    /// Parses attribute text such as `"600"`, `"-1"` or `""`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Breakpoint::Unset);
        }
        s.parse::<i64>()
            .map(|n| Breakpoint::from(Some(n)))
            .map_err(|_| TabsError::InvalidBreakpoint(s.to_string()))
    }
}

impl std::fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Breakpoint::Unset => Ok(()),
            Breakpoint::Forced => write!(f, "-1"),
            Breakpoint::Width(w) => write!(f, "{}", w),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutFlags {
    pub vertical: bool,
    pub icons_only: bool,
}

/// Vertical when the measured width exceeds the layout breakpoint
/// (strictly). Forced breakpoints are vertical at any width.
pub fn is_vertical(measured_width: u32, layout_breakpoint: Breakpoint) -> bool {
    match layout_breakpoint {
        Breakpoint::Unset => false,
        Breakpoint::Forced => true,
        Breakpoint::Width(threshold) => threshold < measured_width,
    }
}

/// Icon-only when every tab has an icon and the measured width is
/// strictly below the icon breakpoint. A single tab without an icon keeps
/// labels on for all tabs; an empty tab set is never icon-only.
pub fn is_icons_only(measured_width: u32, icon_breakpoint: Breakpoint, registry: &TabRegistry) -> bool {
    if registry.is_empty() || !registry.all_have_icons() {
        return false;
    }
    match icon_breakpoint {
        Breakpoint::Unset => false,
        Breakpoint::Forced => true,
        Breakpoint::Width(threshold) => measured_width < threshold,
    }
}

pub fn resolve(
    measured_width: u32,
    layout_breakpoint: Breakpoint,
    icon_breakpoint: Breakpoint,
    registry: &TabRegistry,
) -> LayoutFlags {
    LayoutFlags {
        vertical: is_vertical(measured_width, layout_breakpoint),
        icons_only: is_icons_only(measured_width, icon_breakpoint, registry),
    }
}
