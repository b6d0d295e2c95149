// SPDX-License-Identifier: LGPL-3.0-only

use crate::placement::corner::Corner;

/// Class token carried by content elements that are open.
pub const OPEN_TOKEN: &str = "popover-open";
/// Class token for viewport-fixed content.
pub const FIXED_TOKEN: &str = "popover-fixed";
/// Class token constraining content width to the anchor width.
pub const RELATIVE_WIDTH_TOKEN: &str = "popover-relative-width";
/// Class token selecting the flip-on-open overflow policy.
pub const FLIP_ONOPEN_TOKEN: &str = "popover-overflow-flip-onopen";
/// Class token selecting the flip-always overflow policy.
pub const FLIP_ALWAYS_TOKEN: &str = "popover-overflow-flip-always";

/// Which point of the anchor the overlay is pinned to, and which corner of
/// the overlay lands there.
///
/// Parsed once at connect time from the content element's declared style
/// tokens and treated as structured data thereafter. A side left [None]
/// (unrecognized or absent token) contributes a zero offset during
/// placement, matching the legacy fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlacementDescriptor {
    /// Reference point on the anchor rectangle.
    pub anchor: Option<Corner>,
    /// Corner of the overlay rectangle aligned to the reference point.
    pub overlay: Option<Corner>,
}

impl PlacementDescriptor {
    /// Create a descriptor from explicit corners.
    pub fn new(anchor: Corner, overlay: Corner) -> Self {
        Self {
            anchor: Some(anchor),
            overlay: Some(overlay),
        }
    }

    /// Parse the descriptor from a declared token list.
    ///
    /// Candidates are scanned in fixed table order, so when several corner
    /// tokens are declared the first one in table order wins, independent
    /// of token-list order.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        let has = |name: &str| tokens.iter().any(|t| t.as_ref() == name);

        let anchor = Corner::ALL
            .into_iter()
            .find(|corner| has(&format!("popover-anchor-{}", corner.as_token())));
        let overlay = Corner::ALL
            .into_iter()
            .find(|corner| has(&format!("popover-{}", corner.as_token())));

        Self { anchor, overlay }
    }
}

/// When the overflow-flip decision is (re)resolved over an overlay's open
/// lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Never flip.
    #[default]
    None,
    /// Resolve once when the overlay becomes visible; frozen until it is
    /// closed and reopened.
    FlipOnOpen,
    /// Re-resolve on every placement pass.
    FlipAlways,
}

impl OverflowPolicy {
    /// Parse the policy from a declared token list.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        let has = |name: &str| tokens.iter().any(|t| t.as_ref() == name);

        if has(FLIP_ONOPEN_TOKEN) {
            OverflowPolicy::FlipOnOpen
        } else if has(FLIP_ALWAYS_TOKEN) {
            OverflowPolicy::FlipAlways
        } else {
            OverflowPolicy::None
        }
    }
}

/// Everything the engine learns from a content element's declared tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PopoverDeclaration {
    /// Anchor/overlay corner pair.
    pub descriptor: PlacementDescriptor,
    /// Overflow-flip policy.
    pub policy: OverflowPolicy,
    /// Content is positioned viewport-fixed; scroll offsets never apply.
    pub fixed: bool,
    /// Content max-width is constrained to the anchor width before
    /// measuring.
    pub relative_width: bool,
}

impl PopoverDeclaration {
    /// Parse a full declaration from the token list of a content element.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Self {
        let has = |name: &str| tokens.iter().any(|t| t.as_ref() == name);

        Self {
            descriptor: PlacementDescriptor::from_tokens(tokens),
            policy: OverflowPolicy::from_tokens(tokens),
            fixed: has(FIXED_TOKEN),
            relative_width: has(RELATIVE_WIDTH_TOKEN),
        }
    }
}
