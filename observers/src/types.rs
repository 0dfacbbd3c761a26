use alloc::string::String;
use alloc::vec::Vec;

/// A change record delivered by a structural mutation primitive.
///
/// Records of a type the structural observer does not route (currently
/// [`MutationRecord::CharacterData`]) are still passed to the catch-all subscriber.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum MutationRecord<N> {
    ChildList {
        target: N,
        added_nodes: Vec<N>,
        removed_nodes: Vec<N>,
        previous_sibling: Option<N>,
        next_sibling: Option<N>,
    },
    Attributes {
        target: N,
        attribute_name: Option<String>,
        attribute_namespace: Option<String>,
        old_value: Option<String>,
    },
    CharacterData {
        target: N,
        old_value: Option<String>,
    },
}

impl<N> MutationRecord<N> {
    pub fn child_list(target: N, added_nodes: Vec<N>, removed_nodes: Vec<N>) -> Self {
        Self::ChildList {
            target,
            added_nodes,
            removed_nodes,
            previous_sibling: None,
            next_sibling: None,
        }
    }

    pub fn attributes(target: N, attribute_name: impl Into<String>) -> Self {
        Self::Attributes {
            target,
            attribute_name: Some(attribute_name.into()),
            attribute_namespace: None,
            old_value: None,
        }
    }

    pub fn character_data(target: N) -> Self {
        Self::CharacterData {
            target,
            old_value: None,
        }
    }

    pub fn target(&self) -> &N {
        match self {
            Self::ChildList { target, .. }
            | Self::Attributes { target, .. }
            | Self::CharacterData { target, .. } => target,
        }
    }
}

/// Payload of an `attr` listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttrChange<'a, N> {
    pub attribute_name: Option<&'a str>,
    pub target_node: &'a N,
}

/// A rectangle in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DomRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DomRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top(&self) -> f64 {
        self.y.min(self.y + self.height)
    }

    pub fn left(&self) -> f64 {
        self.x.min(self.x + self.width)
    }

    pub fn bottom(&self) -> f64 {
        self.y.max(self.y + self.height)
    }

    pub fn right(&self) -> f64 {
        self.x.max(self.x + self.width)
    }
}

/// One fragment size reported by a resize primitive.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoxSize {
    pub inline_size: f64,
    pub block_size: f64,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResizeEntry<N> {
    pub target: N,
    pub content_rect: DomRect,
    pub border_box_size: Vec<BoxSize>,
    pub content_box_size: Vec<BoxSize>,
    pub device_pixel_content_box_size: Vec<BoxSize>,
}

impl<N> ResizeEntry<N> {
    /// An entry whose content box and border box both equal `width` × `height`.
    pub fn new(target: N, width: f64, height: f64) -> Self {
        let size = BoxSize {
            inline_size: width,
            block_size: height,
        };
        Self {
            target,
            content_rect: DomRect::new(0.0, 0.0, width, height),
            border_box_size: alloc::vec![size],
            content_box_size: alloc::vec![size],
            device_pixel_content_box_size: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntersectionEntry<N> {
    pub target: N,
    /// Host timestamp of the change, in milliseconds.
    pub time: f64,
    pub root_bounds: Option<DomRect>,
    pub bounding_client_rect: DomRect,
    pub intersection_rect: DomRect,
    pub is_intersecting: bool,
    /// Visible fraction of the target, `0.0..=1.0`.
    pub intersection_ratio: f64,
}

impl<N> IntersectionEntry<N> {
    pub fn new(target: N, is_intersecting: bool, intersection_ratio: f64) -> Self {
        Self {
            target,
            time: 0.0,
            root_bounds: None,
            bounding_client_rect: DomRect::default(),
            intersection_rect: DomRect::default(),
            is_intersecting,
            intersection_ratio,
        }
    }
}
