use core::fmt;

/// The three host primitives an observer can wrap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VariantKind {
    /// Structural mutation detection (child list and attribute changes).
    Mutation,
    Resize,
    Intersection,
}

impl VariantKind {
    pub const ALL: [VariantKind; 3] = [Self::Mutation, Self::Resize, Self::Intersection];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mutation => "mutation",
            Self::Resize => "resize",
            Self::Intersection => "intersection",
        }
    }

    /// Event kinds an observer of this variant can emit.
    pub fn kinds(self) -> &'static [EventKind] {
        match self {
            Self::Mutation => &[
                EventKind::Add,
                EventKind::Remove,
                EventKind::Mutate,
                EventKind::Attr,
            ],
            Self::Resize => &[EventKind::Resize],
            Self::Intersection => &[EventKind::Intersect],
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named category of event a listener can be bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// Nodes were added to the observed subtree.
    Add,
    /// Nodes were removed from the observed subtree.
    Remove,
    /// Nodes were added and/or removed; receives both lists.
    Mutate,
    /// An attribute changed.
    Attr,
    Resize,
    Intersect,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        Self::Add,
        Self::Remove,
        Self::Mutate,
        Self::Attr,
        Self::Resize,
        Self::Intersect,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Mutate => "mutate",
            Self::Attr => "attr",
            Self::Resize => "resize",
            Self::Intersect => "intersect",
        }
    }

    /// The variant that owns this kind.
    pub fn variant(self) -> VariantKind {
        match self {
            Self::Add | Self::Remove | Self::Mutate | Self::Attr => VariantKind::Mutation,
            Self::Resize => VariantKind::Resize,
            Self::Intersect => VariantKind::Intersection,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
