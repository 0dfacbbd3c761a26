use observers::{IntersectionOptions, MutationOptions, ResizeOptions};

/// Options handed to each child when it is created.
///
/// Every field defaults to the matching `observers` default, so an aggregate built with
/// `SharedOptions::default()` behaves like three separately created observers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SharedOptions<N> {
    pub mutation: MutationOptions,
    pub resize: ResizeOptions,
    pub intersection: IntersectionOptions<N>,
}

impl<N> Default for SharedOptions<N> {
    fn default() -> Self {
        Self {
            mutation: MutationOptions::default(),
            resize: ResizeOptions::default(),
            intersection: IntersectionOptions::default(),
        }
    }
}

impl<N> SharedOptions<N> {
    pub fn with_mutation(mut self, mutation: MutationOptions) -> Self {
        self.mutation = mutation;
        self
    }

    pub fn with_resize(mut self, resize: ResizeOptions) -> Self {
        self.resize = resize;
        self
    }

    pub fn with_intersection(mut self, intersection: IntersectionOptions<N>) -> Self {
        self.intersection = intersection;
        self
    }
}
