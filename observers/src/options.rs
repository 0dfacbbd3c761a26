use alloc::string::String;
use alloc::vec::Vec;

/// Configuration for a structural mutation observer.
///
/// The defaults request attribute changes, child-list changes and subtree coverage. Start from
/// [`MutationOptions::default`] and override individual fields with the `with_*` methods; the
/// result is captured at construction and reused on every `resume`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MutationOptions {
    pub attributes: bool,
    pub child_list: bool,
    pub subtree: bool,
    pub character_data: bool,
    /// Record the previous attribute value in [`crate::MutationRecord::Attributes`].
    pub attribute_old_value: bool,
    pub character_data_old_value: bool,
    /// Restrict attribute observation to these local names.
    pub attribute_filter: Option<Vec<String>>,
}

impl Default for MutationOptions {
    fn default() -> Self {
        Self {
            attributes: true,
            child_list: true,
            subtree: true,
            character_data: false,
            attribute_old_value: false,
            character_data_old_value: false,
            attribute_filter: None,
        }
    }
}

impl MutationOptions {
    pub fn with_attributes(mut self, attributes: bool) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_child_list(mut self, child_list: bool) -> Self {
        self.child_list = child_list;
        self
    }

    pub fn with_subtree(mut self, subtree: bool) -> Self {
        self.subtree = subtree;
        self
    }

    pub fn with_character_data(mut self, character_data: bool) -> Self {
        self.character_data = character_data;
        self
    }

    pub fn with_attribute_old_value(mut self, attribute_old_value: bool) -> Self {
        self.attribute_old_value = attribute_old_value;
        self
    }

    pub fn with_character_data_old_value(mut self, character_data_old_value: bool) -> Self {
        self.character_data_old_value = character_data_old_value;
        self
    }

    /// Sets the attribute filter. An empty iterator clears it.
    pub fn with_attribute_filter<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        self.attribute_filter = if names.is_empty() { None } else { Some(names) };
        self
    }
}

/// Which box a resize observer reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResizeBox {
    #[default]
    ContentBox,
    BorderBox,
    DevicePixelContentBox,
}

/// Configuration for a resize observer. The default is the host primitive's default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResizeOptions {
    pub box_model: ResizeBox,
}

impl ResizeOptions {
    pub fn with_box_model(mut self, box_model: ResizeBox) -> Self {
        self.box_model = box_model;
        self
    }
}

/// Configuration for an intersection observer.
///
/// `root: None` means the host viewport. `root_margin` uses CSS margin syntax and defaults to
/// `"0px"`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntersectionOptions<N> {
    pub root: Option<N>,
    pub root_margin: String,
    /// Visibility ratios at which the host should deliver a batch.
    pub threshold: Vec<f64>,
}

impl<N> Default for IntersectionOptions<N> {
    fn default() -> Self {
        Self {
            root: None,
            root_margin: String::from("0px"),
            threshold: alloc::vec![0.0],
        }
    }
}

impl<N> IntersectionOptions<N> {
    pub fn with_root(mut self, root: Option<N>) -> Self {
        self.root = root;
        self
    }

    pub fn with_root_margin(mut self, root_margin: impl Into<String>) -> Self {
        self.root_margin = root_margin.into();
        self
    }

    /// Sets the thresholds. Values are clamped to `0.0..=1.0` and sorted; an empty list falls
    /// back to `[0.0]`.
    pub fn with_threshold(mut self, threshold: impl IntoIterator<Item = f64>) -> Self {
        let mut t: Vec<f64> = threshold
            .into_iter()
            .filter(|v| !v.is_nan())
            .map(|v| v.clamp(0.0, 1.0))
            .collect();
        t.sort_by(|a, b| a.total_cmp(b));
        t.dedup();
        if t.is_empty() {
            t.push(0.0);
        }
        self.threshold = t;
        self
    }
}
