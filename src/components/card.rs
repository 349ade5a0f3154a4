//! Card: a leaf component showing a title, an image and a description.

use super::source::CardRecord;
use crate::component::{Component, ComponentError, Params, RenderContext, View};
use crate::descriptor::{DescriptorBuilder, PropertySpec};

/// Image width used when none is configured.
pub const DEFAULT_IMAGE_WIDTH: u32 = 100;

// ---------------------------------------------------------------------------
// Card
// ---------------------------------------------------------------------------

/// View of a single card.
///
/// Properties: `title`, `description`, `image`. Renders as
/// `<li id=… class="Card"><h3>title</h3><img src=… width=…/><p>description</p></li>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    image_width: u32,
}

impl Card {
    pub fn new() -> Self {
        Self {
            image_width: DEFAULT_IMAGE_WIDTH,
        }
    }

    /// Set the rendered image width (builder).
    pub fn with_image_width(mut self, width: u32) -> Self {
        self.image_width = width;
        self
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    /// Construct a card component from a record.
    pub fn build(&self, record: &CardRecord) -> Result<Component, ComponentError> {
        Component::with_params(
            *self,
            Params::new()
                .with("title", record.title.as_str())
                .with("description", record.description.as_str())
                .with("image", record.image.as_str()),
        )
    }
}

impl Default for Card {
    fn default() -> Self {
        Self::new()
    }
}

impl View for Card {
    fn descriptor(&self) -> DescriptorBuilder {
        DescriptorBuilder::new()
            .property("title", PropertySpec::new())
            .property("description", PropertySpec::new())
            .property("image", PropertySpec::new())
    }

    fn render(&self, cx: &RenderContext<'_>) -> String {
        format!(
            r#"
            <li id="{id}" class="Card">
                <h3>{title}</h3>
                <img src="{image}" width="{width}"/>
                <p>{description}</p>
            </li>
            "#,
            id = cx.id(),
            title = cx.text("title"),
            image = cx.attr("image"),
            width = self.image_width,
            description = cx.text("description"),
        )
    }
}
