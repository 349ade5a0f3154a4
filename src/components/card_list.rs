//! CardList: a loading indicator plus an ordered list of cards.

use crate::component::{Arg, ComponentError, RenderContext, Returned, View};
use crate::descriptor::{DescriptorBuilder, PropertySpec};

/// Ref name of the loading indicator.
pub const LOADER_REF: &str = "loader";
/// Ref name of the `<ul>` the cards render into.
pub const CARD_LIST_REF: &str = "cardList";

/// View of the card list.
///
/// Declares `title`, `loading` (default `true`), the `cards` aggregation
/// anchored at [`CARD_LIST_REF`] and the `loaded` event. `setLoading` is
/// overridden to flip the `loading` and `hidden` classes in place instead of
/// re-rendering the whole list.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardList;

impl View for CardList {
    fn descriptor(&self) -> DescriptorBuilder {
        DescriptorBuilder::new()
            .property("title", PropertySpec::new())
            .property("loading", PropertySpec::new().with_default(true))
            .aggregation("cards", CARD_LIST_REF)
            .event("loaded")
    }

    fn accessors(&self, table: &mut crate::component::AccessorTable) {
        table.custom("setLoading", |component, arg| {
            let Arg::Value(value) = arg else {
                return Err(ComponentError::InvalidArgument {
                    accessor: "setLoading".to_owned(),
                    expected: "a value",
                });
            };
            let loading = value.is_truthy();
            component.write_property("loading", value)?;
            component.set_ref_class(LOADER_REF, "loading", loading);
            component.set_ref_class(CARD_LIST_REF, "hidden", loading);
            Ok(Returned::Component(component.clone()))
        });
    }

    fn render(&self, cx: &RenderContext<'_>) -> String {
        let loading = cx.flag("loading");
        let title = cx.prop("title");
        let heading = if title.is_null() {
            String::new()
        } else {
            format!("<h2>{}</h2>", cx.text("title"))
        };
        format!(
            r#"
            <div id="{id}" class="CardList">
                {heading}
                <div ref="{LOADER_REF}" class="loader{loader}">Loading...</div>
                <ul ref="{CARD_LIST_REF}"{list_class}>{cards}</ul>
            </div>
            "#,
            id = cx.id(),
            loader = if loading { " loading" } else { "" },
            list_class = if loading { r#" class="hidden""# } else { "" },
            cards = cx.render_children("cards"),
        )
    }
}
