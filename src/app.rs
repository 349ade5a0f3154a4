//! App: the application root owning the card list.
//!
//! [`App`] builds a [`CardList`], mounts it at the configured location and
//! fills it from a [`CardSource`].

use crate::component::{Component, ComponentError, Params};
use crate::components::{Card, CardList, CardSource, FetchError, DEFAULT_IMAGE_WIDTH};
use crate::render::SharedTarget;

/// Errors from loading the application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Component(#[from] ComponentError),
}

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Configuration for the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Id of the element the app mounts into.
    pub location: String,
    /// Optional heading shown above the cards.
    pub title: Option<String>,
    /// Width of card images.
    pub image_width: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            location: "app".to_owned(),
            title: None,
            image_width: DEFAULT_IMAGE_WIDTH,
        }
    }
}

impl AppConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mount location (builder).
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Set the title (builder).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the card image width (builder).
    pub fn with_image_width(mut self, width: u32) -> Self {
        self.image_width = width;
        self
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// The application root. Not itself a component; it owns one.
pub struct App {
    config: AppConfig,
    card_list: Component,
}

impl App {
    /// Build the card list in its loading state.
    pub fn new(config: AppConfig) -> Result<Self, ComponentError> {
        let mut params = Params::new();
        if let Some(title) = &config.title {
            params = params.with("title", title.as_str());
        }
        let card_list = Component::with_params(CardList, params)?;
        card_list.set("loading", true)?;
        Ok(Self { config, card_list })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn card_list(&self) -> &Component {
        &self.card_list
    }

    /// Mount the card list at the configured location.
    pub fn place_at(&self, target: &SharedTarget) -> Result<(), ComponentError> {
        self.card_list.place_at(target, &self.config.location)
    }

    /// Fetch cards, replace the list's cards, leave the loading state and
    /// fire `loaded` with the card count. Returns the count.
    pub async fn load<S: CardSource>(&self, source: &S) -> Result<usize, AppError> {
        let records = source.fetch_cards().await?;
        let card = Card::new().with_image_width(self.config.image_width);
        let cards = records
            .iter()
            .map(|record| card.build(record))
            .collect::<Result<Vec<_>, _>>()?;
        let count = cards.len();

        self.card_list.invoke("setCards", cards)?;
        self.card_list.set("loading", false)?;
        self.card_list.fire_event("loaded", count)?;
        tracing::debug!(count, location = %self.config.location, "app loaded");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::components::{JsonCardSource, LOADER_REF};
    use crate::render::Document;
    use crate::value::Value;

    #[test]
    fn config_builder() {
        let config = AppConfig::new()
            .with_location("root")
            .with_title("Cards")
            .with_image_width(80);
        assert_eq!(config.location, "root");
        assert_eq!(config.title.as_deref(), Some("Cards"));
        assert_eq!(config.image_width, 80);
        assert_eq!(AppConfig::default().image_width, DEFAULT_IMAGE_WIDTH);
    }

    #[test]
    fn starts_loading() {
        let app = App::new(AppConfig::new()).unwrap();
        assert_eq!(app.card_list().get("loading").unwrap(), Value::Bool(true));
    }

    #[tokio::test]
    async fn load_fills_list_and_fires_loaded() {
        let doc = Document::from_markup(r#"<div id="app"></div>"#).unwrap().into_shared();
        let target: SharedTarget = doc.clone();
        let app = App::new(AppConfig::new().with_image_width(42)).unwrap();
        app.place_at(&target).unwrap();

        let fired = Rc::new(Cell::new(None));
        let seen = Rc::clone(&fired);
        app.card_list()
            .on("loaded", move |payload| {
                seen.set(payload.as_i64());
                Ok(())
            })
            .unwrap();

        let source = JsonCardSource::new(r#"[{"title":"A"},{"title":"B"},{"title":"C"}]"#);
        assert_eq!(app.load(&source).await.unwrap(), 3);
        assert_eq!(app.card_list().aggregation("cards").unwrap().len(), 3);
        assert!(!app.card_list().get_ref(LOADER_REF).unwrap().has_class("loading"));
        assert_eq!(fired.get(), Some(3));
        assert!(doc.borrow().markup().contains(r#"width="42""#));
    }

    #[tokio::test]
    async fn fetch_errors_propagate() {
        let app = App::new(AppConfig::new()).unwrap();
        let err = app.load(&JsonCardSource::new("nope")).await.unwrap_err();
        assert!(matches!(err, AppError::Fetch(_)));
        assert_eq!(app.card_list().get("loading").unwrap(), Value::Bool(true));
    }
}
