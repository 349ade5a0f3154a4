//! Built-in components: cards, the card list, and card data sources.

pub mod card;
pub mod card_list;
pub mod source;

pub use card::{Card, DEFAULT_IMAGE_WIDTH};
pub use card_list::{CardList, CARD_LIST_REF, LOADER_REF};
pub use source::{CardRecord, CardSource, FetchError, JsonCardSource};
