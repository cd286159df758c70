pub mod config;
pub mod error;
pub mod logging;
pub mod terminal;
pub mod ui;
pub mod widgets;

pub use config::{DemoConfig, MaskedInputConfig};
pub use error::{ConfigError, FilterError, MaskError, MaskedInputError};
pub use widgets::filters::{FilterChain, FilterKind, FilterRegistry, Predicate, RegexFilter};
pub use widgets::inputs::masked::{
    EditKey, MaskedTextBox, MaskedTextProvider, PropertyChange,
};
pub use widgets::traits::{EditCommand, InteractionResult};
