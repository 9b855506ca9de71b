pub mod alerts;
pub mod animations;
pub mod clock;
pub mod form_validation;
pub mod live_search;
pub mod number_formatting;
pub mod widgets;
