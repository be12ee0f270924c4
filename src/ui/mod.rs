mod app;
pub mod navigation;
pub mod notifier;
pub mod views;

pub use app::{AppControl, HafalanApp};
pub use navigation::{Navigator, Route};
pub use notifier::{Alert, Notifier};
