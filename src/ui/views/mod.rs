pub mod create_view;
pub mod detail_view;
pub mod home_view;

pub use create_view::CreateView;
pub use detail_view::DetailView;
pub use home_view::HomeView;
