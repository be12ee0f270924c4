pub mod debounce;
pub mod error_handling;
mod hafalan_service;
pub mod search_paginator;
pub mod validation;

pub use hafalan_service::HafalanService;
pub use search_paginator::{PaginatorSnapshot, SearchPaginator};
