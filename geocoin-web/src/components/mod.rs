pub mod button;
pub mod cache_list;
pub mod controls;

pub use button::Button;
pub use cache_list::CacheList;
pub use controls::Controls;
