pub mod api_key;
pub mod lookup;
pub mod update;
