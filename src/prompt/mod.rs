pub mod engine;

pub use engine::prompt_service_name;
