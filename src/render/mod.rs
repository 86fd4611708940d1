pub mod context;
pub mod stamp;
pub mod tokens;
pub mod walker;

pub use context::{normalize_namespace, RenderContext};
pub use stamp::{stamp, Format};
pub use tokens::{find_unrecognized, substitute, Token, TokenTable};
pub use walker::{execute_plan, materialize, plan_render, GenerationPlan, PlannedFile};
