// Bulk job analysis: batching, prompt/schema construction, concurrent dispatch,
// result merging and the review step the front-end consumes.
// All model calls go through llm_client.

pub mod batching;
pub mod handlers;
pub mod orchestrator;
pub mod prompts;
pub mod review;
pub mod schema;
